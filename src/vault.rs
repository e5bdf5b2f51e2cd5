use crate::platform::Platform;
use crate::profile::{ProfileRecord, RecordKey};
use crate::storage::{JsonCollection, KeyValueStore};
use crate::{Result, SAVED_PROFILES_KEY};

/// Result of [`ProfileVault::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AlreadyExists,
}

/// Saved lookup results, newest first, unique per (username, platform).
pub struct ProfileVault<S> {
    profiles: JsonCollection<S, ProfileRecord>,
}

impl<S: KeyValueStore> ProfileVault<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, SAVED_PROFILES_KEY)
    }

    /// Vault kept under a custom store key.
    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            profiles: JsonCollection::new(store, key),
        }
    }

    pub fn list(&self) -> Result<Vec<ProfileRecord>> {
        Ok(self.profiles.load())
    }

    pub fn find(&self, key: &RecordKey) -> Result<Option<ProfileRecord>> {
        Ok(self
            .profiles
            .load()
            .into_iter()
            .find(|record| key.matches(record)))
    }

    pub fn contains(&self, username: &str, platform: Platform) -> Result<bool> {
        Ok(self
            .profiles
            .load()
            .iter()
            .any(|record| record.same_profile(username, platform)))
    }

    /// Prepend `record` unless a record for the same profile is stored.
    /// A duplicate leaves the vault untouched.
    pub fn save(&self, record: ProfileRecord) -> Result<SaveOutcome> {
        let label = record.key();
        let outcome = self.profiles.update(|profiles| {
            if profiles
                .iter()
                .any(|p| p.same_profile(&record.username, record.platform))
            {
                return (false, SaveOutcome::AlreadyExists);
            }
            profiles.insert(0, record.clone());
            (true, SaveOutcome::Saved)
        })?;
        match outcome {
            SaveOutcome::Saved => log::info!("saved {}", label),
            SaveOutcome::AlreadyExists => {
                log::info!("{} is already in the vault", label)
            }
        }
        Ok(outcome)
    }

    /// Remove the first record matching `key`. Returns whether one was found.
    pub fn delete(&self, key: &RecordKey) -> Result<bool> {
        let removed = self.profiles.update(|profiles| {
            match profiles.iter().position(|record| key.matches(record)) {
                Some(index) => {
                    profiles.remove(index);
                    (true, true)
                }
                None => (false, false),
            }
        })?;
        if removed {
            log::info!("deleted {}", key);
        } else {
            log::debug!("nothing stored for {}", key);
        }
        Ok(removed)
    }

    pub fn clear(&self) -> Result<()> {
        self.profiles.clear()?;
        log::info!("vault cleared");
        Ok(())
    }
}
