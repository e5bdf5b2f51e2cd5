use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::KeyValueStore;
use crate::{Result, VaultError};

/// A whole sequence persisted as one JSON array under a single key.
///
/// Every mutation reads the full array, changes it in memory and writes
/// it back through [`KeyValueStore::modify`], so a store that detects
/// concurrent writers never loses an update. Elements that do not decode
/// are hidden from readers but written back untouched.
pub struct JsonCollection<S, T> {
    store: S,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

/// Decoded elements plus the raw ones that could not be read.
struct Decoded<T> {
    items: Vec<T>,
    unreadable: Vec<Value>,
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            unreadable: Vec::new(),
        }
    }
}

impl<S, T> JsonCollection<S, T>
where
    S: KeyValueStore,
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current contents. Anything unreadable counts as missing.
    pub fn load(&self) -> Vec<T> {
        match self.store.get(&self.key) {
            Ok(bytes) => self.decode(bytes.as_deref()).items,
            Err(err) => {
                log::warn!(
                    "{}: read failed, using empty list: {}",
                    self.key,
                    err
                );
                Vec::new()
            }
        }
    }

    /// Load, apply `operator`, and persist only when it reports a change.
    ///
    /// `operator` runs again on fresher data when another writer got in
    /// first. A failed read is returned as an error rather than written
    /// over.
    pub fn update<R>(
        &self,
        mut operator: impl FnMut(&mut Vec<T>) -> (bool, R),
    ) -> Result<R> {
        let mut outcome = None;
        let mut apply = |current: Option<&[u8]>| -> Result<Option<Vec<u8>>> {
            let Decoded {
                mut items,
                unreadable,
            } = self.decode(current);
            let (changed, result) = operator(&mut items);
            outcome = Some(result);
            if !changed {
                return Ok(None);
            }
            let bytes = self.encode(&items, unreadable)?;
            log::debug!("{}: {} entries written", self.key, items.len());
            Ok(Some(bytes))
        };
        self.store.modify(&self.key, &mut apply)?;
        outcome.ok_or_else(|| {
            VaultError::Storage(
                self.key.clone(),
                "store skipped the update".to_owned(),
            )
        })
    }

    /// Drop the stored value in one operation.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        log::debug!("{}: cleared", self.key);
        Ok(())
    }

    fn decode(&self, bytes: Option<&[u8]>) -> Decoded<T> {
        let Some(bytes) = bytes else {
            return Decoded::default();
        };
        let values = match serde_json::from_slice::<Vec<Value>>(bytes) {
            Ok(values) => values,
            Err(err) => {
                log::warn!(
                    "{}: stored data is not a valid list, using empty list: {}",
                    self.key,
                    err
                );
                return Decoded::default();
            }
        };
        let mut decoded = Decoded::default();
        for (index, value) in values.into_iter().enumerate() {
            match T::deserialize(&value) {
                Ok(item) => decoded.items.push(item),
                Err(err) => {
                    log::warn!(
                        "{}: skipping unreadable entry {}: {}",
                        self.key,
                        index,
                        err
                    );
                    decoded.unreadable.push(value);
                }
            }
        }
        log::debug!("{}: {} entries loaded", self.key, decoded.items.len());
        decoded
    }

    fn encode(&self, items: &[T], unreadable: Vec<Value>) -> Result<Vec<u8>> {
        let storage_error = |err: serde_json::Error| {
            VaultError::Storage(self.key.clone(), err.to_string())
        };
        let mut values = items
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(storage_error)?;
        values.extend(unreadable);
        serde_json::to_vec(&values).map_err(storage_error)
    }
}
