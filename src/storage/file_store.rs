use std::path::{Path, PathBuf};

use super::{KeyValueStore, Operator};
use crate::atomic::{self, AtomicFile};
use crate::{Result, VaultError};

/// Store keeping every key in its own [`AtomicFile`] directory under `root`.
///
/// Removing a key publishes an empty version instead of deleting the
/// directory, so a concurrent reader never observes a half-removed value.
#[derive(Clone, Debug)]
pub struct AtomicFileStore {
    root: PathBuf,
}

impl AtomicFileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        log::debug!("file store opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file(&self, key: &str) -> Result<AtomicFile> {
        let name = directory_name(key)?;
        Ok(AtomicFile::new(self.root.join(name))?)
    }
}

/// Map a store key such as `@saved_profiles` to a directory name.
///
/// ASCII letters, digits, `_` and `-` are kept, every other byte becomes
/// `%XX`, so distinct keys never share a directory.
fn directory_name(key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(VaultError::Storage(
            key.to_owned(),
            "Key is empty".to_owned(),
        ));
    }
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            name.push(char::from(byte));
        } else {
            name.push_str(&format!("%{byte:02X}"));
        }
    }
    Ok(name)
}

impl KeyValueStore for AtomicFileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let current = self.file(key)?.load()?;
        log::trace!("reading {} at version {}", key, current.version);
        if current.version == 0 {
            return Ok(None);
        }
        let content = current.read_content()?;
        if content.is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let file = self.file(key)?;
        atomic::replace(&file, value).map_err(|err| {
            VaultError::Storage(key.to_owned(), err.to_string())
        })?;
        log::trace!("{} bytes written under {}", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let file = self.file(key)?;
        if file.latest_version()? == 0 {
            return Ok(());
        }
        atomic::replace(&file, &[]).map_err(|err| {
            VaultError::Storage(key.to_owned(), err.to_string())
        })
    }

    fn modify(&self, key: &str, operator: &mut Operator<'_>) -> Result<()> {
        let file = self.file(key)?;
        atomic::modify(&file, |current| {
            let current = (!current.is_empty()).then_some(current);
            operator(current)
        })
    }
}
