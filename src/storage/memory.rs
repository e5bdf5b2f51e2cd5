use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;

use super::{KeyValueStore, Operator};
use crate::{Result, VaultError};

/// In-process store. Values vanish with the instance.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> VaultError {
    VaultError::Other(anyhow!("Could not lock memory store"))
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.remove(key);
        Ok(())
    }

    fn modify(&self, key: &str, operator: &mut Operator<'_>) -> Result<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        if let Some(next) = operator(values.get(key).map(Vec::as_slice))? {
            values.insert(key.to_owned(), next);
        }
        Ok(())
    }
}
