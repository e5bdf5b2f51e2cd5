use crate::Result;

mod collection;
mod file_store;
mod memory;

pub use collection::JsonCollection;
pub use file_store::AtomicFileStore;
pub use memory::MemoryStore;

/// Durable key-value storage with whole-value writes.
///
/// A write either fully replaces the value under a key or leaves the
/// previous one in place. Nothing above this trait needs its own journal.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` if nothing was written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Drop the value stored under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Read-modify-write of the value under `key`.
    ///
    /// `operator` gets the current value and returns the replacement, or
    /// `None` to leave it alone. Stores that can detect a concurrent write
    /// rerun `operator` on the fresher value instead of overwriting it.
    fn modify(&self, key: &str, operator: &mut Operator<'_>) -> Result<()> {
        let current = self.get(key)?;
        if let Some(next) = operator(current.as_deref())? {
            self.set(key, &next)?;
        }
        Ok(())
    }
}

/// Callback handed to [`KeyValueStore::modify`].
pub type Operator<'a> =
    dyn FnMut(Option<&[u8]>) -> Result<Option<Vec<u8>>> + 'a;

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn modify(&self, key: &str, operator: &mut Operator<'_>) -> Result<()> {
        (**self).modify(key, operator)
    }
}
