//! StoragePort trait - Abstract interface for a persistent key/value store

use std::sync::Arc;

use crate::error::StorageError;

/// Abstract interface for the host's key/value store.
///
/// Implementations may use an in-process map, sled (native) or the
/// browser's `localStorage` (WASM). Calls are synchronous and complete
/// before returning.
pub trait StoragePort: Send + Sync {
    /// Overwrite the entry for `key` with `value`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read the entry for `key`. An absent key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Delete the entry for `key`. Deleting an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: StoragePort + ?Sized> StoragePort for Box<T> {
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: StoragePort + ?Sized> StoragePort for Arc<T> {
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
