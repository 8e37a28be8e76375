//! Sled-based persistent key/value store.

use std::path::Path;

use crate::domain::entry::StorageEntry;
use crate::error::StorageError;
use crate::port::storage_port::StoragePort;

const ENTRY_TREE_NAME: &str = "local_storage";

/// sled implementation of [`StoragePort`].
///
/// - Key: the entry key as UTF-8 bytes
/// - Value: the entry value as UTF-8 bytes
///
/// Every write is flushed so entries survive a restart.
pub struct SledStorage {
    db: sled::Db,
    entries: sled::Tree,
}

impl SledStorage {
    /// Open or create a sled database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path.as_ref())
            .map_err(|e| StorageError::Unavailable(format!("Failed to open sled database: {e}")))?;
        Self::with_db(db)
    }

    /// Open with an existing sled database instance.
    pub fn with_db(db: sled::Db) -> Result<Self, StorageError> {
        let entries = db
            .open_tree(ENTRY_TREE_NAME)
            .map_err(|e| StorageError::Unavailable(format!("Failed to open entry tree: {e}")))?;
        Ok(Self { db, entries })
    }

    /// All entries, in key order.
    pub fn entries(&self) -> Result<Vec<StorageEntry>, StorageError> {
        let mut entries = Vec::new();
        for result in self.entries.iter() {
            let (key, value) = result.map_err(|e| StorageError::Backend(e.to_string()))?;
            let key = String::from_utf8(key.to_vec())
                .map_err(|e| StorageError::Backend(format!("Failed to decode key: {e}")))?;
            let value = String::from_utf8(value.to_vec())
                .map_err(|_| StorageError::InvalidValue { key: key.clone() })?;
            entries.push(StorageEntry { key, value });
        }
        Ok(entries)
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.db
            .flush()
            .map_err(|e| StorageError::Backend(format!("Failed to flush database: {e}")))?;
        Ok(())
    }
}

impl StoragePort for SledStorage {
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| StorageError::Backend(format!("Failed to insert entry: {e}")))?;
        self.flush()
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let opt = self
            .entries
            .get(key.as_bytes())
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let Some(ivec) = opt else {
            return Ok(None);
        };

        String::from_utf8(ivec.to_vec())
            .map(Some)
            .map_err(|_| StorageError::InvalidValue {
                key: key.to_string(),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .remove(key.as_bytes())
            .map_err(|e| StorageError::Backend(format!("Failed to delete entry: {e}")))?;
        self.flush()
    }
}

impl Drop for SledStorage {
    fn drop(&mut self) {
        if let Err(e) = self.db.flush() {
            tracing::error!("Failed to flush sled database: {e}");
        }
    }
}
