use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entry::StorageEntry;
use crate::error::StorageError;
use crate::port::storage_port::StoragePort;

/// In-process key/value store.
///
/// - Nothing is persisted; entries are gone when the process exits.
/// - Clones share the same map, which makes it a convenient fake in tests.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = StorageEntry>,
    {
        let map = entries
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> Result<Vec<StorageEntry>, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let mut entries: Vec<StorageEntry> = guard
            .iter()
            .map(|(key, value)| StorageEntry::new(key.clone(), value.clone()))
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}

impl StoragePort for InMemoryStorage {
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(guard.get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        guard.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = InMemoryStorage::new();

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));

        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn clones_share_entries() {
        let store = InMemoryStorage::new();
        let view = store.clone();

        store.set("lang", "en").unwrap();

        assert_eq!(view.get("lang").unwrap(), Some("en".to_string()));
    }

    #[test]
    fn entries_are_sorted_by_key() {
        let store = InMemoryStorage::with_entries([
            StorageEntry::new("b", "2"),
            StorageEntry::new("a", "1"),
        ]);

        let entries = store.entries().unwrap();
        assert_eq!(
            entries,
            vec![StorageEntry::new("a", "1"), StorageEntry::new("b", "2")]
        );
    }
}
