use crate::domain::message::{BridgeRequest, GetRequest, GetResponse, RemoveRequest, SetRequest};
use crate::error::StorageError;
use crate::port::storage_port::StoragePort;

/// Translates host requests into store operations.
///
/// Stateless apart from the injected store: no request tracking, no retry,
/// no validation beyond what the store enforces. Store errors are returned
/// to the caller as-is.
pub struct StorageBridge<S> {
    storage: S,
}

impl<S: StoragePort> StorageBridge<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Overwrite the entry. Nothing is sent back to the host.
    pub fn set(&self, request: &SetRequest) -> Result<(), StorageError> {
        tracing::debug!(key = %request.key, "set");
        self.storage.set(&request.key, &request.value)
    }

    /// Read the entry. Always yields exactly one response.
    pub fn get(&self, request: &GetRequest) -> Result<GetResponse, StorageError> {
        let value = self.storage.get(&request.key)?;
        tracing::debug!(key = %request.key, found = value.is_some(), "get");
        Ok(GetResponse::new(value))
    }

    /// Delete the entry if present.
    pub fn remove(&self, request: &RemoveRequest) -> Result<(), StorageError> {
        tracing::debug!(key = %request.key, "remove");
        self.storage.remove(&request.key)
    }

    /// Dispatch by message kind. Only get requests produce a response.
    pub fn handle(&self, request: &BridgeRequest) -> Result<Option<GetResponse>, StorageError> {
        match request {
            BridgeRequest::Set(set) => self.set(set).map(|()| None),
            BridgeRequest::Get(get) => self.get(get).map(Some),
            BridgeRequest::Remove(remove) => self.remove(remove).map(|()| None),
        }
    }
}

#[cfg(test)]
mod storage_bridge_tests {
    use super::*;
    use crate::infrastructure::memory_storage::InMemoryStorage;

    struct UnavailableStorage;

    impl StoragePort for UnavailableStorage {
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }
    }

    #[test]
    fn theme_scenario() {
        let bridge = StorageBridge::new(InMemoryStorage::new());

        bridge.set(&SetRequest::new("theme", "dark")).unwrap();
        let response = bridge.get(&GetRequest::new("theme")).unwrap();
        assert_eq!(response.value.as_deref(), Some("dark"));

        bridge.remove(&RemoveRequest::new("theme")).unwrap();
        let response = bridge.get(&GetRequest::new("theme")).unwrap();
        assert_eq!(response.value, None);
    }

    #[test]
    fn get_unwritten_key_is_absent() {
        let bridge = StorageBridge::new(InMemoryStorage::new());

        let response = bridge.get(&GetRequest::new("never-written")).unwrap();

        assert_eq!(response, GetResponse::new(None));
    }

    #[test]
    fn last_write_wins() {
        let bridge = StorageBridge::new(InMemoryStorage::new());

        bridge.set(&SetRequest::new("k", "v1")).unwrap();
        bridge.set(&SetRequest::new("k", "v2")).unwrap();
        bridge.set(&SetRequest::new("k", "v2")).unwrap();

        assert_eq!(
            bridge.get(&GetRequest::new("k")).unwrap().value.as_deref(),
            Some("v2")
        );
    }

    #[test]
    fn remove_absent_key_leaves_others() {
        let bridge = StorageBridge::new(InMemoryStorage::new());
        bridge.set(&SetRequest::new("keep", "me")).unwrap();

        bridge.remove(&RemoveRequest::new("absent")).unwrap();

        assert_eq!(
            bridge.get(&GetRequest::new("keep")).unwrap().value.as_deref(),
            Some("me")
        );
        assert_eq!(bridge.storage().entries().unwrap().len(), 1);
    }

    #[test]
    fn empty_key_and_value_are_passed_through() {
        let bridge = StorageBridge::new(InMemoryStorage::new());

        bridge.set(&SetRequest::new("", "")).unwrap();

        assert_eq!(
            bridge.get(&GetRequest::new("")).unwrap().value.as_deref(),
            Some("")
        );
    }

    #[test]
    fn handle_replies_only_to_get() {
        let bridge = StorageBridge::new(InMemoryStorage::new());

        let set = bridge
            .handle(&BridgeRequest::Set(SetRequest::new("lang", "en")))
            .unwrap();
        let get = bridge
            .handle(&BridgeRequest::Get(GetRequest::new("lang")))
            .unwrap();
        let remove = bridge
            .handle(&BridgeRequest::Remove(RemoveRequest::new("lang")))
            .unwrap();

        assert_eq!(set, None);
        assert_eq!(get, Some(GetResponse::new(Some("en".to_string()))));
        assert_eq!(remove, None);
    }

    #[test]
    fn store_failures_propagate() {
        let bridge = StorageBridge::new(UnavailableStorage);

        assert!(matches!(
            bridge.set(&SetRequest::new("k", "v")),
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            bridge.get(&GetRequest::new("k")),
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            bridge.remove(&RemoveRequest::new("k")),
            Err(StorageError::Unavailable(_))
        ));
    }
}
