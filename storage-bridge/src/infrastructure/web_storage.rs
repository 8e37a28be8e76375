//! Browser `localStorage` adapter (WASM only).

use wasm_bindgen::JsValue;

use crate::error::StorageError;
use crate::port::storage_port::StoragePort;

/// [`StoragePort`] backed by `window.localStorage`.
///
/// The storage object is looked up on every call instead of being held,
/// since JS handles cannot cross threads. Disabled or sandboxed storage
/// surfaces as [`StorageError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage;

impl WebStorage {
    pub fn new() -> Self {
        Self
    }

    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window object".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Unavailable(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl StoragePort for WebStorage {
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::local_storage()?.set_item(key, value).map_err(js_error)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::local_storage()?.get_item(key).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::local_storage()?.remove_item(key).map_err(js_error)
    }
}
