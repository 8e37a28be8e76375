pub mod highlighter;
pub mod memory_storage;
#[cfg(not(target_arch = "wasm32"))]
pub mod sled_storage;
#[cfg(target_arch = "wasm32")]
pub mod web_storage;

pub use highlighter::HtmlEscapeHighlighter;
pub use memory_storage::InMemoryStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use sled_storage::SledStorage;
#[cfg(target_arch = "wasm32")]
pub use web_storage::WebStorage;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::StorageError;
use crate::port::storage_port::StoragePort;

/// Build the store selected by the configuration.
pub fn open_storage(config: &StorageConfig) -> Result<Box<dyn StoragePort>, StorageError> {
    match config.backend {
        StorageBackend::Memory => Ok(Box::new(InMemoryStorage::new())),
        #[cfg(not(target_arch = "wasm32"))]
        StorageBackend::Sled => {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Unavailable(format!(
                        "Failed to create storage directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
            Ok(Box::new(SledStorage::open(&config.path)?))
        }
        #[cfg(target_arch = "wasm32")]
        StorageBackend::Sled => Err(StorageError::Unavailable(
            "sled storage is not available in the browser".to_string(),
        )),
        #[cfg(target_arch = "wasm32")]
        StorageBackend::Web => Ok(Box::new(WebStorage::new())),
        #[cfg(not(target_arch = "wasm32"))]
        StorageBackend::Web => Err(StorageError::Unavailable(
            "browser localStorage is only available in WASM builds".to_string(),
        )),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn opens_configured_backends() {
        let temp_dir = TempDir::new().unwrap();

        let memory = open_storage(&StorageConfig {
            backend: StorageBackend::Memory,
            path: temp_dir.path().join("unused"),
        })
        .unwrap();
        memory.set("k", "v").unwrap();
        assert_eq!(memory.get("k").unwrap(), Some("v".to_string()));

        let sled = open_storage(&StorageConfig {
            backend: StorageBackend::Sled,
            path: temp_dir.path().join("nested").join("db"),
        })
        .unwrap();
        sled.set("k", "v").unwrap();
        assert_eq!(sled.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn web_backend_is_unavailable_natively() {
        let result = open_storage(&StorageConfig {
            backend: StorageBackend::Web,
            path: "unused".into(),
        });
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
    }
}
