pub mod application_service;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
pub mod presentation;

pub use application_service::StorageBridge;
#[cfg(not(target_arch = "wasm32"))]
pub use application_service::{spawn_bridge, BridgeHandle};
pub use config::{BridgeConfig, ConfigError, ConfigOverrides, StorageBackend};
pub use domain::*;
pub use error::{BridgeError, StorageError};
pub use port::*;
pub use presentation::{HostBindings, HostBootstrap, HostCapabilities};
