use host_ports::PortError;
use thiserror::Error;

/// Failures reported by a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored value for key {key} is not valid UTF-8")]
    InvalidValue { key: String },
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error("Storage bridge is no longer running")]
    Closed,
}
