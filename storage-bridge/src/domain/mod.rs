pub mod entry;
pub mod message;

pub use entry::StorageEntry;
pub use message::{
    BridgeRequest, GetRequest, GetResponse, RemoveRequest, RequestGet, RequestRemove, RequestSet,
    ResponseGet, SetRequest,
};
