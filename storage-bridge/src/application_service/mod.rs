#[cfg(not(target_arch = "wasm32"))]
pub mod bridge_actor;
pub mod storage_bridge;

#[cfg(not(target_arch = "wasm32"))]
pub use bridge_actor::{spawn_bridge, BridgeHandle};
pub use storage_bridge::StorageBridge;
