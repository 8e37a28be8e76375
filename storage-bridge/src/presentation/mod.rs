//! Host-facing surfaces: startup wiring, port handlers and the stdio transport.

pub mod bootstrap;
pub mod ports;
#[cfg(not(target_arch = "wasm32"))]
pub mod stdio;

pub use bootstrap::{HostBindings, HostBootstrap, HostCapabilities};
pub use ports::attach;
#[cfg(not(target_arch = "wasm32"))]
pub use stdio::{Envelope, StdioTransport, TransportError};
