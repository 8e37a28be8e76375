//! Port declarations
//!
//! A port is a named, typed message path between a host application and the
//! plumbing that serves it. Ports are declared as zero-sized marker types so
//! the hub can key its subscriptions by `TypeId` and the compiler can reject
//! messages sent in the wrong direction.

/// A named message path carrying values of type `Message`.
pub trait Port: 'static {
    /// Payload carried on this port.
    type Message: 'static;

    /// Stable name used in logs and on the wire.
    const NAME: &'static str;
}

/// Host → plumbing. The host emits, the plumbing subscribes.
pub trait OutboundPort: Port {}

/// Plumbing → host. The plumbing sends, the host listens.
pub trait InboundPort: Port {}

/// Which way a port carries messages, relative to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outbound,
    Inbound,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Outbound => write!(f, "outbound"),
            Direction::Inbound => write!(f, "inbound"),
        }
    }
}
