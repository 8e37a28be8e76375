pub mod error;
pub mod port;
pub mod port_hub;
pub mod port_subscription;

pub use error::{HandlerError, HandlerResult, PortError};
pub use port::{Direction, InboundPort, OutboundPort, Port};
pub use port_hub::PortHub;
pub use port_subscription::{make_subscriber, PortSubscriptions, Subscriber};
