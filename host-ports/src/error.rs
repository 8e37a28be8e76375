use thiserror::Error;

/// Error returned by a port handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by a port handler.
pub type HandlerResult = Result<(), HandlerError>;

/// Failure raised while registering or delivering a port message.
#[derive(Error, Debug)]
pub enum PortError {
    #[error("No subscribers registered on port {port}")]
    NoSubscribers { port: &'static str },

    #[error("Handler on port {port} received a message of an unexpected type")]
    UnexpectedMessage { port: &'static str },

    #[error("Handler on port {port} failed: {source}")]
    Handler {
        port: &'static str,
        #[source]
        source: HandlerError,
    },

    #[error("Port registry lock poisoned")]
    Poisoned,
}
