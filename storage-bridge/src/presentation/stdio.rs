//! JSON-lines transport between an out-of-process host and the port hub.
//!
//! Each input line is an envelope `{"port": "...", "payload": ..., "id": ...}`.
//! Set and remove requests produce no output; every get request produces
//! exactly one `response-get` envelope. The optional `id` is copied onto
//! that response so a host with several requests in flight can match them.
//!
//! The hub may be shared with other emitters. Only responses produced by
//! the transport's own dispatch, on the dispatching thread, are written back.

use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use host_ports::{OutboundPort, Port, PortError, PortHub};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::message::{GetResponse, RequestGet, RequestRemove, RequestSet, ResponseGet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub port: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unknown port: {0}")]
    UnknownPort(String),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error("Transport I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Whether the run loop can skip the offending line and continue.
    fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TransportError::Malformed(_) | TransportError::UnknownPort(_)
        )
    }

    /// A handler, usually the store behind it, failed on this one request.
    fn is_request_failure(&self) -> bool {
        matches!(self, TransportError::Port(PortError::Handler { .. }))
    }
}

/// Responses collected while one envelope is being dispatched.
struct Capture {
    thread: ThreadId,
    responses: Vec<GetResponse>,
}

pub struct StdioTransport {
    hub: Arc<PortHub>,
    dispatch: Mutex<()>,
    capture: Arc<Mutex<Option<Capture>>>,
}

impl StdioTransport {
    /// Registers the transport as a host-side listener of `response-get`.
    pub fn new(hub: Arc<PortHub>) -> Result<Self, PortError> {
        let capture: Arc<Mutex<Option<Capture>>> = Arc::new(Mutex::new(None));
        hub.listen::<ResponseGet, _>({
            let capture = Arc::clone(&capture);
            move |response| {
                let mut capture = capture.lock().map_err(|e| e.to_string())?;
                match capture.as_mut() {
                    Some(active) if active.thread == thread::current().id() => {
                        active.responses.push(response.clone());
                    }
                    _ => tracing::trace!("Ignoring response-get emitted outside the transport"),
                }
                Ok(())
            }
        })?;
        Ok(Self {
            hub,
            dispatch: Mutex::new(()),
            capture,
        })
    }

    /// Dispatch one envelope and collect the envelopes to write back.
    pub fn handle_envelope(&self, envelope: Envelope) -> Result<Vec<Envelope>, TransportError> {
        let _dispatch = self.dispatch.lock().map_err(|_| PortError::Poisoned)?;

        self.begin_capture()?;
        let routed = self.route(&envelope.port, envelope.payload);
        let responses = self.end_capture()?;
        routed?;

        responses
            .into_iter()
            .map(|response| -> Result<Envelope, TransportError> {
                Ok(Envelope {
                    port: ResponseGet::NAME.to_string(),
                    payload: serde_json::to_value(&response)?,
                    id: envelope.id.clone(),
                })
            })
            .collect()
    }

    /// Parse and dispatch one input line.
    pub fn handle_line(&self, line: &str) -> Result<Vec<Envelope>, TransportError> {
        let envelope: Envelope = serde_json::from_str(line)?;
        self.handle_envelope(envelope)
    }

    /// Serve requests until `reader` reaches end of input.
    ///
    /// Malformed lines and unknown ports are logged and skipped. A failing
    /// handler only fails its own request: it is logged and produces no
    /// output. Any other failure ends the run.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<(), TransportError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let outgoing = match self.handle_line(line) {
                Ok(outgoing) => outgoing,
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Skipping request: {e}");
                    continue;
                }
                Err(e) if e.is_request_failure() => {
                    tracing::error!("Request failed: {e}");
                    continue;
                }
                Err(e) => return Err(e),
            };

            for envelope in outgoing {
                let mut encoded = serde_json::to_vec(&envelope)?;
                encoded.push(b'\n');
                writer.write_all(&encoded).await?;
            }
            writer.flush().await?;
        }
        tracing::info!("Input closed, stopping transport");
        Ok(())
    }

    fn route(&self, port: &str, payload: serde_json::Value) -> Result<(), TransportError> {
        match port {
            RequestSet::NAME => self.forward::<RequestSet>(payload),
            RequestGet::NAME => self.forward::<RequestGet>(payload),
            RequestRemove::NAME => self.forward::<RequestRemove>(payload),
            other => Err(TransportError::UnknownPort(other.to_string())),
        }
    }

    fn begin_capture(&self) -> Result<(), PortError> {
        let mut capture = self.capture.lock().map_err(|_| PortError::Poisoned)?;
        *capture = Some(Capture {
            thread: thread::current().id(),
            responses: Vec::new(),
        });
        Ok(())
    }

    fn end_capture(&self) -> Result<Vec<GetResponse>, PortError> {
        let mut capture = self.capture.lock().map_err(|_| PortError::Poisoned)?;
        Ok(capture.take().map(|c| c.responses).unwrap_or_default())
    }

    fn forward<P>(&self, payload: serde_json::Value) -> Result<(), TransportError>
    where
        P: OutboundPort,
        P::Message: DeserializeOwned,
    {
        let message: P::Message = serde_json::from_value(payload)?;
        self.hub.emit::<P>(message)?;
        Ok(())
    }
}
