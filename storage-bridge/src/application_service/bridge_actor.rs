//! Bridge actor - serializes store access for concurrent callers.
//!
//! Every request goes through one bounded queue drained by a single task,
//! so set/remove keep last-write-wins semantics and a get observes every
//! write queued before it.

use tokio::sync::{mpsc, oneshot};

use crate::application_service::storage_bridge::StorageBridge;
use crate::domain::message::{GetRequest, GetResponse, RemoveRequest, SetRequest};
use crate::error::{BridgeError, StorageError};
use crate::port::storage_port::StoragePort;

/// Commands sent to the bridge loop.
enum BridgeCommand {
    Set(SetRequest),
    Get {
        request: GetRequest,
        reply: oneshot::Sender<Result<GetResponse, StorageError>>,
    },
    Remove(RemoveRequest),
    Shutdown,
}

/// Cloneable sender side of a running bridge.
#[derive(Clone)]
pub struct BridgeHandle {
    command_tx: mpsc::Sender<BridgeCommand>,
}

/// Run `bridge` on its own task behind a queue of `capacity` requests.
///
/// Must be called from within a tokio runtime.
pub fn spawn_bridge<S>(bridge: StorageBridge<S>, capacity: usize) -> BridgeHandle
where
    S: StoragePort + 'static,
{
    let (command_tx, command_rx) = mpsc::channel(capacity.max(1));
    tokio::spawn(run_bridge_loop(bridge, command_rx));
    BridgeHandle { command_tx }
}

async fn run_bridge_loop<S: StoragePort>(
    bridge: StorageBridge<S>,
    mut command_rx: mpsc::Receiver<BridgeCommand>,
) {
    tracing::info!("Storage bridge started");
    while let Some(command) = command_rx.recv().await {
        match command {
            BridgeCommand::Set(request) => {
                // No acknowledgement goes back to the host.
                if let Err(e) = bridge.set(&request) {
                    tracing::error!(key = %request.key, "Failed to set entry: {e}");
                }
            }
            BridgeCommand::Get { request, reply } => {
                if reply.send(bridge.get(&request)).is_err() {
                    tracing::debug!(key = %request.key, "Get requester went away");
                }
            }
            BridgeCommand::Remove(request) => {
                if let Err(e) = bridge.remove(&request) {
                    tracing::error!(key = %request.key, "Failed to remove entry: {e}");
                }
            }
            BridgeCommand::Shutdown => break,
        }
    }
    tracing::info!("Storage bridge stopped");
}

impl BridgeHandle {
    /// Queue an overwrite. Returns once the request is queued.
    pub async fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), BridgeError> {
        self.command_tx
            .send(BridgeCommand::Set(SetRequest::new(key, value)))
            .await
            .map_err(|_| BridgeError::Closed)
    }

    /// Read an entry after every previously queued request has been applied.
    pub async fn get(&self, key: impl Into<String>) -> Result<Option<String>, BridgeError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(BridgeCommand::Get {
                request: GetRequest::new(key),
                reply: reply_tx,
            })
            .await
            .map_err(|_| BridgeError::Closed)?;
        let response = reply_rx.await.map_err(|_| BridgeError::Closed)??;
        Ok(response.value)
    }

    /// Queue a delete. Returns once the request is queued.
    pub async fn remove(&self, key: impl Into<String>) -> Result<(), BridgeError> {
        self.command_tx
            .send(BridgeCommand::Remove(RemoveRequest::new(key)))
            .await
            .map_err(|_| BridgeError::Closed)
    }

    /// Stop the loop once the requests queued so far have been applied.
    pub async fn shutdown(&self) -> Result<(), BridgeError> {
        self.command_tx
            .send(BridgeCommand::Shutdown)
            .await
            .map_err(|_| BridgeError::Closed)
    }
}
