//! Host startup: builds the bridge, attaches it to the ports and hands the
//! host its capabilities before the host starts running.

use std::sync::Arc;

use host_ports::{PortError, PortHub};

use crate::application_service::storage_bridge::StorageBridge;
use crate::port::highlighter::SyntaxHighlighter;
use crate::port::storage_port::StoragePort;
use crate::presentation::ports::attach;

/// Capabilities injected into the host, replacing well-known globals.
#[derive(Clone, Default)]
pub struct HostCapabilities {
    highlighter: Option<Arc<dyn SyntaxHighlighter>>,
}

impl HostCapabilities {
    pub fn highlighter(&self) -> Option<&Arc<dyn SyntaxHighlighter>> {
        self.highlighter.as_ref()
    }
}

/// Everything the host needs once startup is done.
pub struct HostBindings<S> {
    pub hub: Arc<PortHub>,
    pub bridge: Arc<StorageBridge<S>>,
    pub capabilities: HostCapabilities,
}

pub struct HostBootstrap<S> {
    storage: S,
    highlighter: Option<Arc<dyn SyntaxHighlighter>>,
}

impl<S: StoragePort + 'static> HostBootstrap<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            highlighter: None,
        }
    }

    pub fn with_highlighter(mut self, highlighter: Arc<dyn SyntaxHighlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn start(self) -> Result<HostBindings<S>, PortError> {
        let hub = Arc::new(PortHub::new());
        let bridge = Arc::new(StorageBridge::new(self.storage));
        attach(&bridge, &hub)?;

        if let Some(highlighter) = &self.highlighter {
            tracing::info!(highlighter = highlighter.name(), "Syntax highlighter registered");
        }

        Ok(HostBindings {
            hub,
            bridge,
            capabilities: HostCapabilities {
                highlighter: self.highlighter,
            },
        })
    }
}
