//! Wires a [`StorageBridge`] onto a host's ports.
//!
//! A get response carries no request identifier: the host can only match it
//! to the most recent `request-get`. Handlers run to completion before
//! `emit` returns, so with a single emitter the reply for each get arrives
//! before the next request is dispatched.

use std::sync::Arc;

use host_ports::{PortError, PortHub};

use crate::application_service::storage_bridge::StorageBridge;
use crate::domain::message::{RequestGet, RequestRemove, RequestSet, ResponseGet};
use crate::port::storage_port::StoragePort;

/// Subscribe `bridge` to the three request ports of `hub`.
///
/// Handlers hold the hub weakly so the hub can be dropped by its owner.
pub fn attach<S>(bridge: &Arc<StorageBridge<S>>, hub: &Arc<PortHub>) -> Result<(), PortError>
where
    S: StoragePort + 'static,
{
    hub.subscribe::<RequestSet, _>({
        let bridge = Arc::clone(bridge);
        move |request| {
            bridge.set(request)?;
            Ok(())
        }
    })?;

    hub.subscribe::<RequestGet, _>({
        let bridge = Arc::clone(bridge);
        let hub = Arc::downgrade(hub);
        move |request| {
            let response = bridge.get(request)?;
            let hub = hub.upgrade().ok_or("port hub dropped")?;
            hub.send::<ResponseGet>(response)?;
            Ok(())
        }
    })?;

    hub.subscribe::<RequestRemove, _>({
        let bridge = Arc::clone(bridge);
        move |request| {
            bridge.remove(request)?;
            Ok(())
        }
    })?;

    tracing::debug!("Storage bridge attached to host ports");
    Ok(())
}
