//! Background bus relay.
//!
//! A single long-lived task drains the bus subscription and
//! re-broadcasts messages from other instances to this instance's
//! local connections, skipping persistence and re-publication (both
//! already happened on the originating instance).

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::task::JoinHandle;

use crate::infrastructure::ConnectionRegistry;
use crate::infrastructure::bus::{BusEnvelope, FanoutBus};

/// Handle to the spawned relay task. Shutting it down aborts the task
/// and releases the subscription.
pub struct RelayHandle {
    task: JoinHandle<()>,
}

impl RelayHandle {
    pub fn shutdown(self) {
        self.task.abort();
    }
}

pub struct BusRelay;

impl BusRelay {
    /// Spawn the subscriber loop for the life of the process.
    ///
    /// Envelopes whose origin matches `instance_id` were already
    /// delivered locally by the ingress pipeline and are skipped, so
    /// local clients see each message exactly once.
    pub fn spawn(
        bus: Arc<FanoutBus>,
        registry: Arc<ConnectionRegistry>,
        instance_id: u32,
    ) -> RelayHandle {
        let task = tokio::spawn(relay_loop(bus, registry, instance_id));
        RelayHandle { task }
    }
}

async fn relay_loop(bus: Arc<FanoutBus>, registry: Arc<ConnectionRegistry>, instance_id: u32) {
    let mut stream = match bus.subscribe().await {
        Ok(Some(stream)) => stream,
        Ok(None) => {
            tracing::info!("no bus configured, relay idle (local-only mode)");
            return;
        }
        Err(e) => {
            tracing::error!("failed to subscribe to bus: {}", e);
            return;
        }
    };

    tracing::info!("bus relay subscribed");
    while let Some(payload) = stream.next().await {
        match serde_json::from_str::<BusEnvelope>(&payload) {
            Ok(envelope) if envelope.origin == instance_id => {
                tracing::debug!("skipping own message echoed back by the bus");
            }
            Ok(envelope) => {
                registry.broadcast(&envelope.message).await;
            }
            Err(e) => {
                tracing::warn!("dropping malformed bus payload: {}", e);
            }
        }
    }
    tracing::warn!("bus subscription ended; remote messages will no longer be relayed");
}
