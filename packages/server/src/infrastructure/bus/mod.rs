//! Fan-out bus adapter: capability-checked wrapper over the pub/sub
//! transport, resolved once at startup.

mod memory;
mod postgres;

pub use memory::InMemoryBus;
pub use postgres::PostgresBus;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{BusError, BusStream, BusTransport, Message};

/// Wire format for payloads on the bus channel.
///
/// `origin` identifies the publishing instance so the relay can skip
/// messages this instance already delivered to its own connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusEnvelope {
    pub origin: u32,
    pub message: Message,
}

/// Cross-instance fan-out bus.
///
/// `Networked` publishes every ingested message on a well-known
/// channel; `LocalOnly` makes both publish and subscribe no-ops, fully
/// isolating the instance.
pub enum FanoutBus {
    Networked {
        transport: Arc<dyn BusTransport>,
        channel: String,
        origin: u32,
    },
    LocalOnly,
}

impl FanoutBus {
    pub fn networked(
        transport: Arc<dyn BusTransport>,
        channel: impl Into<String>,
        origin: u32,
    ) -> Self {
        Self::Networked {
            transport,
            channel: channel.into(),
            origin,
        }
    }

    pub fn local_only() -> Self {
        Self::LocalOnly
    }

    /// Publish a message to other instances. Fire-and-forget: transport
    /// failures are logged and never propagate to the ingress caller.
    pub async fn publish(&self, message: &Message) {
        let Self::Networked {
            transport,
            channel,
            origin,
        } = self
        else {
            return;
        };

        let envelope = BusEnvelope {
            origin: *origin,
            message: message.clone(),
        };
        let payload = serde_json::to_string(&envelope).unwrap();
        if let Err(e) = transport.publish(channel, &payload).await {
            tracing::warn!("failed to publish message to bus: {}", e);
        }
    }

    /// Open the relay subscription. Returns `Ok(None)` in local-only
    /// mode, where no remote messages can ever arrive.
    pub async fn subscribe(&self) -> Result<Option<BusStream>, BusError> {
        match self {
            Self::Networked {
                transport, channel, ..
            } => Ok(Some(transport.subscribe(channel).await?)),
            Self::LocalOnly => Ok(None),
        }
    }
}
