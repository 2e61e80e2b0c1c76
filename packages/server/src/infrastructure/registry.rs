//! Connection registry: the live client channels of this instance.
//!
//! Owned by the composition root and shared by handle with every
//! connection task, the ingress pipeline, and the bus relay. The two
//! producers of delivery events into connections are local broadcasts
//! and the relay.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use crate::domain::Message;

/// Identifier of one locally-attached client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sender half of a connection's outbound channel. The receiving half
/// is drained by that connection's pusher task.
pub type ConnectionSender = mpsc::UnboundedSender<String>;

/// Set of live connections for this instance.
///
/// Empty at instance start, grows on connect, shrinks on disconnect.
/// The lock is never held across a suspension point: sends on the
/// unbounded channels are synchronous.
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, ConnectionSender>>,
    messages_seen: AtomicU64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
            messages_seen: AtomicU64::new(0),
        }
    }

    /// Add a connection, returning its freshly assigned id.
    pub async fn register(&self, sender: ConnectionSender) -> ConnectionId {
        let id = ConnectionId::generate();
        let mut connections = self.connections.lock().await;
        connections.insert(id, sender);
        tracing::debug!("connection {} registered", id);
        id
    }

    /// Remove a connection if present. Removing an absent connection is
    /// a no-op, not an error.
    pub async fn unregister(&self, id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if connections.remove(id).is_some() {
            tracing::debug!("connection {} unregistered", id);
        }
    }

    /// Deliver a message to every currently registered connection.
    ///
    /// Delivery is best-effort: a send failure schedules that
    /// connection for removal and never aborts delivery to the rest.
    /// Failed connections are unregistered after the pass.
    pub async fn broadcast(&self, message: &Message) {
        let payload = serde_json::to_string(message).unwrap();
        self.messages_seen.fetch_add(1, Ordering::Relaxed);

        let mut connections = self.connections.lock().await;
        let mut failed = Vec::new();
        for (id, sender) in connections.iter() {
            if sender.send(payload.clone()).is_err() {
                failed.push(*id);
            }
        }
        for id in failed {
            connections.remove(&id);
            tracing::warn!("connection {} dropped during broadcast, removed", id);
        }
    }

    /// Number of currently registered connections.
    pub async fn count(&self) -> usize {
        self.connections.lock().await.len()
    }

    /// Total messages delivered locally (ingested plus relayed).
    pub fn messages_seen(&self) -> u64 {
        self.messages_seen.load(Ordering::Relaxed)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
