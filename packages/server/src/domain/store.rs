//! Message store trait definition.
//!
//! The interface the ingress pipeline requires from the durable store.
//! Concrete implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::{Message, StoreError};

/// Append-only message store.
///
/// The use case layer depends on this trait only; whether messages are
/// written to Postgres or kept in a bounded in-memory ring is decided
/// once at startup by the composition root.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message, assigning `id` (when backed by a database) and
    /// `created_at`, and return the fully-formed message.
    async fn append(&self, author: &str, text: &str) -> Result<Message, StoreError>;

    /// The `limit` most recently created messages in chronological
    /// order (oldest first).
    async fn recent(&self, limit: i64) -> Result<Vec<Message>, StoreError>;
}
