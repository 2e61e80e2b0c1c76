//! In-memory message store for instances running without a database.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use relaychat_shared::time::{Clock, SystemClock};

use crate::domain::{Message, MessageStore, StoreError};

/// Number of messages retained in memory when no database is
/// configured. History beyond this is dropped oldest-first and does
/// not survive a restart.
pub const EPHEMERAL_HISTORY_CAPACITY: usize = 1000;

/// Bounded in-memory ring of recent messages.
///
/// Messages get no `id`; `created_at` comes from the injected clock at
/// the moment the message enters the ring.
pub struct EphemeralMessageStore {
    ring: Mutex<VecDeque<Message>>,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl EphemeralMessageStore {
    pub fn new() -> Self {
        Self::with_capacity_and_clock(EPHEMERAL_HISTORY_CAPACITY, Arc::new(SystemClock))
    }

    pub fn with_capacity_and_clock(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            ring: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            clock,
        }
    }
}

impl Default for EphemeralMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for EphemeralMessageStore {
    async fn append(&self, author: &str, text: &str) -> Result<Message, StoreError> {
        let message = Message {
            id: None,
            author: author.to_string(),
            text: text.to_string(),
            created_at: self.clock.now_utc(),
        };

        let mut ring = self.ring.lock().await;
        if ring.len() == self.capacity {
            ring.pop_front();
        }
        ring.push_back(message.clone());

        Ok(message)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Message>, StoreError> {
        let ring = self.ring.lock().await;
        let limit = limit.max(0) as usize;
        let skip = ring.len().saturating_sub(limit);
        Ok(ring.iter().skip(skip).cloned().collect())
    }
}
