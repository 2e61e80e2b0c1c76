//! UseCase: fetch recent message history.

use std::sync::Arc;

use crate::domain::{Message, MessageStore, StoreError};

pub struct GetHistoryUseCase {
    store: Arc<dyn MessageStore>,
}

impl GetHistoryUseCase {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// The `limit` most recent messages, oldest first.
    pub async fn execute(&self, limit: i64) -> Result<Vec<Message>, StoreError> {
        self.store.recent(limit).await
    }
}
