//! UseCase: message ingress pipeline.
//!
//! One pipeline for both entry points: the one-shot HTTP submission
//! and each inbound frame of a WebSocket connection. The two differ
//! only in how the raw input is obtained and how the result is
//! communicated back.

use std::sync::Arc;

use crate::domain::{Message, MessageStore, Submission};
use crate::infrastructure::{ConnectionRegistry, bus::FanoutBus};

use super::error::IngestError;

pub struct IngestMessageUseCase {
    store: Arc<dyn MessageStore>,
    bus: Arc<FanoutBus>,
    registry: Arc<ConnectionRegistry>,
}

impl IngestMessageUseCase {
    pub fn new(
        store: Arc<dyn MessageStore>,
        bus: Arc<FanoutBus>,
        registry: Arc<ConnectionRegistry>,
    ) -> Self {
        Self {
            store,
            bus,
            registry,
        }
    }

    /// Run the full ingress pipeline for one raw submission: validate,
    /// persist, publish to the bus, deliver to local connections.
    ///
    /// On validation failure nothing is persisted, published, or
    /// broadcast. Store failures propagate to the caller; bus failures
    /// never do.
    pub async fn execute(&self, raw_input: &str) -> Result<Message, IngestError> {
        let (author, text) = Submission::parse(raw_input)?.validate()?;

        let message = self.store.append(&author, &text).await?;

        self.bus.publish(&message).await;
        self.registry.broadcast(&message).await;

        Ok(message)
    }
}
