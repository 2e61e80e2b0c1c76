//! In-process bus transport over tokio broadcast channels.
//!
//! Several `FanoutBus` instances sharing one `InMemoryBus` behave like
//! several server instances sharing one networked bus, which is how
//! the relay tests simulate multi-instance deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, broadcast};

use crate::domain::{BusError, BusStream, BusTransport};

/// Per-channel buffer; a subscriber lagging past this skips payloads.
const CHANNEL_BUFFER: usize = 256;

pub struct InMemoryBus {
    channels: Mutex<HashMap<String, broadcast::Sender<String>>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }

    async fn sender_for(&self, channel: &str) -> broadcast::Sender<String> {
        let mut channels = self.channels.lock().await;
        channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_BUFFER).0)
            .clone()
    }
}

impl Default for InMemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BusTransport for InMemoryBus {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), BusError> {
        // A channel with no subscribers is not an error for a
        // fire-and-forget publish.
        let _ = self.sender_for(channel).await.send(payload.to_string());
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<BusStream, BusError> {
        let rx = self.sender_for(channel).await.subscribe();
        let stream = futures_util::stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(payload) => return Some((payload, rx)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("in-memory bus subscriber lagged, skipped {}", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_subscriber_receives_published_payload() {
        // given:
        let bus = InMemoryBus::new();
        let mut stream = bus.subscribe("chan").await.unwrap();

        // when:
        bus.publish("chan", "hello").await.unwrap();

        // then:
        assert_eq!(stream.next().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_all_subscribers_receive_each_payload() {
        // given:
        let bus = InMemoryBus::new();
        let mut stream1 = bus.subscribe("chan").await.unwrap();
        let mut stream2 = bus.subscribe("chan").await.unwrap();

        // when:
        bus.publish("chan", "fanout").await.unwrap();

        // then:
        assert_eq!(stream1.next().await, Some("fanout".to_string()));
        assert_eq!(stream2.next().await, Some("fanout".to_string()));
    }

    #[tokio::test]
    async fn test_channels_are_isolated() {
        // given:
        let bus = InMemoryBus::new();
        let mut other = bus.subscribe("other").await.unwrap();
        let mut chan = bus.subscribe("chan").await.unwrap();

        // when:
        bus.publish("chan", "targeted").await.unwrap();
        bus.publish("other", "elsewhere").await.unwrap();

        // then:
        assert_eq!(chan.next().await, Some("targeted".to_string()));
        assert_eq!(other.next().await, Some("elsewhere".to_string()));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_succeeds() {
        // given:
        let bus = InMemoryBus::new();

        // when:
        let result = bus.publish("empty", "dropped").await;

        // then:
        assert!(result.is_ok());
    }
}
