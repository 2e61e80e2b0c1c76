//! Bus transport trait definition.
//!
//! The interface the fan-out core requires from the pub/sub transport
//! that propagates messages between instances.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use super::BusError;

/// Stream of raw payloads received on a bus channel.
pub type BusStream = BoxStream<'static, String>;

/// Publish/subscribe transport used purely as a broadcast bus.
///
/// No acknowledgment, no ordering guarantee across instances. The
/// transport makes no distinction between payloads published by this
/// instance and by others.
#[async_trait]
pub trait BusTransport: Send + Sync {
    /// Publish a payload on a channel.
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), BusError>;

    /// Subscribe to a channel. The returned stream yields payloads for
    /// as long as the subscription lives.
    async fn subscribe(&self, channel: &str) -> Result<BusStream, BusError>;
}
