use async_trait::async_trait;

use crate::domain::ports::{DeliveryError, EventSink};

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

#[async_trait]
impl EventSink for NoopEventSink {
    async fn publish(&self, topic: &str, key: &str, _payload: Vec<u8>) -> Result<(), DeliveryError> {
        tracing::trace!(topic, key, "event discarded by noop sink");
        Ok(())
    }
}
