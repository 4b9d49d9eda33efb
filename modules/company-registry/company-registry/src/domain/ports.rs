use async_trait::async_trait;

/// Failure to hand a notification to the external bus.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("event sink is closed")]
    Closed,

    #[error("no subscribers for topic '{topic}'")]
    NoSubscribers { topic: String },
}

/// Outbound notification bus.
///
/// Only the service layer publishes, and never on its correctness path.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, topic: &str, key: &str, payload: Vec<u8>) -> Result<(), DeliveryError>;
}
