use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::ports::{DeliveryError, EventSink};

/// Event as seen by an in-process subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
}

/// In-process fan-out bus.
///
/// Slow subscribers lag and lose the oldest events; publishing never waits.
#[derive(Debug)]
pub struct BroadcastEventSink {
    tx: broadcast::Sender<PublishedEvent>,
}

impl BroadcastEventSink {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventSink for BroadcastEventSink {
    async fn publish(&self, topic: &str, key: &str, payload: Vec<u8>) -> Result<(), DeliveryError> {
        let event = PublishedEvent {
            topic: topic.to_owned(),
            key: key.to_owned(),
            payload,
        };
        self.tx
            .send(event)
            .map(|_| ())
            .map_err(|_| DeliveryError::NoSubscribers {
                topic: topic.to_owned(),
            })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let sink = BroadcastEventSink::new(8);
        let mut rx = sink.subscribe();

        sink.publish("t", "k", b"{}".to_vec()).await.unwrap();

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.topic, "t");
        assert_eq!(ev.key, "k");
        assert_eq!(ev.payload, b"{}".to_vec());
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_a_delivery_error() {
        let sink = BroadcastEventSink::new(8);
        let err = sink.publish("t", "k", Vec::new()).await.unwrap_err();
        assert!(matches!(err, DeliveryError::NoSubscribers { .. }));
    }
}
