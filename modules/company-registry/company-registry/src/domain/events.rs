use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::Instrument;
use uuid::Uuid;

use super::ports::EventSink;

/// Kind of mutation being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    Signup,
}

/// Notification about a completed mutation, keyed by the entity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationEvent {
    pub kind: MutationKind,
    pub key: String,
}

#[derive(Serialize)]
struct Payload {
    event: MutationKind,
}

impl MutationEvent {
    #[must_use]
    pub fn new(kind: MutationKind, id: Uuid) -> Self {
        Self {
            kind,
            key: id.to_string(),
        }
    }

    /// Wire form: `{"event":"<KIND>"}`.
    ///
    /// # Errors
    /// Only if JSON serialization fails.
    pub fn payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&Payload { event: self.kind })
    }
}

/// Fire-and-forget delivery of mutation events.
///
/// Every notification runs in its own tracked task. Delivery outcome is only
/// logged; callers never observe it.
#[derive(Clone)]
pub struct EventDispatcher {
    sink: Arc<dyn EventSink>,
    topic: Arc<str>,
    tracker: TaskTracker,
    cancel: CancellationToken,
}

impl EventDispatcher {
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>, topic: impl Into<Arc<str>>) -> Self {
        Self {
            sink,
            topic: topic.into(),
            tracker: TaskTracker::new(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Schedule delivery of `event` and return immediately.
    pub fn dispatch(&self, event: MutationEvent) {
        if self.cancel.is_cancelled() {
            tracing::debug!(kind = ?event.kind, key = %event.key, "dispatcher stopped; event dropped");
            return;
        }

        let payload = match event.payload() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, kind = ?event.kind, "failed to encode event payload");
                return;
            }
        };

        let sink = Arc::clone(&self.sink);
        let topic = Arc::clone(&self.topic);
        let cancel = self.cancel.clone();
        let span = tracing::debug_span!("event_delivery", kind = ?event.kind, key = %event.key);

        self.tracker.spawn(
            async move {
                tokio::select! {
                    () = cancel.cancelled() => {
                        tracing::debug!("event delivery cancelled");
                    }
                    res = sink.publish(&topic, &event.key, payload) => match res {
                        Ok(()) => tracing::debug!(topic = %topic, "event delivered"),
                        Err(e) => tracing::warn!(topic = %topic, error = %e, "event delivery failed"),
                    }
                }
            }
            .instrument(span),
        );
    }

    /// Number of deliveries still in flight.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait for in-flight deliveries to finish. New events are still accepted.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Cancel pending deliveries, wait for their tasks to exit, and stop
    /// accepting new events.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::ports::DeliveryError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<(String, String, Vec<u8>)>>,
    }

    #[async_trait]
    impl EventSink for RecordingSink {
        async fn publish(&self, topic: &str, key: &str, payload: Vec<u8>) -> Result<(), DeliveryError> {
            self.seen
                .lock()
                .push((topic.to_owned(), key.to_owned(), payload));
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl EventSink for FailingSink {
        async fn publish(&self, _: &str, _: &str, _: Vec<u8>) -> Result<(), DeliveryError> {
            Err(DeliveryError::Closed)
        }
    }

    #[derive(Default)]
    struct StuckSink {
        started: AtomicUsize,
    }

    #[async_trait]
    impl EventSink for StuckSink {
        async fn publish(&self, _: &str, _: &str, _: Vec<u8>) -> Result<(), DeliveryError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[test]
    fn payload_uses_uppercase_kind() {
        let ev = MutationEvent::new(MutationKind::Signup, Uuid::nil());
        assert_eq!(ev.payload().unwrap(), br#"{"event":"SIGNUP"}"#.to_vec());
        assert_eq!(ev.key, Uuid::nil().to_string());
    }

    #[tokio::test]
    async fn delivers_topic_key_and_payload() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = EventDispatcher::new(sink.clone(), "registry.test");
        let id = Uuid::new_v4();

        dispatcher.dispatch(MutationEvent::new(MutationKind::Create, id));
        dispatcher.drain().await;

        let seen = sink.seen.lock().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "registry.test");
        assert_eq!(seen[0].1, id.to_string());
        assert_eq!(seen[0].2, br#"{"event":"CREATE"}"#.to_vec());
    }

    #[tokio::test]
    #[traced_test]
    async fn delivery_failure_is_logged_not_propagated() {
        let dispatcher = EventDispatcher::new(Arc::new(FailingSink), "registry.test");

        dispatcher.dispatch(MutationEvent::new(MutationKind::Delete, Uuid::new_v4()));
        dispatcher.drain().await;

        assert!(logs_contain("event delivery failed"));
    }

    #[tokio::test]
    async fn shutdown_cancels_stuck_deliveries() {
        let sink = Arc::new(StuckSink::default());
        let dispatcher = EventDispatcher::new(sink.clone(), "registry.test");

        dispatcher.dispatch(MutationEvent::new(MutationKind::Update, Uuid::new_v4()));
        while sink.started.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        dispatcher.shutdown().await;

        assert_eq!(dispatcher.pending(), 0);
    }

    #[tokio::test]
    async fn events_after_shutdown_are_dropped() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = EventDispatcher::new(sink.clone(), "registry.test");
        dispatcher.shutdown().await;

        dispatcher.dispatch(MutationEvent::new(MutationKind::Create, Uuid::new_v4()));
        dispatcher.drain().await;

        assert!(sink.seen.lock().is_empty());
    }
}
