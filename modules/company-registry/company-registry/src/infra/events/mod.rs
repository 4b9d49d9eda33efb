//! Event sink adapters.

mod broadcast;
mod noop;

pub use broadcast::{BroadcastEventSink, PublishedEvent};
pub use noop::NoopEventSink;
