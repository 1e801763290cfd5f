//! Broadcast event bus.

use tokio::sync::broadcast;

use super::FlowEvent;

/// Best-effort fan-out of [`FlowEvent`]s.
///
/// Slow subscribers lag and lose the oldest events; publishing never blocks
/// and never fails.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<FlowEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: FlowEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for flow event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FlowEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
