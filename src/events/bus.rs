//! # Event bus for broadcasting runtime events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking event publishing from multiple sources (timers, the guarded
//! runner, cycle tasks).
//!
//! ```text
//! Publishers (many):                  Subscriber (one):
//!   CycleTimer A ──┐
//!   CycleTimer B ──┼──────► Bus ───────► bus listener ────► SubscriberSet
//!   run_guarded  ──┤  (broadcast chan)   (entry point)
//!   cycle tasks  ──┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or awaits.
//! - **Bounded capacity**: a single ring buffer stores recent events for all
//!   receivers; slow receivers observe `RecvError::Lagged(n)` and skip the
//!   `n` oldest items.
//! - **No persistence**: events are dropped if no receiver is subscribed at
//!   send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for runtime events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); every component
/// that publishes gets its own clone.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity.
    ///
    /// Capacity is shared across all receivers and clamped to a minimum of 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active subscribers.
    ///
    /// If there are no receivers the event is dropped; the call still returns
    /// immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that observes subsequent events.
    ///
    /// Each call creates an independent receiver; it only sees events sent
    /// after it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        bus.publish(Event::now(EventKind::CycleStarting).with_task("t"));
        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::CycleStarting);
        assert_eq!(ev.task.as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn test_publish_without_receivers_is_dropped() {
        let bus = Bus::new(16);
        // No receiver subscribed: must not panic or block.
        bus.publish(Event::now(EventKind::ShutdownRequested));
        let mut rx = bus.subscribe();
        bus.publish(Event::now(EventKind::AllStoppedWithin));
        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::AllStoppedWithin);
    }
}
