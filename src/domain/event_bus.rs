//! Broadcast channel for inventory change events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every committed
//! mutation publishes an [`InventoryEvent`]; WebSocket connections subscribe
//! and tell their clients what to refetch.

use tokio::sync::broadcast;

use super::InventoryEvent;

/// Broadcast bus for [`InventoryEvent`]s.
///
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers. A lagging consumer should refetch everything.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<InventoryEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event.
    /// If there are no active receivers, the event is silently dropped.
    pub fn publish(&self, event: InventoryEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<InventoryEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{ProductId, ProductStatus};
    use chrono::Utc;

    fn make_event(product_id: ProductId) -> InventoryEvent {
        InventoryEvent::ProductCreated {
            product_id,
            status: ProductStatus::Available,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(make_event(ProductId::new())), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives_the_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let id = ProductId::new();
        assert_eq!(bus.publish(make_event(id)), 2);

        let e1 = tokio_test::assert_ok!(rx1.recv().await);
        let e2 = tokio_test::assert_ok!(rx2.recv().await);
        assert_eq!(e1.product_id(), id);
        assert_eq!(e2.product_id(), id);
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = EventBus::new(16);
        let rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        drop(rx);
        assert_eq!(bus.receiver_count(), 0);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let bus = EventBus::new(0);
        let _rx = bus.subscribe();
        assert_eq!(bus.publish(make_event(ProductId::new())), 1);
    }
}
