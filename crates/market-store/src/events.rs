//! In-process change notifications
//!
//! Repositories publish a [`DomainEvent::CollectionChanged`] after every write;
//! services publish their own domain events. Views subscribe instead of
//! re-reading the store on a timer.

use market_core::DomainEvent;
use tokio::sync::broadcast;

/// Default number of buffered events per subscriber
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Broadcast bus for domain events
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event; returns the number of subscribers that received it
    pub fn publish(&self, event: DomainEvent) -> usize {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::debug!(event_type, receivers, "Published event");
                receivers
            }
            // No subscribers is not an error
            Err(_) => 0,
        }
    }

    /// Announce a write to a storage key
    pub fn collection_changed(&self, collection: &str) -> usize {
        self.publish(DomainEvent::CollectionChanged(
            market_core::events::CollectionChangedEvent::new(collection),
        ))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
