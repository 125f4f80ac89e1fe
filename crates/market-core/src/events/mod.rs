//! Domain events

mod domain_event;

pub use domain_event::{
    ChatCreatedEvent, CollectionChangedEvent, DomainEvent, ListingEvent, MessagesSentEvent,
    SessionEvent, UserRegisteredEvent,
};
