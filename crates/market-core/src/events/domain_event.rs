//! Domain events - events emitted when marketplace state changes
//!
//! These events are used for:
//! - Refreshing views that subscribed to a collection
//! - Notifying chat participants of new messages
//! - Audit logging of admin review decisions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

/// All possible domain events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // Store
    CollectionChanged(CollectionChangedEvent),

    // Auth
    UserRegistered(UserRegisteredEvent),
    SessionStarted(SessionEvent),
    SessionEnded(SessionEvent),

    // Catalog
    ListingSubmitted(ListingEvent),
    ListingApproved(ListingEvent),
    ListingRejected(ListingEvent),
    ListingDeleted(ListingEvent),
    ListingSold(ListingEvent),

    // Chat
    ChatCreated(ChatCreatedEvent),
    MessagesSent(MessagesSentEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CollectionChanged(_) => "COLLECTION_CHANGED",
            Self::UserRegistered(_) => "USER_REGISTERED",
            Self::SessionStarted(_) => "SESSION_STARTED",
            Self::SessionEnded(_) => "SESSION_ENDED",
            Self::ListingSubmitted(_) => "LISTING_SUBMITTED",
            Self::ListingApproved(_) => "LISTING_APPROVED",
            Self::ListingRejected(_) => "LISTING_REJECTED",
            Self::ListingDeleted(_) => "LISTING_DELETED",
            Self::ListingSold(_) => "LISTING_SOLD",
            Self::ChatCreated(_) => "CHAT_CREATED",
            Self::MessagesSent(_) => "MESSAGES_SENT",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::CollectionChanged(e) => e.timestamp,
            Self::UserRegistered(e) => e.timestamp,
            Self::SessionStarted(e) | Self::SessionEnded(e) => e.timestamp,
            Self::ListingSubmitted(e)
            | Self::ListingApproved(e)
            | Self::ListingRejected(e)
            | Self::ListingDeleted(e)
            | Self::ListingSold(e) => e.timestamp,
            Self::ChatCreated(e) => e.timestamp,
            Self::MessagesSent(e) => e.timestamp,
        }
    }

    /// Name of the changed collection, for store events
    pub fn collection(&self) -> Option<&str> {
        match self {
            Self::CollectionChanged(e) => Some(&e.collection),
            _ => None,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionChangedEvent {
    pub collection: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegisteredEvent {
    pub user_id: RecordId,
    pub personal_broadcast_id: RecordId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub user_id: Option<RecordId>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEvent {
    pub listing_id: RecordId,
    /// Acting user (seller on submit, admin on review)
    pub actor_id: RecordId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCreatedEvent {
    pub chat_id: RecordId,
    pub participants: Vec<RecordId>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesSentEvent {
    pub chat_id: RecordId,
    pub sender_id: RecordId,
    pub receiver_ids: Vec<RecordId>,
    pub timestamp: DateTime<Utc>,
}

impl CollectionChangedEvent {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            timestamp: Utc::now(),
        }
    }
}

impl UserRegisteredEvent {
    pub fn new(user_id: RecordId, personal_broadcast_id: RecordId) -> Self {
        Self {
            user_id,
            personal_broadcast_id,
            timestamp: Utc::now(),
        }
    }
}

impl SessionEvent {
    pub fn new(user_id: Option<RecordId>) -> Self {
        Self {
            user_id,
            timestamp: Utc::now(),
        }
    }
}

impl ListingEvent {
    pub fn new(listing_id: RecordId, actor_id: RecordId) -> Self {
        Self {
            listing_id,
            actor_id,
            timestamp: Utc::now(),
        }
    }
}

impl ChatCreatedEvent {
    pub fn new(chat_id: RecordId, participants: Vec<RecordId>) -> Self {
        Self {
            chat_id,
            participants,
            timestamp: Utc::now(),
        }
    }
}

impl MessagesSentEvent {
    pub fn new(chat_id: RecordId, sender_id: RecordId, receiver_ids: Vec<RecordId>) -> Self {
        Self {
            chat_id,
            sender_id,
            receiver_ids,
            timestamp: Utc::now(),
        }
    }
}
