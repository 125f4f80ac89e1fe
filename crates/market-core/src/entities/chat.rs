//! Chat entity - a direct conversation or a broadcast list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::LastMessage;
use crate::value_objects::RecordId;

/// Name of the broadcast created for every new user
pub const PERSONAL_BROADCAST_NAME: &str = "My Status";

/// Chat kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    /// Conversation between exactly two users
    #[default]
    Direct,
    /// One-to-many list; sends fan out to every other participant
    Broadcast,
}

/// Chat entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: RecordId,
    /// Unique participant ids; for broadcasts the creator comes first
    pub participants: Vec<RecordId>,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<RecordId>,
    #[serde(default)]
    pub is_personal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<LastMessage>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    /// Create a direct chat between two users
    pub fn new_direct(id: RecordId, user_a: RecordId, user_b: RecordId) -> Self {
        Self {
            id,
            participants: vec![user_a, user_b],
            kind: ChatKind::Direct,
            name: None,
            created_by: None,
            is_personal: false,
            last_message: None,
            updated_at: Utc::now(),
        }
    }

    /// Create a broadcast owned by `creator`
    ///
    /// Recipients are deduplicated in order and the creator is never listed twice.
    pub fn new_broadcast(
        id: RecordId,
        name: String,
        creator: RecordId,
        recipients: &[RecordId],
    ) -> Self {
        let mut participants = vec![creator];
        for recipient in recipients {
            if !participants.contains(recipient) {
                participants.push(*recipient);
            }
        }

        Self {
            id,
            participants,
            kind: ChatKind::Broadcast,
            name: Some(name),
            created_by: Some(creator),
            is_personal: false,
            last_message: None,
            updated_at: Utc::now(),
        }
    }

    /// Create the personal status broadcast of a new user
    pub fn new_personal(id: RecordId, owner: RecordId) -> Self {
        let mut chat = Self::new_broadcast(id, PERSONAL_BROADCAST_NAME.to_string(), owner, &[]);
        chat.is_personal = true;
        chat
    }

    #[inline]
    pub fn is_broadcast(&self) -> bool {
        self.kind == ChatKind::Broadcast
    }

    pub fn has_participant(&self, user_id: RecordId) -> bool {
        self.participants.contains(&user_id)
    }

    /// Check if this is the direct chat between the two users, in either order
    pub fn is_direct_between(&self, user_a: RecordId, user_b: RecordId) -> bool {
        self.kind == ChatKind::Direct
            && self.participants.len() == 2
            && self.has_participant(user_a)
            && self.has_participant(user_b)
    }

    /// The other side of a direct chat
    pub fn counterpart(&self, user_id: RecordId) -> Option<RecordId> {
        if self.kind != ChatKind::Direct {
            return None;
        }
        self.participants.iter().copied().find(|id| *id != user_id)
    }

    /// Receivers of a send by `sender`, in participant order
    pub fn recipients_of(&self, sender: RecordId) -> Vec<RecordId> {
        self.participants
            .iter()
            .copied()
            .filter(|id| *id != sender)
            .collect()
    }

    pub fn record_last_message(&mut self, last: LastMessage) {
        self.updated_at = last.timestamp;
        self.last_message = Some(last);
    }
}
