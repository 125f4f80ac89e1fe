//! Message entity - one delivered chat message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

/// Preview text shown for image messages
pub const IMAGE_PREVIEW: &str = "Sent an image";

/// Message payload kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    /// Content holds an image reference (URL or data URI)
    Image,
}

/// Message entity
///
/// Broadcast sends are stored as one record per recipient; the records of a
/// single send share a `fanout_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: RecordId,
    pub chat_id: RecordId,
    pub sender_id: RecordId,
    pub receiver_id: RecordId,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fanout_id: Option<RecordId>,
}

impl Message {
    pub fn new(
        id: RecordId,
        chat_id: RecordId,
        sender_id: RecordId,
        receiver_id: RecordId,
        content: String,
        kind: MessageKind,
    ) -> Self {
        Self {
            id,
            chat_id,
            sender_id,
            receiver_id,
            content,
            kind,
            timestamp: Utc::now(),
            read: false,
            fanout_id: None,
        }
    }

    #[must_use]
    pub fn with_fanout(mut self, fanout_id: RecordId) -> Self {
        self.fanout_id = Some(fanout_id);
        self
    }

    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Check if the user sent or received this message
    pub fn involves(&self, user_id: RecordId) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// A note the sender addressed to themself
    pub fn is_self_addressed(&self) -> bool {
        self.sender_id == self.receiver_id
    }

    /// Truncated preview of the content, cut on a char boundary
    pub fn preview(&self, max_len: usize) -> &str {
        if self.kind == MessageKind::Image {
            return IMAGE_PREVIEW;
        }
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}

/// Summary of the latest send in a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    pub message_id: RecordId,
    pub sender_id: RecordId,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    pub timestamp: DateTime<Utc>,
}

impl LastMessage {
    /// Maximum preview length kept on the chat
    pub const PREVIEW_LEN: usize = 120;

    /// Summarize a send; `id` is the fan-out id for broadcasts, the message id otherwise
    pub fn summarize(id: RecordId, message: &Message) -> Self {
        Self {
            message_id: id,
            sender_id: message.sender_id,
            content: message.preview(Self::PREVIEW_LEN).to_string(),
            kind: message.kind,
            timestamp: message.timestamp,
        }
    }
}
