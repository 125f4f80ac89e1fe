//! Chat service
//!
//! Direct chats between two users and broadcast lists. A broadcast send is
//! stored as one message per recipient; the copies share a fan-out id.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use market_core::entities::{Chat, LastMessage, Message, User};
use market_core::events::{ChatCreatedEvent, MessagesSentEvent};
use market_core::{DomainError, DomainEvent, RecordId};

use crate::dto::{ChatSummary, CreateBroadcastRequest, PublicUserResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const UNKNOWN_USER: &str = "Unknown user";

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the direct chat between two users, creating it on first use
    #[instrument(skip(self))]
    pub async fn find_or_create_direct_chat(
        &self,
        user_a: RecordId,
        user_b: RecordId,
    ) -> ServiceResult<Chat> {
        if user_a == user_b {
            return Err(DomainError::SelfChat.into());
        }
        self.require_user(user_a).await?;
        self.require_user(user_b).await?;

        if let Some(chat) = self.ctx.chat_repo().find_direct(user_a, user_b).await? {
            return Ok(chat);
        }

        let chat = Chat::new_direct(self.ctx.generate_id(), user_a, user_b);
        self.ctx.chat_repo().create(&chat).await?;

        self.ctx.events().publish(DomainEvent::ChatCreated(ChatCreatedEvent::new(
            chat.id,
            chat.participants.clone(),
        )));
        info!(chat_id = %chat.id, "Direct chat created");

        Ok(chat)
    }

    /// Create a broadcast list owned by `creator`
    #[instrument(skip(self, request), fields(recipients = request.recipients.len()))]
    pub async fn create_broadcast(
        &self,
        creator: RecordId,
        request: CreateBroadcastRequest,
    ) -> ServiceResult<Chat> {
        request.validate()?;
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Broadcast name is required"));
        }

        let mut recipients: Vec<RecordId> = Vec::with_capacity(request.recipients.len());
        for id in request.recipients {
            if id != creator && !recipients.contains(&id) {
                recipients.push(id);
            }
        }
        if recipients.is_empty() {
            return Err(ServiceError::validation("Select at least one recipient"));
        }

        self.require_user(creator).await?;
        for id in &recipients {
            self.require_user(*id).await?;
        }

        let chat = Chat::new_broadcast(self.ctx.generate_id(), name.to_string(), creator, &recipients);
        self.ctx.chat_repo().create(&chat).await?;

        self.ctx.events().publish(DomainEvent::ChatCreated(ChatCreatedEvent::new(
            chat.id,
            chat.participants.clone(),
        )));
        info!(chat_id = %chat.id, recipients = recipients.len(), "Broadcast created");

        Ok(chat)
    }

    /// Send a message; returns every stored record
    ///
    /// Direct chats store one record. Broadcasts store one record per other
    /// participant, in participant order; a broadcast without other
    /// participants stores a single note to the sender.
    #[instrument(skip(self, request), fields(kind = ?request.kind))]
    pub async fn send_message(
        &self,
        chat_id: RecordId,
        sender: RecordId,
        request: SendMessageRequest,
    ) -> ServiceResult<Vec<Message>> {
        let mut chat = self.require_chat(chat_id).await?;
        if !chat.has_participant(sender) {
            warn!(chat_id = %chat_id, sender = %sender, "Sender is not a participant");
            return Err(DomainError::NotParticipant(chat_id).into());
        }

        let content = request.content.trim();
        if content.is_empty() {
            return Err(DomainError::EmptyMessage.into());
        }

        let mut receivers = chat.recipients_of(sender);
        if receivers.is_empty() {
            receivers.push(sender);
        }

        let now = Utc::now();
        let fanout_id = chat.is_broadcast().then(|| self.ctx.generate_id());
        let messages: Vec<Message> = receivers
            .iter()
            .map(|receiver| {
                let mut message = Message::new(
                    self.ctx.generate_id(),
                    chat.id,
                    sender,
                    *receiver,
                    content.to_string(),
                    request.kind,
                )
                .at(now);
                if let Some(fanout_id) = fanout_id {
                    message = message.with_fanout(fanout_id);
                }
                message.read = message.is_self_addressed();
                message
            })
            .collect();

        let Some(first) = messages.first() else {
            return Err(ServiceError::internal("send produced no messages"));
        };
        let summary = LastMessage::summarize(fanout_id.unwrap_or(first.id), first);

        self.ctx.message_repo().create_many(&messages).await?;
        chat.record_last_message(summary);
        self.ctx.chat_repo().update(&chat).await?;

        self.ctx.events().publish(DomainEvent::MessagesSent(MessagesSentEvent::new(
            chat.id, sender, receivers,
        )));
        info!(chat_id = %chat.id, records = messages.len(), "Message sent");

        Ok(messages)
    }

    /// All records of a chat, oldest first
    #[instrument(skip(self))]
    pub async fn messages_for_chat(&self, chat_id: RecordId) -> ServiceResult<Vec<Message>> {
        Ok(self.ctx.message_repo().find_by_chat(chat_id).await?)
    }

    /// A chat as one participant sees it
    ///
    /// Only records the viewer sent or received are included, and the
    /// viewer's own broadcast copies collapse to one entry per send.
    #[instrument(skip(self))]
    pub async fn conversation(
        &self,
        chat_id: RecordId,
        viewer: RecordId,
    ) -> ServiceResult<Vec<Message>> {
        let chat = self.require_chat(chat_id).await?;
        if !chat.has_participant(viewer) {
            return Err(DomainError::NotParticipant(chat_id).into());
        }

        let mut seen_fanouts = HashSet::new();
        Ok(self
            .messages_for_chat(chat_id)
            .await?
            .into_iter()
            .filter(|m| m.involves(viewer))
            .filter(|m| match m.fanout_id {
                Some(fanout_id) if m.sender_id == viewer => seen_fanouts.insert(fanout_id),
                _ => true,
            })
            .collect())
    }

    /// Chats the user takes part in, most recently updated first
    #[instrument(skip(self))]
    pub async fn chats_for_user(&self, user_id: RecordId) -> ServiceResult<Vec<ChatSummary>> {
        let mut chats = self.ctx.chat_repo().find_by_user(user_id).await?;
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let usernames: HashMap<RecordId, String> = self
            .ctx
            .user_repo()
            .list()
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let mut summaries = Vec::with_capacity(chats.len());
        for chat in chats {
            let title = match (&chat.name, chat.counterpart(user_id)) {
                (Some(name), _) => name.clone(),
                (None, Some(other)) => usernames
                    .get(&other)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_USER.to_string()),
                (None, None) => UNKNOWN_USER.to_string(),
            };
            let unread = self.unread_count(chat.id, user_id).await?;
            summaries.push(ChatSummary { chat, title, unread });
        }

        debug!(count = summaries.len(), "Loaded chat list");
        Ok(summaries)
    }

    /// Users whose username contains `query`, ignoring case
    #[instrument(skip(self))]
    pub async fn search_users(
        &self,
        viewer: RecordId,
        query: &str,
    ) -> ServiceResult<Vec<PublicUserResponse>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .ctx
            .user_repo()
            .list()
            .await?
            .iter()
            .filter(|u| u.id != viewer && u.username.to_lowercase().contains(&needle))
            .map(PublicUserResponse::from)
            .collect())
    }

    /// Everyone the viewer could add to a broadcast
    #[instrument(skip(self))]
    pub async fn contacts(&self, viewer: RecordId) -> ServiceResult<Vec<PublicUserResponse>> {
        Ok(self
            .ctx
            .user_repo()
            .list()
            .await?
            .iter()
            .filter(|u| u.id != viewer)
            .map(PublicUserResponse::from)
            .collect())
    }

    /// Mark everything the reader received in a chat as read
    #[instrument(skip(self))]
    pub async fn mark_read(&self, chat_id: RecordId, reader: RecordId) -> ServiceResult<usize> {
        Ok(self.ctx.message_repo().mark_read(chat_id, reader).await?)
    }

    /// Number of unread records addressed to the reader
    #[instrument(skip(self))]
    pub async fn unread_count(&self, chat_id: RecordId, reader: RecordId) -> ServiceResult<usize> {
        Ok(self
            .messages_for_chat(chat_id)
            .await?
            .iter()
            .filter(|m| m.receiver_id == reader && !m.read)
            .count())
    }

    // === Helpers ===

    async fn require_user(&self, id: RecordId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(id).into())
    }

    async fn require_chat(&self, id: RecordId) -> ServiceResult<Chat> {
        self.ctx
            .chat_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ChatNotFound(id).into())
    }
}

/// The chat currently open in the chat view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatSelection {
    active: Option<RecordId>,
}

impl ChatSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, chat_id: RecordId) {
        self.active = Some(chat_id);
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<RecordId> {
        self.active
    }

    pub fn is_active(&self, chat_id: RecordId) -> bool {
        self.active == Some(chat_id)
    }
}
