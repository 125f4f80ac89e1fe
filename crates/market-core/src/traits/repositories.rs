//! Repository traits (ports) - define the interface for data access
//!
//! One repository per persisted collection. The domain layer defines what it
//! needs and the store crate provides key-value backed implementations.

use async_trait::async_trait;

use crate::entities::{Chat, Listing, Message, PendingChallenge, Session, Submission, User};
use crate::error::DomainError;
use crate::value_objects::{PhoneNumber, RecordId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>>;

    async fn find_by_phone(&self, phone: &PhoneNumber) -> RepoResult<Option<User>>;

    /// Case-insensitive username lookup
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    async fn list(&self) -> RepoResult<Vec<User>>;

    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Remove a user record; returns whether it existed
    async fn delete(&self, id: RecordId) -> RepoResult<bool>;
}

// ============================================================================
// Listing Repository (public catalog)
// ============================================================================

#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Listing>>;

    /// Full catalog snapshot in insertion order
    async fn list(&self) -> RepoResult<Vec<Listing>>;

    async fn create(&self, listing: &Listing) -> RepoResult<()>;

    async fn update(&self, listing: &Listing) -> RepoResult<()>;

    async fn delete(&self, id: RecordId) -> RepoResult<bool>;
}

// ============================================================================
// Submission Repository (admin tracking)
// ============================================================================

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Submission>>;

    async fn list(&self) -> RepoResult<Vec<Submission>>;

    async fn create(&self, submission: &Submission) -> RepoResult<()>;

    async fn delete(&self, id: RecordId) -> RepoResult<bool>;
}

// ============================================================================
// Chat Repository
// ============================================================================

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Chat>>;

    /// Find the direct chat between two users (unordered pair)
    async fn find_direct(&self, user_a: RecordId, user_b: RecordId) -> RepoResult<Option<Chat>>;

    /// All chats the user participates in
    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Chat>>;

    async fn create(&self, chat: &Chat) -> RepoResult<()>;

    async fn update(&self, chat: &Chat) -> RepoResult<()>;

    async fn delete(&self, id: RecordId) -> RepoResult<bool>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Messages stamped with the chat id, oldest first
    async fn find_by_chat(&self, chat_id: RecordId) -> RepoResult<Vec<Message>>;

    /// Append a batch of records in one write
    async fn create_many(&self, messages: &[Message]) -> RepoResult<()>;

    /// Mark every message in the chat addressed to `reader` as read; returns how many changed
    async fn mark_read(&self, chat_id: RecordId, reader: RecordId) -> RepoResult<usize>;

    async fn count(&self) -> RepoResult<usize>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn current(&self) -> RepoResult<Option<Session>>;

    async fn set_current(&self, session: &Session) -> RepoResult<()>;

    async fn clear_current(&self) -> RepoResult<()>;

    async fn pending_challenge(&self) -> RepoResult<Option<PendingChallenge>>;

    async fn set_pending_challenge(&self, challenge: &PendingChallenge) -> RepoResult<()>;

    async fn clear_pending_challenge(&self) -> RepoResult<()>;
}
