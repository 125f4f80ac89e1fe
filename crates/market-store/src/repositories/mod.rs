//! Repository implementations
//!
//! Key-value implementations of the repository traits defined in market-core.
//! Each repository owns the typed collection for one storage key.

mod chat;
mod error;
mod listing;
mod message;
mod session;
mod submission;
mod user;

pub use chat::KvChatRepository;
pub use listing::KvListingRepository;
pub use message::KvMessageRepository;
pub use session::KvSessionRepository;
pub use submission::KvSubmissionRepository;
pub use user::KvUserRepository;
