//! # market-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain events
//! for the account marketplace. This crate has zero dependencies on infrastructure
//! (storage backends, code delivery providers, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Chat, ChatKind, LastMessage, Listing, ListingStatus, Message, MessageKind, PendingChallenge,
    ReviewStatus, Role, Session, Submission, User, VerificationStatus, PERSONAL_BROADCAST_NAME,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    ChallengeHandle, ChatRepository, ListingRepository, MessageRepository, RepoResult,
    SessionRepository, SubmissionRepository, UserRepository, VerificationProvider, VerifiedPhone,
};
pub use value_objects::{IdGenerator, PhoneNumber, PhoneNumberError, RecordId, RecordIdParseError};
