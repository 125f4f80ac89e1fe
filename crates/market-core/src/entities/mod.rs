//! Domain entities - core business objects

mod chat;
mod listing;
mod message;
mod session;
mod user;

pub use chat::{Chat, ChatKind, PERSONAL_BROADCAST_NAME};
pub use listing::{
    Listing, ListingStatus, ReviewStatus, Submission, VerificationStatus, DEFAULT_PLATFORM,
    MAX_LISTING_IMAGES,
};
pub use message::{LastMessage, Message, MessageKind, IMAGE_PREVIEW};
pub use session::{PendingChallenge, Session};
pub use user::{Role, User};
