//! Ports - traits implemented by the infrastructure layer

mod provider;
mod repositories;

pub use provider::{ChallengeHandle, VerificationProvider, VerifiedPhone};
pub use repositories::{
    ChatRepository, ListingRepository, MessageRepository, RepoResult, SessionRepository,
    SubmissionRepository, UserRepository,
};
