//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{PhoneNumberError, RecordId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(RecordId),

    #[error("Listing not found: {0}")]
    ListingNotFound(RecordId),

    #[error("Chat not found: {0}")]
    ChatNotFound(RecordId),

    #[error("No pending verification code")]
    NoPendingChallenge,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    InvalidPhone(#[from] PhoneNumberError),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Username is required for new users")]
    UsernameRequired,

    #[error("Message content is empty")]
    EmptyMessage,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Admin role required")]
    AdminRequired,

    #[error("Not a participant of chat {0}")]
    NotParticipant(RecordId),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Listing already reviewed")]
    AlreadyReviewed,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Verification code has expired")]
    ChallengeExpired,

    #[error("Verification code was issued for a different phone number")]
    PhoneMismatch,

    #[error("Cannot start a chat with yourself")]
    SelfChat,

    #[error("Listing is not available")]
    ListingUnavailable,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Verification provider error: {0}")]
    ProviderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for display and logging
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ListingNotFound(_) => "UNKNOWN_LISTING",
            Self::ChatNotFound(_) => "UNKNOWN_CHAT",
            Self::NoPendingChallenge => "NO_PENDING_CHALLENGE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPhone(_) => "INVALID_PHONE",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::UsernameRequired => "USERNAME_REQUIRED",
            Self::EmptyMessage => "EMPTY_MESSAGE",

            // Authorization
            Self::NotSignedIn => "NOT_SIGNED_IN",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotParticipant(_) => "NOT_PARTICIPANT",

            // Conflict
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::AlreadyReviewed => "ALREADY_REVIEWED",

            // Business Rules
            Self::InvalidCode => "INVALID_CODE",
            Self::ChallengeExpired => "CHALLENGE_EXPIRED",
            Self::PhoneMismatch => "PHONE_MISMATCH",
            Self::SelfChat => "SELF_CHAT",
            Self::ListingUnavailable => "LISTING_UNAVAILABLE",

            // Infrastructure
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
            Self::ProviderError(_) => "PROVIDER_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ListingNotFound(_)
                | Self::ChatNotFound(_)
                | Self::NoPendingChallenge
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidPhone(_)
                | Self::InvalidUsername(_)
                | Self::UsernameRequired
                | Self::EmptyMessage
                | Self::SelfChat
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotSignedIn | Self::AdminRequired | Self::NotParticipant(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameTaken | Self::AlreadyReviewed | Self::ListingUnavailable
        )
    }

    /// Check if this error rejects a verification attempt
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCode | Self::ChallengeExpired | Self::PhoneMismatch | Self::NoPendingChallenge
        )
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::UserNotFound(RecordId::new(1)).code(), "UNKNOWN_USER");
        assert_eq!(DomainError::ChallengeExpired.code(), "CHALLENGE_EXPIRED");
        assert_eq!(
            DomainError::InvalidPhone(PhoneNumberError::Empty).code(),
            "INVALID_PHONE"
        );
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::ListingNotFound(RecordId::new(1)).is_not_found());
        assert!(DomainError::AdminRequired.is_authorization());
        assert!(DomainError::UsernameRequired.is_validation());
        assert!(DomainError::UsernameTaken.is_conflict());
        assert!(DomainError::InvalidCode.is_verification_failure());
        assert!(!DomainError::InvalidCode.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::ChatNotFound(RecordId::new(123));
        assert_eq!(err.to_string(), "Chat not found: 123");

        let err = DomainError::InvalidPhone(PhoneNumberError::Empty);
        assert_eq!(err.to_string(), "Phone number is required");
    }
}
