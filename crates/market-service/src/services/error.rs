//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use market_common::AppError;
use market_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Validation error
    Validation(String),

    /// The verification provider could not issue a code
    CodeDelivery(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::CodeDelivery(msg) => write!(f, "Code delivery failed: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Borrow the wrapped domain error, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    /// Get the HTTP-style status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => AppError::domain_status_code(e),
            Self::Validation(_) => 400,
            Self::CodeDelivery(_) => 502,
            Self::Internal(_) => 500,
        }
    }

    /// Get the stable error code
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::CodeDelivery(_) => "CODE_DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Short message suitable for showing inline next to a form
    pub fn user_message(&self) -> String {
        if let Some(e) = self.as_domain() {
            return match e {
                e if e.is_verification_failure() => "Invalid or expired OTP".to_string(),
                DomainError::ProviderError(_) => "Failed to send OTP".to_string(),
                DomainError::InvalidPhone(_)
                | DomainError::InvalidUsername(_)
                | DomainError::UsernameRequired
                | DomainError::UsernameTaken
                | DomainError::EmptyMessage
                | DomainError::SelfChat
                | DomainError::AlreadyReviewed
                | DomainError::ListingUnavailable => e.to_string(),
                DomainError::ValidationError(msg) => msg.clone(),
                DomainError::NotSignedIn => "Please log in to continue".to_string(),
                DomainError::AdminRequired | DomainError::NotParticipant(_) => {
                    "You do not have permission to do that".to_string()
                }
                e if e.is_not_found() => "The requested item no longer exists".to_string(),
                _ => "Something went wrong. Please try again.".to_string(),
            };
        }

        match self {
            Self::CodeDelivery(_) => "Failed to send OTP".to_string(),
            Self::Validation(msg) => msg.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
                })
            })
            .collect();
        messages.sort();
        Self::Validation(messages.join(", "))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::CodeDelivery(msg) => AppError::ExternalService(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
