//! Application error types
//!
//! Unified error handling for the entire application. Status codes follow
//! HTTP conventions so a UI layer can classify failures uniformly.

use market_core::DomainError;
use std::fmt;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // External service errors
    #[error("External service error: {0}")]
    ExternalService(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Get HTTP-style status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 500 Internal Server Error
            Self::Internal(_) | Self::Config(_) => 500,

            // 502 Bad Gateway
            Self::ExternalService(_) => 502,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => Self::domain_status_code(e),
        }
    }

    /// Status code for a domain error
    #[must_use]
    pub fn domain_status_code(e: &DomainError) -> u16 {
        if e.is_not_found() {
            404
        } else if matches!(e, DomainError::NotSignedIn) {
            401
        } else if e.is_authorization() {
            403
        } else if e.is_validation() || e.is_verification_failure() {
            400
        } else if e.is_conflict() {
            409
        } else if matches!(e, DomainError::ProviderError(_)) {
            502
        } else {
            500
        }
    }

    /// Get stable error code for display layers
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
