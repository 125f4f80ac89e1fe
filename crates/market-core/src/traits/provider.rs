//! Verification provider port
//!
//! Phone ownership is proven by a one-time code delivered out of band. The
//! domain only needs an opaque handle for the issued code and a confirmation
//! step; SMS gateways and development stand-ins implement this trait.

use async_trait::async_trait;

use crate::value_objects::PhoneNumber;

use super::RepoResult;

/// Handle for an issued code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeHandle {
    pub handle: String,
    /// Set by providers that hand the code back to the caller instead of delivering it
    pub dev_code: Option<String>,
}

impl ChallengeHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            dev_code: None,
        }
    }

    #[must_use]
    pub fn with_dev_code(mut self, code: impl Into<String>) -> Self {
        self.dev_code = Some(code.into());
        self
    }
}

/// Identity proven by a confirmed code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPhone {
    pub phone: PhoneNumber,
}

#[async_trait]
pub trait VerificationProvider: Send + Sync {
    /// Issue a code for the phone number
    async fn send_code(&self, phone: &PhoneNumber) -> RepoResult<ChallengeHandle>;

    /// Confirm a code; a confirmed handle cannot be confirmed again
    async fn confirm(&self, handle: &str, code: &str) -> RepoResult<VerifiedPhone>;

    /// Forget an issued code
    async fn cancel(&self, handle: &str) -> RepoResult<()>;
}
