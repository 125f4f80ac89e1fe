//! Session state - the signed-in user and the outstanding OTP challenge

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::value_objects::PhoneNumber;

/// An issued one-time code waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingChallenge {
    /// Opaque handle returned by the verification provider
    pub handle: String,
    pub phone: PhoneNumber,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Code surfaced by development providers; `None` for real SMS delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_code: Option<String>,
    /// Code the provider already accepted for this challenge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_code: Option<String>,
}

impl PendingChallenge {
    /// `None` when `ttl` pushes the expiry past the representable range
    pub fn new(handle: String, phone: PhoneNumber, ttl: Duration) -> Option<Self> {
        let issued_at = Utc::now();
        let expires_at = issued_at.checked_add_signed(ttl)?;
        Some(Self {
            handle,
            phone,
            issued_at,
            expires_at,
            dev_code: None,
            confirmed_code: None,
        })
    }

    #[must_use]
    pub fn with_dev_code(mut self, code: impl Into<String>) -> Self {
        self.dev_code = Some(code.into());
        self
    }

    /// A challenge is expired from its expiry instant onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_for(&self, phone: &PhoneNumber) -> bool {
        &self.phone == phone
    }

    /// Remember a code the provider accepted
    pub fn confirm(&mut self, code: impl Into<String>) {
        self.confirmed_code = Some(code.into());
    }

    /// Whether `code` matches one the provider already accepted
    pub fn was_confirmed_with(&self, code: &str) -> bool {
        self.confirmed_code.as_deref() == Some(code)
    }
}

/// The active session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            started_at: Utc::now(),
        }
    }
}
