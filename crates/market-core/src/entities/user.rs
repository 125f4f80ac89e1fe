//! User entity - a registered marketplace member

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{PhoneNumber, RecordId};

/// Access role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// User entity
///
/// Identified by phone number; the username is chosen once at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    /// Full number, country code included (`+15551234567`)
    pub phone_number: String,
    pub country_code: String,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub personal_broadcast_id: Option<RecordId>,
}

impl User {
    pub fn new(id: RecordId, phone: &PhoneNumber, username: String, role: Role) -> Self {
        Self {
            id,
            phone_number: phone.full(),
            country_code: phone.country_code().to_string(),
            username,
            role,
            created_at: Utc::now(),
            personal_broadcast_id: None,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check whether this user owns the given phone number
    pub fn has_phone(&self, phone: &PhoneNumber) -> bool {
        self.phone_number == phone.full()
    }

    /// Case-insensitive username equality
    pub fn has_username(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username.trim())
    }

    /// Attach the personal broadcast chat created at registration
    pub fn with_personal_broadcast(mut self, chat_id: RecordId) -> Self {
        self.personal_broadcast_id = Some(chat_id);
        self
    }
}
