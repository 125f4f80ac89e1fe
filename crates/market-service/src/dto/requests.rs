//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use market_core::entities::{MessageKind, VerificationStatus};
use market_core::RecordId;

// ============================================================================
// Auth Requests
// ============================================================================

/// Ask for a verification code
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeRequest {
    #[validate(length(min = 1, max = 4, message = "Country code is required"))]
    pub country_code: String,

    #[validate(length(min = 1, max = 20, message = "Phone number is required"))]
    pub phone_number: String,
}

/// Confirm a verification code, registering the phone if it is new
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCodeRequest {
    #[validate(length(min = 1, max = 4, message = "Country code is required"))]
    pub country_code: String,

    #[validate(length(min = 1, max = 20, message = "Phone number is required"))]
    pub phone_number: String,

    #[validate(length(min = 1, max = 10, message = "Verification code is required"))]
    pub code: String,

    /// Required when the phone number is not registered yet
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: Option<String>,
}

// ============================================================================
// Listing Requests
// ============================================================================

/// Seller form as submitted; numeric fields arrive as text
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerForm {
    pub platform: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Account username is required"))]
    pub username: String,

    #[validate(custom(function = "leading_number", message = "Followers count is required"))]
    pub followers: String,
    pub following: String,

    #[validate(custom(function = "leading_number", message = "Likes count is required"))]
    pub likes: String,
    pub videos: String,

    #[validate(length(min = 1, message = "Region is required"))]
    pub region: String,

    #[validate(length(min = 1, message = "Content category is required"))]
    pub content_category: String,

    #[validate(custom(function = "leading_number", message = "Price is required"))]
    pub price: String,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description is required (at most 2000 characters)"
    ))]
    pub description: String,

    pub verification_status: VerificationStatus,

    pub account_age: String,

    pub engagement_rate: String,

    /// Image data URLs; anything past the limit is dropped
    pub images: Vec<String>,

    #[validate(email(message = "A valid contact email is required"))]
    pub email: String,

    #[validate(length(max = 20, message = "Contact phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

/// Numeric form fields must start with a digit once trimmed
fn leading_number(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let value = value.strip_prefix('+').unwrap_or(value);
    match value.chars().next() {
        Some(c) if c.is_ascii_digit() => Ok(()),
        _ => Err(ValidationError::new("number")),
    }
}

// ============================================================================
// Chat Requests
// ============================================================================

/// Create a broadcast list
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBroadcastRequest {
    #[validate(length(min = 1, max = 64, message = "Broadcast name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Select at least one recipient"))]
    pub recipients: Vec<RecordId>,
}

/// Send a message to a chat
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "Message content is empty"))]
    pub content: String,

    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

impl SendMessageRequest {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: MessageKind::Text,
        }
    }

    pub fn image(data_url: impl Into<String>) -> Self {
        Self {
            content: data_url.into(),
            kind: MessageKind::Image,
        }
    }
}
