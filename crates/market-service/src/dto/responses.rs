//! Response DTOs for service operations
//!
//! All response DTOs implement `Serialize`. Record ids are serialized as strings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use market_core::entities::Chat;
use market_core::RecordId;

// ============================================================================
// Auth Responses
// ============================================================================

/// Result of requesting a verification code
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRequestResponse {
    pub phone_number: String,
    pub expires_at: DateTime<Utc>,
    /// Whether the phone already belongs to an account (no username needed)
    pub registered: bool,
    /// Only present with a development provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_code: Option<String>,
}

// ============================================================================
// User Responses
// ============================================================================

/// User as other users see it (no phone number)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: RecordId,
    pub username: String,
}

// ============================================================================
// Admin Responses
// ============================================================================

/// Admin dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_accounts: usize,
    pub pending_reviews: usize,
    pub available_accounts: usize,
    /// Sum of catalog prices
    pub total_value: u64,
}

// ============================================================================
// Chat Responses
// ============================================================================

/// Chat list entry for one viewer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub chat: Chat,
    /// Broadcast name, or the other participant's username for direct chats
    pub title: String,
    pub unread: usize,
}
