//! Listing entity - a social-media account offered for sale

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

/// Platform assumed for listings that do not name one
pub const DEFAULT_PLATFORM: &str = "TikTok";

/// Maximum number of images attached to a listing
pub const MAX_LISTING_IMAGES: usize = 5;

/// Catalog status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Available,
    Sold,
    #[default]
    Pending,
}

impl ListingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::Pending => "pending",
        }
    }
}

/// Seller-declared verification badge of the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    #[default]
    Unverified,
}

/// Admin review state of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

/// Listing entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: RecordId,
    pub seller_id: RecordId,
    #[serde(default = "default_platform")]
    pub platform: String,
    pub username: String,
    pub followers: u64,
    pub following: u64,
    pub likes: u64,
    pub videos: u64,
    pub region: String,
    pub content_category: String,
    pub price: u64,
    pub description: String,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    pub account_age: String,
    pub engagement_rate: f64,
    #[serde(default)]
    pub images: Vec<String>,
    /// Seller contact shown to admins during review
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == ListingStatus::Available
    }

    /// Put the listing on the public catalog
    pub fn publish(&mut self) {
        self.status = ListingStatus::Available;
    }

    pub fn mark_sold(&mut self) {
        self.status = ListingStatus::Sold;
    }

    /// Case-insensitive substring match over the searchable text fields
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            &self.platform,
            &self.content_category,
            &self.description,
            &self.username,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Entry in the admin tracking collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(default)]
    pub review: ReviewStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(listing: Listing, review: ReviewStatus) -> Self {
        Self {
            listing,
            review,
            submitted_at: Utc::now(),
        }
    }

    #[inline]
    pub fn id(&self) -> RecordId {
        self.listing.id
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.review == ReviewStatus::Pending
    }
}
