//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs, and the
//! seller form parsing.

use chrono::Utc;

use market_core::entities::{
    Listing, ListingStatus, User, DEFAULT_PLATFORM, MAX_LISTING_IMAGES,
};
use market_core::RecordId;

use super::requests::SellerForm;
use super::responses::PublicUserResponse;

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Seller Form
// ============================================================================

/// Leading unsigned integer of a form field
///
/// No leading digits reads as 0; a digit run too large for `u64` saturates.
pub fn lenient_count(raw: &str) -> u64 {
    let trimmed = raw.trim().trim_start_matches('+');
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Leading decimal number of a form field; anything unparsable (or negative) is 0
pub fn lenient_rate(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in trimmed.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    let value = trimmed[..end].parse::<f64>().unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl SellerForm {
    /// Turn the form into a listing owned by `seller_id`
    pub fn into_listing(self, id: RecordId, seller_id: RecordId) -> Listing {
        let platform = self
            .platform
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());

        let mut images = self.images;
        images.retain(|img| !img.trim().is_empty());
        images.truncate(MAX_LISTING_IMAGES);

        Listing {
            id,
            seller_id,
            platform,
            username: self.username.trim().trim_start_matches('@').to_string(),
            followers: lenient_count(&self.followers),
            following: lenient_count(&self.following),
            likes: lenient_count(&self.likes),
            videos: lenient_count(&self.videos),
            region: self.region.trim().to_string(),
            content_category: self.content_category.trim().to_string(),
            price: lenient_count(&self.price),
            description: self.description.trim().to_string(),
            verification_status: self.verification_status,
            account_age: self.account_age.trim().to_string(),
            engagement_rate: lenient_rate(&self.engagement_rate),
            images,
            email: self.email.trim().to_string(),
            phone: self
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            status: ListingStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
