//! Shared fixtures for unit tests

use chrono::Utc;
use market_core::entities::{Listing, ListingStatus, VerificationStatus, DEFAULT_PLATFORM};
use market_core::value_objects::RecordId;

pub fn listing(id: i64) -> Listing {
    Listing {
        id: RecordId::new(id),
        seller_id: RecordId::new(100),
        platform: DEFAULT_PLATFORM.to_string(),
        username: format!("creator{id}"),
        followers: 10_000,
        following: 150,
        likes: 250_000,
        videos: 80,
        region: "US".to_string(),
        content_category: "Comedy".to_string(),
        price: 500,
        description: "Fast growing comedy page".to_string(),
        verification_status: VerificationStatus::Unverified,
        account_age: "2 years".to_string(),
        engagement_rate: 4.5,
        images: Vec::new(),
        email: format!("creator{id}@example.com"),
        phone: Some("+15550001111".to_string()),
        status: ListingStatus::Pending,
        created_at: Utc::now(),
    }
}
