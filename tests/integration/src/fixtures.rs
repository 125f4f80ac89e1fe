//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use market_service::dto::{CreateBroadcastRequest, SellerForm};
use market_core::RecordId;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A fresh ten-digit local number that never collides with the admin phone
pub fn unique_number() -> String {
    format!("555{:07}", 1_000_000 + unique_suffix())
}

/// A fresh username
pub fn unique_username() -> String {
    format!("user{}", unique_suffix())
}

/// Seller form with the fields the catalog filters on
pub fn seller_form(category: &str, followers: u64, price: u64) -> SellerForm {
    SellerForm {
        platform: Some("TikTok".to_string()),
        username: format!("@creator{}", unique_suffix()),
        followers: followers.to_string(),
        following: "120".to_string(),
        likes: "48000".to_string(),
        videos: "64".to_string(),
        region: "US".to_string(),
        content_category: category.to_string(),
        price: price.to_string(),
        description: format!("{category} account with steady growth"),
        account_age: "2 years".to_string(),
        engagement_rate: "4.2".to_string(),
        email: "seller@example.com".to_string(),
        phone: Some("+15550001111".to_string()),
        ..SellerForm::default()
    }
}

/// Seller form for another platform
pub fn seller_form_on(platform: &str, category: &str, price: u64) -> SellerForm {
    SellerForm {
        platform: Some(platform.to_string()),
        ..seller_form(category, 5_000, price)
    }
}

pub fn broadcast_request(name: &str, recipients: &[RecordId]) -> CreateBroadcastRequest {
    CreateBroadcastRequest {
        name: name.to_string(),
        recipients: recipients.to_vec(),
    }
}
