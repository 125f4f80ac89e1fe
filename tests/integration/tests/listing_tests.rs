//! Listing catalog scenarios
//!
//! Run with: cargo test -p integration-tests --test listing_tests

use integration_tests::{
    assert_domain_error, seller_form, seller_form_on, test_settings, unique_number,
    unique_username, TestMarket,
};
use market_core::entities::{ListingStatus, ReviewStatus};
use market_core::DomainError;
use market_service::dto::SellerForm;
use market_service::services::{ListingFilters, ServiceError, SortOrder};

// ============================================================================
// Submission flows
// ============================================================================

#[tokio::test]
async fn test_default_flow_waits_for_admin() {
    let market = TestMarket::start();
    let admin = market.sign_up_admin().await.unwrap();
    let seller = market
        .sign_up(&unique_number(), &unique_username())
        .await
        .unwrap();

    let submission = market
        .listings()
        .submit_listing(&seller, seller_form("Comedy", 10_000, 500))
        .await
        .unwrap();
    assert_eq!(submission.review, ReviewStatus::Pending);
    assert_eq!(submission.listing.status, ListingStatus::Pending);
    assert!(market.listings().catalog().await.unwrap().is_empty());

    let pending = market.listings().pending_submissions(&admin).await.unwrap();
    assert_eq!(pending.len(), 1);

    let listing = market
        .listings()
        .approve_listing(&admin, submission.id())
        .await
        .unwrap();
    assert_eq!(listing.status, ListingStatus::Available);
    assert_eq!(listing.followers, 10_000);
    assert_eq!(listing.price, 500);

    let catalog = market.listings().catalog().await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(market
        .listings()
        .pending_submissions(&admin)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_seller_contact_reaches_admin() {
    let market = TestMarket::start();
    let admin = market.sign_up_admin().await.unwrap();
    let seller = market
        .sign_up(&unique_number(), &unique_username())
        .await
        .unwrap();

    let missing_email = SellerForm {
        email: String::new(),
        ..seller_form("Comedy", 10_000, 500)
    };
    let err = market
        .listings()
        .submit_listing(&seller, missing_email)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let missing_price = SellerForm {
        price: " ".to_string(),
        ..seller_form("Comedy", 10_000, 500)
    };
    let err = market
        .listings()
        .submit_listing(&seller, missing_price)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(market.listings().submissions(&admin).await.unwrap().is_empty());

    market
        .listings()
        .submit_listing(&seller, seller_form("Comedy", 10_000, 500))
        .await
        .unwrap();
    let pending = market.listings().pending_submissions(&admin).await.unwrap();
    assert_eq!(pending[0].listing.email, "seller@example.com");
    assert_eq!(pending[0].listing.phone.as_deref(), Some("+15550001111"));
}

#[tokio::test]
async fn test_auto_approve_flow() {
    let market = TestMarket::start_with_settings(test_settings().with_auto_approve(true));
    let admin = market.sign_up_admin().await.unwrap();
    let seller = market
        .sign_up(&unique_number(), &unique_username())
        .await
        .unwrap();

    let submission = market
        .listings()
        .submit_listing(&seller, seller_form("Comedy", 10_000, 500))
        .await
        .unwrap();
    assert_eq!(submission.review, ReviewStatus::Approved);

    let catalog = market.listings().catalog().await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].status, ListingStatus::Available);

    // tracked for the admin, but not waiting for review
    assert_eq!(market.listings().submissions(&admin).await.unwrap().len(), 1);
    assert!(market
        .listings()
        .pending_submissions(&admin)
        .await
        .unwrap()
        .is_empty());

    assert_domain_error(
        market.listings().approve_listing(&admin, submission.id()).await,
        |e| matches!(e, DomainError::AlreadyReviewed),
    );
}

#[tokio::test]
async fn test_admin_actions_need_admin() {
    let market = TestMarket::start();
    let seller = market
        .sign_up(&unique_number(), &unique_username())
        .await
        .unwrap();
    let id = market
        .listings()
        .submit_listing(&seller, seller_form("Comedy", 10_000, 500))
        .await
        .unwrap()
        .id();

    let listings = market.listings();
    assert_domain_error(listings.approve_listing(&seller, id).await, |e| {
        matches!(e, DomainError::AdminRequired)
    });
    assert_domain_error(listings.reject_listing(&seller, id).await, |e| {
        matches!(e, DomainError::AdminRequired)
    });
    assert_domain_error(listings.dashboard_stats(&seller).await, |e| {
        matches!(e, DomainError::AdminRequired)
    });
}

#[tokio::test]
async fn test_dashboard_reflects_lifecycle() {
    let market = TestMarket::start();
    let admin = market.sign_up_admin().await.unwrap();
    let seller = market
        .sign_up(&unique_number(), &unique_username())
        .await
        .unwrap();
    let listings = market.listings();

    let first = listings
        .submit_listing(&seller, seller_form("Comedy", 10_000, 500))
        .await
        .unwrap()
        .id();
    let second = listings
        .submit_listing(&seller, seller_form("Dance", 80_000, 1_200))
        .await
        .unwrap()
        .id();
    listings
        .submit_listing(&seller, seller_form("Gaming", 2_000, 80))
        .await
        .unwrap();

    listings.approve_listing(&admin, first).await.unwrap();
    listings.approve_listing(&admin, second).await.unwrap();
    listings.mark_sold(&admin, second).await.unwrap();

    let stats = listings.dashboard_stats(&admin).await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_accounts, 2);
    assert_eq!(stats.pending_reviews, 1);
    assert_eq!(stats.available_accounts, 1);
    assert_eq!(stats.total_value, 1_700);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_category_filter_and_conjunction() {
    let market = TestMarket::start_with_settings(test_settings().with_auto_approve(true));
    let seller = market
        .sign_up(&unique_number(), &unique_username())
        .await
        .unwrap();
    let listings = market.listings();

    for form in [
        seller_form("Comedy", 10_000, 500),
        seller_form("Dance", 50_000, 900),
        seller_form("Dance", 90_000, 2_500),
        seller_form_on("Instagram", "Dance", 700),
    ] {
        listings.submit_listing(&seller, form).await.unwrap();
    }

    let dance = listings
        .search(&ListingFilters::default().category("Dance"))
        .await
        .unwrap();
    assert_eq!(dance.len(), 3);
    assert!(dance.iter().all(|l| l.content_category == "Dance"));

    let narrowed = listings
        .search(
            &ListingFilters::default()
                .category("Dance")
                .platform("tiktok")
                .price_range(Some(500), Some(1_000)),
        )
        .await
        .unwrap();
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].price, 900);

    let by_price = listings
        .search(&ListingFilters::default().sort(SortOrder::PriceDesc))
        .await
        .unwrap();
    let prices: Vec<u64> = by_price.iter().map(|l| l.price).collect();
    assert_eq!(prices, vec![2_500, 900, 700, 500]);
}

#[tokio::test]
async fn test_sold_listings_can_be_filtered_out() {
    let market = TestMarket::start_with_settings(test_settings().with_auto_approve(true));
    let admin = market.sign_up_admin().await.unwrap();
    let listings = market.listings();

    let sold = listings
        .submit_listing(&admin, seller_form("Comedy", 10_000, 500))
        .await
        .unwrap()
        .id();
    listings
        .submit_listing(&admin, seller_form("Comedy", 20_000, 800))
        .await
        .unwrap();
    listings.mark_sold(&admin, sold).await.unwrap();

    let available = listings
        .search(&ListingFilters::default().status(ListingStatus::Available))
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].price, 800);
}
