//! Phone verification and registration scenarios
//!
//! Run with: cargo test -p integration-tests --test auth_tests

use std::time::Duration;

use integration_tests::{
    assert_domain_error, test_settings, unique_number, unique_username, TestMarket,
};
use market_core::entities::{Role, PERSONAL_BROADCAST_NAME};
use market_core::DomainError;

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_new_user_gets_personal_broadcast() {
    let market = TestMarket::start();

    let alice = market.sign_up("5551234567", "alice").await.unwrap();
    assert_eq!(alice.role, Role::User);
    assert_eq!(alice.phone_number, "+15551234567");
    assert_eq!(alice.country_code, "+1");

    let chats = market.chats().chats_for_user(alice.id).await.unwrap();
    assert_eq!(chats.len(), 1);
    let status = &chats[0].chat;
    assert_eq!(chats[0].title, PERSONAL_BROADCAST_NAME);
    assert_eq!(status.participants, vec![alice.id]);
    assert_eq!(Some(status.id), alice.personal_broadcast_id);
}

#[tokio::test]
async fn test_admin_allow_list() {
    let market = TestMarket::start();

    let admin = market.sign_up_admin().await.unwrap();
    assert_eq!(admin.role, Role::Admin);

    let user = market
        .sign_up(&unique_number(), &unique_username())
        .await
        .unwrap();
    assert_eq!(user.role, Role::User);
}

// ============================================================================
// Code lifecycle
// ============================================================================

#[tokio::test]
async fn test_code_confirms_exactly_once() {
    let market = TestMarket::start();
    let number = unique_number();

    let code = market.request_code(&number).await.unwrap();
    market.confirm(&number, &code, Some("first")).await.unwrap();

    assert_domain_error(market.confirm(&number, &code, None).await, |e| {
        e.is_verification_failure()
    });
}

#[tokio::test]
async fn test_expired_code_fails_regardless_of_value() {
    let market = TestMarket::start_with_settings(test_settings().with_otp_ttl(Duration::ZERO));
    let number = unique_number();

    let code = market.request_code(&number).await.unwrap();
    assert_domain_error(market.confirm(&number, &code, Some("late")).await, |e| {
        matches!(e, DomainError::ChallengeExpired)
    });

    // the expired challenge is gone as well
    assert_domain_error(market.confirm(&number, &code, Some("late")).await, |e| {
        matches!(e, DomainError::NoPendingChallenge)
    });
}

#[tokio::test]
async fn test_new_code_replaces_old_one() {
    let market = TestMarket::start();
    let number = unique_number();

    let first = market.request_code(&number).await.unwrap();
    let second = market.request_code(&number).await.unwrap();

    if first != second {
        assert_domain_error(market.confirm(&number, &first, Some("bob")).await, |e| {
            matches!(e, DomainError::InvalidCode)
        });
    }
    market.confirm(&number, &second, Some("bob")).await.unwrap();
}

#[tokio::test]
async fn test_username_required_only_for_new_phones() {
    let market = TestMarket::start();
    let number = unique_number();

    let code = market.request_code(&number).await.unwrap();
    assert_domain_error(market.confirm(&number, &code, None).await, |e| {
        matches!(e, DomainError::UsernameRequired)
    });
    let user = market.confirm(&number, &code, Some("carol")).await.unwrap();

    market.auth().logout().await.unwrap();
    let code = market.request_code(&number).await.unwrap();
    let again = market.confirm(&number, &code, None).await.unwrap();
    assert_eq!(again.id, user.id);
    assert_eq!(again.username, "carol");
}

// ============================================================================
// Session
// ============================================================================

#[tokio::test]
async fn test_session_follows_login_and_logout() {
    let market = TestMarket::start();
    assert!(market.auth().current_user().await.unwrap().is_none());

    let user = market
        .sign_up(&unique_number(), &unique_username())
        .await
        .unwrap();
    let current = market.auth().current_user().await.unwrap().unwrap();
    assert_eq!(current.id, user.id);

    market.auth().logout().await.unwrap();
    assert!(market.auth().current_user().await.unwrap().is_none());
    assert_domain_error(market.auth().require_user().await, |e| {
        matches!(e, DomainError::NotSignedIn)
    });
}
