//! Persistence scenarios over the file backend
//!
//! Run with: cargo test -p integration-tests --test store_tests

use integration_tests::{seller_form, test_config, test_settings, unique_number, TestMarket};
use market_core::entities::ListingStatus;
use market_service::dto::SendMessageRequest;
use tempfile::tempdir;

#[tokio::test]
async fn test_state_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("market.json");
    let settings = test_settings().with_auto_approve(true);

    let number = unique_number();
    let (user_id, chat_id) = {
        let market = TestMarket::start_on_file(&path, settings.clone()).unwrap();
        let user = market.sign_up(&number, "persisted").await.unwrap();
        market
            .listings()
            .submit_listing(&user, seller_form("Comedy", 10_000, 500))
            .await
            .unwrap();
        let chat_id = user.personal_broadcast_id.unwrap();
        market
            .chats()
            .send_message(chat_id, user.id, SendMessageRequest::text("saved"))
            .await
            .unwrap();
        (user.id, chat_id)
    };

    let market = TestMarket::start_on_file(&path, settings).unwrap();
    let current = market.auth().current_user().await.unwrap().unwrap();
    assert_eq!(current.id, user_id);

    let catalog = market.listings().catalog().await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].status, ListingStatus::Available);

    let messages = market.chats().messages_for_chat(chat_id).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "saved");

    // a returning phone logs in without a username
    market.auth().logout().await.unwrap();
    let code = market.request_code(&number).await.unwrap();
    let again = market.confirm(&number, &code, None).await.unwrap();
    assert_eq!(again.id, user_id);
}

#[tokio::test]
async fn test_file_uses_documented_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("market.json");

    {
        let market = TestMarket::start_on_file(&path, test_settings()).unwrap();
        let user = market.sign_up(&unique_number(), "keys").await.unwrap();
        market
            .listings()
            .submit_listing(&user, seller_form("Comedy", 1_000, 50))
            .await
            .unwrap();
    }

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for key in ["users", "sellerAccounts", "chats", "user"] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(json["users"][0]["username"], "keys");
    assert_eq!(json["sellerAccounts"][0]["review"], "pending");
    assert_eq!(json["chats"][0]["type"], "broadcast");
    assert_eq!(json["chats"][0]["name"], "My Status");
}

#[tokio::test]
async fn test_market_from_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("configured.json");

    let market = TestMarket::start_with_config(&test_config(Some(&path))).unwrap();
    market.sign_up(&unique_number(), "configured").await.unwrap();
    assert!(path.exists());

    let memory = TestMarket::start_with_config(&test_config(None)).unwrap();
    assert!(memory.listings().catalog().await.unwrap().is_empty());
}
