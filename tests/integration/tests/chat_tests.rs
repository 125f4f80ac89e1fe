//! Direct chat and broadcast scenarios
//!
//! Run with: cargo test -p integration-tests --test chat_tests

use integration_tests::{
    assert_domain_error, broadcast_request, unique_number, unique_username, TestMarket,
};
use market_core::entities::{MessageKind, User};
use market_core::DomainError;
use market_service::dto::SendMessageRequest;

async fn users(market: &TestMarket, count: usize) -> Vec<User> {
    let mut users = Vec::with_capacity(count);
    for _ in 0..count {
        users.push(
            market
                .sign_up(&unique_number(), &unique_username())
                .await
                .unwrap(),
        );
    }
    users
}

#[tokio::test]
async fn test_direct_chat_is_stable_per_pair() {
    let market = TestMarket::start();
    let people = users(&market, 2).await;
    let (a, b) = (&people[0], &people[1]);

    let first = market.chats().find_or_create_direct_chat(a.id, b.id).await.unwrap();
    let second = market.chats().find_or_create_direct_chat(b.id, a.id).await.unwrap();
    assert_eq!(first.id, second.id);

    // personal broadcast + the direct chat
    assert_eq!(market.chats().chats_for_user(a.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_broadcast_with_n_recipients_stores_n_records() {
    let market = TestMarket::start();
    let people = users(&market, 5).await;
    let owner = &people[0];
    let recipients: Vec<_> = people[1..].iter().map(|u| u.id).collect();

    let chat = market
        .chats()
        .create_broadcast(owner.id, broadcast_request("Deals", &recipients))
        .await
        .unwrap();

    let sent = market
        .chats()
        .send_message(chat.id, owner.id, SendMessageRequest::text("New listings today"))
        .await
        .unwrap();
    assert_eq!(sent.len(), recipients.len());
    assert!(sent
        .iter()
        .all(|m| m.content == "New listings today" && m.kind == MessageKind::Text));
    assert_eq!(
        sent.iter().map(|m| m.receiver_id).collect::<Vec<_>>(),
        recipients
    );

    let stored = market.chats().messages_for_chat(chat.id).await.unwrap();
    assert_eq!(stored.len(), recipients.len());

    for recipient in &people[1..] {
        assert_eq!(
            market.chats().unread_count(chat.id, recipient.id).await.unwrap(),
            1
        );
    }
}

#[tokio::test]
async fn test_personal_broadcast_note() {
    let market = TestMarket::start();
    let owner = &users(&market, 1).await[0];
    let status = owner.personal_broadcast_id.unwrap();

    let sent = market
        .chats()
        .send_message(status, owner.id, SendMessageRequest::text("away today"))
        .await
        .unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].receiver_id, owner.id);

    let list = market.chats().chats_for_user(owner.id).await.unwrap();
    let last = list[0].chat.last_message.as_ref().unwrap();
    assert_eq!(last.content, "away today");
}

#[tokio::test]
async fn test_conversation_and_read_tracking() {
    let market = TestMarket::start();
    let people = users(&market, 2).await;
    let (a, b) = (&people[0], &people[1]);
    let chats = market.chats();

    let chat = chats.find_or_create_direct_chat(a.id, b.id).await.unwrap();
    chats
        .send_message(chat.id, a.id, SendMessageRequest::text("is the account still available?"))
        .await
        .unwrap();
    chats
        .send_message(chat.id, b.id, SendMessageRequest::text("yes"))
        .await
        .unwrap();
    chats
        .send_message(chat.id, a.id, SendMessageRequest::image("data:image/png;base64,AAAA"))
        .await
        .unwrap();

    let conversation = chats.conversation(chat.id, b.id).await.unwrap();
    assert_eq!(conversation.len(), 3);
    assert_eq!(conversation[1].content, "yes");

    assert_eq!(chats.unread_count(chat.id, b.id).await.unwrap(), 2);
    assert_eq!(chats.mark_read(chat.id, b.id).await.unwrap(), 2);
    assert_eq!(chats.unread_count(chat.id, b.id).await.unwrap(), 0);
    assert_eq!(chats.unread_count(chat.id, a.id).await.unwrap(), 1);

    let list = chats.chats_for_user(b.id).await.unwrap();
    assert_eq!(list[0].chat.id, chat.id);
    assert_eq!(list[0].title, a.username);
    assert_eq!(
        list[0].chat.last_message.as_ref().unwrap().content,
        "Sent an image"
    );
}

#[tokio::test]
async fn test_outsiders_cannot_send() {
    let market = TestMarket::start();
    let people = users(&market, 3).await;
    let chat = market
        .chats()
        .find_or_create_direct_chat(people[0].id, people[1].id)
        .await
        .unwrap();

    assert_domain_error(
        market
            .chats()
            .send_message(chat.id, people[2].id, SendMessageRequest::text("hi"))
            .await,
        |e| matches!(e, DomainError::NotParticipant(_)),
    );
}

#[tokio::test]
async fn test_user_search() {
    let market = TestMarket::start();
    let viewer = market.sign_up(&unique_number(), "searcher").await.unwrap();
    market.sign_up(&unique_number(), "TikTokSeller").await.unwrap();
    market.sign_up(&unique_number(), "buyer").await.unwrap();

    let found = market.chats().search_users(viewer.id, "tiktok").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username, "TikTokSeller");

    assert!(market.chats().search_users(viewer.id, "").await.unwrap().is_empty());
    assert!(market
        .chats()
        .search_users(viewer.id, "searcher")
        .await
        .unwrap()
        .is_empty());
}
