//! Key-value implementation of MessageRepository

use async_trait::async_trait;
use tracing::{debug, instrument};

use market_core::entities::Message;
use market_core::traits::{MessageRepository, RepoResult};
use market_core::value_objects::RecordId;

use crate::collection::Collection;
use crate::events::EventBus;
use crate::keys;
use crate::kv::SharedStore;

use super::error::map_store_error;

/// Messages stored under the `messages` key
#[derive(Clone)]
pub struct KvMessageRepository {
    messages: Collection<Message>,
}

impl KvMessageRepository {
    pub fn new(store: SharedStore, events: EventBus) -> Self {
        Self {
            messages: Collection::new(store, keys::MESSAGES, events),
        }
    }
}

#[async_trait]
impl MessageRepository for KvMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_chat(&self, chat_id: RecordId) -> RepoResult<Vec<Message>> {
        let messages = self.messages.load().await.map_err(map_store_error)?;
        let mut found: Vec<Message> = messages
            .into_iter()
            .filter(|m| m.chat_id == chat_id)
            .collect();
        found.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    #[instrument(skip(self, messages), fields(count = messages.len()))]
    async fn create_many(&self, messages: &[Message]) -> RepoResult<()> {
        if messages.is_empty() {
            return Ok(());
        }
        let batch = messages.to_vec();
        self.messages
            .update(move |all| all.extend(batch))
            .await
            .map_err(map_store_error)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, chat_id: RecordId, reader: RecordId) -> RepoResult<usize> {
        let changed = self
            .messages
            .update(|all| {
                let mut changed = 0;
                for message in all
                    .iter_mut()
                    .filter(|m| m.chat_id == chat_id && m.receiver_id == reader && !m.read)
                {
                    message.read = true;
                    changed += 1;
                }
                changed
            })
            .await
            .map_err(map_store_error)?;

        debug!(changed, "Marked messages read");
        Ok(changed)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<usize> {
        let messages = self.messages.load().await.map_err(map_store_error)?;
        Ok(messages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::{Duration, Utc};
    use market_core::entities::MessageKind;
    use std::sync::Arc;

    fn id(n: i64) -> RecordId {
        RecordId::new(n)
    }

    fn text(msg_id: i64, chat: i64, from: i64, to: i64) -> Message {
        Message::new(id(msg_id), id(chat), id(from), id(to), format!("m{msg_id}"), MessageKind::Text)
    }

    #[tokio::test]
    async fn test_find_by_chat_filters_and_sorts() {
        let repo = KvMessageRepository::new(Arc::new(MemoryStore::new()), EventBus::default());
        let now = Utc::now();
        repo.create_many(&[
            text(3, 1, 10, 20).at(now),
            text(1, 1, 20, 10).at(now - Duration::seconds(5)),
            text(2, 2, 10, 30).at(now),
            text(4, 1, 10, 20).at(now),
        ])
        .await
        .unwrap();

        let ids: Vec<_> = repo
            .find_by_chat(id(1))
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![id(1), id(3), id(4)]);
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_mark_read_only_for_receiver_in_chat() {
        let repo = KvMessageRepository::new(Arc::new(MemoryStore::new()), EventBus::default());
        repo.create_many(&[text(1, 1, 10, 20), text(2, 1, 20, 10), text(3, 2, 10, 20)])
            .await
            .unwrap();

        assert_eq!(repo.mark_read(id(1), id(20)).await.unwrap(), 1);
        assert_eq!(repo.mark_read(id(1), id(20)).await.unwrap(), 0);

        let chat_two = repo.find_by_chat(id(2)).await.unwrap();
        assert!(!chat_two[0].read);
    }
}
