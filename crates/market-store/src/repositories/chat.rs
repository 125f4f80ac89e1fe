//! Key-value implementation of ChatRepository

use async_trait::async_trait;
use tracing::instrument;

use market_core::entities::Chat;
use market_core::traits::{ChatRepository, RepoResult};
use market_core::value_objects::RecordId;

use crate::collection::Collection;
use crate::events::EventBus;
use crate::keys;
use crate::kv::SharedStore;

use super::error::{chat_not_found, duplicate_id, map_store_error};

/// Chats stored under the `chats` key
#[derive(Clone)]
pub struct KvChatRepository {
    chats: Collection<Chat>,
}

impl KvChatRepository {
    pub fn new(store: SharedStore, events: EventBus) -> Self {
        Self {
            chats: Collection::new(store, keys::CHATS, events),
        }
    }
}

#[async_trait]
impl ChatRepository for KvChatRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Chat>> {
        let chats = self.chats.load().await.map_err(map_store_error)?;
        Ok(chats.into_iter().find(|c| c.id == id))
    }

    #[instrument(skip(self))]
    async fn find_direct(&self, user_a: RecordId, user_b: RecordId) -> RepoResult<Option<Chat>> {
        let chats = self.chats.load().await.map_err(map_store_error)?;
        Ok(chats
            .into_iter()
            .find(|c| c.is_direct_between(user_a, user_b)))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Chat>> {
        let chats = self.chats.load().await.map_err(map_store_error)?;
        Ok(chats
            .into_iter()
            .filter(|c| c.has_participant(user_id))
            .collect())
    }

    #[instrument(skip(self, chat), fields(chat_id = %chat.id))]
    async fn create(&self, chat: &Chat) -> RepoResult<()> {
        let chat = chat.clone();
        self.chats
            .try_update(move |chats| {
                if chats.iter().any(|c| c.id == chat.id) {
                    return Err(duplicate_id(keys::CHATS, chat.id));
                }
                chats.push(chat);
                Ok(())
            })
            .await
            .map_err(map_store_error)?
    }

    #[instrument(skip(self, chat), fields(chat_id = %chat.id))]
    async fn update(&self, chat: &Chat) -> RepoResult<()> {
        let chat = chat.clone();
        self.chats
            .try_update(move |chats| {
                let slot = chats
                    .iter_mut()
                    .find(|c| c.id == chat.id)
                    .ok_or_else(|| chat_not_found(chat.id))?;
                *slot = chat;
                Ok(())
            })
            .await
            .map_err(map_store_error)?
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        self.chats
            .update(|chats| {
                let before = chats.len();
                chats.retain(|c| c.id != id);
                chats.len() != before
            })
            .await
            .map_err(map_store_error)
    }
}
