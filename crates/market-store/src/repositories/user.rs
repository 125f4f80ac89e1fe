//! Key-value implementation of UserRepository

use async_trait::async_trait;
use tracing::instrument;

use market_core::entities::User;
use market_core::error::DomainError;
use market_core::traits::{RepoResult, UserRepository};
use market_core::value_objects::{PhoneNumber, RecordId};

use crate::collection::Collection;
use crate::events::EventBus;
use crate::keys;
use crate::kv::SharedStore;

use super::error::map_store_error;

/// Users stored under the `users` key
#[derive(Clone)]
pub struct KvUserRepository {
    users: Collection<User>,
}

impl KvUserRepository {
    pub fn new(store: SharedStore, events: EventBus) -> Self {
        Self {
            users: Collection::new(store, keys::USERS, events),
        }
    }
}

#[async_trait]
impl UserRepository for KvUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        let users = self.users.load().await.map_err(map_store_error)?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    #[instrument(skip(self), fields(phone = %phone))]
    async fn find_by_phone(&self, phone: &PhoneNumber) -> RepoResult<Option<User>> {
        let users = self.users.load().await.map_err(map_store_error)?;
        Ok(users.into_iter().find(|u| u.has_phone(phone)))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let users = self.users.load().await.map_err(map_store_error)?;
        Ok(users.into_iter().find(|u| u.has_username(username)))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<User>> {
        self.users.load().await.map_err(map_store_error)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        let user = user.clone();
        self.users
            .try_update(move |users| {
                if users.iter().any(|u| u.phone_number == user.phone_number) {
                    return Err(DomainError::ValidationError(format!(
                        "phone {} is already registered",
                        user.phone_number
                    )));
                }
                if users.iter().any(|u| u.has_username(&user.username)) {
                    return Err(DomainError::UsernameTaken);
                }
                users.push(user);
                Ok(())
            })
            .await
            .map_err(map_store_error)?
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        self.users
            .update(|users| {
                let before = users.len();
                users.retain(|u| u.id != id);
                users.len() != before
            })
            .await
            .map_err(map_store_error)
    }
}
