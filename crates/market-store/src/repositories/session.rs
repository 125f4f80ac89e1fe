//! Key-value implementation of SessionRepository

use async_trait::async_trait;
use tracing::instrument;

use market_core::entities::{PendingChallenge, Session};
use market_core::traits::{RepoResult, SessionRepository};

use crate::collection::Document;
use crate::events::EventBus;
use crate::keys;
use crate::kv::SharedStore;

use super::error::map_store_error;

/// Session under `user` and the outstanding challenge under `pendingOTP`
#[derive(Clone)]
pub struct KvSessionRepository {
    session: Document<Session>,
    challenge: Document<PendingChallenge>,
}

impl KvSessionRepository {
    pub fn new(store: SharedStore, events: EventBus) -> Self {
        Self {
            session: Document::new(store.clone(), keys::SESSION, events.clone()),
            challenge: Document::new(store, keys::PENDING_OTP, events),
        }
    }
}

#[async_trait]
impl SessionRepository for KvSessionRepository {
    #[instrument(skip(self))]
    async fn current(&self) -> RepoResult<Option<Session>> {
        self.session.load().await.map_err(map_store_error)
    }

    #[instrument(skip(self, session), fields(user_id = %session.user.id))]
    async fn set_current(&self, session: &Session) -> RepoResult<()> {
        self.session.save(session).await.map_err(map_store_error)
    }

    #[instrument(skip(self))]
    async fn clear_current(&self) -> RepoResult<()> {
        self.session.clear().await.map_err(map_store_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn pending_challenge(&self) -> RepoResult<Option<PendingChallenge>> {
        self.challenge.load().await.map_err(map_store_error)
    }

    #[instrument(skip(self, challenge), fields(handle = %challenge.handle))]
    async fn set_pending_challenge(&self, challenge: &PendingChallenge) -> RepoResult<()> {
        self.challenge.save(challenge).await.map_err(map_store_error)
    }

    #[instrument(skip(self))]
    async fn clear_pending_challenge(&self) -> RepoResult<()> {
        self.challenge.clear().await.map_err(map_store_error)?;
        Ok(())
    }
}
