//! Repository doubles for failure paths

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use market_core::entities::{Chat, Submission};
use market_core::traits::{ChatRepository, RepoResult, SubmissionRepository, VerificationProvider};
use market_core::{DomainError, RecordId};
use market_store::{
    EventBus, KvChatRepository, KvSubmissionRepository, LocalCodeProvider, MemoryStore,
    SharedStore,
};

use super::context::{ServiceContext, ServiceContextBuilder};
use super::settings::MarketSettings;

fn disk_full() -> DomainError {
    DomainError::StorageError("disk full".to_string())
}

/// Chat repository whose first `failures` creates error out
pub struct FlakyChatRepository {
    inner: KvChatRepository,
    failures: AtomicUsize,
}

impl FlakyChatRepository {
    pub fn new(store: SharedStore, events: EventBus, failures: usize) -> Self {
        Self {
            inner: KvChatRepository::new(store, events),
            failures: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl ChatRepository for FlakyChatRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Chat>> {
        self.inner.find_by_id(id).await
    }

    async fn find_direct(&self, user_a: RecordId, user_b: RecordId) -> RepoResult<Option<Chat>> {
        self.inner.find_direct(user_a, user_b).await
    }

    async fn find_by_user(&self, user_id: RecordId) -> RepoResult<Vec<Chat>> {
        self.inner.find_by_user(user_id).await
    }

    async fn create(&self, chat: &Chat) -> RepoResult<()> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(disk_full());
        }
        self.inner.create(chat).await
    }

    async fn update(&self, chat: &Chat) -> RepoResult<()> {
        self.inner.update(chat).await
    }

    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        self.inner.delete(id).await
    }
}

/// Tracking repository that refuses every new entry
pub struct RejectingSubmissionRepository {
    inner: KvSubmissionRepository,
}

impl RejectingSubmissionRepository {
    pub fn new(store: SharedStore, events: EventBus) -> Self {
        Self {
            inner: KvSubmissionRepository::new(store, events),
        }
    }
}

#[async_trait]
impl SubmissionRepository for RejectingSubmissionRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Submission>> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self) -> RepoResult<Vec<Submission>> {
        self.inner.list().await
    }

    async fn create(&self, _submission: &Submission) -> RepoResult<()> {
        Err(disk_full())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        self.inner.delete(id).await
    }
}

/// In-memory context whose personal-broadcast writes fail `failures` times
pub fn context_with_flaky_chats(settings: MarketSettings, failures: usize) -> ServiceContext {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let events = EventBus::default();
    let verifier: Arc<dyn VerificationProvider> =
        Arc::new(LocalCodeProvider::new(settings.otp_length));

    ServiceContextBuilder::new()
        .store(store.clone())
        .events(events.clone())
        .chat_repo(Arc::new(FlakyChatRepository::new(store, events, failures)))
        .verifier(verifier)
        .settings(settings)
        .build()
        .unwrap()
}

/// In-memory context whose tracking collection rejects every write
pub fn context_with_rejecting_submissions(settings: MarketSettings) -> ServiceContext {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let events = EventBus::default();
    let verifier: Arc<dyn VerificationProvider> =
        Arc::new(LocalCodeProvider::new(settings.otp_length));

    ServiceContextBuilder::new()
        .store(store.clone())
        .events(events.clone())
        .submission_repo(Arc::new(RejectingSubmissionRepository::new(store, events)))
        .verifier(verifier)
        .settings(settings)
        .build()
        .unwrap()
}
