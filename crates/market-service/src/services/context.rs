//! Service context - dependency container for services
//!
//! Holds all repositories, the verification provider, the event bus and the
//! runtime settings needed by services.

use std::sync::Arc;

use market_common::AppConfig;
use market_core::traits::{
    ChatRepository, ListingRepository, MessageRepository, SessionRepository,
    SubmissionRepository, UserRepository, VerificationProvider,
};
use market_core::{IdGenerator, RecordId};
use market_store::{
    open_store, EventBus, KvChatRepository, KvListingRepository, KvMessageRepository,
    KvSessionRepository, KvSubmissionRepository, KvUserRepository, LocalCodeProvider,
    MemoryStore, SharedStore,
};

use super::error::{ServiceError, ServiceResult};
use super::settings::MarketSettings;

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories for every stored collection
/// - The phone verification provider
/// - The event bus for change notifications
/// - The record id generator
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    listing_repo: Arc<dyn ListingRepository>,
    submission_repo: Arc<dyn SubmissionRepository>,
    chat_repo: Arc<dyn ChatRepository>,
    message_repo: Arc<dyn MessageRepository>,
    session_repo: Arc<dyn SessionRepository>,

    // Phone verification
    verifier: Arc<dyn VerificationProvider>,

    // Change notifications
    events: EventBus,

    id_generator: Arc<IdGenerator>,
    settings: Arc<MarketSettings>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        listing_repo: Arc<dyn ListingRepository>,
        submission_repo: Arc<dyn SubmissionRepository>,
        chat_repo: Arc<dyn ChatRepository>,
        message_repo: Arc<dyn MessageRepository>,
        session_repo: Arc<dyn SessionRepository>,
        verifier: Arc<dyn VerificationProvider>,
        events: EventBus,
        id_generator: Arc<IdGenerator>,
        settings: MarketSettings,
    ) -> Self {
        Self {
            user_repo,
            listing_repo,
            submission_repo,
            chat_repo,
            message_repo,
            session_repo,
            verifier,
            events,
            id_generator,
            settings: Arc::new(settings),
        }
    }

    /// Wire key-value repositories over one store
    pub fn with_store(
        store: SharedStore,
        verifier: Arc<dyn VerificationProvider>,
        settings: MarketSettings,
    ) -> Self {
        let events = EventBus::default();

        Self::new(
            Arc::new(KvUserRepository::new(store.clone(), events.clone())),
            Arc::new(KvListingRepository::new(store.clone(), events.clone())),
            Arc::new(KvSubmissionRepository::new(store.clone(), events.clone())),
            Arc::new(KvChatRepository::new(store.clone(), events.clone())),
            Arc::new(KvMessageRepository::new(store.clone(), events.clone())),
            Arc::new(KvSessionRepository::new(store, events.clone())),
            verifier,
            events,
            Arc::new(IdGenerator::new()),
            settings,
        )
    }

    /// Build the context described by the application configuration
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if the configured store cannot be opened
    pub fn from_config(config: &AppConfig) -> ServiceResult<Self> {
        let store = open_store(&config.store)
            .map_err(|e| ServiceError::internal(format!("failed to open store: {e}")))?;
        let settings = MarketSettings::from(config);
        let verifier = Arc::new(LocalCodeProvider::new(settings.otp_length));

        Ok(Self::with_store(store, verifier, settings))
    }

    /// Fully in-memory context with the development code provider
    pub fn in_memory(settings: MarketSettings) -> Self {
        let verifier = Arc::new(LocalCodeProvider::new(settings.otp_length));
        Self::with_store(Arc::new(MemoryStore::new()), verifier, settings)
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the public catalog repository
    pub fn listing_repo(&self) -> &dyn ListingRepository {
        self.listing_repo.as_ref()
    }

    /// Get the admin tracking repository
    pub fn submission_repo(&self) -> &dyn SubmissionRepository {
        self.submission_repo.as_ref()
    }

    /// Get the chat repository
    pub fn chat_repo(&self) -> &dyn ChatRepository {
        self.chat_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    // === Verification ===

    pub fn verifier(&self) -> &dyn VerificationProvider {
        self.verifier.as_ref()
    }

    // === Events ===

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // === Settings ===

    pub fn settings(&self) -> &MarketSettings {
        &self.settings
    }

    /// Generate a new record id
    pub fn generate_id(&self) -> RecordId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("verifier", &"dyn VerificationProvider")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom dependencies
///
/// Repositories left unset fall back to key-value implementations over the
/// builder's store (in-memory unless [`ServiceContextBuilder::store`] is called).
pub struct ServiceContextBuilder {
    store: Option<SharedStore>,
    events: Option<EventBus>,
    user_repo: Option<Arc<dyn UserRepository>>,
    listing_repo: Option<Arc<dyn ListingRepository>>,
    submission_repo: Option<Arc<dyn SubmissionRepository>>,
    chat_repo: Option<Arc<dyn ChatRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    verifier: Option<Arc<dyn VerificationProvider>>,
    id_generator: Option<Arc<IdGenerator>>,
    settings: Option<MarketSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            events: None,
            user_repo: None,
            listing_repo: None,
            submission_repo: None,
            chat_repo: None,
            message_repo: None,
            session_repo: None,
            verifier: None,
            id_generator: None,
            settings: None,
        }
    }

    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn listing_repo(mut self, repo: Arc<dyn ListingRepository>) -> Self {
        self.listing_repo = Some(repo);
        self
    }

    pub fn submission_repo(mut self, repo: Arc<dyn SubmissionRepository>) -> Self {
        self.submission_repo = Some(repo);
        self
    }

    pub fn chat_repo(mut self, repo: Arc<dyn ChatRepository>) -> Self {
        self.chat_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn verifier(mut self, verifier: Arc<dyn VerificationProvider>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    pub fn settings(mut self, settings: MarketSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if no verification provider was given
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as SharedStore);
        let events = self.events.unwrap_or_default();

        Ok(ServiceContext::new(
            self.user_repo.unwrap_or_else(|| {
                Arc::new(KvUserRepository::new(store.clone(), events.clone()))
            }),
            self.listing_repo.unwrap_or_else(|| {
                Arc::new(KvListingRepository::new(store.clone(), events.clone()))
            }),
            self.submission_repo.unwrap_or_else(|| {
                Arc::new(KvSubmissionRepository::new(store.clone(), events.clone()))
            }),
            self.chat_repo.unwrap_or_else(|| {
                Arc::new(KvChatRepository::new(store.clone(), events.clone()))
            }),
            self.message_repo.unwrap_or_else(|| {
                Arc::new(KvMessageRepository::new(store.clone(), events.clone()))
            }),
            self.session_repo.unwrap_or_else(|| {
                Arc::new(KvSessionRepository::new(store.clone(), events.clone()))
            }),
            self.verifier
                .ok_or_else(|| ServiceError::validation("verifier is required"))?,
            events,
            self.id_generator
                .unwrap_or_else(|| Arc::new(IdGenerator::new())),
            self.settings.unwrap_or_default(),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
