//! Test helpers for integration tests
//!
//! Provides a market instance wired to a fresh store, plus shortcuts for
//! signing users up through the real verification flow.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use market_common::{AppConfig, StoreBackend};
use market_core::entities::User;
use market_core::DomainError;
use market_service::dto::{ConfirmCodeRequest, RequestCodeRequest};
use market_service::services::RolePolicy;
use market_service::{
    AuthService, ChatService, ListingService, MarketSettings, ServiceContext, ServiceError,
};
use market_store::{FileStore, LocalCodeProvider};

/// Country code used by every test phone number
pub const TEST_COUNTRY_CODE: &str = "+1";

/// Admin phone number registered in [`TestMarket::with_admin`]
pub const TEST_ADMIN_NUMBER: &str = "5550000001";

/// Marketplace instance over its own store
pub struct TestMarket {
    pub ctx: ServiceContext,
}

impl TestMarket {
    /// In-memory market with default settings (listings wait for review)
    pub fn start() -> Self {
        Self::start_with_settings(test_settings())
    }

    pub fn start_with_settings(settings: MarketSettings) -> Self {
        Self {
            ctx: ServiceContext::in_memory(settings),
        }
    }

    /// Market whose collections live in a JSON file
    pub fn start_on_file(path: &Path, settings: MarketSettings) -> Result<Self> {
        let store = FileStore::open(path).with_context(|| format!("opening {}", path.display()))?;
        let verifier = Arc::new(LocalCodeProvider::new(settings.otp_length));
        Ok(Self {
            ctx: ServiceContext::with_store(Arc::new(store), verifier, settings),
        })
    }

    /// Market built from configuration, the way the runner builds it
    pub fn start_with_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            ctx: ServiceContext::from_config(config)?,
        })
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.ctx)
    }

    pub fn listings(&self) -> ListingService<'_> {
        ListingService::new(&self.ctx)
    }

    pub fn chats(&self) -> ChatService<'_> {
        ChatService::new(&self.ctx)
    }

    /// Request a code and return the one the development provider surfaced
    pub async fn request_code(&self, number: &str) -> Result<String> {
        let response = self
            .auth()
            .request_code(RequestCodeRequest {
                country_code: TEST_COUNTRY_CODE.to_string(),
                phone_number: number.to_string(),
            })
            .await?;
        response.dev_code.context("provider did not surface a code")
    }

    pub async fn confirm(
        &self,
        number: &str,
        code: &str,
        username: Option<&str>,
    ) -> Result<User, ServiceError> {
        self.auth()
            .confirm_code(ConfirmCodeRequest {
                country_code: TEST_COUNTRY_CODE.to_string(),
                phone_number: number.to_string(),
                code: code.to_string(),
                username: username.map(String::from),
            })
            .await
    }

    /// Register (or log in) through the full verification flow
    pub async fn sign_up(&self, number: &str, username: &str) -> Result<User> {
        let code = self.request_code(number).await?;
        Ok(self.confirm(number, &code, Some(username)).await?)
    }

    /// Register the configured admin phone
    pub async fn sign_up_admin(&self) -> Result<User> {
        self.sign_up(TEST_ADMIN_NUMBER, "admin").await
    }
}

/// Default settings with the test admin phone on the allow-list
pub fn test_settings() -> MarketSettings {
    MarketSettings::default().with_role_policy(RolePolicy::from_admin_phones([format!(
        "{TEST_COUNTRY_CODE}{TEST_ADMIN_NUMBER}"
    )]))
}

/// In-memory configuration, optionally pointing the file backend at `path`
pub fn test_config(path: Option<&Path>) -> AppConfig {
    let mut config = AppConfig::default();
    if let Some(path) = path {
        config.store.backend = StoreBackend::File;
        config.store.path = path.to_path_buf();
    }
    config
}

/// Assert that a service call failed with a particular domain error
pub fn assert_domain_error<T: std::fmt::Debug>(
    result: Result<T, ServiceError>,
    expected: impl Fn(&DomainError) -> bool,
) {
    match result {
        Err(err) => assert!(
            err.as_domain().is_some_and(&expected),
            "unexpected error: {err:?}"
        ),
        Ok(value) => panic!("expected an error, got {value:?}"),
    }
}
