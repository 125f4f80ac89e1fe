//! Runtime settings consumed by the services

use std::time::Duration;

use market_common::AppConfig;
use market_store::DEFAULT_CODE_LENGTH;

use super::policy::RolePolicy;

/// Knobs the services read on every call
#[derive(Debug, Clone)]
pub struct MarketSettings {
    pub role_policy: RolePolicy,
    /// Lifetime of an issued verification code
    pub otp_ttl: Duration,
    pub otp_length: usize,
    /// Publish seller submissions without admin review
    pub auto_approve_listings: bool,
    pub catalog_refresh: Duration,
    /// Number the contact deep-link opens a conversation with
    pub contact_phone: String,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for MarketSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            role_policy: RolePolicy::from_admin_phones(&config.auth.admin_phones),
            otp_ttl: config.auth.otp_ttl(),
            otp_length: if config.auth.otp_length == 0 {
                DEFAULT_CODE_LENGTH
            } else {
                config.auth.otp_length
            },
            auto_approve_listings: config.catalog.auto_approve_listings,
            catalog_refresh: config.catalog.refresh_interval(),
            contact_phone: config.catalog.contact_phone.clone(),
        }
    }
}

impl MarketSettings {
    #[must_use]
    pub fn with_auto_approve(mut self, enabled: bool) -> Self {
        self.auto_approve_listings = enabled;
        self
    }

    #[must_use]
    pub fn with_otp_ttl(mut self, ttl: Duration) -> Self {
        self.otp_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_role_policy(mut self, policy: RolePolicy) -> Self {
        self.role_policy = policy;
        self
    }
}
