//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(other.to_string()),
        }
    }
}

/// Which key-value backend holds the collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(other.to_string()),
        }
    }
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Location of the JSON document for the file backend
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

/// Phone verification and role policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Full phone numbers (e.g. `+923432252006`) registered with the admin role
    #[serde(default)]
    pub admin_phones: Vec<String>,
    #[serde(default = "default_otp_ttl_secs")]
    pub otp_ttl_secs: u64,
    #[serde(default = "default_otp_length")]
    pub otp_length: usize,
}

impl AuthConfig {
    #[must_use]
    pub fn otp_ttl(&self) -> Duration {
        Duration::from_secs(self.otp_ttl_secs)
    }
}

/// Listing catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Publish seller submissions immediately instead of waiting for review
    #[serde(default)]
    pub auto_approve_listings: bool,
    #[serde(default = "default_refresh_secs")]
    pub refresh_interval_secs: u64,
    /// Destination number of the contact deep-link
    #[serde(default = "default_contact_phone")]
    pub contact_phone: String,
}

impl CatalogConfig {
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

// Default value functions
fn default_app_name() -> String {
    "account-market".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/market.json")
}

/// Upper bound for `MARKET_OTP_TTL_SECS` (one day)
pub const MAX_OTP_TTL_SECS: u64 = 86_400;

fn default_otp_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_otp_length() -> usize {
    6
}

fn default_refresh_secs() -> u64 {
    5
}

fn default_contact_phone() -> String {
    "923432252006".to_string()
}

fn default_admin_phones() -> Vec<String> {
    vec!["+923432252006".to_string()]
}

impl Default for AppConfig {
    /// In-memory development configuration
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                path: default_store_path(),
            },
            auth: AuthConfig {
                admin_phones: default_admin_phones(),
                otp_ttl_secs: default_otp_ttl_secs(),
                otp_length: default_otp_length(),
            },
            catalog: CatalogConfig {
                auto_approve_listings: false,
                refresh_interval_secs: default_refresh_secs(),
                contact_phone: default_contact_phone(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars.parse("APP_ENV")?.unwrap_or_default(),
            },
            store: StoreConfig {
                backend: vars.parse("MARKET_STORE_BACKEND")?.unwrap_or_default(),
                path: vars
                    .get("MARKET_STORE_PATH")
                    .map_or_else(default_store_path, PathBuf::from),
            },
            auth: AuthConfig {
                admin_phones: vars
                    .get("MARKET_ADMIN_PHONES")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|p| !p.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_else(default_admin_phones),
                otp_ttl_secs: match vars.parse::<u64>("MARKET_OTP_TTL_SECS")? {
                    Some(secs) if secs > MAX_OTP_TTL_SECS => {
                        return Err(ConfigError::InvalidValue(
                            "MARKET_OTP_TTL_SECS",
                            secs.to_string(),
                        ))
                    }
                    Some(secs) => secs,
                    None => default_otp_ttl_secs(),
                },
                otp_length: match vars.parse("MARKET_OTP_LENGTH")? {
                    Some(0) => {
                        return Err(ConfigError::InvalidValue(
                            "MARKET_OTP_LENGTH",
                            "0".to_string(),
                        ))
                    }
                    Some(len) => len,
                    None => default_otp_length(),
                },
            },
            catalog: CatalogConfig {
                auto_approve_listings: vars
                    .parse("MARKET_AUTO_APPROVE_LISTINGS")?
                    .unwrap_or(false),
                refresh_interval_secs: vars
                    .parse("MARKET_CATALOG_REFRESH_SECS")?
                    .unwrap_or_else(default_refresh_secs),
                contact_phone: vars
                    .get("MARKET_CONTACT_PHONE")
                    .unwrap_or_else(default_contact_phone),
            },
        })
    }
}

struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|v| !v.trim().is_empty())
    }

    fn parse<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, ConfigError> {
        match self.get(name) {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue(name, raw)),
            None => Ok(None),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
