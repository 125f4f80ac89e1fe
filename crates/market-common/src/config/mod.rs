//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AuthConfig, CatalogConfig, ConfigError, Environment,
    StoreBackend, StoreConfig,
};
