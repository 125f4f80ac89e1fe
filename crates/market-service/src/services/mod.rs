//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod chat;
pub mod context;
pub mod error;
pub mod listing;
pub mod policy;
pub mod search;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use auth::AuthService;
pub use chat::{ChatSelection, ChatService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use listing::ListingService;
pub use policy::RolePolicy;
pub use search::{format_count, format_thousands, ListingFilters, SortOrder};
pub use settings::MarketSettings;
