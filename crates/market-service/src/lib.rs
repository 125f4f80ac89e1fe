//! # market-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod router;
pub mod services;
pub mod watcher;

pub use router::{View, ViewRouter};
pub use services::{
    AuthService, ChatSelection, ChatService, ListingService, MarketSettings, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
pub use watcher::CatalogWatcher;
