//! Data transfer objects for service requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for user input
//! - Response DTOs for display layers
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ConfirmCodeRequest, CreateBroadcastRequest, RequestCodeRequest, SellerForm,
    SendMessageRequest,
};

pub use responses::{
    ChatSummary, CodeRequestResponse, DashboardStats, PublicUserResponse,
};

pub use mappers::{lenient_count, lenient_rate};
