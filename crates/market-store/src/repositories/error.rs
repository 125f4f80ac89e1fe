//! Error handling utilities for repositories

use market_core::error::DomainError;
use market_core::value_objects::RecordId;

use crate::kv::StoreError;

/// Convert a store error to DomainError
pub fn map_store_error(e: StoreError) -> DomainError {
    e.into()
}

/// Create a "listing not found" error
pub fn listing_not_found(id: RecordId) -> DomainError {
    DomainError::ListingNotFound(id)
}

/// Create a "chat not found" error
pub fn chat_not_found(id: RecordId) -> DomainError {
    DomainError::ChatNotFound(id)
}

/// Error for inserting a record whose id is already present
pub fn duplicate_id(collection: &str, id: RecordId) -> DomainError {
    DomainError::StorageError(format!("{collection} already contains id {id}"))
}
