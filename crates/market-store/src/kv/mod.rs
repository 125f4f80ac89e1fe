//! Key-value backends
//!
//! The marketplace keeps every collection as one JSON document under a fixed
//! key. Backends only move strings; typing happens in [`crate::collection`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use market_common::{StoreBackend, StoreConfig};
use market_core::DomainError;
use std::sync::Arc;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store file {path} is not a JSON object")]
    InvalidLayout { path: String },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialization(e) => DomainError::SerializationError(e.to_string()),
            other => DomainError::StorageError(other.to_string()),
        }
    }
}

/// String key-value storage
///
/// Values read back exactly as written, except that the file backend returns
/// structured JSON (objects, arrays, numbers, booleans, null) in compact form.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> StoreResult<()>;

    /// Remove a key; returns whether it existed
    async fn remove(&self, key: &str) -> StoreResult<bool>;

    async fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Shared handle to a store backend
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Open the backend named by the configuration
pub fn open_store(config: &StoreConfig) -> StoreResult<SharedStore> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::File => Ok(Arc::new(FileStore::open(&config.path)?)),
    }
}
