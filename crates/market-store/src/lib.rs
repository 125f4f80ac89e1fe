//! # market-store
//!
//! Local record store for the marketplace.
//!
//! ## Features
//!
//! - **Backends**: in-memory map or a single JSON file on disk
//! - **Collections**: typed JSON documents, one per storage key
//! - **Repositories**: implementations of the market-core repository traits
//! - **Events**: change notifications published after every write
//! - **Verification**: development code provider
//!
//! ## Example
//!
//! ```ignore
//! use market_store::{open_store, EventBus, KvUserRepository};
//!
//! let store = open_store(&config.store)?;
//! let events = EventBus::default();
//! let users = KvUserRepository::new(store.clone(), events.clone());
//!
//! let mut changes = events.subscribe();
//! users.create(&user).await?;
//! assert_eq!(changes.recv().await?.collection(), Some("users"));
//! ```

pub mod collection;
pub mod events;
pub mod keys;
pub mod kv;
pub mod provider;
pub mod repositories;

#[cfg(test)]
mod test_support;

pub use collection::{Collection, Document};
pub use events::{EventBus, DEFAULT_EVENT_CAPACITY};
pub use kv::{open_store, FileStore, KeyValueStore, MemoryStore, SharedStore, StoreError, StoreResult};
pub use provider::{LocalCodeProvider, DEFAULT_CODE_LENGTH};
pub use repositories::{
    KvChatRepository, KvListingRepository, KvMessageRepository, KvSessionRepository,
    KvSubmissionRepository, KvUserRepository,
};
