//! Typed JSON documents over a [`KeyValueStore`](crate::kv::KeyValueStore)
//!
//! A [`Collection`] is a JSON array under one key; a [`Document`] is a single
//! JSON value. Unreadable data is logged and treated as absent so that a
//! damaged key never locks the user out of the rest of the store.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::events::EventBus;
use crate::kv::{SharedStore, StoreResult};

/// JSON array stored under a single key
pub struct Collection<T> {
    store: SharedStore,
    key: &'static str,
    events: EventBus,
    // read-modify-write cycles on one key must not interleave
    write_lock: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            events: self.events.clone(),
            write_lock: Arc::clone(&self.write_lock),
            _marker: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(store: SharedStore, key: &'static str, events: EventBus) -> Self {
        Self {
            store,
            key,
            events,
            write_lock: Arc::new(Mutex::new(())),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Read the whole collection; missing or corrupt data reads as empty
    pub async fn load(&self) -> StoreResult<Vec<T>> {
        let Some(raw) = self.store.get(self.key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(error) => {
                warn!(key = self.key, %error, "Discarding unreadable collection");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the whole collection
    pub async fn save(&self, items: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(self.key, raw).await?;
        debug!(key = self.key, len = items.len(), "Saved collection");
        self.events.collection_changed(self.key);
        Ok(())
    }

    /// Read-modify-write under the collection's write lock
    pub async fn update<R, F>(&self, mutate: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> R + Send,
        R: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let result = mutate(&mut items);
        self.save(&items).await?;
        Ok(result)
    }

    /// Like [`Collection::update`], but nothing is written when `mutate` fails
    pub async fn try_update<R, E, F>(&self, mutate: F) -> StoreResult<Result<R, E>>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E> + Send,
        R: Send,
        E: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        match mutate(&mut items) {
            Ok(result) => {
                self.save(&items).await?;
                Ok(Ok(result))
            }
            Err(e) => Ok(Err(e)),
        }
    }
}

/// Single JSON value stored under a key
pub struct Document<T> {
    store: SharedStore,
    key: &'static str,
    events: EventBus,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Document<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            events: self.events.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> Document<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(store: SharedStore, key: &'static str, events: EventBus) -> Self {
        Self {
            store,
            key,
            events,
            _marker: PhantomData,
        }
    }

    pub async fn load(&self) -> StoreResult<Option<T>> {
        let Some(raw) = self.store.get(self.key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                warn!(key = self.key, %error, "Discarding unreadable document");
                Ok(None)
            }
        }
    }

    pub async fn save(&self, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(self.key, raw).await?;
        self.events.collection_changed(self.key);
        Ok(())
    }

    /// Remove the document; returns whether one was stored
    pub async fn clear(&self) -> StoreResult<bool> {
        let existed = self.store.remove(self.key).await?;
        if existed {
            self.events.collection_changed(self.key);
        }
        Ok(existed)
    }
}
