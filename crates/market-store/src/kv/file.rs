//! File backend
//!
//! The whole key space lives in one JSON object on disk. Every write is
//! flushed through a temporary file and renamed into place.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use super::{KeyValueStore, StoreError, StoreResult};

/// JSON-file backed store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
    // serializes flushes so the newest snapshot is written last
    flush_gate: Mutex<()>,
}

impl FileStore {
    /// Open (or create on first write) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => HashMap::new(),
            Ok(raw) => Self::decode(&path, &raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened file store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
            flush_gate: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Structured JSON values are embedded as-is so the file stays readable;
    // everything else, JSON string literals included, is kept as a JSON string.
    fn decode(path: &Path, raw: &str) -> StoreResult<HashMap<String, String>> {
        let Value::Object(map) = serde_json::from_str::<Value>(raw)? else {
            return Err(StoreError::InvalidLayout {
                path: path.display().to_string(),
            });
        };

        Ok(map
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect())
    }

    fn encode(entries: &HashMap<String, String>) -> StoreResult<String> {
        let mut map = Map::new();
        for (key, text) in entries {
            let value = match serde_json::from_str::<Value>(text) {
                Ok(Value::String(_)) | Err(_) => Value::String(text.clone()),
                Ok(structured) => structured,
            };
            map.insert(key.clone(), value);
        }
        Ok(serde_json::to_string_pretty(&Value::Object(map))?)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn flush(&self) -> StoreResult<()> {
        let _gate = self.flush_gate.lock().await;
        let payload = Self::encode(&self.entries.read())?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, payload.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(bytes = payload.len(), "Flushed file store");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        self.entries.write().insert(key.to_string(), value);
        self.flush().await
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        let existed = self.entries.write().remove(key).is_some();
        if existed {
            self.flush().await?;
        }
        Ok(existed)
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
