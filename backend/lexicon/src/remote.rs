use std::{collections::BTreeMap, fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{database::RedisBackend, firebase::FirebaseBackend};

/// Word -> definition markup. The whole map is the unit of persistence.
pub type HistoryDocument = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("history request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("history store answered {0}")]
    Status(reqwest::StatusCode),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("malformed history document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history store unavailable")]
    Unavailable,
}

/// Raw access to wherever the history document lives.
///
/// Backends only move the document around. Interpreting the payload and the
/// read-modify-write operations belong to [`RemoteDictionaryStore`].
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Fetch the stored payload as-is. An absent document is `Value::Null`.
    async fn get(&self) -> Result<Value, StoreError>;

    /// Replace the stored document.
    async fn put(&self, document: &HistoryDocument) -> Result<(), StoreError>;

    fn name(&self) -> &str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Firebase,
    Redis,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firebase" => Ok(Self::Firebase),
            "redis" => Ok(Self::Redis),
            other => Err(format!("unknown history backend '{other}' (expected firebase or redis)")),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Firebase => f.write_str("firebase"),
            Self::Redis => f.write_str("redis"),
        }
    }
}

/// Builds a store for `kind`. `key` is only meaningful for Redis.
pub async fn connect(
    kind: BackendKind,
    url: &str,
    key: &str,
) -> Result<RemoteDictionaryStore, StoreError> {
    let store = match kind {
        BackendKind::Firebase => RemoteDictionaryStore::new(FirebaseBackend::new(url)?),
        BackendKind::Redis => RemoteDictionaryStore::new(RedisBackend::connect(url, key).await?),
    };

    Ok(store)
}

#[derive(Clone)]
pub struct RemoteDictionaryStore {
    backend: Arc<dyn DocumentBackend>,
}

impl RemoteDictionaryStore {
    pub fn new(backend: impl DocumentBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Best-effort read: any failure degrades to an empty history.
    pub async fn read(&self) -> HistoryDocument {
        self.try_read().await.unwrap_or_else(|e| {
            warn!(backend = self.backend.name(), error = %e, "History read failed, treating as empty");
            HistoryDocument::new()
        })
    }

    /// Strict read: transport and status errors propagate, a non-object
    /// payload is still an empty history.
    pub async fn try_read(&self) -> Result<HistoryDocument, StoreError> {
        let payload = self.backend.get().await?;

        Ok(document_from_value(payload))
    }

    pub async fn write(&self, document: &HistoryDocument) -> Result<(), StoreError> {
        self.backend.put(document).await
    }

    /// Returns `false` when the word was already present. Not atomic: another
    /// writer may land between the read and the write.
    pub async fn add_if_absent(&self, word: &str, markup: &str) -> Result<bool, StoreError> {
        let mut document = self.try_read().await?;
        if document.contains_key(word) {
            return Ok(false);
        }

        document.insert(word.to_string(), markup.to_string());
        self.write(&document).await?;

        Ok(true)
    }

    pub async fn delete(&self, word: &str) -> Result<bool, StoreError> {
        let mut document = self.try_read().await?;
        if document.remove(word).is_none() {
            return Ok(false);
        }

        self.write(&document).await?;

        Ok(true)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.write(&HistoryDocument::new()).await
    }
}

/// Anything other than a JSON object is an empty history. String values are
/// kept, other values are dropped.
pub fn document_from_value(payload: Value) -> HistoryDocument {
    let Value::Object(entries) = payload else {
        if !payload.is_null() {
            warn!("History payload is not an object, ignoring it");
        }
        return HistoryDocument::new();
    };

    entries
        .into_iter()
        .filter_map(|(word, value)| match value {
            Value::String(markup) => Some((word, markup)),
            other => {
                debug!(word = %word, kind = ?other, "Skipping non-string history entry");
                None
            }
        })
        .collect()
}
