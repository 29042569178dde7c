//! In-process backend for tests. Not selectable from configuration.
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use serde_json::Value;

use crate::remote::{DocumentBackend, HistoryDocument, StoreError};

#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    document: Mutex<Value>,
    unavailable: AtomicBool,
    gets: AtomicUsize,
    puts: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let backend = Self::new();
        let document: serde_json::Map<String, Value> = entries
            .iter()
            .map(|(word, markup)| (word.to_string(), Value::String(markup.to_string())))
            .collect();
        backend.set_payload(Value::Object(document));

        backend
    }

    /// Replace the stored payload without counting a write.
    pub fn set_payload(&self, payload: Value) {
        *self.inner.document.lock().unwrap_or_else(|e| e.into_inner()) = payload;
    }

    pub fn payload(&self) -> Value {
        self.inner
            .document
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// While set, every call fails with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn gets(&self) -> usize {
        self.inner.gets.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.inner.puts.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn get(&self) -> Result<Value, StoreError> {
        self.inner.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        Ok(self.payload())
    }

    async fn put(&self, document: &HistoryDocument) -> Result<(), StoreError> {
        self.inner.puts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.set_payload(serde_json::to_value(document)?);

        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
