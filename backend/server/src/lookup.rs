//! # Lookup
//!
//! Cache-or-fetch for a single word.
//!
//! 1. Read the history document, return the stored markup on a hit
//! 2. Otherwise fetch from the dictionary and add the markup to the history
//!
//! The read in step 1 and the read-modify-write in step 2 are separate round
//! trips. Two lookups of the same unknown word can both fetch; the second
//! `add_if_absent` then reports the word as already present.
use std::sync::Arc;

use lexicon::{DefinitionSource, Outcome, RemoteDictionaryStore, extract_examples};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionResult {
    pub definition: String,
    pub examples: Vec<String>,
    pub from_cache: bool,
}

#[derive(Clone)]
pub struct LookupService {
    store: RemoteDictionaryStore,
    source: Arc<dyn DefinitionSource>,
}

impl LookupService {
    pub fn new(store: RemoteDictionaryStore, source: Arc<dyn DefinitionSource>) -> Self {
        Self { store, source }
    }

    /// `word` must already be normalized and non-empty.
    pub async fn lookup(&self, word: &str) -> DefinitionResult {
        let history = self.store.read().await;
        if let Some(markup) = history.get(word) {
            debug!(word, "History hit");

            return DefinitionResult {
                examples: extract_examples(markup),
                definition: markup.clone(),
                from_cache: true,
            };
        }

        debug!(word, "History miss, fetching");
        let fetched = self.source.fetch(word).await;

        if fetched.outcome == Outcome::Failed {
            warn!(word, "Not caching failed fetch");
        } else {
            match self.store.add_if_absent(word, &fetched.markup).await {
                Ok(true) => info!(word, outcome = ?fetched.outcome, "Added to history"),
                Ok(false) => debug!(word, "Already in history"),
                Err(e) => warn!(word, error = %e, "Failed to add definition to history"),
            }
        }

        DefinitionResult {
            examples: extract_examples(&fetched.markup),
            definition: fetched.markup,
            from_cache: fetched.from_cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use lexicon::{Fetched, memory::MemoryBackend};

    use super::*;

    const CHAT: &str = r#"<div id="definition"><span class="ExempleDefinition"> Le chat dort. </span></div>"#;

    struct FakeSource {
        calls: AtomicUsize,
        outcome: Outcome,
    }

    impl FakeSource {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DefinitionSource for FakeSource {
        async fn fetch(&self, _word: &str) -> Fetched {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let markup = match self.outcome {
                Outcome::Failed => "A connection error occurred.",
                _ => CHAT,
            };

            Fetched {
                markup: markup.to_string(),
                from_cache: false,
                outcome: self.outcome,
            }
        }
    }

    fn service(backend: &MemoryBackend, source: Arc<FakeSource>) -> LookupService {
        LookupService::new(RemoteDictionaryStore::new(backend.clone()), source)
    }

    #[tokio::test]
    async fn test_miss_fetches_once_then_hits() {
        let backend = MemoryBackend::new();
        let source = FakeSource::new(Outcome::Found);
        let lookup = service(&backend, source.clone());

        let first = lookup.lookup("chat").await;
        assert!(!first.from_cache);
        assert_eq!(first.examples, vec!["Le chat dort."]);
        assert_eq!(source.calls(), 1);
        assert_eq!(backend.puts(), 1);

        let second = lookup.lookup("chat").await;
        assert!(second.from_cache);
        assert_eq!(second.definition, first.definition);
        assert_eq!(second.examples, first.examples);
        assert_eq!(source.calls(), 1);
        assert_eq!(backend.puts(), 1);
    }

    #[tokio::test]
    async fn test_hit_skips_fetch() {
        let backend = MemoryBackend::with_entries(&[("chat", CHAT)]);
        let source = FakeSource::new(Outcome::Found);

        let result = service(&backend, source.clone()).lookup("chat").await;

        assert!(result.from_cache);
        assert_eq!(result.definition, CHAT);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_not_found_is_cached() {
        let backend = MemoryBackend::new();
        let source = FakeSource::new(Outcome::NotFound);
        let lookup = service(&backend, source.clone());

        lookup.lookup("xyzzy").await;
        lookup.lookup("xyzzy").await;

        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let backend = MemoryBackend::new();
        let source = FakeSource::new(Outcome::Failed);
        let lookup = service(&backend, source.clone());

        let result = lookup.lookup("chat").await;
        assert_eq!(result.definition, "A connection error occurred.");
        assert!(result.examples.is_empty());
        assert_eq!(backend.puts(), 0);

        lookup.lookup("chat").await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_store_outage_still_answers() {
        let backend = MemoryBackend::new();
        backend.set_unavailable(true);
        let source = FakeSource::new(Outcome::Found);

        let result = service(&backend, source.clone()).lookup("chat").await;

        assert!(!result.from_cache);
        assert_eq!(result.definition, CHAT);
        assert_eq!(source.calls(), 1);
    }
}
