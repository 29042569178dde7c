//! # History Maintenance
//!
//! Offline jobs around the shared history document.
//!
//! ## Warm
//! Runs a list of words through the same cache-or-fetch path as the server,
//! so a new vocabulary list can be prepared before a lesson. Words already
//! in the history are skipped without a request. Failed fetches are not
//! written, same as the server.
//!
//! The history is read once up front, then each new word goes through
//! `add_if_absent`. A word added by the server in the meantime is counted as
//! cached, not overwritten.
//!
//! ## Export
//! Dumps the history as `[{word, definition}]` with the markup reduced to
//! plain text, ready for a spreadsheet import.
use std::{fs, path::PathBuf};

use anyhow::{Context, Error};
use indicatif::{ProgressBar, ProgressStyle};
use lexicon::{DefinitionSource, Outcome, RemoteDictionaryStore};
use tracing::warn;

pub mod models;
pub mod utils;

use models::WarmReport;
use utils::{default_export_path, export_entries, normalize_words, today};

pub async fn warm_history(
    store: &RemoteDictionaryStore,
    source: &dyn DefinitionSource,
    words: &[String],
) -> Result<WarmReport, Error> {
    let history = store.try_read().await.context("Failed to read history")?;
    println!("Loaded History: {} words\n", history.len());

    let words = normalize_words(words);

    let pb = ProgressBar::new(words.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    let mut report = WarmReport::default();

    for word in words {
        pb.set_message(format!("Fetching {word}"));

        if history.contains_key(&word) {
            report.cached += 1;
            pb.inc(1);
            continue;
        }

        let fetched = source.fetch(&word).await;
        if fetched.outcome == Outcome::Failed {
            warn!(word = %word, "Fetch failed: {}", fetched.markup);
            report.failed += 1;
            pb.inc(1);
            continue;
        }

        if store.add_if_absent(&word, &fetched.markup).await? {
            report.added += 1;
        } else {
            report.cached += 1;
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");

    println!("\nNew Words: {}", report.added);
    println!("Already Cached: {}", report.cached);
    println!("Failed: {}", report.failed);

    Ok(report)
}

pub async fn export_history(
    store: &RemoteDictionaryStore,
    out: Option<PathBuf>,
) -> Result<PathBuf, Error> {
    let history = store.try_read().await.context("Failed to read history")?;
    let entries = export_entries(&history);

    let path = out.unwrap_or_else(|| default_export_path(today()));
    fs::write(&path, serde_json::to_string_pretty(&entries)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported {} words to {}", entries.len(), path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use lexicon::{Fetched, memory::MemoryBackend};
    use serde_json::Value;

    use super::*;

    #[derive(Default)]
    struct FakeSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DefinitionSource for FakeSource {
        async fn fetch(&self, word: &str) -> Fetched {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let (markup, outcome) = if word == "panne" {
                ("A connection error occurred.".to_string(), Outcome::Failed)
            } else {
                (format!("<div id=\"definition\">{word}</div>"), Outcome::Found)
            };

            Fetched {
                markup,
                from_cache: false,
                outcome,
            }
        }
    }

    #[tokio::test]
    async fn test_warm_skips_cached_and_failed() {
        let backend = MemoryBackend::with_entries(&[("chat", "<p>chat</p>")]);
        let store = RemoteDictionaryStore::new(backend.clone());
        let source = FakeSource::default();

        let words: Vec<String> = ["Chat", "bon", "panne", "  ", "bon"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        let report = warm_history(&store, &source, &words).await.unwrap();

        assert_eq!(
            report,
            WarmReport {
                added: 1,
                cached: 2,
                failed: 1
            }
        );
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            report.added + report.cached + report.failed,
            normalize_words(&words).len()
        );

        let history = store.read().await;
        assert_eq!(history.len(), 2);
        assert!(!history.contains_key("panne"));
    }

    #[tokio::test]
    async fn test_export_writes_plain_text() {
        let backend = MemoryBackend::with_entries(&[("chat", "<div><b>Félin</b> domestique</div>")]);
        let store = RemoteDictionaryStore::new(backend);

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export.json");

        let path = export_history(&store, Some(out.clone())).await.unwrap();
        assert_eq!(path, out);

        let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!([{ "word": "chat", "definition": "Félin domestique" }])
        );
    }

    #[tokio::test]
    async fn test_export_fails_on_outage() {
        let backend = MemoryBackend::new();
        backend.set_unavailable(true);
        let store = RemoteDictionaryStore::new(backend);

        let dir = tempfile::tempdir().unwrap();

        assert!(export_history(&store, Some(dir.path().join("x.json"))).await.is_err());
    }
}
