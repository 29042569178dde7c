//! # Autocomplete
//!
//! Word suggestions for the search box.
//!
//!
//!
//! ## Source
//! - Static JSON table, word -> definition, bundled with the server
//! - Only the keys are kept, in file order
//! - Loaded once at startup, never reloaded or mutated
//!
//!
//!
//! ## Query
//! A linear scan over the word list. Terms under two characters return
//! nothing without scanning, since the front end fires a request on every
//! keystroke. Matching is a case-insensitive prefix test and results keep
//! the table's order, cut at ten.
//!
//! A scan over a few tens of thousands of short strings is cheap. A trie or
//! a search engine would only pay off with fuzzy matching, which is not
//! offered.
use std::{fs::read_to_string, path::Path};

use anyhow::{Context, Error};
use serde_json::{Map, Value};

pub const MIN_TERM_CHARS: usize = 2;
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Default)]
pub struct AutocompleteIndex {
    words: Vec<String>,
    folded: Vec<String>,
}

impl AutocompleteIndex {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;

        Self::from_json(&raw).with_context(|| format!("Invalid word list {}", path.display()))
    }

    /// Keys of a JSON object, in document order.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let table: Map<String, Value> = serde_json::from_str(raw)?;

        Ok(Self::from_words(table.into_iter().map(|(word, _)| word)))
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let folded = words.iter().map(|word| word.to_lowercase()).collect();

        Self { words, folded }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn suggest(&self, term: &str) -> Vec<String> {
        if term.chars().count() < MIN_TERM_CHARS {
            return Vec::new();
        }

        let term = term.to_lowercase();

        self.folded
            .iter()
            .zip(&self.words)
            .filter(|(folded, _)| folded.starts_with(&term))
            .map(|(_, word)| word.clone())
            .take(MAX_SUGGESTIONS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_terms() {
        let index = AutocompleteIndex::from_words(["bon", "bonjour", "chat"]);

        assert!(index.suggest("").is_empty());
        assert!(index.suggest("a").is_empty());
        assert!(index.suggest("b").is_empty());
        assert!(index.suggest("é").is_empty());
    }

    #[test]
    fn test_prefix_in_index_order() {
        let index = AutocompleteIndex::from_words(["bon", "bonjour", "chat"]);

        assert_eq!(index.suggest("bo"), vec!["bon", "bonjour"]);
        assert_eq!(index.suggest("cha"), vec!["chat"]);
        assert!(index.suggest("chien").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let index = AutocompleteIndex::from_words(["Paris", "parler", "Été", "étude"]);

        assert_eq!(index.suggest("PA"), vec!["Paris", "parler"]);
        assert_eq!(index.suggest("ét"), vec!["Été", "étude"]);
    }

    #[test]
    fn test_capped_at_ten() {
        let words: Vec<String> = (0..25).map(|i| format!("mot{i:02}")).collect();
        let index = AutocompleteIndex::from_words(words);

        let suggestions = index.suggest("mo");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions.first().map(String::as_str), Some("mot00"));
        assert_eq!(suggestions.last().map(String::as_str), Some("mot09"));
    }

    #[test]
    fn test_from_json_keeps_file_order() {
        let index = AutocompleteIndex::from_json(
            r#"{ "zèbre": "animal", "abeille": "insecte", "zéro": "nombre" }"#,
        )
        .unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.suggest("zè"), vec!["zèbre"]);
        assert_eq!(index.suggest("z"), Vec::<String>::new());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(AutocompleteIndex::from_json("[\"chat\"]").is_err());
    }

    #[test]
    fn test_bundled_table_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/dic.json");
        let index = AutocompleteIndex::load(&path).unwrap();

        assert!(!index.is_empty());
        assert!(!index.suggest("bo").is_empty());
    }
}
