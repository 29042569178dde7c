use std::{fs::read_to_string, path::{Path, PathBuf}};

use anyhow::{Context, Error};
use chrono::{Local, NaiveDate};
use lexicon::{HistoryDocument, markup_text, normalize_word};

use crate::models::ExportEntry;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn default_export_path(date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("historique_{}.json", date.format("%Y-%m-%d")))
}

pub fn export_entries(document: &HistoryDocument) -> Vec<ExportEntry> {
    document
        .iter()
        .map(|(word, markup)| ExportEntry {
            word: word.clone(),
            definition: markup_text(markup),
        })
        .collect()
}

/// History keys for a word list, blanks dropped.
pub fn normalize_words(words: &[String]) -> Vec<String> {
    words.iter().filter_map(|word| normalize_word(word)).collect()
}

pub fn read_word_file(path: &Path) -> Result<Vec<String>, Error> {
    let content = read_to_string(path)
        .with_context(|| format!("Failed to read word file {}", path.display()))?;

    Ok(content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(normalize_word)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_entries() {
        let mut document = HistoryDocument::new();
        document.insert("chat".to_string(), "<div id=\"definition\">Félin</div>".to_string());
        document.insert("bon".to_string(), "<p>Qui convient</p>".to_string());
        document.insert(
            "et".to_string(),
            "<p>Tom &amp; Jerry&nbsp;&lt;3</p><script>var x = 1;</script>".to_string(),
        );

        let entries = export_entries(&document);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].word, "bon");
        assert_eq!(entries[0].definition, "Qui convient");
        assert_eq!(entries[1].definition, "Félin");
        assert_eq!(entries[2].word, "et");
        assert_eq!(entries[2].definition, "Tom & Jerry <3");
    }

    #[test]
    fn test_default_export_path() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();

        assert_eq!(
            default_export_path(date),
            PathBuf::from("historique_2025-03-09.json")
        );
    }

    #[test]
    fn test_normalize_words_drops_blanks() {
        let words: Vec<String> = ["  Chat ", "   ", "", "Bon"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        assert_eq!(normalize_words(&words), vec!["chat", "bon"]);
    }
}
