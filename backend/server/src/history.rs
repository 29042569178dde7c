use lexicon::{HistoryDocument, RemoteDictionaryStore, StoreError};
use tracing::info;

#[derive(Clone)]
pub struct HistoryService {
    store: RemoteDictionaryStore,
}

impl HistoryService {
    pub fn new(store: RemoteDictionaryStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> HistoryDocument {
        self.store.read().await
    }

    /// `false` when the word was not in the history.
    pub async fn remove(&self, word: &str) -> Result<bool, StoreError> {
        let removed = self.store.delete(word).await?;
        if removed {
            info!(word, "Removed from history");
        }

        Ok(removed)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.clear().await?;
        info!("History cleared");

        Ok(())
    }
}
