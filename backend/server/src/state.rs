use std::sync::Arc;

use anyhow::{Context, Error};
use lexicon::{DefinitionSource, Larousse, RemoteDictionaryStore, connect};
use tracing::{error, info};

#[cfg(feature = "translate")]
use super::translate::Translator;
use super::{
    config::Config, history::HistoryService, lookup::LookupService, search::AutocompleteIndex,
};

pub struct AppState {
    pub config: Config,
    pub lookup: LookupService,
    pub history: HistoryService,
    pub index: AutocompleteIndex,
    #[cfg(feature = "translate")]
    pub translator: Option<Translator>,
}

impl AppState {
    pub async fn new() -> Result<Arc<Self>, Error> {
        let config = Config::load()?;

        let store = connect(
            config.history_backend,
            &config.history_url,
            &config.history_key,
        )
        .await
        .with_context(|| format!("Failed to open {} history store", config.history_backend))?;
        info!(backend = store.backend_name(), "History store ready");

        let source = Larousse::new(&config.dictionary_url).context("Failed to build HTTP client")?;

        let index = AutocompleteIndex::load(&config.word_list_path).unwrap_or_else(|e| {
            error!("Autocomplete disabled: {e:#}");
            AutocompleteIndex::default()
        });
        info!(words = index.len(), "Autocomplete index loaded");

        #[cfg(feature = "translate")]
        let translator = Translator::from_config(&config.translate)
            .context("Failed to build translation client")?;

        let state = Self::from_parts(config, store, Arc::new(source), index);

        #[cfg(feature = "translate")]
        let state = state.with_translator(translator);

        Ok(Arc::new(state))
    }

    pub fn from_parts(
        config: Config,
        store: RemoteDictionaryStore,
        source: Arc<dyn DefinitionSource>,
        index: AutocompleteIndex,
    ) -> Self {
        Self {
            config,
            lookup: LookupService::new(store.clone(), source),
            history: HistoryService::new(store),
            index,
            #[cfg(feature = "translate")]
            translator: None,
        }
    }

    #[cfg(feature = "translate")]
    pub fn with_translator(self, translator: Option<Translator>) -> Self {
        Self { translator, ..self }
    }
}
