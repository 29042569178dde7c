//! # Larousse
//!
//! Definition source. One page per word, no retry.
//!
//! ## Page layout
//! - `div#definition` holds the entry when the word exists
//! - `section.corrector` holds the "did you mean" list when it does not
//! - Anything else gets the bare "no result" banner
use std::sync::LazyLock;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, error, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.larousse.fr/dictionnaires/francais/";

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3770.142 Safari/537.36";

pub const NOT_RESULT: &str = "<h1 style='color:#ff0422;text-align:center'>Aucun résultat trouvé</h1>";

pub const CONNECTION_ERROR: &str = "A connection error occurred.";
pub const FETCH_ERROR: &str = "An error occurred while fetching the definition.";

static DEFINITION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#definition").expect("static selector"));
static CORRECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.corrector").expect("static selector"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found,
    /// No entry, but the site proposed close spellings.
    Suggestions,
    NotFound,
    /// Transport failure; the markup is an error message, not a page.
    Failed,
}

#[derive(Clone, Debug)]
pub struct Fetched {
    pub markup: String,
    /// Always `false` here. Only the caller knows about the history.
    pub from_cache: bool,
    pub outcome: Outcome,
}

impl Fetched {
    fn new(markup: String, outcome: Outcome) -> Self {
        Self {
            markup,
            from_cache: false,
            outcome,
        }
    }

    fn failed(message: &str) -> Self {
        Self::new(message.to_string(), Outcome::Failed)
    }
}

#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn fetch(&self, word: &str) -> Fetched;
}

pub struct Larousse {
    client: Client,
    base_url: String,
}

impl Larousse {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self { client, base_url })
    }

    pub fn locator(&self, word: &str) -> String {
        format!("{}{}", self.base_url, urlencoding::encode(&word.to_lowercase()))
    }

    async fn download(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?;

        response.text().await
    }
}

#[async_trait]
impl DefinitionSource for Larousse {
    async fn fetch(&self, word: &str) -> Fetched {
        let url = self.locator(word);
        debug!(url = %url, "Fetching definition");

        match self.download(&url).await {
            Ok(page) => {
                let (markup, outcome) = parse_page(&page);
                Fetched::new(markup, outcome)
            }
            Err(e) if e.is_connect() || e.is_timeout() => {
                warn!(url = %url, error = %e, "Dictionary unreachable");
                Fetched::failed(CONNECTION_ERROR)
            }
            Err(e) => {
                error!(url = %url, error = %e, "Definition fetch failed");
                Fetched::failed(FETCH_ERROR)
            }
        }
    }
}

/// Picks the definition container out of a full page.
pub fn parse_page(page: &str) -> (String, Outcome) {
    let document = Html::parse_document(page);

    if let Some(definition) = document.select(&DEFINITION).next() {
        return (definition.html(), Outcome::Found);
    }

    match document.select(&CORRECTOR).next() {
        Some(corrector) => (format!("{NOT_RESULT}{}", corrector.html()), Outcome::Suggestions),
        None => (NOT_RESULT.to_string(), Outcome::NotFound),
    }
}
