use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use anyhow::{Error, anyhow};
use lexicon::BackendKind;
use tracing::{info, warn};

const DEFAULT_PORT: &str = "5328";
const DEFAULT_HISTORY_BACKEND: &str = "firebase";
const DEFAULT_HISTORY_URL: &str = "http://127.0.0.1:9000/history.json";
const DEFAULT_HISTORY_KEY: &str = "history";
/// The table shipped with this crate, independent of the working directory.
const DEFAULT_WORD_LIST_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/dic.json");

#[cfg(feature = "translate")]
const DEFAULT_TRANSLATE_URL: &str = "https://api-free.deepl.com/v2/translate";
#[cfg(feature = "translate")]
const DEFAULT_TRANSLATE_TARGET: &str = "PT-BR";

pub struct Config {
    pub port: u16,
    pub history_backend: BackendKind,
    pub history_url: String,
    /// Redis key holding the document. Unused by Firebase.
    pub history_key: String,
    pub dictionary_url: String,
    pub word_list_path: PathBuf,
    #[cfg(feature = "translate")]
    pub translate: TranslateConfig,
}

#[cfg(feature = "translate")]
pub struct TranslateConfig {
    pub url: String,
    pub target: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        Ok(Self {
            port: try_load("RUST_PORT", DEFAULT_PORT)?,
            history_backend: try_load("HISTORY_BACKEND", DEFAULT_HISTORY_BACKEND)?,
            history_url: try_load("HISTORY_URL", DEFAULT_HISTORY_URL)?,
            history_key: try_load("HISTORY_KEY", DEFAULT_HISTORY_KEY)?,
            dictionary_url: try_load("DICTIONARY_URL", lexicon::larousse::DEFAULT_BASE_URL)?,
            word_list_path: try_load("WORD_LIST_PATH", DEFAULT_WORD_LIST_PATH)?,
            #[cfg(feature = "translate")]
            translate: TranslateConfig {
                url: try_load("TRANSLATE_URL", DEFAULT_TRANSLATE_URL)?,
                target: try_load("TRANSLATE_TARGET", DEFAULT_TRANSLATE_TARGET)?,
                api_key: read_secret("TRANSLATE_API_KEY"),
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5328,
            history_backend: BackendKind::Firebase,
            history_url: DEFAULT_HISTORY_URL.to_string(),
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            dictionary_url: lexicon::larousse::DEFAULT_BASE_URL.to_string(),
            word_list_path: PathBuf::from(DEFAULT_WORD_LIST_PATH),
            #[cfg(feature = "translate")]
            translate: TranslateConfig {
                url: DEFAULT_TRANSLATE_URL.to_string(),
                target: DEFAULT_TRANSLATE_TARGET.to_string(),
                api_key: None,
            },
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, Error>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("Environment misconfigured: {key}: {e}")
        })
}

/// Docker secret first, then an environment variable of the same name.
#[cfg_attr(not(feature = "translate"), allow(dead_code))]
fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    match read_to_string(&path) {
        Ok(secret) => Some(secret.trim().to_string()),
        Err(e) => {
            info!("Secret {secret_name} not readable from file ({e}), trying environment");
            var(secret_name).filter(|secret| !secret.trim().is_empty())
        }
    }
}
