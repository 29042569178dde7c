//! # Translation
//!
//! Pass-through to a DeepL-compatible endpoint, compiled with the
//! `translate` feature. The API key comes from configuration only.
//!
//! Definitions are HTML, so the provider is asked to keep the tags.
use reqwest::{Client, header::AUTHORIZATION};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TranslateConfig;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation provider returned no text")]
    Empty,
}

#[derive(Serialize)]
struct ProviderRequest<'a> {
    text: [&'a str; 1],
    target_lang: &'a str,
    tag_handling: &'static str,
}

#[derive(Deserialize)]
struct ProviderResponse {
    translations: Vec<ProviderTranslation>,
}

#[derive(Deserialize)]
struct ProviderTranslation {
    text: String,
}

pub struct Translator {
    client: Client,
    url: String,
    api_key: String,
    default_target: String,
}

impl Translator {
    pub fn new(url: &str, api_key: &str, default_target: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            url: url.to_string(),
            api_key: api_key.to_string(),
            default_target: default_target.to_string(),
        })
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &TranslateConfig) -> Result<Option<Self>, reqwest::Error> {
        match &config.api_key {
            Some(api_key) => Ok(Some(Self::new(&config.url, api_key, &config.target)?)),
            None => {
                warn!("TRANSLATE_API_KEY not provided, /api/translate will answer 503");
                Ok(None)
            }
        }
    }

    pub fn default_target(&self) -> &str {
        &self.default_target
    }

    pub async fn translate(&self, text: &str, target_locale: &str) -> Result<String, TranslateError> {
        debug!(target_locale, chars = text.len(), "Translating");

        let response: ProviderResponse = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.api_key))
            .json(&ProviderRequest {
                text: [text],
                target_lang: target_locale,
                tag_handling: "html",
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .translations
            .into_iter()
            .next()
            .map(|translation| translation.text)
            .ok_or(TranslateError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;

    async fn provider(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some("DeepL-Auth-Key secret") {
            return (StatusCode::FORBIDDEN, Json(json!({})));
        }

        let text = body["text"][0].as_str().unwrap_or_default();
        let target = body["target_lang"].as_str().unwrap_or_default();

        (
            StatusCode::OK,
            Json(json!({ "translations": [{ "text": format!("[{target}] {text}") }] })),
        )
    }

    async fn serve() -> String {
        let app = Router::new().route("/v2/translate", post(provider));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        format!("http://{address}/v2/translate")
    }

    #[tokio::test]
    async fn test_translate() {
        let url = serve().await;
        let translator = Translator::new(&url, "secret", "PT-BR").unwrap();

        let translation = translator.translate("<p>chat</p>", "EN").await.unwrap();

        assert_eq!(translation, "[EN] <p>chat</p>");
    }

    #[tokio::test]
    async fn test_rejected_key() {
        let url = serve().await;
        let translator = Translator::new(&url, "wrong", "PT-BR").unwrap();

        assert!(matches!(
            translator.translate("chat", "EN").await,
            Err(TranslateError::Http(_))
        ));
    }

    #[test]
    fn test_no_key_disables() {
        let config = TranslateConfig {
            url: "http://localhost".to_string(),
            target: "PT-BR".to_string(),
            api_key: None,
        };

        assert!(Translator::from_config(&config).unwrap().is_none());
    }
}
