//! # Firebase
//!
//! Realtime Database REST access. The history lives at a single `.json`
//! URL; `GET` returns the object (or `null` when nothing was ever written)
//! and `PUT` replaces it.
//!
//! ```sh
//! curl https://<project>.firebaseio.com/history.json
//! ```
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::remote::{DocumentBackend, HistoryDocument, StoreError};

pub struct FirebaseBackend {
    client: Client,
    url: String,
}

impl FirebaseBackend {
    pub fn new(url: &str) -> Result<Self, StoreError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl DocumentBackend for FirebaseBackend {
    async fn get(&self) -> Result<Value, StoreError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn put(&self, document: &HistoryDocument) -> Result<(), StoreError> {
        let response = self.client.put(&self.url).json(document).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "firebase"
    }
}
