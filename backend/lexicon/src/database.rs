//! # Redis
//!
//! Alternative home for the history document.
//!
//! The whole document is one JSON string under a single key, so the
//! semantics match Firebase exactly: `GET` the key, `SET` it back. No hash
//! per word, otherwise deletes and clears would stop being whole-document
//! rewrites.
use async_trait::async_trait;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use serde_json::Value;

use crate::remote::{DocumentBackend, HistoryDocument, StoreError};

pub struct RedisBackend {
    connection: ConnectionManager,
    key: String,
}

impl RedisBackend {
    pub async fn connect(redis_url: &str, key: &str) -> Result<Self, StoreError> {
        let connection = init_redis(redis_url).await?;

        Ok(Self {
            connection,
            key: key.to_string(),
        })
    }
}

pub async fn init_redis(redis_url: &str) -> Result<ConnectionManager, StoreError> {
    let config = ConnectionManagerConfig::new().set_number_of_retries(1);

    let client = Client::open(redis_url)?;
    let connection_manager = client.get_connection_manager_with_config(config).await?;

    Ok(connection_manager)
}

#[async_trait]
impl DocumentBackend for RedisBackend {
    async fn get(&self) -> Result<Value, StoreError> {
        let mut connection = self.connection.clone();
        let raw: Option<String> = connection.get(&self.key).await?;

        match raw {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Value::Null),
        }
    }

    async fn put(&self, document: &HistoryDocument) -> Result<(), StoreError> {
        let raw = serde_json::to_string(document)?;
        let mut connection = self.connection.clone();
        let _: () = connection.set(&self.key, raw).await?;

        Ok(())
    }

    fn name(&self) -> &str {
        "redis"
    }
}
