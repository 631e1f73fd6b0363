//! Redis storage - shares client state between processes and machines.
//! Selected in the CLI with `--storage redis`.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use rihla_core::ports::{KeyValueStorage, StorageError};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    pub connect_timeout: Duration,
    /// Prepended to every key, e.g. `rihla:`.
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            key_prefix: "rihla:".to_string(),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connect_timeout: std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            key_prefix: std::env::var("REDIS_KEY_PREFIX").unwrap_or(defaults.key_prefix),
        }
    }
}

/// Redis-backed key-value storage.
///
/// Uses a connection manager for automatic reconnection.
pub struct RedisStorage {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisStorage {
    pub async fn new(config: RedisConfig) -> Result<Self, StorageError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| StorageError::Backend(e.to_string()))?;

        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StorageError::Unavailable)?
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis storage");

        Ok(Self {
            conn,
            key_prefix: config.key_prefix,
        })
    }

    pub async fn from_env() -> Result<Self, StorageError> {
        Self::new(RedisConfig::from_env()).await
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl KeyValueStorage for RedisStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(self.key(key))
            .await
            .map_err(|e| {
                tracing::warn!(key = %key, error = %e, "Redis GET failed");
                StorageError::Backend(e.to_string())
            })
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.key(key), value)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.key(key))
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_storage() -> Option<RedisStorage> {
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
            key_prefix: "rihla-test:".to_string(),
        };

        RedisStorage::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_storage_set_get_remove() {
        let storage = match get_test_storage().await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        storage.set("authToken", "abc").await.unwrap();
        assert_eq!(
            storage.get("authToken").await.unwrap(),
            Some("abc".to_string())
        );

        storage.remove("authToken").await.unwrap();
        assert_eq!(storage.get("authToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_refused_connection_is_backend_error() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:9".to_string(),
            connect_timeout: Duration::from_secs(2),
            key_prefix: "rihla-test:".to_string(),
        };

        assert!(matches!(
            RedisStorage::new(config).await,
            Err(StorageError::Backend(_) | StorageError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_connecting() {
        let config = RedisConfig {
            url: "not a url".to_string(),
            ..RedisConfig::default()
        };

        assert!(matches!(
            RedisStorage::new(config).await,
            Err(StorageError::Backend(_))
        ));
    }
}
