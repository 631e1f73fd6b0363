//! Wires the client-side stores and clients from the command line.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rihla_core::auth::{AuthRoutes, AuthStore, SessionLoader, TokenStore};
use rihla_core::ports::{IdentityApi, KeyValueStorage};
use rihla_infra::{
    FileStorage, HttpContentRefresher, HttpIdentityApi, IdentityConfig, RedisConfig,
    RedisStorage, StoredCookieJar,
};

use crate::cli::{Cli, StorageBackend};

const STORAGE_FILE: &str = "storage.json";
const COOKIES_FILE: &str = "cookies.json";
const SESSION_PATH: &str = "/api/session";

/// Where the token and the cookie jar live.
pub struct ClientStorage {
    pub tokens: Arc<dyn KeyValueStorage>,
    pub cookies: Arc<dyn KeyValueStorage>,
}

impl ClientStorage {
    /// `storage.json` and `cookies.json` under `data_dir`.
    pub fn files(data_dir: &Path) -> Self {
        Self {
            tokens: Arc::new(FileStorage::new(data_dir.join(STORAGE_FILE))),
            cookies: Arc::new(FileStorage::new(data_dir.join(COOKIES_FILE))),
        }
    }

    /// One Redis keyspace for both; jar entries carry their own `cookie:` prefix.
    pub async fn redis(config: RedisConfig) -> Result<Self> {
        let url = config.url.clone();
        let storage: Arc<dyn KeyValueStorage> = Arc::new(
            RedisStorage::new(config)
                .await
                .with_context(|| format!("Failed to connect to Redis at {url}"))?,
        );
        Ok(Self {
            tokens: storage.clone(),
            cookies: storage,
        })
    }
}

pub struct ClientContext {
    pub store: AuthStore,
    pub refresher: Arc<HttpContentRefresher>,
    pub routes: AuthRoutes,
}

impl ClientContext {
    pub async fn from_cli(cli: &Cli) -> Result<Self> {
        let timeout = Duration::from_secs(cli.timeout_secs);

        let storage = match cli.storage {
            StorageBackend::File => {
                let data_dir = match &cli.data_dir {
                    Some(dir) => dir.clone(),
                    None => default_data_dir()?,
                };
                tracing::debug!(data_dir = %data_dir.display(), "Using file storage");
                ClientStorage::files(&data_dir)
            }
            StorageBackend::Redis => ClientStorage::redis(RedisConfig::from_env()).await?,
        };

        let api = HttpIdentityApi::new(IdentityConfig {
            base_url: cli.identity_url.clone(),
            timeout,
        })
        .context("Failed to build identity API client")?;

        let refresh_url = format!("{}{}", cli.portal_url.trim_end_matches('/'), SESSION_PATH);

        let routes = AuthRoutes {
            login_path: cli.login_path.clone(),
            ..AuthRoutes::default()
        };

        Self::build(storage, Arc::new(api), &refresh_url, timeout, routes)
    }

    pub fn build(
        storage: ClientStorage,
        api: Arc<dyn IdentityApi>,
        refresh_url: &str,
        timeout: Duration,
        routes: AuthRoutes,
    ) -> Result<Self> {
        let cookies = Arc::new(StoredCookieJar::new(storage.cookies));

        let tokens = TokenStore::new(storage.tokens, cookies.clone());
        let loader = SessionLoader::new(api).with_timeout(timeout);
        let refresher = Arc::new(
            HttpContentRefresher::new(refresh_url, cookies, timeout)
                .context("Failed to build portal client")?,
        );

        Ok(Self {
            store: AuthStore::new(tokens, loader).with_refresher(refresher.clone()),
            refresher,
            routes,
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("rihla"))
        .context("No platform data directory; pass --data-dir or set RIHLA_DATA_DIR")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_redis_is_an_error() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:9".to_string(),
            connect_timeout: Duration::from_secs(1),
            key_prefix: "rihla-test:".to_string(),
        };

        let err = ClientStorage::redis(config).await.err().unwrap();

        assert!(format!("{err:#}").contains("redis://127.0.0.1:9"));
    }
}
