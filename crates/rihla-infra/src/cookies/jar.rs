//! Cookie jar kept in a key-value storage, the way a browser keeps its own.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cookie::Cookie;
use serde::{Deserialize, Serialize};

use rihla_core::ports::{CookieJar, KeyValueStorage, StorageError};

const KEY_PREFIX: &str = "cookie:";

#[derive(Debug, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl StoredCookie {
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// A [`CookieJar`] persisted as JSON entries in any [`KeyValueStorage`].
///
/// `Max-Age` takes precedence over `Expires`, and a cookie that is already
/// expired when set deletes the entry, as `Set-Cookie` does in a browser.
pub struct StoredCookieJar {
    storage: Arc<dyn KeyValueStorage>,
}

impl StoredCookieJar {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    fn key(name: &str) -> String {
        format!("{KEY_PREFIX}{name}")
    }

    /// Every live cookie as a `Cookie` request header value.
    pub async fn header_value(&self, names: &[&str]) -> Result<Option<String>, StorageError> {
        let mut pairs = Vec::new();
        for name in names {
            if let Some(value) = self.get(name).await? {
                pairs.push(Cookie::new(*name, value).to_string());
            }
        }
        Ok((!pairs.is_empty()).then(|| pairs.join("; ")))
    }
}

fn expiry_of(cookie: &Cookie<'_>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if let Some(max_age) = cookie.max_age() {
        return Some(now + chrono::Duration::seconds(max_age.whole_seconds()));
    }

    cookie
        .expires_datetime()
        .and_then(|at| DateTime::<Utc>::from_timestamp(at.unix_timestamp(), 0))
}

#[async_trait]
impl CookieJar for StoredCookieJar {
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let key = Self::key(name);
        let Some(raw) = self.storage.get(&key).await? else {
            return Ok(None);
        };

        let stored: StoredCookie = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(cookie = name, error = %e, "Dropping unreadable cookie");
                self.storage.remove(&key).await?;
                return Ok(None);
            }
        };

        if stored.is_expired_at(Utc::now()) {
            self.storage.remove(&key).await?;
            return Ok(None);
        }

        Ok(Some(stored.value))
    }

    async fn set(&self, cookie: Cookie<'static>) -> Result<(), StorageError> {
        let key = Self::key(cookie.name());
        let stored = StoredCookie {
            value: cookie.value().to_string(),
            path: cookie.path().map(str::to_string),
            expires_at: expiry_of(&cookie, Utc::now()),
        };

        if stored.is_expired_at(Utc::now()) {
            tracing::debug!(cookie = cookie.name(), "Cookie expired on write, removing");
            return self.storage.remove(&key).await;
        }

        let raw = serde_json::to_string(&stored)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&key, &raw).await
    }
}
