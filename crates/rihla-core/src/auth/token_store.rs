//! Token store - durable storage is authoritative, the cookie is a mirror.

use std::sync::Arc;

use cookie::time::{Duration, OffsetDateTime};
use cookie::{Cookie, SameSite};

use crate::ports::{ContentRefresher, CookieJar, KeyValueStorage, StorageError};

/// Storage key and cookie name of the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Seven days.
pub const AUTH_COOKIE_MAX_AGE_SECS: i64 = 604_800;

/// Outcome of [`TokenStore::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing stored, nothing to mirror.
    NoToken,
    /// Cookie already matches storage.
    InSync,
    /// Cookie was rewritten from storage; `refreshed` tells whether the
    /// content refresh went through.
    Repaired { refreshed: bool },
}

/// Persists the bearer token and keeps its cookie mirror in step.
///
/// Every mutation writes storage first and then calls [`TokenStore::sync`];
/// the two writes are not transactional, and a crash in between leaves a
/// state that [`TokenStore::reconcile`] repairs.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
    cookies: Arc<dyn CookieJar>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, cookies: Arc<dyn CookieJar>) -> Self {
        Self { storage, cookies }
    }

    /// The stored token, or `None` when absent or when storage is unavailable.
    pub async fn get(&self) -> Option<String> {
        match self.storage.get(AUTH_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::debug!(error = %e, "Token storage not readable, treating as signed out");
                None
            }
        }
    }

    pub async fn set(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(AUTH_TOKEN_KEY, token).await?;
        self.sync().await
    }

    pub async fn remove(&self) -> Result<(), StorageError> {
        self.storage.remove(AUTH_TOKEN_KEY).await?;
        self.sync().await
    }

    /// Make the cookie reflect storage: mirror the token or expire the cookie.
    pub async fn sync(&self) -> Result<(), StorageError> {
        let cookie = match self.get().await {
            Some(token) => mirror_cookie(token),
            None => expired_cookie(),
        };
        self.cookies.set(cookie).await
    }

    /// Token as the request-time side would see it.
    pub async fn cookie_token(&self) -> Option<String> {
        match self.cookies.get(AUTH_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::debug!(error = %e, "Cookie jar not readable");
                None
            }
        }
    }

    /// Repair a cookie that went missing (or stale) while storage still holds
    /// a token, then refresh server-rendered content once.
    pub async fn reconcile(
        &self,
        refresher: &dyn ContentRefresher,
    ) -> Result<Reconciliation, StorageError> {
        let Some(token) = self.get().await else {
            return Ok(Reconciliation::NoToken);
        };

        if self.cookie_token().await.as_deref() == Some(token.as_str()) {
            return Ok(Reconciliation::InSync);
        }

        tracing::warn!("Auth cookie out of sync with storage, restoring it");
        self.sync().await?;

        let refreshed = match refresher.refresh().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Content refresh after cookie repair failed");
                false
            }
        };

        Ok(Reconciliation::Repaired { refreshed })
    }
}

fn mirror_cookie(token: String) -> Cookie<'static> {
    Cookie::build(AUTH_TOKEN_KEY, token)
        .path("/")
        .max_age(Duration::seconds(AUTH_COOKIE_MAX_AGE_SECS))
        .same_site(SameSite::Lax)
        .finish()
}

fn expired_cookie() -> Cookie<'static> {
    Cookie::build(AUTH_TOKEN_KEY, "")
        .path("/")
        .same_site(SameSite::Lax)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingRefresher, MemoryCookies, MemoryStorage};

    fn store() -> (TokenStore, Arc<MemoryStorage>, Arc<MemoryCookies>) {
        let storage = Arc::new(MemoryStorage::default());
        let cookies = Arc::new(MemoryCookies::default());
        (
            TokenStore::new(storage.clone(), cookies.clone()),
            storage,
            cookies,
        )
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let (tokens, _, _) = store();
        let token = "eyJhbGciOi.J9 ü/+=";

        tokens.set(token).await.unwrap();

        assert_eq!(tokens.get().await.as_deref(), Some(token));
        assert_eq!(tokens.cookie_token().await.as_deref(), Some(token));
    }

    #[tokio::test]
    async fn test_mirror_cookie_attributes() {
        let (tokens, _, cookies) = store();
        tokens.set("abc").await.unwrap();

        let cookie = cookies.last_written().unwrap();
        assert_eq!(cookie.name(), "authToken");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604_800)));
    }

    #[tokio::test]
    async fn test_remove_expires_cookie() {
        let (tokens, _, cookies) = store();
        tokens.set("abc").await.unwrap();

        tokens.remove().await.unwrap();

        assert_eq!(tokens.get().await, None);
        assert_eq!(tokens.cookie_token().await, None);
        let cookie = cookies.last_written().unwrap();
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
    }

    #[tokio::test]
    async fn test_unavailable_storage_reads_as_signed_out() {
        let tokens = TokenStore::new(
            Arc::new(MemoryStorage::unavailable()),
            Arc::new(MemoryCookies::default()),
        );

        assert_eq!(tokens.get().await, None);
        assert!(matches!(
            tokens.set("abc").await,
            Err(StorageError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn test_reconcile_repairs_missing_cookie_once() {
        let (tokens, storage, cookies) = store();
        storage.set(AUTH_TOKEN_KEY, "abc").await.unwrap();
        let refresher = CountingRefresher::default();

        let first = tokens.reconcile(&refresher).await.unwrap();
        let second = tokens.reconcile(&refresher).await.unwrap();

        assert_eq!(first, Reconciliation::Repaired { refreshed: true });
        assert_eq!(second, Reconciliation::InSync);
        assert_eq!(refresher.calls(), 1);
        assert_eq!(cookies.last_written().unwrap().value(), "abc");
    }

    #[tokio::test]
    async fn test_reconcile_after_cookie_cleared() {
        let (tokens, _, cookies) = store();
        tokens.set("abc").await.unwrap();
        cookies.clear(AUTH_TOKEN_KEY);
        let refresher = CountingRefresher::default();

        let outcome = tokens.reconcile(&refresher).await.unwrap();

        assert_eq!(outcome, Reconciliation::Repaired { refreshed: true });
        assert_eq!(tokens.cookie_token().await.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_reconcile_without_token_does_nothing() {
        let (tokens, _, _) = store();
        let refresher = CountingRefresher::default();

        assert_eq!(
            tokens.reconcile(&refresher).await.unwrap(),
            Reconciliation::NoToken
        );
        assert_eq!(refresher.calls(), 0);
    }
}
