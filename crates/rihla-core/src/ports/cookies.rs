use async_trait::async_trait;
use cookie::Cookie;

use super::StorageError;

/// The client-side cookie jar that request-time code reads from.
#[async_trait]
pub trait CookieJar: Send + Sync {
    /// Current value of a cookie, `None` when absent or expired.
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Apply a cookie the way a browser applies `Set-Cookie`: a cookie whose
    /// expiry is in the past (or whose max-age is zero) deletes the entry.
    async fn set(&self, cookie: Cookie<'static>) -> Result<(), StorageError>;
}
