//! Identity API port - the three endpoints a session is built from.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{UserProfile, UserRole};

/// Remote identity service, called with the user's bearer token.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// `GET /auth/me`
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, IdentityError>;

    /// `GET /rbac/my-permissions`, mapped to bare permission names.
    async fn fetch_permissions(&self, token: &str) -> Result<Vec<String>, IdentityError>;

    /// `GET /rbac/my-roles`
    async fn fetch_roles(&self, token: &str) -> Result<Vec<UserRole>, IdentityError>;
}

/// Identity API failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// 401/403: the token itself was refused.
    #[error("Token rejected with status {0}")]
    Rejected(u16),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}
