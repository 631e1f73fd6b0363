//! Session loader - builds a [`User`] from a bearer token.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::User;
use crate::error::SessionError;
use crate::ports::{IdentityApi, IdentityError};

/// Per-request bound on identity calls.
pub const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches profile, permissions and roles concurrently and merges them.
///
/// A failed profile fails the load. Failed permission or role requests
/// degrade to empty lists so a flaky RBAC endpoint does not sign the user out.
#[derive(Clone)]
pub struct SessionLoader {
    api: Arc<dyn IdentityApi>,
    timeout: Duration,
}

impl SessionLoader {
    pub fn new(api: Arc<dyn IdentityApi>) -> Self {
        Self {
            api,
            timeout: DEFAULT_IDENTITY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn load(&self, token: &str) -> Result<User, SessionError> {
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }

        let (profile, permissions, roles) = tokio::join!(
            self.bounded(self.api.fetch_profile(token)),
            self.bounded(self.api.fetch_permissions(token)),
            self.bounded(self.api.fetch_roles(token)),
        );

        let profile = profile.map_err(|e| {
            tracing::warn!(error = %e, "Profile request failed");
            SessionError::Profile(e)
        })?;

        let permissions = permissions.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Permissions request failed, continuing without permissions");
            Vec::new()
        });

        let roles = roles.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Roles request failed, continuing without roles");
            Vec::new()
        });

        tracing::debug!(
            user_id = %profile.id,
            permissions = permissions.len(),
            roles = roles.len(),
            "Session loaded"
        );

        Ok(User::from_parts(profile, permissions, roles))
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, IdentityError>>,
    ) -> Result<T, IdentityError> {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| IdentityError::Timeout(self.timeout))?
    }
}
