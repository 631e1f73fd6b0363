//! reqwest client for the identity API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde::de::DeserializeOwned;

use rihla_core::domain::{UserProfile, UserRole};
use rihla_core::ports::{IdentityApi, IdentityError};
use rihla_shared::ApiResponse;
use rihla_shared::dto::{PermissionEntry, ProfileResponse, UserRoleEntry};

use super::mapping::{permissions_from_dto, profile_from_dto, role_from_dto};

/// Identity API connection configuration.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL the endpoint paths are appended to (e.g. http://localhost:8000/api)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl IdentityConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("IDENTITY_API_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("IDENTITY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// [`IdentityApi`] over HTTP.
///
/// Every request carries the bearer token and asks intermediaries not to
/// serve a cached answer, so authorization decisions never see stale data.
#[derive(Clone)]
pub struct HttpIdentityApi {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpIdentityApi {
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    pub fn from_env() -> Result<Self, IdentityError> {
        Self::new(IdentityConfig::from_env())
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, IdentityError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IdentityError::Timeout(self.timeout)
                } else {
                    IdentityError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(IdentityError::Rejected(status.as_u16()));
        }
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Identity API returned an error");
            return Err(IdentityError::Status(status.as_u16()));
        }

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))?;

        Ok(body.data)
    }
}

#[async_trait]
impl IdentityApi for HttpIdentityApi {
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, IdentityError> {
        let data: ProfileResponse = self.get_data("/auth/me", token).await?;
        Ok(profile_from_dto(data.user))
    }

    async fn fetch_permissions(&self, token: &str) -> Result<Vec<String>, IdentityError> {
        let data: Vec<PermissionEntry> = self.get_data("/rbac/my-permissions", token).await?;
        Ok(permissions_from_dto(data))
    }

    async fn fetch_roles(&self, token: &str) -> Result<Vec<UserRole>, IdentityError> {
        let data: Vec<UserRoleEntry> = self.get_data("/rbac/my-roles", token).await?;
        Ok(data.into_iter().map(role_from_dto).collect())
    }
}
