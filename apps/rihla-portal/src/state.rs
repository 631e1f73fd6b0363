//! Application state - shared across all handlers.

use std::sync::Arc;

use rihla_core::auth::{ServerVerifier, SessionLoader};
use rihla_core::ports::{IdentityApi, IdentityError};
use rihla_infra::HttpIdentityApi;

use crate::config::PortalConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub verifier: ServerVerifier,
}

impl AppState {
    /// Build the state around the HTTP identity client.
    pub fn new(config: &PortalConfig) -> Result<Self, IdentityError> {
        let api = HttpIdentityApi::new(config.identity.clone())?;

        tracing::info!(identity_api = %config.identity.base_url, "Application state initialized");

        Ok(Self::with_identity(Arc::new(api), config))
    }

    pub fn with_identity(api: Arc<dyn IdentityApi>, config: &PortalConfig) -> Self {
        let loader = SessionLoader::new(api).with_timeout(config.identity.timeout);
        Self {
            verifier: ServerVerifier::new(loader, config.routes.clone()),
        }
    }
}
