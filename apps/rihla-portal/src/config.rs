//! Portal configuration loaded from environment variables.

use std::env;

use rihla_core::auth::AuthRoutes;
use rihla_infra::IdentityConfig;

/// Portal configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub host: String,
    pub port: u16,
    pub routes: AuthRoutes,
    pub identity: IdentityConfig,
}

impl PortalConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut routes = AuthRoutes::default();
        if let Ok(login_path) = env::var("LOGIN_PATH") {
            routes.login_path = login_path;
        }
        if let Ok(forbidden_path) = env::var("FORBIDDEN_PATH") {
            routes.forbidden_path = forbidden_path;
        }

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            routes,
            identity: IdentityConfig::from_env(),
        }
    }
}
