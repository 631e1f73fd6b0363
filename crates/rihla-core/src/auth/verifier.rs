//! Request-time verification of the cookie-borne token.

use serde::Serialize;

use super::access::AccessRequirement;
use super::loader::SessionLoader;
use super::redirect::{AuthRoutes, Redirect};
use crate::domain::User;

/// Outcome of [`ServerVerifier::verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub is_authenticated: bool,
    pub user: Option<User>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Verification {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Verifies a request's token and gates content on roles and permissions.
///
/// Nothing here returns an error: missing or rejected credentials become an
/// anonymous [`Verification`] or a [`Redirect`] the HTTP layer must follow.
#[derive(Clone)]
pub struct ServerVerifier {
    loader: SessionLoader,
    routes: AuthRoutes,
}

impl ServerVerifier {
    pub fn new(loader: SessionLoader, routes: AuthRoutes) -> Self {
        Self { loader, routes }
    }

    pub fn routes(&self) -> &AuthRoutes {
        &self.routes
    }

    pub async fn verify(&self, cookie_token: Option<&str>) -> Verification {
        let Some(token) = cookie_token.filter(|t| !t.is_empty()) else {
            return Verification::anonymous();
        };

        match self.loader.load(token).await {
            Ok(user) => Verification {
                is_authenticated: true,
                user: Some(user),
                token: Some(token.to_string()),
            },
            Err(e) => {
                tracing::info!(error = %e, "Request token did not verify");
                Verification::anonymous()
            }
        }
    }

    /// Verify, then check `requirement`.
    ///
    /// Unauthenticated requests go to the login route (or the requirement's
    /// override) carrying `return_path`; authenticated requests that miss a
    /// role or permission go to the insufficient-permissions destination.
    pub async fn require(
        &self,
        cookie_token: Option<&str>,
        requirement: &AccessRequirement,
        return_path: Option<&str>,
    ) -> Result<User, Redirect> {
        let verification = self.verify(cookie_token).await;

        let user = match verification.user {
            Some(user) if verification.is_authenticated => user,
            _ => {
                return Err(self
                    .routes
                    .login_redirect(requirement.redirect_to.as_deref(), return_path));
            }
        };

        if !requirement.is_satisfied_by(&user) {
            tracing::info!(
                user_id = %user.id,
                required_roles = ?requirement.required_roles,
                required_permissions = ?requirement.required_permissions,
                "Access denied"
            );
            return Err(self.routes.forbidden_redirect());
        }

        Ok(user)
    }

    pub async fn require_auth(
        &self,
        cookie_token: Option<&str>,
        return_path: Option<&str>,
    ) -> Result<User, Redirect> {
        self.require(cookie_token, &AccessRequirement::authenticated(), return_path)
            .await
    }

    pub async fn require_role(
        &self,
        cookie_token: Option<&str>,
        role: &str,
        return_path: Option<&str>,
    ) -> Result<User, Redirect> {
        self.require(cookie_token, &AccessRequirement::roles([role]), return_path)
            .await
    }

    pub async fn require_any_role(
        &self,
        cookie_token: Option<&str>,
        roles: &[&str],
        return_path: Option<&str>,
    ) -> Result<User, Redirect> {
        self.require(
            cookie_token,
            &AccessRequirement::roles(roles.iter().copied()),
            return_path,
        )
        .await
    }

    pub async fn require_permission(
        &self,
        cookie_token: Option<&str>,
        permission: &str,
        return_path: Option<&str>,
    ) -> Result<User, Redirect> {
        self.require(
            cookie_token,
            &AccessRequirement::permissions([permission]),
            return_path,
        )
        .await
    }

    pub async fn require_any_permission(
        &self,
        cookie_token: Option<&str>,
        permissions: &[&str],
        return_path: Option<&str>,
    ) -> Result<User, Redirect> {
        self.require(
            cookie_token,
            &AccessRequirement::permissions(permissions.iter().copied()),
            return_path,
        )
        .await
    }
}
