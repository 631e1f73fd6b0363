//! Redirect targets for failed authentication or authorization.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Where a denied request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRoutes {
    /// Login page; receives the return path as `?redirect=`.
    pub login_path: String,
    /// Destination when the user is signed in but lacks a role or permission.
    pub forbidden_path: String,
}

impl Default for AuthRoutes {
    fn default() -> Self {
        Self {
            login_path: "/auth/login".to_string(),
            forbidden_path: "/dashboard?error=insufficient_permissions".to_string(),
        }
    }
}

impl AuthRoutes {
    /// `<login_override ?? login_path>?redirect=<return_path>`
    pub fn login_redirect(&self, login_override: Option<&str>, return_path: Option<&str>) -> Redirect {
        let base = login_override.unwrap_or(&self.login_path);

        let location = match return_path {
            Some(path) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("redirect", path)
                    .finish();
                let separator = if base.contains('?') { '&' } else { '?' };
                format!("{base}{separator}{query}")
            }
            None => base.to_string(),
        };

        Redirect {
            location,
            reason: RedirectReason::Unauthenticated,
        }
    }

    pub fn forbidden_redirect(&self) -> Redirect {
        Redirect {
            location: self.forbidden_path.clone(),
            reason: RedirectReason::InsufficientPermissions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    Unauthenticated,
    InsufficientPermissions,
}

/// A navigation the calling layer must perform instead of producing content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub location: String,
    pub reason: RedirectReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_encodes_return_path() {
        let redirect = AuthRoutes::default().login_redirect(None, Some("/dashboard"));
        assert_eq!(redirect.location, "/auth/login?redirect=%2Fdashboard");
        assert_eq!(redirect.reason, RedirectReason::Unauthenticated);
    }

    #[test]
    fn test_login_override_with_existing_query() {
        let redirect =
            AuthRoutes::default().login_redirect(Some("/signin?lang=ar"), Some("/dashboard/places"));
        assert_eq!(
            redirect.location,
            "/signin?lang=ar&redirect=%2Fdashboard%2Fplaces"
        );
    }

    #[test]
    fn test_forbidden_redirect() {
        let redirect = AuthRoutes::default().forbidden_redirect();
        assert_eq!(redirect.location, "/dashboard?error=insufficient_permissions");
        assert_eq!(redirect.reason, RedirectReason::InsufficientPermissions);
    }
}
