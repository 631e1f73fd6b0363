use serde::{Deserialize, Serialize};

use crate::domain::User;

/// What a guarded boundary asks of the current user.
///
/// Empty lists impose no constraint. With `require_all` every listed role and
/// every listed permission must be held; otherwise one of each list suffices.
/// When both lists are given, both checks must pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    #[serde(default)]
    pub required_roles: Vec<String>,
    #[serde(default)]
    pub required_permissions: Vec<String>,
    #[serde(default)]
    pub require_all: bool,
    /// Login page override for redirects produced from this requirement.
    #[serde(default)]
    pub redirect_to: Option<String>,
}

impl AccessRequirement {
    /// Signed in, nothing else.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_roles: roles.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_permissions: permissions.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn and_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn require_all(mut self) -> Self {
        self.require_all = true;
        self
    }

    pub fn with_redirect(mut self, login_path: impl Into<String>) -> Self {
        self.redirect_to = Some(login_path.into());
        self
    }

    pub fn is_satisfied_by(&self, user: &User) -> bool {
        let roles_ok = self.required_roles.is_empty()
            || if self.require_all {
                user.has_all_roles(&self.required_roles)
            } else {
                user.has_any_role(&self.required_roles)
            };

        let permissions_ok = self.required_permissions.is_empty()
            || if self.require_all {
                user.has_all_permissions(&self.required_permissions)
            } else {
                user.has_any_permission(&self.required_permissions)
            };

        roles_ok && permissions_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{role, user_with};

    #[test]
    fn test_require_all_denies_partial_permissions() {
        let user = user_with(vec![], vec!["can_view_place".to_string()]);
        let requirement =
            AccessRequirement::permissions(["can_view_place", "can_edit_place"]).require_all();

        assert!(!requirement.is_satisfied_by(&user));
    }

    #[test]
    fn test_any_of_accepts_partial_permissions() {
        let user = user_with(vec![], vec!["can_view_place".to_string()]);
        let requirement = AccessRequirement::permissions(["can_view_place", "can_edit_place"]);

        assert!(requirement.is_satisfied_by(&user));
    }

    #[test]
    fn test_roles_and_permissions_both_checked() {
        let user = user_with(vec![role("editor", true, true)], vec![]);
        let requirement =
            AccessRequirement::roles(["editor"]).and_permissions(["can_manage_list"]);

        assert!(!requirement.is_satisfied_by(&user));
    }

    #[test]
    fn test_empty_requirement_only_needs_a_user() {
        let user = user_with(vec![], vec![]);
        assert!(AccessRequirement::authenticated().is_satisfied_by(&user));
    }

    #[test]
    fn test_deserializes_route_contract() {
        let requirement: AccessRequirement = serde_json::from_str(
            r#"{"required_roles":["admin","super_admin"],"redirect_to":"/auth/login"}"#,
        )
        .unwrap();

        assert_eq!(requirement.required_roles, vec!["admin", "super_admin"]);
        assert!(!requirement.require_all);
        assert_eq!(requirement.redirect_to.as_deref(), Some("/auth/login"));
    }
}
