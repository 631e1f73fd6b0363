use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role that implies every permission.
pub const SUPER_ADMIN: &str = "super_admin";

/// A role definition as attached to an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub is_active: bool,
}

/// Assignment of a role to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub id: String,
    pub assigned_at: Option<DateTime<Utc>>,
    pub assigned_by: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub role: RoleDefinition,
}

impl UserRole {
    /// Whether this assignment grants its role at `now`.
    ///
    /// Both the assignment and the definition must be active, and an
    /// assignment past its `expires_at` no longer counts.
    pub fn is_held_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.role.is_active
            && self.expires_at.map_or(true, |expires| expires > now)
    }

    pub fn is_held(&self) -> bool {
        self.is_held_at(Utc::now())
    }

    pub fn name(&self) -> &str {
        &self.role.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn assignment(is_active: bool, role_active: bool) -> UserRole {
        UserRole {
            id: "1".to_string(),
            assigned_at: None,
            assigned_by: None,
            expires_at: None,
            is_active,
            role: RoleDefinition {
                id: "10".to_string(),
                name: "editor".to_string(),
                display_name: Some("Editor".to_string()),
                is_active: role_active,
            },
        }
    }

    #[test]
    fn test_held_requires_both_flags() {
        assert!(assignment(true, true).is_held());
        assert!(!assignment(false, true).is_held());
        assert!(!assignment(true, false).is_held());
        assert!(!assignment(false, false).is_held());
    }

    #[test]
    fn test_expired_assignment_is_not_held() {
        let now = Utc::now();
        let mut role = assignment(true, true);

        role.expires_at = Some(now - TimeDelta::minutes(1));
        assert!(!role.is_held_at(now));

        role.expires_at = Some(now + TimeDelta::days(30));
        assert!(role.is_held_at(now));
    }
}
