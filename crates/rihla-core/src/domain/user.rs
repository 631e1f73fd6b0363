use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::{SUPER_ADMIN, UserRole};

/// Profile part of a user, as returned by the identity API's `me` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub user_type: Option<String>,
    pub provider: Option<String>,
    pub is_verified: bool,
}

/// The signed-in user: profile merged with roles and permissions.
///
/// Never persisted. It is rebuilt from the bearer token on every load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub user_type: Option<String>,
    pub provider: Option<String>,
    pub is_verified: bool,
    pub roles: Vec<UserRole>,
    pub permissions: Vec<String>,
}

impl User {
    /// Merge the three identity responses into one record.
    pub fn from_parts(profile: UserProfile, permissions: Vec<String>, roles: Vec<UserRole>) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            full_name: profile.full_name,
            profile_picture: profile.profile_picture,
            user_type: profile.user_type,
            provider: profile.provider,
            is_verified: profile.is_verified,
            roles,
            permissions,
        }
    }

    /// Name to show in the UI: full name, then first + last, then username.
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return full.to_string();
        }

        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            self.username.clone()
        } else {
            joined
        }
    }

    /// Names of the roles currently held at `now`.
    pub fn held_roles_at(&self, now: DateTime<Utc>) -> impl Iterator<Item = &str> {
        self.roles
            .iter()
            .filter(move |r| r.is_held_at(now))
            .map(UserRole::name)
    }

    pub fn has_role(&self, name: &str) -> bool {
        let now = Utc::now();
        self.held_roles_at(now).any(|held| held == name)
    }

    pub fn has_any_role<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|name| self.has_role(name.as_ref()))
    }

    pub fn has_all_roles<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().all(|name| self.has_role(name.as_ref()))
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(SUPER_ADMIN)
    }

    /// `super_admin` holds every permission regardless of the flat list.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_super_admin() || self.permissions.iter().any(|p| p == permission)
    }

    pub fn has_any_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        self.is_super_admin()
            || permissions
                .iter()
                .any(|p| self.permissions.iter().any(|held| held == p.as_ref()))
    }

    pub fn has_all_permissions<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        self.is_super_admin()
            || permissions
                .iter()
                .all(|p| self.permissions.iter().any(|held| held == p.as_ref()))
    }
}
