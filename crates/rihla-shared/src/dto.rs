//! Data Transfer Objects - the identity API payloads as they arrive on the wire.
//!
//! The backend mixes snake_case and camelCase depending on the serializer that
//! produced the payload, so profile fields accept both spellings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier that may be sent either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{n}"),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

/// `GET /auth/me` → `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: ProfileUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUser {
    pub id: WireId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(default, alias = "fullName")]
    pub full_name: Option<String>,
    #[serde(default, alias = "profilePicture")]
    pub profile_picture: Option<String>,
    #[serde(default, alias = "userType")]
    pub user_type: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, alias = "isVerified")]
    pub is_verified: bool,
}

/// One entry of `GET /rbac/my-permissions` → `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionEntry {
    pub name: String,
}

/// One entry of `GET /rbac/my-roles` → `data`.
///
/// Timestamps stay as strings here; the backend is not consistent about
/// offsets, so parsing happens where the domain type is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRoleEntry {
    pub id: WireId,
    #[serde(default)]
    pub assigned_at: Option<String>,
    #[serde(default)]
    pub assigned_by: Option<WireId>,
    #[serde(default)]
    pub expires_at: Option<String>,
    pub is_active: bool,
    pub role: RoleEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleEntry {
    pub id: WireId,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub is_active: bool,
}
