//! Wire DTO → domain conversions.

use chrono::{DateTime, NaiveDateTime, Utc};

use rihla_core::domain::{RoleDefinition, UserProfile, UserRole};
use rihla_shared::dto::{PermissionEntry, ProfileUser, UserRoleEntry};

pub fn profile_from_dto(user: ProfileUser) -> UserProfile {
    UserProfile {
        id: user.id.to_string(),
        username: user.username.unwrap_or_default(),
        email: user.email.unwrap_or_default(),
        first_name: user.first_name,
        last_name: user.last_name,
        full_name: user.full_name,
        profile_picture: user.profile_picture,
        user_type: user.user_type,
        provider: user.provider,
        is_verified: user.is_verified,
    }
}

pub fn permissions_from_dto(entries: Vec<PermissionEntry>) -> Vec<String> {
    entries.into_iter().map(|p| p.name).collect()
}

pub fn role_from_dto(entry: UserRoleEntry) -> UserRole {
    UserRole {
        id: entry.id.to_string(),
        assigned_at: entry.assigned_at.as_deref().and_then(parse_timestamp),
        assigned_by: entry.assigned_by.map(|id| id.to_string()),
        expires_at: entry.expires_at.as_deref().and_then(parse_timestamp),
        is_active: entry.is_active,
        role: RoleDefinition {
            id: entry.role.id.to_string(),
            name: entry.role.name,
            display_name: entry.role.display_name,
            is_active: entry.role.is_active,
        },
    }
}

/// RFC 3339, or a naive `YYYY-MM-DD[T ]HH:MM:SS[.fff]` taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            tracing::debug!(raw, "Unparseable role timestamp, ignoring");
            None
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use rihla_shared::dto::{RoleEntry, WireId};

    fn entry(expires_at: Option<&str>) -> UserRoleEntry {
        UserRoleEntry {
            id: WireId::Number(11),
            assigned_at: Some("2025-03-01 10:00:00".to_string()),
            assigned_by: Some(WireId::Number(1)),
            expires_at: expires_at.map(str::to_string),
            is_active: true,
            role: RoleEntry {
                id: WireId::Text("r-admin".to_string()),
                name: "admin".to_string(),
                display_name: Some("Administrator".to_string()),
                is_active: true,
            },
        }
    }

    #[test]
    fn test_role_mapping_parses_naive_timestamp() {
        let role = role_from_dto(entry(None));

        assert_eq!(role.id, "11");
        assert_eq!(role.assigned_by.as_deref(), Some("1"));
        assert_eq!(
            role.assigned_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(role.name(), "admin");
    }

    #[test]
    fn test_role_mapping_with_offset() {
        let role = role_from_dto(entry(Some("2030-01-01T04:00:00+04:00")));
        assert_eq!(
            role.expires_at,
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_garbage_timestamp_is_dropped() {
        let role = role_from_dto(entry(Some("next tuesday")));
        assert!(role.expires_at.is_none());
        assert!(role.is_held());
    }
}
