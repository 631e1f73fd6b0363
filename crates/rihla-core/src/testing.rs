//! In-crate fakes for the ports, shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cookie::Cookie;
use cookie::time::OffsetDateTime;

use crate::domain::{RoleDefinition, User, UserProfile, UserRole};
use crate::ports::{
    ContentRefresher, CookieJar, IdentityApi, IdentityError, KeyValueStorage, RefreshError,
    StorageError,
};

pub fn profile() -> UserProfile {
    UserProfile {
        id: "42".to_string(),
        username: "salim".to_string(),
        email: "salim@example.om".to_string(),
        first_name: None,
        last_name: None,
        full_name: None,
        profile_picture: None,
        user_type: Some("staff".to_string()),
        provider: Some("local".to_string()),
        is_verified: true,
    }
}

pub fn role(name: &str, assignment_active: bool, definition_active: bool) -> UserRole {
    UserRole {
        id: format!("assignment-{name}"),
        assigned_at: None,
        assigned_by: None,
        expires_at: None,
        is_active: assignment_active,
        role: RoleDefinition {
            id: format!("role-{name}"),
            name: name.to_string(),
            display_name: None,
            is_active: definition_active,
        },
    }
}

pub fn user_with(roles: Vec<UserRole>, permissions: Vec<String>) -> User {
    User::from_parts(profile(), permissions, roles)
}

pub struct FakeIdentity {
    profile: Mutex<Result<UserProfile, IdentityError>>,
    permissions: Mutex<Result<Vec<String>, IdentityError>>,
    roles: Mutex<Result<Vec<UserRole>, IdentityError>>,
    delay: Option<Duration>,
    profile_calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn ok() -> Self {
        Self {
            profile: Mutex::new(Ok(profile())),
            permissions: Mutex::new(Ok(Vec::new())),
            roles: Mutex::new(Ok(Vec::new())),
            delay: None,
            profile_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_roles(self, roles: Vec<UserRole>) -> Self {
        self.set_roles(Ok(roles));
        self
    }

    pub fn with_permissions(self, permissions: &[&str]) -> Self {
        *self.permissions.lock().unwrap() =
            Ok(permissions.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn with_profile_error(self, error: IdentityError) -> Self {
        *self.profile.lock().unwrap() = Err(error);
        self
    }

    pub fn with_permissions_error(self, error: IdentityError) -> Self {
        *self.permissions.lock().unwrap() = Err(error);
        self
    }

    pub fn with_roles_error(self, error: IdentityError) -> Self {
        self.set_roles(Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_roles(&self, roles: Result<Vec<UserRole>, IdentityError>) {
        *self.roles.lock().unwrap() = roles;
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl IdentityApi for FakeIdentity {
    async fn fetch_profile(&self, _token: &str) -> Result<UserProfile, IdentityError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.profile.lock().unwrap().clone()
    }

    async fn fetch_permissions(&self, _token: &str) -> Result<Vec<String>, IdentityError> {
        self.pause().await;
        self.permissions.lock().unwrap().clone()
    }

    async fn fetch_roles(&self, _token: &str) -> Result<Vec<UserRole>, IdentityError> {
        self.pause().await;
        self.roles.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    unavailable: bool,
    read_delay: Option<Duration>,
}

impl MemoryStorage {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Every `get` reads, then sleeps for `delay` before returning.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        let value = self.entries.lock().unwrap().get(key).cloned();
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Records every cookie written so tests can inspect attributes.
#[derive(Default)]
pub struct MemoryCookies {
    live: Mutex<HashMap<String, String>>,
    pub written: Mutex<Vec<Cookie<'static>>>,
}

impl MemoryCookies {
    pub fn last_written(&self) -> Option<Cookie<'static>> {
        self.written.lock().unwrap().last().cloned()
    }

    /// Drop a cookie without going through `set`, as a browser clearing it would.
    pub fn clear(&self, name: &str) {
        self.live.lock().unwrap().remove(name);
    }
}

#[async_trait]
impl CookieJar for MemoryCookies {
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self.live.lock().unwrap().get(name).cloned())
    }

    async fn set(&self, cookie: Cookie<'static>) -> Result<(), StorageError> {
        let expired = cookie
            .expires_datetime()
            .is_some_and(|at| at <= OffsetDateTime::now_utc())
            || cookie.max_age().is_some_and(|age| age.is_zero());

        let mut live = self.live.lock().unwrap();
        if expired {
            live.remove(cookie.name());
        } else {
            live.insert(cookie.name().to_string(), cookie.value().to_string());
        }
        self.written.lock().unwrap().push(cookie);
        Ok(())
    }
}

#[derive(Default)]
pub struct CountingRefresher {
    calls: AtomicUsize,
}

impl CountingRefresher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentRefresher for CountingRefresher {
    async fn refresh(&self) -> Result<(), RefreshError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
