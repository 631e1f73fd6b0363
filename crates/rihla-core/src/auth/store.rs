//! Client auth state: an injectable, observable container.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::{OnceCell, watch};

use super::access::AccessRequirement;
use super::loader::SessionLoader;
use super::token_store::TokenStore;
use crate::domain::User;
use crate::error::SessionError;
use crate::ports::ContentRefresher;

/// Snapshot of the client auth state.
///
/// All predicates are pure functions of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub is_loading: bool,
    pub is_initialized: bool,
}

/// Lifecycle position derived from an [`AuthState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    Uninitialized,
    Initializing,
    Anonymous,
    Authenticated,
}

impl AuthState {
    pub fn phase(&self) -> AuthPhase {
        match (self.is_initialized, self.is_loading) {
            (false, false) => AuthPhase::Uninitialized,
            (false, true) => AuthPhase::Initializing,
            _ if self.is_authenticated() => AuthPhase::Authenticated,
            _ => AuthPhase::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_role(name))
    }

    pub fn has_any_role<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_any_role(names))
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.has_permission(permission))
    }

    pub fn has_any_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.has_any_permission(permissions))
    }

    /// Authenticated and meeting `requirement`.
    pub fn satisfies(&self, requirement: &AccessRequirement) -> bool {
        self.is_authenticated()
            && self
                .user
                .as_ref()
                .is_some_and(|u| requirement.is_satisfied_by(u))
    }
}

/// Owns the client auth state and the actions that change it.
///
/// Observers call [`AuthStore::subscribe`] and receive a fresh snapshot after
/// every transition. Each `login`/`logout` bumps a generation counter; a load
/// that finishes after a newer one started is dropped instead of overwriting
/// the newer state.
pub struct AuthStore {
    tokens: TokenStore,
    loader: SessionLoader,
    state: watch::Sender<AuthState>,
    initialized: OnceCell<()>,
    generation: AtomicU64,
    refresher: Option<Arc<dyn ContentRefresher>>,
}

impl AuthStore {
    pub fn new(tokens: TokenStore, loader: SessionLoader) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            tokens,
            loader,
            state,
            initialized: OnceCell::new(),
            generation: AtomicU64::new(0),
            refresher: None,
        }
    }

    /// Repair cookie drift during [`AuthStore::initialize`], re-requesting
    /// server content through `refresher` after a repair.
    pub fn with_refresher(mut self, refresher: Arc<dyn ContentRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Hydrate from the token store. Runs at most once, even when called
    /// concurrently; the store counts as initialized whatever the outcome.
    ///
    /// With a refresher attached, a cookie that drifted from storage is
    /// repaired first.
    pub async fn initialize(&self) {
        self.initialized.get_or_init(|| self.hydrate()).await;
    }

    async fn hydrate(&self) {
        let generation = self.generation.load(Ordering::SeqCst);
        self.state.send_modify(|s| s.is_loading = true);

        if let Some(refresher) = &self.refresher {
            if let Err(e) = self.tokens.reconcile(refresher.as_ref()).await {
                tracing::warn!(error = %e, "Could not check auth cookie against storage");
            }
        }

        match self.tokens.get().await {
            Some(token) => {
                if self.apply_if_current(generation, |s| s.token = Some(token.clone())) {
                    let result = self.loader.load(&token).await;
                    // Failures are already logged by `finish_load`.
                    let _ = self.finish_load(generation, result);
                } else {
                    tracing::debug!("Session changed while reading storage, skipping hydration");
                }
            }
            None => tracing::debug!("No stored token, starting anonymous"),
        }

        // A newer login owns `is_loading` until its own load lands.
        self.state.send_modify(|s| {
            s.is_initialized = true;
            if self.generation.load(Ordering::SeqCst) == generation {
                s.is_loading = false;
            }
        });
    }

    /// Persist `token` and load the user it belongs to.
    ///
    /// On a failed load the token is kept, so a later
    /// [`AuthStore::refresh_user_data`] can retry without a new login.
    pub async fn login(&self, token: &str) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Err(e) = self.tokens.set(token).await {
            tracing::warn!(error = %e, "Failed to persist auth token, keeping it in memory only");
        }

        self.state.send_modify(|s| {
            s.token = Some(token.to_string());
            s.user = None;
            s.is_loading = true;
        });

        let result = self.loader.load(token).await;
        self.finish_load(generation, result)
    }

    /// Rebuild the user from the current token.
    pub async fn refresh_user_data(&self) -> Result<(), SessionError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let token = self.state.borrow().token.clone();
        let Some(token) = token else {
            return Err(SessionError::MissingToken);
        };

        if !self.apply_if_current(generation, |s| s.is_loading = true) {
            return Err(SessionError::Superseded);
        }

        let result = self.loader.load(&token).await;
        self.finish_load(generation, result)
    }

    /// Reset to anonymous. The in-memory transition happens before any
    /// storage I/O, so observers see the signed-out state immediately.
    pub async fn logout(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| {
            s.user = None;
            s.token = None;
            s.is_loading = false;
        });

        if let Err(e) = self.tokens.remove().await {
            tracing::warn!(error = %e, "Failed to clear stored auth token");
        }
        tracing::info!("Signed out");
    }

    /// Apply `change` only if no `login`/`logout` started since
    /// `generation` was read. The check runs under the state lock, so a
    /// concurrent logout either lands first and wins or lands after and
    /// overwrites.
    fn apply_if_current(&self, generation: u64, change: impl FnOnce(&mut AuthState)) -> bool {
        self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            change(s);
            true
        })
    }

    fn finish_load(
        &self,
        generation: u64,
        result: Result<User, SessionError>,
    ) -> Result<(), SessionError> {
        match result {
            Ok(user) => {
                let user_id = user.id.clone();
                if !self.apply_if_current(generation, |s| {
                    s.user = Some(user);
                    s.is_loading = false;
                }) {
                    tracing::debug!("Discarding superseded session load");
                    return Err(SessionError::Superseded);
                }
                tracing::info!(user_id = %user_id, "Session ready");
                Ok(())
            }
            Err(e) => {
                if !self.apply_if_current(generation, |s| {
                    s.user = None;
                    s.is_loading = false;
                }) {
                    tracing::debug!("Discarding superseded session load");
                    return Err(SessionError::Superseded);
                }
                tracing::warn!(error = %e, "Failed to load session, keeping token for retry");
                Err(e)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.state.borrow().has_role(name)
    }

    pub fn has_any_role<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.state.borrow().has_any_role(names)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.state.borrow().has_permission(permission)
    }

    pub fn has_any_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        self.state.borrow().has_any_permission(permissions)
    }
}
