//! Client-side guards as pure decisions over an [`AuthState`].
//!
//! None of these navigate or render; the caller acts on the returned value.

use serde::Serialize;

use super::access::AccessRequirement;
use super::redirect::AuthRoutes;
use super::store::AuthState;

/// Tooltip shown on a disabled control when no custom reason is given.
pub const DEFAULT_DENIAL_REASON: &str = "You do not have permission to perform this action";

/// Decision for a full page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PageDecision {
    /// State not ready yet; show a loading view.
    Pending,
    Allow,
    /// Navigate to the login page.
    Redirect { location: String },
    /// Signed in but not allowed; show the unauthorized view in place.
    Unauthorized,
}

pub fn page_guard(
    state: &AuthState,
    requirement: &AccessRequirement,
    current_path: &str,
    routes: &AuthRoutes,
) -> PageDecision {
    if !state.is_initialized || state.is_loading {
        return PageDecision::Pending;
    }

    if !state.is_authenticated() {
        let redirect =
            routes.login_redirect(requirement.redirect_to.as_deref(), Some(current_path));
        return PageDecision::Redirect {
            location: redirect.location,
        };
    }

    if state.satisfies(requirement) {
        PageDecision::Allow
    } else {
        PageDecision::Unauthorized
    }
}

/// Decision for a section of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtreeDecision<F> {
    Render,
    Fallback(F),
    Nothing,
}

/// Like [`page_guard`] but never redirects: anything short of access
/// (including a state that is still loading) yields the fallback.
pub fn subtree_guard<F>(
    state: &AuthState,
    requirement: &AccessRequirement,
    fallback: Option<F>,
) -> SubtreeDecision<F> {
    let ready = state.is_initialized && !state.is_loading;
    if ready && state.satisfies(requirement) {
        return SubtreeDecision::Render;
    }

    match fallback {
        Some(f) => SubtreeDecision::Fallback(f),
        None => SubtreeDecision::Nothing,
    }
}

/// How a denied control is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlMode {
    #[default]
    Hide,
    Disable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ControlState {
    Enabled,
    Disabled { reason: String },
    Hidden,
}

impl ControlState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ControlState::Enabled)
    }
}

pub fn control_guard(
    state: &AuthState,
    requirement: &AccessRequirement,
    mode: ControlMode,
    reason: Option<&str>,
) -> ControlState {
    if state.satisfies(requirement) {
        return ControlState::Enabled;
    }

    match mode {
        ControlMode::Hide => ControlState::Hidden,
        ControlMode::Disable => ControlState::Disabled {
            reason: reason.unwrap_or(DEFAULT_DENIAL_REASON).to_string(),
        },
    }
}

/// An action handler bound to the access decision made when it was created.
///
/// The handler is never called without access, even if the caller rendered
/// the control as enabled by mistake.
pub struct GuardedAction<F> {
    allowed: bool,
    handler: F,
}

impl<F, R> GuardedAction<F>
where
    F: FnMut() -> R,
{
    pub fn new(state: &AuthState, requirement: &AccessRequirement, handler: F) -> Self {
        Self {
            allowed: state.satisfies(requirement),
            handler,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn invoke(&mut self) -> Option<R> {
        if !self.allowed {
            tracing::debug!("Guarded action invoked without access, ignoring");
            return None;
        }
        Some((self.handler)())
    }
}
