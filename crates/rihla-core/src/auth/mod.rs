//! Session services built on the ports.
//!
//! ```text
//! TokenStore ──► SessionLoader ──► AuthStore ──► guards (client)
//!      │                 └──────► ServerVerifier ──► require_* (request time)
//!      └── cookie mirror ────────────────┘
//! ```

mod access;
mod guard;
mod loader;
mod redirect;
mod store;
mod token_store;
mod verifier;

pub use access::AccessRequirement;
pub use guard::{
    ControlMode, ControlState, DEFAULT_DENIAL_REASON, GuardedAction, PageDecision,
    SubtreeDecision, control_guard, page_guard, subtree_guard,
};
pub use loader::{DEFAULT_IDENTITY_TIMEOUT, SessionLoader};
pub use redirect::{AuthRoutes, Redirect, RedirectReason};
pub use store::{AuthPhase, AuthState, AuthStore};
pub use token_store::{AUTH_COOKIE_MAX_AGE_SECS, AUTH_TOKEN_KEY, Reconciliation, TokenStore};
pub use verifier::{ServerVerifier, Verification};
