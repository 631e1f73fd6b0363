//! Session-level error types.

use thiserror::Error;

use crate::ports::{IdentityError, StorageError};

/// Why a user record could not be (re)built from a token.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No auth token available")]
    MissingToken,

    #[error("Profile request failed: {0}")]
    Profile(#[source] IdentityError),

    #[error("Token storage failed: {0}")]
    Storage(#[from] StorageError),

    /// A newer login or logout happened while this load was in flight.
    #[error("Session load was superseded")]
    Superseded,
}

impl SessionError {
    /// True when the identity API explicitly refused the token.
    pub fn is_rejected(&self) -> bool {
        matches!(self, SessionError::Profile(IdentityError::Rejected(_)))
    }
}
