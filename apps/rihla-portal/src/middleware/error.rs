//! Error handling - RFC 7807 problem documents and auth redirects.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use rihla_core::auth::Redirect;
use rihla_shared::ErrorResponse;

/// Portal error type; every variant renders its own response.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Authentication or authorization failed; the client must navigate.
    #[error("Redirect to {}", .0.location)]
    Redirect(Redirect),

    /// No page at this path.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<Redirect> for PortalError {
    fn from(redirect: Redirect) -> Self {
        PortalError::Redirect(redirect)
    }
}

impl ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        match self {
            PortalError::Redirect(_) => StatusCode::FOUND,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            PortalError::Redirect(redirect) => redirect_response(&redirect.location),
            PortalError::NotFound(path) => HttpResponse::NotFound().json(
                ErrorResponse::not_found(format!("No page at {path}")).with_instance(path),
            ),
        }
    }
}

/// 302 to `location`. Auth outcomes are per-request, never cached.
pub fn redirect_response(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Result type alias for handlers.
pub type PortalResult<T> = Result<T, PortalError>;
