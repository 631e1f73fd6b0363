//! Session introspection.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use rihla_shared::ApiResponse;

use crate::middleware::session::SessionCookie;
use crate::state::AppState;

/// GET /api/session
///
/// Always 200: an absent or refused cookie is reported as
/// `is_authenticated: false`. The token itself is never echoed.
pub async fn current_session(
    state: web::Data<AppState>,
    session: SessionCookie,
) -> HttpResponse {
    let verification = state.verifier.verify(session.token()).await;

    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ApiResponse::ok(verification))
}
