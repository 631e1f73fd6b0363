//! Login page entry point.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use rihla_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::middleware::error::redirect_response;
use crate::middleware::session::SessionCookie;
use crate::state::AppState;

const DEFAULT_LANDING: &str = "/dashboard";

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginView<'a> {
    pub login_required: bool,
    pub redirect: Option<&'a str>,
}

/// Only same-origin absolute paths are followed after login.
fn safe_return_path(raw: Option<&str>) -> Option<&str> {
    raw.filter(|p| p.starts_with('/') && !p.starts_with("//") && !p.contains('\\'))
}

/// GET /auth/login
///
/// A request that already carries a valid session is sent on to its return
/// path; everyone else gets the login view.
pub async fn login_page(
    state: web::Data<AppState>,
    session: SessionCookie,
    query: web::Query<LoginQuery>,
) -> HttpResponse {
    let target = safe_return_path(query.redirect.as_deref());

    if session.token().is_some() && state.verifier.verify(session.token()).await.is_authenticated {
        return redirect_response(target.unwrap_or(DEFAULT_LANDING));
    }

    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ApiResponse::ok(LoginView {
            login_required: true,
            redirect: target,
        }))
}
