//! Gated dashboard pages.
//!
//! Each page is a [`PageRule`] attached to its resource as app data; the
//! shared handler verifies the session cookie against it before producing
//! any content.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use rihla_core::auth::AccessRequirement;
use rihla_core::domain::{SUPER_ADMIN, User};
use rihla_shared::ApiResponse;
use serde::Serialize;

use crate::middleware::error::PortalResult;
use crate::middleware::session::SessionCookie;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct PageRule {
    pub title: &'static str,
    pub requirement: AccessRequirement,
}

impl PageRule {
    fn new(title: &'static str, requirement: AccessRequirement) -> Self {
        Self { title, requirement }
    }
}

/// Dashboard route table.
pub fn dashboard_pages() -> Vec<(&'static str, PageRule)> {
    vec![
        (
            "/dashboard",
            PageRule::new("Dashboard", AccessRequirement::authenticated()),
        ),
        (
            "/dashboard/places",
            PageRule::new("Places", AccessRequirement::permissions(["can_manage_place"])),
        ),
        (
            "/dashboard/restaurants",
            PageRule::new(
                "Restaurants",
                AccessRequirement::permissions(["can_manage_restaurant"]),
            ),
        ),
        (
            "/dashboard/lists",
            PageRule::new("Lists", AccessRequirement::permissions(["can_manage_list"])),
        ),
        (
            "/dashboard/users",
            PageRule::new("Users", AccessRequirement::roles(["admin", SUPER_ADMIN])),
        ),
        (
            "/dashboard/roles",
            PageRule::new("Roles", AccessRequirement::roles([SUPER_ADMIN])),
        ),
    ]
}

#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub page: &'a str,
    pub display_name: String,
    pub user: User,
}

pub async fn gated_page(
    req: HttpRequest,
    rule: web::Data<PageRule>,
    state: web::Data<AppState>,
    session: SessionCookie,
) -> PortalResult<HttpResponse> {
    let return_path = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.path(), |pq| pq.as_str());
    let user = state
        .verifier
        .require(session.token(), &rule.requirement, Some(return_path))
        .await?;

    tracing::debug!(user_id = %user.id, page = rule.title, "Page granted");

    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ApiResponse::ok(PageView {
            page: rule.title,
            display_name: user.display_name(),
            user,
        })))
}
