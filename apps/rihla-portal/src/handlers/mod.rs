//! HTTP handlers and route configuration.

mod health;
mod login;
mod pages;
mod session;

use actix_web::{HttpRequest, web};

use crate::middleware::error::{PortalError, PortalResult};

use pages::dashboard_pages;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/session", web::get().to(session::current_session)),
    )
    .route("/auth/login", web::get().to(login::login_page));

    for (path, rule) in dashboard_pages() {
        cfg.service(
            web::resource(path)
                .app_data(web::Data::new(rule))
                .route(web::get().to(pages::gated_page)),
        );
    }

    cfg.default_service(web::to(not_found));
}

async fn not_found(req: HttpRequest) -> PortalResult<actix_web::HttpResponse> {
    Err(PortalError::NotFound(req.path().to_string()))
}
