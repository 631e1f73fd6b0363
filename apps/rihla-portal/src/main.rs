//! # Rihla Portal
//!
//! Request-time gate in front of the dashboard: reads the `authToken`
//! cookie, verifies it against the identity API and either serves the page
//! or redirects.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::PortalConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = PortalConfig::from_env();

    tracing::info!(
        "Starting Rihla portal on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).map_err(std::io::Error::other)?;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
