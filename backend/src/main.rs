//! Survey backend entry-point: loads settings, wires stores and serves HTTP.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, drain_on};
use survey_backend::inbound::http::health::HealthState;
use survey_backend::inbound::http::session_config::{BuildMode, session_settings};
use survey_backend::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_store_paths(settings.users_file(), settings.survey_file());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(tokio::signal::ctrl_c(), health_state, server.handle()));
    server.await
}
