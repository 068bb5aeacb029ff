//! Backend entry-point: loads settings, wires the PostgreSQL executor and
//! serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use clinica_backend::inbound::http::health::HealthState;
use clinica_backend::inbound::http::jwt_config::{BuildMode, jwt_settings_from_env};
use clinica_backend::outbound::persistence::PostgresProcedureExecutor;
use clinica_backend::settings::ServerSettings;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let locale = settings.message_locale().map_err(std::io::Error::other)?;
    let connection = settings.connection().map_err(std::io::Error::other)?;
    let executor = PostgresProcedureExecutor::new(&connection).map_err(std::io::Error::other)?;

    let jwt = jwt_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        key_fingerprint = %jwt.key_fingerprint(),
        issuer = jwt.issuer.as_deref().unwrap_or("-"),
        audience = jwt.audience.as_deref().unwrap_or("-"),
        "bearer token signing configured"
    );

    let config = ServerConfig::new(bind_addr, Arc::new(executor), jwt).with_locale(locale);
    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, ?locale, "starting HTTP server");
    create_server(health_state, config)?.await
}
