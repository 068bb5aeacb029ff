//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use clinica_backend::domain::StoredProcedureGateway;
use clinica_backend::domain::ports::TokenService;
use clinica_backend::inbound::http::jwt_config::JwtSettings;
use clinica_backend::inbound::http::state::HttpState;
use clinica_backend::outbound::token::Hs256TokenService;

use super::ServerConfig;

fn build_token_service(jwt: JwtSettings, clock: Arc<dyn Clock>) -> Arc<dyn TokenService> {
    let JwtSettings {
        key,
        issuer,
        audience,
    } = jwt;
    Arc::new(
        Hs256TokenService::new(key, clock)
            .with_issuer(issuer)
            .with_audience(audience),
    )
}

/// Assemble the handler state from a resolved configuration.
pub(super) fn build_http_state(config: ServerConfig) -> HttpState {
    let ServerConfig {
        bind_addr: _,
        executor,
        locale,
        jwt,
    } = config;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let gateway = StoredProcedureGateway::new(executor, locale);
    let tokens = build_token_service(jwt, Arc::clone(&clock));
    HttpState::new(gateway, tokens, clock)
}
