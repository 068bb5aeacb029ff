//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use clinica_backend::domain::MessageLocale;
use clinica_backend::domain::ports::ProcedureExecutor;
use clinica_backend::inbound::http::jwt_config::JwtSettings;

/// Everything `create_server` needs, resolved ahead of binding.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) executor: Arc<dyn ProcedureExecutor>,
    pub(crate) locale: MessageLocale,
    pub(crate) jwt: JwtSettings,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        executor: Arc<dyn ProcedureExecutor>,
        jwt: JwtSettings,
    ) -> Self {
        Self {
            bind_addr,
            executor,
            locale: MessageLocale::default(),
            jwt,
        }
    }

    /// Language used for default envelope messages.
    #[must_use]
    pub fn with_locale(mut self, locale: MessageLocale) -> Self {
        self.locale = locale;
        self
    }
}
