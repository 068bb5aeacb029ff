//! Server settings loaded via OrthoConfig.
//!
//! Values come from `CLINICA_*` environment variables, configuration files or
//! command-line flags, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{MessageLocale, UnknownLocale};
use crate::outbound::persistence::ConnectionConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Locale(#[from] UnknownLocale),
    #[error("CLINICA_DATABASE_URL is required")]
    MissingDatabaseUrl,
}

/// Process-level configuration for the HTTP server and database access.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLINICA")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Seconds to wait for a database connection.
    pub connect_timeout_secs: Option<u64>,
    /// Language of default envelope messages: `en` or `es`.
    pub message_locale: Option<String>,
}

impl std::fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerSettings")
            .field("bind_addr", &self.bind_addr)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("message_locale", &self.message_locale)
            .finish()
    }
}

impl ServerSettings {
    /// Configured listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    pub fn message_locale(&self) -> Result<MessageLocale, SettingsError> {
        match self.message_locale.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(MessageLocale::default()),
        }
    }

    /// Connection settings for the stored-procedure executor.
    pub fn connection(&self) -> Result<ConnectionConfig, SettingsError> {
        let url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        Ok(ConnectionConfig::new(url).with_connect_timeout(self.connect_timeout()))
    }
}
