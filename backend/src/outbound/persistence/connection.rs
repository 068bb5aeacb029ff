//! Per-call PostgreSQL connections.
//!
//! No pool is kept: each procedure invocation opens its own connection and
//! drops it before returning. The driver task is joined so the socket is
//! closed on every exit path.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls};
use tracing::warn;

use crate::domain::ports::ProcedureExecutorError;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the procedure executor.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use clinica_backend::outbound::persistence::ConnectionConfig;
///
/// let config = ConnectionConfig::new("postgres://clinica@localhost/clinica")
///     .with_connect_timeout(Duration::from_secs(3));
/// assert_eq!(config.connect_timeout(), Duration::from_secs(3));
/// ```
#[derive(Clone)]
pub struct ConnectionConfig {
    database_url: String,
    connect_timeout: Duration,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URL may embed a password.
        f.debug_struct("ConnectionConfig")
            .field("database_url", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl ConnectionConfig {
    /// Settings for `database_url` with a 10 second connect timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Parse the URL into driver configuration.
    ///
    /// # Errors
    /// [`ProcedureExecutorError::Connection`] when the URL is malformed.
    pub fn driver_config(&self) -> Result<Config, ProcedureExecutorError> {
        let mut config: Config = self.database_url.parse().map_err(|err| {
            ProcedureExecutorError::connection(format!("invalid database url: {err}"))
        })?;
        config.connect_timeout(self.connect_timeout);
        Ok(config)
    }
}

/// A client plus the task driving its socket.
pub(crate) struct CallConnection {
    pub(crate) client: Client,
    driver: JoinHandle<()>,
}

impl CallConnection {
    pub(crate) async fn open(config: &Config) -> Result<Self, ProcedureExecutorError> {
        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(|err| ProcedureExecutorError::connection(err.to_string()))?;
        let driver = tokio::spawn(async move {
            if let Err(error) = connection.await {
                warn!(%error, "postgres connection closed with error");
            }
        });
        Ok(Self { client, driver })
    }

    /// Drop the client and wait for the driver task to finish.
    pub(crate) async fn close(self) {
        let Self { client, driver } = self;
        drop(client);
        if let Err(error) = driver.await {
            warn!(%error, "postgres connection task failed");
        }
    }
}
