//! [`ProcedureExecutor`] backed by PostgreSQL procedures.
//!
//! One invocation = one connection = one transaction: `CALL`, read the
//! output row, drain the result cursor when the procedure opened one, and
//! commit. The connection is closed before returning, success or not.

use async_trait::async_trait;
use tokio_postgres::Config;
use tracing::{debug, instrument};

use super::call_statement::{CURSOR_OPEN_SQL, CallStatement, RESULT_CURSOR, fetch_cursor_sql};
use super::connection::{CallConnection, ConnectionConfig};
use super::error_mapping::map_postgres_error;
use super::row_conversion::{output_status, to_domain_row};
use crate::domain::ports::{ProcedureExecutor, ProcedureExecutorError, ProcedureOutcome};
use crate::domain::{ExecutionMode, ProcedureCall, RowCursor};

/// Runs stored procedures on a fresh PostgreSQL connection per call.
#[derive(Clone)]
pub struct PostgresProcedureExecutor {
    config: Config,
}

impl PostgresProcedureExecutor {
    /// Build an executor from connection settings.
    ///
    /// # Errors
    /// [`ProcedureExecutorError::Connection`] when the database URL is invalid.
    pub fn new(config: &ConnectionConfig) -> Result<Self, ProcedureExecutorError> {
        Ok(Self {
            config: config.driver_config()?,
        })
    }

    async fn run(
        connection: &mut CallConnection,
        statement: &CallStatement,
        mode: ExecutionMode,
    ) -> Result<ProcedureOutcome, ProcedureExecutorError> {
        let tx = connection
            .client
            .transaction()
            .await
            .map_err(|err| map_postgres_error(&err))?;

        let output = tx
            .query(statement.sql.as_str(), &statement.params())
            .await
            .map_err(|err| map_postgres_error(&err))?;
        let status = output_status(output.first());

        let mut rows = Vec::new();
        if mode == ExecutionMode::Query {
            let opened = tx
                .query_opt(CURSOR_OPEN_SQL, &[&RESULT_CURSOR])
                .await
                .map_err(|err| map_postgres_error(&err))?
                .is_some();
            if opened {
                for row in tx
                    .query(fetch_cursor_sql().as_str(), &[])
                    .await
                    .map_err(|err| map_postgres_error(&err))?
                {
                    rows.push(to_domain_row(&row)?);
                }
            } else {
                debug!("procedure did not open a result cursor");
            }
        }

        tx.commit().await.map_err(|err| map_postgres_error(&err))?;
        Ok(ProcedureOutcome::new(status, RowCursor::from(rows)))
    }
}

#[async_trait]
impl ProcedureExecutor for PostgresProcedureExecutor {
    #[instrument(skip_all, fields(procedure = call.name(), mode = ?mode))]
    async fn execute(
        &self,
        call: &ProcedureCall,
        mode: ExecutionMode,
    ) -> Result<ProcedureOutcome, ProcedureExecutorError> {
        let statement = CallStatement::render(call, mode);
        let mut connection = CallConnection::open(&self.config).await?;
        let outcome = Self::run(&mut connection, &statement, mode).await;
        connection.close().await;
        outcome
    }
}
