//! Stored-procedure gateway.
//!
//! Every endpoint goes through here: validate the call, hand it to the
//! [`ProcedureExecutor`], let a row mapper consume the cursor, and assemble
//! the [`Envelope`] from the output status. Infrastructure failures become
//! domain errors; nothing is retried.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, warn};

use super::ports::{ProcedureExecutor, ProcedureExecutorError, ProcedureOutcome};
use super::{
    Envelope, Error, ExecutionMode, MessageCatalog, MessageLocale, ProcedureCall,
    ProcedureCallError, RowCursor, RowDecodeError,
};

/// Generic invocation helper shared by all entity services.
#[derive(Clone)]
pub struct StoredProcedureGateway {
    executor: Arc<dyn ProcedureExecutor>,
    catalog: &'static MessageCatalog,
}

impl StoredProcedureGateway {
    pub fn new(executor: Arc<dyn ProcedureExecutor>, locale: MessageLocale) -> Self {
        Self {
            executor,
            catalog: locale.catalog(),
        }
    }

    /// Messages used for defaults and authentication outcomes.
    pub fn messages(&self) -> &'static MessageCatalog {
        self.catalog
    }

    /// Run `call` as a query and decode its rows with `mapper`.
    ///
    /// The mapper decides how much of the cursor to consume.
    pub async fn query<T, F>(&self, call: ProcedureCall, mapper: F) -> Result<Envelope<T>, Error>
    where
        F: FnOnce(&mut RowCursor) -> Result<Option<T>, RowDecodeError>,
    {
        let ProcedureOutcome { status, mut rows } =
            self.invoke(&call, ExecutionMode::Query).await?;
        let data = mapper(&mut rows).map_err(|err| decode_error(&call, &err))?;
        Ok(Envelope::from_status(status, data, self.catalog))
    }

    /// Run `call` for its side effects only.
    pub async fn execute(&self, call: ProcedureCall) -> Result<Envelope<()>, Error> {
        let ProcedureOutcome { status, .. } = self.invoke(&call, ExecutionMode::NonQuery).await?;
        Ok(Envelope::from_status(status, None, self.catalog))
    }

    async fn invoke(
        &self,
        call: &ProcedureCall,
        mode: ExecutionMode,
    ) -> Result<ProcedureOutcome, Error> {
        call.validate().map_err(map_call_error)?;
        let outcome = self
            .executor
            .execute(call, mode)
            .await
            .map_err(|err| map_executor_error(call, &err))?;
        debug!(
            procedure = call.name(),
            ?mode,
            success = outcome.status.success,
            rows = outcome.rows.remaining(),
            "procedure completed"
        );
        Ok(outcome)
    }
}

fn map_call_error(err: ProcedureCallError) -> Error {
    match err {
        ProcedureCallError::ValueTooLong {
            param,
            max_len,
            actual,
        } => Error::invalid_request(format!("{param} exceeds {max_len} characters"))
            .with_details(json!({
                "field": param,
                "code": "too_long",
                "maxLength": max_len,
                "length": actual,
            })),
        other => {
            error!(error = %other, "rejected malformed procedure call");
            Error::internal(other.to_string())
        }
    }
}

fn map_executor_error(call: &ProcedureCall, err: &ProcedureExecutorError) -> Error {
    match err {
        ProcedureExecutorError::Connection { .. } => {
            warn!(procedure = call.name(), error = %err, "database unavailable");
            Error::service_unavailable("database unavailable")
        }
        ProcedureExecutorError::Execution { .. } | ProcedureExecutorError::Decode { .. } => {
            error!(procedure = call.name(), error = %err, "procedure failed");
            Error::internal(err.to_string())
        }
    }
}

fn decode_error(call: &ProcedureCall, err: &RowDecodeError) -> Error {
    error!(procedure = call.name(), error = %err, "row mapping failed");
    Error::internal(format!("{}: {err}", call.name()))
}
