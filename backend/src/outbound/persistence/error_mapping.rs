//! Driver error classification.

use tracing::debug;

use crate::domain::ports::ProcedureExecutorError;

/// Map a driver error to a connection or execution failure.
///
/// Closed sockets and connection-class SQLSTATEs (`08xxx`) count as
/// connection failures; everything else is an execution failure.
pub(crate) fn map_postgres_error(error: &tokio_postgres::Error) -> ProcedureExecutorError {
    match error.as_db_error() {
        Some(db) => {
            debug!(
                code = db.code().code(),
                message = db.message(),
                routine = db.routine(),
                "postgres reported an error"
            );
            if db.code().code().starts_with("08") {
                ProcedureExecutorError::connection(db.message())
            } else {
                ProcedureExecutorError::execution(format!("{} ({})", db.message(), db.code().code()))
            }
        }
        None if error.is_closed() => ProcedureExecutorError::connection("connection closed"),
        None => ProcedureExecutorError::execution(error.to_string()),
    }
}
