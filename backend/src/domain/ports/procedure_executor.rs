//! Driven port for invoking stored procedures.
//!
//! Adapters open a connection per call, bind the call's inputs plus the two
//! conventional outputs, run the procedure and report the output values
//! together with any rows the procedure produced.

use async_trait::async_trait;

use crate::domain::{ExecutionMode, OutputStatus, ProcedureCall, RowCursor};

use super::define_port_error;

define_port_error! {
    /// Infrastructure failures raised by procedure executors.
    pub enum ProcedureExecutorError {
        /// The database could not be reached or the connection dropped.
        Connection { message: String } => "database connection failed: {message}",
        /// The database rejected or aborted the invocation.
        Execution { message: String } => "procedure execution failed: {message}",
        /// A result column could not be converted to a row value.
        Decode { message: String } => "result decoding failed: {message}",
    }
}

/// Output values plus the procedure's rows.
///
/// `rows` is empty for [`ExecutionMode::NonQuery`] calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcedureOutcome {
    pub status: OutputStatus,
    pub rows: RowCursor,
}

impl ProcedureOutcome {
    pub fn new(status: OutputStatus, rows: RowCursor) -> Self {
        Self { status, rows }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcedureExecutor: Send + Sync {
    /// Run `call` once on a connection scoped to this invocation.
    async fn execute(
        &self,
        call: &ProcedureCall,
        mode: ExecutionMode,
    ) -> Result<ProcedureOutcome, ProcedureExecutorError>;
}
