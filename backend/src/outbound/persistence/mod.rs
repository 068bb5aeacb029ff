//! PostgreSQL adapter for the stored-procedure executor port.
//!
//! Procedures are invoked with `CALL` using named arguments. The two
//! conventional outputs come back as `INOUT` parameters; query procedures
//! expose their rows through a refcursor drained in the same transaction.

mod call_statement;
mod connection;
mod error_mapping;
mod postgres_executor;
mod row_conversion;

pub use connection::ConnectionConfig;
pub use postgres_executor::PostgresProcedureExecutor;
