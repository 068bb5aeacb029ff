//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod procedure_executor;
mod token_service;

#[cfg(test)]
pub use procedure_executor::MockProcedureExecutor;
pub use procedure_executor::{ProcedureExecutor, ProcedureExecutorError, ProcedureOutcome};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenClaims, TokenError, TokenService};
