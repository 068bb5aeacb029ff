//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL stored-procedure executor
//! - **token**: HS256 bearer token signer
//!
//! Adapters translate between domain types and infrastructure representations.
//! They contain no business logic.

pub mod persistence;
pub mod token;
