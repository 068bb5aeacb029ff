//! Bearer token adapters implementing the domain `TokenService` port.

mod hs256;

pub use hs256::{DEFAULT_LEEWAY_SECS, Hs256TokenService};
