//! Shared fixtures for the clinic integration suites.

pub(crate) mod app;
pub(crate) mod db;
