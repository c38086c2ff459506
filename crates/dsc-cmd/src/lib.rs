//! Command implementations for the dsc datasource CLI.
//!
//! Each module corresponds to a `dsc` top-level command group.

pub mod auth;
pub mod config;
pub mod datasource;
pub mod factory;
pub mod session;

#[cfg(test)]
pub mod test_helpers;
