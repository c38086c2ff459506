//! Core types, traits, and utilities for the dsc datasource CLI.
//!
//! This crate provides the foundational abstractions shared by the other
//! dsc crates:
//! - [`IOStreams`] for terminal I/O handling
//! - [`config::Config`] and [`config::AuthConfig`] for settings and the
//!   stored session
//! - [`prompter::Prompter`] for interactive prompts
//! - Origin and service URL helpers in [`instance`]

pub mod cmdutil;
pub mod config;
pub mod errors;
pub mod instance;
pub mod iostreams;
pub mod prompter;
#[cfg(test)]
pub mod test_utils;

pub use iostreams::IOStreams;
