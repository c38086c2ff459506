//! Authenticated HTTP client for the datasource service.
//!
//! [`client::Client`] exposes one method per remote datasource endpoint.
//! Each call fetches a bearer token from a [`session::SessionProvider`],
//! sends exactly one request, and hands back the raw response.

pub mod auth;
pub mod client;
pub mod datasource;
pub mod errors;
pub mod http;
pub mod session;

pub use client::Client;
pub use datasource::{Endpoint, Identifier};
pub use errors::ApiError;
pub use session::SessionProvider;
