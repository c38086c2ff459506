//! API error types.

use std::collections::HashMap;

use dsc_core::errors::ConfigError;

use crate::session::SessionError;

/// Errors raised while talking to the datasource service.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Non-success HTTP response, produced only by [`crate::client::check_response`].
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        message: String,
        /// Response headers.
        headers: HashMap<String, String>,
    },

    /// The service answered with an application error inside its envelope.
    #[error("service error {code}: {message}")]
    Rejected {
        /// Application status code from the envelope.
        code: i64,
        /// Message from the envelope.
        message: String,
    },

    /// The session provider could not supply a token.
    #[error("failed to obtain session token: {0}")]
    Session(#[from] SessionError),

    /// The configured origin is unusable.
    #[error(transparent)]
    Origin(#[from] ConfigError),

    /// The request URL could not be parsed.
    #[error("invalid request URL {url}: {source}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// An identifier interpolated into a path was empty.
    #[error("empty identifier for {endpoint}")]
    EmptyIdentifier {
        /// Name of the endpoint that needed the identifier.
        endpoint: &'static str,
    },

    /// A body was given to an endpoint that takes none.
    #[error("{endpoint} does not take a request body")]
    UnexpectedBody {
        /// Name of the endpoint.
        endpoint: &'static str,
    },

    /// No body was given to an endpoint that requires one.
    #[error("{endpoint} requires a JSON request body")]
    MissingBody {
        /// Name of the endpoint.
        endpoint: &'static str,
    },

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body was not the JSON that was expected.
    #[error("failed to parse API response: {0}")]
    JsonParse(#[source] serde_json::Error),

    /// A login response carried no token.
    #[error("login response did not contain a token")]
    MissingToken,

    /// Network/transport error.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status code, for [`ApiError::Http`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a 404 Not Found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// Check if the service refused the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Http { status: 401, .. } | Self::Rejected { code: 401, .. }
        )
    }
}
