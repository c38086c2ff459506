//! HTTP client construction.
//!
//! Provides the default User-Agent and Accept headers shared by every
//! request the CLI makes.

use reqwest::header::{self, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Options for constructing an HTTP client.
#[derive(Debug)]
pub struct HttpClientOptions {
    /// Application version for User-Agent.
    pub app_version: String,
    /// Whether to skip the default headers.
    pub skip_default_headers: bool,
    /// Enable verbose HTTP logging.
    pub log_verbose: bool,
}

/// Build a reqwest client with default configuration.
///
/// No timeout is set; a request lasts as long as the transport allows.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn build_client(opts: &HttpClientOptions) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if !opts.skip_default_headers {
        // A version string with control characters simply yields no User-Agent.
        if let Ok(agent) = HeaderValue::from_str(&format!("dsc/{}", opts.app_version)) {
            headers.insert(header::USER_AGENT, agent);
        }
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    }

    if opts.log_verbose {
        debug!("Building HTTP client with verbose logging");
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .connection_verbose(opts.log_verbose)
        .build()
}

/// Format the `Authorization` header value for a token.
///
/// A missing token yields `"Bearer "` with an empty credential.
pub fn bearer_header_value(token: Option<&SecretString>) -> String {
    format!("Bearer {}", token.map_or("", ExposeSecret::expose_secret))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(false, false)]
    #[case(true, false)]
    #[case(false, true)]
    fn test_should_build_client(#[case] skip_default_headers: bool, #[case] log_verbose: bool) {
        let opts = HttpClientOptions {
            app_version: "0.1.0".to_string(),
            skip_default_headers,
            log_verbose,
        };
        assert!(build_client(&opts).is_ok());
    }

    #[test]
    fn test_should_build_client_with_unprintable_version() {
        let opts = HttpClientOptions {
            app_version: "1.0\n".to_string(),
            skip_default_headers: false,
            log_verbose: false,
        };
        assert!(build_client(&opts).is_ok());
    }

    #[test]
    fn test_should_format_bearer_header() {
        let token = SecretString::from("abc");
        assert_eq!(bearer_header_value(Some(&token)), "Bearer abc");
        assert_eq!(bearer_header_value(None), "Bearer ");
    }

    #[test]
    fn test_should_format_empty_token_like_missing_token() {
        let empty = SecretString::from("");
        assert_eq!(bearer_header_value(Some(&empty)), bearer_header_value(None));
    }
}
