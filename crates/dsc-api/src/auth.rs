//! Exchange a username and password for a bearer token.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::check_response;
use crate::errors::ApiError;
use dsc_core::instance;

/// Path of the login endpoint below the service prefix.
pub const LOGIN_PATH: &str = "user/login";

/// Application code the service uses for success inside its envelope.
const ENVELOPE_OK: i64 = 200;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Log in to the service and return the issued token.
///
/// The token is read from `data.token`, falling back to a top-level
/// `token`. A response envelope whose `code` is not 200 is an error even
/// when the HTTP status is 2xx.
///
/// # Errors
///
/// Returns [`ApiError::Http`] for a non-2xx status, [`ApiError::Rejected`]
/// for an application error, [`ApiError::MissingToken`] when the response
/// carries no token, and transport or parse errors otherwise.
pub async fn login(
    http: &reqwest::Client,
    origin: &str,
    username: &str,
    password: &SecretString,
) -> Result<SecretString, ApiError> {
    let origin = instance::normalize_origin(origin)?;
    let url = instance::service_url(&origin, LOGIN_PATH);
    debug!(%url, username, "Logging in");

    let resp = http
        .post(&url)
        .json(&Credentials {
            username,
            password: password.expose_secret(),
        })
        .send()
        .await?;
    let resp = check_response(resp).await?;
    let body: Value = serde_json::from_str(&resp.text().await?).map_err(ApiError::JsonParse)?;

    token_from_body(&body)
}

fn token_from_body(body: &Value) -> Result<SecretString, ApiError> {
    if let Some(code) = body.get("code").and_then(Value::as_i64)
        && code != ENVELOPE_OK
    {
        let message = body
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(ApiError::Rejected { code, message });
    }

    body.pointer("/data/token")
        .or_else(|| body.get("token"))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
        .ok_or(ApiError::MissingToken)
}
