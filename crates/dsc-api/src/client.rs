//! Datasource service client.
//!
//! One method per remote endpoint. Each method asks the session provider
//! for the current token, sends exactly one request, and returns the raw
//! response. Status codes are not interpreted; callers that want an error
//! for a non-2xx answer use [`check_response`] or [`read_body`].

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Response;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::datasource::{Endpoint, Identifier};
use crate::errors::ApiError;
use crate::http::bearer_header_value;
use crate::session::SessionProvider;
use dsc_core::instance;

/// Client for the datasource endpoints of one service origin.
///
/// Cloning is cheap; clones share the connection pool and the session
/// provider.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    origin: String,
    session: Arc<dyn SessionProvider>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("origin", &self.origin)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for a service origin.
    ///
    /// The origin is normalized, so `localhost:8088/` and
    /// `http://localhost:8088` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Origin`] if the origin is not an http(s) URL.
    pub fn new(
        http: reqwest::Client,
        origin: &str,
        session: Arc<dyn SessionProvider>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            origin: instance::normalize_origin(origin)?,
            session,
        })
    }

    /// The origin requests are sent to.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// List all datasources.
    ///
    /// # Errors
    ///
    /// Returns an error if no token can be obtained or the request cannot be sent.
    pub async fn list_datasources(&self) -> Result<Response, ApiError> {
        self.send(Endpoint::List, None).await
    }

    /// List the tables of a datasource.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, no token can be obtained, or
    /// the request cannot be sent.
    pub async fn list_tables(&self, ds_id: impl Into<Identifier>) -> Result<Response, ApiError> {
        self.send(Endpoint::TableList(ds_id.into()), None).await
    }

    /// List the fields of a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, no token can be obtained, or
    /// the request cannot be sent.
    pub async fn list_fields(
        &self,
        table_id: impl Into<Identifier>,
    ) -> Result<Response, ApiError> {
        self.send(Endpoint::FieldList(table_id.into()), None).await
    }

    /// Preview rows of a datasource according to a build specification.
    ///
    /// # Errors
    ///
    /// Returns an error if the build specification cannot be serialized,
    /// the id is empty, no token can be obtained, or the request cannot be sent.
    pub async fn preview_data<B: Serialize + ?Sized>(
        &self,
        ds_id: impl Into<Identifier>,
        build: &B,
    ) -> Result<Response, ApiError> {
        self.send_json(Endpoint::PreviewData(ds_id.into()), build)
            .await
    }

    /// Save table metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be serialized, no token can
    /// be obtained, or the request cannot be sent.
    pub async fn save_table<T: Serialize + ?Sized>(&self, table: &T) -> Result<Response, ApiError> {
        self.send_json(Endpoint::SaveTable, table).await
    }

    /// Save field metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be serialized, no token can
    /// be obtained, or the request cannot be sent.
    pub async fn save_field<T: Serialize + ?Sized>(&self, field: &T) -> Result<Response, ApiError> {
        self.send_json(Endpoint::SaveField, field).await
    }

    /// Fetch the detail of one datasource.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, no token can be obtained, or
    /// the request cannot be sent.
    pub async fn get_datasource(&self, id: impl Into<Identifier>) -> Result<Response, ApiError> {
        self.send(Endpoint::Get(id.into()), None).await
    }

    /// Delete a datasource.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, no token can be obtained, or
    /// the request cannot be sent.
    pub async fn delete_datasource(
        &self,
        id: impl Into<Identifier>,
    ) -> Result<Response, ApiError> {
        self.send(Endpoint::Delete(id.into()), None).await
    }

    /// Absolute URL of an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyIdentifier`] for an empty id and
    /// [`ApiError::InvalidUrl`] if the result does not parse.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        if endpoint.identifier().is_some_and(Identifier::is_empty) {
            return Err(ApiError::EmptyIdentifier {
                endpoint: endpoint.name(),
            });
        }
        let url = instance::service_url(&self.origin, &endpoint.path());
        Url::parse(&url).map_err(|source| ApiError::InvalidUrl { url, source })
    }

    /// Build the request for an endpoint without sending it.
    ///
    /// The token is read from the session provider on every call. Endpoints
    /// with a payload are sent with `Content-Type: application/json`; the
    /// others carry neither body nor content type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedBody`] or [`ApiError::MissingBody`] if
    /// `body` does not match [`Endpoint::has_body`], and an error if the URL is invalid, the
    /// session provider fails, or the token is not a valid header value.
    pub fn build_request(
        &self,
        endpoint: &Endpoint,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Request, ApiError> {
        match (endpoint.has_body(), body.is_some()) {
            (false, true) => {
                return Err(ApiError::UnexpectedBody {
                    endpoint: endpoint.name(),
                });
            }
            (true, false) => {
                return Err(ApiError::MissingBody {
                    endpoint: endpoint.name(),
                });
            }
            _ => {}
        }
        let url = self.url_for(endpoint)?;
        let token = self.session.user_token()?;

        let mut req = self
            .http
            .request(endpoint.method(), url)
            .header(AUTHORIZATION, bearer_header_value(token.as_ref()));
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }
        Ok(req.build()?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        payload: &B,
    ) -> Result<Response, ApiError> {
        let body = serde_json::to_vec(payload).map_err(ApiError::Serialize)?;
        self.send(endpoint, Some(body)).await
    }

    async fn send(&self, endpoint: Endpoint, body: Option<Vec<u8>>) -> Result<Response, ApiError> {
        let request = self.build_request(&endpoint, body)?;
        debug!(
            method = %request.method(),
            url = %request.url(),
            "Sending datasource request"
        );
        Ok(self.http.execute(request).await?)
    }
}

/// Turn a non-success response into [`ApiError::Http`].
///
/// Success responses are handed back untouched.
///
/// # Errors
///
/// Returns [`ApiError::Http`] with the status, body text, and headers.
pub async fn check_response(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let headers = extract_header_map(resp.headers());
    let message = resp.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        message,
        headers,
    })
}

/// A fully read response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseBody {
    /// HTTP status code.
    pub status: u16,
    /// Raw body text.
    pub text: String,
    /// The body parsed as JSON, when it is JSON.
    pub json: Option<Value>,
}

impl ResponseBody {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body for display: indented JSON when possible, else the raw text.
    pub fn pretty(&self) -> String {
        self.json
            .as_ref()
            .and_then(|v| serde_json::to_string_pretty(v).ok())
            .unwrap_or_else(|| self.text.clone())
    }
}

/// Read the status and body of a response, whatever the status.
///
/// # Errors
///
/// Returns [`ApiError::Request`] if the body cannot be read.
pub async fn read_body(resp: Response) -> Result<ResponseBody, ApiError> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    let json = serde_json::from_str(&text).ok();
    Ok(ResponseBody { status, text, json })
}

fn extract_header_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(key, value)| Some((key.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}
