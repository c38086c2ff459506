//! Shared test utilities for command testing.
//!
//! Provides a harness with a mock datasource service, captured output, and
//! a stub prompter, plus helpers for mounting service responses.

use std::sync::Arc;

use dsc_core::config::MemoryConfig;
use dsc_core::iostreams::TestOutput;
use dsc_core::prompter::StubPrompter;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::factory::Factory;

/// Token stored for the mock server origin by [`TestHarness::new`].
pub const TEST_TOKEN: &str = "test-token-123";

/// A fully-configured test harness with factory, output capture, and mock server.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stdout/stderr output.
    pub output: TestOutput,
    /// Wiremock server standing in for the datasource service.
    pub server: MockServer,
    /// Stub prompter for providing test answers.
    pub prompter: Arc<StubPrompter>,
}

impl TestHarness {
    /// Create a harness logged in to the mock server as `admin`.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = MemoryConfig::new().with_session(&server.uri(), "admin", TEST_TOKEN);
        Self::build(server, config)
    }

    /// Create a harness with a custom `MemoryConfig`.
    ///
    /// The config is used as given, so sessions must be keyed by
    /// [`TestHarness::origin`] to be picked up; use
    /// [`TestHarness::with_config_for`] for that.
    pub async fn with_config(config: MemoryConfig) -> Self {
        let server = MockServer::start().await;
        Self::build(server, config)
    }

    /// Create a harness whose config is built from the mock server origin.
    pub async fn with_config_for(make: impl FnOnce(&str) -> MemoryConfig) -> Self {
        let server = MockServer::start().await;
        let config = make(&server.uri());
        Self::build(server, config)
    }

    fn build(server: MockServer, config: MemoryConfig) -> Self {
        let (factory, output) = Factory::test();
        let (factory, prompter) = factory.with_stub_prompter();
        let factory = factory
            .with_http_client(reqwest::Client::new())
            .with_origin(server.uri())
            .with_config(Box::new(config));

        Self {
            factory,
            output,
            server,
            prompter,
        }
    }

    /// Origin of the mock server, as stored in sessions.
    pub fn origin(&self) -> String {
        self.server.uri()
    }

    /// Get captured stdout as a string.
    pub fn stdout(&self) -> String {
        self.output.stdout()
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }

    /// Requests the mock server has received so far.
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

// --- Wiremock helpers ---

/// Mount a response for an authenticated call to a service path.
///
/// `service_path` is relative to the service prefix, e.g. `datasource/list`.
pub async fn mock_service(
    server: &MockServer,
    http_method: &str,
    service_path: &str,
    status: u16,
    response_body: serde_json::Value,
) {
    Mock::given(method(http_method))
        .and(path(format!("/sanic/{service_path}")))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_json(response_body))
        .mount(server)
        .await;
}

/// Mount a plain-text response for any call to a service path.
pub async fn mock_service_text(
    server: &MockServer,
    http_method: &str,
    service_path: &str,
    status: u16,
    body: &str,
) {
    Mock::given(method(http_method))
        .and(path(format!("/sanic/{service_path}")))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}
