//! Factory for shared command dependencies.
//!
//! Provides lazy initialization of configuration, the HTTP client, the
//! datasource client, and the prompter. Supports test mode with dependency
//! injection for isolated testing.

use std::sync::{Arc, Mutex, OnceLock};

use dsc_api::client::Client;
use dsc_api::http::{HttpClientOptions, build_client};
use dsc_api::session::{SessionProvider, StaticToken};
use dsc_core::config::{Config, FileConfig};
use dsc_core::instance;
use dsc_core::iostreams::{IOStreams, TestOutput};
use dsc_core::prompter::{DialoguerPrompter, Prompter, StubPrompter};
use secrecy::{ExposeSecret, SecretString};

use crate::session::{ConfigSession, SharedConfig};

/// Shared factory providing lazily-initialized dependencies to all commands.
///
/// In production mode, dependencies are created from the real system.
/// In test mode, dependencies can be injected for isolated testing.
pub struct Factory {
    /// Application version.
    pub app_version: String,
    /// I/O streams.
    pub io: IOStreams,
    /// Configuration (lazily loaded).
    config: OnceLock<SharedConfig>,
    /// Origin given on the command line.
    origin_override: Option<String>,

    // Test overrides
    http_override: Option<reqwest::Client>,
    token_override: Option<SecretString>,
    prompter_stub: Option<Arc<StubPrompter>>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("app_version", &self.app_version)
            .field("origin_override", &self.origin_override)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a new factory with the given version.
    pub fn new(app_version: String) -> Self {
        let mut io = IOStreams::system();

        // Apply environment overrides
        if std::env::var("DSC_PROMPT_DISABLED").is_ok() {
            io.set_never_prompt(true);
        }

        Self::with_io(app_version, io)
    }

    /// Create a test factory with captured I/O.
    ///
    /// Returns the factory and a `TestOutput` for reading captured
    /// stdout/stderr.
    pub fn test() -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();
        (Self::with_io("test".to_string(), io), output)
    }

    fn with_io(app_version: String, io: IOStreams) -> Self {
        Self {
            app_version,
            io,
            config: OnceLock::new(),
            origin_override: None,
            http_override: None,
            token_override: None,
            prompter_stub: None,
        }
    }

    /// Send requests to this origin instead of the configured one.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin_override = Some(origin.into());
        self
    }

    /// Set a custom reqwest HTTP client (e.g., backed by wiremock).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_override = Some(client);
        self
    }

    /// Use a fixed token instead of the stored session.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token_override = Some(SecretString::from(token.into()));
        self
    }

    /// Set a config override for testing.
    #[must_use]
    pub fn with_config(self, config: Box<dyn Config>) -> Self {
        let _ = self.config.set(Arc::new(Mutex::new(config)));
        self
    }

    /// Set a stub prompter and return the shared reference for configuration.
    pub fn with_stub_prompter(mut self) -> (Self, Arc<StubPrompter>) {
        let stub = Arc::new(StubPrompter::default());
        self.prompter_stub = Some(stub.clone());
        (self, stub)
    }

    /// Get the configuration, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if config cannot be loaded.
    pub fn config(&self) -> anyhow::Result<&SharedConfig> {
        if let Some(cfg) = self.config.get() {
            return Ok(cfg);
        }
        let boxed: Box<dyn Config> = Box::new(FileConfig::load()?);
        // Ignore set error - another thread may have set it first
        let _ = self.config.set(Arc::new(Mutex::new(boxed)));
        self.config
            .get()
            .ok_or_else(|| anyhow::anyhow!("failed to initialize config"))
    }

    /// The normalized origin commands talk to.
    ///
    /// `--origin` wins over the configured value.
    ///
    /// # Errors
    ///
    /// Returns an error if config cannot be loaded or the origin is invalid.
    pub fn origin(&self) -> anyhow::Result<String> {
        let raw = match self.origin_override {
            Some(ref origin) => origin.clone(),
            None => {
                let cfg = self
                    .config()?
                    .lock()
                    .map_err(|e| anyhow::anyhow!("config lock: {e}"))?;
                cfg.origin()
            }
        };
        Ok(instance::normalize_origin(&raw)?)
    }

    /// Whether interactive prompts may be shown.
    ///
    /// Requires a terminal and the `prompt` setting not being `disabled`.
    pub fn can_prompt(&self) -> bool {
        if !self.io.can_prompt() {
            return false;
        }
        self.config()
            .ok()
            .and_then(|c| Some(c.lock().ok()?.prompt()))
            .is_none_or(|prompt| prompt != "disabled")
    }

    /// Create a prompter instance.
    ///
    /// In test mode with a stub prompter, returns the stub.
    pub fn prompter(&self) -> Box<dyn Prompter> {
        if let Some(ref stub) = self.prompter_stub {
            return Box::new(StubPrompterWrapper(stub.clone()));
        }
        Box::new(DialoguerPrompter)
    }

    /// Build an HTTP client.
    ///
    /// In test mode, returns the injected client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        if let Some(ref client) = self.http_override {
            return Ok(client.clone());
        }
        let opts = HttpClientOptions {
            app_version: self.app_version.clone(),
            skip_default_headers: false,
            log_verbose: std::env::var("DSC_DEBUG").is_ok(),
        };
        Ok(build_client(&opts)?)
    }

    /// Build the datasource client for the current origin.
    ///
    /// The token comes from the stored session and is re-read for every
    /// request, unless a fixed token was injected.
    ///
    /// # Errors
    ///
    /// Returns an error if config cannot be loaded, the origin is invalid,
    /// or the HTTP client cannot be built.
    pub fn datasource_client(&self) -> anyhow::Result<Client> {
        let http = self.http_client()?;
        let origin = self.origin()?;

        let session: Arc<dyn SessionProvider> = match self.token_override {
            Some(ref token) => Arc::new(StaticToken::new(token.expose_secret())),
            None => Arc::new(ConfigSession::new(Arc::clone(self.config()?), origin.as_str())),
        };

        Ok(Client::new(http, &origin, session)?)
    }
}

/// Wrapper to use `Arc<StubPrompter>` as `Box<dyn Prompter>`.
#[derive(Debug)]
struct StubPrompterWrapper(Arc<StubPrompter>);

impl Prompter for StubPrompterWrapper {
    fn input(&self, prompt: &str, default: &str) -> anyhow::Result<String> {
        self.0.input(prompt, default)
    }

    fn password(&self, prompt: &str) -> anyhow::Result<String> {
        self.0.password(prompt)
    }

    fn confirm(&self, prompt: &str, default: bool) -> anyhow::Result<bool> {
        self.0.confirm(prompt, default)
    }
}
