//! Configuration and session storage for dsc.
//!
//! Settings live in `config.yml` and per-origin sessions in
//! `sessions.yml`, both inside [`config_dir`].

mod file_config;
mod memory_config;

pub use file_config::FileConfig;
pub use memory_config::MemoryConfig;

use crate::errors::ConfigError;
use crate::instance;

/// Environment variable that overrides any stored session token.
pub const TOKEN_ENV: &str = "DSC_TOKEN";

/// Configuration directory path (usually `~/.config/dsc`).
pub fn config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("DSC_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join(".config")
                .join("dsc")
        },
        |d| d.join("dsc"),
    )
}

/// Configuration trait for accessing settings.
pub trait Config: Send + Sync + std::fmt::Debug {
    /// Get a config value.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a config value after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or values a key does not accept.
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Get authentication configuration.
    fn authentication(&self) -> &dyn AuthConfig;

    /// Get mutable authentication configuration.
    fn authentication_mut(&mut self) -> &mut dyn AuthConfig;

    /// Write config to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be saved.
    fn write(&self) -> anyhow::Result<()>;

    /// Get a config value, falling back to the key's default.
    fn get_or_default(&self, key: &str) -> String {
        self.get(key)
            .unwrap_or_else(|| default_for_key(key).to_string())
    }

    /// The service origin requests are sent to.
    fn origin(&self) -> String {
        self.get_or_default("origin")
    }

    /// Get prompt setting.
    fn prompt(&self) -> String {
        self.get_or_default("prompt")
    }
}

/// Stored sessions, one per service origin.
pub trait AuthConfig: Send + Sync + std::fmt::Debug {
    /// Get the active token for an origin. Returns (token, source).
    fn active_token(&self, origin: &str) -> Option<(String, String)>;

    /// Get the user the session for an origin belongs to.
    fn active_user(&self, origin: &str) -> Option<String>;

    /// Get all origins that have a stored session.
    fn origins(&self) -> Vec<String>;

    /// Store a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be stored.
    fn login(&mut self, origin: &str, username: &str, token: &str) -> anyhow::Result<()>;

    /// Remove the session for an origin. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be updated.
    fn logout(&mut self, origin: &str) -> anyhow::Result<bool>;
}

/// Known configuration keys with descriptions and allowed values.
pub static CONFIG_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        key: "origin",
        description: "the origin of the datasource service, e.g. http://localhost:8088",
        allowed_values: &[],
        default_value: instance::DEFAULT_ORIGIN,
    },
    ConfigOption {
        key: "prompt",
        description: "toggle interactive prompting in the terminal",
        allowed_values: &["enabled", "disabled"],
        default_value: "enabled",
    },
];

/// A known configuration option.
#[derive(Debug)]
pub struct ConfigOption {
    /// Config key name.
    pub key: &'static str,
    /// Description of what this option does.
    pub description: &'static str,
    /// Valid values, empty means any string.
    pub allowed_values: &'static [&'static str],
    /// Default value.
    pub default_value: &'static str,
}

impl ConfigOption {
    /// Get the current value from config, or the default.
    pub fn current_value(&self, config: &dyn Config) -> String {
        config.get_or_default(self.key)
    }
}

/// Default configuration values.
pub fn default_for_key(key: &str) -> &'static str {
    CONFIG_OPTIONS
        .iter()
        .find(|o| o.key == key)
        .map_or("", |o| o.default_value)
}

/// Validate a value for a known key, returning the form to store.
///
/// Origins are normalized; enumerated keys must use an allowed value.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownKey`] or a value-specific error.
pub fn validate_value(key: &str, value: &str) -> Result<String, ConfigError> {
    let option = CONFIG_OPTIONS
        .iter()
        .find(|o| o.key == key)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

    if key == "origin" {
        return instance::normalize_origin(value);
    }

    if !option.allowed_values.is_empty() && !option.allowed_values.contains(&value) {
        return Err(ConfigError::Parse(format!(
            "invalid value {value:?} for {key}; valid values: {}",
            option.allowed_values.join(", ")
        )));
    }
    Ok(value.to_string())
}

/// Read the token override from the environment, if set.
pub fn env_token() -> Option<(String, String)> {
    std::env::var(TOKEN_ENV)
        .ok()
        .map(|token| (token, TOKEN_ENV.to_string()))
}
