//! In-memory configuration for testing.
//!
//! Provides a [`MemoryConfig`] that implements [`Config`] and [`AuthConfig`]
//! without touching the filesystem or the environment, making it suitable
//! for tests that need deterministic configuration.

use std::collections::HashMap;

use super::{AuthConfig, Config, validate_value};

/// In-memory configuration for testing.
///
/// # Examples
///
/// ```
/// use dsc_core::config::{Config, MemoryConfig};
///
/// let config = MemoryConfig::new()
///     .with_session("http://localhost:8088", "admin", "tok-123");
///
/// let auth = config.authentication();
/// let (token, source) = auth.active_token("http://localhost:8088").unwrap();
/// assert_eq!(token, "tok-123");
/// assert_eq!(source, "config");
/// ```
#[derive(Debug, Default)]
pub struct MemoryConfig {
    settings: HashMap<String, String>,
    /// origin -> (user, token)
    sessions: HashMap<String, (String, String)>,
}

impl MemoryConfig {
    /// Create a new empty in-memory configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stored session for an origin.
    #[must_use]
    pub fn with_session(mut self, origin: &str, username: &str, token: &str) -> Self {
        self.sessions.insert(
            origin.to_string(),
            (username.to_string(), token.to_string()),
        );
        self
    }

    /// Set the service origin.
    #[must_use]
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.settings
            .insert("origin".to_string(), origin.to_string());
        self
    }
}

impl Config for MemoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.settings.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = validate_value(key, value)?;
        self.settings.insert(key.to_string(), value);
        Ok(())
    }

    fn authentication(&self) -> &dyn AuthConfig {
        self
    }

    fn authentication_mut(&mut self) -> &mut dyn AuthConfig {
        self
    }

    fn write(&self) -> anyhow::Result<()> {
        // No-op: in-memory config has nothing to persist.
        Ok(())
    }
}

impl AuthConfig for MemoryConfig {
    fn active_token(&self, origin: &str) -> Option<(String, String)> {
        let (_, token) = self.sessions.get(origin)?;
        Some((token.clone(), "config".to_string()))
    }

    fn active_user(&self, origin: &str) -> Option<String> {
        let (user, _) = self.sessions.get(origin)?;
        (!user.is_empty()).then(|| user.clone())
    }

    fn origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = self.sessions.keys().cloned().collect();
        origins.sort();
        origins
    }

    fn login(&mut self, origin: &str, username: &str, token: &str) -> anyhow::Result<()> {
        self.sessions.insert(
            origin.to_string(),
            (username.to_string(), token.to_string()),
        );
        Ok(())
    }

    fn logout(&mut self, origin: &str) -> anyhow::Result<bool> {
        Ok(self.sessions.remove(origin).is_some())
    }
}
