//! Session provider backed by the stored configuration.

use std::sync::{Arc, Mutex};

use dsc_api::session::{SessionError, SessionProvider};
use dsc_core::config::Config;
use secrecy::SecretString;

/// Configuration shared between the factory and the session provider.
pub type SharedConfig = Arc<Mutex<Box<dyn Config>>>;

/// Reads the token for one origin from the session store on every call.
///
/// `auth login` or `auth logout` in between two requests is therefore
/// visible to the second one.
#[derive(Debug)]
pub struct ConfigSession {
    config: SharedConfig,
    origin: String,
}

impl ConfigSession {
    /// Create a provider for the session stored under `origin`.
    pub fn new(config: SharedConfig, origin: impl Into<String>) -> Self {
        Self {
            config,
            origin: origin.into(),
        }
    }
}

impl SessionProvider for ConfigSession {
    fn user_token(&self) -> Result<Option<SecretString>, SessionError> {
        let cfg = self
            .config
            .lock()
            .map_err(|e| SessionError::Unavailable(format!("config lock: {e}")))?;
        Ok(cfg
            .authentication()
            .active_token(&self.origin)
            .map(|(token, _)| SecretString::from(token)))
    }
}

#[cfg(test)]
mod tests {
    use dsc_core::config::MemoryConfig;
    use secrecy::ExposeSecret;

    use super::*;

    fn shared(config: MemoryConfig) -> SharedConfig {
        let boxed: Box<dyn Config> = Box::new(config);
        Arc::new(Mutex::new(boxed))
    }

    #[test]
    fn test_should_read_token_for_origin() {
        let config = shared(MemoryConfig::new().with_session("http://ds:1", "admin", "tok"));
        let session = ConfigSession::new(config, "http://ds:1");
        let token = session.user_token().unwrap().unwrap();
        assert_eq!(token.expose_secret(), "tok");
    }

    #[test]
    fn test_should_return_none_for_other_origin() {
        let config = shared(MemoryConfig::new().with_session("http://ds:1", "admin", "tok"));
        let session = ConfigSession::new(config, "http://other:2");
        assert!(session.user_token().unwrap().is_none());
    }

    #[test]
    fn test_should_see_login_after_creation() {
        let config = shared(MemoryConfig::new());
        let session = ConfigSession::new(Arc::clone(&config), "http://ds:1");
        assert!(session.user_token().unwrap().is_none());

        config
            .lock()
            .unwrap()
            .authentication_mut()
            .login("http://ds:1", "admin", "fresh")
            .unwrap();
        let token = session.user_token().unwrap().unwrap();
        assert_eq!(token.expose_secret(), "fresh");
    }
}
