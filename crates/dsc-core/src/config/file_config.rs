//! File-based configuration implementation.
//!
//! Reads/writes config.yml and sessions.yml in the dsc config directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AuthConfig, Config, config_dir, env_token, validate_value};
use crate::errors::ConfigError;

const CONFIG_FILE: &str = "config.yml";
const SESSIONS_FILE: &str = "sessions.yml";

/// File-based configuration backed by YAML files.
#[derive(Debug)]
pub struct FileConfig {
    config_path: PathBuf,
    sessions_path: PathBuf,
    global: ConfigData,
    sessions: HashMap<String, SessionEntry>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prompt: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl FileConfig {
    /// Load configuration from [`config_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_dir())
    }

    /// Load configuration from a specific directory.
    ///
    /// Missing or empty files yield defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        let sessions_path = dir.join(SESSIONS_FILE);

        let global: ConfigData = read_yaml(&config_path)?;
        let sessions: HashMap<String, SessionEntry> = read_yaml(&sessions_path)?;
        debug!(dir = %dir.display(), sessions = sessions.len(), "Loaded configuration");

        Ok(Self {
            config_path,
            sessions_path,
            global,
            sessions,
        })
    }

    /// Create an empty in-memory config (for testing).
    pub fn empty() -> Self {
        Self {
            config_path: PathBuf::from("/dev/null"),
            sessions_path: PathBuf::from("/dev/null"),
            global: ConfigData::default(),
            sessions: HashMap::new(),
        }
    }

    fn get_global_value(&self, key: &str) -> Option<String> {
        match key {
            "origin" => self.global.origin.clone(),
            "prompt" => self.global.prompt.clone(),
            _ => None,
        }
    }
}

fn read_yaml<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Write a file readable only by the current user.
fn write_private(path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())
}

impl Config for FileConfig {
    fn get(&self, key: &str) -> Option<String> {
        // Check environment variables first
        let env_key = format!("DSC_{}", key.to_uppercase());
        if let Ok(val) = std::env::var(&env_key) {
            return Some(val);
        }
        self.get_global_value(key)
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = validate_value(key, value)?;
        match key {
            "origin" => self.global.origin = Some(value),
            "prompt" => self.global.prompt = Some(value),
            _ => {}
        }
        Ok(())
    }

    fn authentication(&self) -> &dyn AuthConfig {
        self
    }

    fn authentication_mut(&mut self) -> &mut dyn AuthConfig {
        self
    }

    fn write(&self) -> anyhow::Result<()> {
        let dir = self.config_path.parent().ok_or_else(|| {
            anyhow::anyhow!(
                "config path has no parent directory: {}",
                self.config_path.display()
            )
        })?;
        fs::create_dir_all(dir)?;

        let config_yaml =
            serde_yaml::to_string(&self.global).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(&self.config_path, config_yaml).map_err(|e| ConfigError::WriteFile {
            path: self.config_path.display().to_string(),
            source: e,
        })?;

        let sessions_yaml = serde_yaml::to_string(&self.sessions)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        write_private(&self.sessions_path, &sessions_yaml).map_err(|e| {
            ConfigError::WriteFile {
                path: self.sessions_path.display().to_string(),
                source: e,
            }
        })?;

        Ok(())
    }
}

impl AuthConfig for FileConfig {
    fn active_token(&self, origin: &str) -> Option<(String, String)> {
        if let Some(found) = env_token() {
            return Some(found);
        }
        let token = self.sessions.get(origin)?.token.as_ref()?;
        Some((token.clone(), "config".to_string()))
    }

    fn active_user(&self, origin: &str) -> Option<String> {
        self.sessions.get(origin)?.user.clone()
    }

    fn origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = self.sessions.keys().cloned().collect();
        origins.sort();
        origins
    }

    fn login(&mut self, origin: &str, username: &str, token: &str) -> anyhow::Result<()> {
        let entry = self.sessions.entry(origin.to_string()).or_default();
        entry.token = Some(token.to_string());
        entry.user = (!username.is_empty()).then(|| username.to_string());
        self.write()
    }

    fn logout(&mut self, origin: &str) -> anyhow::Result<bool> {
        let existed = self.sessions.remove(origin).is_some();
        if existed {
            self.write()?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::{EnvVarGuard, ScopedConfigDir, env_lock};

    #[test]
    fn test_should_create_empty_config() {
        let _lock = env_lock();
        let _guard = EnvVarGuard::unset("DSC_ORIGIN");
        let cfg = FileConfig::empty();
        assert!(cfg.origins().is_empty());
        assert_eq!(cfg.origin(), "http://localhost:8088");
        assert_eq!(cfg.prompt(), "enabled");
    }

    #[test]
    fn test_should_set_and_get_origin_normalized() {
        let _lock = env_lock();
        let _guard = EnvVarGuard::unset("DSC_ORIGIN");
        let mut cfg = FileConfig::empty();
        cfg.set("origin", "https://Data.Example.com/").unwrap();
        assert_eq!(cfg.get("origin"), Some("https://data.example.com".to_string()));
    }

    #[test]
    fn test_should_reject_unknown_key() {
        let mut cfg = FileConfig::empty();
        assert!(cfg.set("editor", "vim").is_err());
    }

    #[test]
    fn test_should_prefer_env_over_file_value() {
        let _lock = env_lock();
        let _guard = EnvVarGuard::set("DSC_PROMPT", "disabled");
        let mut cfg = FileConfig::empty();
        cfg.set("prompt", "enabled").unwrap();
        assert_eq!(cfg.prompt(), "disabled");
    }

    #[test]
    fn test_should_load_defaults_from_missing_files() {
        let dir = ScopedConfigDir::new();
        let cfg = FileConfig::load().unwrap();
        assert_eq!(cfg.origin(), "http://localhost:8088");
        assert!(cfg.origins().is_empty());
        assert!(!dir.path().join("config.yml").exists());
    }

    #[test]
    fn test_should_load_from_yaml_files() {
        let dir = ScopedConfigDir::new();
        dir.write("config.yml", "origin: http://ds.internal:8088\nprompt: disabled\n");
        dir.write(
            "sessions.yml",
            "\"http://ds.internal:8088\":\n  user: admin\n  token: tok-123\n",
        );

        let cfg = FileConfig::load().unwrap();
        assert_eq!(cfg.origin(), "http://ds.internal:8088");
        assert_eq!(cfg.prompt(), "disabled");
        assert_eq!(
            cfg.active_token("http://ds.internal:8088"),
            Some(("tok-123".to_string(), "config".to_string()))
        );
        assert_eq!(
            cfg.active_user("http://ds.internal:8088"),
            Some("admin".to_string())
        );
    }

    #[test]
    fn test_should_treat_blank_files_as_empty() {
        let dir = ScopedConfigDir::new();
        dir.write("config.yml", "   \n");
        dir.write("sessions.yml", "");
        let cfg = FileConfig::load().unwrap();
        assert!(cfg.origins().is_empty());
    }

    #[test]
    fn test_should_fail_on_malformed_yaml() {
        let dir = ScopedConfigDir::new();
        dir.write("config.yml", "origin: [unclosed\n");
        let err = FileConfig::load().unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn test_should_persist_login_and_reload() {
        let dir = ScopedConfigDir::new();
        let mut cfg = FileConfig::load().unwrap();
        cfg.login("http://localhost:8088", "admin", "secret-token")
            .unwrap();

        let reloaded = FileConfig::load_from(dir.path()).unwrap();
        assert_eq!(
            reloaded.active_token("http://localhost:8088"),
            Some(("secret-token".to_string(), "config".to_string()))
        );
        assert_eq!(reloaded.origins(), vec!["http://localhost:8088".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_should_write_sessions_file_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = ScopedConfigDir::new();
        let mut cfg = FileConfig::load().unwrap();
        cfg.login("http://localhost:8088", "admin", "t").unwrap();

        let mode = fs::metadata(dir.path().join("sessions.yml"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_should_logout_and_report_existence() {
        let dir = ScopedConfigDir::new();
        let mut cfg = FileConfig::load().unwrap();
        cfg.login("http://localhost:8088", "admin", "t").unwrap();

        assert!(cfg.logout("http://localhost:8088").unwrap());
        assert!(!cfg.logout("http://localhost:8088").unwrap());
        assert!(!dir.read("sessions.yml").contains("admin"));
    }

    #[test]
    fn test_should_prefer_env_token_over_stored_session() {
        let _dir = ScopedConfigDir::new();
        let mut cfg = FileConfig::load().unwrap();
        cfg.login("http://localhost:8088", "admin", "stored").unwrap();

        let _guard = EnvVarGuard::set("DSC_TOKEN", "from-env");
        assert_eq!(
            cfg.active_token("http://localhost:8088"),
            Some(("from-env".to_string(), "DSC_TOKEN".to_string()))
        );
    }

    #[test]
    fn test_should_write_settings_to_config_file() {
        let dir = ScopedConfigDir::new();
        let mut cfg = FileConfig::load().unwrap();
        cfg.set("origin", "localhost:9000").unwrap();
        cfg.write().unwrap();
        assert_eq!(dir.read("config.yml"), "origin: http://localhost:9000\n");
    }
}
