//! Configuration error types.

/// Configuration-specific errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write config file.
    #[error("failed to write config file {path}: {source}")]
    WriteFile {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse config.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// The configured service origin is not a usable URL.
    #[error("invalid service origin {origin:?}: {reason}")]
    InvalidOrigin {
        /// The rejected value.
        origin: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The key is not a known configuration option.
    #[error("unknown configuration key {0:?}")]
    UnknownKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display_config_error_parse() {
        let err = ConfigError::Parse("invalid yaml".to_string());
        assert_eq!(err.to_string(), "failed to parse config: invalid yaml");
    }

    #[test]
    fn test_should_display_config_error_read_file() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ConfigError::ReadFile {
            path: "/home/.config/dsc/config.yml".to_string(),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/home/.config/dsc/config.yml"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_should_display_config_error_write_file() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = ConfigError::WriteFile {
            path: "/etc/dsc/sessions.yml".to_string(),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/dsc/sessions.yml"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_should_display_invalid_origin() {
        let err = ConfigError::InvalidOrigin {
            origin: "ftp://x".to_string(),
            reason: "unsupported scheme".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid service origin \"ftp://x\": unsupported scheme"
        );
    }

    #[test]
    fn test_should_display_unknown_key() {
        let err = ConfigError::UnknownKey("editor".to_string());
        assert_eq!(err.to_string(), "unknown configuration key \"editor\"");
    }
}
