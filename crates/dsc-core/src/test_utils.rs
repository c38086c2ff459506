//! Shared test utilities for the dsc crates.
//!
//! This module is only compiled in test builds (`#[cfg(test)]`).

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that read or write process environment variables.
pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// RAII guard for environment variables in tests.
///
/// Restores the original value (or removes the variable) when dropped.
#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    original: Option<String>,
}

impl EnvVarGuard {
    /// Set an environment variable, returning a guard that restores it on drop.
    pub fn set(key: &str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: Tests touching the environment hold `env_lock()`.
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_string(),
            original,
        }
    }

    /// Remove an environment variable, returning a guard that restores it on drop.
    pub fn unset(key: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: Tests touching the environment hold `env_lock()`.
        unsafe { std::env::remove_var(key) };
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.original {
            // SAFETY: See EnvVarGuard::set
            Some(val) => unsafe { std::env::set_var(&self.key, val) },
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}

/// A throwaway config directory with every `DSC_*` override cleared.
///
/// `DSC_CONFIG_DIR` points at the directory for as long as the value lives,
/// and the environment lock is held for the same span.
#[derive(Debug)]
pub struct ScopedConfigDir {
    dir: tempfile::TempDir,
    _guards: Vec<EnvVarGuard>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedConfigDir {
    /// Create the directory and point `DSC_CONFIG_DIR` at it.
    pub fn new() -> Self {
        let lock = env_lock();
        let dir = tempfile::tempdir().expect("create temp config dir");
        let dir_str = dir.path().to_string_lossy().to_string();
        let guards = vec![
            EnvVarGuard::set("DSC_CONFIG_DIR", &dir_str),
            EnvVarGuard::unset("DSC_TOKEN"),
            EnvVarGuard::unset("DSC_ORIGIN"),
            EnvVarGuard::unset("DSC_PROMPT"),
        ];
        Self {
            dir,
            _guards: guards,
            _lock: lock,
        }
    }

    /// Path of the directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file into the directory.
    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("write config fixture");
    }

    /// Read a file from the directory.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("read config file")
    }
}
