//! `dsc auth token` command implementation.

use clap::Args;

use dsc_core::cmdutil::AuthError;
use dsc_core::ios_println;

use crate::factory::Factory;

/// Print the token of the session for the current origin.
#[derive(Debug, Args)]
pub struct TokenArgs {}

impl TokenArgs {
    /// Run the token command.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if no token is stored.
    pub fn run(&self, factory: &Factory) -> anyhow::Result<()> {
        let ios = &factory.io;
        let origin = factory.origin()?;
        let cfg_lock = factory.config()?;
        let cfg = cfg_lock
            .lock()
            .map_err(|e| anyhow::anyhow!("config lock: {e}"))?;

        match cfg.authentication().active_token(&origin) {
            Some((token, _)) if !token.is_empty() => {
                ios_println!(ios, "{token}");
                Ok(())
            }
            _ => Err(AuthError(format!("no token found for {origin}")).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use dsc_core::config::MemoryConfig;

    use super::*;
    use crate::test_helpers::{TEST_TOKEN, TestHarness};

    #[tokio::test]
    async fn test_should_print_token_for_origin() {
        let h = TestHarness::new().await;
        TokenArgs {}.run(&h.factory).unwrap();
        assert_eq!(h.stdout().trim(), TEST_TOKEN);
    }

    #[tokio::test]
    async fn test_should_error_when_no_token_found() {
        let h = TestHarness::with_config(MemoryConfig::new()).await;
        let err = TokenArgs {}.run(&h.factory).unwrap_err();
        assert!(err.to_string().contains("no token found"));
    }
}
