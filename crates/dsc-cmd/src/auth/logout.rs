//! `dsc auth logout` command implementation.

use clap::Args;

use dsc_core::ios_eprintln;

use crate::factory::Factory;

/// Remove the session stored for the current origin.
///
/// This does not invalidate the token on the server.
#[derive(Debug, Args)]
pub struct LogoutArgs {}

impl LogoutArgs {
    /// Run the logout command.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no stored session or it cannot be removed.
    pub fn run(&self, factory: &Factory) -> anyhow::Result<()> {
        let ios = &factory.io;
        let origin = factory.origin()?;

        let cfg_lock = factory.config()?;
        let mut cfg = cfg_lock
            .lock()
            .map_err(|e| anyhow::anyhow!("config lock: {e}"))?;

        if let Some((_, source)) = cfg.authentication().active_token(&origin) {
            super::ensure_token_writeable(factory, &source)?;
        }

        let user = cfg.authentication().active_user(&origin);
        if !cfg.authentication_mut().logout(&origin)? {
            anyhow::bail!("not logged in to {origin}");
        }

        let cs = ios.color_scheme();
        match user {
            Some(user) => ios_eprintln!(
                ios,
                "{} Logged out of {origin} account {}",
                cs.success_icon(),
                cs.bold(&user)
            ),
            None => ios_eprintln!(ios, "{} Logged out of {origin}", cs.success_icon()),
        }
        Ok(())
    }
}
