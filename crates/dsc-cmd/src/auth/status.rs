//! `dsc auth status` command implementation.

use clap::Args;

use dsc_core::cmdutil::AuthError;
use dsc_core::ios_println;

use crate::factory::Factory;

/// Display the authentication state for the current origin.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Display the token in full.
    #[arg(short = 't', long)]
    show_token: bool,
}

impl StatusArgs {
    /// Run the status command.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if there is no session for the origin.
    pub fn run(&self, factory: &Factory) -> anyhow::Result<()> {
        let ios = &factory.io;
        let origin = factory.origin()?;

        let cfg_lock = factory.config()?;
        let cfg = cfg_lock
            .lock()
            .map_err(|e| anyhow::anyhow!("config lock: {e}"))?;
        let auth = cfg.authentication();

        let Some((token, source)) = auth.active_token(&origin) else {
            return Err(AuthError(format!(
                "not logged in to {origin}; run `dsc auth login` to authenticate"
            ))
            .into());
        };

        let cs = ios.color_scheme();
        ios_println!(ios, "{}", cs.bold(&origin));
        match auth.active_user(&origin) {
            Some(user) => ios_println!(
                ios,
                "  {} Logged in as {} ({source})",
                cs.success_icon(),
                cs.bold(&user)
            ),
            None => ios_println!(ios, "  {} Logged in ({source})", cs.success_icon()),
        }
        let shown = if self.show_token {
            token
        } else {
            mask_token(&token)
        };
        ios_println!(ios, "  - Token: {shown}");
        Ok(())
    }
}

/// Keep the first four characters of a token and mask the rest.
fn mask_token(token: &str) -> String {
    const VISIBLE: usize = 4;
    let len = token.chars().count();
    if len <= VISIBLE {
        return "*".repeat(len);
    }
    let prefix: String = token.chars().take(VISIBLE).collect();
    format!("{prefix}{}", "*".repeat(len - VISIBLE))
}
