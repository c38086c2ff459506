//! `dsc auth login` command implementation.

use anyhow::Context;
use clap::Args;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use dsc_api::auth;
use dsc_core::cmdutil::FlagError;
use dsc_core::ios_eprintln;

use crate::factory::Factory;

/// Log in to the datasource service.
///
/// By default the username and password are exchanged for a token, which
/// is stored for the current origin. Use `--with-token` to store a token
/// read from standard input instead.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account name.
    #[arg(short, long)]
    username: Option<String>,

    /// Read the password from standard input.
    #[arg(long, conflicts_with = "with_token")]
    password_stdin: bool,

    /// Read a token from standard input and store it as is.
    #[arg(long)]
    with_token: bool,
}

impl LoginArgs {
    /// Run the login command.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or the service rejects them.
    pub async fn run(&self, factory: &Factory) -> anyhow::Result<()> {
        let origin = factory.origin()?;

        {
            let cfg = factory
                .config()?
                .lock()
                .map_err(|e| anyhow::anyhow!("config lock: {e}"))?;
            if let Some((_, source)) = cfg.authentication().active_token(&origin) {
                super::ensure_token_writeable(factory, &source)?;
            }
        }

        let (username, token) = if self.with_token {
            let token = read_secret(factory, "token")?;
            (self.username.clone().unwrap_or_default(), token)
        } else {
            let username = self.resolve_username(factory)?;
            let password = self.resolve_password(factory)?;
            let http = factory.http_client()?;
            let token = auth::login(&http, &origin, &username, &password)
                .await
                .context("login failed")?;
            (username, token)
        };

        factory
            .config()?
            .lock()
            .map_err(|e| anyhow::anyhow!("config lock: {e}"))?
            .authentication_mut()
            .login(&origin, &username, token.expose_secret())?;

        info!(origin, username, "Logged in");
        let ios = &factory.io;
        let cs = ios.color_scheme();
        if username.is_empty() {
            ios_eprintln!(ios, "{} Logged in to {origin}", cs.success_icon());
        } else {
            ios_eprintln!(
                ios,
                "{} Logged in to {origin} as {}",
                cs.success_icon(),
                cs.bold(&username)
            );
        }
        Ok(())
    }

    fn resolve_username(&self, factory: &Factory) -> anyhow::Result<String> {
        if let Some(ref username) = self.username {
            return Ok(username.clone());
        }
        if !factory.can_prompt() {
            return Err(FlagError(
                "`--username` required when not running interactively".to_string(),
            )
            .into());
        }
        let username = factory.prompter().input("Username", "")?;
        if username.trim().is_empty() {
            anyhow::bail!("username cannot be empty");
        }
        Ok(username.trim().to_string())
    }

    fn resolve_password(&self, factory: &Factory) -> anyhow::Result<SecretString> {
        if self.password_stdin {
            return read_secret(factory, "password");
        }
        if !factory.can_prompt() {
            return Err(FlagError(
                "`--password-stdin` required when not running interactively".to_string(),
            )
            .into());
        }
        let password = factory.prompter().password("Password")?;
        Ok(SecretString::from(password))
    }
}

/// Read a single secret line from stdin.
fn read_secret(factory: &Factory, what: &str) -> anyhow::Result<SecretString> {
    let input = factory
        .io
        .read_stdin()
        .with_context(|| format!("failed to read {what} from stdin"))?;
    let secret = input.trim();
    if secret.is_empty() {
        anyhow::bail!("{what} cannot be empty");
    }
    Ok(SecretString::from(secret))
}
