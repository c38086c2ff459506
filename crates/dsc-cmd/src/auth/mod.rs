//! Authentication commands (`dsc auth`).
//!
//! Manage the session stored for the current service origin.

pub mod login;
pub mod logout;
pub mod status;
pub mod token;

use clap::Subcommand;

use dsc_core::cmdutil::SilentError;
use dsc_core::config::TOKEN_ENV;
use dsc_core::ios_eprintln;

use crate::factory::Factory;

/// Auth subcommands.
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in to the datasource service.
    Login(login::LoginArgs),
    /// Remove the stored session.
    Logout(logout::LogoutArgs),
    /// Display the authentication state.
    Status(status::StatusArgs),
    /// Print the token of the stored session.
    Token(token::TokenArgs),
}

impl AuthCommand {
    /// Run the appropriate auth subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    pub async fn run(self, factory: &Factory) -> anyhow::Result<()> {
        match self {
            Self::Login(args) => args.run(factory).await,
            Self::Logout(args) => args.run(factory),
            Self::Status(args) => args.run(factory),
            Self::Token(args) => args.run(factory),
        }
    }
}

/// Refuse to change the stored session while `DSC_TOKEN` overrides it.
fn ensure_token_writeable(factory: &Factory, source: &str) -> anyhow::Result<()> {
    if source != TOKEN_ENV {
        return Ok(());
    }
    let ios = &factory.io;
    ios_eprintln!(
        ios,
        "The value of the {TOKEN_ENV} environment variable is being used for authentication."
    );
    ios_eprintln!(
        ios,
        "To change the stored session, first clear the value from the environment."
    );
    Err(SilentError.into())
}
