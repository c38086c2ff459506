//! dsc - command line client for the datasource service.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dsc_cmd::factory::Factory;

/// Process exit codes.
mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
    pub const CANCEL: i32 = 2;
    pub const AUTH: i32 = 4;
}

/// Work with the datasource service from the command line.
#[derive(Debug, Parser)]
#[command(name = "dsc", version, about = "Datasource service client")]
struct Cli {
    /// Origin of the datasource service, e.g. http://localhost:8088.
    #[arg(long, global = true, env = "DSC_ORIGIN", value_name = "URL")]
    origin: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List, inspect, and modify datasources.
    #[command(subcommand, alias = "ds")]
    Datasource(dsc_cmd::datasource::DatasourceCommand),
    /// Log in to and out of the datasource service.
    #[command(subcommand)]
    Auth(dsc_cmd::auth::AuthCommand),
    /// Manage configuration for dsc.
    #[command(subcommand)]
    Config(dsc_cmd::config::ConfigCommand),
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DSC_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut factory = Factory::new(env!("CARGO_PKG_VERSION").to_string());
    if let Some(origin) = cli.origin {
        factory = factory.with_origin(origin);
    }

    let exit_code = if let Some(cmd) = cli.command {
        match run_command(cmd, &factory).await {
            Ok(()) => exit_codes::OK,
            Err(e) => exit_code_for(&e),
        }
    } else {
        use clap::CommandFactory;
        Cli::command().print_help().ok();
        println!();
        exit_codes::OK
    };

    std::process::exit(exit_code);
}

async fn run_command(cmd: Commands, factory: &Factory) -> anyhow::Result<()> {
    match cmd {
        Commands::Datasource(sub) => sub.run(factory).await,
        Commands::Auth(sub) => sub.run(factory).await,
        Commands::Config(sub) => sub.run(factory),
    }
}

/// Report an error and pick the exit code for it.
fn exit_code_for(e: &anyhow::Error) -> i32 {
    if e.downcast_ref::<dsc_core::cmdutil::SilentError>().is_some() {
        return exit_codes::ERROR;
    }
    if dsc_core::cmdutil::is_user_cancellation(e) {
        return exit_codes::CANCEL;
    }
    if e.downcast_ref::<dsc_core::cmdutil::AuthError>().is_some() {
        tracing::error!("{e:#}");
        return exit_codes::AUTH;
    }
    if e
        .downcast_ref::<dsc_api::ApiError>()
        .is_some_and(dsc_api::ApiError::is_unauthorized)
    {
        tracing::error!("{e:#}");
        tracing::error!("Try authenticating with: dsc auth login");
        return exit_codes::AUTH;
    }
    tracing::error!("{e:#}");
    exit_codes::ERROR
}
