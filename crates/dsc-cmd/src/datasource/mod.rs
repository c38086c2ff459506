//! Datasource commands (`dsc datasource`).
//!
//! Each subcommand calls exactly one endpoint of the datasource service and
//! prints the response body to stdout.

pub mod delete;
pub mod fields;
pub mod list;
pub mod preview;
pub mod save;
pub mod tables;
pub mod view;

use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;

use dsc_api::client::{check_response, read_body};
use dsc_core::cmdutil::FlagError;
use dsc_core::ios_println;

use crate::factory::Factory;

/// Datasource subcommands.
#[derive(Debug, Subcommand)]
pub enum DatasourceCommand {
    /// List all datasources.
    #[command(alias = "ls")]
    List(list::ListArgs),
    /// List the tables of a datasource.
    Tables(tables::TablesArgs),
    /// List the fields of a table.
    Fields(fields::FieldsArgs),
    /// Preview the rows a build specification produces.
    Preview(preview::PreviewArgs),
    /// Save table metadata.
    SaveTable(save::SaveTableArgs),
    /// Save field metadata.
    SaveField(save::SaveFieldArgs),
    /// Show the detail of a datasource.
    View(view::ViewArgs),
    /// Delete a datasource.
    Delete(delete::DeleteArgs),
}

impl DatasourceCommand {
    /// Run the appropriate datasource subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    pub async fn run(self, factory: &Factory) -> anyhow::Result<()> {
        match self {
            Self::List(args) => args.run(factory).await,
            Self::Tables(args) => args.run(factory).await,
            Self::Fields(args) => args.run(factory).await,
            Self::Preview(args) => args.run(factory).await,
            Self::SaveTable(args) => args.run(factory).await,
            Self::SaveField(args) => args.run(factory).await,
            Self::View(args) => args.run(factory).await,
            Self::Delete(args) => args.run(factory).await,
        }
    }
}

/// Print a service response, failing on a non-2xx status.
///
/// JSON bodies are pretty-printed; anything else is printed as-is.
async fn print_response(factory: &Factory, resp: reqwest::Response) -> anyhow::Result<()> {
    let resp = check_response(resp).await?;
    let body = read_body(resp).await?;
    if !body.text.is_empty() {
        ios_println!(factory.io, "{}", body.pretty());
    }
    Ok(())
}

/// Read a JSON payload given as literal text, `@path`, or `-` for stdin.
fn read_payload(factory: &Factory, source: &str) -> anyhow::Result<Value> {
    let (text, origin) = if source == "-" {
        let text = factory
            .io
            .read_stdin()
            .context("failed to read payload from stdin")?;
        (text, "stdin".to_string())
    } else if let Some(file_path) = source.strip_prefix('@') {
        let text = std::fs::read_to_string(file_path)
            .with_context(|| format!("failed to read file: {file_path}"))?;
        (text, file_path.to_string())
    } else {
        (source.to_string(), "--data".to_string())
    };

    if text.trim().is_empty() {
        return Err(FlagError(format!("payload from {origin} is empty")).into());
    }
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {origin}"))
}
