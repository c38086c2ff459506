//! `dsc datasource save-table` and `dsc datasource save-field` commands.

use anyhow::Result;
use clap::Args;

use dsc_core::ios_eprintln;

use crate::factory::Factory;

/// Save table metadata.
#[derive(Debug, Args)]
pub struct SaveTableArgs {
    /// Table metadata: inline JSON, `@file`, or `-` for stdin.
    #[arg(short, long, value_name = "JSON")]
    data: String,
}

impl SaveTableArgs {
    /// Run the save-table command.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not JSON, the request fails, or
    /// the service answers with an error status.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let table = super::read_payload(factory, &self.data)?;
        let client = factory.datasource_client()?;
        let resp = client.save_table(&table).await?;
        super::print_response(factory, resp).await?;

        let cs = factory.io.color_scheme();
        ios_eprintln!(factory.io, "{} Saved table metadata", cs.success_icon());
        Ok(())
    }
}

/// Save field metadata.
#[derive(Debug, Args)]
pub struct SaveFieldArgs {
    /// Field metadata: inline JSON, `@file`, or `-` for stdin.
    #[arg(short, long, value_name = "JSON")]
    data: String,
}

impl SaveFieldArgs {
    /// Run the save-field command.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not JSON, the request fails, or
    /// the service answers with an error status.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let field = super::read_payload(factory, &self.data)?;
        let client = factory.datasource_client()?;
        let resp = client.save_field(&field).await?;
        super::print_response(factory, resp).await?;

        let cs = factory.io.color_scheme();
        ios_eprintln!(factory.io, "{} Saved field metadata", cs.success_icon());
        Ok(())
    }
}
