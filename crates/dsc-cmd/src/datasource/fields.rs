//! `dsc datasource fields` command.

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;

/// List the fields of a table.
#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// Table id.
    #[arg(value_name = "TABLE_ID")]
    table_id: String,
}

impl FieldsArgs {
    /// Run the datasource fields command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with an error status.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let client = factory.datasource_client()?;
        let resp = client.list_fields(self.table_id.as_str()).await?;
        super::print_response(factory, resp).await
    }
}
