//! `dsc datasource view` command.

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;

/// Show the detail of a datasource.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Datasource id.
    #[arg(value_name = "ID")]
    id: String,
}

impl ViewArgs {
    /// Run the datasource view command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with an error status.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let client = factory.datasource_client()?;
        let resp = client.get_datasource(self.id.as_str()).await?;
        super::print_response(factory, resp).await
    }
}
