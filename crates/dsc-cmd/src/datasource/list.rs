//! `dsc datasource list` command.

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;

/// List all datasources registered with the service.
#[derive(Debug, Args)]
pub struct ListArgs {}

impl ListArgs {
    /// Run the datasource list command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with an error status.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let client = factory.datasource_client()?;
        let resp = client.list_datasources().await?;
        super::print_response(factory, resp).await
    }
}
