//! `dsc datasource preview` command.

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;

/// Preview the rows a build specification produces for a datasource.
///
/// The build specification is sent to the service unchanged.
#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Datasource id.
    #[arg(value_name = "DS_ID")]
    ds_id: String,

    /// Build specification: inline JSON, `@file`, or `-` for stdin.
    #[arg(short, long, value_name = "JSON")]
    data: String,
}

impl PreviewArgs {
    /// Run the datasource preview command.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not JSON, the request fails, or
    /// the service answers with an error status.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let build = super::read_payload(factory, &self.data)?;
        let client = factory.datasource_client()?;
        let resp = client.preview_data(self.ds_id.as_str(), &build).await?;
        super::print_response(factory, resp).await
    }
}
