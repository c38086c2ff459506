//! `dsc datasource delete` command.

use anyhow::Result;
use clap::Args;

use dsc_core::cmdutil::CancelError;
use dsc_core::ios_eprintln;

use crate::factory::Factory;

/// Delete a datasource.
///
/// Asks for confirmation when running interactively, unless `--yes` is given.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Datasource id.
    #[arg(value_name = "ID")]
    id: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    yes: bool,
}

impl DeleteArgs {
    /// Run the datasource delete command.
    ///
    /// # Errors
    ///
    /// Returns [`CancelError`] if the confirmation is declined, or an error
    /// if the request fails or the service answers with an error status.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        if !self.yes && factory.can_prompt() {
            let confirmed = factory
                .prompter()
                .confirm(&format!("Delete datasource {}?", self.id), false)?;
            if !confirmed {
                return Err(CancelError.into());
            }
        }

        let client = factory.datasource_client()?;
        let resp = client.delete_datasource(self.id.as_str()).await?;
        super::print_response(factory, resp).await?;

        let ios = &factory.io;
        let cs = ios.color_scheme();
        ios_eprintln!(
            ios,
            "{} Deleted datasource {}",
            cs.success_icon(),
            cs.bold(&self.id)
        );
        Ok(())
    }
}
