//! `dsc config list` command.

use anyhow::Result;
use clap::Args;

use dsc_core::config::CONFIG_OPTIONS;
use dsc_core::ios_println;

use crate::factory::Factory;

/// Print a list of configuration keys and values.
#[derive(Debug, Args)]
pub struct ListArgs {}

impl ListArgs {
    /// Run the config list command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read.
    pub fn run(&self, factory: &Factory) -> Result<()> {
        let ios = &factory.io;
        let cfg_lock = factory.config()?;
        let cfg = cfg_lock
            .lock()
            .map_err(|e| anyhow::anyhow!("config lock: {e}"))?;

        for option in CONFIG_OPTIONS {
            ios_println!(ios, "{}={}", option.key, option.current_value(&**cfg));
        }
        Ok(())
    }
}
