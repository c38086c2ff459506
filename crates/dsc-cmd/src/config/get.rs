//! `dsc config get` command.

use anyhow::Result;
use clap::Args;

use dsc_core::config::CONFIG_OPTIONS;
use dsc_core::ios_println;

use crate::factory::Factory;

/// Print the value of a given configuration key.
#[derive(Debug, Args)]
pub struct GetArgs {
    /// The configuration key to read.
    key: String,
}

impl GetArgs {
    /// Run the config get command.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not known.
    pub fn run(&self, factory: &Factory) -> Result<()> {
        let ios = &factory.io;
        let Some(option) = CONFIG_OPTIONS.iter().find(|o| o.key == self.key) else {
            anyhow::bail!("could not find key {:?}", self.key);
        };

        let cfg_lock = factory.config()?;
        let cfg = cfg_lock
            .lock()
            .map_err(|e| anyhow::anyhow!("config lock: {e}"))?;
        ios_println!(ios, "{}", option.current_value(&**cfg));
        Ok(())
    }
}
