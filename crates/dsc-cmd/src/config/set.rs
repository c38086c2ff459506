//! `dsc config set` command.

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;

/// Update configuration with a value for the given key.
#[derive(Debug, Args)]
pub struct SetArgs {
    /// The configuration key to set.
    key: String,
    /// The value to set.
    value: String,
}

impl SetArgs {
    /// Run the config set command.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value is invalid or cannot be saved.
    pub fn run(&self, factory: &Factory) -> Result<()> {
        let cfg_lock = factory.config()?;
        let mut cfg = cfg_lock
            .lock()
            .map_err(|e| anyhow::anyhow!("config lock: {e}"))?;

        cfg.set(&self.key, &self.value)
            .map_err(|e| anyhow::anyhow!("failed to set {:?} to {:?}: {e}", self.key, self.value))?;
        cfg.write()?;
        Ok(())
    }
}
