//! Plan command handler.

use std::path::Path;

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::Config;

use super::{prepare, App};

impl App {
    /// Run the plan command: build models only and print them as JSON.
    pub fn run_plan(&self, manifest: &Path) -> Result<()> {
        let config = Config::load()?;
        let (manifest, generator) = prepare(config, manifest)?;

        let (models, skipped) = generator.build_models(&manifest)?;
        println!("{}", serde_json::to_string_pretty(&models)?);

        if skipped > 0 {
            return Err(eyre!("{} declaration(s) could not be modelled", skipped));
        }
        Ok(())
    }
}
