//! Generate command handler.

use std::path::Path;

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::Config;
use crate::filer::{DirectoryFiler, MemoryFiler};

use super::{prepare, App};

impl App {
    /// Run the generate command.
    pub fn run_generate(&self, manifest: &Path, out: Option<&Path>, dry_run: bool) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(out) = out {
            config.output.dir = out.to_path_buf();
        }
        let root = config.output.dir.clone();

        let (manifest, generator) = prepare(config, manifest)?;

        let report = if dry_run {
            generator.run(&manifest, &mut MemoryFiler::new())?
        } else {
            tracing::info!("Writing sources to {}", root.display());
            generator.run(&manifest, &mut DirectoryFiler::new(&root))?
        };
        for path in &report.written {
            println!("{}", path.display());
        }

        if report.has_errors() {
            let errors = generator.context().diagnostics.error_count();
            return Err(eyre!("Generation finished with {} error(s)", errors));
        }
        Ok(())
    }
}
