//! CLI module for DaggerSharpener.
//!
//! Subcommands:
//! - `generate`: Generate components from a declaration manifest
//! - `plan`: Print the component models of a manifest as JSON

mod generate;
mod plan;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;

use crate::config::Config;
use crate::context::GenerationContext;
use crate::manifest::Manifest;
use crate::pipeline::Generator;

/// DaggerSharpener - Dagger component generator
#[derive(Parser)]
#[command(name = "sharpener")]
#[command(about = "Generate Dagger components from SharpComponent declarations")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate component and scope sources
    Generate {
        /// Declaration manifest (JSON)
        manifest: PathBuf,

        /// Output root, overrides `output.dir`
        #[arg(long)]
        out: Option<PathBuf>,

        /// Render without writing; print the paths that would be written
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the component models built from a manifest
    Plan {
        /// Declaration manifest (JSON)
        manifest: PathBuf,
    },
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Generate {
                ref manifest,
                ref out,
                dry_run,
            } => self.run_generate(manifest, out.as_deref(), dry_run),
            Command::Plan { ref manifest } => self.run_plan(manifest),
        }
    }
}

/// Loads the manifest and builds a generator over it.
fn prepare(config: Config, manifest: &Path) -> color_eyre::Result<(Manifest, Generator)> {
    let manifest = Manifest::load(manifest)
        .map_err(|e| eyre!("Failed to load manifest '{}': {}", manifest.display(), e))?;
    tracing::debug!("Loaded {} declarations", manifest.declarations.len());

    let ctx = GenerationContext::new(config, manifest.resolver());
    let generator = Generator::new(ctx)?;
    Ok((manifest, generator))
}
