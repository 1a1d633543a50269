//! CLI for the ttrd report downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ttrd_core::config;

use commands::{run_check, run_pipeline};

/// Top-level CLI for the ttrd report downloader.
#[derive(Debug, Parser)]
#[command(name = "ttrd")]
#[command(about = "ttrd: bulk PDF report downloader for session-authenticated portals", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Log in, fetch every report in the manifest, and write the PDFs plus a zip bundle.
    Run {
        /// Path to the CSV manifest (columns: id, reportname, account.name, date).
        manifest: PathBuf,

        /// Directory for the PDFs and the bundle (default: current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Validate a manifest offline and print the filename each row would produce.
    Check {
        /// Path to the CSV manifest.
        manifest: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                manifest,
                output_dir,
            } => {
                let output_dir = match output_dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_pipeline(&cfg, &manifest, &output_dir)?;
            }
            CliCommand::Check { manifest } => run_check(&manifest)?,
        }

        Ok(())
    }
}
