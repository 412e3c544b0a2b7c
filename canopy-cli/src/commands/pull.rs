//! `canopy pull` — materialize the remote workspace tree locally.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use canopy_sync::pull_workspace;

use crate::commands::{self, WorkspaceCoords};

/// Arguments for `canopy pull`.
#[derive(Args, Debug)]
pub struct PullArgs {
    #[command(flatten)]
    pub coords: WorkspaceCoords,

    /// Local directory to pull into.
    #[arg(long, default_value = ".")]
    pub target_dir: PathBuf,

    /// Print the report as JSON instead of the human summary.
    #[arg(long)]
    pub json: bool,
}

impl PullArgs {
    pub fn run(self) -> Result<()> {
        let api = commands::connect()?;
        let ws = self.coords.to_ref();

        let report = pull_workspace(&api, &ws, &self.target_dir)
            .with_context(|| format!("pull failed for workspace '{ws}'"))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "{} pulled {} files into {}",
                "✓".green(),
                report.fetched,
                self.target_dir.display()
            );
            for failure in &report.failures {
                println!("  {} {} — {}", "✗".red(), failure.path, failure.error);
            }
        }

        if report.all_failed() {
            bail!("pull failed: no file could be fetched");
        }
        Ok(())
    }
}
