//! `canopy push` — mirror a local directory into the remote workspace.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use canopy_remote::CommitAuthor;
use canopy_sync::{push_workspace, ApplyOptions};

use crate::commands::{self, WorkspaceCoords};

/// Arguments for `canopy push`.
#[derive(Args, Debug)]
pub struct PushArgs {
    #[command(flatten)]
    pub coords: WorkspaceCoords,

    /// Local directory to push from.
    #[arg(long, default_value = ".")]
    pub source_dir: PathBuf,

    /// Keep remote files that no longer exist locally.
    #[arg(long)]
    pub keep_remote_files: bool,

    /// Skip the automatic commit after applying changes.
    #[arg(long)]
    pub no_commit: bool,

    /// Skip pushing committed history to the linked repository.
    #[arg(long)]
    pub no_push: bool,

    /// Commit message for the automatic commit.
    #[arg(long, default_value = "Automated push from canopy")]
    pub message: String,

    /// Commit author name.
    #[arg(long, default_value = "canopy")]
    pub author_name: String,

    /// Commit author email.
    #[arg(long, default_value = "canopy@localhost")]
    pub author_email: String,

    /// Print plan and report as JSON instead of the human summary.
    #[arg(long)]
    pub json: bool,
}

impl PushArgs {
    pub fn run(self) -> Result<()> {
        let api = commands::connect()?;
        let ws = self.coords.to_ref();

        let options = ApplyOptions {
            delete_remote_files: !self.keep_remote_files,
            autocommit: !self.no_commit,
            autopush: !self.no_push,
            commit_message: self.message,
            author: CommitAuthor::new(self.author_name, self.author_email),
        };

        let outcome = push_workspace(&api, &ws, &self.source_dir, &options)
            .with_context(|| format!("push failed for workspace '{ws}'"))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print_summary(&outcome, self.keep_remote_files);
        }

        if outcome.report.all_failed() {
            bail!("push failed: no item could be applied");
        }
        Ok(())
    }
}

fn print_summary(outcome: &canopy_sync::PushOutcome, kept_remote_files: bool) {
    let report = &outcome.report;
    println!(
        "{} push complete ({} uploaded, {} deleted, {} directories removed)",
        if report.success() { "✓".green() } else { "!".yellow() },
        report.uploaded,
        report.deleted,
        report.directories_removed,
    );

    if kept_remote_files && !outcome.plan.deletions.is_empty() {
        println!(
            "  · {} remote files kept (--keep-remote-files)",
            outcome.plan.deletions.len()
        );
    }
    if report.committed {
        println!("  · committed workspace changes");
    }
    if report.pushed {
        println!("  · pushed commits to linked repository");
    }
    for failure in &report.failures {
        println!("  {} {} — {}", "✗".red(), failure.path, failure.error);
    }
}
