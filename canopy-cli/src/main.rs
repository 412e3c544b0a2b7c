//! Canopy — remote workspace tree synchronization CLI.
//!
//! # Usage
//!
//! ```text
//! canopy pull --project <id> --region <region> --repository <id> --workspace <id>
//!             [--target-dir DIR] [--json]
//! canopy push --project <id> --region <region> --repository <id> --workspace <id>
//!             [--source-dir DIR] [--keep-remote-files] [--no-commit] [--no-push]
//!             [--message MSG] [--author-name NAME] [--author-email EMAIL] [--json]
//! ```
//!
//! Exit status is non-zero on any fatal failure (discovery, configuration,
//! commit, push) and when every attempted item failed; partial item
//! failures are reported but keep a zero exit status.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{pull::PullArgs, push::PushArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "canopy",
    version,
    about = "Synchronize a local directory tree with a remote workspace",
    long_about = None,
)]
struct Cli {
    /// Log filter, e.g. `info` or `canopy_sync=debug` (RUST_LOG wins).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download the remote workspace tree into a local directory.
    Pull(PullArgs),

    /// Mirror a local directory into the remote workspace.
    Push(PushArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match cli.command {
        Commands::Pull(args) => args.run(),
        Commands::Push(args) => args.run(),
    }
}

/// Fixed-width log lines: `LEVEL   TIMESTAMP  MESSAGE`.
fn init_logging(filter: &str) {
    use std::io::Write;

    let env = env_logger::Env::default().default_filter_or(filter);
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{:<7} {}  {}",
                record.level(),
                buf.timestamp_seconds(),
                record.args()
            )
        })
        .init();
}
