//! Subcommand implementations.

pub mod pull;
pub mod push;

use anyhow::{Context, Result};
use clap::Args;

use canopy_remote::{AccessToken, RestWorkspaceApi, WorkspaceRef};

/// Remote workspace coordinates shared by every subcommand.
#[derive(Args, Debug)]
pub struct WorkspaceCoords {
    /// Cloud project that owns the repository.
    #[arg(long)]
    pub project: String,

    /// Region hosting the repository (e.g. `europe-west1`).
    #[arg(long)]
    pub region: String,

    /// Repository identifier.
    #[arg(long)]
    pub repository: String,

    /// Workspace identifier within the repository.
    #[arg(long)]
    pub workspace: String,
}

impl WorkspaceCoords {
    pub fn to_ref(&self) -> WorkspaceRef {
        WorkspaceRef::new(
            self.project.clone(),
            self.region.clone(),
            self.repository.clone(),
            self.workspace.clone(),
        )
    }
}

/// Authenticate and build the REST client.
pub fn connect() -> Result<RestWorkspaceApi> {
    let token = AccessToken::resolve().context("could not obtain an access token")?;
    Ok(RestWorkspaceApi::new(token))
}
