//! Workspace coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to one remote workspace, resolved once at the start of
/// a run and passed by value to every remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub project: String,
    pub region: String,
    pub repository: String,
    pub workspace: String,
}

impl WorkspaceRef {
    pub fn new(
        project: impl Into<String>,
        region: impl Into<String>,
        repository: impl Into<String>,
        workspace: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            region: region.into(),
            repository: repository.into(),
            workspace: workspace.into(),
        }
    }

    /// Canonical resource name:
    /// `projects/{p}/locations/{r}/repositories/{repo}/workspaces/{ws}`.
    pub fn name(&self) -> String {
        format!(
            "projects/{}/locations/{}/repositories/{}/workspaces/{}",
            self.project, self.region, self.repository, self.workspace
        )
    }
}

impl fmt::Display for WorkspaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
