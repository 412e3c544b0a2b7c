//! Pull pipeline: materialize a remote workspace into a local directory.
//!
//! No diffing — the remote tree alone drives what gets written. The remote
//! ignore file, when present, is fetched first, written into the target
//! directory, and applied to the discovery that follows.

use std::path::Path;

use serde::Serialize;

use canopy_core::{IgnoreRuleSet, IGNORE_FILE_NAME};
use canopy_remote::{WorkspaceApi, WorkspaceRef};

use crate::discover::discover_remote;
use crate::error::{io_err, SyncError};
use crate::exec::{native_path, ItemFailure};

/// Outcome of one pull run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PullReport {
    /// Files fetched and written locally.
    pub fetched: usize,
    /// Per-file failures — collected, never aborting the run.
    pub failures: Vec<ItemFailure>,
    /// Whether a remote ignore file was found and applied.
    pub used_ignore_rules: bool,
}

impl PullReport {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when files were attempted and none landed.
    pub fn all_failed(&self) -> bool {
        !self.failures.is_empty() && self.fetched == 0
    }
}

/// Download every non-ignored remote file into `target_dir`, preserving the
/// tree structure.
///
/// A missing remote ignore file is expected and non-fatal; any other remote
/// failure while probing for it, or any failure during discovery, aborts
/// the run.
pub fn pull_workspace(
    api: &dyn WorkspaceApi,
    ws: &WorkspaceRef,
    target_dir: &Path,
) -> Result<PullReport, SyncError> {
    tracing::info!("pulling workspace {ws} into {}", target_dir.display());
    std::fs::create_dir_all(target_dir).map_err(|e| io_err(target_dir, e))?;

    let mut report = PullReport::default();

    let rules = match api.read_file(ws, IGNORE_FILE_NAME) {
        Ok(contents) => {
            let local = target_dir.join(IGNORE_FILE_NAME);
            std::fs::write(&local, &contents).map_err(|e| io_err(&local, e))?;
            tracing::info!("remote ignore file found and saved");
            report.used_ignore_rules = true;
            Some(IgnoreRuleSet::parse(&String::from_utf8_lossy(&contents)))
        }
        Err(e) if e.is_not_found() => {
            tracing::warn!("no remote ignore file; proceeding without ignore rules");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let discovery = discover_remote(api, ws, rules.as_ref())?;

    for path in discovery.tree.files() {
        let contents = match api.read_file(ws, path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("failed to fetch {path}: {e}");
                report.failures.push(ItemFailure {
                    path: path.to_owned(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let local = target_dir.join(native_path(path));
        let write_result = local
            .parent()
            .map(std::fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|()| std::fs::write(&local, &contents));
        match write_result {
            Ok(()) => {
                tracing::debug!("saved {path} to {}", local.display());
                report.fetched += 1;
            }
            Err(e) => {
                tracing::warn!("failed to write {}: {e}", local.display());
                report.failures.push(ItemFailure {
                    path: path.to_owned(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "pull finished: {} files fetched, {} failures",
        report.fetched,
        report.failures.len()
    );
    Ok(report)
}
