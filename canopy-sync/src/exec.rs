//! Ordered plan execution.
//!
//! Phase order is strict: uploads, then remote file deletions, then remote
//! directory removals, then commit, then push. Uploads go first because a
//! write can implicitly create a directory that a stale plan would
//! otherwise schedule for removal. The plan is fixed at computation time;
//! nothing is recomputed between phases.
//!
//! Phases 1–3 are best-effort per item: a failed path lands in the report
//! and the loop moves on. Commit and push are single operations — failure
//! there is fatal, because a partial commit is not a meaningful retry
//! point.

use std::path::{Path, PathBuf};

use serde::Serialize;

use canopy_remote::{CommitAuthor, WorkspaceApi, WorkspaceRef};

use crate::error::SyncError;
use crate::plan::SyncPlan;

/// Knobs for one push run.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Apply planned remote deletions. Gates application only — the plan
    /// still carries the computed deletion set.
    pub delete_remote_files: bool,
    pub autocommit: bool,
    pub autopush: bool,
    pub commit_message: String,
    pub author: CommitAuthor,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            delete_remote_files: true,
            autocommit: true,
            autopush: true,
            commit_message: "Automated push from canopy".to_owned(),
            author: CommitAuthor::new("canopy", "canopy@localhost"),
        }
    }
}

/// One failed item operation — collected, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub path: String,
    pub error: String,
}

/// Aggregated outcome of one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub uploaded: usize,
    pub deleted: usize,
    pub directories_removed: usize,
    pub committed: bool,
    pub pushed: bool,
    pub failures: Vec<ItemFailure>,
}

impl SyncReport {
    /// True when every attempted item succeeded.
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn items_applied(&self) -> usize {
        self.uploaded + self.deleted + self.directories_removed
    }

    /// True when items were attempted and none succeeded.
    pub fn all_failed(&self) -> bool {
        !self.failures.is_empty() && self.items_applied() == 0
    }

    fn record(&mut self, path: &str, error: &dyn std::fmt::Display) {
        tracing::warn!("failed: {path}: {error}");
        self.failures.push(ItemFailure {
            path: path.to_owned(),
            error: error.to_string(),
        });
    }
}

/// Apply `plan` to the remote workspace, reading upload contents from
/// `source_root`. Returns the report; errs only on fatal commit/push
/// failures.
pub fn apply(
    api: &dyn WorkspaceApi,
    ws: &WorkspaceRef,
    plan: &SyncPlan,
    source_root: &Path,
    options: &ApplyOptions,
) -> Result<SyncReport, SyncError> {
    let mut report = SyncReport::default();

    // Phase 1: uploads.
    for path in &plan.uploads {
        let local = source_root.join(native_path(path));
        let contents = match std::fs::read(&local) {
            Ok(contents) => contents,
            Err(e) => {
                report.record(path, &format!("cannot read {}: {e}", local.display()));
                continue;
            }
        };
        match api.write_file(ws, path, &contents) {
            Ok(()) => {
                tracing::info!("uploaded: {path}");
                report.uploaded += 1;
            }
            Err(e) => report.record(path, &e),
        }
    }

    // Phase 2: remote file deletions.
    if options.delete_remote_files {
        for path in &plan.deletions {
            match api.remove_file(ws, path) {
                Ok(()) => {
                    tracing::info!("deleted remote file: {path}");
                    report.deleted += 1;
                }
                Err(e) => report.record(path, &e),
            }
        }
    }

    // Phase 3: remote directory removals.
    for path in &plan.directory_removals {
        match api.remove_directory(ws, path) {
            Ok(()) => {
                tracing::info!("removed empty directory: {path}");
                report.directories_removed += 1;
            }
            // Already gone — a parent's recursive removal can get there
            // first; count it as done.
            Err(e) if e.is_not_found() => {
                tracing::debug!("directory already absent: {path}");
                report.directories_removed += 1;
            }
            Err(e) => report.record(path, &e),
        }
    }

    // Phase 4: commit.
    if options.autocommit {
        api.commit(ws, &options.author, &options.commit_message)
            .map_err(SyncError::Remote)?;
        tracing::info!("committed workspace changes");
        report.committed = true;
    }

    // Phase 5: push.
    if options.autopush {
        api.push_commits(ws).map_err(SyncError::Remote)?;
        tracing::info!("pushed commits to linked repository");
        report.pushed = true;
    }

    Ok(report)
}

/// Convert a workspace-relative `/`-separated path into a native one.
/// Traversal components are stripped so a malicious remote path can never
/// escape `source_root` when joined.
pub(crate) fn native_path(rel: &str) -> PathBuf {
    rel.split('/')
        .filter(|c| !c.is_empty() && *c != "." && *c != "..")
        .collect()
}
