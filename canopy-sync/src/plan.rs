//! Sync plan computation.
//!
//! Pure set arithmetic over already-discovered trees — no remote calls, so
//! the planner is testable without any client. The plan is computed once
//! from one snapshot and trusted for the duration of the run.

use std::collections::BTreeSet;

use serde::Serialize;

use canopy_core::Tree;

use crate::empty::resolve_empty_dirs;

/// The fixed set of mutations one push run will apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    /// Every local file, relative path. Uploads are total, not delta-based:
    /// content comparison is deliberately not performed, trading bandwidth
    /// for safety against undetected remote drift.
    pub uploads: Vec<String>,
    /// Remote files with no local counterpart.
    pub deletions: Vec<String>,
    /// Remote directories confirmed empty and safe to remove.
    pub directory_removals: Vec<String>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty() && self.deletions.is_empty() && self.directory_removals.is_empty()
    }
}

/// Diff the local tree against the remote snapshot.
///
/// `empty_candidates` are the remote directories observed with no direct
/// children during discovery. Directory removals are resolved against the
/// remote file set *before* deletions apply, then filtered so that no
/// removal root covers a file that survives the run (a remote file kept
/// locally, or any fresh upload).
pub fn compute_plan(local: &Tree, remote: &Tree, empty_candidates: &[String]) -> SyncPlan {
    let uploads: Vec<String> = local.files().map(str::to_owned).collect();

    let local_files: BTreeSet<&str> = local.files().collect();
    let deletions: Vec<String> = remote
        .files()
        .filter(|f| !local_files.contains(f))
        .map(str::to_owned)
        .collect();

    let remote_files: Vec<String> = remote.files().map(str::to_owned).collect();
    let mut directory_removals = resolve_empty_dirs(empty_candidates, &remote_files);

    // Surviving file set after the run: remote minus deletions, plus uploads.
    let deletion_set: BTreeSet<&str> = deletions.iter().map(String::as_str).collect();
    let surviving: Vec<&str> = remote
        .files()
        .filter(|f| !deletion_set.contains(f))
        .chain(local.files())
        .collect();
    directory_removals.retain(|dir| {
        !surviving
            .iter()
            .any(|f| *f == dir || f.strip_prefix(dir.as_str()).is_some_and(|rest| rest.starts_with('/')))
    });

    SyncPlan {
        uploads,
        deletions,
        directory_removals,
    }
}
