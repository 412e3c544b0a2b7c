//! Remote and local tree discovery.
//!
//! Remote discovery expands an explicit FIFO work queue of directories —
//! one listing call per directory, each directory expanded exactly once.
//! Only enumeration completeness is promised, not any particular visit
//! order. A failed listing aborts the whole discovery: a silently
//! incomplete tree would make the resulting plan unsafe.

use std::collections::VecDeque;
use std::path::Path;

use walkdir::WalkDir;

use canopy_core::{EntryKind, IgnoreRuleSet, Tree};
use canopy_remote::{WorkspaceApi, WorkspaceRef};

use crate::error::{io_err, SyncError};

/// Outcome of remote tree discovery.
#[derive(Debug, Clone, Default)]
pub struct RemoteDiscovery {
    /// Every non-ignored file and directory, keyed by relative path.
    pub tree: Tree,
    /// Directories whose listing returned no entries at all. Candidates for
    /// removal, pending resolution against the full file set.
    pub empty_candidates: Vec<String>,
}

/// Enumerate the remote workspace tree.
///
/// Ignore rules, when supplied, filter both files and directories; an
/// ignored directory is never expanded. Emptiness is judged on the raw
/// listing, before filtering — a directory whose only children are ignored
/// is not a removal candidate.
pub fn discover_remote(
    api: &dyn WorkspaceApi,
    ws: &WorkspaceRef,
    rules: Option<&IgnoreRuleSet>,
) -> Result<RemoteDiscovery, SyncError> {
    let mut discovery = RemoteDiscovery::default();
    let mut frontier: VecDeque<Option<String>> = VecDeque::new();
    frontier.push_back(None);

    while let Some(dir) = frontier.pop_front() {
        let listing = api.list_directory(ws, dir.as_deref())?;

        if listing.files.is_empty() && listing.directories.is_empty() {
            // The workspace root is not removable; only real directories
            // become candidates.
            if let Some(dir) = dir {
                discovery.empty_candidates.push(dir);
            }
            continue;
        }

        for file in listing.files {
            let ignored = rules.is_some_and(|r| r.is_ignored(&file, false));
            if ignored {
                tracing::debug!("ignoring remote file: {file}");
                continue;
            }
            discovery.tree.insert(file, EntryKind::File);
        }

        for subdir in listing.directories {
            let ignored = rules.is_some_and(|r| r.is_ignored(&subdir, true));
            if ignored {
                tracing::debug!("ignoring remote directory: {subdir}");
                continue;
            }
            discovery.tree.insert(subdir.clone(), EntryKind::Directory);
            frontier.push_back(Some(subdir));
        }
    }

    tracing::info!(
        "discovered {} remote files, {} empty-directory candidates",
        discovery.tree.files().count(),
        discovery.empty_candidates.len()
    );
    Ok(discovery)
}

/// Enumerate local files under `root` as a tree of workspace-relative,
/// `/`-separated paths. Ignored directories are pruned without descent.
pub fn discover_local(root: &Path, rules: Option<&IgnoreRuleSet>) -> Result<Tree, SyncError> {
    let mut tree = Tree::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 {
            return true;
        }
        let rel = slash_path(root, entry.path());
        let is_dir = entry.file_type().is_dir();
        match rules {
            Some(r) if r.is_ignored(&rel, is_dir) => {
                tracing::debug!("ignoring local path: {rel}");
                false
            }
            _ => true,
        }
    });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            io_err(path, e.into())
        })?;
        if entry.file_type().is_file() {
            tree.insert(slash_path(root, entry.path()), EntryKind::File);
        }
    }

    tracing::info!("discovered {} local files under {}", tree.len(), root.display());
    Ok(tree)
}

/// Relative `/`-separated path of `path` under `root`.
fn slash_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
