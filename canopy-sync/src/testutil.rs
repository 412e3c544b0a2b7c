//! In-memory [`WorkspaceApi`] fake for engine tests.
//!
//! Holds a flat file map plus a set of explicitly-empty directories,
//! derives listings on demand, records every mutating call in order, and
//! can be scripted to fail specific paths or the commit/push step.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use canopy_remote::{CommitAuthor, DirectoryListing, RemoteError, WorkspaceApi, WorkspaceRef};

#[derive(Default)]
struct State {
    files: BTreeMap<String, Vec<u8>>,
    // Directories with no children; every other directory is implied by
    // the paths of the files beneath it.
    empty_dirs: BTreeSet<String>,
    ops: Vec<String>,
}

#[derive(Default)]
pub struct FakeWorkspace {
    state: Mutex<State>,
    pub fail_writes: BTreeSet<String>,
    pub fail_removals: BTreeSet<String>,
    pub fail_reads: BTreeSet<String>,
    pub fail_listings: BTreeSet<String>,
    pub fail_commit: bool,
    pub fail_push: bool,
    /// Reverse every listing — exercises frontier-order independence.
    pub reverse_listings: bool,
}

impl FakeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: Into<String>,
    {
        let fake = Self::new();
        {
            let mut state = fake.state.lock().unwrap();
            for (path, contents) in files {
                state.files.insert(path.into(), contents);
            }
        }
        fake
    }

    pub fn add_empty_dir(&self, path: &str) {
        self.state.lock().unwrap().empty_dirs.insert(path.to_owned());
    }

    pub fn file_paths(&self) -> Vec<String> {
        self.state.lock().unwrap().files.keys().cloned().collect()
    }

    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(path).cloned()
    }

    /// Mutating calls in invocation order, e.g. `["write a", "removeFile b"]`.
    pub fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }

    fn all_directories(state: &State) -> BTreeSet<String> {
        let mut dirs = state.empty_dirs.clone();
        for path in state.files.keys().chain(state.empty_dirs.iter()) {
            let mut prefix = String::new();
            let components: Vec<&str> = path.split('/').collect();
            for comp in &components[..components.len().saturating_sub(1)] {
                if !prefix.is_empty() {
                    prefix.push('/');
                }
                prefix.push_str(comp);
                dirs.insert(prefix.clone());
            }
        }
        dirs
    }

    fn parent_of(path: &str) -> Option<&str> {
        path.rsplit_once('/').map(|(parent, _)| parent)
    }
}

fn transport(operation: &'static str, path: &str) -> RemoteError {
    RemoteError::Transport {
        operation,
        message: format!("injected failure for {path}"),
    }
}

impl WorkspaceApi for FakeWorkspace {
    fn list_directory(
        &self,
        _ws: &WorkspaceRef,
        path: Option<&str>,
    ) -> Result<DirectoryListing, RemoteError> {
        let query = path.unwrap_or("");
        if self.fail_listings.contains(query) {
            return Err(transport("queryDirectoryContents", query));
        }

        let state = self.state.lock().unwrap();
        let dirs = Self::all_directories(&state);
        let is_direct_child = |candidate: &str| match Self::parent_of(candidate) {
            Some(parent) => parent == query,
            None => query.is_empty(),
        };

        let mut listing = DirectoryListing {
            files: state
                .files
                .keys()
                .filter(|f| is_direct_child(f))
                .cloned()
                .collect(),
            directories: dirs.iter().filter(|d| is_direct_child(d)).cloned().collect(),
        };
        if self.reverse_listings {
            listing.files.reverse();
            listing.directories.reverse();
        }
        Ok(listing)
    }

    fn read_file(&self, _ws: &WorkspaceRef, path: &str) -> Result<Vec<u8>, RemoteError> {
        if self.fail_reads.contains(path) {
            return Err(transport("readFile", path));
        }
        let state = self.state.lock().unwrap();
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound {
                path: path.to_owned(),
            })
    }

    fn write_file(
        &self,
        _ws: &WorkspaceRef,
        path: &str,
        contents: &[u8],
    ) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("write {path}"));
        if self.fail_writes.contains(path) {
            return Err(transport("writeFile", path));
        }
        state.files.insert(path.to_owned(), contents.to_vec());
        Ok(())
    }

    fn remove_file(&self, _ws: &WorkspaceRef, path: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("removeFile {path}"));
        if self.fail_removals.contains(path) {
            return Err(transport("removeFile", path));
        }
        state.files.remove(path);
        Ok(())
    }

    fn remove_directory(&self, _ws: &WorkspaceRef, path: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("removeDirectory {path}"));
        if self.fail_removals.contains(path) {
            return Err(transport("removeDirectory", path));
        }
        if !Self::all_directories(&state).contains(path) {
            return Err(RemoteError::NotFound {
                path: path.to_owned(),
            });
        }
        let subtree_prefix = format!("{path}/");
        state.empty_dirs.remove(path);
        state.empty_dirs.retain(|d| !d.starts_with(&subtree_prefix));
        state.files.retain(|f, _| !f.starts_with(&subtree_prefix));
        Ok(())
    }

    fn commit(
        &self,
        _ws: &WorkspaceRef,
        _author: &CommitAuthor,
        _message: &str,
    ) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push("commit".to_owned());
        if self.fail_commit {
            return Err(transport("commit", "<workspace>"));
        }
        Ok(())
    }

    fn push_commits(&self, _ws: &WorkspaceRef) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push("push".to_owned());
        if self.fail_push {
            return Err(transport("pushGitCommits", "<workspace>"));
        }
        Ok(())
    }
}

pub fn test_workspace() -> WorkspaceRef {
    WorkspaceRef::new("acme-analytics", "europe-west1", "warehouse", "dev")
}
