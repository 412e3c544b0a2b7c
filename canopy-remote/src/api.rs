//! The remote workspace capability consumed by the sync engine.

use crate::error::RemoteError;
use crate::workspace::WorkspaceRef;

/// Contents of one remote directory.
///
/// Paths are relative to the workspace root (the listing API reports full
/// relative paths, not bare names), `/`-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

/// Author identity recorded on a workspace commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

impl CommitAuthor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Operations the sync engine needs from a remote workspace.
///
/// Each call is atomic on the remote side; nothing is transactional across
/// calls. Implementations do not retry — callers decide what is fatal.
pub trait WorkspaceApi {
    /// List direct children of `path` (`None` = workspace root).
    ///
    /// A path with no entries yields an empty listing, not an error.
    fn list_directory(
        &self,
        ws: &WorkspaceRef,
        path: Option<&str>,
    ) -> Result<DirectoryListing, RemoteError>;

    /// Read the contents of one remote file.
    fn read_file(&self, ws: &WorkspaceRef, path: &str) -> Result<Vec<u8>, RemoteError>;

    /// Write (create or overwrite) one remote file. Parent directories are
    /// created implicitly by the remote.
    fn write_file(
        &self,
        ws: &WorkspaceRef,
        path: &str,
        contents: &[u8],
    ) -> Result<(), RemoteError>;

    /// Remove one remote file.
    fn remove_file(&self, ws: &WorkspaceRef, path: &str) -> Result<(), RemoteError>;

    /// Remove a remote directory. Removal is recursive on the remote side.
    fn remove_directory(&self, ws: &WorkspaceRef, path: &str) -> Result<(), RemoteError>;

    /// Commit all staged workspace changes.
    fn commit(
        &self,
        ws: &WorkspaceRef,
        author: &CommitAuthor,
        message: &str,
    ) -> Result<(), RemoteError>;

    /// Push committed history to the linked version-control remote.
    fn push_commits(&self, ws: &WorkspaceRef) -> Result<(), RemoteError>;
}
