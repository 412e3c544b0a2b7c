//! Error types for canopy-sync.

use std::path::PathBuf;

use thiserror::Error;

use canopy_core::ConfigError;
use canopy_remote::RemoteError;

/// All fatal errors that can arise from sync operations.
///
/// Per-item upload/delete failures are not errors — they are collected into
/// the run report and never abort a run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration failure (unreadable ignore file).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A remote call failed during discovery, commit, or push.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
