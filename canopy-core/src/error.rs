//! Error types for canopy-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The ignore file exists but could not be read.
    #[error("cannot read ignore file at {path}: {source}")]
    IgnoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
