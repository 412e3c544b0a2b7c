//! Error types for canopy-remote.

use thiserror::Error;

/// All errors that can arise from remote workspace calls.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection-level failure: DNS, TLS, timeout, broken pipe.
    #[error("transport error during {operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The API answered with a non-success HTTP status.
    #[error("{operation} failed with HTTP {status}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// The requested path does not exist in the workspace.
    ///
    /// Expected in normal operation (e.g. probing for a remote ignore file)
    /// and therefore distinguished from the unavailability variants.
    #[error("remote path not found: {path}")]
    NotFound { path: String },

    /// No usable access token could be obtained.
    #[error("cannot obtain an access token: {0}")]
    Auth(String),

    /// The response body could not be decoded.
    #[error("cannot decode {operation} response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl RemoteError {
    /// True for the expected-absence case, false for every failure mode.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound { .. })
    }
}
