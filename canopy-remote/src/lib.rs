//! # canopy-remote
//!
//! Client surface for an API-addressable remote workspace.
//!
//! [`WorkspaceApi`] is the seam the sync engine depends on: seven operations
//! (list, read, write, remove file, remove directory, commit, push), each a
//! single fallible call. [`RestWorkspaceApi`] implements it over HTTPS.
//! Callers construct the client and pass it down — there is no process-wide
//! default client.

pub mod api;
pub mod auth;
pub mod error;
pub mod rest;
pub mod workspace;

pub use api::{CommitAuthor, DirectoryListing, WorkspaceApi};
pub use auth::AccessToken;
pub use error::RemoteError;
pub use rest::RestWorkspaceApi;
pub use workspace::WorkspaceRef;
