//! # canopy-sync
//!
//! The tree synchronization engine: remote and local tree discovery,
//! empty-directory resolution, diff/plan computation, and ordered plan
//! execution with commit semantics.
//!
//! Call [`push_workspace`] to mirror a local directory into a remote
//! workspace, or [`pull_workspace`] to materialize a remote workspace
//! locally. Both take the remote capability ([`WorkspaceApi`]) as an
//! explicit dependency — nothing here owns a client.
//!
//! [`WorkspaceApi`]: canopy_remote::WorkspaceApi

pub mod discover;
pub mod empty;
pub mod error;
pub mod exec;
pub mod plan;
pub mod pull;
pub mod push;

#[cfg(test)]
mod testutil;

pub use discover::{discover_local, discover_remote, RemoteDiscovery};
pub use empty::resolve_empty_dirs;
pub use error::SyncError;
pub use exec::{apply, ApplyOptions, ItemFailure, SyncReport};
pub use plan::{compute_plan, SyncPlan};
pub use pull::{pull_workspace, PullReport};
pub use push::{push_workspace, PushOutcome};
