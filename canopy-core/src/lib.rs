//! # canopy-core
//!
//! Domain types shared across the canopy workspace: ignore rule matching
//! and discovered file trees.
//!
//! Everything here is pure computation — no I/O beyond loading an ignore
//! file from disk.

pub mod error;
pub mod ignore;
pub mod tree;

pub use error::ConfigError;
pub use ignore::{IgnoreRuleSet, IGNORE_FILE_NAME};
pub use tree::{EntryKind, Tree};
