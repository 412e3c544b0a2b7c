//! Discovered file trees.
//!
//! A [`Tree`] maps workspace-relative paths (always `/`-separated) to an
//! [`EntryKind`]. Trees are built fresh for every sync run and discarded
//! once the plan is computed — remote state carries no staleness guarantee
//! between invocations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind tag for a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A set of discovered entries: relative path → kind.
///
/// Paths are unique; iteration order is lexicographic (BTreeMap), which
/// keeps plan output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    entries: BTreeMap<String, EntryKind>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry. A later insert for the same path overwrites the kind.
    pub fn insert(&mut self, path: impl Into<String>, kind: EntryKind) {
        self.entries.insert(path.into(), kind);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn kind(&self, path: &str) -> Option<EntryKind> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in lexicographic path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EntryKind)> {
        self.entries.iter().map(|(p, k)| (p.as_str(), *k))
    }

    /// Relative paths of file entries, in lexicographic order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, k)| **k == EntryKind::File)
            .map(|(p, _)| p.as_str())
    }

    /// Relative paths of directory entries, in lexicographic order.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, k)| **k == EntryKind::Directory)
            .map(|(p, _)| p.as_str())
    }
}

impl FromIterator<(String, EntryKind)> for Tree {
    fn from_iter<I: IntoIterator<Item = (String, EntryKind)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
