//! Empty-directory resolution.
//!
//! A directory observed with zero direct children is only *truly* empty if
//! no file in the entire remote file set lives beneath it — and when a whole
//! chain of ancestors is file-free, removing the shallowest one is enough
//! (remote directory removal is recursive, and removing a child of an
//! already-removed parent would race).

use std::collections::BTreeSet;

/// Reduce `candidates` to the set of directories to actually remove.
///
/// For each candidate the path components are walked from the root down;
/// the first prefix with no file at or beneath it is the removal root for
/// that candidate. A candidate with files at every prefix level is never
/// empty and is excluded. The result is deduplicated and sorted.
pub fn resolve_empty_dirs(candidates: &[String], all_files: &[String]) -> Vec<String> {
    let mut resolved = BTreeSet::new();

    for candidate in candidates {
        let mut prefix = String::new();
        for component in candidate.split('/') {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(component);

            let occupied = all_files
                .iter()
                .any(|f| f == &prefix || f.strip_prefix(prefix.as_str()).is_some_and(|rest| rest.starts_with('/')));
            if !occupied {
                resolved.insert(prefix);
                break;
            }
        }
    }

    resolved.into_iter().collect()
}
