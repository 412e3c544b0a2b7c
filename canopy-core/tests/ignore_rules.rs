//! Ignore-rule behavior pinned through the public API.

use std::fs;

use tempfile::TempDir;

use canopy_core::{IgnoreRuleSet, IGNORE_FILE_NAME};

#[test]
fn typical_ignore_file_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(IGNORE_FILE_NAME);
    fs::write(
        &path,
        "# build artifacts\n*.log\nbuild/\nsecret.txt\n\nnode_modules/\n",
    )
    .unwrap();

    let rules = IgnoreRuleSet::load(&path).expect("load");
    assert_eq!(rules.len(), 4);

    assert!(rules.is_ignored("debug.log", false));
    assert!(rules.is_ignored("build/main.o", false));
    assert!(rules.is_ignored("build/sub/x", false));
    assert!(rules.is_ignored("secret.txt", false));
    assert!(rules.is_ignored("node_modules", true));

    assert!(!rules.is_ignored("buildup/file", false));
    assert!(!rules.is_ignored("notes.md", false));
    assert!(!rules.is_ignored("models/a.sql", false));
}

#[test]
fn evaluation_is_deterministic() {
    let rules = IgnoreRuleSet::parse("*.log\nbuild/\n");
    for _ in 0..3 {
        assert!(rules.is_ignored("a.log", false));
        assert!(!rules.is_ignored("a.sql", false));
    }
}
