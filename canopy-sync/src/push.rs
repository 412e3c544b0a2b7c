//! Push pipeline: mirror a local directory into the remote workspace.
//!
//! Read state, compute the plan, apply the plan — one snapshot per run,
//! no locking. Concurrent external writers during a run are unsupported.

use std::path::Path;

use serde::Serialize;

use canopy_core::{IgnoreRuleSet, IGNORE_FILE_NAME};
use canopy_remote::{WorkspaceApi, WorkspaceRef};

use crate::discover::{discover_local, discover_remote};
use crate::error::SyncError;
use crate::exec::{apply, ApplyOptions, SyncReport};
use crate::plan::{compute_plan, SyncPlan};

/// Plan plus report for one push run.
#[derive(Debug, Serialize)]
pub struct PushOutcome {
    pub plan: SyncPlan,
    pub report: SyncReport,
}

/// Push `source_dir` to the remote workspace.
///
/// The ignore file is read from the sync root (`<source_dir>/.gitignore`);
/// an unreadable one is a fatal configuration error, a missing one means
/// "ignore nothing". Discovery failures are fatal — an incomplete remote
/// tree would make deletions unsafe.
pub fn push_workspace(
    api: &dyn WorkspaceApi,
    ws: &WorkspaceRef,
    source_dir: &Path,
    options: &ApplyOptions,
) -> Result<PushOutcome, SyncError> {
    tracing::info!("pushing {} to workspace {ws}", source_dir.display());

    let rule_set = IgnoreRuleSet::load(&source_dir.join(IGNORE_FILE_NAME))?;
    let rules = (!rule_set.is_empty()).then_some(&rule_set);

    tracing::info!("retrieving remote tree...");
    let remote = discover_remote(api, ws, rules)?;

    tracing::info!("scanning local files...");
    let local = discover_local(source_dir, rules)?;

    tracing::info!(
        "{} local files, {} remote files",
        local.files().count(),
        remote.tree.files().count()
    );

    let plan = compute_plan(&local, &remote.tree, &remote.empty_candidates);
    let report = apply(api, ws, &plan, source_dir, options)?;

    Ok(PushOutcome { plan, report })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::testutil::{test_workspace, FakeWorkspace};

    use super::*;

    fn source_with(files: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (path, contents) in files {
            let full = tmp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, contents).unwrap();
        }
        tmp
    }

    #[test]
    fn push_mirrors_local_state_end_to_end() {
        let fake = FakeWorkspace::with_files([
            ("models/a.sql", b"stale".to_vec()),
            ("models/old.sql", b"select 9".to_vec()),
        ]);
        fake.add_empty_dir("tmp");
        let source = source_with(&[("models/a.sql", "select 1"), ("models/b.sql", "select 2")]);

        let outcome = push_workspace(
            &fake,
            &test_workspace(),
            source.path(),
            &ApplyOptions::default(),
        )
        .expect("push");

        assert_eq!(
            outcome.plan.uploads,
            vec!["models/a.sql".to_owned(), "models/b.sql".to_owned()]
        );
        assert_eq!(outcome.plan.deletions, vec!["models/old.sql".to_owned()]);
        assert_eq!(outcome.plan.directory_removals, vec!["tmp".to_owned()]);

        assert_eq!(
            fake.file_paths(),
            vec!["models/a.sql".to_owned(), "models/b.sql".to_owned()]
        );
        // Overwrites are unconditional — the stale remote copy was replaced.
        assert_eq!(fake.contents("models/a.sql").unwrap(), b"select 1");
        assert!(outcome.report.committed && outcome.report.pushed);
    }

    #[test]
    fn keep_remote_files_skips_deletions() {
        let fake = FakeWorkspace::with_files([("models/old.sql", b"select 9".to_vec())]);
        let source = source_with(&[("models/a.sql", "select 1")]);

        let options = ApplyOptions {
            delete_remote_files: false,
            autocommit: false,
            autopush: false,
            ..ApplyOptions::default()
        };
        let outcome =
            push_workspace(&fake, &test_workspace(), source.path(), &options).expect("push");

        // Computed but not applied.
        assert_eq!(outcome.plan.deletions, vec!["models/old.sql".to_owned()]);
        assert_eq!(outcome.report.deleted, 0);
        assert!(fake.contents("models/old.sql").is_some());
    }

    #[test]
    fn local_ignore_rules_shield_both_directions() {
        let fake = FakeWorkspace::with_files([
            ("models/a.sql", b"select 1".to_vec()),
            ("logs/run.log", b"old log".to_vec()),
        ]);
        let source = source_with(&[
            (".gitignore", "logs/\n*.tmp\n"),
            ("models/a.sql", "select 1"),
            ("scratch.tmp", "wip"),
        ]);

        let outcome = push_workspace(
            &fake,
            &test_workspace(),
            source.path(),
            &ApplyOptions::default(),
        )
        .expect("push");

        // Ignored local files are not uploaded; ignored remote files are
        // invisible to the diff and therefore never deleted.
        assert!(!outcome.plan.uploads.contains(&"scratch.tmp".to_owned()));
        assert!(outcome.plan.deletions.is_empty());
        assert!(fake.contents("logs/run.log").is_some());
    }

    #[test]
    fn remote_discovery_failure_aborts_before_any_mutation() {
        let mut fake = FakeWorkspace::with_files([("models/a.sql", b"x".to_vec())]);
        fake.fail_listings.insert("models".to_owned());
        let source = source_with(&[("models/a.sql", "select 1")]);

        let err = push_workspace(
            &fake,
            &test_workspace(),
            source.path(),
            &ApplyOptions::default(),
        )
        .expect_err("discovery failure must abort");
        assert!(matches!(err, SyncError::Remote(_)));
        assert!(fake.ops().is_empty(), "no mutation may precede a complete plan");
    }

    #[test]
    fn empty_remote_workspace_receives_everything() {
        let fake = FakeWorkspace::new();
        let source = source_with(&[("dataform.json", "{}"), ("models/a.sql", "select 1")]);

        let options = ApplyOptions {
            autocommit: false,
            autopush: false,
            ..ApplyOptions::default()
        };
        let outcome =
            push_workspace(&fake, &test_workspace(), source.path(), &options).expect("push");
        assert_eq!(outcome.report.uploaded, 2);
        assert_eq!(
            fake.file_paths(),
            vec!["dataform.json".to_owned(), "models/a.sql".to_owned()]
        );
    }

    #[test]
    fn ignore_file_itself_is_pushed_when_present() {
        // The ignore file is a regular tracked file unless a rule excludes it.
        let fake = FakeWorkspace::new();
        let source = source_with(&[(".gitignore", "logs/\n"), ("a.sql", "select 1")]);

        let options = ApplyOptions {
            autocommit: false,
            autopush: false,
            ..ApplyOptions::default()
        };
        let outcome =
            push_workspace(&fake, &test_workspace(), source.path(), &options).expect("push");
        assert!(outcome.plan.uploads.contains(&".gitignore".to_owned()));
    }
}
