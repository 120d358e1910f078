use autotag::cli::{publish_tags, run_autotag, RunOutcome};
use autotag::config::{Config, RunOptions};
use autotag::domain::TagInfo;
use autotag::git::{MockRepository, Repository};
use autotag::AutotagError;

fn options(dry_run: bool) -> RunOptions {
    Config {
        dry_run,
        ..Config::default()
    }
    .into_options()
    .expect("default config is valid")
}

fn published(outcome: RunOutcome) -> autotag::cli::WorkflowResult {
    match outcome {
        RunOutcome::Published(result) => result,
        other => panic!("expected a published tag, got {:?}", other),
    }
}

#[test]
fn test_single_patch_after_baseline() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");
    repo.add_commit("main", "c2", "fix flaky test");
    repo.add_tag("v1.4.2", "c1");

    let result = published(run_autotag(&repo, &options(false)).unwrap());

    assert_eq!(result.resolution.tag.version, "v1.4.3");
    assert_eq!(repo.tag_target("v1.4.3").as_deref(), Some("c2"));
    assert!(result.report.pushed);
    assert_eq!(repo.push_count(), 1);
}

#[test]
fn test_major_then_patch_replays_chronologically() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");
    repo.add_commit("main", "c2", "new storage format [major]");
    repo.add_commit("main", "c3", "fix off-by-one #patch");
    repo.add_tag("v2.0.0", "c1");

    let result = published(run_autotag(&repo, &options(false)).unwrap());

    assert_eq!(result.resolution.tag.version, "v3.0.1");
    assert_eq!(result.resolution.tag.commit_hash, "c3");
    assert_eq!(repo.tag_target("v3.0.1").as_deref(), Some("c3"));
}

#[test]
fn test_no_tag_is_a_clean_noop() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "init");
    repo.add_commit("main", "c2", "fix");

    let outcome = run_autotag(&repo, &options(false)).unwrap();

    assert_eq!(
        outcome,
        RunOutcome::NothingToRelease {
            branch: "main".to_string(),
            scanned: 2,
        }
    );
    assert_eq!(repo.push_count(), 0);
    assert!(repo.list_tags().unwrap().is_empty());
}

#[test]
fn test_dry_run_creates_local_tag_without_push() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");
    repo.add_commit("main", "c2", "add option #minor");
    repo.add_tag("v0.3.1", "c1");

    let result = published(run_autotag(&repo, &options(true)).unwrap());

    assert_eq!(repo.tag_target("v0.4.1").as_deref(), Some("c2"));
    assert!(!result.report.pushed);
    assert_eq!(result.report.push_output, None);
    assert_eq!(repo.push_count(), 0);
}

#[test]
fn test_failed_creation_blocks_push() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");

    let tags = vec![
        TagInfo {
            version: "v1.0.1".to_string(),
            commit_hash: "c1".to_string(),
            message: "ok".to_string(),
        },
        TagInfo {
            version: "v9.9.9".to_string(),
            commit_hash: "does-not-exist".to_string(),
            message: "bad".to_string(),
        },
    ];

    let err = publish_tags(&repo, &tags, false).unwrap_err();

    match err {
        AutotagError::TagCreation { failures } => {
            assert_eq!(failures.len(), 1);
            assert!(matches!(
                &failures[0],
                AutotagError::CommitNotFound { hash } if hash == "does-not-exist"
            ));
        }
        other => panic!("expected aggregate creation error, got {}", other),
    }
    assert_eq!(repo.tag_target("v1.0.1").as_deref(), Some("c1"));
    assert_eq!(repo.tag_target("v9.9.9"), None);
    assert_eq!(repo.push_count(), 0);
}

#[test]
fn test_creation_continues_after_failure() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");

    let tags = vec![
        TagInfo {
            version: "v0.0.1".to_string(),
            commit_hash: "missing".to_string(),
            message: String::new(),
        },
        TagInfo {
            version: "v0.0.2".to_string(),
            commit_hash: "c1".to_string(),
            message: String::new(),
        },
    ];

    assert!(publish_tags(&repo, &tags, true).is_err());
    assert_eq!(repo.tag_target("v0.0.2").as_deref(), Some("c1"));
}

#[test]
fn test_push_failure_is_reported() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");
    repo.add_commit("main", "c2", "fix");
    repo.add_tag("v1.0.0", "c1");
    repo.fail_pushes("remote: permission denied");

    let err = run_autotag(&repo, &options(false)).unwrap_err();

    assert!(matches!(err, AutotagError::Push { ref output, .. } if output.contains("permission denied")));
    assert_eq!(repo.tag_target("v1.0.1").as_deref(), Some("c2"));
}

#[test]
fn test_missing_branch_is_history_error() {
    let repo = MockRepository::new();
    let err = run_autotag(&repo, &options(false)).unwrap_err();
    assert!(matches!(err, AutotagError::History(_)));
}

#[test]
fn test_invalid_baseline_aborts_before_tagging() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");
    repo.add_commit("main", "c2", "fix");
    repo.add_tag("latest", "c1");

    let err = run_autotag(&repo, &options(false)).unwrap_err();

    assert!(matches!(err, AutotagError::InvalidBaselineVersion { .. }));
    assert_eq!(repo.push_count(), 0);
}

#[test]
fn test_tagged_head_retags_same_version() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");
    repo.add_tag("v1.2.0", "c1");

    let result = published(run_autotag(&repo, &options(true)).unwrap());

    assert!(result.resolution.is_unchanged());
    assert_eq!(result.resolution.tag.version, "v1.2.0");
    assert_eq!(repo.tag_target("v1.2.0").as_deref(), Some("c1"));
}

#[test]
fn test_unsupported_scheme_fails_before_history_access() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");

    let config = Config {
        scheme: "conventional".to_string(),
        ..Config::default()
    };
    let result = config
        .into_options()
        .and_then(|options| run_autotag(&repo, &options));

    assert!(matches!(result, Err(AutotagError::Config(_))));
    assert_eq!(repo.history_reads(), 0);
}

#[test]
fn test_prefix_applies_to_created_tag() {
    let mut repo = MockRepository::new();
    repo.add_commit("main", "c1", "release");
    repo.add_commit("main", "c2", "fix");
    repo.add_tag("api/v1.0.0", "c1");

    let options = Config {
        prefix: "api/".to_string(),
        dry_run: true,
        ..Config::default()
    }
    .into_options()
    .unwrap();

    let result = published(run_autotag(&repo, &options).unwrap());
    assert_eq!(result.resolution.tag.version, "api/v1.0.1");
}
