//! The default commit-marker scheme.
//!
//! Commits opt into a larger bump with `[major]`/`#major` or `[minor]`/`#minor`
//! anywhere in their message. Every other commit counts as a patch.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::domain::{BumpLevel, CommitRecord, TagInfo, TagNaming, Version};
use crate::error::{AutotagError, Result};

static MAJOR_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\[major\]|#major)").expect("major marker regex is valid"));
static MINOR_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\[minor\]|#minor)").expect("minor marker regex is valid"));

/// Classify a commit message into the bump it asks for.
///
/// Major wins over minor; a message with no marker (or an explicit
/// `[patch]`/`#patch`) is a patch.
pub fn classify(message: &str) -> BumpLevel {
    if MAJOR_MARKER.is_match(message) {
        BumpLevel::Major
    } else if MINOR_MARKER.is_match(message) {
        BumpLevel::Minor
    } else {
        BumpLevel::Patch
    }
}

/// Everything the engine worked out for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Tag name on the baseline commit that the version was read from
    pub baseline_tag: String,
    pub baseline_version: Version,
    /// One entry per commit newer than the baseline, newest first
    pub pending: Vec<BumpLevel>,
    pub next_version: Version,
    pub tag: TagInfo,
}

impl Resolution {
    /// True when no commit sits above the baseline, so the next version equals it
    pub fn is_unchanged(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Work out the next tag for a newest-first commit history.
///
/// Pass one walks from the newest commit down to the first tagged commit (the
/// baseline), collecting one bump per untagged commit. Pass two replays those
/// bumps oldest-first on top of the baseline version. The resulting tag always
/// targets the newest commit.
pub fn resolve(commits: &[CommitRecord], naming: &TagNaming) -> Result<Resolution> {
    let mut pending = Vec::new();
    let mut baseline = None;
    for commit in commits {
        if commit.is_tagged() {
            baseline = Some(commit);
            break;
        }
        let level = classify(&commit.message);
        debug!(
            commit = commit.short_hash(),
            summary = commit.summary(),
            %level,
            "classified commit"
        );
        pending.push(level);
    }

    let baseline = baseline.ok_or(AutotagError::NoBaselineTag {
        scanned: commits.len(),
    })?;
    let baseline_tag = baseline.tags[0].clone();
    let baseline_version =
        naming
            .parse(&baseline_tag)
            .map_err(|e| AutotagError::InvalidBaselineVersion {
                tag: baseline_tag.clone(),
                reason: e.to_string(),
            })?;
    info!(
        tag = %baseline_tag,
        commit = baseline.short_hash(),
        pending = pending.len(),
        "found baseline tag"
    );

    let mut next_version = baseline_version.clone();
    for level in pending.iter().rev() {
        let bumped = next_version.bump(*level)?;
        debug!(from = %next_version, to = %bumped, %level, "applied bump");
        next_version = bumped;
    }

    // The baseline was found, so the list has a head.
    let head = &commits[0];
    let tag = TagInfo {
        version: naming.format(&next_version),
        commit_hash: head.hash.clone(),
        message: format!("autotag default scheme:{}", next_version),
    };
    info!(version = %next_version, commit = head.short_hash(), "resolved next version");

    Ok(Resolution {
        baseline_tag,
        baseline_version,
        pending,
        next_version,
        tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn untagged(hash: &str, message: &str) -> CommitRecord {
        CommitRecord::new(hash, message)
    }

    fn tagged(hash: &str, tag: &str) -> CommitRecord {
        CommitRecord::new(hash, "release").with_tags([tag])
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(classify("drop old api [major]"), BumpLevel::Major);
        assert_eq!(classify("drop old api #MAJOR"), BumpLevel::Major);
        assert_eq!(classify("add endpoint [Minor]"), BumpLevel::Minor);
        assert_eq!(classify("add endpoint #minor"), BumpLevel::Minor);
        assert_eq!(classify("fix typo [patch]"), BumpLevel::Patch);
        assert_eq!(classify("fix typo"), BumpLevel::Patch);
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify("#minor and also [major]"), BumpLevel::Major);
        assert_eq!(classify("[patch] [minor]"), BumpLevel::Minor);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let message = "refactor storage\n\nbody mentions #minor";
        let first = classify(message);
        for _ in 0..5 {
            assert_eq!(classify(message), first);
        }
    }

    #[test]
    fn test_single_unmarked_commit_is_a_patch() {
        let commits = vec![untagged("c2", "fix bug"), tagged("c1", "v1.4.2")];
        let resolution = resolve(&commits, &TagNaming::default()).unwrap();
        assert_eq!(resolution.tag.version, "v1.4.3");
        assert_eq!(resolution.tag.commit_hash, "c2");
    }

    #[test]
    fn test_bumps_replay_oldest_first() {
        let commits = vec![
            untagged("c3", "small fix [patch]"),
            untagged("c2", "rewrite [major]"),
            tagged("c1", "v2.0.0"),
        ];
        let resolution = resolve(&commits, &TagNaming::default()).unwrap();
        assert_eq!(resolution.pending, vec![BumpLevel::Patch, BumpLevel::Major]);
        assert_eq!(resolution.next_version, Version::new(3, 0, 1));
        assert_eq!(resolution.tag.version, "v3.0.1");
        assert_eq!(resolution.tag.commit_hash, "c3");
    }

    #[test]
    fn test_every_commit_counts() {
        let commits = vec![
            untagged("c4", "fix"),
            untagged("c3", "fix"),
            untagged("c2", "fix"),
            tagged("c1", "v0.1.0"),
        ];
        let resolution = resolve(&commits, &TagNaming::default()).unwrap();
        assert_eq!(resolution.tag.version, "v0.1.3");
    }

    #[test]
    fn test_only_commits_above_baseline_are_classified() {
        let commits = vec![
            untagged("c5", "[minor]"),
            untagged("c4", "fix"),
            tagged("c3", "v1.0.0"),
            untagged("c2", "[major]"),
            tagged("c1", "v0.9.0"),
        ];
        let resolution = resolve(&commits, &TagNaming::default()).unwrap();
        assert_eq!(resolution.pending.len(), 2);
        assert_eq!(resolution.baseline_tag, "v1.0.0");
        assert_eq!(resolution.tag.version, "v1.1.1");
    }

    #[test]
    fn test_no_tag_anywhere() {
        let commits = vec![untagged("c2", "fix"), untagged("c1", "init")];
        let err = resolve(&commits, &TagNaming::default()).unwrap_err();
        assert!(matches!(err, AutotagError::NoBaselineTag { scanned: 2 }));
        assert!(err.is_graceful());
    }

    #[test]
    fn test_empty_history_has_no_baseline() {
        let err = resolve(&[], &TagNaming::default()).unwrap_err();
        assert!(matches!(err, AutotagError::NoBaselineTag { scanned: 0 }));
    }

    #[test]
    fn test_invalid_baseline_version() {
        let commits = vec![untagged("c2", "fix"), tagged("c1", "nightly")];
        let err = resolve(&commits, &TagNaming::default()).unwrap_err();
        match err {
            AutotagError::InvalidBaselineVersion { tag, .. } => assert_eq!(tag, "nightly"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_tagged_head_keeps_version() {
        let commits = vec![tagged("c1", "v1.2.3"), untagged("c0", "[major]")];
        let resolution = resolve(&commits, &TagNaming::default()).unwrap();
        assert!(resolution.is_unchanged());
        assert_eq!(resolution.tag.version, "v1.2.3");
        assert_eq!(resolution.tag.commit_hash, "c1");
    }

    #[test]
    fn test_prefix_round_trip() {
        let naming = TagNaming::new("svc-");
        let commits = vec![untagged("c2", "add flag #minor"), tagged("c1", "svc-v1.2.3")];
        let resolution = resolve(&commits, &naming).unwrap();
        assert_eq!(resolution.tag.version, "svc-v1.3.3");
    }

    #[test]
    fn test_message_names_the_version() {
        let commits = vec![untagged("c2", "fix"), tagged("c1", "v1.0.0")];
        let resolution = resolve(&commits, &TagNaming::default()).unwrap();
        assert_eq!(resolution.tag.message, "autotag default scheme:1.0.1");
    }
}
