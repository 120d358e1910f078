//! Main workflow orchestration logic
//!
//! Reads the branch history, resolves the next version and publishes it.
//! main.rs only parses arguments and prints; everything with an outcome the
//! user cares about happens here.

use tracing::{info, warn};

use crate::config::RunOptions;
use crate::domain::TagInfo;
use crate::error::{AutotagError, Result};
use crate::git::Repository;
use crate::scheme::Resolution;

/// What happened to the requested tags
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    /// Tags created locally, in request order
    pub created: Vec<TagInfo>,
    /// Whether `push_tags` ran and succeeded
    pub pushed: bool,
    /// Output of the push, when it ran
    pub push_output: Option<String>,
}

/// Result of a run that produced a tag
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub branch: String,
    pub resolution: Resolution,
    pub report: PublishReport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No tagged commit on the branch; nothing was created or pushed
    NothingToRelease { branch: String, scanned: usize },
    Published(WorkflowResult),
}

/// Main publish workflow
///
/// 1. Read the branch history (newest first) with tag associations
/// 2. Resolve the next version with the configured scheme
/// 3. Create the tag locally
/// 4. Push tags unless this is a dry run
///
/// A history without any tag is not an error: the run ends with
/// [RunOutcome::NothingToRelease].
pub fn run_autotag<R: Repository>(repo: &R, options: &RunOptions) -> Result<RunOutcome> {
    let commits = repo.list_commits(&options.branch)?;

    let resolution = match options.scheme.resolve(&commits, &options.naming) {
        Ok(resolution) => resolution,
        Err(AutotagError::NoBaselineTag { scanned }) => {
            warn!(branch = %options.branch, scanned, "no tagged commit found, nothing to release");
            return Ok(RunOutcome::NothingToRelease {
                branch: options.branch.clone(),
                scanned,
            });
        }
        Err(e) => return Err(e),
    };

    let report = publish_tags(repo, std::slice::from_ref(&resolution.tag), options.dry_run)?;

    Ok(RunOutcome::Published(WorkflowResult {
        branch: options.branch.clone(),
        resolution,
        report,
    }))
}

/// Create every requested tag locally, then push unless `dry_run` is set.
///
/// Each creation is attempted even after an earlier one failed. If any
/// failed, the push is skipped entirely and the failures come back together
/// as one [AutotagError::TagCreation].
pub fn publish_tags<R: Repository>(
    repo: &R,
    tags: &[TagInfo],
    dry_run: bool,
) -> Result<PublishReport> {
    let mut created = Vec::new();
    let mut failures = Vec::new();

    for tag in tags {
        match repo.create_tag_ref(&tag.version, &tag.commit_hash) {
            Ok(()) => {
                info!(tag = %tag.version, commit = %tag.commit_hash, "created tag");
                created.push(tag.clone());
            }
            Err(e) => {
                warn!(tag = %tag.version, commit = %tag.commit_hash, error = %e, "failed to create tag");
                failures.push(e);
            }
        }
    }

    if !failures.is_empty() {
        return Err(AutotagError::TagCreation { failures });
    }

    if dry_run {
        info!("dry run, skipping push");
        return Ok(PublishReport {
            created,
            pushed: false,
            push_output: None,
        });
    }

    let output = repo.push_tags()?;
    Ok(PublishReport {
        created,
        pushed: true,
        push_output: Some(output),
    })
}
