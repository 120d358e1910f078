use std::fmt;

/// Non-fatal conditions met while computing or publishing a tag.
/// These are reported to the user but do not fail the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commit on the branch carries a tag, so there is nothing to release
    NoBaselineTag { branch: String, scanned: usize },
    /// The branch head is already tagged; the computed version equals the baseline
    UnchangedVersion { tag: String, commit_hash: String },
    /// A `--meta` item that is not `key=value`
    MalformedMeta { item: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoBaselineTag { branch, scanned } => {
                write!(
                    f,
                    "No tagged commit found on branch '{}' ({} commits scanned), nothing to release",
                    branch, scanned
                )
            }
            BoundaryWarning::UnchangedVersion { tag, commit_hash } => {
                let short_hash = commit_hash.get(..7).unwrap_or(commit_hash);
                write!(
                    f,
                    "No new commits since '{}' (current: {}), re-tagging the same version",
                    tag, short_hash
                )
            }
            BoundaryWarning::MalformedMeta { item } => {
                write!(f, "Ignoring meta item '{}': expected key=value", item)
            }
        }
    }
}
