use thiserror::Error;

/// Unified error type for autotag operations
#[derive(Error, Debug)]
pub enum AutotagError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("History error: {0}")]
    History(String),

    #[error("No tagged commit found in {scanned} commit(s), nothing to release")]
    NoBaselineTag { scanned: usize },

    #[error("Invalid baseline version in tag '{tag}': {reason}")]
    InvalidBaselineVersion { tag: String, reason: String },

    #[error("Version parsing error: {0}")]
    VersionParse(String),

    #[error("Commit not found: {hash}")]
    CommitNotFound { hash: String },

    #[error("{} tag(s) failed to create: {}", .failures.len(), join_failures(.failures))]
    TagCreation { failures: Vec<AutotagError> },

    #[error("Push failed [command: {command}, workdir: {workdir}]: {output}")]
    Push {
        command: String,
        workdir: String,
        output: String,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in autotag
pub type Result<T> = std::result::Result<T, AutotagError>;

fn join_failures(failures: &[AutotagError]) -> String {
    failures
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AutotagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutotagError::Config(msg.into())
    }

    /// Create a history error with context
    pub fn history(msg: impl Into<String>) -> Self {
        AutotagError::History(msg.into())
    }

    /// Create a version parsing error with context
    pub fn version(msg: impl Into<String>) -> Self {
        AutotagError::VersionParse(msg.into())
    }

    /// Create a commit-not-found error for the given hash
    pub fn commit_not_found(hash: impl Into<String>) -> Self {
        AutotagError::CommitNotFound { hash: hash.into() }
    }

    /// Whether this error means "nothing to do" rather than a failed run.
    pub fn is_graceful(&self) -> bool {
        matches!(self, AutotagError::NoBaselineTag { .. })
    }
}
