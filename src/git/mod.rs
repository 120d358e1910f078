//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository the
//! tool reads history from and writes tags to.
//!
//! # Overview
//!
//! The [Repository] trait is the only surface the run pipeline touches. The
//! concrete implementations are:
//!
//! - [repository::Git2Repository]: a real repository opened with the `git2` crate
//! - [mock::MockRepository]: an in-memory repository for testing
//!
//! # Usage
//!
//! ```rust
//! # use autotag::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> autotag::Result<()> {
//! let commits = repo.list_commits("main")?;
//! if let Some(head) = commits.first() {
//!     repo.create_tag_ref("v1.0.0", &head.hash)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::collections::HashMap;

use crate::domain::CommitRecord;
use crate::error::Result;

/// Commit hash -> names of the tags pointing at it
pub type TagMap = HashMap<String, Vec<String>>;

/// Repository operations the run pipeline depends on.
///
/// ## Error Handling
///
/// Implementations map their underlying failures onto the
/// [crate::error::AutotagError] taxonomy: missing branches and walk failures
/// become `History`, unknown tag targets become `CommitNotFound`, and a
/// failed publish becomes `Push`. Nothing here retries.
pub trait Repository {
    /// List the commits reachable from a local branch, newest first by
    /// committer time, each carrying the names of the tags that point at it.
    ///
    /// # Returns
    /// * `Ok(Vec<CommitRecord>)` - Commits in newest-first order
    /// * `Err(History)` - If the branch doesn't exist or the walk fails
    fn list_commits(&self, branch: &str) -> Result<Vec<CommitRecord>>;

    /// Map every tag to the commit it resolves to.
    ///
    /// Annotated tags are peeled to their target commit.
    fn list_tags(&self) -> Result<TagMap>;

    /// Create (or move) the local ref `refs/tags/<name>` at a commit.
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err(CommitNotFound)` - If `commit_hash` does not name a commit
    fn create_tag_ref(&self, name: &str, commit_hash: &str) -> Result<()>;

    /// Publish all local tags to the remote.
    ///
    /// # Returns
    /// * `Ok(String)` - Output of the push
    /// * `Err(Push)` - If the remote rejected the push, carrying its output
    fn push_tags(&self) -> Result<String>;
}
