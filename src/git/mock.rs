use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::domain::CommitRecord;
use crate::error::{AutotagError, Result};
use crate::git::{Repository, TagMap};

/// Mock repository for testing without actual git operations.
///
/// Commits are stored newest-first per branch. Tag creation and pushes are
/// recorded so tests can assert on what a run did.
pub struct MockRepository {
    branches: HashMap<String, Vec<CommitRecord>>,
    tags: RefCell<HashMap<String, String>>,
    history_reads: Cell<usize>,
    pushes: Cell<usize>,
    push_failure: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            branches: HashMap::new(),
            tags: RefCell::new(HashMap::new()),
            history_reads: Cell::new(0),
            pushes: Cell::new(0),
            push_failure: None,
        }
    }

    /// Append a commit to a branch. Call oldest first; the newest commit ends up
    /// at the head of the listed history.
    pub fn add_commit(&mut self, branch: &str, hash: &str, message: &str) {
        self.branches
            .entry(branch.to_string())
            .or_default()
            .insert(0, CommitRecord::new(hash, message));
    }

    /// Add a tag pointing to a commit hash
    pub fn add_tag(&mut self, name: &str, hash: &str) {
        self.tags
            .get_mut()
            .insert(name.to_string(), hash.to_string());
    }

    /// Make every push fail with the given remote output
    pub fn fail_pushes(&mut self, output: &str) {
        self.push_failure = Some(output.to_string());
    }

    /// Commit hash a tag points at, if the tag exists
    pub fn tag_target(&self, name: &str) -> Option<String> {
        self.tags.borrow().get(name).cloned()
    }

    pub fn push_count(&self) -> usize {
        self.pushes.get()
    }

    /// How many times history was read
    pub fn history_reads(&self) -> usize {
        self.history_reads.get()
    }

    fn knows_commit(&self, hash: &str) -> bool {
        self.branches
            .values()
            .flatten()
            .any(|commit| commit.hash == hash)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_commits(&self, branch: &str) -> Result<Vec<CommitRecord>> {
        self.history_reads.set(self.history_reads.get() + 1);
        let commits = self
            .branches
            .get(branch)
            .ok_or_else(|| AutotagError::history(format!("Cannot find branch '{}'", branch)))?;

        let mut tags = self.list_tags()?;
        Ok(commits
            .iter()
            .map(|commit| {
                let mut names = tags.remove(&commit.hash).unwrap_or_default();
                names.sort();
                CommitRecord {
                    tags: names,
                    ..commit.clone()
                }
            })
            .collect())
    }

    fn list_tags(&self) -> Result<TagMap> {
        let mut map = TagMap::new();
        for (name, hash) in self.tags.borrow().iter() {
            map.entry(hash.clone()).or_default().push(name.clone());
        }
        Ok(map)
    }

    fn create_tag_ref(&self, name: &str, commit_hash: &str) -> Result<()> {
        if !self.knows_commit(commit_hash) {
            return Err(AutotagError::commit_not_found(commit_hash));
        }
        self.tags
            .borrow_mut()
            .insert(name.to_string(), commit_hash.to_string());
        Ok(())
    }

    fn push_tags(&self) -> Result<String> {
        self.pushes.set(self.pushes.get() + 1);
        match &self.push_failure {
            Some(output) => Err(AutotagError::Push {
                command: "git push --tags".to_string(),
                workdir: "<mock>".to_string(),
                output: output.clone(),
            }),
            None => Ok("Everything up-to-date".to_string()),
        }
    }
}
