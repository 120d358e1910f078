/// One commit of a branch history, as handed over by the VCS accessor.
///
/// Histories are ordered newest-first by committer time; a record's position
/// in that list is its only notion of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub tags: Vec<String>,
}

impl CommitRecord {
    /// Create a record for an untagged commit
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        CommitRecord {
            hash: hash.into(),
            message: message.into(),
            tags: Vec::new(),
        }
    }

    /// Attach tag names to this record
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Abbreviated hash for display
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}
