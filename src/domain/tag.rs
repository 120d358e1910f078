use crate::domain::Version;
use crate::error::Result;

/// A tag the run wants to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Full tag name, e.g. "v1.2.3" or "release/v1.2.3"
    pub version: String,
    pub commit_hash: String,
    pub message: String,
}

/// Tag naming: an optional prefix followed by a literal `v` and the version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagNaming {
    pub prefix: String,
}

impl TagNaming {
    /// Create a naming scheme with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        TagNaming {
            prefix: prefix.into(),
        }
    }

    /// Format a version as a tag name
    /// Example: prefix="release/", version=1.2.3 -> "release/v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}v{}", self.prefix, version)
    }

    /// Parse the version carried by an existing tag name.
    ///
    /// The prefix is stripped when the tag carries it; the leading `v` is optional.
    pub fn parse(&self, tag: &str) -> Result<Version> {
        let body = if self.prefix.is_empty() {
            tag
        } else {
            tag.strip_prefix(self.prefix.as_str()).unwrap_or(tag)
        };
        Version::parse(body)
    }
}
