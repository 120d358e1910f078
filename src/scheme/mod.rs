//! Commit-message schemes that decide the next version.

pub mod default;

pub use default::{classify, resolve, Resolution};

use std::fmt;
use std::str::FromStr;

use crate::domain::{CommitRecord, TagNaming};
use crate::error::{AutotagError, Result};

/// Scheme selected with `--scheme`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `[major]` / `#minor` style markers in commit messages
    #[default]
    Default,
}

impl Scheme {
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Default => "default",
        }
    }

    /// Resolve the next tag for a newest-first history
    pub fn resolve(&self, commits: &[CommitRecord], naming: &TagNaming) -> Result<Resolution> {
        match self {
            Scheme::Default => default::resolve(commits, naming),
        }
    }
}

impl FromStr for Scheme {
    type Err = AutotagError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(Scheme::Default),
            "conventional" => Err(AutotagError::config(
                "Scheme 'conventional' is not implemented yet, use 'default'",
            )),
            other => Err(AutotagError::config(format!(
                "Unsupported scheme '{}', check the '-s' flag and try again",
                other
            ))),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
