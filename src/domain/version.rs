use crate::error::{AutotagError, Result};
use semver::{BuildMetadata, Prerelease};
use std::fmt;

/// A version as an ordered list of numeric segments.
///
/// Segment 0 is major, 1 is minor, 2 is patch. Anything past index 2 is an
/// extra trailing component and is kept positionally. An optional pre-release
/// and build suffix (`1.2.3-rc.1+build.5`) is accepted on parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    segments: Vec<u64>,
    pre: Prerelease,
    build: BuildMetadata,
}

/// Severity of the version change implied by a commit.
///
/// Variants are declared from least to most severe so the derived ordering
/// gives `Major > Minor > Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpLevel {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpLevel::Major => "major",
            BumpLevel::Minor => "minor",
            BumpLevel::Patch => "patch",
        };
        f.write_str(name)
    }
}

impl Version {
    /// Create a plain three-segment version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self::from_segments(vec![major, minor, patch])
    }

    /// Create a version from raw segments with no suffix
    pub fn from_segments(segments: Vec<u64>) -> Self {
        Version {
            segments,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        }
    }

    /// Parse a version string (e.g., "v1.2.3", "1.2", "2.0.0.7", "1.0.0-rc.1+sha.5")
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let body = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let (rest, build) = body.split_once('+').unwrap_or((body, ""));
        let (numbers, pre) = rest.split_once('-').unwrap_or((rest, ""));

        let dangling_suffix = (body.contains('+') && build.is_empty())
            || (rest.contains('-') && pre.is_empty());
        if numbers.is_empty() || dangling_suffix {
            return Err(AutotagError::version(format!(
                "Invalid version format: '{}' - expected N(.N)*",
                input
            )));
        }

        let segments = numbers
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(AutotagError::version(format!(
                        "Invalid version segment '{}' in '{}'",
                        part, input
                    )));
                }
                part.parse::<u64>().map_err(|_| {
                    AutotagError::version(format!(
                        "Version segment '{}' in '{}' is out of range",
                        part, input
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let pre = Prerelease::new(pre).map_err(|e| {
            AutotagError::version(format!("Invalid pre-release in '{}': {}", input, e))
        })?;
        let build = BuildMetadata::new(build).map_err(|e| {
            AutotagError::version(format!("Invalid build metadata in '{}': {}", input, e))
        })?;

        Ok(Version {
            segments,
            pre,
            build,
        })
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Apply one bump to this version.
    ///
    /// - Major: bump segment 0, zero segments 1 and 2 when present, drop the rest.
    /// - Minor: bump segment 1; segment 2 and any extras are kept as they are.
    ///   A version with fewer than two segments comes back unchanged.
    /// - Patch: bump segment 2, keep extras. A version with fewer than three
    ///   segments comes back unchanged.
    ///
    /// The rebuilt string is parsed again so every result is a valid version.
    pub fn bump(&self, level: BumpLevel) -> Result<Version> {
        let Some(&first) = self.segments.first() else {
            return Err(AutotagError::version("Cannot bump a version without segments"));
        };

        let rebuilt = match level {
            BumpLevel::Major => {
                let major = increment(first)?;
                let zeroed = self.segments.len().clamp(1, 3) - 1;
                std::iter::once(major.to_string())
                    .chain(std::iter::repeat("0".to_string()).take(zeroed))
                    .collect::<Vec<_>>()
                    .join(".")
            }
            BumpLevel::Minor => {
                if self.segments.len() < 2 {
                    return Ok(self.clone());
                }
                let mut segments = self.segments.clone();
                segments[1] = increment(segments[1])?;
                join_segments(&segments)
            }
            BumpLevel::Patch => {
                if self.segments.len() < 3 {
                    return Ok(self.clone());
                }
                let mut segments = self.segments.clone();
                segments[2] = increment(segments[2])?;
                join_segments(&segments)
            }
        };

        Version::parse(&rebuilt)
    }
}

fn increment(segment: u64) -> Result<u64> {
    segment
        .checked_add(1)
        .ok_or_else(|| AutotagError::version(format!("Segment {} cannot be incremented", segment)))
}

fn join_segments(segments: &[u64]) -> String {
    segments
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_segments(&self.segments))?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}
