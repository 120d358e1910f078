use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::domain::TagNaming;
use crate::error::{AutotagError, Result};
use crate::scheme::Scheme;

/// Name of the configuration file looked up in the working and config directories
pub const CONFIG_FILE_NAME: &str = "autotag.toml";

/// Raw configuration as read from `autotag.toml`, before CLI overrides.
///
/// Every field is optional in the file; missing fields fall back to the
/// defaults of the command line tool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub repo_path: PathBuf,
    pub branch: String,
    pub scheme: String,
    pub prefix: String,
    pub remote: Option<String>,
    pub dry_run: bool,
    pub verbose: bool,
    pub meta: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repo_path: PathBuf::from("."),
            branch: "main".to_string(),
            scheme: "default".to_string(),
            prefix: String::new(),
            remote: None,
            dry_run: false,
            verbose: false,
            meta: BTreeMap::new(),
        }
    }
}

/// Values given on the command line. `None` / `false` leave the file value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub repo_path: Option<PathBuf>,
    pub branch: Option<String>,
    pub scheme: Option<String>,
    pub prefix: Option<String>,
    pub remote: Option<String>,
    pub dry_run: bool,
    pub verbose: bool,
    pub meta: Vec<String>,
}

/// The validated, immutable settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub repo_path: PathBuf,
    pub branch: String,
    pub scheme: Scheme,
    pub naming: TagNaming,
    pub remote: Option<String>,
    pub dry_run: bool,
    pub verbose: bool,
    pub meta: BTreeMap<String, String>,
}

impl Config {
    /// Layer command line values over this configuration.
    ///
    /// Returns the warnings for `--meta` items that are not `key=value`.
    pub fn apply(&mut self, overrides: Overrides) -> Vec<BoundaryWarning> {
        if let Some(repo_path) = overrides.repo_path {
            self.repo_path = repo_path;
        }
        if let Some(branch) = overrides.branch {
            self.branch = branch;
        }
        if let Some(scheme) = overrides.scheme {
            self.scheme = scheme;
        }
        if let Some(prefix) = overrides.prefix {
            self.prefix = prefix;
        }
        if overrides.remote.is_some() {
            self.remote = overrides.remote;
        }
        self.dry_run |= overrides.dry_run;
        self.verbose |= overrides.verbose;

        let (meta, warnings) = parse_meta(&overrides.meta);
        self.meta.extend(meta);
        warnings
    }

    /// Validate into the immutable options a run works from.
    ///
    /// Fails with a configuration error for any scheme other than `default`,
    /// before anything touches the repository.
    pub fn into_options(self) -> Result<RunOptions> {
        let scheme: Scheme = self.scheme.parse()?;
        if self.branch.trim().is_empty() {
            return Err(AutotagError::config("Branch name must not be empty"));
        }

        Ok(RunOptions {
            repo_path: self.repo_path,
            branch: self.branch,
            scheme,
            naming: TagNaming::new(self.prefix),
            remote: self.remote,
            dry_run: self.dry_run,
            verbose: self.verbose,
            meta: self.meta,
        })
    }
}

/// Parse `key=value` metadata items.
///
/// Items may also be comma separated (`-m a=1,b=2`). Items without `=` are
/// skipped and reported.
pub fn parse_meta(items: &[String]) -> (BTreeMap<String, String>, Vec<BoundaryWarning>) {
    let mut meta = BTreeMap::new();
    let mut warnings = Vec::new();

    for item in items.iter().flat_map(|raw| raw.split(',')) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        match item.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                meta.insert(key.trim().to_string(), value.trim().to_string());
            }
            _ => warnings.push(BoundaryWarning::MalformedMeta {
                item: item.to_string(),
            }),
        }
    }

    (meta, warnings)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autotag.toml` in current directory
/// 3. `autotag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                Some(local)
            } else {
                dirs::config_dir()
                    .map(|dir| dir.join(CONFIG_FILE_NAME))
                    .filter(|path| path.exists())
            }
        }
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        AutotagError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    toml::from_str(&content)
        .map_err(|e| AutotagError::config(format!("Cannot parse '{}': {}", path.display(), e)))
}
