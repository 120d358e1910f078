use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{BranchType, Oid, Repository as Git2Repo, Sort};
use tracing::{debug, info};

use crate::domain::CommitRecord;
use crate::error::{AutotagError, Result};
use crate::git::TagMap;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    workdir: PathBuf,
    remote: Option<String>,
}

impl Git2Repository {
    /// Open the repository at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path).map_err(|e| {
            AutotagError::history(format!(
                "Cannot open git repository at '{}': {}",
                path.display(),
                e.message()
            ))
        })?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let workdir = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();
        Git2Repository {
            repo,
            workdir,
            remote: None,
        }
    }

    /// Push to a named remote instead of git's default
    pub fn with_remote(mut self, remote: Option<String>) -> Self {
        self.remote = remote;
        self
    }

    fn push_command(&self) -> Vec<String> {
        let mut args = vec!["push".to_string()];
        if let Some(remote) = &self.remote {
            args.push(remote.clone());
        }
        args.push("--tags".to_string());
        args
    }
}

impl super::Repository for Git2Repository {
    fn list_commits(&self, branch: &str) -> Result<Vec<CommitRecord>> {
        let head = self
            .repo
            .find_branch(branch, BranchType::Local)
            .map_err(|e| {
                AutotagError::history(format!("Cannot find branch '{}': {}", branch, e.message()))
            })?
            .get()
            .peel_to_commit()
            .map_err(|e| {
                AutotagError::history(format!(
                    "Branch '{}' does not point at a commit: {}",
                    branch,
                    e.message()
                ))
            })?
            .id();

        let walk_error =
            |e: git2::Error| AutotagError::history(format!("Cannot walk history: {}", e.message()));
        let mut revwalk = self.repo.revwalk().map_err(walk_error)?;
        revwalk.set_sorting(Sort::TIME).map_err(walk_error)?;
        revwalk.push(head).map_err(walk_error)?;

        let mut tags = self.list_tags()?;
        let mut commits = Vec::new();
        let mut tag_count = 0;
        for oid in revwalk {
            let oid = oid.map_err(walk_error)?;
            let commit = self.repo.find_commit(oid).map_err(walk_error)?;
            let hash = oid.to_string();
            let names = tags.remove(&hash).unwrap_or_default();
            tag_count += names.len();

            commits.push(CommitRecord {
                message: commit.message().unwrap_or_default().to_string(),
                tags: names,
                hash,
            });
        }

        info!(
            branch,
            commits = commits.len(),
            tags = tag_count,
            "loaded commit history"
        );
        Ok(commits)
    }

    fn list_tags(&self) -> Result<TagMap> {
        let names = self.repo.tag_names(None).map_err(|e| {
            AutotagError::history(format!("Cannot list tags: {}", e.message()))
        })?;

        let mut tags = TagMap::new();
        for name in names.iter().flatten() {
            let target = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .and_then(|reference| reference.peel_to_commit());
            match target {
                Ok(commit) => tags
                    .entry(commit.id().to_string())
                    .or_default()
                    .push(name.to_string()),
                Err(e) => debug!(tag = name, error = e.message(), "skipping tag without a commit"),
            }
        }

        Ok(tags)
    }

    fn create_tag_ref(&self, name: &str, commit_hash: &str) -> Result<()> {
        let commit = Oid::from_str(commit_hash)
            .and_then(|oid| self.repo.find_commit(oid))
            .map_err(|_| AutotagError::commit_not_found(commit_hash))?;

        self.repo.reference(
            &format!("refs/tags/{}", name),
            commit.id(),
            true,
            &format!("autotag: {}", name),
        )?;

        debug!(tag = name, commit = commit_hash, "created tag ref");
        Ok(())
    }

    fn push_tags(&self) -> Result<String> {
        let args = self.push_command();
        let command = format!("git {}", args.join(" "));

        let workdir = self.workdir.display().to_string();
        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| AutotagError::Push {
                command: command.clone(),
                workdir: workdir.clone(),
                output: format!("cannot run git: {}", e),
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(AutotagError::Push {
                command,
                workdir,
                output: text.trim().to_string(),
            });
        }

        info!(%command, "pushed tags");
        Ok(text)
    }
}
