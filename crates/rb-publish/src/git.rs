//! Thin wrapper around the `git` binary.
//!
//! Every call shells out and captures output; non-zero exits are
//! classified with the failing command line and stderr attached.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::PublishError;

/// State of the repository working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorktreeStatus {
    Clean,
    /// Porcelain status lines describing the uncommitted changes.
    Dirty(Vec<String>),
}

impl WorktreeStatus {
    pub fn is_clean(&self) -> bool {
        matches!(self, WorktreeStatus::Clean)
    }
}

/// Git subprocess client rooted at a repository directory.
pub struct GitClient {
    repo_dir: PathBuf,
}

impl GitClient {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    fn raw(&self, args: &[&str]) -> Result<Output, PublishError> {
        log::debug!("git {}", args.join(" "));
        Command::new("git")
            .current_dir(&self.repo_dir)
            .args(args)
            .output()
            .map_err(PublishError::GitSpawn)
    }

    fn failure(args: &[&str], output: &Output) -> PublishError {
        PublishError::GitCommand {
            args: args.join(" "),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Run git, requiring success. Returns stdout.
    pub fn run(&self, args: &[&str]) -> Result<String, PublishError> {
        let output = self.raw(args)?;
        if !output.status.success() {
            return Err(Self::failure(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Porcelain worktree status. Untracked-but-ignored files do not
    /// count as dirt.
    pub fn status(&self) -> Result<WorktreeStatus, PublishError> {
        let out = self.run(&["status", "--porcelain"])?;
        let lines: Vec<String> = out.lines().map(str::to_string).collect();
        if lines.is_empty() {
            Ok(WorktreeStatus::Clean)
        } else {
            Ok(WorktreeStatus::Dirty(lines))
        }
    }

    /// Short name of the checked-out branch, or `HEAD` when detached.
    pub fn current_branch(&self) -> Result<String, PublishError> {
        Ok(self
            .run(&["rev-parse", "--abbrev-ref", "HEAD"])?
            .trim()
            .to_string())
    }

    pub fn branch_exists(&self, branch: &str) -> Result<bool, PublishError> {
        let refname = format!("refs/heads/{branch}");
        let args = ["rev-parse", "--verify", "--quiet", refname.as_str()];
        let output = self.raw(&args)?;
        match output.status.code() {
            Some(0) => Ok(true),
            // --quiet reports a missing ref as a silent exit 1.
            Some(1) => Ok(false),
            _ => Err(Self::failure(&args, &output)),
        }
    }

    pub fn switch(&self, branch: &str) -> Result<(), PublishError> {
        self.run(&["switch", branch]).map(|_| ())
    }

    /// Create and switch to an unborn branch with an empty index.
    pub fn switch_orphan(&self, branch: &str) -> Result<(), PublishError> {
        self.run(&["switch", "--orphan", branch]).map(|_| ())
    }

    /// Remove every tracked file from the index and working tree.
    pub fn remove_tracked(&self) -> Result<(), PublishError> {
        self.run(&["rm", "-r", "-f", "-q", "--ignore-unmatch", "."])
            .map(|_| ())
    }

    pub fn stage_all(&self) -> Result<(), PublishError> {
        self.run(&["add", "-A"]).map(|_| ())
    }

    pub fn has_staged_changes(&self) -> Result<bool, PublishError> {
        let args = ["diff", "--cached", "--quiet"];
        let output = self.raw(&args)?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(Self::failure(&args, &output)),
        }
    }

    pub fn commit(&self, message: &str) -> Result<(), PublishError> {
        self.run(&["commit", "-q", "-m", message]).map(|_| ())
    }

    pub fn push_force(&self, remote: &str, branch: &str) -> Result<(), PublishError> {
        self.run(&["push", "--force", "-q", remote, branch])
            .map(|_| ())
    }

    /// Author records for the whole history, one `Name <email>` line
    /// per commit, newest first.
    pub fn author_log(&self) -> Result<String, PublishError> {
        self.run(&["log", "--format=%aN <%aE>"])
    }
}
