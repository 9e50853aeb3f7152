//! The gh-pages publish sequence.
//!
//! Mirrors the manual workflow the book used for years: with a clean
//! worktree, copy the rendered site aside, switch to the publish
//! branch, replace its contents wholesale, commit, force-push, and
//! switch back. Whatever happens after the branch switch, the sequence
//! ends with an attempt to put the repository back on the branch it
//! started from.

use std::path::{Path, PathBuf};

use crate::error::PublishError;
use crate::git::{GitClient, WorktreeStatus};

/// Knobs for one publish run.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Branch the rendered site is committed to.
    pub branch: String,
    /// Remote the branch is force-pushed to.
    pub remote: String,
    /// Rendered output directory, relative to the repo root.
    pub output_dir: PathBuf,
    /// Commit message for the publish commit.
    pub message: String,
}

/// Publish the rendered site from `repo_dir` to the publish branch.
pub fn publish(repo_dir: &Path, opts: &PublishOptions) -> Result<(), PublishError> {
    let git = GitClient::new(repo_dir);

    if let WorktreeStatus::Dirty(lines) = git.status()? {
        return Err(PublishError::DirtyWorktree(lines));
    }
    let output_dir = repo_dir.join(&opts.output_dir);
    if !output_dir.is_dir() {
        return Err(PublishError::MissingOutput(output_dir));
    }
    let original = git.current_branch()?;
    if original == "HEAD" {
        return Err(PublishError::DetachedHead);
    }

    // The branch switch rewrites the worktree, so the site is copied
    // aside first.
    let staging = tempfile::tempdir()?;
    copy_dir(&output_dir, staging.path())?;

    if git.branch_exists(&opts.branch)? {
        git.switch(&opts.branch)?;
    } else {
        log::info!("bootstrapping publish branch {}", opts.branch);
        git.switch_orphan(&opts.branch)?;
    }

    let body = replace_and_push(&git, staging.path(), opts);
    match git.switch(&original) {
        Ok(()) => body,
        Err(restore_err) => {
            if let Err(body_err) = &body {
                log::error!("publish failed before restore: {body_err}");
            }
            Err(PublishError::RestoreFailed {
                branch: original,
                source: Box::new(restore_err),
            })
        }
    }
}

fn replace_and_push(
    git: &GitClient,
    staging: &Path,
    opts: &PublishOptions,
) -> Result<(), PublishError> {
    git.remove_tracked()?;
    clear_worktree(git.repo_dir())?;
    copy_dir(staging, git.repo_dir())?;
    git.stage_all()?;
    if git.has_staged_changes()? {
        git.commit(&opts.message)?;
    } else {
        log::info!("rendered site unchanged since last publish");
    }
    git.push_force(&opts.remote, &opts.branch)?;
    Ok(())
}

/// Remove every top-level entry of the worktree except `.git`.
///
/// The publish branch holds nothing but the rendered site, so leftover
/// untracked entries (the output dir itself, editor droppings) must
/// not leak into the publish commit.
fn clear_worktree(repo_dir: &Path) -> Result<(), PublishError> {
    for entry in std::fs::read_dir(repo_dir)? {
        let entry = entry?;
        if entry.file_name() == ".git" {
            continue;
        }
        if entry.file_type()?.is_dir() {
            std::fs::remove_dir_all(entry.path())?;
        } else {
            std::fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> Result<(), PublishError> {
    std::fs::create_dir_all(to)?;
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
