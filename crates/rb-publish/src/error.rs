use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to launch git: {0}")]
    GitSpawn(std::io::Error),
    #[error("git {args} failed ({status}): {stderr}")]
    GitCommand {
        args: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("working tree has uncommitted changes; commit or stash before publishing:\n{}", .0.join("\n"))]
    DirtyWorktree(Vec<String>),
    #[error("rendered output not found at {} (run `roguebook docs` first)", .0.display())]
    MissingOutput(PathBuf),
    #[error("cannot publish from a detached HEAD")]
    DetachedHead,
    #[error("publish could not switch back to `{branch}`: {source}")]
    RestoreFailed {
        branch: String,
        source: Box<PublishError>,
    },
}
