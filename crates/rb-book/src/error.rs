use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Source directory not found: {}", .0.display())]
    MissingSourceDir(PathBuf),
    #[error("Failed to launch renderer `{program}`: {source}")]
    RendererSpawn {
        program: String,
        source: std::io::Error,
    },
    #[error("Renderer `{program}` failed on {} ({status}): {stderr}", .input.display())]
    RendererFailed {
        program: String,
        input: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}
