use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Generated listings not found at {} (run `roguebook docs` first)", .0.display())]
    MissingGeneratedDir(PathBuf),
    #[error("Listing {} is not valid UTF-8", .0.display())]
    NotText(PathBuf),
}
