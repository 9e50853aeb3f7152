//! Book build configuration.
//!
//! All paths are stored relative to the book root and resolved on
//! access. A `book.json` at the root overrides the defaults; a missing
//! file is not an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BookError;

/// Name of the optional per-book configuration file.
pub const CONFIG_FILE: &str = "book.json";

/// Paths and knobs controlling a book build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Root of the book repository. Not persisted; set by the loader.
    #[serde(skip)]
    pub book_dir: PathBuf,
    /// Directory holding the chapter prose (`*.adoc`).
    pub prose_dir: PathBuf,
    /// Directory holding the listing templates rendered to `*.rs`.
    pub template_dir: PathBuf,
    /// Directory the renderer writes into.
    pub output_dir: PathBuf,
    /// Reference source tree the listings are checked against.
    pub reference_dir: PathBuf,
    /// External document compiler program.
    pub renderer: String,
    /// Branch the rendered site is published to.
    pub publish_branch: String,
    /// Remote the publish branch is pushed to.
    pub remote: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            book_dir: PathBuf::from("."),
            prose_dir: PathBuf::from("doc"),
            template_dir: PathBuf::from("doc/output-templates"),
            output_dir: PathBuf::from("target/tutorial"),
            reference_dir: PathBuf::from("src/bin"),
            renderer: "asciidoctor".to_string(),
            publish_branch: "gh-pages".to_string(),
            remote: "origin".to_string(),
        }
    }
}

impl BookConfig {
    /// Load the configuration for the book rooted at `book_dir`.
    ///
    /// Reads `book.json` when present, otherwise falls back to the
    /// defaults. A malformed config file is an error; the caller should
    /// not silently build with the wrong paths.
    pub fn load_or_default(book_dir: &Path) -> Result<Self, BookError> {
        let config_path = book_dir.join(CONFIG_FILE);
        let mut config = if config_path.is_file() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };
        config.book_dir = book_dir.to_path_buf();
        Ok(config)
    }

    pub fn prose_path(&self) -> PathBuf {
        self.book_dir.join(&self.prose_dir)
    }

    pub fn template_path(&self) -> PathBuf {
        self.book_dir.join(&self.template_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.book_dir.join(&self.output_dir)
    }

    pub fn reference_path(&self) -> PathBuf {
        self.book_dir.join(&self.reference_dir)
    }

    /// The page `preview` opens.
    pub fn index_page(&self) -> PathBuf {
        self.output_path().join("index.html")
    }
}
