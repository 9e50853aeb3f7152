//! Render orchestration.
//!
//! The book delegates markup processing to an external document
//! compiler (`asciidoctor` by default). This module drives it over the
//! prose and listing-template sources, then runs the normalization
//! pass over every generated listing.

use std::path::Path;
use std::process::Command;

use serde::Serialize;

use crate::config::BookConfig;
use crate::error::BookError;
use crate::listing::normalize_file;
use crate::sources::{discover_listings, discover_sources};

/// Wrapper around the external document compiler.
pub struct Renderer {
    program: String,
}

impl Renderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Render a single source file into `out_dir`.
    ///
    /// The renderer decides the output name; `-D` only sets the
    /// destination directory, which must already exist.
    pub fn render_file(&self, input: &Path, out_dir: &Path) -> Result<(), BookError> {
        let output = Command::new(&self.program)
            .arg("-D")
            .arg(out_dir)
            .arg(input)
            .output()
            .map_err(|source| BookError::RendererSpawn {
                program: self.program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(BookError::RendererFailed {
                program: self.program.clone(),
                input: input.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Accounting for one `docs` run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RenderSummary {
    /// Prose chapters handed to the renderer.
    pub prose_rendered: usize,
    /// Listing templates handed to the renderer.
    pub listings_rendered: usize,
    /// Generated listings run through normalization.
    pub listings_normalized: usize,
    /// Listings whose contents the normalization pass changed.
    pub listings_changed: usize,
}

/// Render the whole book and normalize the generated listings.
///
/// The output directory is created if absent. Prose sources are
/// required; a book without listing templates renders prose only.
pub fn render(config: &BookConfig) -> Result<RenderSummary, BookError> {
    let out_dir = config.output_path();
    std::fs::create_dir_all(&out_dir)?;

    let renderer = Renderer::new(&config.renderer);
    let mut summary = RenderSummary::default();

    for source in discover_sources(&config.prose_path())? {
        log::info!("rendering {}", source.display());
        renderer.render_file(&source, &out_dir)?;
        summary.prose_rendered += 1;
    }

    let template_dir = config.template_path();
    if template_dir.is_dir() {
        for source in discover_sources(&template_dir)? {
            log::info!("rendering listing template {}", source.display());
            renderer.render_file(&source, &out_dir)?;
            summary.listings_rendered += 1;
        }
    } else {
        log::warn!(
            "no listing templates at {}, skipping",
            template_dir.display()
        );
    }

    let (normalized, changed) = normalize_dir(&out_dir)?;
    summary.listings_normalized = normalized;
    summary.listings_changed = changed;
    Ok(summary)
}

/// Normalize every `*.rs` listing in `dir`.
///
/// Returns `(processed, changed)` counts.
pub fn normalize_dir(dir: &Path) -> Result<(usize, usize), BookError> {
    let mut processed = 0;
    let mut changed = 0;
    for listing in discover_listings(dir)? {
        processed += 1;
        if normalize_file(&listing)? {
            log::debug!("normalized {}", listing.display());
            changed += 1;
        }
    }
    Ok((processed, changed))
}

/// Remove the rendered output directory.
///
/// Succeeds when the directory is already absent.
pub fn clean(config: &BookConfig) -> Result<(), BookError> {
    match std::fs::remove_dir_all(config.output_path()) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
