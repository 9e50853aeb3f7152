//! Tree comparison between the generated listings and the reference
//! source tree.

use std::path::{Path, PathBuf};

use crate::diff::{diff_lines, has_changes, unified};
use crate::error::CompareError;
use crate::report::{DriftReport, FileStatus};

/// Context radius used in rendered unified diffs.
const CONTEXT_LINES: usize = 3;

/// Compare every generated `*.rs` listing against the same-named file
/// in `reference_dir`.
///
/// Reference files with no generated counterpart are ignored; chapters
/// still being written have a reference program before the book covers
/// them. A generated listing without a reference counterpart is drift.
pub fn compare_trees(
    generated_dir: &Path,
    reference_dir: &Path,
    label: impl Into<String>,
) -> Result<DriftReport, CompareError> {
    if !generated_dir.is_dir() {
        return Err(CompareError::MissingGeneratedDir(
            generated_dir.to_path_buf(),
        ));
    }

    let mut listings: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(generated_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
            listings.push(path);
        }
    }
    listings.sort();

    let mut report = DriftReport::new(label);
    for path in &listings {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let reference_path = reference_dir.join(&name);
        if !reference_path.is_file() {
            log::warn!("no reference counterpart for {name}");
            report.add_file(name, FileStatus::MissingReference, None);
            continue;
        }

        let generated = read_text(path)?;
        let reference = read_text(&reference_path)?;
        if generated == reference {
            report.add_file(name, FileStatus::Match, None);
            continue;
        }

        let script = diff_lines(&reference, &generated);
        let diff_text = if has_changes(&script) {
            unified(
                &reference,
                &generated,
                &reference_path.display().to_string(),
                &path.display().to_string(),
                CONTEXT_LINES,
            )
        } else {
            // Same lines, different bytes: only the end-of-file newline
            // can be responsible.
            format!(
                "--- {}\n+++ {}\nonly the end-of-file newline differs\n",
                reference_path.display(),
                path.display()
            )
        };
        report.add_file(name, FileStatus::Drift, Some(diff_text));
    }
    Ok(report)
}

fn read_text(path: &Path) -> Result<String, CompareError> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| CompareError::NotText(path.to_path_buf()))
}
