//! Listing normalization.
//!
//! The renderer copies numbered callout markers (`// <1>`) into the
//! generated Rust listings. The reference source tree does not carry
//! them, so they are stripped before comparison, and every listing is
//! rewritten to end with exactly one trailing newline.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::BookError;

/// End-of-line callout comment, e.g. `// <3>`, with surrounding
/// horizontal whitespace.
fn callout_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)[ \t]*//[ \t]*<\d+>[ \t]*$").unwrap())
}

/// Strip every end-of-line numbered callout comment from `text`.
///
/// A `// <N>` followed by further code on the same line is not a
/// callout and is preserved. Stacked callouts (`x // <2> // <1>`) are
/// stripped until none remain at the line end.
pub fn strip_callouts(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = callout_re().replace_all(&current, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Rewrite `text` to end with exactly one trailing newline.
///
/// An empty listing stays empty.
pub fn ensure_trailing_newline(mut text: String) -> String {
    if text.is_empty() {
        return text;
    }
    while text.ends_with('\n') {
        text.pop();
    }
    if text.is_empty() {
        // The listing was nothing but newlines.
        text.push('\n');
        return text;
    }
    text.push('\n');
    text
}

/// Full normalization pass applied to a generated listing.
pub fn normalize_listing(text: &str) -> String {
    ensure_trailing_newline(strip_callouts(text))
}

/// Normalize a listing file in place.
///
/// Returns whether the file contents changed.
pub fn normalize_file(path: &Path) -> Result<bool, BookError> {
    let original = std::fs::read_to_string(path)?;
    let normalized = normalize_listing(&original);
    if normalized == original {
        return Ok(false);
    }
    std::fs::write(path, &normalized)?;
    Ok(true)
}
