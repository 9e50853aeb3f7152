//! Line-level diffing and unified diff rendering.
//!
//! The edit script is computed over whole lines with a longest common
//! subsequence table; tutorial listings are small enough that the
//! quadratic table is never a concern.

use serde::{Deserialize, Serialize};

/// One entry in a line-level edit script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffLine {
    /// Present in both sides.
    Context(String),
    /// Present only in the old side.
    Removed(String),
    /// Present only in the new side.
    Added(String),
}

/// Compute the edit script turning `old` into `new`, line by line.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    let a: Vec<&str> = old.lines().collect();
    let b: Vec<&str> = new.lines().collect();

    // lcs[i][j] = length of the LCS of a[i..] and b[j..]
    let mut lcs = vec![vec![0u32; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut script = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            script.push(DiffLine::Context(a[i].to_string()));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            script.push(DiffLine::Removed(a[i].to_string()));
            i += 1;
        } else {
            script.push(DiffLine::Added(b[j].to_string()));
            j += 1;
        }
    }
    while i < a.len() {
        script.push(DiffLine::Removed(a[i].to_string()));
        i += 1;
    }
    while j < b.len() {
        script.push(DiffLine::Added(b[j].to_string()));
        j += 1;
    }
    script
}

/// True if the script contains anything besides context lines.
pub fn has_changes(script: &[DiffLine]) -> bool {
    script
        .iter()
        .any(|entry| !matches!(entry, DiffLine::Context(_)))
}

/// Reassemble the old side of an edit script (context + removed lines).
pub fn old_side(script: &[DiffLine]) -> String {
    script
        .iter()
        .filter_map(|entry| match entry {
            DiffLine::Context(line) | DiffLine::Removed(line) => Some(line.as_str()),
            DiffLine::Added(_) => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reassemble the new side of an edit script (context + added lines).
pub fn new_side(script: &[DiffLine]) -> String {
    script
        .iter()
        .filter_map(|entry| match entry {
            DiffLine::Context(line) | DiffLine::Added(line) => Some(line.as_str()),
            DiffLine::Removed(_) => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a unified diff of `old` vs `new`.
///
/// Returns an empty string when the sides have identical lines.
pub fn unified(old: &str, new: &str, old_label: &str, new_label: &str, context: usize) -> String {
    render_unified(&diff_lines(old, new), old_label, new_label, context)
}

fn render_unified(
    script: &[DiffLine],
    old_label: &str,
    new_label: &str,
    context: usize,
) -> String {
    use std::fmt::Write;

    // Line numbers (0-based) on each side before consuming each entry.
    let mut old_pos = Vec::with_capacity(script.len());
    let mut new_pos = Vec::with_capacity(script.len());
    let (mut o, mut n) = (0usize, 0usize);
    for entry in script {
        old_pos.push(o);
        new_pos.push(n);
        match entry {
            DiffLine::Context(_) => {
                o += 1;
                n += 1;
            }
            DiffLine::Removed(_) => o += 1,
            DiffLine::Added(_) => n += 1,
        }
    }

    let changed: Vec<usize> = script
        .iter()
        .enumerate()
        .filter(|(_, entry)| !matches!(entry, DiffLine::Context(_)))
        .map(|(idx, _)| idx)
        .collect();
    if changed.is_empty() {
        return String::new();
    }

    // Merge per-change context windows into hunks.
    let mut hunks: Vec<(usize, usize)> = Vec::new();
    for &idx in &changed {
        let start = idx.saturating_sub(context);
        let end = (idx + context).min(script.len() - 1);
        match hunks.last_mut() {
            Some((_, last_end)) if start <= *last_end + 1 => {
                *last_end = (*last_end).max(end);
            }
            _ => hunks.push((start, end)),
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "--- {old_label}");
    let _ = writeln!(out, "+++ {new_label}");
    for (start, end) in hunks {
        let (mut old_len, mut new_len) = (0usize, 0usize);
        for entry in &script[start..=end] {
            match entry {
                DiffLine::Context(_) => {
                    old_len += 1;
                    new_len += 1;
                }
                DiffLine::Removed(_) => old_len += 1,
                DiffLine::Added(_) => new_len += 1,
            }
        }
        // Unified hunk headers are 1-based; an empty side anchors to the
        // line before the hunk.
        let old_start = if old_len == 0 {
            old_pos[start]
        } else {
            old_pos[start] + 1
        };
        let new_start = if new_len == 0 {
            new_pos[start]
        } else {
            new_pos[start] + 1
        };
        let _ = writeln!(out, "@@ -{old_start},{old_len} +{new_start},{new_len} @@");
        for entry in &script[start..=end] {
            let (marker, line) = match entry {
                DiffLine::Context(line) => (' ', line),
                DiffLine::Removed(line) => ('-', line),
                DiffLine::Added(line) => ('+', line),
            };
            let _ = writeln!(out, "{marker}{line}");
        }
    }
    out
}
