//! Drift reporting — aggregates per-file comparisons into
//! human-readable and machine-readable reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of comparing one generated listing against its reference.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FileStatus {
    /// Listing and reference are byte-identical.
    Match,
    /// Listing and reference differ.
    Drift,
    /// The listing has no reference counterpart.
    MissingReference,
}

/// Comparison result for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDrift {
    /// File name shared by the listing and its reference counterpart.
    pub name: String,
    pub status: FileStatus,
    /// Rendered unified diff for `Drift` entries.
    pub diff: Option<String>,
}

/// Summary of one comparison run over the generated listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    /// Descriptive label (e.g. "target/tutorial vs src/bin").
    pub label: String,
    pub generated_at: DateTime<Utc>,
    pub files_checked: u64,
    pub matching: u64,
    pub drifted: u64,
    pub missing_reference: u64,
    /// Entries for the files that did not match.
    pub entries: Vec<FileDrift>,
}

impl DriftReport {
    /// Create a new empty report.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            generated_at: Utc::now(),
            files_checked: 0,
            matching: 0,
            drifted: 0,
            missing_reference: 0,
            entries: Vec::new(),
        }
    }

    /// Record the comparison outcome for one file.
    pub fn add_file(&mut self, name: impl Into<String>, status: FileStatus, diff: Option<String>) {
        self.files_checked += 1;
        match status {
            FileStatus::Match => {
                self.matching += 1;
                return;
            }
            FileStatus::Drift => self.drifted += 1,
            FileStatus::MissingReference => self.missing_reference += 1,
        }
        self.entries.push(FileDrift {
            name: name.into(),
            status,
            diff,
        });
    }

    /// True if every listing matched its reference.
    pub fn passed(&self) -> bool {
        self.drifted == 0 && self.missing_reference == 0
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n============================================================");
        println!("Drift Report: {}", self.label);
        println!(
            "Result: {}",
            if self.passed() { "PASS" } else { "FAIL" }
        );
        println!(
            "Files: {} checked, {} matching, {} drifted, {} missing reference",
            self.files_checked, self.matching, self.drifted, self.missing_reference
        );

        let show = self.entries.len().min(10);
        if show > 0 {
            println!("\nFirst {} files with drift:", show);
            for entry in &self.entries[..show] {
                println!("  {} [{}]", entry.name, entry.status);
            }
            if self.entries.len() > show {
                println!("  ... and {} more", self.entries.len() - show);
            }
        }

        println!("============================================================\n");
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}
