//! rb-compare: drift detection for the tutorial's generated listings.
//!
//! Provides a line-level diff engine, unified diff rendering, and
//! tree comparison with aggregate drift reporting.

pub mod diff;
pub mod report;

mod compare;
mod error;

pub use compare::compare_trees;
pub use diff::{DiffLine, diff_lines, has_changes, unified};
pub use error::CompareError;
pub use report::{DriftReport, FileDrift, FileStatus};
