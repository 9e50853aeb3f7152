//! rb-publish: publishing the rendered book and mining git history.
//!
//! Wraps the `git` binary for three jobs: the clean-worktree guard,
//! the gh-pages publish sequence (with branch restore on failure), and
//! contributor listings for the book's credits page.

pub mod contributors;
pub mod git;
pub mod publish;

mod error;

pub use contributors::{Contributor, contributors, markdown_links, names};
pub use error::PublishError;
pub use git::{GitClient, WorktreeStatus};
pub use publish::{PublishOptions, publish};
