//! Contributor listings mined from git history.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::PublishError;
use crate::git::GitClient;

/// One book contributor, keyed by display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    pub name: String,
    pub email: String,
}

fn author_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*\S)\s+<([^>]*)>$").unwrap())
}

/// Parse `git log --format='%aN <%aE>'` output into a deduplicated,
/// name-sorted contributor list.
///
/// Dedup is by exact display name; the first email seen for a name
/// wins (the log is newest-first, so that is the author's most recent
/// address).
pub fn parse_author_log(log: &str) -> Vec<Contributor> {
    let mut by_name: BTreeMap<String, String> = BTreeMap::new();
    for line in log.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = author_re().captures(line) {
            by_name
                .entry(caps[1].to_string())
                .or_insert_with(|| caps[2].to_string());
        } else {
            log::debug!("skipping unparseable author record: {line}");
        }
    }
    by_name
        .into_iter()
        .map(|(name, email)| Contributor { name, email })
        .collect()
}

/// All contributors of the repository, sorted by name.
pub fn contributors(git: &GitClient) -> Result<Vec<Contributor>, PublishError> {
    Ok(parse_author_log(&git.author_log()?))
}

/// Display names, one per contributor. (Original `list-contributor-names`.)
pub fn names(contributors: &[Contributor]) -> Vec<String> {
    contributors.iter().map(|c| c.name.clone()).collect()
}

/// Markdown bullet list of contributor links.
/// (Original `list-contributor-links`.)
pub fn markdown_links(contributors: &[Contributor]) -> Vec<String> {
    contributors
        .iter()
        .map(|c| format!("- [{}](mailto:{})", c.name, c.email))
        .collect()
}
