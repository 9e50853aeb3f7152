//! GitClient tests against throwaway repositories.

use std::fs;
use std::path::Path;
use std::process::Command;

use rb_publish::{GitClient, contributors, names};

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .expect("git not available");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_repo(dir: &Path) {
    git(dir, &["init", "-q", "-b", "main"]);
    git(dir, &["config", "user.name", "Test Author"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    fs::write(dir.join(name), content).unwrap();
    git(dir, &["add", name]);
    git(dir, &["commit", "-q", "-m", message]);
}

#[test]
fn test_status_reflects_worktree_state() {
    let tmp = tempfile::tempdir().unwrap();
    init_repo(tmp.path());
    commit_file(tmp.path(), "README.adoc", "= Book\n", "init");

    let client = GitClient::new(tmp.path());
    assert!(client.status().unwrap().is_clean());

    fs::write(tmp.path().join("README.adoc"), "= Book, edited\n").unwrap();
    assert!(!client.status().unwrap().is_clean());
}

#[test]
fn test_ignored_files_do_not_count_as_dirt() {
    let tmp = tempfile::tempdir().unwrap();
    init_repo(tmp.path());
    commit_file(tmp.path(), ".gitignore", "target/\n", "ignore build output");

    fs::create_dir_all(tmp.path().join("target/tutorial")).unwrap();
    fs::write(tmp.path().join("target/tutorial/index.html"), "x").unwrap();

    let client = GitClient::new(tmp.path());
    assert!(client.status().unwrap().is_clean());
}

#[test]
fn test_current_branch_and_branch_exists() {
    let tmp = tempfile::tempdir().unwrap();
    init_repo(tmp.path());
    commit_file(tmp.path(), "README.adoc", "= Book\n", "init");

    let client = GitClient::new(tmp.path());
    assert_eq!(client.current_branch().unwrap(), "main");
    assert!(client.branch_exists("main").unwrap());
    assert!(!client.branch_exists("gh-pages").unwrap());
}

#[test]
fn test_staged_change_detection() {
    let tmp = tempfile::tempdir().unwrap();
    init_repo(tmp.path());
    commit_file(tmp.path(), "README.adoc", "= Book\n", "init");

    let client = GitClient::new(tmp.path());
    assert!(!client.has_staged_changes().unwrap());

    fs::write(tmp.path().join("extra.adoc"), "= Extra\n").unwrap();
    client.stage_all().unwrap();
    assert!(client.has_staged_changes().unwrap());

    client.commit("add extra chapter").unwrap();
    assert!(!client.has_staged_changes().unwrap());
}

#[test]
fn test_contributors_come_from_author_records() {
    let tmp = tempfile::tempdir().unwrap();
    init_repo(tmp.path());
    commit_file(tmp.path(), "a.adoc", "= A\n", "first");

    fs::write(tmp.path().join("b.adoc"), "= B\n").unwrap();
    git(tmp.path(), &["add", "b.adoc"]);
    git(
        tmp.path(),
        &[
            "commit",
            "-q",
            "-m",
            "second",
            "--author",
            "Alice Writer <alice@example.org>",
        ],
    );

    let client = GitClient::new(tmp.path());
    let list = contributors(&client).unwrap();
    assert_eq!(names(&list), vec!["Alice Writer", "Test Author"]);
}

#[test]
fn test_failed_command_carries_stderr() {
    let tmp = tempfile::tempdir().unwrap();
    // Not a repository: any real command fails with context attached.
    let client = GitClient::new(tmp.path());
    let err = client.run(&["log", "-1"]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("git log -1 failed"), "got: {message}");
}
