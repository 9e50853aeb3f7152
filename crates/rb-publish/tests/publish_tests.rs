//! End-to-end publish tests against throwaway repositories and a bare
//! remote.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serial_test::serial;

use rb_publish::{PublishError, PublishOptions, publish};

fn git(dir: &Path, args: &[&str]) -> String {
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
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Book-shaped repository: committed prose, ignored build output, and
/// a rendered site under target/tutorial.
fn setup_book_repo(dir: &Path) {
    git(dir, &["init", "-q", "-b", "main"]);
    git(dir, &["config", "user.name", "Test Author"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);

    fs::write(dir.join(".gitignore"), "target/\n").unwrap();
    fs::create_dir_all(dir.join("doc")).unwrap();
    fs::write(dir.join("doc/index.adoc"), "= The Book\n").unwrap();
    git(dir, &["add", "-A"]);
    git(dir, &["commit", "-q", "-m", "book sources"]);

    fs::create_dir_all(dir.join("target/tutorial")).unwrap();
    fs::write(
        dir.join("target/tutorial/index.html"),
        "<html>rendered</html>",
    )
    .unwrap();
    fs::write(dir.join("target/tutorial/part-1.rs"), "fn main() {}\n").unwrap();
}

fn setup_remote(repo: &Path) -> PathBuf {
    let remote = repo.parent().unwrap().join("remote.git");
    fs::create_dir_all(&remote).unwrap();
    git(&remote, &["init", "-q", "--bare"]);
    git(repo, &["remote", "add", "origin", remote.to_str().unwrap()]);
    remote
}

fn options() -> PublishOptions {
    PublishOptions {
        branch: "gh-pages".to_string(),
        remote: "origin".to_string(),
        output_dir: PathBuf::from("target/tutorial"),
        message: "Update the rendered tutorial".to_string(),
    }
}

#[test]
#[serial]
fn test_publish_happy_path() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = tmp.path().join("book");
    fs::create_dir_all(&repo).unwrap();
    setup_book_repo(&repo);
    let remote = setup_remote(&repo);

    publish(&repo, &options()).unwrap();

    // Back on the branch we started from, with sources intact.
    let branch = git(&repo, &["rev-parse", "--abbrev-ref", "HEAD"]);
    assert_eq!(branch.trim(), "main");
    assert!(repo.join("doc/index.adoc").is_file());

    // The remote publish branch carries the site at its root.
    let index = git(&remote, &["show", "gh-pages:index.html"]);
    assert_eq!(index, "<html>rendered</html>");
    let listing = git(&remote, &["show", "gh-pages:part-1.rs"]);
    assert_eq!(listing, "fn main() {}\n");

    // The book sources are not part of the published tree.
    let tree = git(&remote, &["ls-tree", "--name-only", "gh-pages"]);
    assert!(!tree.contains("doc"));
    assert!(!tree.contains(".gitignore"));
}

#[test]
#[serial]
fn test_republishing_identical_output_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = tmp.path().join("book");
    fs::create_dir_all(&repo).unwrap();
    setup_book_repo(&repo);
    setup_remote(&repo);

    publish(&repo, &options()).unwrap();

    // The publish consumed the untracked output dir; regenerate it.
    fs::create_dir_all(repo.join("target/tutorial")).unwrap();
    fs::write(
        repo.join("target/tutorial/index.html"),
        "<html>rendered</html>",
    )
    .unwrap();
    fs::write(repo.join("target/tutorial/part-1.rs"), "fn main() {}\n").unwrap();

    publish(&repo, &options()).unwrap();
    let branch = git(&repo, &["rev-parse", "--abbrev-ref", "HEAD"]);
    assert_eq!(branch.trim(), "main");
}

#[test]
#[serial]
fn test_publish_refuses_dirty_worktree() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = tmp.path().join("book");
    fs::create_dir_all(&repo).unwrap();
    setup_book_repo(&repo);
    setup_remote(&repo);

    fs::write(repo.join("doc/index.adoc"), "= The Book, edited\n").unwrap();

    let err = publish(&repo, &options()).unwrap_err();
    assert!(matches!(err, PublishError::DirtyWorktree(_)));

    // Nothing happened: still on main, no publish branch anywhere.
    let branch = git(&repo, &["rev-parse", "--abbrev-ref", "HEAD"]);
    assert_eq!(branch.trim(), "main");
}

#[test]
#[serial]
fn test_publish_requires_rendered_output() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = tmp.path().join("book");
    fs::create_dir_all(&repo).unwrap();
    setup_book_repo(&repo);
    setup_remote(&repo);
    fs::remove_dir_all(repo.join("target")).unwrap();

    let err = publish(&repo, &options()).unwrap_err();
    assert!(matches!(err, PublishError::MissingOutput(_)));
}

#[test]
#[serial]
fn test_failed_push_still_restores_the_branch() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = tmp.path().join("book");
    fs::create_dir_all(&repo).unwrap();
    setup_book_repo(&repo);
    // No remote configured: the push step must fail.

    let err = publish(&repo, &options()).unwrap_err();
    assert!(matches!(err, PublishError::GitCommand { .. }), "got {err:?}");

    let branch = git(&repo, &["rev-parse", "--abbrev-ref", "HEAD"]);
    assert_eq!(branch.trim(), "main");
    assert!(repo.join("doc/index.adoc").is_file());
}
