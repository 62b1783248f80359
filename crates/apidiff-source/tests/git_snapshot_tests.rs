//! Git and working-tree snapshots against a real repository.
//!
//! Every test builds a throwaway repository with the `git` binary and is
//! skipped when git is not installed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::Command;

use apidiff_core::errors::ExErrorKind;
use apidiff_source::{list_changed_files, ChangeKind, GitRevision, Snapshot, WorkingTree};
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git should run");
    assert!(
        status.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&status.stderr)
    );
}

fn write(dir: &Path, path: &str, contents: &str) {
    let full = dir.join(path);
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(full, contents).unwrap();
}

/// Repository with one commit containing `pkg/api` and a root package
fn setup_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    git(root, &["init", "-q"]);
    git(root, &["config", "user.email", "dev@example.com"]);
    git(root, &["config", "user.name", "Dev"]);
    git(root, &["config", "commit.gpgsign", "false"]);

    write(root, "main.go", "package main\n\nfunc main() {}\n");
    write(root, "pkg/api/client.go", "package api\n\nfunc Dial(addr string) error { return nil }\n");
    write(root, "pkg/api/server.go", "package api\n\ntype Server struct{}\n");
    write(root, "pkg/api/client_test.go", "package api\n");
    write(root, "pkg/api/doc.md", "docs\n");

    git(root, &["add", "."]);
    git(root, &["commit", "-q", "-m", "initial"]);
    dir
}

// S1: ls-tree listing keeps sorted non-test Go files
#[test]
fn test_git_revision_lists_package_files() {
    if !git_available() {
        return;
    }
    let repo = setup_repo();
    let head = GitRevision::new(repo.path(), "HEAD");

    let files = head.list_source_files("pkg/api").unwrap();
    assert_eq!(files, vec!["pkg/api/client.go", "pkg/api/server.go"]);

    let root = head.list_source_files("./").unwrap();
    assert_eq!(root, vec!["main.go"]);
    assert_eq!(head.label(), "HEAD");
}

// S2: a directory absent at the revision is NotFound
#[test]
fn test_git_revision_missing_dir_is_not_found() {
    if !git_available() {
        return;
    }
    let repo = setup_repo();
    let err = GitRevision::new(repo.path(), "HEAD")
        .list_source_files("pkg/none")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

// S3: file content comes from the revision, not the working tree
#[test]
fn test_git_revision_reads_committed_blob() {
    if !git_available() {
        return;
    }
    let repo = setup_repo();
    write(repo.path(), "pkg/api/client.go", "package api\n// edited\n");

    let base = GitRevision::new(repo.path(), "HEAD");
    let committed = base.read_file("pkg/api/client.go").unwrap();
    assert!(String::from_utf8(committed).unwrap().contains("func Dial"));

    let tree = WorkingTree::new(repo.path());
    let edited = tree.read_file("pkg/api/client.go").unwrap();
    assert!(String::from_utf8(edited).unwrap().contains("// edited"));
}

// S4: an unknown revision is a fatal retrieval error with git's stderr
#[test]
fn test_unknown_revision_is_retrieval_error() {
    if !git_available() {
        return;
    }
    let repo = setup_repo();
    let err = GitRevision::new(repo.path(), "no-such-branch")
        .list_source_files("pkg/api")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Retrieval);
    assert!(err.is_fatal());
    assert!(!err.message().is_empty());
}

// S5: changed files include modifications and deletions
#[test]
fn test_list_changed_files() {
    if !git_available() {
        return;
    }
    let repo = setup_repo();
    write(repo.path(), "pkg/api/client.go", "package api\n");
    std::fs::remove_file(repo.path().join("pkg/api/server.go")).unwrap();

    let mut changes = list_changed_files(repo.path(), "HEAD").unwrap();
    changes.sort_by(|a, b| a.path.cmp(&b.path));

    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].path, "pkg/api/client.go");
    assert_eq!(changes[0].kind, ChangeKind::Modified);
    assert_eq!(changes[1].path, "pkg/api/server.go");
    assert_eq!(changes[1].kind, ChangeKind::Deleted);
}

// S6: no changes means an empty list
#[test]
fn test_clean_tree_has_no_changes() {
    if !git_available() {
        return;
    }
    let repo = setup_repo();
    assert!(list_changed_files(repo.path(), "HEAD").unwrap().is_empty());
}
