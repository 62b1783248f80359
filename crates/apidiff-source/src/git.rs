//! Git revision access using the `git` CLI.
//!
//! Every call shells out once and fails fast: a non-zero exit is a
//! `Retrieval` error carrying git's stderr. Nothing is retried.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::{self, Result};
use crate::snapshot::{is_api_source, Snapshot};

/// How a file differs between a revision and the working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Copied,
    Deleted,
    Modified,
    Renamed,
    TypeChanged,
    Unmerged,
    Unknown,
    Broken,
}

impl ChangeKind {
    /// Parse a `--name-status` status field such as `M` or `R087`.
    pub fn from_status(status: &str) -> Option<Self> {
        let mut chars = status.chars();
        let kind = match chars.next()? {
            'A' => ChangeKind::Added,
            'C' => ChangeKind::Copied,
            'D' => ChangeKind::Deleted,
            'M' => ChangeKind::Modified,
            'R' => ChangeKind::Renamed,
            'T' => ChangeKind::TypeChanged,
            'U' => ChangeKind::Unmerged,
            'X' => ChangeKind::Unknown,
            'B' => ChangeKind::Broken,
            _ => return None,
        };
        // Only a similarity score may follow the letter
        if chars.all(|c| c.is_ascii_digit()) {
            Some(kind)
        } else {
            None
        }
    }

    fn has_two_paths(&self) -> bool {
        matches!(self, ChangeKind::Renamed | ChangeKind::Copied)
    }
}

/// One line of `git diff --name-status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub kind: ChangeKind,
    /// Path in the working tree
    pub path: String,
    /// Path at the revision; differs from `path` only for renames and copies
    pub old_path: String,
}

/// Files that differ between `rev` and the working tree under `repo_root`.
///
/// # Errors
///
/// Returns `Retrieval` if git fails or prints a line that is not a valid
/// name-status record.
pub fn list_changed_files(repo_root: &Path, rev: &str) -> Result<Vec<FileChange>> {
    let op = "git diff --name-status";
    let stdout = run_git(repo_root, op, &["diff", "--name-status", "--relative", rev])?;
    parse_name_status(op, &String::from_utf8_lossy(&stdout))
}

/// Parse `--name-status` output
///
/// # Errors
///
/// Returns `Retrieval` for a malformed line or an unknown status letter.
pub fn parse_name_status(op: &str, output: &str) -> Result<Vec<FileChange>> {
    let mut changes = Vec::new();
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let mut fields = line.split('\t');
        let status = fields.next().unwrap_or_default();
        let kind = ChangeKind::from_status(status).ok_or_else(|| errors::git_output(op, line))?;
        let first = fields.next().ok_or_else(|| errors::git_output(op, line))?;

        let change = if kind.has_two_paths() {
            let second = fields.next().ok_or_else(|| errors::git_output(op, line))?;
            FileChange {
                kind,
                path: second.to_string(),
                old_path: first.to_string(),
            }
        } else {
            FileChange {
                kind,
                path: first.to_string(),
                old_path: first.to_string(),
            }
        };
        if fields.next().is_some() {
            return Err(errors::git_output(op, line));
        }
        changes.push(change);
    }
    Ok(changes)
}

/// Blob paths from `git ls-tree` output that are API source files, sorted
pub fn parse_ls_tree(output: &str) -> Vec<String> {
    let mut files: Vec<String> = output
        .lines()
        .filter_map(|line| {
            let (meta, path) = line.split_once('\t')?;
            let object_type = meta.split_whitespace().nth(1)?;
            (object_type == "blob").then_some(path)
        })
        .filter(|path| {
            let name = path.rsplit('/').next().unwrap_or(path);
            is_api_source(name)
        })
        .map(str::to_string)
        .collect();
    files.sort();
    files
}

/// A repository as it was at a given revision
#[derive(Debug, Clone)]
pub struct GitRevision {
    repo_root: PathBuf,
    rev: String,
}

impl GitRevision {
    pub fn new(repo_root: impl Into<PathBuf>, rev: impl Into<String>) -> Self {
        Self {
            repo_root: repo_root.into(),
            rev: rev.into(),
        }
    }
}

impl Snapshot for GitRevision {
    fn list_source_files(&self, dir: &str) -> Result<Vec<String>> {
        let spec = match dir.trim_end_matches('/') {
            "" | "." => "./".to_string(),
            dir => format!("{}/", dir),
        };
        let stdout = run_git(&self.repo_root, "git ls-tree", &["ls-tree", &self.rev, &spec])?;
        let output = String::from_utf8_lossy(&stdout);
        if output.trim().is_empty() {
            return Err(errors::not_found(dir, &self.rev));
        }
        Ok(parse_ls_tree(&output))
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let object = format!("{}:./{}", self.rev, path);
        run_git(
            &self.repo_root,
            "git cat-file",
            &["cat-file", "blob", &object],
        )
    }

    fn label(&self) -> &str {
        &self.rev
    }
}

fn run_git(repo_root: &Path, op: &str, args: &[&str]) -> Result<Vec<u8>> {
    tracing::trace!(op, args = ?args, "running git");
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_root)
        .output()
        .map_err(|e| errors::git_spawn(op, e))?;
    if !output.status.success() {
        return Err(errors::git_failed(op, &output.stderr));
    }
    Ok(output.stdout)
}
