//! Package discovery from a list of changed files.

use std::collections::BTreeSet;

use apidiff_source::snapshot::is_api_source;
use apidiff_source::{ChangeKind, FileChange};

/// Directory segments whose contents are not public API
pub const DEFAULT_EXCLUDED_SEGMENTS: &[&str] = &["internal", "vendor"];

/// Package directories whose base-side API may have changed
///
/// Added files are skipped since they have nothing to compare against, and
/// renames are attributed to their old location. A directory below a private
/// segment is attributed to the package above that segment; a private
/// segment at the root drops the file entirely. The root package is spelled
/// `./`. The result is deduplicated and sorted.
pub fn affected_packages<S: AsRef<str>>(
    changes: &[FileChange],
    excluded_segments: &[S],
) -> Vec<String> {
    let mut packages = BTreeSet::new();
    for change in changes {
        if change.kind == ChangeKind::Added {
            continue;
        }
        let path = change.old_path.as_str();
        let (dir, name) = match path.rsplit_once('/') {
            Some((dir, name)) => (dir, name),
            None => ("", path),
        };
        if !is_api_source(name) {
            continue;
        }

        match public_prefix(dir, excluded_segments) {
            None => {}
            Some("") | Some(".") => {
                packages.insert("./".to_string());
            }
            Some(prefix) => {
                packages.insert(prefix.to_string());
            }
        }
    }
    packages.into_iter().collect()
}

/// `dir` cut before its first private segment, or `None` if nothing is left
fn public_prefix<'a, S: AsRef<str>>(dir: &'a str, excluded: &[S]) -> Option<&'a str> {
    let mut end: usize = 0;
    for (i, segment) in dir.split('/').enumerate() {
        if excluded.iter().any(|e| e.as_ref() == segment) {
            return if i == 0 { None } else { Some(&dir[..end.saturating_sub(1)]) };
        }
        end += segment.len() + 1;
    }
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(kind: ChangeKind, path: &str) -> FileChange {
        FileChange {
            kind,
            path: path.to_string(),
            old_path: path.to_string(),
        }
    }

    #[test]
    fn test_root_and_nested_packages() {
        let changes = vec![
            change(ChangeKind::Modified, "main.go"),
            change(ChangeKind::Modified, "pkg/api/client.go"),
            change(ChangeKind::Deleted, "pkg/api/server.go"),
            change(ChangeKind::Modified, "pkg/db/db.go"),
        ];
        assert_eq!(
            affected_packages(&changes, DEFAULT_EXCLUDED_SEGMENTS),
            vec!["./", "pkg/api", "pkg/db"]
        );
    }

    #[test]
    fn test_added_tests_and_non_go_files_are_skipped() {
        let changes = vec![
            change(ChangeKind::Added, "pkg/new/new.go"),
            change(ChangeKind::Modified, "pkg/api/client_test.go"),
            change(ChangeKind::Modified, "README.md"),
            change(ChangeKind::Modified, "go.mod"),
        ];
        assert!(affected_packages(&changes, DEFAULT_EXCLUDED_SEGMENTS).is_empty());
    }

    #[test]
    fn test_private_segments_are_cut() {
        let changes = vec![
            change(ChangeKind::Modified, "internal/cache/cache.go"),
            change(ChangeKind::Modified, "vendor/github.com/x/y/y.go"),
            change(ChangeKind::Modified, "pkg/store/internal/sql/sql.go"),
            change(ChangeKind::Modified, "pkg/store/store.go"),
            change(ChangeKind::Modified, "tools/vendor/a.go"),
        ];
        assert_eq!(
            affected_packages(&changes, DEFAULT_EXCLUDED_SEGMENTS),
            vec!["pkg/store", "tools"]
        );
    }

    #[test]
    fn test_rename_uses_old_path() {
        let changes = vec![FileChange {
            kind: ChangeKind::Renamed,
            path: "pkg/b/file.go".to_string(),
            old_path: "pkg/a/file.go".to_string(),
        }];
        assert_eq!(
            affected_packages(&changes, DEFAULT_EXCLUDED_SEGMENTS),
            vec!["pkg/a"]
        );
    }

    #[test]
    fn test_custom_exclusions() {
        let changes = vec![
            change(ChangeKind::Modified, "gen/proto/api.go"),
            change(ChangeKind::Modified, "internal/x/x.go"),
        ];
        let none: [&str; 0] = [];
        assert_eq!(
            affected_packages(&changes, &none),
            vec!["gen/proto", "internal/x"]
        );
        assert_eq!(affected_packages(&changes, &["gen"]), vec!["internal/x"]);
    }
}
