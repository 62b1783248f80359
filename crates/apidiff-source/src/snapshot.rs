//! The read-only view of a source tree that a comparison runs against.

use crate::errors::Result;

/// One side of a comparison
///
/// Paths are relative to the repository root and use `/` separators. The
/// root package directory is spelled `./`.
pub trait Snapshot: Send + Sync {
    /// Non-test `.go` files directly inside `dir`, sorted.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::NotFound` when `dir` does not exist in this
    /// snapshot, and `Retrieval`/`Io` when it cannot be listed.
    fn list_source_files(&self, dir: &str) -> Result<Vec<String>>;

    /// Raw contents of a file returned by `list_source_files`.
    ///
    /// # Errors
    ///
    /// Returns `Retrieval`/`Io` when the file cannot be read.
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;

    /// Short human name, e.g. a revision or "working tree".
    fn label(&self) -> &str;
}

/// Whether a file name is Go source that belongs to the package API
pub fn is_api_source(name: &str) -> bool {
    name.ends_with(".go") && !name.contains("_test.")
}

/// Join a package directory and a file name
pub fn join(dir: &str, name: &str) -> String {
    match dir.trim_end_matches('/') {
        "" | "." => name.to_string(),
        dir => format!("{}/{}", dir, name),
    }
}

/// File name relative to its package directory
pub fn relative_to<'a>(dir: &str, path: &'a str) -> &'a str {
    match dir.trim_end_matches('/') {
        "" | "." => path.trim_start_matches("./"),
        dir => path
            .strip_prefix(dir)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(path),
    }
}
