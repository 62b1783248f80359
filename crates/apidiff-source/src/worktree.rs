//! Working tree access through the filesystem.

use std::path::PathBuf;

use crate::errors::{self, Result};
use crate::snapshot::{is_api_source, join, Snapshot};

const LABEL: &str = "working tree";

/// The checked-out files under a repository root
#[derive(Debug, Clone)]
pub struct WorkingTree {
    root: PathBuf,
}

impl WorkingTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Snapshot for WorkingTree {
    fn list_source_files(&self, dir: &str) -> Result<Vec<String>> {
        let full = self.root.join(dir);
        if !full.is_dir() {
            return Err(errors::not_found(dir, LABEL));
        }
        let entries =
            std::fs::read_dir(&full).map_err(|e| errors::io_error("read_dir", dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| errors::io_error("read_dir", dir, e))?;
            let is_file = entry
                .file_type()
                .map_err(|e| errors::io_error("file_type", dir, e))?
                .is_file();
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_file && is_api_source(&name) {
                files.push(join(dir, &name));
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        std::fs::read(self.root.join(path)).map_err(|e| errors::io_error("read_file", path, e))
    }

    fn label(&self) -> &str {
        LABEL
    }
}
