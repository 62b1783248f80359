//! apidiff Source - snapshot access and Go declaration extraction
//!
//! Provides the two snapshots a comparison reads from (a git revision and
//! the working tree), the list of files changed since a revision, and the
//! tree-sitter based parser that turns Go source into declarations.

pub mod errors;
pub mod git;
pub mod parse;
pub mod snapshot;
pub mod worktree;

pub use errors::Result;
pub use git::{list_changed_files, ChangeKind, FileChange, GitRevision};
pub use parse::GoParser;
pub use snapshot::Snapshot;
pub use worktree::WorkingTree;
