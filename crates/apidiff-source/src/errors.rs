//! Error handling for apidiff-source
//!
//! Wraps apidiff-core ExError with source-specific helpers

use apidiff_core::errors::{ApiDiffError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// git exited unsuccessfully
pub fn git_failed(op: &str, stderr: &[u8]) -> ExError {
    ApiDiffError::Retrieval {
        op: op.to_string(),
        stderr: String::from_utf8_lossy(stderr).into_owned(),
    }
    .into()
}

/// git could not be started at all
pub fn git_spawn(op: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(op.to_string())
        .with_message(format!("failed to run git: {}", err))
}

/// git printed something we cannot interpret
pub fn git_output(op: &str, line: &str) -> ExError {
    ExError::new(ExErrorKind::Retrieval)
        .with_op(op.to_string())
        .with_message(format!("unexpected output line: {:?}", line))
}

/// A directory is absent from a snapshot
pub fn not_found(path: &str, snapshot: &str) -> ExError {
    ApiDiffError::NotFound {
        path: path.to_string(),
        snapshot: snapshot.to_string(),
    }
    .into()
}

/// Create an IO error
pub fn io_error(operation: &str, path: &str, err: std::io::Error) -> ExError {
    ApiDiffError::Io {
        op: operation.to_string(),
        path: path.to_string(),
        message: err.to_string(),
    }
    .into()
}

/// Source text is not valid Go
pub fn parse_error(path: &str, line: u32, message: impl Into<String>) -> ExError {
    ApiDiffError::Parse {
        path: path.to_string(),
        line,
        message: message.into(),
    }
    .into()
}

/// A syntax node that has no declaration-model counterpart
pub fn unsupported(path: &str, line: u32, node_kind: &str) -> ExError {
    ApiDiffError::UnsupportedSyntax {
        path: path.to_string(),
        line,
        node_kind: node_kind.to_string(),
    }
    .into()
}
