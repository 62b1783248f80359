use thiserror::Error;

/// Result type alias using ApiDiffError
pub type Result<T> = std::result::Result<T, ApiDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error surfaced by apidiff maps to one of these kinds. The kind
/// decides whether a failure is local to one package (`NotFound`) or aborts
/// the whole run (everything else).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    Config,

    // Snapshot retrieval
    /// A directory or file does not exist in the requested snapshot
    NotFound,
    /// git (or the filesystem) failed to produce the requested data
    Retrieval,

    // Parsing
    /// Source could not be parsed
    Parse,
    /// A syntax form the declaration extractor has no mapping for
    UnsupportedSyntax,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Retrieval => "ERR_RETRIEVAL",
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::UnsupportedSyntax => "ERR_UNSUPPORTED_SYNTAX",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind must abort the whole run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ExErrorKind::NotFound)
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (operation, package,
/// file, line) to print a useful one-line diagnostic.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    package: Option<String>,
    path: Option<String>,
    line: Option<u32>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            package: None,
            path: None,
            line: None,
            message: String::new(),
            source: None,
        }
    }

    /// Set the operation name
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the package directory being processed
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Set the file path involved
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the 1-based source line
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation name, if set
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the package directory, if set
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Get the file path, if set
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the source line, if set
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        match (&self.path, self.line) {
            (Some(path), Some(line)) => write!(f, " ({}:{})", path, line)?,
            (Some(path), None) => write!(f, " ({})", path)?,
            _ => {}
        }
        if let Some(package) = &self.package {
            write!(f, " (package: {})", package)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for apidiff operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiDiffError {
    /// An external tool (git) exited unsuccessfully
    #[error("{op} failed: {stderr}")]
    Retrieval { op: String, stderr: String },

    /// Path is absent from the snapshot
    #[error("{path} does not exist at {snapshot}")]
    NotFound { path: String, snapshot: String },

    /// Source text could not be parsed
    #[error("{path}:{line}: {message}")]
    Parse {
        path: String,
        line: u32,
        message: String,
    },

    /// Parsed syntax has no declaration-model mapping
    #[error("{path}:{line}: unsupported syntax node `{node_kind}`")]
    UnsupportedSyntax {
        path: String,
        line: u32,
        node_kind: String,
    },

    #[error("I/O error during {op} on {path}: {message}")]
    Io {
        op: String,
        path: String,
        message: String,
    },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<ApiDiffError> for ExError {
    fn from(err: ApiDiffError) -> Self {
        match err {
            ApiDiffError::Retrieval { op, stderr } => ExError::new(ExErrorKind::Retrieval)
                .with_op(op)
                .with_message(stderr.trim().to_string()),

            ApiDiffError::NotFound { path, snapshot } => ExError::new(ExErrorKind::NotFound)
                .with_path(path)
                .with_message(format!("not present at {}", snapshot)),

            ApiDiffError::Parse {
                path,
                line,
                message,
            } => ExError::new(ExErrorKind::Parse)
                .with_op("parse")
                .with_path(path)
                .with_line(line)
                .with_message(message),

            ApiDiffError::UnsupportedSyntax {
                path,
                line,
                node_kind,
            } => ExError::new(ExErrorKind::UnsupportedSyntax)
                .with_op("parse")
                .with_path(path)
                .with_line(line)
                .with_message(format!("no type mapping for `{}`", node_kind)),

            ApiDiffError::Io { op, path, message } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_path(path)
                .with_message(message),

            ApiDiffError::Config { message } => {
                ExError::new(ExErrorKind::Config).with_message(message)
            }

            ApiDiffError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            ApiDiffError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to ApiDiffError
impl From<serde_json::Error> for ApiDiffError {
    fn from(err: serde_json::Error) -> Self {
        ApiDiffError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::Retrieval, "ERR_RETRIEVAL"),
            (ExErrorKind::Parse, "ERR_PARSE"),
            (ExErrorKind::UnsupportedSyntax, "ERR_UNSUPPORTED_SYNTAX"),
            (ExErrorKind::Config, "ERR_CONFIG"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_only_not_found_is_recoverable() {
        assert!(!ExErrorKind::NotFound.is_fatal());
        assert!(ExErrorKind::Retrieval.is_fatal());
        assert!(ExErrorKind::Parse.is_fatal());
        assert!(ExErrorKind::UnsupportedSyntax.is_fatal());
    }

    #[test]
    fn test_parse_error_conversion_keeps_position() {
        let err: ExError = ApiDiffError::Parse {
            path: "api/client.go".to_string(),
            line: 12,
            message: "syntax error".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::Parse);
        assert_eq!(err.path(), Some("api/client.go"));
        assert_eq!(err.line(), Some(12));
        assert_eq!(
            err.to_string(),
            "[ERR_PARSE] in operation 'parse': syntax error (api/client.go:12)"
        );
    }

    #[test]
    fn test_display_includes_package_and_source() {
        let inner = ExError::new(ExErrorKind::Io).with_message("permission denied");
        let err = ExError::new(ExErrorKind::Retrieval)
            .with_op("git ls-tree")
            .with_package("pkg/api")
            .with_source(inner);
        let text = err.to_string();
        assert!(text.contains("(package: pkg/api)"));
        assert!(text.contains("caused by [ERR_IO]: permission denied"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
