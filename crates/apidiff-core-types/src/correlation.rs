//! Correlation types for run tracking
//!
//! A single `apidiff` invocation gets one [`RunId`]; every package checked
//! during that run carries a [`PackageContext`] so log lines emitted from
//! parallel workers can be grouped back together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single check run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new random RunId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one package comparison
#[derive(Debug, Clone)]
pub struct PackageContext {
    pub run_id: RunId,
    pub package: String,
    /// Position of the package in the run's ordered package list
    pub ordinal: usize,
}

impl PackageContext {
    /// Create a context for `package` within `run_id`
    pub fn new(run_id: RunId, package: impl Into<String>, ordinal: usize) -> Self {
        Self {
            run_id,
            package: package.into(),
            ordinal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_generation() {
        let id1 = RunId::new();
        let id2 = RunId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
        assert!(!id2.as_str().is_empty());
    }

    #[test]
    fn test_run_id_display() {
        let id = RunId::new();
        let display_str = format!("{}", id);
        assert_eq!(display_str, id.as_str());
    }

    #[test]
    fn test_package_context_creation() {
        let run_id = RunId::new();
        let ctx = PackageContext::new(run_id.clone(), "pkg/api", 3);
        assert_eq!(ctx.run_id, run_id);
        assert_eq!(ctx.package, "pkg/api");
        assert_eq!(ctx.ordinal, 3);
    }

    #[test]
    fn test_serialization() {
        let id = RunId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
