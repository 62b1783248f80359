//! Visibility and surface policy
//!
//! This module defines the `Visibility` trait, which decides whether a name
//! belongs to a package's public surface, and `SurfacePolicy`, which bundles
//! it with the switches that control which declarations are indexed.

use std::sync::Arc;

/// Policy trait for deciding whether a name is exported
///
/// The normaliser, printer, summary and comparer all consult the same
/// implementation so that "public" means one thing across a run.
pub trait Visibility: Send + Sync {
    /// Check if a declared name is part of the public surface
    ///
    /// # Arguments
    /// * `name` - Identifier as written in source
    ///
    /// # Returns
    /// * `true` - the name is visible to importers
    /// * `false` - the name is package-private
    fn is_public(&self, name: &str) -> bool;
}

/// Go's export rule: a name is exported when its first character is an
/// upper-case letter.
///
/// # Example
/// ```
/// use apidiff_core::policy::{GoExported, Visibility};
///
/// assert!(GoExported.is_public("Client"));
/// assert!(!GoExported.is_public("client"));
/// assert!(!GoExported.is_public("_"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GoExported;

impl Visibility for GoExported {
    fn is_public(&self, name: &str) -> bool {
        name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Treats every name as public (for comparing internal surfaces).
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPublic;

impl Visibility for AllPublic {
    fn is_public(&self, _name: &str) -> bool {
        true
    }
}

/// Switches that decide which declarations make up a package's surface
#[derive(Clone)]
pub struct SurfacePolicy {
    /// Index exported methods whose receiver type is unexported.
    ///
    /// Such methods can still be reached through an exported interface or
    /// constructor, but are skipped by default.
    pub include_unexported_receivers: bool,
    pub visibility: Arc<dyn Visibility>,
}

impl SurfacePolicy {
    pub fn new(visibility: Arc<dyn Visibility>) -> Self {
        Self {
            include_unexported_receivers: false,
            visibility,
        }
    }

    pub fn with_unexported_receivers(mut self, include: bool) -> Self {
        self.include_unexported_receivers = include;
        self
    }

    pub fn is_public(&self, name: &str) -> bool {
        self.visibility.is_public(name)
    }
}

impl Default for SurfacePolicy {
    fn default() -> Self {
        Self::new(Arc::new(GoExported))
    }
}

impl std::fmt::Debug for SurfacePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfacePolicy")
            .field(
                "include_unexported_receivers",
                &self.include_unexported_receivers,
            )
            .finish_non_exhaustive()
    }
}
