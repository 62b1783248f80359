//! apidiff Core - declaration model and breaking-change comparer
//!
//! This crate provides the language-level pieces of apidiff, with no I/O:
//! - Type-expression and declaration models
//! - Canonical normalisation of type expressions
//! - A declaration printer for report signatures
//! - The public-surface `Summary` of a package
//! - The structural `Comparer` and its report types
//! - The shared error and logging facilities

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod render;
pub mod summary;

// Used by the logging macros
pub use apidiff_core_types;

// Re-export commonly used types
pub use diff::{Comparer, Finding, FindingKind, PackageOutcome, Report};
pub use errors::{ApiDiffError, ExError, ExErrorKind, Result};
pub use model::{Decl, FuncDecl, FuncKey, Position, TypeDecl, TypeExpr, ValueDecl};
pub use normalize::{normalize, Normalizer};
pub use policy::{GoExported, SurfacePolicy, Visibility};
pub use summary::Summary;
