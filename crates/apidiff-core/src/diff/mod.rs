//! Breaking-change detection.
//!
//! Compares the declarations of a package at a base revision against a
//! [`Summary`](crate::summary::Summary) of the same package in the working
//! tree, and reports everything an importer could observe as broken.
//!
//! ## Entry point
//!
//! ```ignore
//! use apidiff_core::diff::Comparer;
//!
//! let mut comparer = Comparer::new(&head_summary, "pkg/api", "HEAD");
//! for decl in &base_decls {
//!     comparer.visit(decl);
//! }
//! let report = comparer.into_report();
//! print!("{}", apidiff_core::diff::render_report(&report));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: findings appear in the order declarations are visited.
//! - **Additive compatibility**: new functions, types, values, struct fields
//!   and trailing variadic parameters are never reported.
//! - **One finding per function**: signature checks stop at the first
//!   incompatibility.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compare_decls, Comparer};
pub use human_summary::{render_outcomes, render_report};
pub use model::{Finding, FindingKind, Located, PackageOutcome, Report, SnapshotSide};
