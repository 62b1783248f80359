//! apidiff Engine - Orchestration layer
//!
//! Turns a set of changed files into packages to check, builds the head
//! summary of each package, replays the base declarations against it and
//! collects one outcome per package.

pub mod commands;

pub use commands::check::{check_package, check_packages, run_check, CheckOptions, CheckRun};
pub use commands::packages::{affected_packages, DEFAULT_EXCLUDED_SEGMENTS};
