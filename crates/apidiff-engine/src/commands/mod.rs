//! Command orchestration layer.
//!
//! Provides the check pipeline that coordinates snapshot access, parsing
//! and comparison.

pub mod check;
pub mod packages;
