//! Human-readable rendering of declarations.

pub mod decl_render;

pub use decl_render::{render_decl, render_func, render_type, render_value, DeclPrinter};
