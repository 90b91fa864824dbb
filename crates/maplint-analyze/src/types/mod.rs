//! TypeScript type model for static analysis
//!
//! Types are declaration-based: they come from annotations, initializers and
//! the built-in library shapes in [`builtins`].

pub mod builtins;
pub mod ts_type;

pub use ts_type::{FunctionShape, ObjectShape, Type};
