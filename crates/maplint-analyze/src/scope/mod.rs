//! Scope tracking for static analysis
//!
//! Tracks declared variable types, `this` and visible type parameters while
//! walking a file.

pub mod scope;

pub use scope::Scope;
