//! Symbol collection and type resolution for static analysis
//!
//! Builds the per-file symbol table, lowers annotations to `Type`, resolves
//! expression types and walks the file with scope tracking.

pub mod expression_resolver;
pub mod node_scope_resolver;
pub mod symbol_collector;
pub mod type_lowering;

pub use expression_resolver::ExpressionResolver;
pub use node_scope_resolver::NodeScopeResolver;
pub use symbol_collector::SymbolCollector;
pub use type_lowering::{TypeLowering, TypeParams};

use crate::types::Type;
use maplint_syntax::ast::Expression;

/// Answers "what is the static type of this expression?"
///
/// `None` means no type information is available; callers must treat that
/// as "not a mapping" and stay silent.
pub trait TypeResolver<'a> {
    fn resolve_type(&self, expr: &Expression<'a>) -> Option<Type>;
}
