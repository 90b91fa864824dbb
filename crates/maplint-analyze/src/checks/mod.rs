//! Static analysis checks
//!
//! Checks are stateless and run per expression: the scope walker hands each
//! one the expression, the syntactic role it plays, and a resolver for
//! on-demand type lookups.

pub mod map_access;

use crate::issue::Issue;
use crate::resolver::TypeResolver;
use maplint_syntax::ast::Expression;
use maplint_syntax::{LineIndex, Position, Span};
use std::path::Path;

/// The syntactic position an expression occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionRole {
    /// Evaluated for its value
    Read,
    /// Left side of an assignment, operand of `++`/`--`, or a `for…in`/`for…of` target
    AssignmentTarget,
    /// Operand of `delete`
    DeleteOperand,
}

/// Context provided to checks during analysis
pub struct CheckContext<'a> {
    /// The file being analyzed
    pub file_path: &'a Path,
    /// The source code
    pub source: &'a str,
    pub line_index: &'a LineIndex,
}

impl<'a> CheckContext<'a> {
    pub fn new(file_path: &'a Path, source: &'a str, line_index: &'a LineIndex) -> Self {
        Self {
            file_path,
            source,
            line_index,
        }
    }

    /// 1-based line and column of the start of a span
    pub fn position(&self, span: Span) -> Position {
        self.line_index.position(self.source, span.start_offset())
    }
}

/// Trait for static analysis checks
pub trait Check: Send + Sync {
    /// Unique identifier for this check (e.g., "map.objectAccess")
    fn id(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Run the check on one expression and return any issues found
    fn check_expression<'a>(
        &self,
        expr: &Expression<'a>,
        role: ExpressionRole,
        resolver: &dyn TypeResolver<'a>,
        ctx: &CheckContext<'_>,
    ) -> Vec<Issue>;
}

/// Registry of all available checks
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in checks
    pub fn with_builtin_checks() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(map_access::MapAccessCheck));
        registry
    }

    /// Register a check
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Get all registered checks
    pub fn all_checks(&self) -> Vec<&dyn Check> {
        self.checks.iter().map(|c| c.as_ref()).collect()
    }

    /// Get the checks whose ids are not in `disabled`
    pub fn enabled_checks(&self, disabled: &[String]) -> Vec<&dyn Check> {
        self.checks
            .iter()
            .filter(|c| !disabled.iter().any(|id| id == c.id()))
            .map(|c| c.as_ref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = CheckRegistry::with_builtin_checks();
        let ids: Vec<&str> = registry.all_checks().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["map.objectAccess"]);
    }

    #[test]
    fn test_disabled_checks() {
        let registry = CheckRegistry::with_builtin_checks();
        assert!(registry
            .enabled_checks(&["map.objectAccess".to_string()])
            .is_empty());
        assert_eq!(registry.enabled_checks(&[]).len(), 1);
    }
}
