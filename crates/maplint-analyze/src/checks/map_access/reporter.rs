//! Decides which access sites are offending

use super::classifier::is_mapping_type;
use super::matcher::{AccessKind, AccessSite};
use crate::resolver::TypeResolver;
use maplint_syntax::ast::Expression;
use maplint_syntax::Span;

pub const MESSAGE_ID: &str = "map.objectAccess";

pub const MESSAGE: &str =
    "Map values must be accessed through the Map API (get/set/has/delete), not as a plain object.";

pub const TIP: &str = "Use .get(), .set(), .has(), .delete() or .keys()/.values()/.entries() instead.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub message_id: &'static str,
}

/// Report a site when its base is mapping-typed, or for assertions, when
/// the target is a mapping type and the operand is not
pub fn check_site<'a>(site: &AccessSite<'a>, resolver: &dyn TypeResolver<'a>) -> Option<Diagnostic> {
    let is_mapping = |expr: &Expression<'a>| {
        resolver
            .resolve_type(expr)
            .is_some_and(|ty| is_mapping_type(&ty))
    };

    let offending = match site.kind {
        AccessKind::Assertion => is_mapping(&site.node) && !is_mapping(&site.base),
        AccessKind::ComputedRead
        | AccessKind::ComputedWrite
        | AccessKind::Delete
        | AccessKind::NamespaceEnumeration
        | AccessKind::CollectToArray => is_mapping(&site.base),
    };

    offending.then_some(Diagnostic {
        span: site.span,
        message_id: MESSAGE_ID,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::map_access::matcher::match_access;
    use crate::checks::ExpressionRole;
    use crate::types::Type;
    use bumpalo::Bump;
    use maplint_syntax::ast::{Statement, TypeNode};
    use maplint_syntax::parse_file_content;

    /// Types every identifier by its name: `map*` is a Map, `rec*` a record,
    /// anything else unknown
    struct NameResolver;

    impl<'a> TypeResolver<'a> for NameResolver {
        fn resolve_type(&self, expr: &Expression<'a>) -> Option<Type> {
            match expr.without_parentheses() {
                Expression::Identifier(ident) if ident.name.starts_with("map") => {
                    Some(Type::named("Map", vec![Type::String, Type::Number]))
                }
                Expression::Identifier(ident) if ident.name.starts_with("rec") => {
                    Some(Type::Object(Default::default()))
                }
                Expression::TypeAssertion(assertion) => {
                    match assertion.type_annotation {
                        TypeNode::Reference(reference)
                            if reference.simple_name() == Some("Map") =>
                        {
                            Some(Type::named("Map", vec![Type::Any, Type::Any]))
                        }
                        _ => Some(Type::Object(Default::default())),
                    }
                }
                _ => None,
            }
        }
    }

    fn diagnostics(source: &str) -> usize {
        let arena = Bump::new();
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none(), "{:?}", error);
        let Statement::Expression(statement) = program.statements[0] else {
            panic!("expected expression statement");
        };
        match_access(&statement.expression, ExpressionRole::Read)
            .iter()
            .filter_map(|site| check_site(site, &NameResolver))
            .count()
    }

    #[test]
    fn test_mapping_base_reports() {
        assert_eq!(diagnostics("mapA[k];"), 1);
        assert_eq!(diagnostics("Object.keys(mapA);"), 1);
        assert_eq!(diagnostics("[...mapA, ...mapB];"), 2);
    }

    #[test]
    fn test_other_bases_are_silent() {
        assert_eq!(diagnostics("recA[k];"), 0);
        assert_eq!(diagnostics("unknown[k];"), 0);
        assert_eq!(diagnostics("Object.keys(recA);"), 0);
    }

    #[test]
    fn test_assertions() {
        assert_eq!(diagnostics("recA as Map<string, number>;"), 1);
        assert_eq!(diagnostics("unknown as Map<string, number>;"), 1);
        assert_eq!(diagnostics("mapA as Map<string, number>;"), 0);
        assert_eq!(diagnostics("recA as Record<string, number>;"), 0);
    }

    #[test]
    fn test_diagnostic_shape() {
        let arena = Bump::new();
        let source = "mapA[\"k\"];";
        let (program, _) = parse_file_content(&arena, source);
        let Statement::Expression(statement) = program.statements[0] else {
            panic!("expected expression statement");
        };
        let sites = match_access(&statement.expression, ExpressionRole::Read);
        let diagnostic = check_site(&sites[0], &NameResolver).unwrap();
        assert_eq!(diagnostic.message_id, "map.objectAccess");
        assert_eq!(diagnostic.span.text(source), "mapA[\"k\"]");
    }
}
