//! Recognition of object-style access shapes
//!
//! Purely syntactic: every candidate site is returned whatever the type of
//! its base. The reporter decides which ones are offending.

use crate::checks::ExpressionRole;
use maplint_syntax::ast::*;
use maplint_syntax::{HasSpan, Span};

/// Object-style access shapes that bypass the Map API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// `value[key]`, `value?.[key]`
    ComputedRead,
    /// `value[key] = x`, `value[key]++`, `for (value[key] of xs)`
    ComputedWrite,
    /// `delete value[key]`
    Delete,
    /// `Object.keys(value)`, `_.entries(value)`, ...
    NamespaceEnumeration,
    /// `Array.from(value)`, `_.toArray(value)`, `[...value]`
    CollectToArray,
    /// `expr as Map<K, V>`, `<Map<K, V>>expr`
    Assertion,
}

/// A candidate access: the expression whose type decides and the span
/// that is reported
#[derive(Debug, Clone, Copy)]
pub struct AccessSite<'a> {
    pub kind: AccessKind,
    /// The value being accessed, or the asserted operand
    pub base: Expression<'a>,
    /// The visited node
    pub node: Expression<'a>,
    pub span: Span,
}

const OBJECT_ENUMERATIONS: &[&str] = &["keys", "values", "entries", "entities", "getOwnPropertyNames"];

const UTILITY_NAMESPACES: &[&str] = &["_", "lodash"];

const UTILITY_ENUMERATIONS: &[&str] = &[
    "keys", "keysIn", "values", "valuesIn", "entries", "entriesIn", "entities", "toPairs", "toPairsIn",
];

/// Candidate sites rooted at this node
///
/// Array literals can carry one site per spread element; every other node
/// yields at most one.
pub fn match_access<'a>(expr: &Expression<'a>, role: ExpressionRole) -> Vec<AccessSite<'a>> {
    match *expr {
        Expression::Member(member) => {
            if !member.is_computed() {
                return Vec::new();
            }
            let kind = match role {
                ExpressionRole::Read => AccessKind::ComputedRead,
                ExpressionRole::AssignmentTarget => AccessKind::ComputedWrite,
                ExpressionRole::DeleteOperand => AccessKind::Delete,
            };
            vec![site(kind, member.object, *expr)]
        }
        Expression::Call(call) => match_call(call, *expr).into_iter().collect(),
        Expression::Array(array) if role == ExpressionRole::Read => array
            .elements
            .iter()
            .filter_map(|element| match element {
                ArrayElement::Spread(spread) => Some(AccessSite {
                    kind: AccessKind::CollectToArray,
                    base: spread.argument,
                    node: *expr,
                    span: spread.span,
                }),
                _ => None,
            })
            .collect(),
        Expression::TypeAssertion(assertion) => {
            vec![site(AccessKind::Assertion, assertion.expression, *expr)]
        }
        _ => Vec::new(),
    }
}

fn match_call<'a>(call: &CallExpression<'a>, node: Expression<'a>) -> Option<AccessSite<'a>> {
    let Expression::Member(callee) = call.callee.without_parentheses() else {
        return None;
    };
    let Expression::Identifier(namespace) = callee.object.without_parentheses() else {
        return None;
    };
    let function = callee.property_name()?;

    let kind = match namespace.name {
        "Object" if OBJECT_ENUMERATIONS.contains(&function) => AccessKind::NamespaceEnumeration,
        "Array" if function == "from" => AccessKind::CollectToArray,
        ns if UTILITY_NAMESPACES.contains(&ns) => {
            if UTILITY_ENUMERATIONS.contains(&function) {
                AccessKind::NamespaceEnumeration
            } else if function == "toArray" {
                AccessKind::CollectToArray
            } else {
                return None;
            }
        }
        _ => return None,
    };

    // Only the value passed directly counts; `Array.from(...m)` does not
    match call.arguments.first()? {
        Argument::Expression(argument) => Some(site(kind, *argument, node)),
        Argument::Spread(_) => None,
    }
}

fn site<'a>(kind: AccessKind, base: Expression<'a>, node: Expression<'a>) -> AccessSite<'a> {
    AccessSite {
        kind,
        base,
        node,
        span: node.span(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use maplint_syntax::parse_file_content;

    fn kinds(source: &str, role: ExpressionRole) -> Vec<AccessKind> {
        let arena = Bump::new();
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none(), "{:?}", error);
        let Statement::Expression(statement) = program.statements[0] else {
            panic!("expected expression statement");
        };
        match_access(&statement.expression, role)
            .into_iter()
            .map(|site| site.kind)
            .collect()
    }

    #[test]
    fn test_computed_member_by_role() {
        assert_eq!(kinds("m[k];", ExpressionRole::Read), vec![AccessKind::ComputedRead]);
        assert_eq!(kinds("m?.[k];", ExpressionRole::Read), vec![AccessKind::ComputedRead]);
        assert_eq!(
            kinds("m[k];", ExpressionRole::AssignmentTarget),
            vec![AccessKind::ComputedWrite]
        );
        assert_eq!(kinds("m[k];", ExpressionRole::DeleteOperand), vec![AccessKind::Delete]);
        assert!(kinds("m.k;", ExpressionRole::Read).is_empty());
    }

    #[test]
    fn test_namespace_calls() {
        for source in [
            "Object.keys(m);",
            "Object.getOwnPropertyNames(m);",
            "_.entries(m);",
            "lodash.toPairsIn(m);",
            "Object.entities(m);",
            "_.entities(m);",
        ] {
            assert_eq!(
                kinds(source, ExpressionRole::Read),
                vec![AccessKind::NamespaceEnumeration],
                "{}",
                source
            );
        }
        assert!(kinds("Object.assign(m);", ExpressionRole::Read).is_empty());
        assert!(kinds("Reflect.ownKeys(m);", ExpressionRole::Read).is_empty());
        assert!(kinds("Object.keys();", ExpressionRole::Read).is_empty());
        assert!(kinds("m.keys();", ExpressionRole::Read).is_empty());
    }

    #[test]
    fn test_collect_to_array() {
        assert_eq!(
            kinds("Array.from(m, f);", ExpressionRole::Read),
            vec![AccessKind::CollectToArray]
        );
        assert_eq!(kinds("_.toArray(m);", ExpressionRole::Read), vec![AccessKind::CollectToArray]);
        assert_eq!(
            kinds("[1, ...a, ...b];", ExpressionRole::Read),
            vec![AccessKind::CollectToArray, AccessKind::CollectToArray]
        );
        assert!(kinds("[...a] ;", ExpressionRole::AssignmentTarget).is_empty());
    }

    #[test]
    fn test_assertions() {
        assert_eq!(kinds("x as Map<string, number>;", ExpressionRole::Read), vec![AccessKind::Assertion]);
        assert_eq!(kinds("<Map<string, number>>x;", ExpressionRole::Read), vec![AccessKind::Assertion]);
        assert!(kinds("x satisfies Map<string, number>;", ExpressionRole::Read).is_empty());
    }
}
