//! maplint-syntax: TypeScript front end for maplint
//!
//! This crate provides:
//! - `Lexer`: Tokenizer with template literal and regex support
//! - `parse_file_content()`: Parser producing an arena-allocated `ast::Program`
//! - `Span` / `LineIndex`: Source positions and line/column lookup
//! - `Visitor`: Trait for traversing the TypeScript AST

pub mod ast;
mod error;
pub mod lexer;
mod parser;
pub mod span;
pub mod token;
pub mod visitor;

pub use error::ParseError;
pub use lexer::Lexer;
pub use parser::{parse_file_content, Parser, MAX_NESTING_DEPTH};
pub use span::{HasSpan, LineIndex, Position, Span};
pub use visitor::{visit, Visitor};

#[cfg(test)]
mod tests {
    use super::ast::*;
    use super::*;
    use bumpalo::Bump;

    fn parse_ok<'a>(arena: &'a Bump, source: &str) -> &'a Program<'a> {
        let (program, error) = parse_file_content(arena, source);
        assert!(error.is_none(), "unexpected parse error: {:?}", error);
        program
    }

    fn first_expression<'a>(program: &Program<'a>) -> Expression<'a> {
        match program.statements.first() {
            Some(Statement::Expression(stmt)) => stmt.expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_variable_with_generic_new() {
        let arena = Bump::new();
        let program = parse_ok(&arena, "const m = new Map<string, number>();");
        let Statement::Variable(declaration) = program.statements[0] else {
            panic!("expected variable declaration");
        };
        assert_eq!(declaration.kind, VariableKind::Const);
        let Some(Expression::New(new)) = declaration.declarators[0].init else {
            panic!("expected new expression");
        };
        assert_eq!(new.type_arguments.map(|args| args.len()), Some(2));
        assert!(new.arguments.is_empty());
    }

    #[test]
    fn test_computed_member_assignment() {
        let arena = Bump::new();
        let source = "m[\"foo\"] = 1;";
        let program = parse_ok(&arena, source);
        let Expression::Assignment(assignment) = first_expression(program) else {
            panic!("expected assignment");
        };
        let Expression::Member(member) = assignment.target else {
            panic!("expected member target");
        };
        assert!(member.is_computed());
        assert_eq!(member.span.text(source), "m[\"foo\"]");
    }

    #[test]
    fn test_as_assertion_binds_after_object() {
        let arena = Bump::new();
        let source = "const foo = {} as Map<string, number>;";
        let program = parse_ok(&arena, source);
        let Statement::Variable(declaration) = program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(Expression::TypeAssertion(assertion)) = declaration.declarators[0].init else {
            panic!("expected type assertion");
        };
        assert_eq!(assertion.syntax, AssertionSyntax::As);
        assert!(matches!(assertion.expression, Expression::Object(_)));
        assert_eq!(assertion.span.text(source), "{} as Map<string, number>");
    }

    #[test]
    fn test_angle_bracket_assertion() {
        let arena = Bump::new();
        let program = parse_ok(&arena, "<Map<string, number>>value;");
        let Expression::TypeAssertion(assertion) = first_expression(program) else {
            panic!("expected type assertion");
        };
        assert_eq!(assertion.syntax, AssertionSyntax::AngleBracket);
    }

    #[test]
    fn test_arrow_functions() {
        let arena = Bump::new();
        let program = parse_ok(
            &arena,
            "const a = (x: number, y?: string): number => x;\nconst b = async v => { return v; };\nconst c = <T,>(t: T) => t;",
        );
        assert_eq!(program.statements.len(), 3);
        for statement in program.statements.iter() {
            let Statement::Variable(declaration) = statement else {
                panic!("expected variable declaration");
            };
            assert!(matches!(declaration.declarators[0].init, Some(Expression::Arrow(_))));
        }
    }

    #[test]
    fn test_parenthesized_is_not_arrow() {
        let arena = Bump::new();
        let program = parse_ok(&arena, "(a + b) * c;");
        assert!(matches!(first_expression(program), Expression::Binary(_)));
    }

    #[test]
    fn test_generic_call_vs_comparison() {
        let arena = Bump::new();
        let program = parse_ok(&arena, "f<string>(x);\na < b;\nc > (d);");
        assert!(matches!(first_expression(program), Expression::Call(call) if call.type_arguments.is_some()));
        let Statement::Expression(second) = program.statements[1] else {
            panic!("expected expression statement");
        };
        assert!(matches!(second.expression, Expression::Binary(_)));
    }

    #[test]
    fn test_shift_operators_from_split_tokens() {
        let arena = Bump::new();
        let program = parse_ok(&arena, "a >> b; c >>> d;");
        let operators: Vec<_> = program
            .statements
            .iter()
            .map(|statement| match statement {
                Statement::Expression(stmt) => match stmt.expression {
                    Expression::Binary(binary) => binary.operator,
                    _ => panic!("expected binary"),
                },
                _ => panic!("expected expression statement"),
            })
            .collect();
        assert_eq!(operators, vec![BinaryOperator::RightShift, BinaryOperator::UnsignedRightShift]);
    }

    #[test]
    fn test_automatic_semicolon_insertion() {
        let arena = Bump::new();
        let program = parse_ok(&arena, "let a = 1\nlet b = a\nreturn_value()\n");
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn test_declarations() {
        let arena = Bump::new();
        let source = r#"
            import { a, type B as C } from "./mod";
            import * as ns from "ns";
            export type Dict = Map<string, number>;
            export interface Options extends Base<string> {
                readonly name?: string;
                [key: string]: unknown;
                run(input: number): void;
            }
            declare const VERSION: string;
            export default class Store<T> extends Base implements Repo<T> {
                private items = new Map<string, T>();
                constructor(private readonly root: string, public size = 0) { super(); }
                get count(): number { return this.items.size; }
                static create<U>(): Store<U> { return new Store<U>(""); }
            }
            enum Color { Red, Green = 2 }
            namespace Outer.Inner { export const x = 1; }
        "#;
        let program = parse_ok(&arena, source);
        assert_eq!(program.statements.len(), 8);
    }

    #[test]
    fn test_control_flow() {
        let arena = Bump::new();
        let source = r#"
            for (let i = 0; i < 10; i++) { continue; }
            for (const [k, v] of map.entries()) {}
            for (const key in obj) {}
            while (x) break;
            do { x-- } while (x > 0)
            switch (y) { case 1: case 2: f(); break; default: g(); }
            try { risky(); } catch (e: unknown) { } finally { done(); }
            if (a) b(); else if (c) d(); else { e(); }
        "#;
        let program = parse_ok(&arena, source);
        assert_eq!(program.statements.len(), 8);
        assert!(matches!(program.statements[1], Statement::ForIn(f) if f.kind == ForInKind::Of));
        assert!(matches!(program.statements[2], Statement::ForIn(f) if f.kind == ForInKind::In));
    }

    #[test]
    fn test_complex_types() {
        let arena = Bump::new();
        let source = r#"
            type A<T> = T extends string ? { [K in keyof T]?: T[K] } : never;
            type B = readonly [name: string, age?: number, ...rest: boolean[]];
            type C = (a: number) => void | `prefix-${string}`;
            type D = typeof value.member | -1 | 'lit' | null;
            function isMap(x: unknown): x is Map<string, number> { return x instanceof Map; }
        "#;
        let program = parse_ok(&arena, source);
        assert_eq!(program.statements.len(), 5);
    }

    #[test]
    fn test_optional_chain_and_non_null() {
        let arena = Bump::new();
        let program = parse_ok(&arena, "a?.[k]!.b?.(1);");
        let Expression::Call(call) = first_expression(program) else {
            panic!("expected call");
        };
        assert!(call.optional);
    }

    #[test]
    fn test_error_keeps_earlier_statements() {
        let arena = Bump::new();
        let source = "const a = 1;\nconst b = ;\nconst c = 3;";
        let (program, error) = parse_file_content(&arena, source);
        assert_eq!(program.statements.len(), 1);
        let error = error.expect("expected parse error");
        assert_eq!(error.span().text(source), ";");
    }

    #[test]
    fn test_lexer_error_is_reported() {
        let arena = Bump::new();
        let (_, error) = parse_file_content(&arena, "const s = 'unterminated\n");
        assert!(matches!(error, Some(ParseError::Unterminated { .. })));
    }
    #[test]
    fn test_escaped_identifier_is_cooked() {
        let arena = Bump::new();
        let program = parse_ok(&arena, r"const \u0041 = 1; \u{41}.b;");
        let Statement::Variable(declaration) = program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Pattern::Identifier(id) = declaration.declarators[0].pattern else {
            panic!("expected identifier pattern");
        };
        assert_eq!(id.name, "A");

        let Statement::Expression(statement) = program.statements[1] else {
            panic!("expected expression statement");
        };
        let Expression::Member(member) = statement.expression else {
            panic!("expected member expression");
        };
        assert!(matches!(member.object, Expression::Identifier(Identifier { name: "A", .. })));
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let arena = Bump::new();
        let (_, error) = parse_file_content(&arena, "const x = 1e;");
        assert!(matches!(error, Some(ParseError::MalformedNumber { .. })));
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let depth = 3000;
        let sources = [
            format!("const ok = 1;\nconst x = {}1{};", "[".repeat(depth), "]".repeat(depth)),
            format!("const ok = 1;\nconst x = {}y;", "!".repeat(depth)),
            format!("const ok = 1;\n{}{}", "{".repeat(depth), "}".repeat(depth)),
            format!("const ok = 1;\ntype T = {}number{};", "Array<".repeat(depth), ">".repeat(depth)),
            format!("const ok = 1;\nconst {}a{} = v;", "[".repeat(depth), "]".repeat(depth)),
        ];

        for source in &sources {
            let arena = Bump::new();
            let (program, error) = parse_file_content(&arena, source);
            assert_eq!(program.statements.len(), 1);
            assert!(
                matches!(error, Some(ParseError::TooDeep { limit: MAX_NESTING_DEPTH, .. })),
                "{:?}",
                error
            );
            let position = LineIndex::new(source).position(source, error.map(|e| e.span().start_offset()).unwrap_or(0));
            assert_eq!(position.line, 2);
        }
    }

    #[test]
    fn test_moderate_nesting_parses() {
        let arena = Bump::new();
        let source = format!("const x = {}1{};", "[".repeat(40), "]".repeat(40));
        parse_ok(&arena, &source);

        let source = format!("if (a) {}b;{}", "{ if (a) ".repeat(20), "}".repeat(20));
        parse_ok(&arena, &source);
    }
}
