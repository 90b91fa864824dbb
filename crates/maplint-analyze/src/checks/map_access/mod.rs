//! Check for object-style access on Map values
//!
//! Flags computed-property reads, writes and deletes, `Object.*`/lodash
//! enumeration, array conversion of the map itself, and assertions that
//! turn a plain value into a Map.

pub mod classifier;
pub mod matcher;
pub mod reporter;

pub use classifier::is_mapping_type;
pub use matcher::{match_access, AccessKind, AccessSite};
pub use reporter::{check_site, Diagnostic, MESSAGE, MESSAGE_ID, TIP};

use crate::checks::{Check, CheckContext, ExpressionRole};
use crate::issue::Issue;
use crate::resolver::TypeResolver;
use maplint_syntax::ast::Expression;

pub struct MapAccessCheck;

impl Check for MapAccessCheck {
    fn id(&self) -> &'static str {
        MESSAGE_ID
    }

    fn description(&self) -> &'static str {
        "Detects Map values accessed as plain objects"
    }

    fn check_expression<'a>(
        &self,
        expr: &Expression<'a>,
        role: ExpressionRole,
        resolver: &dyn TypeResolver<'a>,
        ctx: &CheckContext<'_>,
    ) -> Vec<Issue> {
        match_access(expr, role)
            .iter()
            .filter_map(|site| check_site(site, resolver))
            .map(|diagnostic| {
                let position = ctx.position(diagnostic.span);
                Issue::error(
                    self.id(),
                    MESSAGE,
                    ctx.file_path.to_path_buf(),
                    position.line,
                    position.column,
                )
                .with_identifier(diagnostic.message_id)
                .with_tip(TIP)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{NodeScopeResolver, SymbolCollector};
    use bumpalo::Bump;
    use maplint_syntax::{parse_file_content, LineIndex};
    use std::path::Path;

    fn analyze(source: &str) -> Vec<Issue> {
        let arena = Bump::new();
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none(), "{:?}", error);
        let symbols = SymbolCollector::new().collect(program);
        let line_index = LineIndex::new(source);
        let ctx = CheckContext::new(Path::new("test.ts"), source, &line_index);
        let check = MapAccessCheck;
        let checks: Vec<&dyn Check> = vec![&check];
        NodeScopeResolver::new(&symbols, &checks, &ctx).analyze(program)
    }

    fn count(source: &str) -> usize {
        analyze(source).len()
    }

    #[test]
    fn test_computed_write_reports_once() {
        let issues = analyze("const m = new Map(); m[\"foo\"] = 1;");
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.line, 1);
        assert_eq!(issue.column, 22);
        assert_eq!(issue.message, MESSAGE);
        assert_eq!(issue.identifier.as_deref(), Some("map.objectAccess"));
        assert_eq!(issue.tip.as_deref(), Some(TIP));
    }

    #[test]
    fn test_map_api_is_silent() {
        let source = r#"
            const m = new Map<string, number>();
            const x = m.get("foo");
            m.set("a", 1);
            m.has("a");
            m.delete("a");
            m.clear();
            m.forEach((value, key) => value);
            const size = m.size;
            const keys = Array.from(m.keys());
            const values = [...m.values()];
            const entries = Array.from(m.entries());
            for (const [key, value] of m) {}
        "#;
        assert_eq!(count(source), 0);
    }

    #[test]
    fn test_object_keys_reports() {
        let issues = analyze("const m = new Map();\nObject.keys(m).length;");
        assert_eq!(issues.len(), 1);
        assert_eq!((issues[0].line, issues[0].column), (2, 1));
    }

    #[test]
    fn test_entities_enumeration() {
        let issues = analyze("const m = new Map();\nconst foo = Object.entities(m);\n");
        assert_eq!(issues.len(), 1);
        assert_eq!((issues[0].line, issues[0].column), (2, 13));

        assert_eq!(count("const m = new Map();\nconst foo = _.entities(m);\n"), 1);
        assert_eq!(count("const r: Record<string, number> = {};\nObject.entities(r);\n"), 0);
    }

    #[test]
    fn test_assertions() {
        assert_eq!(count("const foo = {} as Record<string, number>;"), 0);
        assert_eq!(count("const foo = {} as Map<string, number>;"), 1);
        assert_eq!(count("const foo = <Map<string, number>>{};"), 1);
        assert_eq!(count("const m = new Map<string, number>(); const n = m as Map<string, number>;"), 0);
        assert_eq!(count("declare const raw: unknown; const foo = raw as Map<string, number>;"), 1);
    }

    #[test]
    fn test_aliased_parameter() {
        let source = r#"
            type Dict = Map<string, number>;
            function read(foo: Dict) {
                return foo["foo"];
            }
        "#;
        let issues = analyze(source);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 4);
    }

    #[test]
    fn test_read_write_delete() {
        let source = r#"
            const m = new Map<string, number>();
            const a = m["a"];
            m["b"] += 1;
            m["c"]++;
            delete m["d"];
            delete (m["e"]);
            m["f"] = m["g"];
        "#;
        assert_eq!(count(source), 7);
    }

    #[test]
    fn test_conversions_of_the_map_itself() {
        let source = r#"
            const m = new Map<string, number>();
            Array.from(m);
            const spread = [...m];
            _.toArray(m);
            lodash.toArray(m);
            Object.entries(m);
            Object.values(m);
            _.keysIn(m);
            lodash.toPairs(m);
        "#;
        assert_eq!(count(source), 8);
    }

    #[test]
    fn test_records_are_silent() {
        let source = r#"
            const r: Record<string, number> = {};
            r["a"] = 1;
            const v = r["a"];
            delete r["a"];
            Object.keys(r);
            _.entries(r);
            const copy = [...Object.values(r)];
            const o = { a: 1 };
            o["a"];
        "#;
        assert_eq!(count(source), 0);
    }

    #[test]
    fn test_union_with_undefined() {
        let source = r#"
            function read(m: Map<string, number> | undefined) {
                return m?.["x"];
            }
        "#;
        assert_eq!(count(source), 1);
    }

    #[test]
    fn test_weak_and_readonly_maps() {
        let source = r#"
            function read(a: ReadonlyMap<string, number>, b: WeakMap<object, number>) {
                a["x"];
                b["y"];
            }
        "#;
        assert_eq!(count(source), 2);
    }

    #[test]
    fn test_shadowed_map_class() {
        let source = r#"
            class Map {
                [key: string]: number;
            }
            const m = new Map();
            m["x"] = 1;
        "#;
        assert_eq!(count(source), 0);

        let source = r#"
            import { Map } from "immutable";
            const m = new Map();
            m["x"] = 1;
        "#;
        assert_eq!(count(source), 0);
    }

    #[test]
    fn test_nested_and_member_bases() {
        let source = r#"
            const outer = new Map<string, Map<string, number>>();
            outer.get("a")!["b"];
            class Store {
                items = new Map<string, number>();
                read(key: string) {
                    return this.items[key];
                }
            }
        "#;
        assert_eq!(count(source), 2);
    }

    #[test]
    fn test_assignment_targets() {
        let source = r#"
            const m = new Map<string, number>();
            declare const list: string[];
            for (m["k"] of list) {}
            [m["a"]] = [1];
            ({ value: m["b"] } = { value: 2 });
        "#;
        assert_eq!(count(source), 3);
    }

    #[test]
    fn test_several_sites_in_one_statement() {
        let issues = analyze("const m = new Map(); const n = new Map(); m[\"a\"] = n[\"b\"];");
        assert_eq!(issues.len(), 2);
        assert!(issues[0].column < issues[1].column);
    }

    #[test]
    fn test_deterministic() {
        let source = r#"
            const m = new Map<string, number>();
            m["a"] = Object.keys(m).length;
            const x = {} as Map<string, string>;
        "#;
        assert_eq!(analyze(source), analyze(source));
        assert_eq!(count(source), 3);
    }
}
