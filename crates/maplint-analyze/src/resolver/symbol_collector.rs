//! Symbol collector for building the symbol table from the AST
//!
//! Collects type aliases, interfaces, classes, enums and imported names,
//! including those nested in namespaces, functions and blocks.

use crate::symbols::SymbolTable;
use maplint_syntax::ast::*;
use maplint_syntax::Visitor;

/// Collects declarations using the Visitor pattern
#[derive(Default)]
pub struct SymbolCollector<'a> {
    table: SymbolTable<'a>,
}

impl<'a> SymbolCollector<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect all symbols from a program
    pub fn collect(mut self, program: &Program<'a>) -> SymbolTable<'a> {
        self.visit_program(program);
        self.table
    }

    fn collect_import(&mut self, import: &ImportDeclaration<'a>) {
        for specifier in import.specifiers.iter() {
            let local = match specifier {
                ImportSpecifier::Default(ident) | ImportSpecifier::Namespace(ident) => ident,
                ImportSpecifier::Named { local, .. } => local,
            };
            self.table.register_import(local.name);
        }
    }
}

impl<'a> Visitor<'a> for SymbolCollector<'a> {
    fn visit_statement(&mut self, stmt: &Statement<'a>) -> bool {
        match *stmt {
            Statement::TypeAlias(declaration) => self.table.register_alias(declaration),
            Statement::Interface(declaration) => self.table.register_interface(declaration),
            Statement::Class(class) => {
                if let Some(id) = class.id {
                    self.table.register_class(id.name, class);
                }
            }
            Statement::Enum(declaration) => self.table.register_enum(declaration.name.name),
            Statement::Import(import) => self.collect_import(import),
            // Declarations inside `declare global` augment the globals
            // instead of shadowing them
            Statement::Namespace(namespace) if matches!(namespace.name, NamespaceName::Global) => {
                return false;
            }
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use maplint_syntax::parse_file_content;

    #[test]
    fn test_collects_declarations() {
        let arena = Bump::new();
        let source = r#"
            import { Map as ImmutableMap, type Seq } from "immutable";
            import * as _ from "lodash";
            type Dict = Map<string, number>;
            interface Options { cache: Dict; }
            export class Store { items = new Map<string, number>(); }
            enum Color { Red }
            function inner() {
                type Local = string;
            }
            namespace Outer {
                export interface Nested {}
            }
            declare global {
                interface Map<K, V> { extra(): void; }
            }
        "#;
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none(), "{:?}", error);

        let table = SymbolCollector::new().collect(program);

        assert!(table.get_alias("Dict").is_some());
        assert!(table.get_alias("Local").is_some());
        assert!(table.get_interface("Options").is_some());
        assert!(table.get_interface("Nested").is_some());
        assert!(table.get_class("Store").is_some());
        assert!(table.is_enum("Color"));
        assert!(table.is_imported("ImmutableMap"));
        assert!(table.is_imported("Seq"));
        assert!(table.is_imported("_"));
        assert!(!table.declares_type("Map"));
        assert!(table.declares_value("Store"));
        assert!(!table.declares_value("Dict"));
    }
}
