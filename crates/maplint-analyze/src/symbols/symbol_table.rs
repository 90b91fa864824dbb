//! Symbol table for a single source file
//!
//! Holds every type-level declaration of the file so that type references
//! can be resolved regardless of declaration order.

use super::class_info::{ClassInfo, InterfaceInfo};
use maplint_syntax::ast::{Class, InterfaceDeclaration, TypeAliasDeclaration};
use std::collections::{HashMap, HashSet};

/// Declarations known to the resolver
#[derive(Debug, Clone, Default)]
pub struct SymbolTable<'a> {
    aliases: HashMap<&'a str, &'a TypeAliasDeclaration<'a>>,
    interfaces: HashMap<&'a str, InterfaceInfo<'a>>,
    classes: HashMap<&'a str, ClassInfo<'a>>,
    enums: HashSet<&'a str>,
    /// Local names bound by import declarations
    imports: HashSet<&'a str>,
}

impl<'a> SymbolTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_alias(&mut self, declaration: &'a TypeAliasDeclaration<'a>) {
        self.aliases
            .entry(declaration.name.name)
            .or_insert(declaration);
    }

    /// Register an interface, merging with earlier declarations of the same name
    pub fn register_interface(&mut self, declaration: &'a InterfaceDeclaration<'a>) {
        self.interfaces
            .entry(declaration.name.name)
            .and_modify(|info| info.merge(declaration))
            .or_insert_with(|| InterfaceInfo::new(declaration));
    }

    pub fn register_class(&mut self, name: &'a str, class: &'a Class<'a>) {
        self.classes
            .entry(name)
            .or_insert_with(|| ClassInfo::from_class(name, class));
    }

    pub fn register_enum(&mut self, name: &'a str) {
        self.enums.insert(name);
    }

    pub fn register_import(&mut self, local: &'a str) {
        self.imports.insert(local);
    }

    pub fn get_alias(&self, name: &str) -> Option<&'a TypeAliasDeclaration<'a>> {
        self.aliases.get(name).copied()
    }

    pub fn get_interface(&self, name: &str) -> Option<&InterfaceInfo<'a>> {
        self.interfaces.get(name)
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassInfo<'a>> {
        self.classes.get(name)
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    pub fn is_imported(&self, name: &str) -> bool {
        self.imports.contains(name)
    }

    /// Whether the file itself declares or imports a type with this name,
    /// shadowing any global of the same name
    pub fn declares_type(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
            || self.interfaces.contains_key(name)
            || self.classes.contains_key(name)
            || self.enums.contains(name)
            || self.imports.contains(name)
    }

    /// Whether the file declares or imports a value with this name
    pub fn declares_value(&self, name: &str) -> bool {
        self.classes.contains_key(name) || self.enums.contains(name) || self.imports.contains(name)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}
