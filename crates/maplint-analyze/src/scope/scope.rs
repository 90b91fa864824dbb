//! Scope tracking for variable types
//!
//! A variable's type is fixed at its declaration: the declared annotation,
//! or the type of its initializer. Assignments never change it.

use crate::resolver::type_lowering::{TypeParams, THIS_TYPE};
use crate::types::Type;
use std::collections::HashMap;
use std::sync::Arc;

/// A lexical scope in the analysis
///
/// Child scopes see the bindings of their parents; a binding in a child
/// shadows the parent's binding of the same name.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Variables declared in this scope: name -> type
    variables: HashMap<String, Type>,
    /// Type of `this`, when inside a class body or method
    this_type: Option<Type>,
    /// Type parameters visible in this scope
    type_params: TypeParams,
    parent: Option<Arc<Scope>>,
}

impl Scope {
    /// Create a new root scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child block scope
    pub fn enter_scope(&self) -> Self {
        Self {
            variables: HashMap::new(),
            this_type: self.this_type.clone(),
            type_params: self.type_params.clone(),
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// Create a scope for a function body
    ///
    /// Arrow functions keep the enclosing `this`; other functions only get
    /// one when `this_type` is given (methods).
    pub fn enter_function_scope(&self, type_params: TypeParams, this_type: Option<Type>, is_arrow: bool) -> Self {
        let this_type = if is_arrow { self.this_type.clone() } else { this_type };
        let mut type_params = type_params;
        if let Some(this) = &this_type {
            type_params.insert(THIS_TYPE.to_string(), this.clone());
        } else {
            type_params.remove(THIS_TYPE);
        }

        Self {
            variables: HashMap::new(),
            this_type,
            type_params,
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// Create a scope for a class body, where `this` is the instance type
    /// (or the constructor type for static members)
    pub fn enter_class_scope(&self, type_params: TypeParams, this_type: Type) -> Self {
        let mut type_params = type_params;
        type_params.insert(THIS_TYPE.to_string(), this_type.clone());
        Self {
            variables: HashMap::new(),
            this_type: Some(this_type),
            type_params,
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// Get the type of a variable
    pub fn get_variable_type(&self, name: &str) -> Option<Type> {
        if let Some(ty) = self.variables.get(name) {
            return Some(ty.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.get_variable_type(name))
    }

    /// Declare a variable in this scope
    pub fn set_variable(&mut self, name: impl Into<String>, ty: Type) {
        self.variables.insert(name.into(), ty);
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.get_variable_type(name).is_some()
    }

    /// Whether the name is declared in this scope itself, not a parent
    pub fn declares_locally(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn this_type(&self) -> Option<&Type> {
        self.this_type.as_ref()
    }

    pub fn type_params(&self) -> &TypeParams {
        &self.type_params
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_variable() {
        let mut scope = Scope::new();
        scope.set_variable("foo", Type::Number);
        assert_eq!(scope.get_variable_type("foo"), Some(Type::Number));
        assert!(scope.has_variable("foo"));
        assert!(!scope.has_variable("bar"));
        assert!(scope.is_root());
    }

    #[test]
    fn test_scope_inheritance_and_shadowing() {
        let mut parent = Scope::new();
        parent.set_variable("m", Type::named("Map", vec![Type::String, Type::Number]));

        let mut child = parent.enter_scope();
        assert!(child.has_variable("m"));
        assert!(!child.declares_locally("m"));

        child.set_variable("m", Type::String);
        assert_eq!(child.get_variable_type("m"), Some(Type::String));
        assert!(matches!(parent.get_variable_type("m"), Some(Type::Named { .. })));
    }

    #[test]
    fn test_this_in_functions() {
        let instance = Type::Class {
            name: "Store".to_string(),
            type_args: Vec::new(),
        };
        let class_scope = Scope::new().enter_class_scope(TypeParams::new(), instance.clone());
        assert_eq!(class_scope.this_type(), Some(&instance));

        let arrow = class_scope.enter_function_scope(class_scope.type_params().clone(), None, true);
        assert_eq!(arrow.this_type(), Some(&instance));

        let function = class_scope.enter_function_scope(class_scope.type_params().clone(), None, false);
        assert_eq!(function.this_type(), None);
        assert!(!function.type_params().contains_key(THIS_TYPE));
    }
}
