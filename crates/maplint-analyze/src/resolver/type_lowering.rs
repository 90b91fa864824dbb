//! Lowering of type annotations into [`Type`]
//!
//! References are resolved against the file's [`SymbolTable`] first and fall
//! back to global library types. Aliases are expanded eagerly with their type
//! arguments substituted, so an alias type always wraps its final right-hand
//! side. Alias cycles lower to `Unknown`.

use crate::symbols::SymbolTable;
use crate::types::{ObjectShape, Type};
use maplint_syntax::ast::*;
use std::collections::HashMap;

/// Type parameters in scope, mapped to their bound types
pub type TypeParams = HashMap<String, Type>;

/// Key under which the enclosing class instance type is stored
pub const THIS_TYPE: &str = "this";

/// Converts type annotations into resolved types
#[derive(Clone, Copy)]
pub struct TypeLowering<'s, 'a> {
    symbols: &'s SymbolTable<'a>,
}

impl<'s, 'a> TypeLowering<'s, 'a> {
    pub fn new(symbols: &'s SymbolTable<'a>) -> Self {
        Self { symbols }
    }

    /// Lower an annotation with the given type parameters in scope
    pub fn lower(&self, node: &TypeNode<'a>, params: &TypeParams) -> Type {
        self.lower_with(node, params, &mut Vec::new())
    }

    /// Bind declared type parameters as opaque parameter types
    pub fn declare_type_parameters(
        &self,
        type_parameters: &[TypeParameter<'a>],
        params: &TypeParams,
    ) -> TypeParams {
        self.declare_with(type_parameters, params, &mut Vec::new())
    }

    fn declare_with(
        &self,
        type_parameters: &[TypeParameter<'a>],
        params: &TypeParams,
        expanding: &mut Vec<&'a str>,
    ) -> TypeParams {
        let mut bound = params.clone();
        for parameter in type_parameters {
            let constraint = parameter
                .constraint
                .map(|constraint| Box::new(self.lower_with(&constraint, &bound, expanding)));
            bound.insert(
                parameter.name.name.to_string(),
                Type::TypeParameter {
                    name: parameter.name.name.to_string(),
                    constraint,
                },
            );
        }
        bound
    }

    /// Bind declared type parameters to concrete arguments, falling back to
    /// defaults and then to `Unknown`
    pub fn substitute_type_parameters(
        &self,
        type_parameters: &[TypeParameter<'a>],
        args: &[Type],
        params: &TypeParams,
    ) -> TypeParams {
        self.bind_arguments(type_parameters, args, params, &mut Vec::new())
    }

    fn bind_arguments(
        &self,
        type_parameters: &[TypeParameter<'a>],
        args: &[Type],
        params: &TypeParams,
        expanding: &mut Vec<&'a str>,
    ) -> TypeParams {
        let mut bound = params.clone();
        for (index, parameter) in type_parameters.iter().enumerate() {
            let ty = match args.get(index) {
                Some(arg) => arg.clone(),
                None => match parameter.default {
                    Some(default) => self.lower_with(&default, &bound, expanding),
                    None => Type::Unknown,
                },
            };
            bound.insert(parameter.name.name.to_string(), ty);
        }
        bound
    }

    /// Function type of a signature-bearing declaration
    pub fn function_type(
        &self,
        type_parameters: &[TypeParameter<'a>],
        parameters: &[Parameter<'a>],
        return_type: Option<TypeNode<'a>>,
        params: &TypeParams,
    ) -> Type {
        self.function_type_with(type_parameters, parameters, return_type, params, &mut Vec::new())
    }

    fn function_type_with(
        &self,
        type_parameters: &[TypeParameter<'a>],
        parameters: &[Parameter<'a>],
        return_type: Option<TypeNode<'a>>,
        params: &TypeParams,
        expanding: &mut Vec<&'a str>,
    ) -> Type {
        let bound = self.declare_with(type_parameters, params, expanding);
        let param_types = parameters
            .iter()
            .map(|parameter| self.parameter_type_with(parameter, &bound, expanding))
            .collect();
        let return_type = return_type
            .map(|node| self.lower_with(&node, &bound, expanding))
            .unwrap_or_default();
        Type::function(param_types, return_type)
    }

    /// Declared type of a parameter, `Unknown` when unannotated
    pub fn parameter_type(&self, parameter: &Parameter<'a>, params: &TypeParams) -> Type {
        self.parameter_type_with(parameter, params, &mut Vec::new())
    }

    fn parameter_type_with(
        &self,
        parameter: &Parameter<'a>,
        params: &TypeParams,
        expanding: &mut Vec<&'a str>,
    ) -> Type {
        match parameter.type_annotation {
            Some(annotation) => {
                let ty = self.lower_with(&annotation, params, expanding);
                if parameter.optional {
                    ty.or_undefined()
                } else {
                    ty
                }
            }
            None => Type::Unknown,
        }
    }

    fn lower_with(
        &self,
        node: &TypeNode<'a>,
        params: &TypeParams,
        expanding: &mut Vec<&'a str>,
    ) -> Type {
        match node {
            TypeNode::Keyword(keyword, _) => keyword_type(*keyword),
            TypeNode::Reference(reference) => self.lower_reference(reference, params, expanding),
            TypeNode::Union(composite) => Type::union(
                composite
                    .types
                    .iter()
                    .map(|ty| self.lower_with(ty, params, expanding))
                    .collect(),
            ),
            TypeNode::Intersection(composite) => Type::Intersection(
                composite
                    .types
                    .iter()
                    .map(|ty| self.lower_with(ty, params, expanding))
                    .collect(),
            ),
            TypeNode::Array(array) => Type::array(self.lower_with(&array.element, params, expanding)),
            TypeNode::Tuple(tuple) => Type::Tuple(
                tuple
                    .elements
                    .iter()
                    .map(|element| {
                        let ty = self.lower_with(&element.element, params, expanding);
                        if element.optional {
                            ty.or_undefined()
                        } else {
                            ty
                        }
                    })
                    .collect(),
            ),
            TypeNode::Literal(literal) => match literal.kind {
                LiteralTypeKind::String(value) => Type::StringLiteral(value.to_string()),
                LiteralTypeKind::Number(raw) => Type::NumberLiteral(raw.to_string()),
                LiteralTypeKind::BigInt(_) => Type::BigInt,
                LiteralTypeKind::Boolean(value) => Type::BooleanLiteral(value),
            },
            TypeNode::Object(object) => self.lower_members(object.members, params, expanding),
            TypeNode::Function(function) => {
                let signature = function.signature;
                self.function_type_with(
                    signature.type_parameters,
                    signature.params,
                    signature.return_type,
                    params,
                    expanding,
                )
            }
            TypeNode::Query(query) => match query.name {
                [single] if self.symbols.get_class(single.name).is_some() => {
                    Type::ClassConstructor(single.name.to_string())
                }
                _ => Type::Unknown,
            },
            TypeNode::Operator(operator) => match operator.operator {
                TypeOperatorKind::Keyof => Type::union(vec![Type::String, Type::Number, Type::Symbol]),
                TypeOperatorKind::Readonly => {
                    self.lower_with(&operator.type_annotation, params, expanding)
                }
                TypeOperatorKind::Unique => Type::Symbol,
            },
            TypeNode::IndexedAccess(access) => {
                let object = self.lower_with(&access.object, params, expanding);
                let index = self.lower_with(&access.index, params, expanding);
                indexed_access(&object, &index)
            }
            TypeNode::Mapped(mapped) => {
                let mut inner = params.clone();
                inner.insert(mapped.parameter.name.to_string(), Type::String);
                let value = mapped
                    .type_annotation
                    .map(|annotation| self.lower_with(&annotation, &inner, expanding))
                    .unwrap_or(Type::Any);
                Type::Object(ObjectShape {
                    properties: Vec::new(),
                    index: Some(Box::new(value)),
                })
            }
            TypeNode::Predicate(predicate) => {
                if predicate.asserts {
                    Type::Void
                } else {
                    Type::Boolean
                }
            }
            TypeNode::TemplateLiteral(_) => Type::String,
            TypeNode::This(_) => params.get(THIS_TYPE).cloned().unwrap_or_default(),
            TypeNode::Conditional(_) | TypeNode::Infer(_) => Type::Unknown,
        }
    }

    fn lower_reference(
        &self,
        reference: &TypeReference<'a>,
        params: &TypeParams,
        expanding: &mut Vec<&'a str>,
    ) -> Type {
        // Qualified names (`ns.Type`) are not followed
        let Some(name) = reference.simple_name() else {
            return Type::Unknown;
        };
        if let Some(bound) = params.get(name) {
            return bound.clone();
        }

        let args: Vec<Type> = reference
            .type_arguments
            .map(|args| {
                args.iter()
                    .map(|arg| self.lower_with(arg, params, expanding))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(declaration) = self.symbols.get_alias(name) {
            return self.expand_alias(declaration, &args, expanding);
        }
        if self.symbols.get_class(name).is_some() {
            return Type::Class {
                name: name.to_string(),
                type_args: args,
            };
        }
        if self.symbols.get_interface(name).is_some() {
            return Type::Interface {
                name: name.to_string(),
                type_args: args,
            };
        }
        if self.symbols.declares_type(name) {
            // Enums and imported names
            return Type::Unknown;
        }

        global_reference(name, args)
    }

    fn expand_alias(
        &self,
        declaration: &'a TypeAliasDeclaration<'a>,
        args: &[Type],
        expanding: &mut Vec<&'a str>,
    ) -> Type {
        let name = declaration.name.name;
        if expanding.contains(&name) {
            return Type::Unknown;
        }

        let alias_params =
            self.bind_arguments(declaration.type_parameters, args, &TypeParams::new(), expanding);
        expanding.push(name);
        let target = self.lower_with(&declaration.type_annotation, &alias_params, expanding);
        expanding.pop();

        let target = match target {
            Type::Alias { target, .. } => *target,
            other => other,
        };
        if target.is_unknown() {
            return Type::Unknown;
        }
        Type::alias(name, target)
    }

    fn lower_members(
        &self,
        members: &[TypeMember<'a>],
        params: &TypeParams,
        expanding: &mut Vec<&'a str>,
    ) -> Type {
        let mut shape = ObjectShape::default();
        let mut call_signature = None;

        for member in members {
            match member {
                TypeMember::Property(property) => {
                    let Some(name) = property.key.name() else {
                        continue;
                    };
                    let ty = property
                        .type_annotation
                        .map(|annotation| self.lower_with(&annotation, params, expanding))
                        .unwrap_or(Type::Any);
                    let ty = if property.optional { ty.or_undefined() } else { ty };
                    shape.properties.push((name.to_string(), ty));
                }
                TypeMember::Method(method) => {
                    let Some(name) = method.key.name() else {
                        continue;
                    };
                    let signature = method.signature;
                    let ty = self.function_type_with(
                        signature.type_parameters,
                        signature.params,
                        signature.return_type,
                        params,
                        expanding,
                    );
                    shape.properties.push((name.to_string(), ty));
                }
                TypeMember::Index(index) => {
                    let value = self.lower_with(&index.type_annotation, params, expanding);
                    shape.index = Some(Box::new(value));
                }
                TypeMember::Call(signature) => {
                    call_signature.get_or_insert(*signature);
                }
                TypeMember::Construct(_) => {}
            }
        }

        match call_signature {
            Some(signature) if shape.properties.is_empty() && shape.index.is_none() => self
                .function_type_with(
                    signature.type_parameters,
                    signature.params,
                    signature.return_type,
                    params,
                    expanding,
                ),
            _ => Type::Object(shape),
        }
    }
}

fn keyword_type(keyword: KeywordType) -> Type {
    match keyword {
        KeywordType::Any => Type::Any,
        KeywordType::Unknown | KeywordType::Const => Type::Unknown,
        KeywordType::Never => Type::Never,
        KeywordType::Void => Type::Void,
        KeywordType::Undefined => Type::Undefined,
        KeywordType::Null => Type::Null,
        KeywordType::Boolean => Type::Boolean,
        KeywordType::Number => Type::Number,
        KeywordType::String => Type::String,
        KeywordType::BigInt => Type::BigInt,
        KeywordType::Symbol => Type::Symbol,
        KeywordType::Object => Type::NonPrimitive,
    }
}

/// A reference to a name the file does not declare
fn global_reference(name: &str, args: Vec<Type>) -> Type {
    let first = |args: Vec<Type>| args.into_iter().next().unwrap_or_default();

    match name {
        "Array" | "ReadonlyArray" => Type::array(first(args)),
        "Record" => {
            let value = args.get(1).cloned().unwrap_or_default();
            Type::Object(ObjectShape {
                properties: Vec::new(),
                index: Some(Box::new(value)),
            })
        }
        "Partial" | "Required" | "Readonly" => first(args),
        "NonNullable" => first(args).remove_nullish(),
        "Function" => Type::function(Vec::new(), Type::Any),
        "Object" => Type::NonPrimitive,
        "String" => Type::String,
        "Number" => Type::Number,
        "Boolean" => Type::Boolean,
        _ => Type::named(name, args),
    }
}

/// `T[K]` for object, array and tuple types
pub fn indexed_access(object: &Type, index: &Type) -> Type {
    match (object.resolved(), index) {
        (Type::Object(shape), Type::StringLiteral(key)) => shape
            .property(key)
            .cloned()
            .or_else(|| shape.index.as_deref().cloned())
            .unwrap_or_default(),
        (Type::Object(shape), _) => shape.index.as_deref().cloned().unwrap_or_default(),
        (Type::Array(element), _) => element.as_ref().clone(),
        (Type::Tuple(elements), Type::NumberLiteral(raw)) => raw
            .parse::<usize>()
            .ok()
            .and_then(|position| elements.get(position).cloned())
            .unwrap_or_default(),
        (Type::Tuple(elements), _) => Type::union(elements.clone()),
        (Type::Any, _) => Type::Any,
        _ => Type::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SymbolCollector;
    use bumpalo::Bump;
    use maplint_syntax::parse_file_content;

    /// Lower the annotation of `let value: <annotation>` in the last statement
    fn lower_last(source: &str) -> Type {
        let arena = Bump::new();
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none(), "{:?}", error);
        let symbols = SymbolCollector::new().collect(program);
        let lowering = TypeLowering::new(&symbols);
        let Some(Statement::Variable(declaration)) = program.statements.last() else {
            panic!("expected variable declaration");
        };
        let annotation = declaration.declarators[0]
            .type_annotation
            .expect("annotation");
        lowering.lower(&annotation, &TypeParams::new())
    }

    fn map_of(key: Type, value: Type) -> Type {
        Type::named("Map", vec![key, value])
    }

    #[test]
    fn test_global_map() {
        assert_eq!(
            lower_last("let value: Map<string, number>;"),
            map_of(Type::String, Type::Number)
        );
    }

    #[test]
    fn test_alias_chain_is_flattened() {
        let ty = lower_last("type A = Map<string, number>; type B = A; let value: B;");
        assert_eq!(
            ty,
            Type::alias("B", map_of(Type::String, Type::Number))
        );
    }

    #[test]
    fn test_generic_alias_substitution() {
        let ty = lower_last("type Dict<V, K = string> = Map<K, V>; let value: Dict<boolean>;");
        assert_eq!(ty, Type::alias("Dict", map_of(Type::String, Type::Boolean)));
    }

    #[test]
    fn test_alias_cycle_is_unknown() {
        assert_eq!(lower_last("type A = B; type B = A; let value: A;"), Type::Unknown);
    }

    #[test]
    fn test_local_declarations_shadow_globals() {
        let ty = lower_last("class Map {} let value: Map;");
        assert!(matches!(ty, Type::Class { ref name, .. } if name == "Map"));
        let ty = lower_last("import { Map } from \"immutable\"; let value: Map<string, number>;");
        assert_eq!(ty, Type::Unknown);
    }

    #[test]
    fn test_record_and_object_types() {
        let ty = lower_last("let value: Record<string, number>;");
        let Type::Object(shape) = ty else {
            panic!("expected object type");
        };
        assert_eq!(shape.index.as_deref(), Some(&Type::Number));

        let ty = lower_last("let value: { a: string; b?: number; run(): void };");
        let Type::Object(shape) = ty else {
            panic!("expected object type");
        };
        assert_eq!(shape.property("a"), Some(&Type::String));
        assert_eq!(
            shape.property("b"),
            Some(&Type::union(vec![Type::Number, Type::Undefined]))
        );
        assert!(matches!(shape.property("run"), Some(Type::Function(_))));
    }

    #[test]
    fn test_union_and_indexed_access() {
        let ty = lower_last("let value: Map<string, number> | undefined;");
        assert_eq!(
            ty,
            Type::Union(vec![map_of(Type::String, Type::Number), Type::Undefined])
        );

        let ty = lower_last("type Cfg = { cache: Map<string, string> }; let value: Cfg[\"cache\"];");
        assert_eq!(ty, map_of(Type::String, Type::String));
    }
}
