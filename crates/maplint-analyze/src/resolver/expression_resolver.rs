//! Expression type resolver
//!
//! Resolves the static type of TypeScript expressions from the current scope,
//! the file's symbol table and the built-in library shapes. Resolution is
//! declaration-based: there is no narrowing and no tracking of assignments.

use super::type_lowering::{indexed_access, TypeLowering, TypeParams, THIS_TYPE};
use super::TypeResolver;
use crate::scope::Scope;
use crate::symbols::{ClassInfo, ClassMemberInfo, MemberKind, SymbolTable};
use crate::types::builtins::{self, GLOBAL_CONSTRUCTORS};
use crate::types::{ObjectShape, Type};
use maplint_syntax::ast::*;

/// Bound on nested member lookups (class hierarchies, initializers)
const MAX_DEPTH: usize = 16;

/// Resolves expression types
#[derive(Clone, Copy)]
pub struct ExpressionResolver<'s, 'a> {
    symbols: &'s SymbolTable<'a>,
    scope: &'s Scope,
    lowering: TypeLowering<'s, 'a>,
    depth: usize,
}

impl<'s, 'a> ExpressionResolver<'s, 'a> {
    pub fn new(symbols: &'s SymbolTable<'a>, scope: &'s Scope) -> Self {
        Self {
            symbols,
            scope,
            lowering: TypeLowering::new(symbols),
            depth: 0,
        }
    }

    pub fn lowering(&self) -> TypeLowering<'s, 'a> {
        self.lowering
    }

    /// Lower an annotation with the scope's type parameters
    pub fn lower(&self, node: &TypeNode<'a>) -> Type {
        self.lowering.lower(node, self.scope.type_params())
    }

    fn deeper(&self) -> Option<Self> {
        (self.depth < MAX_DEPTH).then(|| Self {
            depth: self.depth + 1,
            ..*self
        })
    }

    /// Resolve the type of an expression
    pub fn resolve(&self, expr: &Expression<'a>) -> Type {
        match expr {
            Expression::Identifier(ident) => self.resolve_identifier(ident.name),
            Expression::This(_) => self.scope.this_type().cloned().unwrap_or_default(),
            Expression::Super(_) => self.resolve_super(),
            Expression::Literal(literal) => literal_type(literal),
            Expression::Template(_) => Type::String,
            Expression::TaggedTemplate(_) => Type::Unknown,
            Expression::Array(array) => self.resolve_array(array),
            Expression::Object(object) => self.resolve_object(object),
            Expression::Function(function) => self.function_value_type(function),
            Expression::Arrow(arrow) => self.lowering.function_type(
                arrow.type_parameters,
                arrow.params,
                arrow.return_type,
                self.scope.type_params(),
            ),
            Expression::Class(class) => match class.id {
                Some(id) if self.symbols.get_class(id.name).is_some() => {
                    Type::ClassConstructor(id.name.to_string())
                }
                _ => Type::Unknown,
            },
            Expression::Member(member) => self.resolve_member(member),
            Expression::Call(call) => self.resolve_call(call),
            Expression::New(new) => self.resolve_new(new),
            Expression::Unary(unary) => self.resolve_unary(unary),
            Expression::Update(_) => Type::Number,
            Expression::Binary(binary) => self.resolve_binary(binary),
            Expression::Assignment(assignment) => self.resolve(&assignment.value),
            Expression::Conditional(conditional) => Type::union(vec![
                self.resolve(&conditional.consequent),
                self.resolve(&conditional.alternate),
            ]),
            Expression::Sequence(sequence) => sequence
                .expressions
                .last()
                .map(|last| self.resolve(last))
                .unwrap_or_default(),
            Expression::Parenthesized(paren) => self.resolve(&paren.expression),
            Expression::TypeAssertion(assertion) => self.resolve_assertion(assertion),
            Expression::Satisfies(satisfies) => self.resolve(&satisfies.expression),
            Expression::NonNull(non_null) => self.resolve(&non_null.expression).remove_nullish(),
            Expression::Yield(_) => Type::Unknown,
        }
    }

    fn resolve_identifier(&self, name: &str) -> Type {
        if let Some(ty) = self.scope.get_variable_type(name) {
            return ty;
        }
        match name {
            "undefined" => Type::Undefined,
            "NaN" | "Infinity" => Type::Number,
            _ if self.symbols.get_class(name).is_some() => Type::ClassConstructor(name.to_string()),
            _ => Type::Unknown,
        }
    }

    fn resolve_super(&self) -> Type {
        let Some(Type::Class { name, type_args }) = self.scope.this_type() else {
            return Type::Unknown;
        };
        let Some(info) = self.symbols.get_class(name) else {
            return Type::Unknown;
        };
        let params = self
            .lowering
            .substitute_type_parameters(info.type_parameters, type_args, &TypeParams::new());
        self.parent_type(info, &params).unwrap_or_default()
    }

    fn function_value_type(&self, function: &Function<'a>) -> Type {
        self.lowering.function_type(
            function.type_parameters,
            function.params,
            function.return_type,
            self.scope.type_params(),
        )
    }

    fn resolve_array(&self, array: &ArrayLiteral<'a>) -> Type {
        if array.elements.is_empty() {
            return Type::array(Type::Any);
        }
        let elements = array
            .elements
            .iter()
            .map(|element| match element {
                ArrayElement::Expression(expr) => self.resolve(expr).widen(),
                ArrayElement::Spread(spread) => {
                    builtins::iterated_element(&self.resolve(&spread.argument))
                }
                ArrayElement::Hole(_) => Type::Undefined,
            })
            .collect();
        Type::array(Type::union(elements))
    }

    fn resolve_object(&self, object: &ObjectLiteral<'a>) -> Type {
        let mut shape = ObjectShape::default();
        let set = |shape: &mut ObjectShape, name: &str, ty: Type| {
            shape.properties.retain(|(existing, _)| existing != name);
            shape.properties.push((name.to_string(), ty));
        };

        for property in object.properties.iter() {
            match property {
                ObjectProperty::KeyValue { key, value, .. } => {
                    if let Some(name) = key.name() {
                        set(&mut shape, name, self.resolve(value).widen());
                    }
                }
                ObjectProperty::Shorthand(ident) => {
                    set(&mut shape, ident.name, self.resolve_identifier(ident.name));
                }
                ObjectProperty::Method { key, function, .. } => {
                    if let Some(name) = key.name() {
                        set(&mut shape, name, self.function_value_type(function));
                    }
                }
                ObjectProperty::Spread(spread) => {
                    if let Type::Object(spread_shape) = self.resolve(&spread.argument).resolved() {
                        for (name, ty) in &spread_shape.properties {
                            set(&mut shape, name, ty.clone());
                        }
                        if spread_shape.index.is_some() {
                            shape.index = spread_shape.index.clone();
                        }
                    }
                }
            }
        }

        Type::Object(shape)
    }

    fn resolve_member(&self, member: &MemberExpression<'a>) -> Type {
        let object = self.resolve(&member.object);
        match member.property {
            MemberProperty::Named(ident) => self.member_type(&object, ident.name),
            MemberProperty::Private(_) => Type::Unknown,
            MemberProperty::Computed(index) => {
                let key = self.resolve(&index);
                self.index_type(&object, &key)
            }
        }
    }

    /// Type of `object.name`
    pub fn member_type(&self, object: &Type, name: &str) -> Type {
        match object {
            Type::Alias { target, .. } => self.member_type(target, name),
            Type::Any => Type::Any,
            Type::Union(types) => {
                let found: Vec<Type> = types
                    .iter()
                    .filter(|ty| !ty.is_nullish())
                    .map(|ty| self.member_type(ty, name))
                    .collect();
                if found.is_empty() {
                    Type::Unknown
                } else {
                    Type::union(found)
                }
            }
            Type::Intersection(types) => types
                .iter()
                .map(|ty| self.member_type(ty, name))
                .find(|ty| !ty.is_unknown())
                .unwrap_or_default(),
            Type::Named { name: type_name, type_args } => {
                builtins::named_member(type_name, type_args, name).unwrap_or_default()
            }
            Type::Array(element) => builtins::array_member(element, name).unwrap_or_default(),
            Type::Tuple(elements) => {
                builtins::array_member(&Type::union(elements.clone()), name).unwrap_or_default()
            }
            Type::String | Type::StringLiteral(_) => {
                builtins::string_member(name).unwrap_or_default()
            }
            Type::Object(shape) => shape
                .property(name)
                .cloned()
                .or_else(|| shape.index.as_deref().cloned())
                .unwrap_or_default(),
            Type::Class { name: class, type_args } => {
                self.class_member_type(class, type_args, name, false)
            }
            Type::ClassConstructor(class) => self.class_member_type(class, &[], name, true),
            Type::Interface {
                name: interface,
                type_args,
            } => self.interface_member_type(interface, type_args, name),
            Type::TypeParameter {
                constraint: Some(constraint),
                ..
            } => self.member_type(constraint, name),
            _ => Type::Unknown,
        }
    }

    /// Type of `object[key]`
    pub fn index_type(&self, object: &Type, key: &Type) -> Type {
        match object {
            Type::Alias { target, .. } => self.index_type(target, key),
            Type::Union(types) => {
                let found: Vec<Type> = types
                    .iter()
                    .filter(|ty| !ty.is_nullish())
                    .map(|ty| self.index_type(ty, key))
                    .collect();
                if found.is_empty() {
                    Type::Unknown
                } else {
                    Type::union(found)
                }
            }
            Type::String | Type::StringLiteral(_) => Type::String,
            Type::Named { name, type_args } if name == "Array" || name == "ReadonlyArray" => {
                type_args.first().cloned().unwrap_or_default()
            }
            Type::Class { .. } | Type::ClassConstructor(_) | Type::Interface { .. } => match key {
                Type::StringLiteral(name) => self.member_type(object, name),
                _ => self.nominal_index_signature(object),
            },
            Type::TypeParameter {
                constraint: Some(constraint),
                ..
            } => self.index_type(constraint, key),
            other => indexed_access(other, key),
        }
    }

    fn nominal_index_signature(&self, object: &Type) -> Type {
        let signature = match object {
            Type::Class { name, .. } => self
                .symbols
                .get_class(name)
                .and_then(|info| info.index_signature),
            Type::Interface { name, .. } => self
                .symbols
                .get_interface(name)
                .and_then(|info| info.index_signature()),
            _ => None,
        };
        let params = self.receiver_params(object);
        signature
            .map(|signature| self.lowering.lower(&signature.type_annotation, &params))
            .unwrap_or_default()
    }

    /// Type parameters of a class or interface, bound to the receiver's arguments
    fn receiver_params(&self, receiver: &Type) -> TypeParams {
        let type_parameters = match receiver {
            Type::Class { name, .. } => self
                .symbols
                .get_class(name)
                .map(|info| info.type_parameters),
            Type::Interface { name, .. } => self
                .symbols
                .get_interface(name)
                .map(|info| info.type_parameters),
            _ => None,
        };
        let mut params = self.lowering.substitute_type_parameters(
            type_parameters.unwrap_or_default(),
            receiver.type_args(),
            &TypeParams::new(),
        );
        params.insert(THIS_TYPE.to_string(), receiver.clone());
        params
    }

    fn class_member_type(&self, class: &str, type_args: &[Type], member: &str, is_static: bool) -> Type {
        let Some(deeper) = self.deeper() else {
            return Type::Unknown;
        };
        let Some(info) = self.symbols.get_class(class) else {
            return Type::Unknown;
        };

        let receiver = if is_static {
            Type::ClassConstructor(class.to_string())
        } else {
            Type::Class {
                name: class.to_string(),
                type_args: type_args.to_vec(),
            }
        };
        let mut params = self
            .lowering
            .substitute_type_parameters(info.type_parameters, type_args, &TypeParams::new());
        params.insert(THIS_TYPE.to_string(), receiver);

        let declared = if is_static {
            info.static_member(member)
        } else {
            info.instance_member(member)
        };
        if let Some(declared) = declared {
            return deeper.class_member_info_type(declared, &params);
        }

        if is_static {
            if member == "prototype" {
                return Type::Class {
                    name: class.to_string(),
                    type_args: Vec::new(),
                };
            }
            return match info.parent {
                Some(parent) if self.symbols.get_class(parent).is_some() => {
                    deeper.member_type(&Type::ClassConstructor(parent.to_string()), member)
                }
                _ => Type::Unknown,
            };
        }

        if let Some(parent) = self.parent_type(info, &params) {
            let inherited = deeper.member_type(&parent, member);
            if !inherited.is_unknown() {
                return inherited;
            }
        }

        info.index_signature
            .map(|signature| self.lowering.lower(&signature.type_annotation, &params))
            .unwrap_or_default()
    }

    fn class_member_info_type(&self, member: &ClassMemberInfo<'a>, params: &TypeParams) -> Type {
        match member.kind {
            MemberKind::Property {
                type_annotation: Some(annotation),
                optional,
                ..
            } => {
                let ty = self.lowering.lower(&annotation, params);
                if optional {
                    ty.or_undefined()
                } else {
                    ty
                }
            }
            MemberKind::Property {
                initializer: Some(initializer),
                ..
            } => self.resolve(&initializer).widen(),
            MemberKind::Property { .. } => Type::Unknown,
            MemberKind::Method(function) => self.lowering.function_type(
                function.type_parameters,
                function.params,
                function.return_type,
                params,
            ),
            MemberKind::Getter(function) => function
                .return_type
                .map(|annotation| self.lowering.lower(&annotation, params))
                .unwrap_or_default(),
            MemberKind::Setter(function) => function
                .params
                .first()
                .map(|parameter| self.lowering.parameter_type(parameter, params))
                .unwrap_or_default(),
        }
    }

    /// Instance type of a class's `extends` target
    fn parent_type(&self, info: &ClassInfo<'a>, params: &TypeParams) -> Option<Type> {
        let parent = info.parent?;
        let args: Vec<Type> = info
            .parent_type_args
            .map(|args| {
                args.iter()
                    .map(|arg| self.lowering.lower(arg, params))
                    .collect()
            })
            .unwrap_or_default();

        if self.symbols.get_class(parent).is_some() {
            return Some(Type::Class {
                name: parent.to_string(),
                type_args: args,
            });
        }
        if self.symbols.declares_value(parent) || self.scope.has_variable(parent) {
            return None;
        }
        GLOBAL_CONSTRUCTORS
            .contains(&parent)
            .then(|| global_instance(parent, args))
    }

    fn interface_member_type(&self, interface: &str, type_args: &[Type], member: &str) -> Type {
        let Some(deeper) = self.deeper() else {
            return Type::Unknown;
        };
        let Some(info) = self.symbols.get_interface(interface) else {
            return Type::Unknown;
        };
        let mut params = self
            .lowering
            .substitute_type_parameters(info.type_parameters, type_args, &TypeParams::new());
        params.insert(
            THIS_TYPE.to_string(),
            Type::Interface {
                name: interface.to_string(),
                type_args: type_args.to_vec(),
            },
        );

        match info.member(member) {
            Some(TypeMember::Property(property)) => {
                let ty = property
                    .type_annotation
                    .map(|annotation| self.lowering.lower(&annotation, &params))
                    .unwrap_or(Type::Any);
                if property.optional {
                    return ty.or_undefined();
                }
                return ty;
            }
            Some(TypeMember::Method(method)) => {
                let signature = method.signature;
                return self.lowering.function_type(
                    signature.type_parameters,
                    signature.params,
                    signature.return_type,
                    &params,
                );
            }
            _ => {}
        }

        for extended in &info.extends {
            let base = self.lowering.lower(extended, &params);
            let inherited = deeper.member_type(&base, member);
            if !inherited.is_unknown() {
                return inherited;
            }
        }

        info.index_signature()
            .map(|signature| self.lowering.lower(&signature.type_annotation, &params))
            .unwrap_or_default()
    }

    fn resolve_call(&self, call: &CallExpression<'a>) -> Type {
        let callee = call.callee.without_parentheses();

        if let Expression::Member(member) = callee {
            if let (Expression::Identifier(namespace), Some(name)) =
                (member.object, member.property_name())
            {
                if self.is_global(namespace.name) {
                    let first = call
                        .arguments
                        .first()
                        .map(|argument| self.resolve(&argument.value()));
                    if let Some(ty) = builtins::static_call(namespace.name, name, first.as_ref()) {
                        return ty;
                    }
                }
            }
        }

        call_result(&self.resolve(&callee))
    }

    fn resolve_new(&self, new: &NewExpression<'a>) -> Type {
        let Expression::Identifier(ident) = new.callee.without_parentheses() else {
            return Type::Unknown;
        };
        let name = ident.name;
        let args: Vec<Type> = new
            .type_arguments
            .map(|args| args.iter().map(|arg| self.lower(arg)).collect())
            .unwrap_or_default();

        if let Some(ty) = self.scope.get_variable_type(name) {
            return match ty {
                Type::ClassConstructor(class) => Type::Class {
                    name: class,
                    type_args: args,
                },
                _ => Type::Unknown,
            };
        }
        if self.symbols.get_class(name).is_some() {
            return Type::Class {
                name: name.to_string(),
                type_args: args,
            };
        }
        if self.symbols.declares_value(name) || !GLOBAL_CONSTRUCTORS.contains(&name) {
            return Type::Unknown;
        }
        global_instance(name, args)
    }

    fn resolve_unary(&self, unary: &UnaryExpression<'a>) -> Type {
        match unary.operator {
            UnaryOperator::Not | UnaryOperator::Delete => Type::Boolean,
            UnaryOperator::Typeof => Type::String,
            UnaryOperator::Void => Type::Undefined,
            UnaryOperator::Negate | UnaryOperator::Plus | UnaryOperator::BitwiseNot => Type::Number,
            UnaryOperator::Await => awaited(self.resolve(&unary.argument)),
        }
    }

    fn resolve_binary(&self, binary: &BinaryExpression<'a>) -> Type {
        use BinaryOperator::*;
        match binary.operator {
            Add => {
                let left = self.resolve(&binary.left).widen();
                let right = self.resolve(&binary.right).widen();
                match (left, right) {
                    (Type::String, _) | (_, Type::String) => Type::String,
                    (Type::Number, Type::Number) => Type::Number,
                    (Type::BigInt, Type::BigInt) => Type::BigInt,
                    _ => Type::Unknown,
                }
            }
            Subtract | Multiply | Divide | Modulo | Exponent | LeftShift | RightShift
            | UnsignedRightShift | BitwiseAnd | BitwiseOr | BitwiseXor => Type::Number,
            Equal | NotEqual | StrictEqual | StrictNotEqual | LessThan | LessThanOrEqual
            | GreaterThan | GreaterThanOrEqual | In | Instanceof => Type::Boolean,
            LogicalAnd => self.resolve(&binary.right),
            LogicalOr | Coalesce => Type::union(vec![
                self.resolve(&binary.left).remove_nullish(),
                self.resolve(&binary.right),
            ]),
        }
    }

    fn resolve_assertion(&self, assertion: &TypeAssertion<'a>) -> Type {
        match assertion.type_annotation {
            TypeNode::Keyword(KeywordType::Const, _) => self.resolve(&assertion.expression),
            annotation => self.lower(&annotation),
        }
    }

    /// A name that refers to a global rather than anything declared in the file
    pub fn is_global(&self, name: &str) -> bool {
        !self.scope.has_variable(name) && !self.symbols.declares_value(name)
    }
}

impl<'s, 'a> TypeResolver<'a> for ExpressionResolver<'s, 'a> {
    fn resolve_type(&self, expr: &Expression<'a>) -> Option<Type> {
        let ty = self.resolve(expr);
        (!ty.is_unknown()).then_some(ty)
    }
}

fn literal_type(literal: &Literal<'_>) -> Type {
    match literal.kind {
        LiteralKind::String(value) => Type::StringLiteral(value.to_string()),
        LiteralKind::Number(raw) => Type::NumberLiteral(raw.to_string()),
        LiteralKind::BigInt(_) => Type::BigInt,
        LiteralKind::Boolean(value) => Type::BooleanLiteral(value),
        LiteralKind::Null => Type::Null,
        LiteralKind::Regex(_) => Type::named("RegExp", Vec::new()),
    }
}

/// Instance type produced by `new Name<args>()` for a global constructor
fn global_instance(name: &str, args: Vec<Type>) -> Type {
    match name {
        "Array" => Type::array(args.into_iter().next().unwrap_or(Type::Any)),
        "Object" => Type::Object(ObjectShape::default()),
        _ => {
            let args = if args.is_empty() {
                builtins::default_type_args(name)
            } else {
                args
            };
            Type::named(name, args)
        }
    }
}

/// Result type of calling a value of the given type
fn call_result(callee: &Type) -> Type {
    match callee {
        Type::Function(shape) => shape.return_type.clone(),
        Type::Alias { target, .. } => call_result(target),
        Type::Union(types) => Type::union(
            types
                .iter()
                .filter(|ty| !ty.is_nullish())
                .map(call_result)
                .collect(),
        ),
        Type::Any => Type::Any,
        Type::TypeParameter {
            constraint: Some(constraint),
            ..
        } => call_result(constraint),
        _ => Type::Unknown,
    }
}

/// `await value`
fn awaited(ty: Type) -> Type {
    match ty {
        Type::Named { ref name, ref type_args } if name == "Promise" => {
            type_args.first().cloned().unwrap_or_default()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SymbolCollector;
    use bumpalo::Bump;
    use maplint_syntax::parse_file_content;

    /// Resolve the initializer of the last `const` in `source`, with every
    /// earlier top-level `const` bound in scope
    fn resolve_last(source: &str) -> Type {
        let arena = Bump::new();
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none(), "{:?}", error);
        let symbols = SymbolCollector::new().collect(program);

        let mut scope = Scope::new();
        let mut last = Type::Unknown;
        for statement in program.statements.iter() {
            let Statement::Variable(declaration) = statement else {
                continue;
            };
            let declarator = &declaration.declarators[0];
            let resolver = ExpressionResolver::new(&symbols, &scope);
            let ty = match (declarator.type_annotation, declarator.init) {
                (Some(annotation), _) => resolver.lower(&annotation),
                (None, Some(init)) => resolver.resolve(&init),
                (None, None) => Type::Unknown,
            };
            if let Pattern::Identifier(ident) = declarator.pattern {
                scope.set_variable(ident.name, ty.clone());
            }
            last = ty;
        }
        last
    }

    fn map_of(key: Type, value: Type) -> Type {
        Type::named("Map", vec![key, value])
    }

    #[test]
    fn test_new_map() {
        assert_eq!(resolve_last("const m = new Map();"), map_of(Type::Any, Type::Any));
        assert_eq!(
            resolve_last("const m = new Map<string, number>();"),
            map_of(Type::String, Type::Number)
        );
    }

    #[test]
    fn test_shadowed_constructor() {
        assert_eq!(
            resolve_last("import { Map } from \"immutable\"; const m = new Map();"),
            Type::Unknown
        );
        assert!(matches!(
            resolve_last("class Map {} const m = new Map();"),
            Type::Class { ref name, .. } if name == "Map"
        ));
    }

    #[test]
    fn test_map_api_results() {
        assert_eq!(
            resolve_last("const m = new Map<string, number>(); const x = m.get(\"a\");"),
            Type::union(vec![Type::Number, Type::Undefined])
        );
        assert_eq!(
            resolve_last("const m = new Map<string, number>(); const x = m.size;"),
            Type::Number
        );
        assert_eq!(
            resolve_last("const m = new Map<string, number>(); const x = m.set(\"a\", 1);"),
            map_of(Type::String, Type::Number)
        );
        assert_eq!(
            resolve_last("const m = new Map<string, number>(); const x = [...m.keys()];"),
            Type::array(Type::String)
        );
    }

    #[test]
    fn test_assertions() {
        assert_eq!(
            resolve_last("const foo = {} as Map<string, number>;"),
            map_of(Type::String, Type::Number)
        );
        assert!(matches!(
            resolve_last("const foo = {} as Record<string, number>;"),
            Type::Object(_)
        ));
        assert_eq!(resolve_last("const foo = \"a\" as const;"), Type::StringLiteral("a".into()));
    }

    #[test]
    fn test_class_members() {
        let source = r#"
            class Registry<T> {
                static shared = new Map<string, number>();
                items: Map<string, T> = new Map();
                constructor(private readonly index: Map<number, T>) {}
                get first(): T | undefined { return undefined; }
                lookup(): Map<string, T> { return this.items; }
            }
            const registry = new Registry<boolean>();
            const a = registry.items;
        "#;
        assert_eq!(resolve_last(source), map_of(Type::String, Type::Boolean));

        let source = "class R { static shared = new Map<string, number>(); } const a = R.shared;";
        assert_eq!(resolve_last(source), map_of(Type::String, Type::Number));

        let source = "class R<T> { constructor(public index: Map<number, T>) {} } const r = new R<string>(); const a = r.index;";
        assert_eq!(resolve_last(source), map_of(Type::Number, Type::String));

        let source = "class R { lookup(): Map<string, number> { return new Map(); } } const r = new R(); const a = r.lookup();";
        assert_eq!(resolve_last(source), map_of(Type::String, Type::Number));
    }

    #[test]
    fn test_inheritance() {
        let source = r#"
            class Base { cache = new Map<string, string>(); }
            class Derived extends Base {}
            const d = new Derived();
            const a = d.cache;
        "#;
        assert_eq!(resolve_last(source), map_of(Type::String, Type::String));

        let source = "class Counter extends Map<string, number> {} const c = new Counter(); const s = c.size;";
        assert_eq!(resolve_last(source), Type::Number);
    }

    #[test]
    fn test_interfaces_and_aliases() {
        let source = r#"
            type Dict<V> = Map<string, V>;
            interface Options<V> extends Base { cache: Dict<V>; }
            interface Base { shared: Map<number, number>; }
            const options: Options<boolean> = undefined!;
            const a = options.cache;
        "#;
        assert_eq!(
            resolve_last(source).resolved(),
            &map_of(Type::String, Type::Boolean)
        );

        let source = r#"
            interface Options extends Base {}
            interface Base { shared: Map<number, number>; }
            const options: Options = undefined!;
            const a = options.shared;
        "#;
        assert_eq!(resolve_last(source), map_of(Type::Number, Type::Number));
    }

    #[test]
    fn test_object_and_array_literals() {
        let source = "const o = { m: new Map<string, number>(), n: 1 }; const a = o.m;";
        assert_eq!(resolve_last(source), map_of(Type::String, Type::Number));

        let source = "const list = [new Map<string, number>()]; const a = list[0];";
        assert_eq!(resolve_last(source), map_of(Type::String, Type::Number));

        let source = "const o: Record<string, number> = {}; const a = o[\"key\"];";
        assert_eq!(resolve_last(source), Type::Number);
    }

    #[test]
    fn test_operators() {
        let source = "const m: Map<string, number> | undefined = undefined; const a = m ?? new Map<string, number>();";
        assert_eq!(resolve_last(source), map_of(Type::String, Type::Number));

        let source = "const m: Map<string, number> | null = null; const a = m!;";
        assert_eq!(resolve_last(source), map_of(Type::String, Type::Number));

        assert_eq!(resolve_last("const a = 1 + 2;"), Type::Number);
        assert_eq!(resolve_last("const a = \"x\" + 2;"), Type::String);
        assert_eq!(resolve_last("const a = typeof 1;"), Type::String);
    }

    #[test]
    fn test_static_calls() {
        let source = "const m = new Map<string, number>(); const a = Array.from(m.values());";
        assert_eq!(resolve_last(source), Type::array(Type::Number));

        let source = "const m = new Map<string, number>(); const a = Object.keys(m).length;";
        assert_eq!(resolve_last(source), Type::Number);
    }

    #[test]
    fn test_unknown_is_none_for_trait() {
        let arena = Bump::new();
        let (program, _) = parse_file_content(&arena, "mystery;");
        let symbols = SymbolCollector::new().collect(program);
        let scope = Scope::new();
        let resolver = ExpressionResolver::new(&symbols, &scope);
        let Statement::Expression(statement) = program.statements[0] else {
            panic!("expected expression statement");
        };
        assert_eq!(resolver.resolve_type(&statement.expression), None);
    }
}
