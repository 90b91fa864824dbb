//! Arena-allocated TypeScript syntax tree
//!
//! Every node lives in a `bumpalo::Bump` owned by the caller. Nodes refer to
//! their children through `&'a` references and `&'a [T]` slices, so the
//! enums are `Copy` and cheap to pass around.

mod expression;
mod statement;
mod types;

pub use expression::*;
pub use statement::*;
pub use types::*;

use crate::span::{HasSpan, Span};

/// A parsed source file
#[derive(Debug, Clone, Copy)]
pub struct Program<'a> {
    pub statements: &'a [Statement<'a>],
    pub source: &'a str,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier<'a> {
    pub name: &'a str,
    pub span: Span,
}

impl HasSpan for Identifier<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

impl HasSpan for Program<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

/// `public`, `protected` or `private`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Protected,
    Private,
}

/// Name of a property in an object literal, class body or object type
#[derive(Debug, Clone, Copy)]
pub enum PropertyKey<'a> {
    Identifier(Identifier<'a>),
    /// Cooked string value
    String(&'a str, Span),
    /// Raw numeric text
    Number(&'a str, Span),
    Private(Identifier<'a>),
    Computed(Expression<'a>, Span),
}

impl<'a> PropertyKey<'a> {
    /// The statically known name, if any
    pub fn name(&self) -> Option<&'a str> {
        match self {
            PropertyKey::Identifier(ident) => Some(ident.name),
            PropertyKey::String(value, _) | PropertyKey::Number(value, _) => Some(value),
            PropertyKey::Private(_) | PropertyKey::Computed(..) => None,
        }
    }
}

impl HasSpan for PropertyKey<'_> {
    fn span(&self) -> Span {
        match self {
            PropertyKey::Identifier(ident) | PropertyKey::Private(ident) => ident.span,
            PropertyKey::String(_, span) | PropertyKey::Number(_, span) | PropertyKey::Computed(_, span) => *span,
        }
    }
}

/// Binding patterns in declarations, parameters and catch clauses
#[derive(Debug, Clone, Copy)]
pub enum Pattern<'a> {
    Identifier(Identifier<'a>),
    Object(&'a ObjectPattern<'a>),
    Array(&'a ArrayPattern<'a>),
    /// `pattern = default`
    Assignment(&'a AssignmentPattern<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectPattern<'a> {
    pub properties: &'a [ObjectPatternProperty<'a>],
    pub rest: Option<Pattern<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectPatternProperty<'a> {
    pub key: PropertyKey<'a>,
    pub value: Pattern<'a>,
    pub shorthand: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayPattern<'a> {
    /// `None` marks an elision
    pub elements: &'a [Option<Pattern<'a>>],
    pub rest: Option<Pattern<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct AssignmentPattern<'a> {
    pub target: Pattern<'a>,
    pub default: Expression<'a>,
    pub span: Span,
}

impl<'a> Pattern<'a> {
    /// Every identifier bound by this pattern
    pub fn bound_names(&self, names: &mut Vec<Identifier<'a>>) {
        match self {
            Pattern::Identifier(ident) => names.push(*ident),
            Pattern::Object(object) => {
                for property in object.properties.iter() {
                    property.value.bound_names(names);
                }
                if let Some(rest) = &object.rest {
                    rest.bound_names(names);
                }
            }
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    element.bound_names(names);
                }
                if let Some(rest) = &array.rest {
                    rest.bound_names(names);
                }
            }
            Pattern::Assignment(assignment) => assignment.target.bound_names(names),
        }
    }
}

impl HasSpan for Pattern<'_> {
    fn span(&self) -> Span {
        match self {
            Pattern::Identifier(ident) => ident.span,
            Pattern::Object(object) => object.span,
            Pattern::Array(array) => array.span,
            Pattern::Assignment(assignment) => assignment.span,
        }
    }
}

/// Function declarations, expressions, methods and accessors
#[derive(Debug, Clone, Copy)]
pub struct Function<'a> {
    pub id: Option<Identifier<'a>>,
    pub type_parameters: &'a [TypeParameter<'a>],
    pub params: &'a [Parameter<'a>],
    pub return_type: Option<TypeNode<'a>>,
    /// `None` for overload signatures, abstract and ambient functions
    pub body: Option<&'a BlockStatement<'a>>,
    pub is_async: bool,
    pub is_generator: bool,
    pub declare: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct Parameter<'a> {
    pub pattern: Pattern<'a>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub optional: bool,
    pub rest: bool,
    /// Set for constructor parameter properties
    pub accessibility: Option<Accessibility>,
    pub readonly: bool,
    pub span: Span,
}

impl Parameter<'_> {
    pub fn is_parameter_property(&self) -> bool {
        self.accessibility.is_some() || self.readonly
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Class<'a> {
    pub id: Option<Identifier<'a>>,
    pub type_parameters: &'a [TypeParameter<'a>],
    pub extends: Option<Expression<'a>>,
    pub super_type_arguments: Option<&'a [TypeNode<'a>]>,
    pub implements: &'a [TypeNode<'a>],
    pub members: &'a [ClassMember<'a>],
    pub is_abstract: bool,
    pub declare: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub enum ClassMember<'a> {
    Property(&'a ClassProperty<'a>),
    Method(&'a ClassMethod<'a>),
    IndexSignature(&'a IndexSignature<'a>),
    StaticBlock(&'a BlockStatement<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ClassProperty<'a> {
    pub key: PropertyKey<'a>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub value: Option<Expression<'a>>,
    pub is_static: bool,
    pub optional: bool,
    pub readonly: bool,
    pub declare: bool,
    pub accessibility: Option<Accessibility>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

#[derive(Debug, Clone, Copy)]
pub struct ClassMethod<'a> {
    pub key: PropertyKey<'a>,
    pub kind: MethodKind,
    pub function: &'a Function<'a>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub optional: bool,
    pub accessibility: Option<Accessibility>,
    pub span: Span,
}

impl HasSpan for ClassMember<'_> {
    fn span(&self) -> Span {
        match self {
            ClassMember::Property(property) => property.span,
            ClassMember::Method(method) => method.span,
            ClassMember::IndexSignature(signature) => signature.span,
            ClassMember::StaticBlock(block) => block.span,
        }
    }
}
