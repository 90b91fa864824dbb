use super::{Identifier, Parameter, PropertyKey};
use crate::span::{HasSpan, Span};

/// A type annotation as written in the source
#[derive(Debug, Clone, Copy)]
pub enum TypeNode<'a> {
    Keyword(KeywordType, Span),
    Reference(&'a TypeReference<'a>),
    Union(&'a CompositeType<'a>),
    Intersection(&'a CompositeType<'a>),
    Array(&'a ArrayType<'a>),
    Tuple(&'a TupleType<'a>),
    Literal(&'a LiteralType<'a>),
    Object(&'a ObjectType<'a>),
    Function(&'a FunctionType<'a>),
    /// `typeof a.b`
    Query(&'a TypeQuery<'a>),
    /// `keyof T`, `readonly T[]`, `unique symbol`
    Operator(&'a TypeOperator<'a>),
    /// `T[K]`
    IndexedAccess(&'a IndexedAccessType<'a>),
    /// `T extends U ? X : Y`
    Conditional(&'a ConditionalType<'a>),
    /// `{ [K in keyof T]: T[K] }`
    Mapped(&'a MappedType<'a>),
    /// `x is T`, `asserts x is T`
    Predicate(&'a TypePredicate<'a>),
    TemplateLiteral(&'a TemplateLiteralType<'a>),
    /// `infer U`
    Infer(&'a InferType<'a>),
    This(Span),
}

impl HasSpan for TypeNode<'_> {
    fn span(&self) -> Span {
        match self {
            TypeNode::Keyword(_, span) | TypeNode::This(span) => *span,
            TypeNode::Reference(node) => node.span,
            TypeNode::Union(node) | TypeNode::Intersection(node) => node.span,
            TypeNode::Array(node) => node.span,
            TypeNode::Tuple(node) => node.span,
            TypeNode::Literal(node) => node.span,
            TypeNode::Object(node) => node.span,
            TypeNode::Function(node) => node.span,
            TypeNode::Query(node) => node.span,
            TypeNode::Operator(node) => node.span,
            TypeNode::IndexedAccess(node) => node.span,
            TypeNode::Conditional(node) => node.span,
            TypeNode::Mapped(node) => node.span,
            TypeNode::Predicate(node) => node.span,
            TypeNode::TemplateLiteral(node) => node.span,
            TypeNode::Infer(node) => node.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordType {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    BigInt,
    Symbol,
    Object,
    /// `as const`
    Const,
}

impl KeywordType {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "any" => KeywordType::Any,
            "unknown" => KeywordType::Unknown,
            "never" => KeywordType::Never,
            "void" => KeywordType::Void,
            "undefined" => KeywordType::Undefined,
            "null" => KeywordType::Null,
            "boolean" => KeywordType::Boolean,
            "number" => KeywordType::Number,
            "string" => KeywordType::String,
            "bigint" => KeywordType::BigInt,
            "symbol" => KeywordType::Symbol,
            "object" => KeywordType::Object,
            _ => return None,
        })
    }
}

/// `A.B.Name<Args>`
#[derive(Debug, Clone, Copy)]
pub struct TypeReference<'a> {
    pub name: &'a [Identifier<'a>],
    pub type_arguments: Option<&'a [TypeNode<'a>]>,
    pub span: Span,
}

impl<'a> TypeReference<'a> {
    /// The name when it is a single identifier
    pub fn simple_name(&self) -> Option<&'a str> {
        match self.name {
            [single] => Some(single.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CompositeType<'a> {
    pub types: &'a [TypeNode<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayType<'a> {
    pub element: TypeNode<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct TupleElement<'a> {
    pub name: Option<Identifier<'a>>,
    pub element: TypeNode<'a>,
    pub optional: bool,
    pub rest: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TupleType<'a> {
    pub elements: &'a [TupleElement<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralTypeKind<'a> {
    String(&'a str),
    /// Raw text, including a leading `-`
    Number(&'a str),
    BigInt(&'a str),
    Boolean(bool),
}

#[derive(Debug, Clone, Copy)]
pub struct LiteralType<'a> {
    pub kind: LiteralTypeKind<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectType<'a> {
    pub members: &'a [TypeMember<'a>],
    pub span: Span,
}

/// Members of interfaces and object type literals
#[derive(Debug, Clone, Copy)]
pub enum TypeMember<'a> {
    Property(&'a PropertySignature<'a>),
    Method(&'a MethodSignature<'a>),
    Index(&'a IndexSignature<'a>),
    Call(&'a Signature<'a>),
    Construct(&'a Signature<'a>),
}

impl HasSpan for TypeMember<'_> {
    fn span(&self) -> Span {
        match self {
            TypeMember::Property(node) => node.span,
            TypeMember::Method(node) => node.span,
            TypeMember::Index(node) => node.span,
            TypeMember::Call(node) | TypeMember::Construct(node) => node.span,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PropertySignature<'a> {
    pub key: PropertyKey<'a>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub optional: bool,
    pub readonly: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct MethodSignature<'a> {
    pub key: PropertyKey<'a>,
    pub signature: &'a Signature<'a>,
    pub optional: bool,
    pub span: Span,
}

/// `[key: K]: V`
#[derive(Debug, Clone, Copy)]
pub struct IndexSignature<'a> {
    pub parameter: Identifier<'a>,
    pub key_type: TypeNode<'a>,
    pub type_annotation: TypeNode<'a>,
    pub readonly: bool,
    pub is_static: bool,
    pub span: Span,
}

/// Type parameters, parameters and return type shared by callable types
#[derive(Debug, Clone, Copy)]
pub struct Signature<'a> {
    pub type_parameters: &'a [TypeParameter<'a>],
    pub params: &'a [Parameter<'a>],
    pub return_type: Option<TypeNode<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct FunctionType<'a> {
    pub signature: &'a Signature<'a>,
    /// `new (...) => T`
    pub is_constructor: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeQuery<'a> {
    pub name: &'a [Identifier<'a>],
    pub type_arguments: Option<&'a [TypeNode<'a>]>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOperatorKind {
    Keyof,
    Readonly,
    Unique,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeOperator<'a> {
    pub operator: TypeOperatorKind,
    pub type_annotation: TypeNode<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct IndexedAccessType<'a> {
    pub object: TypeNode<'a>,
    pub index: TypeNode<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ConditionalType<'a> {
    pub check: TypeNode<'a>,
    pub extends: TypeNode<'a>,
    pub true_type: TypeNode<'a>,
    pub false_type: TypeNode<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct MappedType<'a> {
    pub parameter: Identifier<'a>,
    pub constraint: TypeNode<'a>,
    pub name_type: Option<TypeNode<'a>>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct TypePredicate<'a> {
    /// Parameter name or `this`
    pub parameter: Identifier<'a>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub asserts: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateLiteralType<'a> {
    pub quasis: &'a [&'a str],
    pub types: &'a [TypeNode<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct InferType<'a> {
    pub parameter: Identifier<'a>,
    pub constraint: Option<TypeNode<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeParameter<'a> {
    pub name: Identifier<'a>,
    pub constraint: Option<TypeNode<'a>>,
    pub default: Option<TypeNode<'a>>,
    pub is_const: bool,
    pub span: Span,
}
