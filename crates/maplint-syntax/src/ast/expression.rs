use super::{Class, Function, Identifier, Parameter, PropertyKey, TypeNode, TypeParameter};
use crate::ast::BlockStatement;
use crate::span::{HasSpan, Span};

#[derive(Debug, Clone, Copy)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    This(Span),
    Super(Span),
    Literal(&'a Literal<'a>),
    Template(&'a TemplateLiteral<'a>),
    TaggedTemplate(&'a TaggedTemplate<'a>),
    Array(&'a ArrayLiteral<'a>),
    Object(&'a ObjectLiteral<'a>),
    Function(&'a Function<'a>),
    Arrow(&'a ArrowFunction<'a>),
    Class(&'a Class<'a>),
    Member(&'a MemberExpression<'a>),
    Call(&'a CallExpression<'a>),
    New(&'a NewExpression<'a>),
    Unary(&'a UnaryExpression<'a>),
    Update(&'a UpdateExpression<'a>),
    Binary(&'a BinaryExpression<'a>),
    Assignment(&'a AssignmentExpression<'a>),
    Conditional(&'a ConditionalExpression<'a>),
    Sequence(&'a SequenceExpression<'a>),
    Parenthesized(&'a ParenthesizedExpression<'a>),
    TypeAssertion(&'a TypeAssertion<'a>),
    Satisfies(&'a SatisfiesExpression<'a>),
    NonNull(&'a NonNullExpression<'a>),
    Yield(&'a YieldExpression<'a>),
}

impl<'a> Expression<'a> {
    /// Strip any number of enclosing parentheses
    pub fn without_parentheses(&self) -> Expression<'a> {
        let mut current = *self;
        while let Expression::Parenthesized(paren) = current {
            current = paren.expression;
        }
        current
    }

    pub fn as_identifier(&self) -> Option<&Identifier<'a>> {
        match self {
            Expression::Identifier(ident) => Some(ident),
            _ => None,
        }
    }
}

impl HasSpan for Expression<'_> {
    fn span(&self) -> Span {
        match self {
            Expression::Identifier(ident) => ident.span,
            Expression::This(span) | Expression::Super(span) => *span,
            Expression::Literal(node) => node.span,
            Expression::Template(node) => node.span,
            Expression::TaggedTemplate(node) => node.span,
            Expression::Array(node) => node.span,
            Expression::Object(node) => node.span,
            Expression::Function(node) => node.span,
            Expression::Arrow(node) => node.span,
            Expression::Class(node) => node.span,
            Expression::Member(node) => node.span,
            Expression::Call(node) => node.span,
            Expression::New(node) => node.span,
            Expression::Unary(node) => node.span,
            Expression::Update(node) => node.span,
            Expression::Binary(node) => node.span,
            Expression::Assignment(node) => node.span,
            Expression::Conditional(node) => node.span,
            Expression::Sequence(node) => node.span,
            Expression::Parenthesized(node) => node.span,
            Expression::TypeAssertion(node) => node.span,
            Expression::Satisfies(node) => node.span,
            Expression::NonNull(node) => node.span,
            Expression::Yield(node) => node.span,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Literal<'a> {
    pub kind: LiteralKind<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind<'a> {
    /// Cooked value without quotes
    String(&'a str),
    /// Raw numeric text
    Number(&'a str),
    BigInt(&'a str),
    Boolean(bool),
    Null,
    Regex(&'a str),
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateLiteral<'a> {
    /// Raw text between substitutions
    pub quasis: &'a [&'a str],
    pub expressions: &'a [Expression<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct TaggedTemplate<'a> {
    pub tag: Expression<'a>,
    pub type_arguments: Option<&'a [TypeNode<'a>]>,
    pub template: &'a TemplateLiteral<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct SpreadElement<'a> {
    pub argument: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrayElement<'a> {
    Expression(Expression<'a>),
    Spread(&'a SpreadElement<'a>),
    Hole(Span),
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayLiteral<'a> {
    pub elements: &'a [ArrayElement<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectLiteral<'a> {
    pub properties: &'a [ObjectProperty<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectProperty<'a> {
    KeyValue {
        key: PropertyKey<'a>,
        value: Expression<'a>,
        span: Span,
    },
    Shorthand(Identifier<'a>),
    Method {
        key: PropertyKey<'a>,
        kind: super::MethodKind,
        function: &'a Function<'a>,
        span: Span,
    },
    Spread(&'a SpreadElement<'a>),
}

impl HasSpan for ObjectProperty<'_> {
    fn span(&self) -> Span {
        match self {
            ObjectProperty::KeyValue { span, .. } | ObjectProperty::Method { span, .. } => *span,
            ObjectProperty::Shorthand(ident) => ident.span,
            ObjectProperty::Spread(spread) => spread.span,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ArrowBody<'a> {
    Expression(Expression<'a>),
    Block(&'a BlockStatement<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ArrowFunction<'a> {
    pub type_parameters: &'a [TypeParameter<'a>],
    pub params: &'a [Parameter<'a>],
    pub return_type: Option<TypeNode<'a>>,
    pub body: ArrowBody<'a>,
    pub is_async: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub enum MemberProperty<'a> {
    /// `object.name`
    Named(Identifier<'a>),
    /// `object.#name`
    Private(Identifier<'a>),
    /// `object[expression]`
    Computed(Expression<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct MemberExpression<'a> {
    pub object: Expression<'a>,
    pub property: MemberProperty<'a>,
    /// `?.` directly before this access
    pub optional: bool,
    pub span: Span,
}

impl<'a> MemberExpression<'a> {
    pub fn is_computed(&self) -> bool {
        matches!(self.property, MemberProperty::Computed(_))
    }

    /// Name of a `.name` access
    pub fn property_name(&self) -> Option<&'a str> {
        match self.property {
            MemberProperty::Named(ident) => Some(ident.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Argument<'a> {
    Expression(Expression<'a>),
    Spread(&'a SpreadElement<'a>),
}

impl<'a> Argument<'a> {
    /// The argument's expression, looking through a spread
    pub fn value(&self) -> Expression<'a> {
        match self {
            Argument::Expression(expr) => *expr,
            Argument::Spread(spread) => spread.argument,
        }
    }

    pub fn is_spread(&self) -> bool {
        matches!(self, Argument::Spread(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CallExpression<'a> {
    pub callee: Expression<'a>,
    pub type_arguments: Option<&'a [TypeNode<'a>]>,
    pub arguments: &'a [Argument<'a>],
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct NewExpression<'a> {
    pub callee: Expression<'a>,
    pub type_arguments: Option<&'a [TypeNode<'a>]>,
    pub arguments: &'a [Argument<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
    Plus,
    BitwiseNot,
    Typeof,
    Void,
    Delete,
    Await,
}

#[derive(Debug, Clone, Copy)]
pub struct UnaryExpression<'a> {
    pub operator: UnaryOperator,
    pub argument: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateExpression<'a> {
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    Instanceof,
    LogicalAnd,
    LogicalOr,
    Coalesce,
}

impl BinaryOperator {
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr | BinaryOperator::Coalesce
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BinaryExpression<'a> {
    pub operator: BinaryOperator,
    pub left: Expression<'a>,
    pub right: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalAnd,
    LogicalOr,
    Coalesce,
}

#[derive(Debug, Clone, Copy)]
pub struct AssignmentExpression<'a> {
    pub operator: AssignmentOperator,
    /// Member expressions, identifiers, or array/object literals used as patterns
    pub target: Expression<'a>,
    pub value: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ConditionalExpression<'a> {
    pub test: Expression<'a>,
    pub consequent: Expression<'a>,
    pub alternate: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct SequenceExpression<'a> {
    pub expressions: &'a [Expression<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ParenthesizedExpression<'a> {
    pub expression: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionSyntax {
    /// `expr as T`
    As,
    /// `<T>expr`
    AngleBracket,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeAssertion<'a> {
    pub expression: Expression<'a>,
    pub type_annotation: TypeNode<'a>,
    pub syntax: AssertionSyntax,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct SatisfiesExpression<'a> {
    pub expression: Expression<'a>,
    pub type_annotation: TypeNode<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct NonNullExpression<'a> {
    pub expression: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct YieldExpression<'a> {
    pub argument: Option<Expression<'a>>,
    pub delegate: bool,
    pub span: Span,
}
