use super::{Class, Expression, Function, Identifier, Pattern, PropertyKey, TypeMember, TypeNode, TypeParameter};
use crate::span::{HasSpan, Span};

#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    Variable(&'a VariableDeclaration<'a>),
    Function(&'a Function<'a>),
    Class(&'a Class<'a>),
    TypeAlias(&'a TypeAliasDeclaration<'a>),
    Interface(&'a InterfaceDeclaration<'a>),
    Enum(&'a EnumDeclaration<'a>),
    Import(&'a ImportDeclaration<'a>),
    Export(&'a ExportDeclaration<'a>),
    Expression(&'a ExpressionStatement<'a>),
    Block(&'a BlockStatement<'a>),
    If(&'a IfStatement<'a>),
    For(&'a ForStatement<'a>),
    ForIn(&'a ForInStatement<'a>),
    While(&'a WhileStatement<'a>),
    DoWhile(&'a DoWhileStatement<'a>),
    Return(&'a ReturnStatement<'a>),
    Throw(&'a ThrowStatement<'a>),
    Break(&'a JumpStatement<'a>),
    Continue(&'a JumpStatement<'a>),
    Switch(&'a SwitchStatement<'a>),
    Try(&'a TryStatement<'a>),
    Labeled(&'a LabeledStatement<'a>),
    Namespace(&'a NamespaceDeclaration<'a>),
    Debugger(Span),
    Empty(Span),
}

impl HasSpan for Statement<'_> {
    fn span(&self) -> Span {
        match self {
            Statement::Variable(node) => node.span,
            Statement::Function(node) => node.span,
            Statement::Class(node) => node.span,
            Statement::TypeAlias(node) => node.span,
            Statement::Interface(node) => node.span,
            Statement::Enum(node) => node.span,
            Statement::Import(node) => node.span,
            Statement::Export(node) => node.span,
            Statement::Expression(node) => node.span,
            Statement::Block(node) => node.span,
            Statement::If(node) => node.span,
            Statement::For(node) => node.span,
            Statement::ForIn(node) => node.span,
            Statement::While(node) => node.span,
            Statement::DoWhile(node) => node.span,
            Statement::Return(node) => node.span,
            Statement::Throw(node) => node.span,
            Statement::Break(node) | Statement::Continue(node) => node.span,
            Statement::Switch(node) => node.span,
            Statement::Try(node) => node.span,
            Statement::Labeled(node) => node.span,
            Statement::Namespace(node) => node.span,
            Statement::Debugger(span) | Statement::Empty(span) => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
    Using,
}

#[derive(Debug, Clone, Copy)]
pub struct VariableDeclaration<'a> {
    pub kind: VariableKind,
    pub declarators: &'a [VariableDeclarator<'a>],
    pub declare: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct VariableDeclarator<'a> {
    pub pattern: Pattern<'a>,
    pub type_annotation: Option<TypeNode<'a>>,
    /// `let x!: T`
    pub definite: bool,
    pub init: Option<Expression<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeAliasDeclaration<'a> {
    pub name: Identifier<'a>,
    pub type_parameters: &'a [TypeParameter<'a>],
    pub type_annotation: TypeNode<'a>,
    pub declare: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct InterfaceDeclaration<'a> {
    pub name: Identifier<'a>,
    pub type_parameters: &'a [TypeParameter<'a>],
    pub extends: &'a [TypeNode<'a>],
    pub members: &'a [TypeMember<'a>],
    pub declare: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct EnumDeclaration<'a> {
    pub name: Identifier<'a>,
    pub members: &'a [EnumMember<'a>],
    pub is_const: bool,
    pub declare: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct EnumMember<'a> {
    pub name: PropertyKey<'a>,
    pub initializer: Option<Expression<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub enum ImportSpecifier<'a> {
    /// `import name from "..."`
    Default(Identifier<'a>),
    /// `import * as name from "..."`
    Namespace(Identifier<'a>),
    /// `import { imported as local } from "..."`
    Named {
        imported: Identifier<'a>,
        local: Identifier<'a>,
        type_only: bool,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum ImportSource<'a> {
    Module(&'a str),
    /// `import name = require("...")`
    Require(&'a str),
    /// `import name = A.B`
    Entity(&'a [Identifier<'a>]),
}

#[derive(Debug, Clone, Copy)]
pub struct ImportDeclaration<'a> {
    pub specifiers: &'a [ImportSpecifier<'a>],
    pub source: ImportSource<'a>,
    pub type_only: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ExportSpecifier<'a> {
    pub local: Identifier<'a>,
    pub exported: Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ExportKind<'a> {
    /// `export <declaration>` and `export default function/class`
    Declaration(Statement<'a>),
    /// `export default <expression>`
    Default(Expression<'a>),
    /// `export { a, b as c } [from "..."]`
    Named {
        specifiers: &'a [ExportSpecifier<'a>],
        source: Option<&'a str>,
    },
    /// `export * [as name] from "..."`
    All {
        exported: Option<Identifier<'a>>,
        source: &'a str,
    },
    /// `export = expression`
    Assignment(Expression<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ExportDeclaration<'a> {
    pub kind: ExportKind<'a>,
    pub is_default: bool,
    pub type_only: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ExpressionStatement<'a> {
    pub expression: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct BlockStatement<'a> {
    pub statements: &'a [Statement<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct IfStatement<'a> {
    pub test: Expression<'a>,
    pub consequent: Statement<'a>,
    pub alternate: Option<Statement<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub enum ForInit<'a> {
    Variable(&'a VariableDeclaration<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ForStatement<'a> {
    pub init: Option<ForInit<'a>>,
    pub test: Option<Expression<'a>>,
    pub update: Option<Expression<'a>>,
    pub body: Statement<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForInKind {
    In,
    Of,
}

/// `for (left in right)` and `for [await] (left of right)`
#[derive(Debug, Clone, Copy)]
pub struct ForInStatement<'a> {
    pub kind: ForInKind,
    pub is_await: bool,
    pub left: ForInit<'a>,
    pub right: Expression<'a>,
    pub body: Statement<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct WhileStatement<'a> {
    pub test: Expression<'a>,
    pub body: Statement<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct DoWhileStatement<'a> {
    pub body: Statement<'a>,
    pub test: Expression<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ReturnStatement<'a> {
    pub argument: Option<Expression<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct ThrowStatement<'a> {
    pub argument: Expression<'a>,
    pub span: Span,
}

/// `break` and `continue`
#[derive(Debug, Clone, Copy)]
pub struct JumpStatement<'a> {
    pub label: Option<Identifier<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct SwitchStatement<'a> {
    pub discriminant: Expression<'a>,
    pub cases: &'a [SwitchCase<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct SwitchCase<'a> {
    /// `None` for `default:`
    pub test: Option<Expression<'a>>,
    pub consequent: &'a [Statement<'a>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct CatchClause<'a> {
    pub param: Option<Pattern<'a>>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub body: &'a BlockStatement<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct TryStatement<'a> {
    pub block: &'a BlockStatement<'a>,
    pub handler: Option<CatchClause<'a>>,
    pub finalizer: Option<&'a BlockStatement<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub struct LabeledStatement<'a> {
    pub label: Identifier<'a>,
    pub body: Statement<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy)]
pub enum NamespaceName<'a> {
    /// `namespace A.B.C`
    Identifier(&'a [Identifier<'a>]),
    /// `declare module "name"`
    String(&'a str),
    /// `declare global`
    Global,
}

#[derive(Debug, Clone, Copy)]
pub struct NamespaceDeclaration<'a> {
    pub name: NamespaceName<'a>,
    /// `None` for `declare module "name";`
    pub body: Option<&'a BlockStatement<'a>>,
    pub declare: bool,
    pub span: Span,
}
