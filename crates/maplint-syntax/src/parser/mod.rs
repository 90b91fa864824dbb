//! Recursive-descent TypeScript parser
//!
//! Works over the full token vector so ambiguous constructs (arrow functions,
//! generic call arguments, function types) can be tried speculatively: save
//! the position, attempt the parse, and restore the position on failure.

mod expression;
mod statement;
mod types;

use bumpalo::Bump;

use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::{unescape, Lexer};
use crate::span::Span;
use crate::token::{Token, TokenKind};

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// Nested statements, expressions, types and patterns allowed before giving up
pub const MAX_NESTING_DEPTH: usize = 100;

pub struct Parser<'a> {
    arena: &'a Bump,
    source: &'a str,
    tokens: Vec<Token>,
    position: usize,
    /// Inside a `for (...)` head, where `in` is not a binary operator
    no_in: bool,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// `source` must already live in `arena`
    pub fn new(arena: &'a Bump, source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            arena,
            source,
            tokens,
            position: 0,
            no_in: false,
            depth: 0,
        }
    }

    /// Parse statements until end of input, stopping at the first error
    pub fn parse_statements(&mut self) -> (Vec<Statement<'a>>, Option<ParseError>) {
        let mut statements = Vec::new();
        while !self.at(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => return (statements, Some(error)),
            }
        }
        (statements, None)
    }

    // ----- token cursor -----

    fn current(&self) -> Token {
        self.peek(0)
    }

    fn peek(&self, n: usize) -> Token {
        let last = self.tokens.len().saturating_sub(1);
        match self.tokens.get((self.position + n).min(last)) {
            Some(token) => *token,
            None => Token::new(TokenKind::Eof, Span::new(0, 0), false),
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn text(&self, token: Token) -> &'a str {
        token.span.text(self.source)
    }

    fn is_keyword(&self, token: Token, word: &str) -> bool {
        token.kind == TokenKind::Identifier && self.text(token) == word
    }

    fn at_keyword(&self, word: &str) -> bool {
        self.is_keyword(self.current(), word)
    }

    fn peek_is_keyword(&self, n: usize, word: &str) -> bool {
        self.is_keyword(self.peek(n), word)
    }

    fn eat_keyword(&mut self, word: &str) -> bool {
        if self.at_keyword(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_keyword(&mut self, word: &str) -> ParseResult<Token> {
        if self.at_keyword(word) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", word)))
        }
    }

    /// Run `parse` one nesting level deeper, failing past `MAX_NESTING_DEPTH`
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                span: self.current().span,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        let found = match token.kind {
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("'{}'", self.text(token)),
        };
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found,
            span: token.span,
        }
    }

    /// End offset of the most recently consumed token
    fn previous_end(&self) -> u32 {
        match self.position.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span.end,
            None => 0,
        }
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.previous_end().max(start))
    }

    fn start(&self) -> u32 {
        self.current().span.start
    }

    /// Automatic semicolon insertion
    fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(TokenKind::Semicolon) {
            return Ok(());
        }
        let token = self.current();
        if token.newline_before || matches!(token.kind, TokenKind::RightBrace | TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.unexpected("';'"))
        }
    }

    /// Run `parse` speculatively, rewinding when it fails
    fn try_parse<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<Option<T>>) -> Option<T> {
        let saved_position = self.position;
        let saved_no_in = self.no_in;
        match parse(self) {
            Ok(Some(value)) => Some(value),
            _ => {
                self.position = saved_position;
                self.no_in = saved_no_in;
                None
            }
        }
    }

    /// Parse with `in` allowed as an operator again (inside brackets)
    fn allow_in<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let saved = self.no_in;
        self.no_in = false;
        let result = parse(self);
        self.no_in = saved;
        result
    }

    // ----- arena helpers -----

    fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    fn alloc_slice<T: Copy>(&self, values: Vec<T>) -> &'a [T] {
        self.arena.alloc_slice_copy(&values)
    }

    /// Cooked string value of a quoted string token
    fn string_value(&self, token: Token) -> &'a str {
        let raw = self.text(token);
        let inner = raw.get(1..raw.len().saturating_sub(1)).unwrap_or("");
        if inner.contains('\\') {
            self.arena.alloc_str(&unescape(inner))
        } else {
            inner
        }
    }

    // ----- shared productions -----

    fn parse_identifier(&mut self) -> ParseResult<Identifier<'a>> {
        let token = self.current();
        if token.kind != TokenKind::Identifier {
            return Err(self.unexpected("identifier"));
        }
        self.advance();
        let raw = self.text(token);
        // Escaped identifiers are cooked into the arena
        let name = if raw.contains('\\') {
            self.arena.alloc_str(&unescape(raw))
        } else {
            raw
        };
        Ok(Identifier { name, span: token.span })
    }

    /// `A.B.C`
    fn parse_entity_name(&mut self) -> ParseResult<&'a [Identifier<'a>]> {
        let mut parts = vec![self.parse_identifier()?];
        while self.at(TokenKind::Dot) && self.peek(1).kind == TokenKind::Identifier {
            self.advance();
            parts.push(self.parse_identifier()?);
        }
        Ok(self.alloc_slice(parts))
    }

    fn parse_property_key(&mut self) -> ParseResult<PropertyKey<'a>> {
        let token = self.current();
        match token.kind {
            TokenKind::Identifier => Ok(PropertyKey::Identifier(self.parse_identifier()?)),
            TokenKind::String => {
                self.advance();
                Ok(PropertyKey::String(self.string_value(token), token.span))
            }
            TokenKind::Number | TokenKind::BigInt => {
                self.advance();
                Ok(PropertyKey::Number(self.text(token), token.span))
            }
            TokenKind::PrivateName => {
                self.advance();
                Ok(PropertyKey::Private(Identifier {
                    name: &self.text(token)[1..],
                    span: token.span,
                }))
            }
            TokenKind::LeftBracket => {
                let start = token.span.start;
                self.advance();
                let expression = self.allow_in(|p| p.parse_assignment())?;
                self.expect(TokenKind::RightBracket, "']'")?;
                Ok(PropertyKey::Computed(expression, self.span_from(start)))
            }
            _ => Err(self.unexpected("property name")),
        }
    }

    fn is_property_key_start(token: Token) -> bool {
        matches!(
            token.kind,
            TokenKind::Identifier
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::BigInt
                | TokenKind::PrivateName
                | TokenKind::LeftBracket
        )
    }

    /// Decorators are parsed and discarded
    fn skip_decorators(&mut self) -> ParseResult<()> {
        while self.eat(TokenKind::At) {
            self.parse_left_hand_side()?;
        }
        Ok(())
    }

    // ----- binding patterns -----

    fn parse_binding_pattern(&mut self) -> ParseResult<Pattern<'a>> {
        self.nested(Self::parse_binding_pattern_body)
    }

    fn parse_binding_pattern_body(&mut self) -> ParseResult<Pattern<'a>> {
        let start = self.start();
        match self.current().kind {
            TokenKind::Identifier => Ok(Pattern::Identifier(self.parse_identifier()?)),
            TokenKind::LeftBrace => {
                self.advance();
                let mut properties = Vec::new();
                let mut rest = None;
                while !self.at(TokenKind::RightBrace) {
                    if self.eat(TokenKind::DotDotDot) {
                        rest = Some(self.parse_binding_pattern()?);
                        self.eat(TokenKind::Comma);
                        break;
                    }
                    let property_start = self.start();
                    let key = self.parse_property_key()?;
                    let (value, shorthand) = if self.eat(TokenKind::Colon) {
                        (self.parse_binding_element()?, false)
                    } else {
                        let PropertyKey::Identifier(ident) = key else {
                            return Err(self.unexpected("':'"));
                        };
                        let target = Pattern::Identifier(ident);
                        (self.parse_pattern_default(target, property_start)?, true)
                    };
                    properties.push(ObjectPatternProperty {
                        key,
                        value,
                        shorthand,
                        span: self.span_from(property_start),
                    });
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RightBrace, "'}'")?;
                Ok(Pattern::Object(self.alloc(ObjectPattern {
                    properties: self.alloc_slice(properties),
                    rest,
                    span: self.span_from(start),
                })))
            }
            TokenKind::LeftBracket => {
                self.advance();
                let mut elements = Vec::new();
                let mut rest = None;
                while !self.at(TokenKind::RightBracket) {
                    if self.eat(TokenKind::Comma) {
                        elements.push(None);
                        continue;
                    }
                    if self.eat(TokenKind::DotDotDot) {
                        rest = Some(self.parse_binding_pattern()?);
                        self.eat(TokenKind::Comma);
                        break;
                    }
                    elements.push(Some(self.parse_binding_element()?));
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RightBracket, "']'")?;
                Ok(Pattern::Array(self.alloc(ArrayPattern {
                    elements: self.alloc_slice(elements),
                    rest,
                    span: self.span_from(start),
                })))
            }
            _ => Err(self.unexpected("binding pattern")),
        }
    }

    /// A binding pattern with an optional `= default`
    fn parse_binding_element(&mut self) -> ParseResult<Pattern<'a>> {
        let start = self.start();
        let target = self.parse_binding_pattern()?;
        self.parse_pattern_default(target, start)
    }

    fn parse_pattern_default(&mut self, target: Pattern<'a>, start: u32) -> ParseResult<Pattern<'a>> {
        if !self.eat(TokenKind::Eq) {
            return Ok(target);
        }
        let default = self.allow_in(|p| p.parse_assignment())?;
        Ok(Pattern::Assignment(self.alloc(AssignmentPattern {
            target,
            default,
            span: self.span_from(start),
        })))
    }

    // ----- functions -----

    fn parse_parameters(&mut self) -> ParseResult<&'a [Parameter<'a>]> {
        self.expect(TokenKind::LeftParen, "'('")?;
        let mut params = Vec::new();
        while !self.at(TokenKind::RightParen) {
            params.push(self.parse_parameter()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen, "')'")?;
        Ok(self.alloc_slice(params))
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter<'a>> {
        let start = self.start();
        self.skip_decorators()?;

        let mut accessibility = None;
        let mut readonly = false;
        loop {
            let next = self.peek(1);
            let is_modifier_position = matches!(
                next.kind,
                TokenKind::Identifier | TokenKind::LeftBrace | TokenKind::LeftBracket | TokenKind::DotDotDot
            );
            if !is_modifier_position {
                break;
            }
            match self.text(self.current()) {
                "public" if self.at(TokenKind::Identifier) => accessibility = Some(Accessibility::Public),
                "protected" if self.at(TokenKind::Identifier) => {
                    accessibility = Some(Accessibility::Protected)
                }
                "private" if self.at(TokenKind::Identifier) => accessibility = Some(Accessibility::Private),
                "readonly" if self.at(TokenKind::Identifier) => readonly = true,
                "override" if self.at(TokenKind::Identifier) => {}
                _ => break,
            }
            self.advance();
        }

        let rest = self.eat(TokenKind::DotDotDot);
        let pattern_start = self.start();
        let mut pattern = self.parse_binding_pattern()?;
        let optional = self.eat(TokenKind::Question);
        let type_annotation = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        pattern = self.parse_pattern_default(pattern, pattern_start)?;

        Ok(Parameter {
            pattern,
            type_annotation,
            optional,
            rest,
            accessibility,
            readonly,
            span: self.span_from(start),
        })
    }

    /// `function [*] [name] <T>(params): R { body }`, starting at `function`
    fn parse_function(&mut self, start: u32, is_async: bool, declare: bool) -> ParseResult<&'a Function<'a>> {
        self.expect_keyword("function")?;
        let is_generator = self.eat(TokenKind::Star);
        let id = if self.at(TokenKind::Identifier) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.parse_function_rest(start, id, is_async, is_generator, declare)
    }

    /// Type parameters, parameters, return type and optional body
    fn parse_function_rest(
        &mut self,
        start: u32,
        id: Option<Identifier<'a>>,
        is_async: bool,
        is_generator: bool,
        declare: bool,
    ) -> ParseResult<&'a Function<'a>> {
        let type_parameters = self.parse_type_parameters()?;
        let params = self.parse_parameters()?;
        let return_type = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = if self.at(TokenKind::LeftBrace) {
            Some(self.allow_in(|p| p.parse_block())?)
        } else {
            self.consume_semicolon()?;
            None
        };

        Ok(self.alloc(Function {
            id,
            type_parameters,
            params,
            return_type,
            body,
            is_async,
            is_generator,
            declare,
            span: self.span_from(start),
        }))
    }
}

/// Parse a TypeScript source file into an arena-allocated program.
///
/// Parsing stops at the first syntax error; the statements parsed before it
/// are still returned.
pub fn parse_file_content<'a>(arena: &'a Bump, content: &str) -> (&'a Program<'a>, Option<ParseError>) {
    let source: &'a str = arena.alloc_str(content);
    let (tokens, lex_error) = Lexer::new(source).tokenize();

    let mut parser = Parser::new(arena, source, tokens);
    let (statements, parse_error) = parser.parse_statements();

    let program = arena.alloc(Program {
        statements: arena.alloc_slice_copy(&statements),
        source,
        span: Span::new(0, source.len() as u32),
    });

    (program, lex_error.or(parse_error))
}
