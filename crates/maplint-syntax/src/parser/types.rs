use super::{ParseResult, Parser};
use crate::ast::*;
use crate::span::HasSpan;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeNode<'a>> {
        self.nested(Self::parse_type_body)
    }

    fn parse_type_body(&mut self) -> ParseResult<TypeNode<'a>> {
        if let Some(function) = self.try_parse_function_type() {
            return Ok(function);
        }

        let start = self.start();
        let check = self.parse_union_type()?;

        let token = self.current();
        if self.is_keyword(token, "extends") && !token.newline_before {
            self.advance();
            let extends = self.parse_union_type()?;
            self.expect(TokenKind::Question, "'?'")?;
            let true_type = self.parse_type()?;
            self.expect(TokenKind::Colon, "':'")?;
            let false_type = self.parse_type()?;
            return Ok(TypeNode::Conditional(self.alloc(ConditionalType {
                check,
                extends,
                true_type,
                false_type,
                span: self.span_from(start),
            })));
        }

        Ok(check)
    }

    /// `(a: T) => R`, `<T>(a: T) => R`, `new (...) => R`
    fn try_parse_function_type(&mut self) -> Option<TypeNode<'a>> {
        let starts_function = matches!(self.current().kind, TokenKind::LeftParen | TokenKind::Lt)
            || self.at_keyword("new")
            || (self.at_keyword("abstract") && self.peek_is_keyword(1, "new"));
        if !starts_function {
            return None;
        }

        self.try_parse(|p| {
            let start = p.start();
            p.eat_keyword("abstract");
            let is_constructor = p.eat_keyword("new");
            let type_parameters = p.parse_type_parameters()?;
            let params = p.parse_parameters()?;
            if !p.eat(TokenKind::Arrow) {
                return Ok(None);
            }
            let return_type = p.parse_type()?;
            let signature = p.alloc(Signature {
                type_parameters,
                params,
                return_type: Some(return_type),
                span: p.span_from(start),
            });
            Ok(Some(TypeNode::Function(p.alloc(FunctionType {
                signature,
                is_constructor,
                span: p.span_from(start),
            }))))
        })
    }

    fn parse_union_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let start = self.start();
        let leading = self.eat(TokenKind::Pipe);
        let first = self.parse_intersection_type()?;
        if !self.at(TokenKind::Pipe) {
            return Ok(first);
        }

        let mut types = vec![first];
        while self.eat(TokenKind::Pipe) {
            types.push(self.parse_intersection_type()?);
        }
        let start = if leading { start } else { first.span().start };
        Ok(TypeNode::Union(self.alloc(CompositeType {
            types: self.alloc_slice(types),
            span: self.span_from(start),
        })))
    }

    fn parse_intersection_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let start = self.start();
        self.eat(TokenKind::Amp);
        let first = self.parse_type_operator()?;
        if !self.at(TokenKind::Amp) {
            return Ok(first);
        }

        let mut types = vec![first];
        while self.eat(TokenKind::Amp) {
            types.push(self.parse_type_operator()?);
        }
        Ok(TypeNode::Intersection(self.alloc(CompositeType {
            types: self.alloc_slice(types),
            span: self.span_from(start),
        })))
    }

    fn parse_type_operator(&mut self) -> ParseResult<TypeNode<'a>> {
        let start = self.start();
        let operator = match self.text(self.current()) {
            "keyof" if self.at(TokenKind::Identifier) => Some(TypeOperatorKind::Keyof),
            "readonly" if self.at(TokenKind::Identifier) => Some(TypeOperatorKind::Readonly),
            "unique" if self.at(TokenKind::Identifier) && self.peek_is_keyword(1, "symbol") => {
                Some(TypeOperatorKind::Unique)
            }
            _ => None,
        };

        if let Some(operator) = operator {
            self.advance();
            let type_annotation = self.parse_type_operator()?;
            return Ok(TypeNode::Operator(self.alloc(TypeOperator {
                operator,
                type_annotation,
                span: self.span_from(start),
            })));
        }

        if self.at_keyword("infer") && self.peek(1).kind == TokenKind::Identifier {
            self.advance();
            let parameter = self.parse_identifier()?;
            return Ok(TypeNode::Infer(self.alloc(InferType {
                parameter,
                constraint: None,
                span: self.span_from(start),
            })));
        }

        self.parse_postfix_type()
    }

    fn parse_postfix_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let start = self.start();
        let mut node = self.parse_primary_type()?;

        while self.at(TokenKind::LeftBracket) && !self.current().newline_before {
            self.advance();
            if self.eat(TokenKind::RightBracket) {
                node = TypeNode::Array(self.alloc(ArrayType {
                    element: node,
                    span: self.span_from(start),
                }));
            } else {
                let index = self.parse_type()?;
                self.expect(TokenKind::RightBracket, "']'")?;
                node = TypeNode::IndexedAccess(self.alloc(IndexedAccessType {
                    object: node,
                    index,
                    span: self.span_from(start),
                }));
            }
        }

        Ok(node)
    }

    fn parse_primary_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let token = self.current();
        let start = token.span.start;

        match token.kind {
            TokenKind::Identifier => self.parse_named_type(),
            TokenKind::String => {
                self.advance();
                Ok(self.literal_type(LiteralTypeKind::String(self.string_value(token)), start))
            }
            TokenKind::Number => {
                self.advance();
                Ok(self.literal_type(LiteralTypeKind::Number(self.text(token)), start))
            }
            TokenKind::BigInt => {
                self.advance();
                Ok(self.literal_type(LiteralTypeKind::BigInt(self.text(token)), start))
            }
            TokenKind::Minus if matches!(self.peek(1).kind, TokenKind::Number | TokenKind::BigInt) => {
                self.advance();
                let number = self.advance();
                let text = crate::span::Span::new(start, number.span.end).text(self.source);
                let kind = if number.kind == TokenKind::Number {
                    LiteralTypeKind::Number(text)
                } else {
                    LiteralTypeKind::BigInt(text)
                };
                Ok(self.literal_type(kind, start))
            }
            TokenKind::Template | TokenKind::TemplateHead => self.parse_template_literal_type(),
            TokenKind::LeftBrace => {
                if self.at_mapped_type() {
                    self.parse_mapped_type()
                } else {
                    let members = self.parse_type_members()?;
                    Ok(TypeNode::Object(self.alloc(ObjectType {
                        members,
                        span: self.span_from(start),
                    })))
                }
            }
            TokenKind::LeftBracket => self.parse_tuple_type(),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("type")),
        }
    }

    fn literal_type(&self, kind: LiteralTypeKind<'a>, start: u32) -> TypeNode<'a> {
        TypeNode::Literal(self.alloc(LiteralType {
            kind,
            span: self.span_from(start),
        }))
    }

    /// Keywords, references, `typeof`, `this` and type predicates
    fn parse_named_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let token = self.current();
        let start = token.span.start;
        let name = self.text(token);
        let next = self.peek(1);

        // `x is T` / `asserts x [is T]`
        if self.is_keyword(next, "is") && !next.newline_before {
            let parameter = self.parse_identifier()?;
            self.advance();
            let type_annotation = self.parse_type()?;
            return Ok(TypeNode::Predicate(self.alloc(TypePredicate {
                parameter,
                type_annotation: Some(type_annotation),
                asserts: false,
                span: self.span_from(start),
            })));
        }
        if name == "asserts" && next.kind == TokenKind::Identifier && !next.newline_before {
            self.advance();
            let parameter = self.parse_identifier()?;
            let type_annotation = if self.eat_keyword("is") {
                Some(self.parse_type()?)
            } else {
                None
            };
            return Ok(TypeNode::Predicate(self.alloc(TypePredicate {
                parameter,
                type_annotation,
                asserts: true,
                span: self.span_from(start),
            })));
        }

        if next.kind != TokenKind::Dot {
            if let Some(keyword) = KeywordType::from_name(name) {
                self.advance();
                return Ok(TypeNode::Keyword(keyword, token.span));
            }
            match name {
                "this" => {
                    self.advance();
                    return Ok(TypeNode::This(token.span));
                }
                "true" | "false" => {
                    self.advance();
                    return Ok(self.literal_type(LiteralTypeKind::Boolean(name == "true"), start));
                }
                "typeof" => {
                    self.advance();
                    let name = self.parse_entity_name()?;
                    let type_arguments = if self.at(TokenKind::Lt) && !self.current().newline_before {
                        Some(self.parse_type_arguments()?)
                    } else {
                        None
                    };
                    return Ok(TypeNode::Query(self.alloc(TypeQuery {
                        name,
                        type_arguments,
                        span: self.span_from(start),
                    })));
                }
                _ => {}
            }
        }

        self.parse_type_reference()
    }

    /// `A.B<T>`
    pub(crate) fn parse_type_reference(&mut self) -> ParseResult<TypeNode<'a>> {
        let start = self.start();
        let name = self.parse_entity_name()?;
        let type_arguments = if self.at(TokenKind::Lt) && !self.current().newline_before {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        Ok(TypeNode::Reference(self.alloc(TypeReference {
            name,
            type_arguments,
            span: self.span_from(start),
        })))
    }

    pub(crate) fn parse_type_arguments(&mut self) -> ParseResult<&'a [TypeNode<'a>]> {
        self.expect(TokenKind::Lt, "'<'")?;
        let mut arguments = Vec::new();
        while !self.at(TokenKind::Gt) {
            arguments.push(self.parse_type()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Gt, "'>'")?;
        Ok(self.alloc_slice(arguments))
    }

    /// Optional `<T extends C = D, ...>`
    pub(crate) fn parse_type_parameters(&mut self) -> ParseResult<&'a [TypeParameter<'a>]> {
        if !self.eat(TokenKind::Lt) {
            return Ok(&[]);
        }

        let mut parameters = Vec::new();
        while !self.at(TokenKind::Gt) {
            let start = self.start();
            let mut is_const = false;
            while self.peek(1).kind == TokenKind::Identifier
                && (self.at_keyword("const") || self.at_keyword("in") || self.at_keyword("out"))
            {
                is_const |= self.at_keyword("const");
                self.advance();
            }
            let name = self.parse_identifier()?;
            let constraint = if self.eat_keyword("extends") {
                Some(self.parse_type()?)
            } else {
                None
            };
            let default = if self.eat(TokenKind::Eq) {
                Some(self.parse_type()?)
            } else {
                None
            };
            parameters.push(TypeParameter {
                name,
                constraint,
                default,
                is_const,
                span: self.span_from(start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Gt, "'>'")?;
        Ok(self.alloc_slice(parameters))
    }

    fn parse_tuple_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let start = self.start();
        self.expect(TokenKind::LeftBracket, "'['")?;

        let mut elements = Vec::new();
        while !self.at(TokenKind::RightBracket) {
            let rest = self.eat(TokenKind::DotDotDot);
            let named = self.at(TokenKind::Identifier)
                && (self.peek(1).kind == TokenKind::Colon
                    || (self.peek(1).kind == TokenKind::Question && self.peek(2).kind == TokenKind::Colon));
            let (name, mut optional) = if named {
                let name = self.parse_identifier()?;
                let optional = self.eat(TokenKind::Question);
                self.advance();
                (Some(name), optional)
            } else {
                (None, false)
            };
            let element = self.parse_type()?;
            optional |= self.eat(TokenKind::Question);
            elements.push(TupleElement {
                name,
                element,
                optional,
                rest,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBracket, "']'")?;

        Ok(TypeNode::Tuple(self.alloc(TupleType {
            elements: self.alloc_slice(elements),
            span: self.span_from(start),
        })))
    }

    fn parse_template_literal_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let start = self.start();
        let first = self.advance();
        let first_text = self.text(first);
        let mut quasis = Vec::new();
        let mut types = Vec::new();

        if first.kind == TokenKind::Template {
            quasis.push(first_text.get(1..first_text.len() - 1).unwrap_or(""));
        } else {
            quasis.push(first_text.get(1..first_text.len() - 2).unwrap_or(""));
            loop {
                types.push(self.parse_type()?);
                let part = self.current();
                let part_text = self.text(part);
                match part.kind {
                    TokenKind::TemplateMiddle => {
                        self.advance();
                        quasis.push(part_text.get(1..part_text.len() - 2).unwrap_or(""));
                    }
                    TokenKind::TemplateTail => {
                        self.advance();
                        quasis.push(part_text.get(1..part_text.len() - 1).unwrap_or(""));
                        break;
                    }
                    _ => return Err(self.unexpected("'}'")),
                }
            }
        }

        Ok(TypeNode::TemplateLiteral(self.alloc(TemplateLiteralType {
            quasis: self.alloc_slice(quasis),
            types: self.alloc_slice(types),
            span: self.span_from(start),
        })))
    }

    /// `{ [readonly] [K in ...` with optional `+`/`-` modifiers
    fn at_mapped_type(&self) -> bool {
        let mut offset = 1;
        if matches!(self.peek(offset).kind, TokenKind::Plus | TokenKind::Minus) {
            offset += 1;
        }
        if self.peek_is_keyword(offset, "readonly") {
            offset += 1;
        }
        self.peek(offset).kind == TokenKind::LeftBracket
            && self.peek(offset + 1).kind == TokenKind::Identifier
            && self.peek_is_keyword(offset + 2, "in")
    }

    fn parse_mapped_type(&mut self) -> ParseResult<TypeNode<'a>> {
        let start = self.start();
        self.expect(TokenKind::LeftBrace, "'{'")?;
        if !self.eat(TokenKind::Plus) {
            self.eat(TokenKind::Minus);
        }
        self.eat_keyword("readonly");
        self.expect(TokenKind::LeftBracket, "'['")?;
        let parameter = self.parse_identifier()?;
        self.expect_keyword("in")?;
        let constraint = self.parse_type()?;
        let name_type = if self.eat_keyword("as") {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.expect(TokenKind::RightBracket, "']'")?;
        if !self.eat(TokenKind::Plus) {
            self.eat(TokenKind::Minus);
        }
        self.eat(TokenKind::Question);
        let type_annotation = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        if !self.eat(TokenKind::Semicolon) {
            self.eat(TokenKind::Comma);
        }
        self.expect(TokenKind::RightBrace, "'}'")?;

        Ok(TypeNode::Mapped(self.alloc(MappedType {
            parameter,
            constraint,
            name_type,
            type_annotation,
            span: self.span_from(start),
        })))
    }

    /// `{ member; member, ... }` of interfaces and object types
    pub(crate) fn parse_type_members(&mut self) -> ParseResult<&'a [TypeMember<'a>]> {
        self.expect(TokenKind::LeftBrace, "'{'")?;
        let mut members = Vec::new();
        while !self.at(TokenKind::RightBrace) {
            if self.at(TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }
            members.push(self.parse_type_member()?);
            if !self.eat(TokenKind::Semicolon) && !self.eat(TokenKind::Comma) {
                let token = self.current();
                if !token.newline_before && token.kind != TokenKind::RightBrace {
                    return Err(self.unexpected("';'"));
                }
            }
        }
        self.advance();
        Ok(self.alloc_slice(members))
    }

    fn parse_type_member(&mut self) -> ParseResult<TypeMember<'a>> {
        let start = self.start();

        if self.at(TokenKind::LeftParen) || self.at(TokenKind::Lt) {
            return Ok(TypeMember::Call(self.parse_signature(start)?));
        }
        if self.at_keyword("new") && matches!(self.peek(1).kind, TokenKind::LeftParen | TokenKind::Lt) {
            self.advance();
            return Ok(TypeMember::Construct(self.parse_signature(start)?));
        }

        let readonly = self.at_keyword("readonly") && Self::is_property_key_start(self.peek(1));
        if readonly {
            self.advance();
        }

        if self.at(TokenKind::LeftBracket)
            && self.peek(1).kind == TokenKind::Identifier
            && self.peek(2).kind == TokenKind::Colon
        {
            return Ok(TypeMember::Index(self.parse_index_signature(start, readonly, false)?));
        }

        // Accessor signatures are recorded as methods
        if (self.at_keyword("get") || self.at_keyword("set")) && Self::is_property_key_start(self.peek(1)) {
            self.advance();
        }

        let key = self.parse_property_key()?;
        let optional = self.eat(TokenKind::Question);

        if self.at(TokenKind::LeftParen) || self.at(TokenKind::Lt) {
            let signature = self.parse_signature(start)?;
            return Ok(TypeMember::Method(self.alloc(MethodSignature {
                key,
                signature,
                optional,
                span: self.span_from(start),
            })));
        }

        let type_annotation = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(TypeMember::Property(self.alloc(PropertySignature {
            key,
            type_annotation,
            optional,
            readonly,
            span: self.span_from(start),
        })))
    }

    fn parse_signature(&mut self, start: u32) -> ParseResult<&'a Signature<'a>> {
        let type_parameters = self.parse_type_parameters()?;
        let params = self.parse_parameters()?;
        let return_type = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(self.alloc(Signature {
            type_parameters,
            params,
            return_type,
            span: self.span_from(start),
        }))
    }

    /// `[name: K]: V`, cursor at `[`
    pub(crate) fn parse_index_signature(
        &mut self,
        start: u32,
        readonly: bool,
        is_static: bool,
    ) -> ParseResult<&'a IndexSignature<'a>> {
        self.expect(TokenKind::LeftBracket, "'['")?;
        let parameter = self.parse_identifier()?;
        self.expect(TokenKind::Colon, "':'")?;
        let key_type = self.parse_type()?;
        self.expect(TokenKind::RightBracket, "']'")?;
        self.expect(TokenKind::Colon, "':'")?;
        let type_annotation = self.parse_type()?;

        Ok(self.alloc(IndexSignature {
            parameter,
            key_type,
            type_annotation,
            readonly,
            is_static,
            span: self.span_from(start),
        }))
    }
}
