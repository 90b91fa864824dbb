use super::{ParseResult, Parser};
use crate::ast::*;
use crate::span::{HasSpan, Span};
use crate::token::TokenKind;

/// Binding power of `as` and `satisfies`, shared with relational operators
const RELATIONAL_PRECEDENCE: u8 = 7;

impl<'a> Parser<'a> {
    /// Comma-separated expression list
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let first = self.parse_assignment()?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }

        let mut expressions = vec![first];
        while self.eat(TokenKind::Comma) {
            expressions.push(self.parse_assignment()?);
        }
        Ok(Expression::Sequence(self.alloc(SequenceExpression {
            expressions: self.alloc_slice(expressions),
            span: self.span_from(start),
        })))
    }

    pub(crate) fn parse_assignment(&mut self) -> ParseResult<Expression<'a>> {
        if let Some(arrow) = self.try_parse_arrow()? {
            return Ok(arrow);
        }
        if self.at_keyword("yield") && !self.peek(1).newline_before {
            return self.parse_yield();
        }

        let start = self.start();
        let target = self.parse_conditional()?;

        let Some(operator) = assignment_operator(self.current().kind) else {
            return Ok(target);
        };
        self.advance();
        let value = self.parse_assignment()?;

        Ok(Expression::Assignment(self.alloc(AssignmentExpression {
            operator,
            target,
            value,
            span: self.span_from(start),
        })))
    }

    fn parse_yield(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.start();
        self.advance();
        let delegate = self.eat(TokenKind::Star);
        let next = self.current();
        let has_argument = delegate
            || (!next.newline_before
                && !matches!(
                    next.kind,
                    TokenKind::RightParen
                        | TokenKind::RightBracket
                        | TokenKind::RightBrace
                        | TokenKind::Comma
                        | TokenKind::Semicolon
                        | TokenKind::Colon
                        | TokenKind::Eof
                ));
        let argument = if has_argument {
            Some(self.parse_assignment()?)
        } else {
            None
        };
        Ok(Expression::Yield(self.alloc(YieldExpression {
            argument,
            delegate,
            span: self.span_from(start),
        })))
    }

    /// Arrow functions are recognized by trying to parse a parameter list
    /// followed by `=>`
    fn try_parse_arrow(&mut self) -> ParseResult<Option<Expression<'a>>> {
        let start = self.start();
        let next = self.peek(1);
        let is_async = self.at_keyword("async")
            && !next.newline_before
            && matches!(next.kind, TokenKind::Identifier | TokenKind::LeftParen | TokenKind::Lt);
        let offset = usize::from(is_async);
        let head = self.peek(offset);
        let after_head = self.peek(offset + 1);

        match head.kind {
            TokenKind::Identifier if after_head.kind == TokenKind::Arrow && !after_head.newline_before => {
                if is_async {
                    self.advance();
                }
                let ident = self.parse_identifier()?;
                self.advance();
                let params = self.alloc_slice(vec![Parameter {
                    pattern: Pattern::Identifier(ident),
                    type_annotation: None,
                    optional: false,
                    rest: false,
                    accessibility: None,
                    readonly: false,
                    span: ident.span,
                }]);
                let body = self.parse_arrow_body()?;
                Ok(Some(Expression::Arrow(self.alloc(ArrowFunction {
                    type_parameters: &[],
                    params,
                    return_type: None,
                    body,
                    is_async,
                    span: self.span_from(start),
                }))))
            }
            TokenKind::LeftParen | TokenKind::Lt => {
                let head = self.try_parse(|p| {
                    if is_async {
                        p.advance();
                    }
                    let type_parameters = p.parse_type_parameters()?;
                    let params = p.parse_parameters()?;
                    let return_type = if p.eat(TokenKind::Colon) {
                        Some(p.parse_type()?)
                    } else {
                        None
                    };
                    let arrow = p.current();
                    if arrow.kind == TokenKind::Arrow && !arrow.newline_before {
                        p.advance();
                        Ok(Some((type_parameters, params, return_type)))
                    } else {
                        Ok(None)
                    }
                });
                let Some((type_parameters, params, return_type)) = head else {
                    return Ok(None);
                };
                let body = self.parse_arrow_body()?;
                Ok(Some(Expression::Arrow(self.alloc(ArrowFunction {
                    type_parameters,
                    params,
                    return_type,
                    body,
                    is_async,
                    span: self.span_from(start),
                }))))
            }
            _ => Ok(None),
        }
    }

    fn parse_arrow_body(&mut self) -> ParseResult<ArrowBody<'a>> {
        if self.at(TokenKind::LeftBrace) {
            Ok(ArrowBody::Block(self.allow_in(|p| p.parse_block())?))
        } else {
            Ok(ArrowBody::Expression(self.parse_assignment()?))
        }
    }

    fn parse_conditional(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let test = self.parse_binary(1)?;
        if !self.eat(TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.allow_in(|p| p.parse_assignment())?;
        self.expect(TokenKind::Colon, "':'")?;
        let alternate = self.parse_assignment()?;

        Ok(Expression::Conditional(self.alloc(ConditionalExpression {
            test,
            consequent,
            alternate,
            span: self.span_from(start),
        })))
    }

    /// Binary operator at the cursor with its precedence and token count.
    /// Shift operators arrive as adjacent `>` tokens.
    fn binary_operator(&self) -> Option<(BinaryOperator, u8, usize)> {
        let token = self.current();
        let operator = match token.kind {
            TokenKind::QuestionQuestion => (BinaryOperator::Coalesce, 1, 1),
            TokenKind::PipePipe => (BinaryOperator::LogicalOr, 1, 1),
            TokenKind::AmpAmp => (BinaryOperator::LogicalAnd, 2, 1),
            TokenKind::Pipe => (BinaryOperator::BitwiseOr, 3, 1),
            TokenKind::Caret => (BinaryOperator::BitwiseXor, 4, 1),
            TokenKind::Amp => (BinaryOperator::BitwiseAnd, 5, 1),
            TokenKind::EqEq => (BinaryOperator::Equal, 6, 1),
            TokenKind::NotEq => (BinaryOperator::NotEqual, 6, 1),
            TokenKind::EqEqEq => (BinaryOperator::StrictEqual, 6, 1),
            TokenKind::NotEqEq => (BinaryOperator::StrictNotEqual, 6, 1),
            TokenKind::Lt => (BinaryOperator::LessThan, RELATIONAL_PRECEDENCE, 1),
            TokenKind::LtEq => (BinaryOperator::LessThanOrEqual, RELATIONAL_PRECEDENCE, 1),
            TokenKind::GtEq => (BinaryOperator::GreaterThanOrEqual, RELATIONAL_PRECEDENCE, 1),
            TokenKind::Gt => {
                let second = self.peek(1);
                let third = self.peek(2);
                let joined = |a: Span, b: Span| a.end == b.start;
                if second.kind == TokenKind::Gt && joined(token.span, second.span) {
                    if third.kind == TokenKind::Gt && joined(second.span, third.span) {
                        (BinaryOperator::UnsignedRightShift, 8, 3)
                    } else {
                        (BinaryOperator::RightShift, 8, 2)
                    }
                } else {
                    (BinaryOperator::GreaterThan, RELATIONAL_PRECEDENCE, 1)
                }
            }
            TokenKind::LtLt => (BinaryOperator::LeftShift, 8, 1),
            TokenKind::Plus => (BinaryOperator::Add, 9, 1),
            TokenKind::Minus => (BinaryOperator::Subtract, 9, 1),
            TokenKind::Star => (BinaryOperator::Multiply, 10, 1),
            TokenKind::Slash => (BinaryOperator::Divide, 10, 1),
            TokenKind::Percent => (BinaryOperator::Modulo, 10, 1),
            TokenKind::StarStar => (BinaryOperator::Exponent, 11, 1),
            TokenKind::Identifier => match self.text(token) {
                "instanceof" => (BinaryOperator::Instanceof, RELATIONAL_PRECEDENCE, 1),
                "in" if !self.no_in => (BinaryOperator::In, RELATIONAL_PRECEDENCE, 1),
                _ => return None,
            },
            _ => return None,
        };
        Some(operator)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> ParseResult<Expression<'a>> {
        let mut left = self.parse_unary()?;

        loop {
            let token = self.current();
            let is_assertion = (self.is_keyword(token, "as") || self.is_keyword(token, "satisfies"))
                && !token.newline_before;
            if is_assertion {
                if RELATIONAL_PRECEDENCE < min_precedence {
                    break;
                }
                self.advance();
                let start = left.span().start;
                left = if self.is_keyword(token, "as") {
                    let type_annotation = if self.at_keyword("const") {
                        let span = self.advance().span;
                        TypeNode::Keyword(KeywordType::Const, span)
                    } else {
                        self.parse_type()?
                    };
                    Expression::TypeAssertion(self.alloc(TypeAssertion {
                        expression: left,
                        type_annotation,
                        syntax: AssertionSyntax::As,
                        span: self.span_from(start),
                    }))
                } else {
                    let type_annotation = self.parse_type()?;
                    Expression::Satisfies(self.alloc(SatisfiesExpression {
                        expression: left,
                        type_annotation,
                        span: self.span_from(start),
                    }))
                };
                continue;
            }

            let Some((operator, precedence, token_count)) = self.binary_operator() else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            for _ in 0..token_count {
                self.advance();
            }

            // `**` is right-associative
            let next_min = if operator == BinaryOperator::Exponent {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary(next_min)?;
            let span = left.span().join(right.span());
            left = Expression::Binary(self.alloc(BinaryExpression {
                operator,
                left,
                right,
                span,
            }));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression<'a>> {
        self.nested(Self::parse_unary_body)
    }

    fn parse_unary_body(&mut self) -> ParseResult<Expression<'a>> {
        let token = self.current();
        let start = token.span.start;

        let operator = match token.kind {
            TokenKind::Bang => Some(UnaryOperator::Not),
            TokenKind::Minus => Some(UnaryOperator::Negate),
            TokenKind::Plus => Some(UnaryOperator::Plus),
            TokenKind::Tilde => Some(UnaryOperator::BitwiseNot),
            TokenKind::Identifier => match self.text(token) {
                "typeof" => Some(UnaryOperator::Typeof),
                "void" => Some(UnaryOperator::Void),
                "delete" => Some(UnaryOperator::Delete),
                "await" if self.starts_operand(1) => Some(UnaryOperator::Await),
                _ => None,
            },
            _ => None,
        };

        if let Some(operator) = operator {
            self.advance();
            let argument = self.parse_unary()?;
            return Ok(Expression::Unary(self.alloc(UnaryExpression {
                operator,
                argument,
                span: self.span_from(start),
            })));
        }

        match token.kind {
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                self.advance();
                let argument = self.parse_unary()?;
                Ok(Expression::Update(self.alloc(UpdateExpression {
                    operator: update_operator(token.kind),
                    prefix: true,
                    argument,
                    span: self.span_from(start),
                })))
            }
            TokenKind::Lt => {
                // `<T>expression`
                self.advance();
                let type_annotation = if self.at_keyword("const") {
                    let span = self.advance().span;
                    TypeNode::Keyword(KeywordType::Const, span)
                } else {
                    self.parse_type()?
                };
                self.expect(TokenKind::Gt, "'>'")?;
                let expression = self.parse_unary()?;
                Ok(Expression::TypeAssertion(self.alloc(TypeAssertion {
                    expression,
                    type_annotation,
                    syntax: AssertionSyntax::AngleBracket,
                    span: self.span_from(start),
                })))
            }
            _ => self.parse_postfix(),
        }
    }

    /// Whether the token `n` ahead can begin an operand
    fn starts_operand(&self, n: usize) -> bool {
        let token = self.peek(n);
        !matches!(
            token.kind,
            TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::RightBrace
                | TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::Colon
                | TokenKind::Dot
                | TokenKind::Eq
                | TokenKind::Arrow
                | TokenKind::Eof
        ) && !self.is_keyword(token, "as")
    }

    fn parse_postfix(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let argument = self.parse_left_hand_side()?;
        let token = self.current();
        if matches!(token.kind, TokenKind::PlusPlus | TokenKind::MinusMinus) && !token.newline_before {
            self.advance();
            return Ok(Expression::Update(self.alloc(UpdateExpression {
                operator: update_operator(token.kind),
                prefix: false,
                argument,
                span: self.span_from(start),
            })));
        }
        Ok(argument)
    }

    pub(crate) fn parse_left_hand_side(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let expression = if self.at_keyword("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_call_tail(expression, start, true)
    }

    fn parse_new(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.start();
        let new_token = self.advance();

        // new.target
        if self.at(TokenKind::Dot) {
            self.advance();
            let property = self.parse_identifier()?;
            return Ok(Expression::Member(self.alloc(MemberExpression {
                object: Expression::Identifier(Identifier {
                    name: "new",
                    span: new_token.span,
                }),
                property: MemberProperty::Named(property),
                optional: false,
                span: self.span_from(start),
            })));
        }

        let callee_start = self.start();
        let callee = if self.at_keyword("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        let callee = self.parse_call_tail(callee, callee_start, false)?;

        let type_arguments = if self.at(TokenKind::Lt) {
            self.try_parse(|p| Ok(Some(p.parse_type_arguments()?)))
        } else {
            None
        };
        let arguments = if self.at(TokenKind::LeftParen) {
            self.parse_arguments()?
        } else {
            &[]
        };

        Ok(Expression::New(self.alloc(NewExpression {
            callee,
            type_arguments,
            arguments,
            span: self.span_from(start),
        })))
    }

    /// Member accesses, calls, non-null assertions and tagged templates
    fn parse_call_tail(
        &mut self,
        mut expression: Expression<'a>,
        start: u32,
        allow_call: bool,
    ) -> ParseResult<Expression<'a>> {
        loop {
            let token = self.current();
            match token.kind {
                TokenKind::Dot => {
                    self.advance();
                    let property = self.parse_member_name()?;
                    expression = self.member(expression, property, false, start);
                }
                TokenKind::QuestionDot => {
                    self.advance();
                    match self.current().kind {
                        TokenKind::LeftBracket => {
                            self.advance();
                            let index = self.allow_in(|p| p.parse_expression())?;
                            self.expect(TokenKind::RightBracket, "']'")?;
                            expression = self.member(expression, MemberProperty::Computed(index), true, start);
                        }
                        TokenKind::LeftParen | TokenKind::Lt => {
                            let type_arguments = if self.at(TokenKind::Lt) {
                                Some(self.parse_type_arguments()?)
                            } else {
                                None
                            };
                            let arguments = self.parse_arguments()?;
                            expression = self.call(expression, type_arguments, arguments, true, start);
                        }
                        _ => {
                            let property = self.parse_member_name()?;
                            expression = self.member(expression, property, true, start);
                        }
                    }
                }
                TokenKind::LeftBracket => {
                    self.advance();
                    let index = self.allow_in(|p| p.parse_expression())?;
                    self.expect(TokenKind::RightBracket, "']'")?;
                    expression = self.member(expression, MemberProperty::Computed(index), false, start);
                }
                TokenKind::LeftParen if allow_call => {
                    let arguments = self.parse_arguments()?;
                    expression = self.call(expression, None, arguments, false, start);
                }
                TokenKind::Lt if allow_call => {
                    let type_arguments = self.try_parse(|p| {
                        let arguments = p.parse_type_arguments()?;
                        let next = p.current().kind;
                        let continues = matches!(
                            next,
                            TokenKind::LeftParen | TokenKind::Template | TokenKind::TemplateHead
                        );
                        Ok(continues.then_some(arguments))
                    });
                    let Some(type_arguments) = type_arguments else {
                        break;
                    };
                    if self.at(TokenKind::LeftParen) {
                        let arguments = self.parse_arguments()?;
                        expression = self.call(expression, Some(type_arguments), arguments, false, start);
                    } else {
                        let template = self.parse_template()?;
                        expression = Expression::TaggedTemplate(self.alloc(TaggedTemplate {
                            tag: expression,
                            type_arguments: Some(type_arguments),
                            template,
                            span: self.span_from(start),
                        }));
                    }
                }
                TokenKind::Bang if !token.newline_before => {
                    self.advance();
                    expression = Expression::NonNull(self.alloc(NonNullExpression {
                        expression,
                        span: self.span_from(start),
                    }));
                }
                TokenKind::Template | TokenKind::TemplateHead => {
                    let template = self.parse_template()?;
                    expression = Expression::TaggedTemplate(self.alloc(TaggedTemplate {
                        tag: expression,
                        type_arguments: None,
                        template,
                        span: self.span_from(start),
                    }));
                }
                _ => break,
            }
        }
        Ok(expression)
    }

    fn parse_member_name(&mut self) -> ParseResult<MemberProperty<'a>> {
        let token = self.current();
        if token.kind == TokenKind::PrivateName {
            self.advance();
            return Ok(MemberProperty::Private(Identifier {
                name: &self.text(token)[1..],
                span: token.span,
            }));
        }
        Ok(MemberProperty::Named(self.parse_identifier()?))
    }

    fn member(
        &self,
        object: Expression<'a>,
        property: MemberProperty<'a>,
        optional: bool,
        start: u32,
    ) -> Expression<'a> {
        Expression::Member(self.alloc(MemberExpression {
            object,
            property,
            optional,
            span: self.span_from(start),
        }))
    }

    fn call(
        &self,
        callee: Expression<'a>,
        type_arguments: Option<&'a [TypeNode<'a>]>,
        arguments: &'a [Argument<'a>],
        optional: bool,
        start: u32,
    ) -> Expression<'a> {
        Expression::Call(self.alloc(CallExpression {
            callee,
            type_arguments,
            arguments,
            optional,
            span: self.span_from(start),
        }))
    }

    fn parse_arguments(&mut self) -> ParseResult<&'a [Argument<'a>]> {
        self.expect(TokenKind::LeftParen, "'('")?;
        let arguments = self.allow_in(|p| {
            let mut arguments = Vec::new();
            while !p.at(TokenKind::RightParen) {
                let start = p.start();
                if p.eat(TokenKind::DotDotDot) {
                    let argument = p.parse_assignment()?;
                    arguments.push(Argument::Spread(p.alloc(SpreadElement {
                        argument,
                        span: p.span_from(start),
                    })));
                } else {
                    arguments.push(Argument::Expression(p.parse_assignment()?));
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            Ok(arguments)
        })?;
        self.expect(TokenKind::RightParen, "')'")?;
        Ok(self.alloc_slice(arguments))
    }

    fn parse_primary(&mut self) -> ParseResult<Expression<'a>> {
        let token = self.current();
        let start = token.span.start;

        match token.kind {
            TokenKind::Identifier => {
                let literal = match self.text(token) {
                    "this" => {
                        self.advance();
                        return Ok(Expression::This(token.span));
                    }
                    "super" => {
                        self.advance();
                        return Ok(Expression::Super(token.span));
                    }
                    "function" => {
                        let function = self.parse_function(start, false, false)?;
                        return Ok(Expression::Function(function));
                    }
                    "async" if self.peek_is_keyword(1, "function") && !self.peek(1).newline_before => {
                        self.advance();
                        let function = self.parse_function(start, true, false)?;
                        return Ok(Expression::Function(function));
                    }
                    "class" => {
                        let class = self.parse_class(start, false, false)?;
                        return Ok(Expression::Class(class));
                    }
                    "null" => LiteralKind::Null,
                    "true" => LiteralKind::Boolean(true),
                    "false" => LiteralKind::Boolean(false),
                    _ => return Ok(Expression::Identifier(self.parse_identifier()?)),
                };
                self.advance();
                Ok(self.literal(literal, token.span))
            }
            TokenKind::Number => {
                self.advance();
                Ok(self.literal(LiteralKind::Number(self.text(token)), token.span))
            }
            TokenKind::BigInt => {
                self.advance();
                Ok(self.literal(LiteralKind::BigInt(self.text(token)), token.span))
            }
            TokenKind::String => {
                self.advance();
                Ok(self.literal(LiteralKind::String(self.string_value(token)), token.span))
            }
            TokenKind::Regex => {
                self.advance();
                Ok(self.literal(LiteralKind::Regex(self.text(token)), token.span))
            }
            TokenKind::Template | TokenKind::TemplateHead => Ok(Expression::Template(self.parse_template()?)),
            TokenKind::LeftParen => {
                self.advance();
                let expression = self.allow_in(|p| p.parse_expression())?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(Expression::Parenthesized(self.alloc(ParenthesizedExpression {
                    expression,
                    span: self.span_from(start),
                })))
            }
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::LeftBrace => self.parse_object_literal(),
            TokenKind::At => {
                self.skip_decorators()?;
                let class_start = self.start();
                let class = self.parse_class(class_start, false, false)?;
                Ok(Expression::Class(class))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn literal(&self, kind: LiteralKind<'a>, span: Span) -> Expression<'a> {
        Expression::Literal(self.alloc(Literal { kind, span }))
    }

    pub(crate) fn parse_template(&mut self) -> ParseResult<&'a TemplateLiteral<'a>> {
        let start = self.start();
        let first = self.advance();
        let first_text = self.text(first);
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();

        match first.kind {
            TokenKind::Template => {
                quasis.push(first_text.get(1..first_text.len() - 1).unwrap_or(""));
            }
            TokenKind::TemplateHead => {
                quasis.push(first_text.get(1..first_text.len() - 2).unwrap_or(""));
                loop {
                    expressions.push(self.allow_in(|p| p.parse_expression())?);
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
            _ => return Err(self.unexpected("template literal")),
        }

        Ok(self.alloc(TemplateLiteral {
            quasis: self.alloc_slice(quasis),
            expressions: self.alloc_slice(expressions),
            span: self.span_from(start),
        }))
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.start();
        self.expect(TokenKind::LeftBracket, "'['")?;
        let elements = self.allow_in(|p| {
            let mut elements = Vec::new();
            while !p.at(TokenKind::RightBracket) {
                let element_start = p.start();
                if p.at(TokenKind::Comma) {
                    let span = p.advance().span;
                    elements.push(ArrayElement::Hole(span));
                    continue;
                }
                if p.eat(TokenKind::DotDotDot) {
                    let argument = p.parse_assignment()?;
                    elements.push(ArrayElement::Spread(p.alloc(SpreadElement {
                        argument,
                        span: p.span_from(element_start),
                    })));
                } else {
                    elements.push(ArrayElement::Expression(p.parse_assignment()?));
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            Ok(elements)
        })?;
        self.expect(TokenKind::RightBracket, "']'")?;

        Ok(Expression::Array(self.alloc(ArrayLiteral {
            elements: self.alloc_slice(elements),
            span: self.span_from(start),
        })))
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.start();
        self.expect(TokenKind::LeftBrace, "'{'")?;
        let properties = self.allow_in(|p| {
            let mut properties = Vec::new();
            while !p.at(TokenKind::RightBrace) {
                properties.push(p.parse_object_property()?);
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            Ok(properties)
        })?;
        self.expect(TokenKind::RightBrace, "'}'")?;

        Ok(Expression::Object(self.alloc(ObjectLiteral {
            properties: self.alloc_slice(properties),
            span: self.span_from(start),
        })))
    }

    fn parse_object_property(&mut self) -> ParseResult<ObjectProperty<'a>> {
        let start = self.start();

        if self.eat(TokenKind::DotDotDot) {
            let argument = self.parse_assignment()?;
            return Ok(ObjectProperty::Spread(self.alloc(SpreadElement {
                argument,
                span: self.span_from(start),
            })));
        }

        // `async`, `get`, `set` and `*` are modifiers only when a key follows
        let mut is_async = false;
        let mut kind = MethodKind::Method;
        let next = self.peek(1);
        let modifier_applies = Self::is_property_key_start(next) || next.kind == TokenKind::Star;
        if modifier_applies && !next.newline_before {
            if self.at_keyword("async") {
                self.advance();
                is_async = true;
            } else if self.at_keyword("get") {
                self.advance();
                kind = MethodKind::Get;
            } else if self.at_keyword("set") {
                self.advance();
                kind = MethodKind::Set;
            }
        }
        let is_generator = self.eat(TokenKind::Star);

        let key = self.parse_property_key()?;

        if self.at(TokenKind::LeftParen) || self.at(TokenKind::Lt) {
            let function = self.parse_function_rest(start, None, is_async, is_generator, false)?;
            return Ok(ObjectProperty::Method {
                key,
                kind,
                function,
                span: self.span_from(start),
            });
        }

        if self.eat(TokenKind::Colon) {
            let value = self.parse_assignment()?;
            return Ok(ObjectProperty::KeyValue {
                key,
                value,
                span: self.span_from(start),
            });
        }

        let PropertyKey::Identifier(ident) = key else {
            return Err(self.unexpected("':'"));
        };

        // `{ a = 1 } = value` destructuring default
        if self.eat(TokenKind::Eq) {
            let default = self.parse_assignment()?;
            let value = Expression::Assignment(self.alloc(AssignmentExpression {
                operator: AssignmentOperator::Assign,
                target: Expression::Identifier(ident),
                value: default,
                span: self.span_from(start),
            }));
            return Ok(ObjectProperty::KeyValue {
                key,
                value,
                span: self.span_from(start),
            });
        }

        Ok(ObjectProperty::Shorthand(ident))
    }
}

fn assignment_operator(kind: TokenKind) -> Option<AssignmentOperator> {
    Some(match kind {
        TokenKind::Eq => AssignmentOperator::Assign,
        TokenKind::PlusEq => AssignmentOperator::Add,
        TokenKind::MinusEq => AssignmentOperator::Subtract,
        TokenKind::StarEq => AssignmentOperator::Multiply,
        TokenKind::SlashEq => AssignmentOperator::Divide,
        TokenKind::PercentEq => AssignmentOperator::Modulo,
        TokenKind::StarStarEq => AssignmentOperator::Exponent,
        TokenKind::LtLtEq => AssignmentOperator::LeftShift,
        TokenKind::GtGtEq => AssignmentOperator::RightShift,
        TokenKind::GtGtGtEq => AssignmentOperator::UnsignedRightShift,
        TokenKind::AmpEq => AssignmentOperator::BitwiseAnd,
        TokenKind::PipeEq => AssignmentOperator::BitwiseOr,
        TokenKind::CaretEq => AssignmentOperator::BitwiseXor,
        TokenKind::AmpAmpEq => AssignmentOperator::LogicalAnd,
        TokenKind::PipePipeEq => AssignmentOperator::LogicalOr,
        TokenKind::QuestionQuestionEq => AssignmentOperator::Coalesce,
        _ => return None,
    })
}

fn update_operator(kind: TokenKind) -> UpdateOperator {
    if kind == TokenKind::PlusPlus {
        UpdateOperator::Increment
    } else {
        UpdateOperator::Decrement
    }
}
