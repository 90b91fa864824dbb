use super::{ParseResult, Parser};
use crate::ast::*;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.nested(Self::parse_statement_body)
    }

    fn parse_statement_body(&mut self) -> ParseResult<Statement<'a>> {
        let token = self.current();
        let start = token.span.start;

        match token.kind {
            TokenKind::LeftBrace => return Ok(Statement::Block(self.parse_block()?)),
            TokenKind::Semicolon => {
                self.advance();
                return Ok(Statement::Empty(token.span));
            }
            TokenKind::At => {
                self.skip_decorators()?;
                return self.parse_statement();
            }
            TokenKind::Identifier => {}
            _ => return self.parse_expression_statement(),
        }

        if let Some(declaration) = self.try_parse_declaration(start, false)? {
            return Ok(declaration);
        }

        match self.text(token) {
            "if" => self.parse_if(),
            "for" => self.parse_for(),
            "while" => {
                self.advance();
                let test = self.parse_parenthesized_condition()?;
                let body = self.parse_statement()?;
                Ok(Statement::While(self.alloc(WhileStatement {
                    test,
                    body,
                    span: self.span_from(start),
                })))
            }
            "do" => {
                self.advance();
                let body = self.parse_statement()?;
                self.expect_keyword("while")?;
                let test = self.parse_parenthesized_condition()?;
                self.eat(TokenKind::Semicolon);
                Ok(Statement::DoWhile(self.alloc(DoWhileStatement {
                    body,
                    test,
                    span: self.span_from(start),
                })))
            }
            "return" => {
                self.advance();
                let argument = if self.ends_statement() {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.consume_semicolon()?;
                Ok(Statement::Return(self.alloc(ReturnStatement {
                    argument,
                    span: self.span_from(start),
                })))
            }
            "throw" => {
                self.advance();
                let argument = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(Statement::Throw(self.alloc(ThrowStatement {
                    argument,
                    span: self.span_from(start),
                })))
            }
            "break" | "continue" => {
                self.advance();
                let label = if self.at(TokenKind::Identifier) && !self.current().newline_before {
                    Some(self.parse_identifier()?)
                } else {
                    None
                };
                self.consume_semicolon()?;
                let jump = self.alloc(JumpStatement {
                    label,
                    span: self.span_from(start),
                });
                if self.is_keyword(token, "break") {
                    Ok(Statement::Break(jump))
                } else {
                    Ok(Statement::Continue(jump))
                }
            }
            "switch" => self.parse_switch(),
            "try" => self.parse_try(),
            "debugger" => {
                self.advance();
                self.consume_semicolon()?;
                Ok(Statement::Debugger(self.span_from(start)))
            }
            _ if self.peek(1).kind == TokenKind::Colon => {
                let label = self.parse_identifier()?;
                self.advance();
                let body = self.parse_statement()?;
                Ok(Statement::Labeled(self.alloc(LabeledStatement {
                    label,
                    body,
                    span: self.span_from(start),
                })))
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn ends_statement(&self) -> bool {
        let token = self.current();
        token.newline_before
            || matches!(
                token.kind,
                TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof
            )
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.start();
        let expression = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::Expression(self.alloc(ExpressionStatement {
            expression,
            span: self.span_from(start),
        })))
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<&'a BlockStatement<'a>> {
        let start = self.start();
        self.expect(TokenKind::LeftBrace, "'{'")?;
        let mut statements = Vec::new();
        while !self.at(TokenKind::RightBrace) {
            if self.at(TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }
            statements.push(self.parse_statement()?);
        }
        self.advance();
        Ok(self.alloc(BlockStatement {
            statements: self.alloc_slice(statements),
            span: self.span_from(start),
        }))
    }

    fn parse_parenthesized_condition(&mut self) -> ParseResult<Expression<'a>> {
        self.expect(TokenKind::LeftParen, "'('")?;
        let expression = self.allow_in(|p| p.parse_expression())?;
        self.expect(TokenKind::RightParen, "')'")?;
        Ok(expression)
    }

    /// Whether the cursor starts a `let`/`const`/`var`/`using` declaration
    fn at_variable_declaration(&self) -> bool {
        let token = self.current();
        if token.kind != TokenKind::Identifier {
            return false;
        }
        let next = self.peek(1);
        match self.text(token) {
            "var" => true,
            "const" => !self.peek_is_keyword(1, "enum"),
            "let" => matches!(
                next.kind,
                TokenKind::Identifier | TokenKind::LeftBracket | TokenKind::LeftBrace
            ) && !self.is_keyword(next, "in")
                && !self.is_keyword(next, "of"),
            "using" => next.kind == TokenKind::Identifier && !next.newline_before && !self.is_keyword(next, "of"),
            "await" => self.peek_is_keyword(1, "using") && self.peek(2).kind == TokenKind::Identifier,
            _ => false,
        }
    }

    /// Declarations that may follow `export` or `declare`
    fn try_parse_declaration(&mut self, start: u32, declare: bool) -> ParseResult<Option<Statement<'a>>> {
        let token = self.current();
        let next = self.peek(1);
        let same_line = !next.newline_before;

        if self.at_variable_declaration() {
            let declaration = self.parse_variable_declaration(start, declare)?;
            self.consume_semicolon()?;
            return Ok(Some(Statement::Variable(declaration)));
        }

        let statement = match self.text(token) {
            "function" => Statement::Function(self.parse_function(start, false, declare)?),
            "async" if self.is_keyword(next, "function") && same_line => {
                self.advance();
                Statement::Function(self.parse_function(start, true, declare)?)
            }
            "class" => Statement::Class(self.parse_class(start, false, declare)?),
            "abstract" if self.is_keyword(next, "class") && same_line => {
                self.advance();
                Statement::Class(self.parse_class(start, true, declare)?)
            }
            "interface" if next.kind == TokenKind::Identifier && same_line => {
                Statement::Interface(self.parse_interface(start, declare)?)
            }
            "type" if next.kind == TokenKind::Identifier
                && same_line
                && matches!(self.peek(2).kind, TokenKind::Eq | TokenKind::Lt) =>
            {
                Statement::TypeAlias(self.parse_type_alias(start, declare)?)
            }
            "enum" if next.kind == TokenKind::Identifier => Statement::Enum(self.parse_enum(start, false, declare)?),
            "const" if self.is_keyword(next, "enum") => {
                self.advance();
                Statement::Enum(self.parse_enum(start, true, declare)?)
            }
            "namespace" | "module"
                if same_line && matches!(next.kind, TokenKind::Identifier | TokenKind::String) =>
            {
                Statement::Namespace(self.parse_namespace(start, declare)?)
            }
            "global" if declare && next.kind == TokenKind::LeftBrace => {
                self.advance();
                let body = self.parse_block()?;
                Statement::Namespace(self.alloc(NamespaceDeclaration {
                    name: NamespaceName::Global,
                    body: Some(body),
                    declare,
                    span: self.span_from(start),
                }))
            }
            "declare" if !declare && next.kind == TokenKind::Identifier && same_line => {
                self.advance();
                match self.try_parse_declaration(start, true)? {
                    Some(statement) => statement,
                    None => return Err(self.unexpected("declaration")),
                }
            }
            "import" if !declare && !matches!(next.kind, TokenKind::LeftParen | TokenKind::Dot) => {
                Statement::Import(self.parse_import(start)?)
            }
            "export" if !declare => Statement::Export(self.parse_export(start)?),
            _ => return Ok(None),
        };
        Ok(Some(statement))
    }

    /// `const a: T = x, b = y` without the trailing semicolon
    pub(crate) fn parse_variable_declaration(
        &mut self,
        start: u32,
        declare: bool,
    ) -> ParseResult<&'a VariableDeclaration<'a>> {
        self.eat_keyword("await");
        let keyword = self.advance();
        let kind = match self.text(keyword) {
            "var" => VariableKind::Var,
            "let" => VariableKind::Let,
            "const" => VariableKind::Const,
            _ => VariableKind::Using,
        };

        let mut declarators = Vec::new();
        loop {
            let declarator_start = self.start();
            let pattern = self.parse_binding_pattern()?;
            let definite = self.eat(TokenKind::Bang);
            let type_annotation = if self.eat(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarators.push(VariableDeclarator {
                pattern,
                type_annotation,
                definite,
                init,
                span: self.span_from(declarator_start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        Ok(self.alloc(VariableDeclaration {
            kind,
            declarators: self.alloc_slice(declarators),
            declare,
            span: self.span_from(start),
        }))
    }

    fn parse_if(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.start();
        self.advance();
        let test = self.parse_parenthesized_condition()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat_keyword("else") {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(Statement::If(self.alloc(IfStatement {
            test,
            consequent,
            alternate,
            span: self.span_from(start),
        })))
    }

    fn parse_for(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.start();
        self.advance();
        let is_await = self.eat_keyword("await");
        self.expect(TokenKind::LeftParen, "'('")?;

        let init = if self.at(TokenKind::Semicolon) {
            None
        } else {
            let saved = self.no_in;
            self.no_in = true;
            let init = if self.at_variable_declaration() {
                let init_start = self.start();
                self.parse_variable_declaration(init_start, false).map(ForInit::Variable)
            } else {
                self.parse_expression().map(ForInit::Expression)
            };
            self.no_in = saved;
            Some(init?)
        };

        if let Some(left) = init {
            let kind = if self.eat_keyword("of") {
                Some(ForInKind::Of)
            } else if self.eat_keyword("in") {
                Some(ForInKind::In)
            } else {
                None
            };
            if let Some(kind) = kind {
                let right = if kind == ForInKind::Of {
                    self.allow_in(|p| p.parse_assignment())?
                } else {
                    self.allow_in(|p| p.parse_expression())?
                };
                self.expect(TokenKind::RightParen, "')'")?;
                let body = self.parse_statement()?;
                return Ok(Statement::ForIn(self.alloc(ForInStatement {
                    kind,
                    is_await,
                    left,
                    right,
                    body,
                    span: self.span_from(start),
                })));
            }
        }

        self.expect(TokenKind::Semicolon, "';'")?;
        let test = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.allow_in(|p| p.parse_expression())?)
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        let update = if self.at(TokenKind::RightParen) {
            None
        } else {
            Some(self.allow_in(|p| p.parse_expression())?)
        };
        self.expect(TokenKind::RightParen, "')'")?;
        let body = self.parse_statement()?;

        Ok(Statement::For(self.alloc(ForStatement {
            init,
            test,
            update,
            body,
            span: self.span_from(start),
        })))
    }

    fn parse_switch(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.start();
        self.advance();
        let discriminant = self.parse_parenthesized_condition()?;
        self.expect(TokenKind::LeftBrace, "'{'")?;

        let mut cases = Vec::new();
        while !self.at(TokenKind::RightBrace) {
            let case_start = self.start();
            let test = if self.eat_keyword("case") {
                Some(self.allow_in(|p| p.parse_expression())?)
            } else {
                self.expect_keyword("default")?;
                None
            };
            self.expect(TokenKind::Colon, "':'")?;

            let mut consequent = Vec::new();
            while !self.at(TokenKind::RightBrace) && !self.at_keyword("case") && !self.at_keyword("default") {
                if self.at(TokenKind::Eof) {
                    return Err(self.unexpected("'}'"));
                }
                consequent.push(self.parse_statement()?);
            }
            cases.push(SwitchCase {
                test,
                consequent: self.alloc_slice(consequent),
                span: self.span_from(case_start),
            });
        }
        self.advance();

        Ok(Statement::Switch(self.alloc(SwitchStatement {
            discriminant,
            cases: self.alloc_slice(cases),
            span: self.span_from(start),
        })))
    }

    fn parse_try(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.start();
        self.advance();
        let block = self.parse_block()?;

        let handler = if self.at_keyword("catch") {
            let catch_start = self.start();
            self.advance();
            let (param, type_annotation) = if self.eat(TokenKind::LeftParen) {
                let param = self.parse_binding_pattern()?;
                let type_annotation = if self.eat(TokenKind::Colon) {
                    Some(self.parse_type()?)
                } else {
                    None
                };
                self.expect(TokenKind::RightParen, "')'")?;
                (Some(param), type_annotation)
            } else {
                (None, None)
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                param,
                type_annotation,
                body,
                span: self.span_from(catch_start),
            })
        } else {
            None
        };

        let finalizer = if self.eat_keyword("finally") {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected("'catch' or 'finally'"));
        }

        Ok(Statement::Try(self.alloc(TryStatement {
            block,
            handler,
            finalizer,
            span: self.span_from(start),
        })))
    }

    /// Class declarations and expressions, starting at `class`
    pub(crate) fn parse_class(&mut self, start: u32, is_abstract: bool, declare: bool) -> ParseResult<&'a Class<'a>> {
        self.expect_keyword("class")?;
        let id = if self.at(TokenKind::Identifier) && !self.at_keyword("extends") && !self.at_keyword("implements") {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters()?;

        let mut extends = None;
        let mut super_type_arguments = None;
        if self.eat_keyword("extends") {
            extends = Some(self.parse_left_hand_side()?);
            if self.at(TokenKind::Lt) {
                super_type_arguments = Some(self.parse_type_arguments()?);
            }
        }

        let mut implements = Vec::new();
        if self.eat_keyword("implements") {
            loop {
                implements.push(self.parse_type_reference()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::LeftBrace, "'{'")?;
        let mut members = Vec::new();
        while !self.at(TokenKind::RightBrace) {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            if self.at(TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }
            members.push(self.parse_class_member()?);
        }
        self.advance();

        Ok(self.alloc(Class {
            id,
            type_parameters,
            extends,
            super_type_arguments,
            implements: self.alloc_slice(implements),
            members: self.alloc_slice(members),
            is_abstract,
            declare,
            span: self.span_from(start),
        }))
    }

    fn parse_class_member(&mut self) -> ParseResult<ClassMember<'a>> {
        let start = self.start();
        self.skip_decorators()?;

        if self.at_keyword("static") && self.peek(1).kind == TokenKind::LeftBrace {
            self.advance();
            return Ok(ClassMember::StaticBlock(self.parse_block()?));
        }

        let mut accessibility = None;
        let mut is_static = false;
        let mut readonly = false;
        let mut is_abstract = false;
        let mut declare = false;
        let mut is_async = false;

        // A modifier word followed by one of these is itself the member name
        loop {
            let next = self.peek(1);
            let is_modifier_position = !matches!(
                next.kind,
                TokenKind::LeftParen
                    | TokenKind::Lt
                    | TokenKind::Eq
                    | TokenKind::Semicolon
                    | TokenKind::Colon
                    | TokenKind::Question
                    | TokenKind::Bang
                    | TokenKind::RightBrace
                    | TokenKind::Eof
            );
            if !self.at(TokenKind::Identifier) || !is_modifier_position {
                break;
            }
            match self.text(self.current()) {
                "public" => accessibility = Some(Accessibility::Public),
                "protected" => accessibility = Some(Accessibility::Protected),
                "private" => accessibility = Some(Accessibility::Private),
                "static" => is_static = true,
                "readonly" => readonly = true,
                "abstract" => is_abstract = true,
                "declare" => declare = true,
                "async" if !next.newline_before => is_async = true,
                "override" | "accessor" => {}
                _ => break,
            }
            self.advance();
        }

        let is_generator = self.eat(TokenKind::Star);

        let mut kind = MethodKind::Method;
        if (self.at_keyword("get") || self.at_keyword("set")) && Self::is_property_key_start(self.peek(1)) {
            kind = if self.at_keyword("get") {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            self.advance();
        }

        // `[key: string]: T`
        if self.at(TokenKind::LeftBracket)
            && self.peek(1).kind == TokenKind::Identifier
            && self.peek(2).kind == TokenKind::Colon
        {
            let signature = self.parse_index_signature(start, readonly, is_static)?;
            self.consume_semicolon()?;
            return Ok(ClassMember::IndexSignature(signature));
        }

        let key = self.parse_property_key()?;
        let optional = self.eat(TokenKind::Question);
        self.eat(TokenKind::Bang);

        if self.at(TokenKind::LeftParen) || self.at(TokenKind::Lt) {
            if matches!(key, PropertyKey::Identifier(ident) if ident.name == "constructor") {
                kind = MethodKind::Constructor;
            }
            let function = self.parse_function_rest(start, None, is_async, is_generator, declare)?;
            return Ok(ClassMember::Method(self.alloc(ClassMethod {
                key,
                kind,
                function,
                is_static,
                is_abstract,
                optional,
                accessibility,
                span: self.span_from(start),
            })));
        }

        let type_annotation = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let value = if self.eat(TokenKind::Eq) {
            Some(self.allow_in(|p| p.parse_assignment())?)
        } else {
            None
        };
        self.consume_semicolon()?;

        Ok(ClassMember::Property(self.alloc(ClassProperty {
            key,
            type_annotation,
            value,
            is_static,
            optional,
            readonly,
            declare,
            accessibility,
            span: self.span_from(start),
        })))
    }

    fn parse_interface(&mut self, start: u32, declare: bool) -> ParseResult<&'a InterfaceDeclaration<'a>> {
        self.expect_keyword("interface")?;
        let name = self.parse_identifier()?;
        let type_parameters = self.parse_type_parameters()?;

        let mut extends = Vec::new();
        if self.eat_keyword("extends") {
            loop {
                extends.push(self.parse_type_reference()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let members = self.parse_type_members()?;

        Ok(self.alloc(InterfaceDeclaration {
            name,
            type_parameters,
            extends: self.alloc_slice(extends),
            members,
            declare,
            span: self.span_from(start),
        }))
    }

    fn parse_type_alias(&mut self, start: u32, declare: bool) -> ParseResult<&'a TypeAliasDeclaration<'a>> {
        self.expect_keyword("type")?;
        let name = self.parse_identifier()?;
        let type_parameters = self.parse_type_parameters()?;
        self.expect(TokenKind::Eq, "'='")?;
        let type_annotation = self.parse_type()?;
        self.consume_semicolon()?;

        Ok(self.alloc(TypeAliasDeclaration {
            name,
            type_parameters,
            type_annotation,
            declare,
            span: self.span_from(start),
        }))
    }

    fn parse_enum(&mut self, start: u32, is_const: bool, declare: bool) -> ParseResult<&'a EnumDeclaration<'a>> {
        self.expect_keyword("enum")?;
        let name = self.parse_identifier()?;
        self.expect(TokenKind::LeftBrace, "'{'")?;

        let mut members = Vec::new();
        while !self.at(TokenKind::RightBrace) {
            let member_start = self.start();
            let member_name = self.parse_property_key()?;
            let initializer = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            members.push(EnumMember {
                name: member_name,
                initializer,
                span: self.span_from(member_start),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBrace, "'}'")?;

        Ok(self.alloc(EnumDeclaration {
            name,
            members: self.alloc_slice(members),
            is_const,
            declare,
            span: self.span_from(start),
        }))
    }

    fn parse_namespace(&mut self, start: u32, declare: bool) -> ParseResult<&'a NamespaceDeclaration<'a>> {
        self.advance();
        let token = self.current();
        let name = if token.kind == TokenKind::String {
            self.advance();
            NamespaceName::String(self.string_value(token))
        } else {
            NamespaceName::Identifier(self.parse_entity_name()?)
        };

        let body = if self.at(TokenKind::LeftBrace) {
            Some(self.parse_block()?)
        } else {
            self.consume_semicolon()?;
            None
        };

        Ok(self.alloc(NamespaceDeclaration {
            name,
            body,
            declare,
            span: self.span_from(start),
        }))
    }

    fn parse_module_specifier(&mut self) -> ParseResult<&'a str> {
        let token = self.expect(TokenKind::String, "module specifier")?;
        Ok(self.string_value(token))
    }

    /// `with { type: "json" }` / `assert { ... }`
    fn skip_import_attributes(&mut self) -> ParseResult<()> {
        if (self.at_keyword("with") || self.at_keyword("assert")) && self.peek(1).kind == TokenKind::LeftBrace {
            self.advance();
            self.parse_object_literal_for_attributes()?;
        }
        Ok(())
    }

    fn parse_object_literal_for_attributes(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::LeftBrace, "'{'")?;
        while !self.at(TokenKind::RightBrace) {
            self.parse_property_key()?;
            self.expect(TokenKind::Colon, "':'")?;
            self.expect(TokenKind::String, "string")?;
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBrace, "'}'")?;
        Ok(())
    }

    fn parse_import(&mut self, start: u32) -> ParseResult<&'a ImportDeclaration<'a>> {
        self.expect_keyword("import")?;

        // `import type X` but not `import type from "m"` or `import type = ...`
        let type_only = self.at_keyword("type")
            && !self.peek_is_keyword(1, "from")
            && !matches!(self.peek(1).kind, TokenKind::Eq | TokenKind::Comma);
        if type_only {
            self.advance();
        }

        // Side-effect import
        if self.at(TokenKind::String) {
            let source = self.parse_module_specifier()?;
            self.skip_import_attributes()?;
            self.consume_semicolon()?;
            return Ok(self.alloc(ImportDeclaration {
                specifiers: &[],
                source: ImportSource::Module(source),
                type_only,
                span: self.span_from(start),
            }));
        }

        let mut specifiers = Vec::new();

        if self.at(TokenKind::Identifier) {
            let local = self.parse_identifier()?;

            // `import name = require("m")` / `import name = A.B`
            if self.eat(TokenKind::Eq) {
                let source = if self.at_keyword("require") && self.peek(1).kind == TokenKind::LeftParen {
                    self.advance();
                    self.advance();
                    let module = self.parse_module_specifier()?;
                    self.expect(TokenKind::RightParen, "')'")?;
                    ImportSource::Require(module)
                } else {
                    ImportSource::Entity(self.parse_entity_name()?)
                };
                self.consume_semicolon()?;
                return Ok(self.alloc(ImportDeclaration {
                    specifiers: self.alloc_slice(vec![ImportSpecifier::Default(local)]),
                    source,
                    type_only,
                    span: self.span_from(start),
                }));
            }

            specifiers.push(ImportSpecifier::Default(local));
            self.eat(TokenKind::Comma);
        }

        if self.eat(TokenKind::Star) {
            self.expect_keyword("as")?;
            specifiers.push(ImportSpecifier::Namespace(self.parse_identifier()?));
        } else if self.eat(TokenKind::LeftBrace) {
            while !self.at(TokenKind::RightBrace) {
                let specifier_type_only = self.at_keyword("type")
                    && matches!(self.peek(1).kind, TokenKind::Identifier | TokenKind::String)
                    && !self.peek_is_keyword(1, "as");
                if specifier_type_only {
                    self.advance();
                }
                let imported = self.parse_module_export_name()?;
                let local = if self.eat_keyword("as") {
                    self.parse_identifier()?
                } else {
                    imported
                };
                specifiers.push(ImportSpecifier::Named {
                    imported,
                    local,
                    type_only: specifier_type_only,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RightBrace, "'}'")?;
        }

        self.expect_keyword("from")?;
        let source = self.parse_module_specifier()?;
        self.skip_import_attributes()?;
        self.consume_semicolon()?;

        Ok(self.alloc(ImportDeclaration {
            specifiers: self.alloc_slice(specifiers),
            source: ImportSource::Module(source),
            type_only,
            span: self.span_from(start),
        }))
    }

    fn export_declaration(
        &self,
        start: u32,
        kind: ExportKind<'a>,
        is_default: bool,
        type_only: bool,
    ) -> &'a ExportDeclaration<'a> {
        self.alloc(ExportDeclaration {
            kind,
            is_default,
            type_only,
            span: self.span_from(start),
        })
    }

    /// Identifier or string name in import/export specifiers
    fn parse_module_export_name(&mut self) -> ParseResult<Identifier<'a>> {
        let token = self.current();
        if token.kind == TokenKind::String {
            self.advance();
            return Ok(Identifier {
                name: self.string_value(token),
                span: token.span,
            });
        }
        self.parse_identifier()
    }

    fn parse_export(&mut self, start: u32) -> ParseResult<&'a ExportDeclaration<'a>> {
        self.expect_keyword("export")?;

        // export = expression
        if self.eat(TokenKind::Eq) {
            let expression = self.parse_expression()?;
            self.consume_semicolon()?;
            return Ok(self.export_declaration(start, ExportKind::Assignment(expression), false, false));
        }

        // export as namespace Name
        if self.at_keyword("as") && self.peek_is_keyword(1, "namespace") {
            self.advance();
            self.advance();
            self.parse_identifier()?;
            self.consume_semicolon()?;
            let kind = ExportKind::Named {
                specifiers: &[],
                source: None,
            };
            return Ok(self.export_declaration(start, kind, false, false));
        }

        if self.eat_keyword("default") {
            let declaration_start = self.start();
            let next = self.peek(1);
            let is_declaration = self.at_keyword("function")
                || self.at_keyword("class")
                || (self.at_keyword("async") && self.is_keyword(next, "function") && !next.newline_before)
                || (self.at_keyword("abstract") && self.is_keyword(next, "class"))
                || (self.at_keyword("interface") && next.kind == TokenKind::Identifier);
            if is_declaration {
                if let Some(statement) = self.try_parse_declaration(declaration_start, false)? {
                    return Ok(self.export_declaration(start, ExportKind::Declaration(statement), true, false));
                }
            }
            let expression = self.parse_assignment()?;
            self.consume_semicolon()?;
            return Ok(self.export_declaration(start, ExportKind::Default(expression), true, false));
        }

        let type_only = self.at_keyword("type")
            && matches!(self.peek(1).kind, TokenKind::LeftBrace | TokenKind::Star);
        if type_only {
            self.advance();
        }

        if self.eat(TokenKind::Star) {
            let exported = if self.eat_keyword("as") {
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            self.expect_keyword("from")?;
            let source = self.parse_module_specifier()?;
            self.skip_import_attributes()?;
            self.consume_semicolon()?;
            return Ok(self.export_declaration(start, ExportKind::All { exported, source }, false, type_only));
        }

        if self.eat(TokenKind::LeftBrace) {
            let mut specifiers = Vec::new();
            while !self.at(TokenKind::RightBrace) {
                if self.at_keyword("type") && matches!(self.peek(1).kind, TokenKind::Identifier | TokenKind::String) {
                    self.advance();
                }
                let local = self.parse_module_export_name()?;
                let exported = if self.eat_keyword("as") {
                    self.parse_module_export_name()?
                } else {
                    local
                };
                specifiers.push(ExportSpecifier { local, exported });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RightBrace, "'}'")?;
            let source = if self.eat_keyword("from") {
                let source = self.parse_module_specifier()?;
                self.skip_import_attributes()?;
                Some(source)
            } else {
                None
            };
            self.consume_semicolon()?;
            let kind = ExportKind::Named {
                specifiers: self.alloc_slice(specifiers),
                source,
            };
            return Ok(self.export_declaration(start, kind, false, type_only));
        }

        let declaration_start = self.start();
        match self.try_parse_declaration(declaration_start, false)? {
            Some(statement) => Ok(self.export_declaration(start, ExportKind::Declaration(statement), false, false)),
            None => Err(self.unexpected("declaration")),
        }
    }
}
