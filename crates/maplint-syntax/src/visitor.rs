//! AST visitor for traversing TypeScript syntax trees
//!
//! Default implementations handle traversal; implementors override the
//! `visit_*` hooks and return `false` to skip a node's children.

use crate::ast::*;

/// Trait for visiting TypeScript AST nodes
pub trait Visitor<'a> {
    /// Called for each expression. Return `true` to continue traversal into children.
    fn visit_expression(&mut self, _expr: &Expression<'a>) -> bool {
        true
    }

    /// Called for each statement. Return `true` to continue traversal into children.
    fn visit_statement(&mut self, _stmt: &Statement<'a>) -> bool {
        true
    }

    /// Visit a program (entry point)
    fn visit_program(&mut self, program: &Program<'a>) {
        for stmt in program.statements.iter() {
            self.traverse_statement(stmt);
        }
    }

    /// Traverse a statement and its children
    fn traverse_statement(&mut self, stmt: &Statement<'a>) {
        if !self.visit_statement(stmt) {
            return;
        }

        match stmt {
            Statement::Variable(declaration) => self.traverse_variable_declaration(declaration),
            Statement::Function(function) => self.traverse_function(function),
            Statement::Class(class) => self.traverse_class(class),
            Statement::Enum(declaration) => {
                for member in declaration.members.iter() {
                    if let Some(initializer) = &member.initializer {
                        self.traverse_expression(initializer);
                    }
                }
            }
            Statement::Export(export) => match &export.kind {
                ExportKind::Declaration(inner) => self.traverse_statement(inner),
                ExportKind::Default(expr) | ExportKind::Assignment(expr) => self.traverse_expression(expr),
                ExportKind::Named { .. } | ExportKind::All { .. } => {}
            },
            Statement::Expression(expr_stmt) => self.traverse_expression(&expr_stmt.expression),
            Statement::Block(block) => self.traverse_block(block),
            Statement::If(if_stmt) => {
                self.traverse_expression(&if_stmt.test);
                self.traverse_statement(&if_stmt.consequent);
                if let Some(alternate) = &if_stmt.alternate {
                    self.traverse_statement(alternate);
                }
            }
            Statement::For(for_stmt) => {
                if let Some(init) = &for_stmt.init {
                    self.traverse_for_init(init);
                }
                if let Some(test) = &for_stmt.test {
                    self.traverse_expression(test);
                }
                if let Some(update) = &for_stmt.update {
                    self.traverse_expression(update);
                }
                self.traverse_statement(&for_stmt.body);
            }
            Statement::ForIn(for_in) => {
                self.traverse_for_init(&for_in.left);
                self.traverse_expression(&for_in.right);
                self.traverse_statement(&for_in.body);
            }
            Statement::While(while_stmt) => {
                self.traverse_expression(&while_stmt.test);
                self.traverse_statement(&while_stmt.body);
            }
            Statement::DoWhile(do_while) => {
                self.traverse_statement(&do_while.body);
                self.traverse_expression(&do_while.test);
            }
            Statement::Return(ret) => {
                if let Some(argument) = &ret.argument {
                    self.traverse_expression(argument);
                }
            }
            Statement::Throw(throw) => self.traverse_expression(&throw.argument),
            Statement::Switch(switch) => {
                self.traverse_expression(&switch.discriminant);
                for case in switch.cases.iter() {
                    if let Some(test) = &case.test {
                        self.traverse_expression(test);
                    }
                    for inner in case.consequent.iter() {
                        self.traverse_statement(inner);
                    }
                }
            }
            Statement::Try(try_stmt) => {
                self.traverse_block(try_stmt.block);
                if let Some(handler) = &try_stmt.handler {
                    if let Some(param) = &handler.param {
                        self.traverse_pattern(param);
                    }
                    self.traverse_block(handler.body);
                }
                if let Some(finalizer) = try_stmt.finalizer {
                    self.traverse_block(finalizer);
                }
            }
            Statement::Labeled(labeled) => self.traverse_statement(&labeled.body),
            Statement::Namespace(namespace) => {
                if let Some(body) = namespace.body {
                    self.traverse_block(body);
                }
            }
            Statement::TypeAlias(_)
            | Statement::Interface(_)
            | Statement::Import(_)
            | Statement::Break(_)
            | Statement::Continue(_)
            | Statement::Debugger(_)
            | Statement::Empty(_) => {}
        }
    }

    fn traverse_block(&mut self, block: &BlockStatement<'a>) {
        for inner in block.statements.iter() {
            self.traverse_statement(inner);
        }
    }

    fn traverse_variable_declaration(&mut self, declaration: &VariableDeclaration<'a>) {
        for declarator in declaration.declarators.iter() {
            self.traverse_pattern(&declarator.pattern);
            if let Some(init) = &declarator.init {
                self.traverse_expression(init);
            }
        }
    }

    fn traverse_for_init(&mut self, init: &ForInit<'a>) {
        match init {
            ForInit::Variable(declaration) => self.traverse_variable_declaration(declaration),
            ForInit::Expression(expr) => self.traverse_expression(expr),
        }
    }

    /// Default values and computed keys inside binding patterns
    fn traverse_pattern(&mut self, pattern: &Pattern<'a>) {
        match pattern {
            Pattern::Identifier(_) => {}
            Pattern::Object(object) => {
                for property in object.properties.iter() {
                    self.traverse_property_key(&property.key);
                    self.traverse_pattern(&property.value);
                }
                if let Some(rest) = &object.rest {
                    self.traverse_pattern(rest);
                }
            }
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    self.traverse_pattern(element);
                }
                if let Some(rest) = &array.rest {
                    self.traverse_pattern(rest);
                }
            }
            Pattern::Assignment(assignment) => {
                self.traverse_pattern(&assignment.target);
                self.traverse_expression(&assignment.default);
            }
        }
    }

    fn traverse_property_key(&mut self, key: &PropertyKey<'a>) {
        if let PropertyKey::Computed(expr, _) = key {
            self.traverse_expression(expr);
        }
    }

    fn traverse_function(&mut self, function: &Function<'a>) {
        for param in function.params.iter() {
            self.traverse_pattern(&param.pattern);
        }
        if let Some(body) = function.body {
            self.traverse_block(body);
        }
    }

    fn traverse_class(&mut self, class: &Class<'a>) {
        if let Some(extends) = &class.extends {
            self.traverse_expression(extends);
        }
        for member in class.members.iter() {
            self.traverse_class_member(member);
        }
    }

    fn traverse_class_member(&mut self, member: &ClassMember<'a>) {
        match member {
            ClassMember::Property(property) => {
                self.traverse_property_key(&property.key);
                if let Some(value) = &property.value {
                    self.traverse_expression(value);
                }
            }
            ClassMember::Method(method) => {
                self.traverse_property_key(&method.key);
                self.traverse_function(method.function);
            }
            ClassMember::StaticBlock(block) => self.traverse_block(block),
            ClassMember::IndexSignature(_) => {}
        }
    }

    /// Traverse an expression and its children
    fn traverse_expression(&mut self, expr: &Expression<'a>) {
        if !self.visit_expression(expr) {
            return;
        }

        match expr {
            Expression::Template(template) => {
                for inner in template.expressions.iter() {
                    self.traverse_expression(inner);
                }
            }
            Expression::TaggedTemplate(tagged) => {
                self.traverse_expression(&tagged.tag);
                for inner in tagged.template.expressions.iter() {
                    self.traverse_expression(inner);
                }
            }
            Expression::Array(array) => {
                for element in array.elements.iter() {
                    match element {
                        ArrayElement::Expression(inner) => self.traverse_expression(inner),
                        ArrayElement::Spread(spread) => self.traverse_expression(&spread.argument),
                        ArrayElement::Hole(_) => {}
                    }
                }
            }
            Expression::Object(object) => {
                for property in object.properties.iter() {
                    match property {
                        ObjectProperty::KeyValue { key, value, .. } => {
                            self.traverse_property_key(key);
                            self.traverse_expression(value);
                        }
                        ObjectProperty::Shorthand(_) => {}
                        ObjectProperty::Method { key, function, .. } => {
                            self.traverse_property_key(key);
                            self.traverse_function(function);
                        }
                        ObjectProperty::Spread(spread) => self.traverse_expression(&spread.argument),
                    }
                }
            }
            Expression::Function(function) => self.traverse_function(function),
            Expression::Arrow(arrow) => {
                for param in arrow.params.iter() {
                    self.traverse_pattern(&param.pattern);
                }
                match &arrow.body {
                    ArrowBody::Expression(body) => self.traverse_expression(body),
                    ArrowBody::Block(block) => self.traverse_block(block),
                }
            }
            Expression::Class(class) => self.traverse_class(class),
            Expression::Member(member) => {
                self.traverse_expression(&member.object);
                if let MemberProperty::Computed(index) = &member.property {
                    self.traverse_expression(index);
                }
            }
            Expression::Call(call) => {
                self.traverse_expression(&call.callee);
                for argument in call.arguments.iter() {
                    self.traverse_expression(&argument.value());
                }
            }
            Expression::New(new) => {
                self.traverse_expression(&new.callee);
                for argument in new.arguments.iter() {
                    self.traverse_expression(&argument.value());
                }
            }
            Expression::Unary(unary) => self.traverse_expression(&unary.argument),
            Expression::Update(update) => self.traverse_expression(&update.argument),
            Expression::Binary(binary) => {
                self.traverse_expression(&binary.left);
                self.traverse_expression(&binary.right);
            }
            Expression::Assignment(assignment) => {
                self.traverse_expression(&assignment.target);
                self.traverse_expression(&assignment.value);
            }
            Expression::Conditional(conditional) => {
                self.traverse_expression(&conditional.test);
                self.traverse_expression(&conditional.consequent);
                self.traverse_expression(&conditional.alternate);
            }
            Expression::Sequence(sequence) => {
                for inner in sequence.expressions.iter() {
                    self.traverse_expression(inner);
                }
            }
            Expression::Parenthesized(paren) => self.traverse_expression(&paren.expression),
            Expression::TypeAssertion(assertion) => self.traverse_expression(&assertion.expression),
            Expression::Satisfies(satisfies) => self.traverse_expression(&satisfies.expression),
            Expression::NonNull(non_null) => self.traverse_expression(&non_null.expression),
            Expression::Yield(yield_expr) => {
                if let Some(argument) = &yield_expr.argument {
                    self.traverse_expression(argument);
                }
            }
            Expression::Identifier(_) | Expression::This(_) | Expression::Super(_) | Expression::Literal(_) => {}
        }
    }
}

/// Helper function to run a visitor on a program
pub fn visit<'a, V: Visitor<'a>>(visitor: &mut V, program: &Program<'a>) {
    visitor.visit_program(program);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_file_content;
    use bumpalo::Bump;

    struct MemberCounter {
        computed: usize,
        named: usize,
    }

    impl<'a> Visitor<'a> for MemberCounter {
        fn visit_expression(&mut self, expr: &Expression<'a>) -> bool {
            if let Expression::Member(member) = expr {
                if member.is_computed() {
                    self.computed += 1;
                } else {
                    self.named += 1;
                }
            }
            true
        }
    }

    fn count(source: &str) -> (usize, usize) {
        let arena = Bump::new();
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none(), "parse error: {:?}", error);
        let mut counter = MemberCounter { computed: 0, named: 0 };
        visit(&mut counter, program);
        (counter.computed, counter.named)
    }

    #[test]
    fn test_visits_nested_functions_and_classes() {
        let source = r#"
            function outer(m: Map<string, number>) {
                const inner = () => m["a"];
                class Holder {
                    value = m["b"];
                    read() { return this.value; }
                }
            }
        "#;
        assert_eq!(count(source), (2, 1));
    }

    #[test]
    fn test_visits_defaults_and_templates() {
        let source = r#"
            function f({ a = obj["x"] }: Options, b = `${obj["y"]}`) {}
            label: for (const k of list) { k.size; }
        "#;
        assert_eq!(count(source), (2, 1));
    }

    #[test]
    fn test_skip_children() {
        struct StopAtCalls(usize);
        impl<'a> Visitor<'a> for StopAtCalls {
            fn visit_expression(&mut self, expr: &Expression<'a>) -> bool {
                self.0 += 1;
                !matches!(expr, Expression::Call(_))
            }
        }

        let arena = Bump::new();
        let (program, _) = parse_file_content(&arena, "f(a, b); c;");
        let mut visitor = StopAtCalls(0);
        visit(&mut visitor, program);
        assert_eq!(visitor.0, 2);
    }
}
