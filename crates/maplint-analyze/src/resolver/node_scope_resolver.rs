//! Node scope resolver for type-aware AST traversal
//!
//! Walks the TypeScript AST while maintaining scope information and runs
//! every enabled check on each expression, together with the role the
//! expression plays at that position.

use crate::checks::{Check, CheckContext, ExpressionRole};
use crate::issue::Issue;
use crate::resolver::expression_resolver::ExpressionResolver;
use crate::scope::Scope;
use crate::symbols::SymbolTable;
use crate::types::{builtins, Type};
use maplint_syntax::ast::*;

/// Node scope resolver that traverses the AST with scope tracking
pub struct NodeScopeResolver<'s, 'a> {
    symbols: &'s SymbolTable<'a>,
    checks: &'s [&'s dyn Check],
    ctx: &'s CheckContext<'s>,
}

impl<'s, 'a> NodeScopeResolver<'s, 'a> {
    pub fn new(symbols: &'s SymbolTable<'a>, checks: &'s [&'s dyn Check], ctx: &'s CheckContext<'s>) -> Self {
        Self { symbols, checks, ctx }
    }

    /// Analyze a program with scope tracking
    pub fn analyze(&self, program: &Program<'a>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut scope = Scope::new();
        self.process_statements(program.statements, &mut scope, &mut issues);
        issues
    }

    fn resolver<'r>(&self, scope: &'r Scope) -> ExpressionResolver<'r, 'a>
    where
        's: 'r,
    {
        ExpressionResolver::new(self.symbols, scope)
    }

    /// Process a statement list sharing one scope, with function
    /// declarations hoisted first
    fn process_statements(&self, statements: &[Statement<'a>], scope: &mut Scope, issues: &mut Vec<Issue>) {
        for statement in statements {
            if let Some(function) = hoisted_function(statement) {
                if let Some(id) = function.id {
                    let ty = self.resolver(scope).resolve(&Expression::Function(function));
                    scope.set_variable(id.name, ty);
                }
            }
        }

        for statement in statements {
            self.process_statement(statement, scope, issues);
        }
    }

    fn process_block(&self, block: &BlockStatement<'a>, scope: &Scope, issues: &mut Vec<Issue>) {
        let mut block_scope = scope.enter_scope();
        self.process_statements(block.statements, &mut block_scope, issues);
    }

    /// Process a statement in a position that gets its own scope
    fn process_nested(&self, statement: &Statement<'a>, scope: &Scope, issues: &mut Vec<Issue>) {
        let mut nested = scope.enter_scope();
        self.process_statement(statement, &mut nested, issues);
    }

    fn process_statement(&self, stmt: &Statement<'a>, scope: &mut Scope, issues: &mut Vec<Issue>) {
        match *stmt {
            Statement::Variable(declaration) => {
                self.process_variable_declaration(declaration, scope, issues);
            }
            Statement::Function(function) => {
                self.process_function(function, None, false, scope, issues);
            }
            Statement::Class(class) => {
                self.process_class(class, scope, issues);
            }
            Statement::Enum(declaration) => {
                for member in declaration.members.iter() {
                    if let Some(initializer) = member.initializer {
                        self.process_expression(&initializer, ExpressionRole::Read, scope, issues);
                    }
                }
            }
            Statement::Export(export) => match export.kind {
                ExportKind::Declaration(inner) => self.process_statement(&inner, scope, issues),
                ExportKind::Default(expr) | ExportKind::Assignment(expr) => {
                    self.process_expression(&expr, ExpressionRole::Read, scope, issues);
                }
                ExportKind::Named { .. } | ExportKind::All { .. } => {}
            },
            Statement::Expression(statement) => {
                self.process_expression(&statement.expression, ExpressionRole::Read, scope, issues);
            }
            Statement::Block(block) => {
                self.process_block(block, scope, issues);
            }
            Statement::If(if_stmt) => {
                self.process_expression(&if_stmt.test, ExpressionRole::Read, scope, issues);
                self.process_nested(&if_stmt.consequent, scope, issues);
                if let Some(alternate) = &if_stmt.alternate {
                    self.process_nested(alternate, scope, issues);
                }
            }
            Statement::For(for_stmt) => {
                let mut loop_scope = scope.enter_scope();
                match for_stmt.init {
                    Some(ForInit::Variable(declaration)) => {
                        self.process_variable_declaration(declaration, &mut loop_scope, issues);
                    }
                    Some(ForInit::Expression(expr)) => {
                        self.process_expression(&expr, ExpressionRole::Read, &loop_scope, issues);
                    }
                    None => {}
                }
                if let Some(test) = &for_stmt.test {
                    self.process_expression(test, ExpressionRole::Read, &loop_scope, issues);
                }
                if let Some(update) = &for_stmt.update {
                    self.process_expression(update, ExpressionRole::Read, &loop_scope, issues);
                }
                self.process_nested(&for_stmt.body, &loop_scope, issues);
            }
            Statement::ForIn(for_in) => {
                self.process_for_in(for_in, scope, issues);
            }
            Statement::While(while_stmt) => {
                self.process_expression(&while_stmt.test, ExpressionRole::Read, scope, issues);
                self.process_nested(&while_stmt.body, scope, issues);
            }
            Statement::DoWhile(do_while) => {
                self.process_nested(&do_while.body, scope, issues);
                self.process_expression(&do_while.test, ExpressionRole::Read, scope, issues);
            }
            Statement::Return(ret) => {
                if let Some(argument) = &ret.argument {
                    self.process_expression(argument, ExpressionRole::Read, scope, issues);
                }
            }
            Statement::Throw(throw) => {
                self.process_expression(&throw.argument, ExpressionRole::Read, scope, issues);
            }
            Statement::Switch(switch) => {
                self.process_expression(&switch.discriminant, ExpressionRole::Read, scope, issues);
                let mut switch_scope = scope.enter_scope();
                for case in switch.cases.iter() {
                    if let Some(test) = &case.test {
                        self.process_expression(test, ExpressionRole::Read, &switch_scope, issues);
                    }
                    self.process_statements(case.consequent, &mut switch_scope, issues);
                }
            }
            Statement::Try(try_stmt) => {
                self.process_block(try_stmt.block, scope, issues);
                if let Some(handler) = &try_stmt.handler {
                    self.process_catch(handler, scope, issues);
                }
                if let Some(finalizer) = try_stmt.finalizer {
                    self.process_block(finalizer, scope, issues);
                }
            }
            Statement::Labeled(labeled) => {
                self.process_statement(&labeled.body, scope, issues);
            }
            Statement::Namespace(namespace) => {
                if let Some(body) = namespace.body {
                    self.process_block(body, scope, issues);
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

    fn process_variable_declaration(
        &self,
        declaration: &VariableDeclaration<'a>,
        scope: &mut Scope,
        issues: &mut Vec<Issue>,
    ) {
        for declarator in declaration.declarators.iter() {
            if let Some(init) = &declarator.init {
                self.process_expression(init, ExpressionRole::Read, scope, issues);
            }

            let resolver = self.resolver(scope);
            let ty = match (&declarator.type_annotation, &declarator.init) {
                (Some(annotation), _) => resolver.lower(annotation),
                (None, Some(init)) => {
                    let ty = resolver.resolve(init);
                    // `let x = "a"` declares a `string`
                    if declaration.kind == VariableKind::Const {
                        ty
                    } else {
                        ty.widen()
                    }
                }
                (None, None) => Type::Unknown,
            };

            self.bind_pattern(&declarator.pattern, ty, scope, issues);
        }
    }

    /// Declare every name bound by a pattern, typed from the matched value
    fn bind_pattern(&self, pattern: &Pattern<'a>, ty: Type, scope: &mut Scope, issues: &mut Vec<Issue>) {
        match pattern {
            Pattern::Identifier(ident) => scope.set_variable(ident.name, ty),
            Pattern::Object(object) => {
                let mut bindings = Vec::with_capacity(object.properties.len());
                for property in object.properties.iter() {
                    if let PropertyKey::Computed(key, _) = property.key {
                        self.process_expression(&key, ExpressionRole::Read, scope, issues);
                    }
                    let member = match property.key.name() {
                        Some(name) => self.resolver(scope).member_type(&ty, name),
                        None => Type::Unknown,
                    };
                    bindings.push((property.value, member));
                }
                for (value, member) in bindings {
                    self.bind_pattern(&value, member, scope, issues);
                }
                if let Some(rest) = &object.rest {
                    self.bind_pattern(rest, Type::Unknown, scope, issues);
                }
            }
            Pattern::Array(array) => {
                for (position, element) in array.elements.iter().enumerate() {
                    if let Some(element) = element {
                        let element_type = match ty.resolved() {
                            Type::Tuple(elements) => elements.get(position).cloned().unwrap_or_default(),
                            other => builtins::iterated_element(other),
                        };
                        self.bind_pattern(element, element_type, scope, issues);
                    }
                }
                if let Some(rest) = &array.rest {
                    let rest_type = Type::array(builtins::iterated_element(&ty));
                    self.bind_pattern(rest, rest_type, scope, issues);
                }
            }
            Pattern::Assignment(assignment) => {
                self.process_expression(&assignment.default, ExpressionRole::Read, scope, issues);
                let ty = if ty.is_unknown() {
                    self.resolver(scope).resolve(&assignment.default).widen()
                } else {
                    ty.remove_nullish()
                };
                self.bind_pattern(&assignment.target, ty, scope, issues);
            }
        }
    }

    fn process_for_in(&self, for_in: &ForInStatement<'a>, scope: &Scope, issues: &mut Vec<Issue>) {
        self.process_expression(&for_in.right, ExpressionRole::Read, scope, issues);

        let mut loop_scope = scope.enter_scope();
        match for_in.left {
            ForInit::Variable(declaration) => {
                let element = match for_in.kind {
                    ForInKind::In => Type::String,
                    ForInKind::Of => builtins::iterated_element(&self.resolver(scope).resolve(&for_in.right)),
                };
                for declarator in declaration.declarators.iter() {
                    let ty = match &declarator.type_annotation {
                        Some(annotation) => self.resolver(&loop_scope).lower(annotation),
                        None => element.clone(),
                    };
                    self.bind_pattern(&declarator.pattern, ty, &mut loop_scope, issues);
                }
            }
            ForInit::Expression(target) => {
                self.process_expression(&target, ExpressionRole::AssignmentTarget, &loop_scope, issues);
            }
        }

        self.process_nested(&for_in.body, &loop_scope, issues);
    }

    fn process_catch(&self, handler: &CatchClause<'a>, scope: &Scope, issues: &mut Vec<Issue>) {
        let mut catch_scope = scope.enter_scope();
        if let Some(param) = &handler.param {
            let ty = handler
                .type_annotation
                .map(|annotation| self.resolver(&catch_scope).lower(&annotation))
                .unwrap_or_default();
            self.bind_pattern(param, ty, &mut catch_scope, issues);
        }
        self.process_statements(handler.body.statements, &mut catch_scope, issues);
    }

    /// Process a function body in its own scope
    ///
    /// `this_type` is the receiver for methods; plain functions have none.
    fn process_function(
        &self,
        function: &Function<'a>,
        this_type: Option<Type>,
        is_arrow: bool,
        scope: &Scope,
        issues: &mut Vec<Issue>,
    ) {
        let type_params = self
            .resolver(scope)
            .lowering()
            .declare_type_parameters(function.type_parameters, scope.type_params());
        let mut function_scope = scope.enter_function_scope(type_params, this_type, is_arrow);

        self.bind_parameters(function.params, &mut function_scope, issues);

        if let Some(body) = function.body {
            self.process_statements(body.statements, &mut function_scope, issues);
        }
    }

    fn process_arrow(&self, arrow: &ArrowFunction<'a>, scope: &Scope, issues: &mut Vec<Issue>) {
        let type_params = self
            .resolver(scope)
            .lowering()
            .declare_type_parameters(arrow.type_parameters, scope.type_params());
        let mut function_scope = scope.enter_function_scope(type_params, None, true);

        self.bind_parameters(arrow.params, &mut function_scope, issues);

        match arrow.body {
            ArrowBody::Expression(body) => {
                self.process_expression(&body, ExpressionRole::Read, &function_scope, issues);
            }
            ArrowBody::Block(block) => {
                self.process_statements(block.statements, &mut function_scope, issues);
            }
        }
    }

    fn bind_parameters(&self, params: &[Parameter<'a>], scope: &mut Scope, issues: &mut Vec<Issue>) {
        for param in params {
            let ty = self
                .resolver(scope)
                .lowering()
                .parameter_type(param, scope.type_params());
            self.bind_pattern(&param.pattern, ty, scope, issues);
        }
    }

    fn process_class(&self, class: &Class<'a>, scope: &Scope, issues: &mut Vec<Issue>) {
        if let Some(extends) = &class.extends {
            self.process_expression(extends, ExpressionRole::Read, scope, issues);
        }

        let type_params = self
            .resolver(scope)
            .lowering()
            .declare_type_parameters(class.type_parameters, scope.type_params());

        let (instance_type, static_type) = match class.id {
            Some(id) => (
                Type::Class {
                    name: id.name.to_string(),
                    type_args: class
                        .type_parameters
                        .iter()
                        .map(|parameter| type_params.get(parameter.name.name).cloned().unwrap_or_default())
                        .collect(),
                },
                Type::ClassConstructor(id.name.to_string()),
            ),
            None => (Type::Unknown, Type::Unknown),
        };

        let instance_scope = scope.enter_class_scope(type_params.clone(), instance_type.clone());
        let static_scope = scope.enter_class_scope(type_params, static_type.clone());

        for member in class.members.iter() {
            match *member {
                ClassMember::Property(property) => {
                    let member_scope = if property.is_static { &static_scope } else { &instance_scope };
                    if let PropertyKey::Computed(key, _) = property.key {
                        self.process_expression(&key, ExpressionRole::Read, scope, issues);
                    }
                    if let Some(value) = &property.value {
                        self.process_expression(value, ExpressionRole::Read, member_scope, issues);
                    }
                }
                ClassMember::Method(method) => {
                    if let PropertyKey::Computed(key, _) = method.key {
                        self.process_expression(&key, ExpressionRole::Read, scope, issues);
                    }
                    let (member_scope, this_type) = if method.is_static {
                        (&static_scope, static_type.clone())
                    } else {
                        (&instance_scope, instance_type.clone())
                    };
                    self.process_function(method.function, Some(this_type), false, member_scope, issues);
                }
                ClassMember::StaticBlock(block) => {
                    self.process_block(block, &static_scope, issues);
                }
                ClassMember::IndexSignature(_) => {}
            }
        }
    }

    /// Run the checks on an expression, then descend into its children
    fn process_expression(&self, expr: &Expression<'a>, role: ExpressionRole, scope: &Scope, issues: &mut Vec<Issue>) {
        self.run_checks(expr, role, scope, issues);

        match *expr {
            Expression::Identifier(_)
            | Expression::This(_)
            | Expression::Super(_)
            | Expression::Literal(_) => {}
            Expression::Template(template) => {
                self.process_reads(template.expressions, scope, issues);
            }
            Expression::TaggedTemplate(tagged) => {
                self.process_expression(&tagged.tag, ExpressionRole::Read, scope, issues);
                self.process_reads(tagged.template.expressions, scope, issues);
            }
            Expression::Array(array) => {
                // Elements of a destructuring target are targets themselves
                let element_role = match role {
                    ExpressionRole::AssignmentTarget => ExpressionRole::AssignmentTarget,
                    _ => ExpressionRole::Read,
                };
                for element in array.elements.iter() {
                    match element {
                        ArrayElement::Expression(element) => {
                            self.process_expression(element, element_role, scope, issues);
                        }
                        ArrayElement::Spread(spread) => {
                            self.process_expression(&spread.argument, element_role, scope, issues);
                        }
                        ArrayElement::Hole(_) => {}
                    }
                }
            }
            Expression::Object(object) => {
                let value_role = match role {
                    ExpressionRole::AssignmentTarget => ExpressionRole::AssignmentTarget,
                    _ => ExpressionRole::Read,
                };
                for property in object.properties.iter() {
                    match *property {
                        ObjectProperty::KeyValue { key, value, .. } => {
                            if let PropertyKey::Computed(key, _) = key {
                                self.process_expression(&key, ExpressionRole::Read, scope, issues);
                            }
                            self.process_expression(&value, value_role, scope, issues);
                        }
                        ObjectProperty::Shorthand(_) => {}
                        ObjectProperty::Method { key, function, .. } => {
                            if let PropertyKey::Computed(key, _) = key {
                                self.process_expression(&key, ExpressionRole::Read, scope, issues);
                            }
                            self.process_function(function, None, false, scope, issues);
                        }
                        ObjectProperty::Spread(spread) => {
                            self.process_expression(&spread.argument, value_role, scope, issues);
                        }
                    }
                }
            }
            Expression::Function(function) => {
                self.process_function(function, None, false, scope, issues);
            }
            Expression::Arrow(arrow) => {
                self.process_arrow(arrow, scope, issues);
            }
            Expression::Class(class) => {
                self.process_class(class, scope, issues);
            }
            Expression::Member(member) => {
                self.process_expression(&member.object, ExpressionRole::Read, scope, issues);
                if let MemberProperty::Computed(index) = member.property {
                    self.process_expression(&index, ExpressionRole::Read, scope, issues);
                }
            }
            Expression::Call(call) => {
                self.process_expression(&call.callee, ExpressionRole::Read, scope, issues);
                self.process_arguments(call.arguments, scope, issues);
            }
            Expression::New(new) => {
                self.process_expression(&new.callee, ExpressionRole::Read, scope, issues);
                self.process_arguments(new.arguments, scope, issues);
            }
            Expression::Unary(unary) => {
                let operand_role = match unary.operator {
                    UnaryOperator::Delete => ExpressionRole::DeleteOperand,
                    _ => ExpressionRole::Read,
                };
                self.process_expression(&unary.argument, operand_role, scope, issues);
            }
            Expression::Update(update) => {
                self.process_expression(&update.argument, ExpressionRole::AssignmentTarget, scope, issues);
            }
            Expression::Binary(binary) => {
                self.process_expression(&binary.left, ExpressionRole::Read, scope, issues);
                self.process_expression(&binary.right, ExpressionRole::Read, scope, issues);
            }
            Expression::Assignment(assignment) => {
                self.process_expression(&assignment.target, ExpressionRole::AssignmentTarget, scope, issues);
                self.process_expression(&assignment.value, ExpressionRole::Read, scope, issues);
            }
            Expression::Conditional(conditional) => {
                self.process_expression(&conditional.test, ExpressionRole::Read, scope, issues);
                self.process_expression(&conditional.consequent, ExpressionRole::Read, scope, issues);
                self.process_expression(&conditional.alternate, ExpressionRole::Read, scope, issues);
            }
            Expression::Sequence(sequence) => {
                self.process_reads(sequence.expressions, scope, issues);
            }
            // Wrappers keep the role of the position they sit in
            Expression::Parenthesized(paren) => {
                self.process_expression(&paren.expression, role, scope, issues);
            }
            Expression::NonNull(non_null) => {
                self.process_expression(&non_null.expression, role, scope, issues);
            }
            Expression::TypeAssertion(assertion) => {
                self.process_expression(&assertion.expression, role, scope, issues);
            }
            Expression::Satisfies(satisfies) => {
                self.process_expression(&satisfies.expression, role, scope, issues);
            }
            Expression::Yield(yield_expr) => {
                if let Some(argument) = &yield_expr.argument {
                    self.process_expression(argument, ExpressionRole::Read, scope, issues);
                }
            }
        }
    }

    fn process_reads(&self, expressions: &[Expression<'a>], scope: &Scope, issues: &mut Vec<Issue>) {
        for expr in expressions {
            self.process_expression(expr, ExpressionRole::Read, scope, issues);
        }
    }

    fn process_arguments(&self, arguments: &[Argument<'a>], scope: &Scope, issues: &mut Vec<Issue>) {
        for argument in arguments {
            self.process_expression(&argument.value(), ExpressionRole::Read, scope, issues);
        }
    }

    fn run_checks(&self, expr: &Expression<'a>, role: ExpressionRole, scope: &Scope, issues: &mut Vec<Issue>) {
        if self.checks.is_empty() {
            return;
        }
        let resolver = self.resolver(scope);
        for check in self.checks {
            issues.extend(check.check_expression(expr, role, &resolver, self.ctx));
        }
    }
}

/// The function declared by a statement, if it hoists
fn hoisted_function<'a>(statement: &Statement<'a>) -> Option<&'a Function<'a>> {
    match *statement {
        Statement::Function(function) => Some(function),
        Statement::Export(export) => match export.kind {
            ExportKind::Declaration(Statement::Function(function)) => Some(function),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SymbolCollector;
    use crate::resolver::TypeResolver;
    use bumpalo::Bump;
    use maplint_syntax::{parse_file_content, HasSpan, LineIndex};
    use std::path::Path;
    use std::sync::Mutex;

    /// Records the resolved type of every identifier and member access it
    /// sees, with its role
    #[derive(Default)]
    struct RecordingCheck {
        seen: Mutex<Vec<(String, ExpressionRole, Option<Type>)>>,
    }

    impl Check for RecordingCheck {
        fn id(&self) -> &'static str {
            "test.recording"
        }

        fn description(&self) -> &'static str {
            "Records identifiers"
        }

        fn check_expression<'a>(
            &self,
            expr: &Expression<'a>,
            role: ExpressionRole,
            resolver: &dyn TypeResolver<'a>,
            ctx: &CheckContext<'_>,
        ) -> Vec<Issue> {
            if matches!(expr, Expression::Identifier(_) | Expression::Member(_)) {
                let text = expr.span().text(ctx.source).to_string();
                if let Ok(mut seen) = self.seen.lock() {
                    seen.push((text, role, resolver.resolve_type(expr)));
                }
            }
            Vec::new()
        }
    }

    fn record(source: &str) -> Vec<(String, ExpressionRole, Option<Type>)> {
        let arena = Bump::new();
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none(), "{:?}", error);
        let symbols = SymbolCollector::new().collect(program);
        let line_index = LineIndex::new(source);
        let ctx = CheckContext::new(Path::new("test.ts"), source, &line_index);
        let check = RecordingCheck::default();
        let checks: Vec<&dyn Check> = vec![&check];
        NodeScopeResolver::new(&symbols, &checks, &ctx).analyze(program);
        let seen = check.seen.lock().unwrap().clone();
        seen
    }

    fn type_of(seen: &[(String, ExpressionRole, Option<Type>)], name: &str) -> Option<Type> {
        seen.iter()
            .rev()
            .find(|(text, _, _)| text == name)
            .and_then(|(_, _, ty)| ty.clone())
    }

    fn is_map(ty: &Option<Type>) -> bool {
        matches!(ty.as_ref().map(Type::resolved), Some(Type::Named { name, .. }) if name == "Map")
    }

    #[test]
    fn test_parameter_types() {
        let seen = record("type Dict = Map<string, number>; function f(m: Dict) { m; }");
        assert!(is_map(&type_of(&seen, "m")));
    }

    #[test]
    fn test_block_scoping() {
        let source = r#"
            const m = new Map<string, number>();
            {
                const m = "shadow";
                m;
            }
            m;
        "#;
        let seen = record(source);
        let types: Vec<_> = seen.iter().filter(|(text, _, _)| text == "m").collect();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].2, Some(Type::StringLiteral("shadow".into())));
        assert!(is_map(&types[1].2));
    }

    #[test]
    fn test_hoisted_function() {
        let seen = record("const m = make(); m; function make(): Map<string, number> { return new Map(); }");
        assert!(is_map(&type_of(&seen, "m")));
    }

    #[test]
    fn test_this_in_methods_and_arrows() {
        let source = r#"
            class Store {
                private items = new Map<string, number>();
                read() {
                    const run = () => this.items;
                    return this.items;
                }
            }
        "#;
        let seen = record(source);
        let items: Vec<_> = seen.iter().filter(|(text, _, _)| text == "this.items").collect();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|(_, _, ty)| is_map(ty)));
    }

    #[test]
    fn test_roles() {
        let source = "let a: any; let b: any; a = 1; delete b; [a, b] = [1, 2]; a++; for (a of []) {}";
        let seen = record(source);
        assert_eq!(seen.len(), 6);
        let roles: Vec<ExpressionRole> = seen.iter().map(|(_, role, _)| *role).collect();
        assert_eq!(
            roles,
            vec![
                ExpressionRole::AssignmentTarget,
                ExpressionRole::DeleteOperand,
                ExpressionRole::AssignmentTarget,
                ExpressionRole::AssignmentTarget,
                ExpressionRole::AssignmentTarget,
                ExpressionRole::AssignmentTarget,
            ]
        );
    }

    #[test]
    fn test_destructuring_and_loops() {
        let source = r#"
            const source = new Map<string, Map<string, number>>();
            for (const [key, inner] of source) {
                inner;
            }
            const { cache } = { cache: new Map<number, string>() };
            cache;
        "#;
        let seen = record(source);
        assert!(is_map(&type_of(&seen, "inner")));
        assert!(is_map(&type_of(&seen, "cache")));
    }

    #[test]
    fn test_catch_and_switch_scopes() {
        let source = r#"
            try { } catch (e) { e; }
            switch (1) { case 1: const m = new Map(); m; }
        "#;
        let seen = record(source);
        assert_eq!(type_of(&seen, "e"), None);
        assert!(is_map(&type_of(&seen, "m")));
    }
}
