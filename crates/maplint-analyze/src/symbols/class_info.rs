//! Class and interface declarations as seen by the resolver
//!
//! Members keep references into the syntax tree; their types are lowered
//! on demand, once the type arguments of the receiver are known.

use maplint_syntax::ast::*;
use maplint_syntax::Span;
use std::collections::HashMap;

/// What a class member is
#[derive(Debug, Clone, Copy)]
pub enum MemberKind<'a> {
    Property {
        type_annotation: Option<TypeNode<'a>>,
        initializer: Option<Expression<'a>>,
        optional: bool,
    },
    Method(&'a Function<'a>),
    Getter(&'a Function<'a>),
    Setter(&'a Function<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ClassMemberInfo<'a> {
    pub name: &'a str,
    pub kind: MemberKind<'a>,
    pub is_static: bool,
}

/// A class declaration in the analysed file
#[derive(Debug, Clone)]
pub struct ClassInfo<'a> {
    pub name: &'a str,
    pub type_parameters: &'a [TypeParameter<'a>],
    /// Name of the `extends` target when it is a plain identifier
    pub parent: Option<&'a str>,
    pub parent_type_args: Option<&'a [TypeNode<'a>]>,
    pub index_signature: Option<&'a IndexSignature<'a>>,
    instance_members: HashMap<&'a str, ClassMemberInfo<'a>>,
    static_members: HashMap<&'a str, ClassMemberInfo<'a>>,
    pub span: Span,
}

impl<'a> ClassInfo<'a> {
    pub fn from_class(name: &'a str, class: &'a Class<'a>) -> Self {
        let mut info = Self {
            name,
            type_parameters: class.type_parameters,
            parent: class
                .extends
                .and_then(|extends| extends.as_identifier().map(|ident| ident.name)),
            parent_type_args: class.super_type_arguments,
            index_signature: None,
            instance_members: HashMap::new(),
            static_members: HashMap::new(),
            span: class.span,
        };

        for member in class.members.iter() {
            match member {
                ClassMember::Property(property) => {
                    if let Some(key) = property.key.name() {
                        info.add_member(ClassMemberInfo {
                            name: key,
                            kind: MemberKind::Property {
                                type_annotation: property.type_annotation,
                                initializer: property.value,
                                optional: property.optional,
                            },
                            is_static: property.is_static,
                        });
                    }
                }
                ClassMember::Method(method) => info.add_method(*method),
                ClassMember::IndexSignature(signature) if !signature.is_static => {
                    info.index_signature = Some(*signature);
                }
                ClassMember::IndexSignature(_) | ClassMember::StaticBlock(_) => {}
            }
        }

        info
    }

    fn add_method(&mut self, method: &'a ClassMethod<'a>) {
        if method.kind == MethodKind::Constructor {
            for param in method.function.params.iter() {
                if !param.is_parameter_property() {
                    continue;
                }
                if let Pattern::Identifier(ident) = param.pattern {
                    self.add_member(ClassMemberInfo {
                        name: ident.name,
                        kind: MemberKind::Property {
                            type_annotation: param.type_annotation,
                            initializer: None,
                            optional: param.optional,
                        },
                        is_static: false,
                    });
                }
            }
            return;
        }

        let Some(name) = method.key.name() else {
            return;
        };
        let kind = match method.kind {
            MethodKind::Get => MemberKind::Getter(method.function),
            MethodKind::Set => {
                // A getter of the same name takes precedence
                let members = if method.is_static {
                    &self.static_members
                } else {
                    &self.instance_members
                };
                if matches!(members.get(name), Some(existing) if matches!(existing.kind, MemberKind::Getter(_)))
                {
                    return;
                }
                MemberKind::Setter(method.function)
            }
            _ => MemberKind::Method(method.function),
        };
        self.add_member(ClassMemberInfo {
            name,
            kind,
            is_static: method.is_static,
        });
    }

    fn add_member(&mut self, member: ClassMemberInfo<'a>) {
        let members = if member.is_static {
            &mut self.static_members
        } else {
            &mut self.instance_members
        };
        // Overload signatures come first; keep the first declaration
        members.entry(member.name).or_insert(member);
    }

    pub fn instance_member(&self, name: &str) -> Option<&ClassMemberInfo<'a>> {
        self.instance_members.get(name)
    }

    pub fn static_member(&self, name: &str) -> Option<&ClassMemberInfo<'a>> {
        self.static_members.get(name)
    }

    pub fn instance_member_count(&self) -> usize {
        self.instance_members.len()
    }
}

/// An interface, merged across all of its declarations in the file
#[derive(Debug, Clone)]
pub struct InterfaceInfo<'a> {
    pub name: &'a str,
    pub type_parameters: &'a [TypeParameter<'a>],
    pub extends: Vec<TypeNode<'a>>,
    pub members: Vec<TypeMember<'a>>,
}

impl<'a> InterfaceInfo<'a> {
    pub fn new(declaration: &'a InterfaceDeclaration<'a>) -> Self {
        let mut info = Self {
            name: declaration.name.name,
            type_parameters: declaration.type_parameters,
            extends: Vec::new(),
            members: Vec::new(),
        };
        info.merge(declaration);
        info
    }

    /// Add the members of another declaration of the same interface
    pub fn merge(&mut self, declaration: &'a InterfaceDeclaration<'a>) {
        if self.type_parameters.is_empty() {
            self.type_parameters = declaration.type_parameters;
        }
        self.extends.extend(declaration.extends.iter().copied());
        self.members.extend(declaration.members.iter().copied());
    }

    /// The first property or method signature with this name
    pub fn member(&self, name: &str) -> Option<&TypeMember<'a>> {
        self.members.iter().find(|member| match member {
            TypeMember::Property(property) => property.key.name() == Some(name),
            TypeMember::Method(method) => method.key.name() == Some(name),
            _ => false,
        })
    }

    pub fn index_signature(&self) -> Option<&'a IndexSignature<'a>> {
        self.members.iter().find_map(|member| match member {
            TypeMember::Index(signature) => Some(*signature),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use maplint_syntax::parse_file_content;

    #[test]
    fn test_class_members() {
        let arena = Bump::new();
        let source = r#"
            class Store<T> extends Base<T> {
                static registry = new Map<string, Store<unknown>>();
                items: Map<string, T>;
                constructor(private readonly root: string, plain: number) {}
                get count(): number { return 0; }
                set count(value: number) {}
                load(): void {}
            }
        "#;
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none());
        let Statement::Class(class) = program.statements[0] else {
            panic!("expected class");
        };
        let info = ClassInfo::from_class("Store", class);

        assert_eq!(info.parent, Some("Base"));
        assert_eq!(info.type_parameters.len(), 1);
        assert!(info.static_member("registry").is_some());
        assert!(info.instance_member("registry").is_none());
        assert!(info.instance_member("root").is_some());
        assert!(info.instance_member("plain").is_none());
        assert!(matches!(
            info.instance_member("count").map(|m| m.kind),
            Some(MemberKind::Getter(_))
        ));
        assert_eq!(info.instance_member_count(), 4);
    }

    #[test]
    fn test_interface_merging() {
        let arena = Bump::new();
        let source = "interface Box { a: string; } interface Box extends Other { b(): void; [k: string]: unknown; }";
        let (program, error) = parse_file_content(&arena, source);
        assert!(error.is_none());
        let mut declarations = program.statements.iter().filter_map(|statement| match statement {
            Statement::Interface(declaration) => Some(*declaration),
            _ => None,
        });
        let first = declarations.next().unwrap();
        let mut info = InterfaceInfo::new(first);
        info.merge(declarations.next().unwrap());

        assert!(info.member("a").is_some());
        assert!(info.member("b").is_some());
        assert!(info.member("c").is_none());
        assert_eq!(info.extends.len(), 1);
        assert!(info.index_signature().is_some());
    }
}
