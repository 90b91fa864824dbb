//! TypeScript type representation
//!
//! Types are resolved from declarations only: annotations, initializers and
//! the shapes of built-in globals. Anything the resolver cannot see becomes
//! [`Type::Unknown`].

use std::fmt;

/// Properties and index signature of an object literal type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectShape {
    pub properties: Vec<(String, Type)>,
    /// Value type of `[key: string]: T` (or `Record<K, T>`)
    pub index: Option<Box<Type>>,
}

impl ObjectShape {
    pub fn property(&self, name: &str) -> Option<&Type> {
        self.properties
            .iter()
            .find(|(property, _)| property == name)
            .map(|(_, ty)| ty)
    }
}

/// A callable signature
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionShape {
    pub params: Vec<Type>,
    pub return_type: Type,
}

/// Resolved static type of an expression
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Type {
    /// No information available (also the `unknown` keyword)
    #[default]
    Unknown,
    Any,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    BigInt,
    Symbol,
    /// The `object` keyword
    NonPrimitive,
    StringLiteral(String),
    /// Raw numeric text
    NumberLiteral(String),
    BooleanLiteral(bool),
    Array(Box<Type>),
    Tuple(Vec<Type>),
    /// A global type such as `Map<K, V>`, `Set<T>` or `Promise<T>`
    Named { name: String, type_args: Vec<Type> },
    /// An instance of a class declared in the analysed file
    Class { name: String, type_args: Vec<Type> },
    /// The constructor value of a class declared in the analysed file
    ClassConstructor(String),
    /// An interface declared in the analysed file
    Interface { name: String, type_args: Vec<Type> },
    Object(ObjectShape),
    Function(Box<FunctionShape>),
    Union(Vec<Type>),
    Intersection(Vec<Type>),
    /// A type alias, stored with its fully expanded right-hand side
    Alias { name: String, target: Box<Type> },
    TypeParameter {
        name: String,
        constraint: Option<Box<Type>>,
    },
}

impl Type {
    pub fn named(name: impl Into<String>, type_args: Vec<Type>) -> Self {
        Type::Named {
            name: name.into(),
            type_args,
        }
    }

    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    pub fn function(params: Vec<Type>, return_type: Type) -> Self {
        Type::Function(Box::new(FunctionShape {
            params,
            return_type,
        }))
    }

    pub fn alias(name: impl Into<String>, target: Type) -> Self {
        Type::Alias {
            name: name.into(),
            target: Box::new(target),
        }
    }

    /// Build a union, flattening nested unions and dropping duplicates
    pub fn union(types: Vec<Type>) -> Self {
        let mut members: Vec<Type> = Vec::with_capacity(types.len());
        for ty in types {
            match ty {
                Type::Union(inner) => {
                    for member in inner {
                        if !members.contains(&member) {
                            members.push(member);
                        }
                    }
                }
                Type::Never => {}
                other => {
                    if !members.contains(&other) {
                        members.push(other);
                    }
                }
            }
        }

        if members.iter().any(|member| matches!(member, Type::Any)) {
            return Type::Any;
        }

        match members.len() {
            0 => Type::Never,
            1 => members.pop().unwrap_or_default(),
            _ => Type::Union(members),
        }
    }

    /// `T | undefined`
    pub fn or_undefined(self) -> Self {
        Type::union(vec![self, Type::Undefined])
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Type::Null | Type::Undefined | Type::Void)
    }

    /// Remove `null` and `undefined` constituents (`x!`, `x ?? y`)
    pub fn remove_nullish(&self) -> Type {
        match self {
            Type::Union(types) => {
                Type::union(types.iter().filter(|t| !t.is_nullish()).cloned().collect())
            }
            Type::Alias { target, .. } if matches!(target.as_ref(), Type::Union(_)) => {
                target.remove_nullish()
            }
            other => other.clone(),
        }
    }

    /// The type with literal types widened to their primitive
    pub fn widen(&self) -> Type {
        match self {
            Type::StringLiteral(_) => Type::String,
            Type::NumberLiteral(_) => Type::Number,
            Type::BooleanLiteral(_) => Type::Boolean,
            Type::Union(types) => Type::union(types.iter().map(Type::widen).collect()),
            other => other.clone(),
        }
    }

    /// Look through aliases to the underlying type
    pub fn resolved(&self) -> &Type {
        let mut current = self;
        while let Type::Alias { target, .. } = current {
            current = target;
        }
        current
    }

    /// Name of a named, class or interface type
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Type::Named { name, .. } | Type::Class { name, .. } | Type::Interface { name, .. } => {
                Some(name)
            }
            Type::Alias { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn type_args(&self) -> &[Type] {
        match self {
            Type::Named { type_args, .. }
            | Type::Class { type_args, .. }
            | Type::Interface { type_args, .. } => type_args,
            _ => &[],
        }
    }

    /// The n-th type argument, or `Unknown` when absent
    pub fn type_arg(&self, index: usize) -> Type {
        self.type_args().get(index).cloned().unwrap_or_default()
    }
}

fn join(f: &mut fmt::Formatter<'_>, types: &[Type], separator: &str) -> fmt::Result {
    for (index, ty) in types.iter().enumerate() {
        if index > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

fn write_generic(f: &mut fmt::Formatter<'_>, name: &str, args: &[Type]) -> fmt::Result {
    write!(f, "{}", name)?;
    if !args.is_empty() {
        write!(f, "<")?;
        join(f, args, ", ")?;
        write!(f, ">")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Unknown => write!(f, "unknown"),
            Type::Any => write!(f, "any"),
            Type::Never => write!(f, "never"),
            Type::Void => write!(f, "void"),
            Type::Undefined => write!(f, "undefined"),
            Type::Null => write!(f, "null"),
            Type::Boolean => write!(f, "boolean"),
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::BigInt => write!(f, "bigint"),
            Type::Symbol => write!(f, "symbol"),
            Type::NonPrimitive => write!(f, "object"),
            Type::StringLiteral(value) => write!(f, "\"{}\"", value.escape_default()),
            Type::NumberLiteral(raw) => write!(f, "{}", raw),
            Type::BooleanLiteral(value) => write!(f, "{}", value),
            Type::Array(element) => match element.as_ref() {
                Type::Union(_) | Type::Function(_) => write!(f, "({})[]", element),
                _ => write!(f, "{}[]", element),
            },
            Type::Tuple(elements) => {
                write!(f, "[")?;
                join(f, elements, ", ")?;
                write!(f, "]")
            }
            Type::Named { name, type_args }
            | Type::Class { name, type_args }
            | Type::Interface { name, type_args } => write_generic(f, name, type_args),
            Type::ClassConstructor(name) => write!(f, "typeof {}", name),
            Type::Object(shape) => {
                write!(f, "{{ ")?;
                for (name, ty) in &shape.properties {
                    write!(f, "{}: {}; ", name, ty)?;
                }
                if let Some(index) = &shape.index {
                    write!(f, "[key: string]: {}; ", index)?;
                }
                write!(f, "}}")
            }
            Type::Function(shape) => {
                write!(f, "(")?;
                join(f, &shape.params, ", ")?;
                write!(f, ") => {}", shape.return_type)
            }
            Type::Union(types) => join(f, types, " | "),
            Type::Intersection(types) => join(f, types, " & "),
            Type::Alias { name, .. } => write!(f, "{}", name),
            Type::TypeParameter { name, .. } => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display() {
        assert_eq!(Type::Number.to_string(), "number");
        assert_eq!(
            Type::named("Map", vec![Type::String, Type::Number]).to_string(),
            "Map<string, number>"
        );
        assert_eq!(Type::array(Type::String).to_string(), "string[]");
        assert_eq!(
            Type::array(Type::union(vec![Type::String, Type::Null])).to_string(),
            "(string | null)[]"
        );
    }

    #[test]
    fn test_union_flattens_and_dedups() {
        let inner = Type::union(vec![Type::String, Type::Number]);
        let outer = Type::union(vec![inner, Type::String, Type::Never, Type::Null]);
        assert_eq!(
            outer,
            Type::Union(vec![Type::String, Type::Number, Type::Null])
        );
        assert_eq!(Type::union(vec![Type::String]), Type::String);
        assert_eq!(Type::union(vec![]), Type::Never);
        assert_eq!(Type::union(vec![Type::Any, Type::String]), Type::Any);
    }

    #[test]
    fn test_remove_nullish() {
        let map = Type::named("Map", vec![Type::String, Type::Number]);
        let optional = map.clone().or_undefined();
        assert_eq!(optional.remove_nullish(), map);
        assert_eq!(Type::Null.remove_nullish(), Type::Null);
    }

    #[test]
    fn test_widen_and_resolved() {
        assert_eq!(Type::StringLiteral("a".into()).widen(), Type::String);
        let alias = Type::alias("Dict", Type::named("Map", vec![]));
        assert!(matches!(alias.resolved(), Type::Named { name, .. } if name == "Map"));
        assert_eq!(alias.type_name(), Some("Dict"));
    }
}
