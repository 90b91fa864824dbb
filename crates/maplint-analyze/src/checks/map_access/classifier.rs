//! Mapping-type classification

use crate::types::Type;

/// Global names of the built-in key/value mapping types
pub const MAPPING_TYPE_NAMES: &[&str] = &["Map", "ReadonlyMap", "WeakMap"];

/// Whether a type is, aliases to, or has a union branch that is a built-in
/// mapping type
///
/// Classes and interfaces declared in the file under a mapping name resolve
/// to `Type::Class`/`Type::Interface`, never `Type::Named`, so they do not
/// count.
pub fn is_mapping_type(ty: &Type) -> bool {
    classify(ty, true)
}

fn classify(ty: &Type, may_unalias: bool) -> bool {
    match ty {
        Type::Named { name, .. } => MAPPING_TYPE_NAMES.contains(&name.as_str()),
        Type::Alias { target, .. } if may_unalias => classify(target, false),
        Type::Union(members) => members.iter().any(|member| classify(member, may_unalias)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectShape;

    fn map() -> Type {
        Type::named("Map", vec![Type::String, Type::Number])
    }

    #[test]
    fn test_named_mapping_types() {
        assert!(is_mapping_type(&map()));
        assert!(is_mapping_type(&Type::named("ReadonlyMap", vec![])));
        assert!(is_mapping_type(&Type::named("WeakMap", vec![])));
        assert!(!is_mapping_type(&Type::named("Set", vec![Type::String])));
    }

    #[test]
    fn test_alias_and_union() {
        assert!(is_mapping_type(&Type::alias("Dict", map())));
        assert!(is_mapping_type(&Type::union(vec![map(), Type::Undefined])));
        assert!(is_mapping_type(&Type::alias(
            "MaybeDict",
            Type::union(vec![map(), Type::Null])
        )));
    }

    #[test]
    fn test_non_mapping_types() {
        let record = Type::Object(ObjectShape {
            properties: Vec::new(),
            index: Some(Box::new(Type::Number)),
        });
        assert!(!is_mapping_type(&record));
        assert!(!is_mapping_type(&Type::Unknown));
        assert!(!is_mapping_type(&Type::Any));
        assert!(!is_mapping_type(&Type::array(map())));
        assert!(!is_mapping_type(&Type::Class {
            name: "Map".to_string(),
            type_args: Vec::new(),
        }));
        assert!(!is_mapping_type(&Type::Intersection(vec![map(), Type::String])));
    }
}
