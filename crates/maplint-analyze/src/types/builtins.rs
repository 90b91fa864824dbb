//! Shapes of the global library types the resolver understands
//!
//! Only members whose result type matters for finding map values are
//! modelled. Everything else resolves to `Unknown`.

use super::ts_type::Type;

/// Global constructors that `new` turns into a [`Type::Named`] instance
pub const GLOBAL_CONSTRUCTORS: &[&str] = &[
    "Map",
    "WeakMap",
    "Set",
    "WeakSet",
    "Array",
    "Date",
    "RegExp",
    "Error",
    "TypeError",
    "RangeError",
    "SyntaxError",
    "Promise",
    "URL",
    "URLSearchParams",
    "Object",
    "WeakRef",
];

fn iterable_iterator(element: Type) -> Type {
    Type::named("IterableIterator", vec![element])
}

/// Type arguments a bare `new Name()` gets
pub fn default_type_args(name: &str) -> Vec<Type> {
    match name {
        "Map" | "WeakMap" => vec![Type::Any, Type::Any],
        "Set" | "WeakSet" | "Promise" | "WeakRef" => vec![Type::Any],
        _ => Vec::new(),
    }
}

/// Type of `receiver.member` where `receiver` is a global named type
pub fn named_member(name: &str, type_args: &[Type], member: &str) -> Option<Type> {
    let arg = |index: usize| type_args.get(index).cloned().unwrap_or_default();
    let receiver = || Type::named(name, type_args.to_vec());

    match name {
        "Map" | "ReadonlyMap" | "WeakMap" => {
            let (key, value) = (arg(0), arg(1));
            let weak = name == "WeakMap";
            Some(match member {
                "get" => Type::function(vec![key], value.or_undefined()),
                "set" => Type::function(vec![key, value], receiver()),
                "has" | "delete" => Type::function(vec![key], Type::Boolean),
                "clear" if !weak => Type::function(vec![], Type::Void),
                "forEach" if !weak => Type::function(vec![Type::Unknown], Type::Void),
                "size" if !weak => Type::Number,
                "keys" if !weak => Type::function(vec![], iterable_iterator(key)),
                "values" if !weak => Type::function(vec![], iterable_iterator(value)),
                "entries" if !weak => {
                    Type::function(vec![], iterable_iterator(Type::Tuple(vec![key, value])))
                }
                _ => return None,
            })
        }
        "Set" | "ReadonlySet" | "WeakSet" => {
            let element = arg(0);
            Some(match member {
                "add" => Type::function(vec![element], receiver()),
                "has" | "delete" => Type::function(vec![element], Type::Boolean),
                "clear" => Type::function(vec![], Type::Void),
                "forEach" => Type::function(vec![Type::Unknown], Type::Void),
                "size" => Type::Number,
                "keys" | "values" => Type::function(vec![], iterable_iterator(element)),
                "entries" => Type::function(
                    vec![],
                    iterable_iterator(Type::Tuple(vec![element.clone(), element])),
                ),
                _ => return None,
            })
        }
        "Array" | "ReadonlyArray" => array_member(&arg(0), member),
        "IterableIterator" | "Iterator" | "Generator" => match member {
            "next" => Some(Type::function(vec![], Type::Unknown)),
            _ => None,
        },
        "Promise" => match member {
            "then" | "catch" | "finally" => {
                Some(Type::function(vec![Type::Unknown], Type::named("Promise", vec![Type::Unknown])))
            }
            _ => None,
        },
        "Date" => match member {
            "toISOString" | "toString" | "toJSON" => Some(Type::function(vec![], Type::String)),
            "getTime" | "valueOf" => Some(Type::function(vec![], Type::Number)),
            _ => None,
        },
        "RegExp" => match member {
            "test" => Some(Type::function(vec![Type::String], Type::Boolean)),
            "source" | "flags" => Some(Type::String),
            _ => None,
        },
        "Error" | "TypeError" | "RangeError" | "SyntaxError" => match member {
            "message" | "name" => Some(Type::String),
            "stack" => Some(Type::String.or_undefined()),
            _ => None,
        },
        _ => None,
    }
}

/// Type of `array.member` for an array with the given element type
pub fn array_member(element: &Type, member: &str) -> Option<Type> {
    let same_array = || Type::array(element.clone());
    Some(match member {
        "length" => Type::Number,
        "at" | "pop" | "shift" | "find" | "findLast" => {
            Type::function(vec![Type::Unknown], element.clone().or_undefined())
        }
        "slice" | "filter" | "concat" | "reverse" | "sort" | "splice" | "toSorted"
        | "toReversed" => Type::function(vec![Type::Unknown], same_array()),
        "push" | "unshift" | "indexOf" | "lastIndexOf" | "findIndex" | "findLastIndex" => {
            Type::function(vec![Type::Unknown], Type::Number)
        }
        "includes" | "some" | "every" => Type::function(vec![Type::Unknown], Type::Boolean),
        "join" => Type::function(vec![Type::String], Type::String),
        "forEach" => Type::function(vec![Type::Unknown], Type::Void),
        "keys" => Type::function(vec![], iterable_iterator(Type::Number)),
        "values" => Type::function(vec![], iterable_iterator(element.clone())),
        "entries" => Type::function(
            vec![],
            iterable_iterator(Type::Tuple(vec![Type::Number, element.clone()])),
        ),
        "map" | "flatMap" | "flat" => Type::function(vec![Type::Unknown], Type::array(Type::Unknown)),
        "reduce" | "reduceRight" => Type::function(vec![Type::Unknown], Type::Unknown),
        _ => return None,
    })
}

/// Type of `string.member`
pub fn string_member(member: &str) -> Option<Type> {
    Some(match member {
        "length" => Type::Number,
        "split" => Type::function(vec![Type::String], Type::array(Type::String)),
        "charAt" | "slice" | "substring" | "toLowerCase" | "toUpperCase" | "trim" | "trimStart"
        | "trimEnd" | "padStart" | "padEnd" | "repeat" | "replace" | "replaceAll" | "concat"
        | "normalize" => Type::function(vec![Type::Unknown], Type::String),
        "indexOf" | "lastIndexOf" | "charCodeAt" | "codePointAt" | "localeCompare" => {
            Type::function(vec![Type::Unknown], Type::Number)
        }
        "includes" | "startsWith" | "endsWith" => Type::function(vec![Type::String], Type::Boolean),
        _ => return None,
    })
}

/// Element type produced when iterating a value of this type
pub fn iterated_element(ty: &Type) -> Type {
    match ty.resolved() {
        Type::Array(element) => element.as_ref().clone(),
        Type::Tuple(elements) => Type::union(elements.clone()),
        Type::String | Type::StringLiteral(_) => Type::String,
        Type::Any => Type::Any,
        Type::Named { name, type_args } => match name.as_str() {
            "Map" | "ReadonlyMap" => Type::Tuple(vec![
                type_args.first().cloned().unwrap_or_default(),
                type_args.get(1).cloned().unwrap_or_default(),
            ]),
            "Set" | "ReadonlySet" | "Array" | "ReadonlyArray" | "IterableIterator" | "Iterable"
            | "Iterator" | "Generator" => type_args.first().cloned().unwrap_or_default(),
            _ => Type::Unknown,
        },
        Type::Union(types) => Type::union(types.iter().map(iterated_element).collect()),
        _ => Type::Unknown,
    }
}

/// Result type of a call to a static member of a global namespace object,
/// e.g. `Object.keys(x)` or `Array.from(x)`
pub fn static_call(namespace: &str, member: &str, first_argument: Option<&Type>) -> Option<Type> {
    match (namespace, member) {
        ("Object", "keys") | ("Object", "getOwnPropertyNames") => Some(Type::array(Type::String)),
        ("Object", "values") => Some(Type::array(Type::Unknown)),
        ("Object", "entries") => Some(Type::array(Type::Tuple(vec![Type::String, Type::Unknown]))),
        ("Object", "assign") | ("Object", "freeze") => first_argument.cloned(),
        ("Array", "from") => Some(Type::array(
            first_argument.map(iterated_element).unwrap_or_default(),
        )),
        ("Array", "isArray") | ("Number", "isInteger") | ("Number", "isNaN") => Some(Type::Boolean),
        ("JSON", "stringify") => Some(Type::String),
        ("JSON", "parse") => Some(Type::Any),
        ("Math", _) => Some(Type::Number),
        ("Date", "now") => Some(Type::Number),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_members() {
        let args = [Type::String, Type::Number];
        let get = named_member("Map", &args, "get").unwrap();
        let Type::Function(shape) = get else {
            panic!("expected function");
        };
        assert_eq!(shape.return_type, Type::union(vec![Type::Number, Type::Undefined]));
        assert_eq!(named_member("Map", &args, "size"), Some(Type::Number));
        assert_eq!(named_member("WeakMap", &args, "size"), None);
        assert_eq!(named_member("Map", &args, "foo"), None);
    }

    #[test]
    fn test_iterated_element() {
        let map = Type::named("Map", vec![Type::String, Type::Number]);
        assert_eq!(
            iterated_element(&map),
            Type::Tuple(vec![Type::String, Type::Number])
        );
        assert_eq!(iterated_element(&Type::array(Type::Boolean)), Type::Boolean);
        assert_eq!(iterated_element(&Type::Number), Type::Unknown);
    }

    #[test]
    fn test_static_calls() {
        let map = Type::named("Map", vec![Type::String, Type::Number]);
        assert_eq!(
            static_call("Array", "from", Some(&map)),
            Some(Type::array(Type::Tuple(vec![Type::String, Type::Number])))
        );
        assert_eq!(
            static_call("Object", "keys", Some(&map)),
            Some(Type::array(Type::String))
        );
        assert_eq!(static_call("Foo", "bar", None), None);
    }
}
