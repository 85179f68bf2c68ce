//! Qualified-name conventions for Ruby symbols.
//!
//! Namespaces are joined with `::`, instance methods with `#` and singleton
//! methods with `.`: `A::B`, `A::B#foo`, `A::B.foo`.

pub const SCOPE_SEPARATOR: &str = "::";
pub const INSTANCE_METHOD_MARKER: char = '#';
pub const SINGLETON_METHOD_MARKER: char = '.';

/// Namespace of anything declared at the top level.
pub const TOP_LEVEL_NAMESPACE: &str = "Object";

const SINGLETON_PREFIX: &str = "singleton<";
const SINGLETON_SUFFIX: &str = ">";

/// The pseudo-type naming the metaclass of `name`, e.g. `singleton<String>`.
pub fn singleton_type(name: &str) -> String {
    format!("{SINGLETON_PREFIX}{name}{SINGLETON_SUFFIX}")
}

/// If `type_name` is `singleton<X>`, returns `X`.
pub fn singleton_type_target(type_name: &str) -> Option<&str> {
    type_name
        .strip_prefix(SINGLETON_PREFIX)
        .and_then(|rest| rest.strip_suffix(SINGLETON_SUFFIX))
}

/// Joins a namespace and a constant name. An empty namespace yields the bare name.
pub fn join_constant(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{SCOPE_SEPARATOR}{name}")
    }
}

/// `A::B::C` -> `A::B`; a top-level constant lives in `Object`.
pub fn constant_namespace(qualified_name: &str) -> &str {
    match qualified_name.rfind(SCOPE_SEPARATOR) {
        Some(idx) => &qualified_name[..idx],
        None => TOP_LEVEL_NAMESPACE,
    }
}

/// `A::B::C` -> `C`
pub fn constant_leaf_name(qualified_name: &str) -> &str {
    match qualified_name.rfind(SCOPE_SEPARATOR) {
        Some(idx) => &qualified_name[idx + SCOPE_SEPARATOR.len()..],
        None => qualified_name,
    }
}

pub fn method_marker(singleton: bool) -> char {
    if singleton {
        SINGLETON_METHOD_MARKER
    } else {
        INSTANCE_METHOD_MARKER
    }
}

/// `namespace + marker + method_name`
pub fn method_qualified_name(namespace: &str, method_name: &str, singleton: bool) -> String {
    format!("{namespace}{}{method_name}", method_marker(singleton))
}
