//! Normalization of declared return types into nominal type names.
//!
//! Declared types come from signatures (`Array[String]`, `String?`,
//! `bool`, `self`, `singleton(Foo)`, `A | B`) and are reduced to the names the
//! store can look methods up on.

use rubyscope_api::models::{singleton_type, singleton_type_target};

const DROPPED: &[&str] = &["untyped", "void", "top", "bot", ""];

/// Nominal types for one declared type, with `receiver` standing in for `self`.
pub fn normalize(declared: &str, receiver: &str) -> Vec<String> {
    let mut types = Vec::new();
    for part in split_union(declared) {
        push_normalized(part.trim(), receiver, &mut types);
    }
    types
}

fn push_normalized(part: &str, receiver: &str, out: &mut Vec<String>) {
    if let Some(inner) = part.strip_prefix('(').and_then(|p| p.strip_suffix(')')) {
        out.extend(normalize(inner, receiver));
        return;
    }
    if let Some(optional) = part.strip_suffix('?') {
        push_normalized(optional.trim(), receiver, out);
        out.push("NilClass".to_string());
        return;
    }
    if DROPPED.contains(&part) {
        return;
    }

    match part {
        "bool" | "boolish" => {
            out.push("TrueClass".to_string());
            out.push("FalseClass".to_string());
        }
        "nil" => out.push("NilClass".to_string()),
        "true" => out.push("TrueClass".to_string()),
        "false" => out.push("FalseClass".to_string()),
        "self" => out.push(receiver.to_string()),
        "instance" => out.push(singleton_type_target(receiver).unwrap_or(receiver).to_string()),
        "class" => out.push(match singleton_type_target(receiver) {
            Some(_) => "Class".to_string(),
            None => singleton_type(receiver),
        }),
        _ if part.starts_with('^') => out.push("Proc".to_string()),
        _ if part.starts_with('[') => out.push("Array".to_string()),
        _ if part.starts_with('{') => out.push("Hash".to_string()),
        _ if part.starts_with('"') || part.starts_with('\'') => out.push("String".to_string()),
        _ if part.starts_with(':') && !part.starts_with("::") => out.push("Symbol".to_string()),
        _ if part.starts_with(|c: char| c.is_ascii_digit()) => out.push("Integer".to_string()),
        _ => {
            if let Some(target) = part
                .strip_prefix("singleton(")
                .and_then(|rest| rest.strip_suffix(')'))
            {
                out.push(singleton_type(strip_root(target.trim())));
                return;
            }
            let name = strip_root(part);
            let name = name.split_once('[').map_or(name, |(head, _)| head).trim();
            if !name.is_empty() {
                out.push(name.to_string());
            }
        }
    }
}

fn strip_root(name: &str) -> &str {
    name.strip_prefix("::").unwrap_or(name)
}

/// Splits on `|` outside of brackets and parentheses.
fn split_union(declared: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (index, c) in declared.char_indices() {
        match c {
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => depth -= 1,
            '|' if depth == 0 => {
                parts.push(&declared[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&declared[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn test_plain_and_rooted_names() {
        assert_eq!(normalize("String", "Foo"), vec!["String"]);
        assert_eq!(normalize("::Foo::Bar", "X"), vec!["Foo::Bar"]);
    }

    #[test]
    fn test_generics_are_dropped() {
        assert_eq!(normalize("Array[String]", "X"), vec!["Array"]);
        assert_eq!(normalize("Hash[Symbol, Array[Integer | nil]]", "X"), vec!["Hash"]);
    }

    #[test]
    fn test_unions_and_optionals() {
        assert_eq!(normalize("String | Integer", "X"), vec!["String", "Integer"]);
        assert_eq!(normalize("String?", "X"), vec!["String", "NilClass"]);
        assert_eq!(normalize("(Integer | Float)?", "X"), vec!["Integer", "Float", "NilClass"]);
    }

    #[test]
    fn test_special_types() {
        assert_eq!(normalize("bool", "X"), vec!["TrueClass", "FalseClass"]);
        assert_eq!(normalize("self", "Foo"), vec!["Foo"]);
        assert_eq!(normalize("instance", "singleton<Foo>"), vec!["Foo"]);
        assert_eq!(normalize("singleton(::Foo)", "X"), vec!["singleton<Foo>"]);
        assert_eq!(normalize("^(Integer) -> String", "X"), vec!["Proc"]);
        assert!(normalize("untyped", "X").is_empty());
        assert!(normalize("void", "X").is_empty());
    }
}
