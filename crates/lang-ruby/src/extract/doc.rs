//! YARD-style tags in doc comments.

use once_cell::sync::Lazy;
use regex::Regex;
use rubyscope_api::models::MethodParameter;

static PARAM_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@param\s+(?:\[(?P<pre_types>[^\]]*)\]\s+(?P<pre_name>\w+)|(?P<name>\w+)\s+\[(?P<types>[^\]]*)\])")
        .expect("valid @param pattern")
});
static RETURN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@return\s+\[(?P<types>[^\]]*)\]").expect("valid @return pattern"));

/// A doc comment split into free text and the tags the index understands.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocComment {
    pub description: Option<String>,
    pub return_types: Vec<String>,
    pub parameters: Vec<MethodParameter>,
}

impl DocComment {
    pub fn parse(comment: Option<&str>) -> Self {
        let Some(comment) = comment else {
            return Self::default();
        };

        let mut doc = Self::default();
        let mut text = Vec::new();
        for line in comment.lines() {
            let trimmed = line.trim();
            if let Some(caps) = PARAM_TAG.captures(trimmed) {
                let name = caps.name("name").or_else(|| caps.name("pre_name"));
                let types = caps.name("types").or_else(|| caps.name("pre_types"));
                if let (Some(name), Some(types)) = (name, types) {
                    doc.parameters.push(MethodParameter {
                        name: name.as_str().to_string(),
                        types: split_types(types.as_str()),
                    });
                }
            } else if let Some(caps) = RETURN_TAG.captures(trimmed) {
                if let Some(types) = caps.name("types") {
                    doc.return_types.extend(split_types(types.as_str()));
                }
            } else if !trimmed.starts_with('@') {
                text.push(line);
            }
        }

        let description = text.join("\n").trim().to_string();
        doc.description = (!description.is_empty()).then_some(description);
        doc
    }
}

/// `String, Array<Integer>` -> `["String", "Array<Integer>"]`, splitting only at the top level.
fn split_types(types: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in types.chars() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    parts.push(current);
    parts
        .into_iter()
        .map(|part| yard_to_signature(part.trim()))
        .filter(|part| !part.is_empty())
        .collect()
}

/// YARD writes generics as `Array<String>`; signatures use `Array[String]`.
fn yard_to_signature(ty: &str) -> String {
    match ty {
        "Boolean" => "bool".to_string(),
        _ => ty.replace('<', "[").replace('>', "]"),
    }
}
