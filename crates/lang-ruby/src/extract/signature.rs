use rubyscope_api::models::MethodParameter;
use rubyscope_core::ast::{Node, NodeKind};

/// Renders a parameter list as `(String name, ?limit, *rest, key:, ?opt:, **kw, &block)`.
pub fn parameters_string(params: &[Node<'_>], declared: &[MethodParameter]) -> String {
    let rendered: Vec<String> = params
        .iter()
        .map(|param| render(*param, declared))
        .collect();
    format!("({})", rendered.join(", "))
}

fn render(param: Node<'_>, declared: &[MethodParameter]) -> String {
    let name = param.name().unwrap_or_default();
    let types = declared
        .iter()
        .find(|p| !name.is_empty() && p.name == name)
        .map(|p| p.types.join(" | "))
        .filter(|types| !types.is_empty());
    let positional = |prefix: &str| match &types {
        Some(types) => format!("{prefix}{types} {name}"),
        None => format!("{prefix}{name}"),
    };
    let keyword = |prefix: &str| match &types {
        Some(types) => format!("{prefix}{name}: {types}"),
        None => format!("{prefix}{name}:"),
    };

    match param.kind() {
        NodeKind::Arg => positional(""),
        NodeKind::Optarg => positional("?"),
        NodeKind::Restarg => positional("*"),
        NodeKind::Kwarg => keyword(""),
        NodeKind::Kwoptarg => keyword("?"),
        NodeKind::Kwrestarg => positional("**"),
        NodeKind::Blockarg => positional("&"),
        NodeKind::ForwardArg => "...".to_string(),
        _ => name.to_string(),
    }
}
