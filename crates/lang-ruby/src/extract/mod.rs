//! Turns syntax nodes into definitions.
//!
//! Each node is looked at in isolation; constant references are recorded as
//! written (with their lexical nesting) and resolved later by the store.

mod doc;
mod signature;

pub use doc::DocComment;
pub use signature::parameters_string;

use rubyscope_api::models::{
    ClassDefinition, ConstantDefinition, Definition, Location, MethodDefinition, MethodKind,
    MethodType, ModuleDefinition, UnqualifiedName,
};
use rubyscope_core::ast::{Node, NodeKind};
use rubyscope_core::plugin::{DefinitionExtractor, ExtractionContext};

const UNTYPED: &str = "untyped";

#[derive(Debug, Default, Clone, Copy)]
pub struct RubyExtractor;

impl RubyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DefinitionExtractor for RubyExtractor {
    fn extract(
        &self,
        node: Node<'_>,
        doc_comment: Option<&str>,
        ctx: &ExtractionContext<'_>,
    ) -> Vec<Definition> {
        match node.kind() {
            NodeKind::Class => class_definition(node, doc_comment, ctx)
                .map(Definition::from)
                .into_iter()
                .collect(),
            NodeKind::Module => module_definition(node, doc_comment, ctx)
                .map(Definition::from)
                .into_iter()
                .collect(),
            NodeKind::Casgn => constant_definition(node, doc_comment, ctx)
                .map(Definition::from)
                .into_iter()
                .collect(),
            NodeKind::Def | NodeKind::Defs => method_definition(node, doc_comment, ctx)
                .map(Definition::from)
                .into_iter()
                .collect(),
            NodeKind::Send => attribute_methods(node, doc_comment, ctx)
                .into_iter()
                .map(Definition::from)
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn location(node: Node<'_>, ctx: &ExtractionContext<'_>) -> Option<Location> {
    node.location().map(|range| Location::new(ctx.uri, range))
}

fn constant_definition(
    node: Node<'_>,
    doc_comment: Option<&str>,
    ctx: &ExtractionContext<'_>,
) -> Option<ConstantDefinition> {
    let doc = DocComment::parse(doc_comment);
    Some(ConstantDefinition {
        qualified_name: node.qualified_name()?,
        description: doc.description,
        location: location(node, ctx),
    })
}

fn module_definition(
    node: Node<'_>,
    doc_comment: Option<&str>,
    ctx: &ExtractionContext<'_>,
) -> Option<ModuleDefinition> {
    let constant = constant_definition(node, doc_comment, ctx)?;
    let mut module = ModuleDefinition::from_constant(constant);
    for statement in node.body_statements() {
        let Some(mixin) = statement.method_name().filter(|_| statement.receiver().is_none())
        else {
            continue;
        };
        let target = match mixin {
            "include" => &mut module.included_module_unqualified_names,
            "prepend" => &mut module.prepended_module_unqualified_names,
            _ => continue,
        };
        target.extend(constant_arguments(statement));
    }
    Some(module)
}

fn class_definition(
    node: Node<'_>,
    doc_comment: Option<&str>,
    ctx: &ExtractionContext<'_>,
) -> Option<ClassDefinition> {
    let module = module_definition(node, doc_comment, ctx)?;
    let super_class_unqualified_name = node
        .super_class()
        .and_then(|super_class| super_class.unqualified_name());
    Some(ClassDefinition {
        module,
        super_class_qualified_name: None,
        super_class_unqualified_name,
    })
}

/// `include A, B` -> `[A, B]`; non-constant arguments are ignored.
fn constant_arguments(call: Node<'_>) -> Vec<UnqualifiedName> {
    call.arguments()
        .into_iter()
        .filter_map(|argument| argument.unqualified_name())
        .collect()
}

fn method_definition(
    node: Node<'_>,
    doc_comment: Option<&str>,
    ctx: &ExtractionContext<'_>,
) -> Option<MethodDefinition> {
    let method_name = node.method_name()?;
    let doc = DocComment::parse(doc_comment);
    let kind = if node.is_singleton_method() {
        MethodKind::Singleton
    } else {
        MethodKind::Instance
    };
    let params = parameters_string(&node.parameters(), &doc.parameters);

    Some(MethodDefinition {
        kind,
        method_name: method_name.to_string(),
        namespace: node.method_namespace(),
        types: method_types(&params, &doc.return_types),
        parameters: doc.parameters,
        description: doc.description,
        location: location(node, ctx),
    })
}

/// One signature per declared return type, `untyped` if none is declared.
fn method_types(parameters_string: &str, return_types: &[String]) -> Vec<MethodType> {
    if return_types.is_empty() {
        return vec![MethodType::new(parameters_string, UNTYPED)];
    }
    return_types
        .iter()
        .map(|return_type| MethodType::new(parameters_string, return_type.as_str()))
        .collect()
}

/// Reader and writer methods generated by `attr_reader`, `attr_writer` and `attr_accessor`.
fn attribute_methods(
    node: Node<'_>,
    doc_comment: Option<&str>,
    ctx: &ExtractionContext<'_>,
) -> Vec<MethodDefinition> {
    let (reader, writer) = match node.method_name() {
        Some("attr_reader") => (true, false),
        Some("attr_writer") => (false, true),
        Some("attr_accessor") => (true, true),
        _ => return Vec::new(),
    };
    if node.receiver().is_some() {
        return Vec::new();
    }

    // Only direct statements of a class, module or `class << self` body.
    let scope = node
        .each_ancestor(&[
            NodeKind::Def,
            NodeKind::Defs,
            NodeKind::Block,
            NodeKind::SingletonClass,
            NodeKind::Class,
            NodeKind::Module,
        ])
        .next();
    let kind = match scope.map(|scope| scope.kind()) {
        Some(NodeKind::Class | NodeKind::Module) => MethodKind::Instance,
        Some(NodeKind::SingletonClass) => MethodKind::Singleton,
        _ => return Vec::new(),
    };

    let doc = DocComment::parse(doc_comment);
    let namespace = node.namespace();
    let mut methods = Vec::new();
    for argument in node.arguments() {
        let Some(name) = argument.string_value() else {
            continue;
        };
        let base = |method_name: String, params: &str, return_types: &[String]| MethodDefinition {
            kind,
            method_name,
            namespace: namespace.clone(),
            types: method_types(params, return_types),
            parameters: Vec::new(),
            description: doc.description.clone(),
            location: location(argument, ctx),
        };
        if reader {
            methods.push(base(name.to_string(), "()", &doc.return_types));
        }
        if writer {
            let params = match doc.return_types.as_slice() {
                [] => "(value)".to_string(),
                types => format!("({} value)", types.join(" | ")),
            };
            methods.push(base(format!("{name}="), &params, &doc.return_types));
        }
    }
    methods
}
