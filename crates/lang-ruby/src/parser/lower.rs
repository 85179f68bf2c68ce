//! Lowering of the tree-sitter concrete tree into the core syntax tree.
//!
//! Shapes follow the classic Ruby AST (`send`, `casgn`, `lvar`, ...), so a
//! bare identifier becomes `lvar` when it names a local in scope and a
//! receiver-less `send` otherwise. Constructs the index does not interpret
//! become `other` nodes whose named children are still lowered.

use super::position::LineIndex;
use super::scope::LocalScopes;
use rubyscope_api::models::Range;
use rubyscope_core::ast::{Child, Leaf, NodeId, NodeKind, SyntaxTree, TreeBuilder};
use tracing::warn;
use tree_sitter::Node as TsNode;

/// Nesting deeper than this is kept as a childless `other` node.
const MAX_DEPTH: usize = 150;

pub(super) struct Lowering<'s> {
    source: &'s str,
    lines: &'s LineIndex<'s>,
    builder: TreeBuilder,
    scopes: LocalScopes,
    /// Nodes that can carry a doc comment, with the row they start on.
    documentable: Vec<(NodeId, usize)>,
    depth: usize,
    truncated: bool,
}

impl<'s> Lowering<'s> {
    pub fn new(source: &'s str, lines: &'s LineIndex<'s>) -> Self {
        Self {
            source,
            lines,
            builder: TreeBuilder::new(),
            scopes: LocalScopes::new(),
            documentable: Vec::new(),
            depth: 0,
            truncated: false,
        }
    }

    pub fn lower_program(mut self, root: TsNode<'_>) -> (SyntaxTree, Vec<(NodeId, usize)>) {
        let statements = named_children(root);
        let children = self.lower_all(statements);
        let id = self.add(NodeKind::Begin, children, &root);
        (self.builder.finish(id), self.documentable)
    }

    fn text(&self, node: &TsNode<'_>) -> &'s str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    fn field_text(&self, node: &TsNode<'_>, field: &str) -> Option<&'s str> {
        node.child_by_field_name(field).map(|child| self.text(&child))
    }

    fn range(&self, node: &TsNode<'_>) -> Range {
        self.lines.range(node)
    }

    fn add(&mut self, kind: NodeKind, children: Vec<Child>, node: &TsNode<'_>) -> NodeId {
        let range = self.range(node);
        self.builder.node(kind, children, Some(range))
    }

    fn add_documentable(&mut self, kind: NodeKind, children: Vec<Child>, node: &TsNode<'_>) -> NodeId {
        let id = self.add(kind, children, node);
        self.documentable.push((id, node.start_position().row));
        id
    }

    fn lower_all(&mut self, nodes: Vec<TsNode<'_>>) -> Vec<Child> {
        nodes
            .into_iter()
            .filter_map(|node| self.lower(node))
            .map(Child::from)
            .collect()
    }

    fn lower(&mut self, node: TsNode<'_>) -> Option<NodeId> {
        if self.depth >= MAX_DEPTH {
            if !self.truncated {
                self.truncated = true;
                let at = self.range(&node).begin;
                warn!(line = at.line, column = at.column, "nesting too deep, subtree not lowered");
            }
            return Some(self.add(NodeKind::Other, vec![], &node));
        }
        self.depth += 1;
        let id = self.lower_node(node);
        self.depth -= 1;
        id
    }

    fn lower_node(&mut self, node: TsNode<'_>) -> Option<NodeId> {
        let id = match node.kind() {
            "comment" | "heredoc_body" | "empty_statement" => return None,
            "class" => self.lower_class(node),
            "module" => self.lower_module(node),
            "singleton_class" => self.lower_singleton_class(node),
            "method" => self.lower_def(node),
            "singleton_method" => self.lower_defs(node),
            "call" => self.lower_call(node),
            "block" | "do_block" => self.lower_block(node, None, &node),
            "lambda" => {
                self.scopes.push_block();
                let id = self.lower_generic(NodeKind::Other, node);
                self.scopes.pop();
                id
            }
            "identifier" => self.lower_identifier(node),
            "constant" => {
                let name = self.text(&node);
                self.add(NodeKind::Const, vec![Child::NIL, Leaf::symbol(name).into()], &node)
            }
            "scope_resolution" => self.lower_scope_resolution(node),
            "assignment" => self.lower_assignment(node),
            "operator_assignment" => self.lower_operator_assignment(node),
            "self" => self.add(NodeKind::SelfRef, vec![], &node),
            "nil" => self.add(NodeKind::Nil, vec![], &node),
            "true" => self.add(NodeKind::True, vec![], &node),
            "false" => self.add(NodeKind::False, vec![], &node),
            "integer" => {
                let value = integer_leaf(self.text(&node));
                self.add(NodeKind::Int, vec![value.into()], &node)
            }
            "float" => {
                let text = self.text(&node).replace('_', "");
                let value = text.parse::<f64>().map(Leaf::Float).unwrap_or(Leaf::Str(text));
                self.add(NodeKind::Float, vec![value.into()], &node)
            }
            "rational" => self.lower_generic(NodeKind::Rational, node),
            "complex" => self.lower_generic(NodeKind::Complex, node),
            "string" | "bare_string" => self.lower_string(node, NodeKind::Str, NodeKind::Dstr),
            "subshell" => self.lower_string(node, NodeKind::Xstr, NodeKind::Xstr),
            "delimited_symbol" | "bare_symbol" => {
                self.lower_string(node, NodeKind::Sym, NodeKind::Dsym)
            }
            "chained_string" => self.lower_generic(NodeKind::Dstr, node),
            "heredoc_beginning" => {
                self.add(NodeKind::Dstr, vec![], &node)
            }
            "simple_symbol" | "hash_key_symbol" => {
                let name = self.text(&node);
                let name = name.strip_prefix(':').unwrap_or(name);
                self.add(NodeKind::Sym, vec![Leaf::symbol(name).into()], &node)
            }
            "array" | "string_array" | "symbol_array" => {
                self.lower_generic(NodeKind::Array, node)
            }
            "hash" => self.lower_generic(NodeKind::Hash, node),
            "pair" => self.lower_pair(node),
            "range" => self.lower_range(node),
            "regex" => self.lower_generic(NodeKind::Regexp, node),
            "instance_variable" => self.lower_variable(NodeKind::Ivar, node),
            "class_variable" => self.lower_variable(NodeKind::Cvar, node),
            "global_variable" => self.lower_variable(NodeKind::Gvar, node),
            "return" => {
                let mut children = Vec::new();
                for child in named_children(node) {
                    if child.kind() == "argument_list" {
                        children.extend(self.lower_arguments(child));
                    } else if let Some(id) = self.lower(child) {
                        children.push(id.into());
                    }
                }
                self.add(NodeKind::Return, children, &node)
            }
            "binary" => self.lower_binary(node),
            "unary" => self.lower_unary(node),
            "element_reference" => self.lower_element_reference(node),
            "parenthesized_statements" | "interpolation" => {
                self.lower_generic(NodeKind::Begin, node)
            }
            "block_argument" => self.lower_generic(NodeKind::BlockPass, node),
            "exception_variable" => {
                self.declare_targets(node);
                self.lower_generic(NodeKind::Other, node)
            }
            "for" => {
                if let Some(pattern) = node.child_by_field_name("pattern") {
                    self.declare_targets(pattern);
                }
                self.lower_generic(NodeKind::Other, node)
            }
            _ => self.lower_generic(NodeKind::Other, node),
        };
        Some(id)
    }

    fn lower_generic(&mut self, kind: NodeKind, node: TsNode<'_>) -> NodeId {
        let children = self.lower_all(named_children(node));
        self.add(kind, children, &node)
    }

    /// A list of statements as one node: nothing, the statement itself, or a `begin`.
    fn lower_statements(&mut self, statements: Vec<TsNode<'_>>, owner: &TsNode<'_>) -> Option<NodeId> {
        let mut lowered = self.lower_all(statements);
        match lowered.len() {
            0 => None,
            1 => lowered.pop().and_then(|child| child.as_node()),
            _ => {
                let start = lowered
                    .first()
                    .and_then(Child::as_node)
                    .and_then(|id| self.builder.location(id));
                let end = lowered
                    .last()
                    .and_then(Child::as_node)
                    .and_then(|id| self.builder.location(id));
                let range = match (start, end) {
                    (Some(start), Some(end)) => Range::new(start.begin, end.end),
                    _ => self.range(owner),
                };
                Some(self.builder.node(NodeKind::Begin, lowered, Some(range)))
            }
        }
    }

    fn lower_class(&mut self, node: TsNode<'_>) -> NodeId {
        let name_node = node.child_by_field_name("name");
        let superclass_node = node.child_by_field_name("superclass");
        let name = name_node.and_then(|name| self.lower(name));
        let superclass = superclass_node
            .map(|superclass| match superclass.kind() {
                "superclass" => named_children(superclass).into_iter().next(),
                _ => Some(superclass),
            })
            .and_then(|expr| expr.and_then(|expr| self.lower(expr)));

        self.scopes.push_opaque();
        let statements = body_nodes(node, &[name_node, superclass_node]);
        let body = self.lower_statements(statements, &node);
        self.scopes.pop();

        self.add_documentable(
            NodeKind::Class,
            vec![name.into(), superclass.into(), body.into()],
            &node,
        )
    }

    fn lower_module(&mut self, node: TsNode<'_>) -> NodeId {
        let name_node = node.child_by_field_name("name");
        let name = name_node.and_then(|name| self.lower(name));

        self.scopes.push_opaque();
        let statements = body_nodes(node, &[name_node]);
        let body = self.lower_statements(statements, &node);
        self.scopes.pop();

        self.add_documentable(NodeKind::Module, vec![name.into(), body.into()], &node)
    }

    fn lower_singleton_class(&mut self, node: TsNode<'_>) -> NodeId {
        let value_node = node.child_by_field_name("value");
        let value = value_node.and_then(|value| self.lower(value));

        self.scopes.push_opaque();
        let statements = body_nodes(node, &[value_node]);
        let body = self.lower_statements(statements, &node);
        self.scopes.pop();

        self.add(NodeKind::SingletonClass, vec![value.into(), body.into()], &node)
    }

    fn lower_def(&mut self, node: TsNode<'_>) -> NodeId {
        let name_node = node.child_by_field_name("name");
        let params_node = node.child_by_field_name("parameters");
        let name = name_node.map(|name| self.text(&name)).unwrap_or_default();

        self.scopes.push_opaque();
        let args = self.lower_parameters(params_node);
        let statements = body_nodes(node, &[name_node, params_node]);
        let body = self.lower_statements(statements, &node);
        self.scopes.pop();

        self.add_documentable(
            NodeKind::Def,
            vec![Leaf::symbol(name).into(), args.into(), body.into()],
            &node,
        )
    }

    fn lower_defs(&mut self, node: TsNode<'_>) -> NodeId {
        let object_node = node.child_by_field_name("object");
        let name_node = node.child_by_field_name("name");
        let params_node = node.child_by_field_name("parameters");
        let definee = object_node.and_then(|object| self.lower(object));
        let name = name_node.map(|name| self.text(&name)).unwrap_or_default();

        self.scopes.push_opaque();
        let args = self.lower_parameters(params_node);
        let statements = body_nodes(node, &[object_node, name_node, params_node]);
        let body = self.lower_statements(statements, &node);
        self.scopes.pop();

        self.add_documentable(
            NodeKind::Defs,
            vec![
                definee.into(),
                Leaf::symbol(name).into(),
                args.into(),
                body.into(),
            ],
            &node,
        )
    }

    /// Always produces an `args` node; it has no location when nothing was written.
    fn lower_parameters(&mut self, params: Option<TsNode<'_>>) -> NodeId {
        let mut children = Vec::new();
        if let Some(params) = params {
            for param in named_children(params) {
                if let Some(id) = self.lower_parameter(param) {
                    children.push(id.into());
                }
            }
        }
        let location = params.map(|params| self.range(&params));
        self.builder.node(NodeKind::Args, children, location)
    }

    fn lower_parameter(&mut self, param: TsNode<'_>) -> Option<NodeId> {
        let id = match param.kind() {
            "identifier" => {
                let name = self.text(&param);
                self.scopes.declare(name);
                self.add(NodeKind::Arg, vec![Leaf::symbol(name).into()], &param)
            }
            "optional_parameter" | "keyword_parameter" => {
                let name = self.field_text(&param, "name").unwrap_or_default();
                self.scopes.declare(name);
                let default = param
                    .child_by_field_name("value")
                    .and_then(|value| self.lower(value));
                let kind = match (param.kind(), default) {
                    ("optional_parameter", _) => NodeKind::Optarg,
                    (_, Some(_)) => NodeKind::Kwoptarg,
                    (_, None) => NodeKind::Kwarg,
                };
                let mut children = vec![Leaf::symbol(name).into()];
                if let Some(default) = default {
                    children.push(default.into());
                }
                self.add(kind, children, &param)
            }
            "splat_parameter" | "hash_splat_parameter" | "block_parameter" => {
                let kind = match param.kind() {
                    "splat_parameter" => NodeKind::Restarg,
                    "hash_splat_parameter" => NodeKind::Kwrestarg,
                    _ => NodeKind::Blockarg,
                };
                let name = self.field_text(&param, "name");
                if let Some(name) = name {
                    self.scopes.declare(name);
                }
                let child = name.map(Leaf::symbol).unwrap_or(Leaf::Nil);
                self.add(kind, vec![child.into()], &param)
            }
            "forward_parameter" => self.add(NodeKind::ForwardArg, vec![], &param),
            "destructured_parameter" => {
                let mut children = Vec::new();
                for inner in named_children(param) {
                    if let Some(id) = self.lower_parameter(inner) {
                        children.push(id.into());
                    }
                }
                self.add(NodeKind::Other, children, &param)
            }
            _ => return None,
        };
        Some(id)
    }

    fn lower_identifier(&mut self, node: TsNode<'_>) -> NodeId {
        let name = self.text(&node);
        if self.scopes.is_local(name) {
            self.add(NodeKind::Lvar, vec![Leaf::symbol(name).into()], &node)
        } else {
            self.add(
                NodeKind::Send,
                vec![Child::NIL, Leaf::symbol(name).into()],
                &node,
            )
        }
    }

    fn lower_variable(&mut self, kind: NodeKind, node: TsNode<'_>) -> NodeId {
        let name = self.text(&node);
        self.add(kind, vec![Leaf::symbol(name).into()], &node)
    }

    fn lower_call(&mut self, node: TsNode<'_>) -> NodeId {
        let receiver_node = node.child_by_field_name("receiver");
        let method_node = node.child_by_field_name("method");
        let arguments_node = node.child_by_field_name("arguments");
        let block_node = node.child_by_field_name("block");

        let receiver = receiver_node.and_then(|receiver| self.lower(receiver));
        let method = method_node.map(|method| self.text(&method)).unwrap_or("call");
        let mut children = vec![receiver.into(), Leaf::symbol(method).into()];
        if let Some(arguments) = arguments_node {
            children.extend(self.lower_arguments(arguments));
        }

        let safe_navigation = all_children(node)
            .iter()
            .any(|child| child.kind() == "&.");
        let kind = if safe_navigation {
            NodeKind::Csend
        } else {
            NodeKind::Send
        };

        let Some(block) = block_node else {
            return self.add_documentable(kind, children, &node);
        };

        // The call itself ends where its block starts.
        let begin = self.range(&node).begin;
        let end = [arguments_node, method_node, receiver_node]
            .into_iter()
            .flatten()
            .map(|part| self.range(&part).end)
            .max()
            .unwrap_or(begin);
        let send = self.builder.node(kind, children, Some(Range::new(begin, end)));
        self.documentable.push((send, node.start_position().row));
        self.lower_block(block, Some(send), &node)
    }

    fn lower_arguments(&mut self, arguments: TsNode<'_>) -> Vec<Child> {
        let mut lowered = Vec::new();
        let mut pairs: Vec<TsNode<'_>> = Vec::new();
        for argument in named_children(arguments) {
            if argument.kind() == "pair" {
                pairs.push(argument);
                continue;
            }
            self.flush_keyword_hash(&mut pairs, &mut lowered);
            if let Some(id) = self.lower(argument) {
                lowered.push(id.into());
            }
        }
        self.flush_keyword_hash(&mut pairs, &mut lowered);
        lowered
    }

    /// Trailing `key: value` arguments form one implicit hash.
    fn flush_keyword_hash(&mut self, pairs: &mut Vec<TsNode<'_>>, lowered: &mut Vec<Child>) {
        let (Some(first), Some(last)) = (pairs.first().copied(), pairs.last().copied()) else {
            return;
        };
        let range = Range::new(self.range(&first).begin, self.range(&last).end);
        let children = self.lower_all(std::mem::take(pairs));
        let hash = self.builder.node(NodeKind::Hash, children, Some(range));
        lowered.push(hash.into());
    }

    fn lower_block(&mut self, block: TsNode<'_>, call: Option<NodeId>, outer: &TsNode<'_>) -> NodeId {
        let params_node = block.child_by_field_name("parameters");

        self.scopes.push_block();
        let args = self.lower_parameters(params_node);
        let statements = body_nodes(block, &[params_node]);
        let body = self.lower_statements(statements, &block);
        self.scopes.pop();

        self.add(NodeKind::Block, vec![call.into(), args.into(), body.into()], outer)
    }

    fn lower_scope_resolution(&mut self, node: TsNode<'_>) -> NodeId {
        let scope = match node.child_by_field_name("scope") {
            Some(scope) => self.lower(scope),
            None => Some(self.builder.node(NodeKind::Cbase, vec![], None)),
        };
        let name_node = node.child_by_field_name("name");
        let name = name_node.map(|name| self.text(&name)).unwrap_or_default();
        let kind = match name_node.map(|name| name.kind()) {
            Some("identifier") => NodeKind::Send,
            _ => NodeKind::Const,
        };
        self.add(kind, vec![scope.into(), Leaf::symbol(name).into()], &node)
    }

    fn lower_assignment(&mut self, node: TsNode<'_>) -> NodeId {
        let Some(left) = node.child_by_field_name("left") else {
            return self.lower_generic(NodeKind::Other, node);
        };
        let right = node.child_by_field_name("right");

        match left.kind() {
            "identifier" => {
                let name = self.text(&left);
                self.scopes.declare(name);
                let value = self.lower_value(right);
                self.add(
                    NodeKind::Lvasgn,
                    vec![Leaf::symbol(name).into(), value.into()],
                    &node,
                )
            }
            "instance_variable" | "class_variable" | "global_variable" => {
                let kind = match left.kind() {
                    "instance_variable" => NodeKind::Ivasgn,
                    "class_variable" => NodeKind::Cvasgn,
                    _ => NodeKind::Gvasgn,
                };
                let name = self.text(&left);
                let value = self.lower_value(right);
                self.add(kind, vec![Leaf::symbol(name).into(), value.into()], &node)
            }
            "constant" => {
                let name = self.text(&left);
                let value = self.lower_value(right);
                self.add_documentable(
                    NodeKind::Casgn,
                    vec![Child::NIL, Leaf::symbol(name).into(), value.into()],
                    &node,
                )
            }
            "scope_resolution" => {
                let scope = match left.child_by_field_name("scope") {
                    Some(scope) => self.lower(scope),
                    None => Some(self.builder.node(NodeKind::Cbase, vec![], None)),
                };
                let name = left
                    .child_by_field_name("name")
                    .map(|name| self.text(&name))
                    .unwrap_or_default();
                let value = self.lower_value(right);
                self.add_documentable(
                    NodeKind::Casgn,
                    vec![scope.into(), Leaf::symbol(name).into(), value.into()],
                    &node,
                )
            }
            "call" => {
                let receiver = left
                    .child_by_field_name("receiver")
                    .and_then(|receiver| self.lower(receiver));
                let method = left
                    .child_by_field_name("method")
                    .map(|method| self.text(&method))
                    .unwrap_or_default();
                let value = self.lower_value(right);
                self.add(
                    NodeKind::Send,
                    vec![
                        receiver.into(),
                        Leaf::symbol(format!("{method}=")).into(),
                        value.into(),
                    ],
                    &node,
                )
            }
            "element_reference" => {
                let object_node = left.child_by_field_name("object");
                let object = object_node.and_then(|object| self.lower(object));
                let mut children = vec![object.into(), Leaf::symbol("[]=").into()];
                let indices: Vec<_> = named_children(left)
                    .into_iter()
                    .filter(|child| Some(child.id()) != object_node.map(|o| o.id()))
                    .collect();
                children.extend(self.lower_all(indices));
                let value = self.lower_value(right);
                children.push(value.into());
                self.add(NodeKind::Send, children, &node)
            }
            _ => {
                self.declare_targets(left);
                let target = self.lower(left);
                let value = self.lower_value(right);
                self.add(NodeKind::Other, vec![target.into(), value.into()], &node)
            }
        }
    }

    /// `x ||= v` and friends: an identifier target becomes `lvasgn [x, v]`.
    fn lower_operator_assignment(&mut self, node: TsNode<'_>) -> NodeId {
        let left = node.child_by_field_name("left");
        match left {
            Some(left) if left.kind() == "identifier" => {
                let name = self.text(&left);
                self.scopes.declare(name);
                let value = self.lower_value(node.child_by_field_name("right"));
                self.add(
                    NodeKind::Lvasgn,
                    vec![Leaf::symbol(name).into(), value.into()],
                    &node,
                )
            }
            Some(left) => {
                self.declare_targets(left);
                self.lower_generic(NodeKind::Other, node)
            }
            None => self.lower_generic(NodeKind::Other, node),
        }
    }

    fn lower_value(&mut self, right: Option<TsNode<'_>>) -> Option<NodeId> {
        let right = right?;
        match right.kind() {
            "right_assignment_list" => Some(self.lower_generic(NodeKind::Array, right)),
            _ => self.lower(right),
        }
    }

    /// Declares every plain identifier in an assignment target as a local.
    fn declare_targets(&mut self, target: TsNode<'_>) {
        if target.kind() == "identifier" {
            let name = self.text(&target);
            self.scopes.declare(name);
            return;
        }
        // Receivers and indices of attribute targets are reads, not declarations.
        if matches!(target.kind(), "call" | "element_reference" | "scope_resolution") {
            return;
        }
        for child in named_children(target) {
            self.declare_targets(child);
        }
    }

    fn lower_pair(&mut self, node: TsNode<'_>) -> NodeId {
        let key = node.child_by_field_name("key").and_then(|key| self.lower(key));
        let value = node
            .child_by_field_name("value")
            .and_then(|value| self.lower(value));
        self.add(NodeKind::Pair, vec![key.into(), value.into()], &node)
    }

    fn lower_range(&mut self, node: TsNode<'_>) -> NodeId {
        let exclusive = all_children(node).iter().any(|child| child.kind() == "...");
        let begin = node
            .child_by_field_name("begin")
            .and_then(|begin| self.lower(begin));
        let end = node.child_by_field_name("end").and_then(|end| self.lower(end));
        let kind = if exclusive {
            NodeKind::Erange
        } else {
            NodeKind::Irange
        };
        self.add(kind, vec![begin.into(), end.into()], &node)
    }

    fn lower_binary(&mut self, node: TsNode<'_>) -> NodeId {
        let (Some(left), Some(operator), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("operator"),
            node.child_by_field_name("right"),
        ) else {
            return self.lower_generic(NodeKind::Other, node);
        };
        let operator = self.text(&operator);
        let left = self.lower(left);
        let right = self.lower(right);
        match operator {
            "&&" | "||" | "and" | "or" => {
                self.add(NodeKind::Other, vec![left.into(), right.into()], &node)
            }
            _ => self.add(
                NodeKind::Send,
                vec![left.into(), Leaf::symbol(operator).into(), right.into()],
                &node,
            ),
        }
    }

    fn lower_unary(&mut self, node: TsNode<'_>) -> NodeId {
        let (Some(operator), Some(operand)) = (
            node.child_by_field_name("operator"),
            node.child_by_field_name("operand"),
        ) else {
            return self.lower_generic(NodeKind::Other, node);
        };
        let method = match self.text(&operator) {
            "!" | "not" => "!",
            "-" => "-@",
            "+" => "+@",
            "~" => "~",
            _ => return self.lower_generic(NodeKind::Other, node),
        };
        let operand = self.lower(operand);
        self.add(
            NodeKind::Send,
            vec![operand.into(), Leaf::symbol(method).into()],
            &node,
        )
    }

    fn lower_element_reference(&mut self, node: TsNode<'_>) -> NodeId {
        let object_node = node.child_by_field_name("object");
        let object = object_node.and_then(|object| self.lower(object));
        let indices: Vec<_> = named_children(node)
            .into_iter()
            .filter(|child| Some(child.id()) != object_node.map(|o| o.id()))
            .collect();
        let mut children = vec![object.into(), Leaf::symbol("[]").into()];
        children.extend(self.lower_all(indices));
        self.add(NodeKind::Send, children, &node)
    }

    /// Strings without interpolation keep their literal text; the rest keep
    /// their interpolated expressions as children.
    fn lower_string(&mut self, node: TsNode<'_>, plain: NodeKind, dynamic: NodeKind) -> NodeId {
        let parts = named_children(node);
        if parts.iter().any(|part| part.kind() == "interpolation") {
            let mut children = Vec::new();
            for part in parts {
                let id = match part.kind() {
                    "interpolation" => self.lower(part),
                    _ => {
                        let text = self.text(&part);
                        Some(self.add(NodeKind::Str, vec![Leaf::Str(text.to_string()).into()], &part))
                    }
                };
                children.extend(id.map(Child::from));
            }
            return self.add(dynamic, children, &node);
        }

        let text: String = parts.iter().map(|part| self.text(part)).collect();
        let value = if plain == NodeKind::Sym {
            Leaf::Symbol(text)
        } else {
            Leaf::Str(text)
        };
        self.add(plain, vec![value.into()], &node)
    }
}

fn is_extra(node: &TsNode<'_>) -> bool {
    matches!(node.kind(), "comment" | "heredoc_body")
}

fn named_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !is_extra(child))
        .collect()
}

fn all_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Statements of a `body` field, or the named children not taken by `header` fields.
fn body_nodes<'t>(node: TsNode<'t>, header: &[Option<TsNode<'t>>]) -> Vec<TsNode<'t>> {
    if let Some(body) = node.child_by_field_name("body") {
        return match body.kind() {
            "body_statement" | "block_body" => named_children(body),
            _ => vec![body],
        };
    }
    named_children(node)
        .into_iter()
        .filter(|child| !header.iter().flatten().any(|h| h.id() == child.id()))
        .collect()
}

fn integer_leaf(text: &str) -> Leaf {
    let digits = text.replace('_', "");
    let lower = digits.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if lower.len() > 1 && lower.starts_with('0') {
        i64::from_str_radix(&lower[1..], 8).ok()
    } else {
        lower.parse().ok()
    };
    parsed.map(Leaf::Integer).unwrap_or(Leaf::Str(digits))
}
