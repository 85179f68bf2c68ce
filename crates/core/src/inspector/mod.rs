//! Best-effort type inference over a syntax node.
//!
//! Inference is one level deep per node kind: literals map to fixed types,
//! constants to their metaclass, calls to the declared return types of the
//! method found on each receiver type. Results are candidate sets; empty
//! means "don't know", and callers must expect several candidates.

mod literal;
mod return_type;

pub use literal::literal_type;
pub use return_type::normalize as normalize_return_type;

use crate::ast::{Node, NodeKind};
use crate::store::DefinitionStore;
use indexmap::IndexSet;
use rubyscope_api::models::{Definition, singleton_type, singleton_type_target};

/// Candidate nominal type names; `singleton<X>` names the metaclass of `X`.
pub type TypeSet = IndexSet<String>;

pub struct NodeInspector<'a> {
    store: &'a DefinitionStore,
    node: Node<'a>,
}

impl<'a> NodeInspector<'a> {
    pub fn new(store: &'a DefinitionStore, node: Node<'a>) -> Self {
        Self { store, node }
    }

    pub fn node(&self) -> Node<'a> {
        self.node
    }

    pub fn return_types(&self) -> TypeSet {
        self.types_of(self.node)
    }

    /// Types the call is dispatched on: the inferred types of the explicit
    /// receiver, or the implicit `self` of the call site.
    pub fn method_receiver_types(&self) -> TypeSet {
        self.receiver_types_of(self.node)
    }

    /// Definitions the called method resolves to, one per receiver type that has it.
    pub fn method_definitions(&self) -> Vec<&'a Definition> {
        self.called_methods(self.node)
    }

    /// Go-to-definition targets for the node.
    pub fn definitions(&self) -> Vec<&'a Definition> {
        let node = self.node;
        match node.kind() {
            NodeKind::Const => node
                .unqualified_name()
                .map(|name| self.store.resolve_constant(&name))
                .and_then(|name| self.store.find_definition_by_qualified_name(&name))
                .into_iter()
                .collect(),
            NodeKind::Send | NodeKind::Csend | NodeKind::Block => self.called_methods(node),
            NodeKind::Class
            | NodeKind::Module
            | NodeKind::Casgn
            | NodeKind::Def
            | NodeKind::Defs => node
                .qualified_name()
                .and_then(|name| self.store.find_definition_by_qualified_name(&name))
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn called_methods(&self, node: Node<'a>) -> Vec<&'a Definition> {
        let call = match node.kind() {
            NodeKind::Block => match node.child_node(0) {
                Some(call) => call,
                None => return Vec::new(),
            },
            _ => node,
        };
        let Some(method_name) = call.method_name() else {
            return Vec::new();
        };

        let mut found: Vec<&'a Definition> = Vec::new();
        for receiver in self.receiver_types_of(call) {
            if let Some(definition) = self.find_method(&receiver, method_name) {
                if !found.iter().any(|seen| std::ptr::eq(*seen, definition)) {
                    found.push(definition);
                }
            }
        }
        found
    }

    fn find_method(&self, receiver: &str, method_name: &str) -> Option<&'a Definition> {
        match singleton_type_target(receiver) {
            Some(target) => self.store.find_method_definition_by(method_name, target, true),
            None => self.store.find_method_definition_by(method_name, receiver, false),
        }
    }

    fn types_of(&self, node: Node<'a>) -> TypeSet {
        match node.kind() {
            NodeKind::Const => node
                .unqualified_name()
                .map(|name| singleton_type(&self.store.resolve_constant(&name)))
                .into_iter()
                .collect(),
            NodeKind::Lvar => self.local_variable_types(node),
            NodeKind::Send | NodeKind::Csend => self.call_types(node),
            NodeKind::Block => node
                .child_node(0)
                .map(|call| self.call_types(call))
                .unwrap_or_default(),
            NodeKind::SelfRef => TypeSet::from([self_type(node)]),
            NodeKind::Begin => node
                .child_nodes()
                .last()
                .map(|last| self.types_of(last))
                .unwrap_or_default(),
            NodeKind::Lvasgn | NodeKind::Ivasgn | NodeKind::Cvasgn | NodeKind::Gvasgn => node
                .child_node(1)
                .map(|value| self.types_of(value))
                .unwrap_or_default(),
            NodeKind::Str
            | NodeKind::Dstr
            | NodeKind::Xstr
            | NodeKind::Sym
            | NodeKind::Dsym
            | NodeKind::Int
            | NodeKind::Float
            | NodeKind::Rational
            | NodeKind::Complex
            | NodeKind::Array
            | NodeKind::Hash
            | NodeKind::Irange
            | NodeKind::Erange
            | NodeKind::Regexp
            | NodeKind::True
            | NodeKind::False
            | NodeKind::Nil => literal_type(node.kind())
                .map(|ty| TypeSet::from([ty.to_string()]))
                .unwrap_or_default(),
            NodeKind::Class
            | NodeKind::Module
            | NodeKind::SingletonClass
            | NodeKind::Def
            | NodeKind::Defs
            | NodeKind::Args
            | NodeKind::Arg
            | NodeKind::Optarg
            | NodeKind::Restarg
            | NodeKind::Kwarg
            | NodeKind::Kwoptarg
            | NodeKind::Kwrestarg
            | NodeKind::Blockarg
            | NodeKind::ForwardArg
            | NodeKind::BlockPass
            | NodeKind::Cbase
            | NodeKind::Casgn
            | NodeKind::Ivar
            | NodeKind::Cvar
            | NodeKind::Gvar
            | NodeKind::Pair
            | NodeKind::Return
            | NodeKind::Other => TypeSet::new(),
        }
    }

    fn receiver_types_of(&self, call: Node<'a>) -> TypeSet {
        match call.kind() {
            NodeKind::Send | NodeKind::Csend => match call.receiver() {
                Some(receiver) => self.types_of(receiver),
                None => TypeSet::from([self_type(call)]),
            },
            NodeKind::Block => call
                .child_node(0)
                .map(|inner| self.receiver_types_of(inner))
                .unwrap_or_default(),
            _ => TypeSet::new(),
        }
    }

    /// Union of declared return types of the method on every receiver type.
    /// Receiver types without the method contribute nothing.
    fn call_types(&self, call: Node<'a>) -> TypeSet {
        let Some(method_name) = call.method_name() else {
            return TypeSet::new();
        };
        let mut types = TypeSet::new();
        for receiver in self.receiver_types_of(call) {
            let Some(method) = self
                .find_method(&receiver, method_name)
                .and_then(Definition::as_method)
            else {
                continue;
            };
            for declared in method.return_types() {
                types.extend(normalize_return_type(declared, &receiver));
            }
        }
        types
    }

    /// Declared types of the enclosing method's parameter of the same name,
    /// or else the types of the nearest preceding assignment in the same scope.
    fn local_variable_types(&self, lvar: Node<'a>) -> TypeSet {
        let Some(name) = lvar.name() else {
            return TypeSet::new();
        };

        if let Some(method) = lvar.enclosing_method() {
            let declares = method.parameters().iter().any(|p| p.name() == Some(name));
            if declares {
                return self.parameter_types(method, name);
            }
        }

        let Some(begin) = lvar.location().map(|range| range.begin) else {
            return TypeSet::new();
        };
        let scope = lvar
            .enclosing_method()
            .unwrap_or_else(|| lvar.tree().root());
        scope
            .each_descendant(&[NodeKind::Lvasgn])
            .filter(|assignment| assignment.name() == Some(name))
            .filter(|assignment| assignment.location().is_some_and(|r| r.end <= begin))
            .filter(|assignment| assignment.enclosing_method() == lvar.enclosing_method())
            .last()
            .and_then(|assignment| assignment.child_node(1))
            .map(|value| self.types_of(value))
            .unwrap_or_default()
    }

    fn parameter_types(&self, method: Node<'a>, name: &str) -> TypeSet {
        let receiver = self_type(method);
        method
            .qualified_name()
            .and_then(|qualified_name| self.store.find_definition_by_qualified_name(&qualified_name))
            .and_then(Definition::as_method)
            .and_then(|definition| definition.parameter(name))
            .map(|parameter| {
                parameter
                    .types
                    .iter()
                    .flat_map(|declared| normalize_return_type(declared, &receiver))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Type of `self` at `node`: the lexical namespace, or its metaclass inside
/// singleton methods and `class << self`.
fn self_type(node: Node<'_>) -> String {
    let scope = match node.kind() {
        NodeKind::Def | NodeKind::Defs => node,
        _ => node
            .each_ancestor(&[NodeKind::Def, NodeKind::Defs])
            .next()
            .unwrap_or(node),
    };
    let namespace = match scope.kind() {
        NodeKind::Def | NodeKind::Defs => scope.method_namespace(),
        _ => node.namespace(),
    };
    let singleton = match scope.kind() {
        NodeKind::Def | NodeKind::Defs => scope.is_singleton_method(),
        _ => node.in_singleton_context(),
    };
    if singleton {
        singleton_type(&namespace)
    } else {
        namespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Child, Leaf, NodeId, SyntaxTree, TreeBuilder};
    use rubyscope_api::models::{
        ClassDefinition, MethodDefinition, MethodParameter, ModuleDefinition, Position, Range,
    };

    /// Gives every node its own line so `node_at` can address it.
    struct Tree {
        builder: TreeBuilder,
        line: u32,
    }

    impl Tree {
        fn new() -> Self {
            Self {
                builder: TreeBuilder::new(),
                line: 100,
            }
        }

        fn add(&mut self, kind: NodeKind, children: Vec<Child>) -> NodeId {
            self.line -= 1;
            let range = Range::new(Position::new(self.line, 0), Position::new(self.line, 10));
            self.builder.node(kind, children, Some(range))
        }

        fn constant(&mut self, name: &str) -> NodeId {
            self.add(NodeKind::Const, vec![Child::NIL, Leaf::symbol(name).into()])
        }

        fn send(&mut self, receiver: Option<NodeId>, name: &str, args: Vec<NodeId>) -> NodeId {
            let mut children = vec![receiver.into(), Leaf::symbol(name).into()];
            children.extend(args.into_iter().map(Child::from));
            self.add(NodeKind::Send, children)
        }

        fn def(&mut self, name: &str, params: &[&str], body: Option<NodeId>) -> NodeId {
            let params: Vec<Child> = params
                .iter()
                .map(|p| self.add(NodeKind::Arg, vec![Leaf::symbol(*p).into()]).into())
                .collect();
            let args = self.add(NodeKind::Args, params);
            self.add(
                NodeKind::Def,
                vec![Leaf::symbol(name).into(), args.into(), body.into()],
            )
        }

        fn class(&mut self, name: &str, body: Option<NodeId>) -> NodeId {
            let name = self.constant(name);
            self.add(NodeKind::Class, vec![name.into(), Child::NIL, body.into()])
        }

        fn module(&mut self, name: &str, body: Option<NodeId>) -> NodeId {
            let name = self.constant(name);
            self.add(NodeKind::Module, vec![name.into(), body.into()])
        }

        fn finish(self, root: NodeId) -> SyntaxTree {
            self.builder.finish(root)
        }
    }

    fn node(tree: &SyntaxTree, id: NodeId) -> Node<'_> {
        tree.get(id).unwrap()
    }

    fn set(types: &[&str]) -> TypeSet {
        types.iter().map(|t| t.to_string()).collect()
    }

    fn store() -> DefinitionStore {
        let mut store = DefinitionStore::new();
        store.bulk_add(vec![
            Definition::from(ClassDefinition::new("String")),
            MethodDefinition::instance("String", "upcase")
                .returning("()", "String")
                .into(),
            MethodDefinition::instance("String", "size")
                .returning("()", "Integer")
                .into(),
            MethodDefinition::instance("Integer", "size")
                .returning("()", "Integer")
                .into(),
            MethodDefinition::instance("Array", "first")
                .returning("()", "untyped")
                .returning("(int n)", "Array[untyped]")
                .into(),
            MethodDefinition::instance("Class", "new")
                .returning("()", "instance")
                .into(),
            ModuleDefinition::new("A").into(),
            ClassDefinition::new("A::Foo").into(),
            MethodDefinition::instance("A::Foo", "count")
                .returning("()", "Integer?")
                .into(),
            MethodDefinition {
                parameters: vec![MethodParameter {
                    name: "text".into(),
                    types: vec!["String".into(), "Integer".into()],
                }],
                ..MethodDefinition::instance("A::Foo", "measure").returning("(text)", "Integer")
            }
            .into(),
        ]);
        store
    }

    #[test]
    fn test_string_literal_is_always_string() {
        let store = store();
        let mut t = Tree::new();
        let string = t.add(NodeKind::Str, vec![Leaf::Str("x".into()).into()]);
        let def = t.def("count", &[], Some(string));
        let foo = t.class("Foo", Some(def));
        let root = t.module("A", Some(foo));
        let tree = t.finish(root);

        let inspector = NodeInspector::new(&store, node(&tree, string));
        assert_eq!(inspector.return_types(), set(&["String"]));
    }

    #[test]
    fn test_literal_table() {
        assert_eq!(literal_type(NodeKind::Irange), Some("Range"));
        assert_eq!(literal_type(NodeKind::Nil), Some("NilClass"));
        assert_eq!(literal_type(NodeKind::Dsym), Some("Symbol"));
        assert_eq!(literal_type(NodeKind::Send), None);
    }

    #[test]
    fn test_constant_reference_resolves_through_nesting() {
        let store = store();
        let mut t = Tree::new();
        let reference = t.constant("Foo");
        let root = t.module("A", Some(reference));
        let tree = t.finish(root);

        let inspector = NodeInspector::new(&store, node(&tree, reference));
        assert_eq!(inspector.return_types(), set(&["singleton<A::Foo>"]));
        let targets: Vec<_> = inspector
            .definitions()
            .iter()
            .map(|d| d.qualified_name().into_owned())
            .collect();
        assert_eq!(targets, vec!["A::Foo"]);
    }

    #[test]
    fn test_call_on_literal_receiver() {
        let store = store();
        let mut t = Tree::new();
        let string = t.add(NodeKind::Str, vec![Leaf::Str("x".into()).into()]);
        let upcase = t.send(Some(string), "upcase", vec![]);
        let size = t.send(Some(upcase), "size", vec![]);
        let tree = t.finish(size);

        let inspector = NodeInspector::new(&store, node(&tree, size));
        assert_eq!(inspector.return_types(), set(&["Integer"]));
        assert_eq!(inspector.method_receiver_types(), set(&["String"]));
        let methods: Vec<_> = inspector
            .method_definitions()
            .iter()
            .map(|d| d.qualified_name().into_owned())
            .collect();
        assert_eq!(methods, vec!["String#size"]);
    }

    #[test]
    fn test_implicit_self_is_the_enclosing_namespace() {
        let store = store();
        let mut t = Tree::new();
        let call = t.send(None, "count", vec![]);
        let def = t.def("run", &[], Some(call));
        let foo = t.class("Foo", Some(def));
        let root = t.module("A", Some(foo));
        let tree = t.finish(root);

        let inspector = NodeInspector::new(&store, node(&tree, call));
        assert_eq!(inspector.method_receiver_types(), set(&["A::Foo"]));
        assert_eq!(inspector.return_types(), set(&["Integer", "NilClass"]));
    }

    #[test]
    fn test_new_on_a_class_returns_an_instance() {
        let store = store();
        let mut t = Tree::new();
        let foo = t.constant("Foo");
        let new = t.send(Some(foo), "new", vec![]);
        let root = t.module("A", Some(new));
        let tree = t.finish(root);

        let inspector = NodeInspector::new(&store, node(&tree, new));
        assert_eq!(inspector.method_receiver_types(), set(&["singleton<A::Foo>"]));
        assert_eq!(inspector.return_types(), set(&["A::Foo"]));
    }

    #[test]
    fn test_untyped_returns_are_dropped() {
        let store = store();
        let mut t = Tree::new();
        let array = t.add(NodeKind::Array, vec![]);
        let first = t.send(Some(array), "first", vec![]);
        let tree = t.finish(first);

        let inspector = NodeInspector::new(&store, node(&tree, first));
        assert_eq!(inspector.return_types(), set(&["Array"]));
    }

    #[test]
    fn test_parameter_types_feed_receiver_union() {
        let store = store();
        let mut t = Tree::new();
        let text = t.add(NodeKind::Lvar, vec![Leaf::symbol("text").into()]);
        let size = t.send(Some(text), "size", vec![]);
        let def = t.def("measure", &["text"], Some(size));
        let foo = t.class("Foo", Some(def));
        let root = t.module("A", Some(foo));
        let tree = t.finish(root);

        let lvar = NodeInspector::new(&store, node(&tree, text));
        assert_eq!(lvar.return_types(), set(&["String", "Integer"]));

        let call = NodeInspector::new(&store, node(&tree, size));
        assert_eq!(call.return_types(), set(&["Integer"]));
        assert_eq!(call.method_definitions().len(), 2);
    }

    #[test]
    fn test_local_assignment_feeds_later_reads() {
        let store = store();
        let mut t = Tree::new();
        // Lines count down, so the read is built first to land below the assignment.
        let read = t.add(NodeKind::Lvar, vec![Leaf::symbol("name").into()]);
        let string = t.add(NodeKind::Str, vec![Leaf::Str("x".into()).into()]);
        let assign = t.add(
            NodeKind::Lvasgn,
            vec![Leaf::symbol("name").into(), string.into()],
        );
        let root = t.add(NodeKind::Begin, vec![assign.into(), read.into()]);
        let tree = t.finish(root);

        let inspector = NodeInspector::new(&store, node(&tree, read));
        assert_eq!(inspector.return_types(), set(&["String"]));
    }

    #[test]
    fn test_unknown_method_yields_nothing() {
        let store = store();
        let mut t = Tree::new();
        let string = t.add(NodeKind::Str, vec![Leaf::Str("x".into()).into()]);
        let call = t.send(Some(string), "frobnicate", vec![]);
        let tree = t.finish(call);

        let inspector = NodeInspector::new(&store, node(&tree, call));
        assert!(inspector.return_types().is_empty());
        assert!(inspector.method_definitions().is_empty());
    }

    #[test]
    fn test_self_in_singleton_method() {
        let store = store();
        let mut t = Tree::new();
        let self_ref = t.add(NodeKind::SelfRef, vec![]);
        let definee = t.add(NodeKind::SelfRef, vec![]);
        let args = t.add(NodeKind::Args, vec![]);
        let defs = t.add(
            NodeKind::Defs,
            vec![
                definee.into(),
                Leaf::symbol("build").into(),
                args.into(),
                self_ref.into(),
            ],
        );
        let root = t.class("Foo", Some(defs));
        let tree = t.finish(root);

        let inspector = NodeInspector::new(&store, node(&tree, self_ref));
        assert_eq!(inspector.return_types(), set(&["singleton<Foo>"]));
    }
}
