//! Ruby-level accessors over raw nodes: names, namespaces, lexical nesting.

use super::{Child, Node, NodeKind};
use rubyscope_api::models::{
    SCOPE_SEPARATOR, TOP_LEVEL_NAMESPACE, UnqualifiedName, join_constant, method_qualified_name,
};

impl<'t> Node<'t> {
    /// The name carried by the node, if its kind has one.
    ///
    /// For a block this is the name of the call the block is attached to.
    pub fn name(&self) -> Option<&'t str> {
        match self.kind() {
            NodeKind::Const
            | NodeKind::Casgn
            | NodeKind::Send
            | NodeKind::Csend
            | NodeKind::Defs => self.symbol(1),
            NodeKind::Def
            | NodeKind::Lvar
            | NodeKind::Lvasgn
            | NodeKind::Ivar
            | NodeKind::Ivasgn
            | NodeKind::Cvar
            | NodeKind::Cvasgn
            | NodeKind::Gvar
            | NodeKind::Gvasgn
            | NodeKind::Sym
            | NodeKind::Arg
            | NodeKind::Optarg
            | NodeKind::Restarg
            | NodeKind::Kwarg
            | NodeKind::Kwoptarg
            | NodeKind::Kwrestarg
            | NodeKind::Blockarg => self.symbol(0),
            NodeKind::Block => self.child_node(0).and_then(|call| call.name()),
            _ => None,
        }
    }

    /// Method name of a call or method definition.
    pub fn method_name(&self) -> Option<&'t str> {
        match self.kind() {
            NodeKind::Def | NodeKind::Defs | NodeKind::Send | NodeKind::Csend => self.name(),
            _ => None,
        }
    }

    /// Literal text of a `str` or `sym` node.
    pub fn string_value(&self) -> Option<&'t str> {
        match self.kind() {
            NodeKind::Str | NodeKind::Sym => self.leaf(0).and_then(|leaf| leaf.as_str()),
            _ => None,
        }
    }

    /// The constant path written after `class`/`module`.
    pub fn constant_path(&self) -> Option<Node<'t>> {
        match self.kind() {
            NodeKind::Class | NodeKind::Module => self.child_node(0),
            _ => None,
        }
    }

    /// A constant path as written, e.g. `Foo::Bar` for `Foo::Bar` or `::Foo::Bar`.
    pub fn chained_name(&self) -> Option<String> {
        match self.kind() {
            NodeKind::Const | NodeKind::Casgn => {
                let name = self.symbol(1)?;
                match self.child_node(0) {
                    Some(scope) if scope.is(NodeKind::Const) => scope
                        .chained_name()
                        .map(|prefix| format!("{prefix}{SCOPE_SEPARATOR}{name}")),
                    _ => Some(name.to_string()),
                }
            }
            NodeKind::Class | NodeKind::Module => self.constant_path()?.chained_name(),
            _ => None,
        }
    }

    /// True if the constant path starts at the top level (`::Foo::Bar`).
    pub fn is_rooted_constant(&self) -> bool {
        match self.kind() {
            NodeKind::Const | NodeKind::Casgn => match self.child_node(0) {
                Some(scope) if scope.is(NodeKind::Cbase) => true,
                Some(scope) if scope.is(NodeKind::Const) => scope.is_rooted_constant(),
                _ => false,
            },
            NodeKind::Class | NodeKind::Module => self
                .constant_path()
                .is_some_and(|path| path.is_rooted_constant()),
            _ => false,
        }
    }

    /// True if `child` sits in the header of this class/module (its name or
    /// superclass), which is evaluated outside the namespace being opened.
    fn is_header_child(&self, child: Node<'t>) -> bool {
        let slot = |index: usize| self.child(index) == Some(&Child::Node(child.id()));
        match self.kind() {
            NodeKind::Class => slot(0) || slot(1),
            NodeKind::Module => slot(0),
            _ => false,
        }
    }

    /// Enclosing class/module nodes, innermost first.
    fn enclosing_namespaces(&self) -> impl Iterator<Item = Node<'t>> {
        let mut previous = *self;
        self.each_ancestor(&[]).filter_map(move |ancestor| {
            let opens_scope = ancestor.kind().is_namespace() && !ancestor.is_header_child(previous);
            previous = ancestor;
            opens_scope.then_some(ancestor)
        })
    }

    /// Qualified names of the lexically enclosing namespaces, innermost first.
    pub fn module_nesting(&self) -> Vec<String> {
        self.enclosing_namespaces()
            .filter_map(|scope| scope.qualified_name())
            .collect()
    }

    /// Prefix used to qualify names declared at this point ("" at the top level).
    fn lexical_prefix(&self) -> String {
        self.enclosing_namespaces()
            .find_map(|scope| scope.qualified_name())
            .unwrap_or_default()
    }

    /// Qualified name of the innermost enclosing class/module, `Object` at the top level.
    pub fn namespace(&self) -> String {
        let prefix = self.lexical_prefix();
        if prefix.is_empty() {
            TOP_LEVEL_NAMESPACE.to_string()
        } else {
            prefix
        }
    }

    /// Qualified name of a class, module, constant assignment or method definition.
    pub fn qualified_name(&self) -> Option<String> {
        match self.kind() {
            NodeKind::Class | NodeKind::Module | NodeKind::Casgn => {
                let chained = self.chained_name()?;
                if self.is_rooted_constant() {
                    Some(chained)
                } else {
                    Some(join_constant(&self.lexical_prefix(), &chained))
                }
            }
            NodeKind::Def | NodeKind::Defs => Some(method_qualified_name(
                &self.method_namespace(),
                self.name()?,
                self.is_singleton_method(),
            )),
            _ => None,
        }
    }

    /// Owner of a method definition: the lexical namespace, or the constant in
    /// `def Foo.bar` qualified by the enclosing class/module.
    pub fn method_namespace(&self) -> String {
        if self.is(NodeKind::Defs) {
            if let Some(definee) = self.child_node(0).filter(|d| d.is(NodeKind::Const)) {
                if let Some(chained) = definee.chained_name() {
                    if definee.is_rooted_constant() {
                        return chained;
                    }
                    return join_constant(&self.lexical_prefix(), &chained);
                }
            }
        }
        self.namespace()
    }

    /// The reference as written, with the nesting it must be resolved in.
    pub fn unqualified_name(&self) -> Option<UnqualifiedName> {
        if !self.is(NodeKind::Const) {
            return None;
        }
        let nesting = if self.is_rooted_constant() {
            Vec::new()
        } else {
            self.module_nesting()
        };
        Some(UnqualifiedName::new(self.chained_name()?, nesting))
    }

    pub fn super_class(&self) -> Option<Node<'t>> {
        match self.kind() {
            NodeKind::Class => self.child_node(1),
            _ => None,
        }
    }

    /// Explicit receiver of a call.
    pub fn receiver(&self) -> Option<Node<'t>> {
        match self.kind() {
            NodeKind::Send | NodeKind::Csend => self.child_node(0),
            NodeKind::Block => self.child_node(0).and_then(|call| call.receiver()),
            _ => None,
        }
    }

    /// Arguments of a call.
    pub fn arguments(&self) -> Vec<Node<'t>> {
        match self.kind() {
            NodeKind::Send | NodeKind::Csend => self
                .children()
                .iter()
                .skip(2)
                .filter_map(Child::as_node)
                .filter_map(|id| self.tree().get(id))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// True for `def self.foo` and for `def foo` inside `class << self`.
    pub fn is_singleton_method(&self) -> bool {
        match self.kind() {
            NodeKind::Defs => true,
            NodeKind::Def => self
                .each_ancestor(&[
                    NodeKind::Def,
                    NodeKind::Defs,
                    NodeKind::SingletonClass,
                    NodeKind::Class,
                    NodeKind::Module,
                ])
                .next()
                .is_some_and(|scope| scope.is(NodeKind::SingletonClass)),
            _ => false,
        }
    }

    /// The nearest `def`/`defs` around this node.
    pub fn enclosing_method(&self) -> Option<Node<'t>> {
        self.each_ancestor(&[NodeKind::Def, NodeKind::Defs]).next()
    }

    /// True if this node is evaluated with a singleton class as `self`.
    pub fn in_singleton_context(&self) -> bool {
        self.each_ancestor(&[
            NodeKind::Def,
            NodeKind::Defs,
            NodeKind::SingletonClass,
            NodeKind::Class,
            NodeKind::Module,
        ])
        .next()
        .is_some_and(|scope| match scope.kind() {
            NodeKind::Def | NodeKind::Defs => scope.is_singleton_method(),
            _ => true,
        })
    }

    pub fn body(&self) -> Option<Node<'t>> {
        match self.kind() {
            NodeKind::Class | NodeKind::Def | NodeKind::Block => self.child_node(2),
            NodeKind::Defs => self.child_node(3),
            NodeKind::Module | NodeKind::SingletonClass => self.child_node(1),
            _ => None,
        }
    }

    /// Statements of a body, flattening a `begin` wrapper.
    pub fn body_statements(&self) -> Vec<Node<'t>> {
        match self.body() {
            Some(body) if body.is(NodeKind::Begin) => body.child_nodes().collect(),
            Some(body) => vec![body],
            None => Vec::new(),
        }
    }

    /// Parameter nodes of a method definition or block.
    pub fn parameters(&self) -> Vec<Node<'t>> {
        let args = match self.kind() {
            NodeKind::Def | NodeKind::Block => self.child_node(1),
            NodeKind::Defs => self.child_node(2),
            _ => None,
        };
        args.map(|args| {
            args.child_nodes()
                .filter(|param| param.kind().is_parameter())
                .collect()
        })
        .unwrap_or_default()
    }
}
