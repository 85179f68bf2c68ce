//! Arena-backed syntax tree.
//!
//! A [`SyntaxTree`] owns every node of one parsed document. Nodes refer to
//! each other by [`NodeId`]; the parent link is set exactly once, when the
//! node is attached by [`TreeBuilder`]. A reparse builds a new tree and the
//! old one is dropped wholesale.

mod builder;
mod kind;
mod semantics;
mod traverse;

pub use builder::TreeBuilder;
pub use kind::NodeKind;
pub use traverse::{Ancestors, ChildNodes, Descendants};

use rubyscope_api::models::{Position, Range};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A non-node child value.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Nil,
    Symbol(String),
    Str(String),
    Integer(i64),
    Float(f64),
}

impl Leaf {
    pub fn symbol(name: impl Into<String>) -> Self {
        Leaf::Symbol(name.into())
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Leaf::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Leaf::Str(s) | Leaf::Symbol(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(NodeId),
    Leaf(Leaf),
}

impl Child {
    pub const NIL: Child = Child::Leaf(Leaf::Nil);

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Child::Node(id) => Some(*id),
            Child::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Child::Leaf(leaf) => Some(leaf),
            Child::Node(_) => None,
        }
    }
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Child::Node(id)
    }
}

impl From<Option<NodeId>> for Child {
    fn from(id: Option<NodeId>) -> Self {
        id.map(Child::Node).unwrap_or(Child::NIL)
    }
}

impl From<Leaf> for Child {
    fn from(leaf: Leaf) -> Self {
        Child::Leaf(leaf)
    }
}

#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    pub children: Vec<Child>,
    /// `None` for synthesized nodes.
    pub location: Option<Range>,
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: self.root,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then_some(Node { tree: self, id })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// The innermost node whose range includes `position`.
    ///
    /// Scans the root and all descendants in pre-order and keeps the last match.
    pub fn node_at(&self, position: Position) -> Option<Node<'_>> {
        let root = self.root();
        std::iter::once(root)
            .chain(root.each_descendant(&[]))
            .filter(|node| node.include_position(position))
            .last()
    }
}

/// A cheap handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    fn data(&self) -> &'t NodeData {
        self.tree.data(self.id)
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    pub fn location(&self) -> Option<Range> {
        self.data().location
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|id| Node {
            tree: self.tree,
            id,
        })
    }

    pub fn children(&self) -> &'t [Child] {
        &self.data().children
    }

    pub fn child(&self, index: usize) -> Option<&'t Child> {
        self.children().get(index)
    }

    /// The child at `index` if it is a node.
    pub fn child_node(&self, index: usize) -> Option<Node<'t>> {
        self.child(index)
            .and_then(Child::as_node)
            .map(|id| Node {
                tree: self.tree,
                id,
            })
    }

    /// The child at `index` if it is a leaf value.
    pub fn leaf(&self, index: usize) -> Option<&'t Leaf> {
        self.child(index).and_then(Child::as_leaf)
    }

    pub fn symbol(&self, index: usize) -> Option<&'t str> {
        self.leaf(index).and_then(Leaf::as_symbol)
    }

    /// Direct node children, leaves skipped.
    pub fn child_nodes(&self) -> ChildNodes<'t, 'static> {
        self.each_child_node(&[])
    }

    /// Ancestors from the parent up to the root, optionally filtered by kind.
    pub fn each_ancestor<'k>(&self, kinds: &'k [NodeKind]) -> Ancestors<'t, 'k> {
        Ancestors::new(*self, kinds)
    }

    pub fn each_child_node<'k>(&self, kinds: &'k [NodeKind]) -> ChildNodes<'t, 'k> {
        ChildNodes::new(*self, kinds)
    }

    /// All descendants in pre-order, optionally filtered by kind.
    pub fn each_descendant<'k>(&self, kinds: &'k [NodeKind]) -> Descendants<'t, 'k> {
        Descendants::new(*self, kinds)
    }

    /// A node without a location never includes a position.
    pub fn include_position(&self, position: Position) -> bool {
        self.location()
            .is_some_and(|range| range.includes(position))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("location", &self.location())
            .finish()
    }
}
