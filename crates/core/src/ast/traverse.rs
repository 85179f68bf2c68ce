use super::{Child, Node, NodeId, NodeKind};

fn accepts(kinds: &[NodeKind], node: &Node<'_>) -> bool {
    kinds.is_empty() || kinds.contains(&node.kind())
}

/// Parent, grandparent, ... up to the root.
#[derive(Clone)]
pub struct Ancestors<'t, 'k> {
    next: Option<Node<'t>>,
    kinds: &'k [NodeKind],
}

impl<'t, 'k> Ancestors<'t, 'k> {
    pub(super) fn new(node: Node<'t>, kinds: &'k [NodeKind]) -> Self {
        Self {
            next: node.parent(),
            kinds,
        }
    }
}

impl<'t> Iterator for Ancestors<'t, '_> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.next {
            self.next = node.parent();
            if accepts(self.kinds, &node) {
                return Some(node);
            }
        }
        None
    }
}

#[derive(Clone)]
pub struct ChildNodes<'t, 'k> {
    node: Node<'t>,
    index: usize,
    kinds: &'k [NodeKind],
}

impl<'t, 'k> ChildNodes<'t, 'k> {
    pub(super) fn new(node: Node<'t>, kinds: &'k [NodeKind]) -> Self {
        Self {
            node,
            index: 0,
            kinds,
        }
    }
}

impl<'t> Iterator for ChildNodes<'t, '_> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let children = self.node.children();
        while self.index < children.len() {
            let child = &children[self.index];
            self.index += 1;
            if let Child::Node(id) = child {
                let node = Node {
                    tree: self.node.tree,
                    id: *id,
                };
                if accepts(self.kinds, &node) {
                    return Some(node);
                }
            }
        }
        None
    }
}

/// Pre-order walk below a node (the node itself excluded).
#[derive(Clone)]
pub struct Descendants<'t, 'k> {
    origin: Node<'t>,
    stack: Vec<NodeId>,
    kinds: &'k [NodeKind],
}

impl<'t, 'k> Descendants<'t, 'k> {
    pub(super) fn new(node: Node<'t>, kinds: &'k [NodeKind]) -> Self {
        let mut walk = Self {
            origin: node,
            stack: Vec::new(),
            kinds,
        };
        walk.push_children(node);
        walk
    }

    fn push_children(&mut self, node: Node<'t>) {
        let before = self.stack.len();
        self.stack
            .extend(node.children().iter().filter_map(Child::as_node));
        self.stack[before..].reverse();
    }
}

impl<'t> Iterator for Descendants<'t, '_> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = Node {
                tree: self.origin.tree,
                id,
            };
            self.push_children(node);
            if accepts(self.kinds, &node) {
                return Some(node);
            }
        }
        None
    }
}
