use super::{Child, NodeData, NodeId, NodeKind, SyntaxTree};
use rubyscope_api::models::Range;

/// Builds a [`SyntaxTree`] bottom-up: children first, then the node that owns them.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and attaches every node child to it.
    ///
    /// A node can be attached to exactly one parent.
    pub fn node(&mut self, kind: NodeKind, children: Vec<Child>, location: Option<Range>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for child in &children {
            if let Child::Node(child_id) = child {
                let data = &mut self.nodes[child_id.0 as usize];
                debug_assert!(data.parent.is_none(), "node {child_id:?} attached twice");
                data.parent = Some(id);
            }
        }
        self.nodes.push(NodeData {
            kind,
            children,
            location,
            parent: None,
        });
        id
    }

    pub fn location(&self, id: NodeId) -> Option<Range> {
        self.nodes.get(id.0 as usize).and_then(|n| n.location)
    }

    pub fn finish(self, root: NodeId) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }
}
