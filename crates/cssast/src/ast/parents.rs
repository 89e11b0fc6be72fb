//! Parent links for a finished tree.
//!
//! Nodes never point back at their parents. Instead, one walk over the
//! completed [`Stylesheet`] numbers every node in pre-order and records, per
//! number, the enclosing node and the child-index path that reaches it.

use super::{Node, NodeKind, Stylesheet};

/// Pre-order number of a node within one [`Stylesheet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The stylesheet itself.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Borrowed view of either the root or a node below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeRef<'a> {
    Stylesheet(&'a Stylesheet),
    Node(&'a Node),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Stylesheet(_) => NodeKind::Stylesheet,
            NodeRef::Node(node) => node.kind(),
        }
    }

    pub fn as_node(&self) -> Option<&'a Node> {
        match self {
            NodeRef::Stylesheet(_) => None,
            NodeRef::Node(node) => Some(node),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Link {
    parent: Option<NodeId>,
    kind: NodeKind,
    path: Box<[u32]>,
}

/// Lookup table from a node to its nearest enclosing node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParentLinks {
    links: Vec<Link>,
}

impl ParentLinks {
    /// The enclosing node of `id`, `None` for the root or an unknown id.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.links.get(id.index())?.parent
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.links.get(id.index()).map(|link| link.kind)
    }

    /// Number of linked nodes, the root included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// `(node, parent)` pairs in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Option<NodeId>)> + '_ {
        self.links
            .iter()
            .enumerate()
            .map(|(index, link)| (NodeId(index as u32), link.parent))
    }

    pub(crate) fn path(&self, id: NodeId) -> Option<&[u32]> {
        self.links.get(id.index()).map(|link| &*link.path)
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind, path: &[u32]) -> NodeId {
        let id = NodeId(self.links.len() as u32);
        self.links.push(Link {
            parent,
            kind,
            path: path.into(),
        });
        id
    }

    fn link_children(&mut self, nodes: &[Node], parent: NodeId, path: &mut Vec<u32>) {
        for (index, node) in nodes.iter().enumerate() {
            path.push(index as u32);
            let id = self.push(Some(parent), node.kind(), path);
            self.link_children(node.children(), id, path);
            path.pop();
        }
    }
}

/// Walks a finished stylesheet and links every node to its nearest ancestor.
///
/// Top-level nodes link to the root; children of a rule or at-rule link to
/// that rule.
pub fn annotate(stylesheet: &Stylesheet) -> ParentLinks {
    let mut links = ParentLinks::default();
    let root = links.push(None, NodeKind::Stylesheet, &[]);
    links.link_children(&stylesheet.rules, root, &mut Vec::new());
    log::trace!("linked {} nodes", links.len());
    links
}
