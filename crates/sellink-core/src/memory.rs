//! In-memory document tree and fragment store.
//!
//! `MemoryTree` is a small arena DOM (`<html><head/><body/></html>` plus
//! whatever you append), enough to compute and resolve links without a
//! browser: generating links server-side from known structure, and testing.

use std::cell::{Cell, RefCell};

use smol_str::SmolStr;

use crate::platform::{DocumentTree, FragmentStore, PlatformError};
use crate::types::NodeName;

/// Handle to a node in a [`MemoryTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
enum NodeData {
    Element { tag: SmolStr, id: Option<SmolStr> },
    Text(String),
    Comment(String),
}

#[derive(Clone, Debug)]
struct NodeEntry {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document.
#[derive(Clone, Debug)]
pub struct MemoryTree {
    nodes: Vec<NodeEntry>,
    root: NodeId,
    body: NodeId,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    /// Create a document with an empty `<head>` and `<body>`.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
        };
        let root = tree.push_node(None, NodeData::Element {
            tag: "html".into(),
            id: None,
        });
        tree.root = root;
        tree.append_element(root, "head");
        tree.body = tree.append_element(root, "body");
        tree
    }

    /// The `<html>` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<body>` element.
    pub fn body_node(&self) -> NodeId {
        self.body
    }

    fn push_node(&mut self, parent: Option<NodeId>, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry {
            data,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Append an element as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push_node(
            Some(parent),
            NodeData::Element {
                tag: tag.to_ascii_lowercase().into(),
                id: None,
            },
        )
    }

    /// Append an element carrying an `id` attribute.
    pub fn append_element_with_id(&mut self, parent: NodeId, tag: &str, id: &str) -> NodeId {
        let node = self.append_element(parent, tag);
        self.set_id(node, id);
        node
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(Some(parent), NodeData::Text(text.to_string()))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(Some(parent), NodeData::Comment(text.to_string()))
    }

    /// Set (or with an empty string, clear) an element's id. No-op on non-elements.
    pub fn set_id(&mut self, node: NodeId, new_id: &str) {
        if let NodeData::Element { id, .. } = &mut self.nodes[node.0].data {
            *id = (!new_id.is_empty()).then(|| new_id.into());
        }
    }

    /// Detach `node` (and its subtree) from its parent.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != node);
        }
    }

    /// Insert a detached `node` as the first child of `parent`.
    pub fn prepend(&mut self, parent: NodeId, node: NodeId) {
        self.detach(node);
        self.nodes[node.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(0, node);
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Text(text) | NodeData::Comment(text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    /// All nodes under `node` in document order, `node` excluded.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[node.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
        out
    }
}

impl DocumentTree for MemoryTree {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn node_name(&self, node: &NodeId) -> NodeName {
        match &self.nodes[node.0].data {
            NodeData::Element { tag, .. } => NodeName::Tag(tag.clone()),
            NodeData::Text(_) => NodeName::Text,
            NodeData::Comment(_) => NodeName::Tag("#comment".into()),
        }
    }

    fn element_id(&self, node: &NodeId) -> Option<SmolStr> {
        match &self.nodes[node.0].data {
            NodeData::Element { id, .. } => id.clone(),
            _ => None,
        }
    }

    fn element_by_id(&self, wanted: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|node| self.element_id(node).is_some_and(|id| id == wanted))
    }
}

/// Fragment store that remembers how often it was written.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    fragment: RefCell<String>,
    writes: Cell<usize>,
}

impl MemoryLocation {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: RefCell::new(fragment.into()),
            writes: Cell::new(0),
        }
    }

    /// Number of `set_fragment` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl FragmentStore for MemoryLocation {
    fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    fn set_fragment(&self, fragment: &str) -> Result<(), PlatformError> {
        *self.fragment.borrow_mut() = fragment.to_string();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_shape() {
        let tree = MemoryTree::new();
        let children = tree.children(&tree.root());
        assert_eq!(children.len(), 2);
        assert_eq!(tree.node_name(&children[0]), NodeName::tag("head"));
        assert_eq!(children[1], tree.body_node());
        assert!(tree.node_name(&tree.body_node()).is_body());
    }

    #[test]
    fn test_element_by_id_skips_detached() {
        let mut tree = MemoryTree::new();
        let body = tree.body_node();
        let section = tree.append_element_with_id(body, "section", "intro");
        assert_eq!(tree.element_by_id("intro"), Some(section));

        tree.detach(section);
        assert_eq!(tree.element_by_id("intro"), None);
    }

    #[test]
    fn test_empty_id_is_absent() {
        let mut tree = MemoryTree::new();
        let body = tree.body_node();
        let div = tree.append_element_with_id(body, "DIV", "x");
        tree.set_id(div, "");
        assert_eq!(tree.element_id(&div), None);
        assert_eq!(tree.node_name(&div), NodeName::tag("div"));
    }

    #[test]
    fn test_descendants_document_order() {
        let mut tree = MemoryTree::new();
        let body = tree.body_node();
        let p = tree.append_element(body, "p");
        let t1 = tree.append_text(p, "a");
        let b = tree.append_element(p, "b");
        let t2 = tree.append_text(b, "b");
        let t3 = tree.append_text(body, "c");
        assert_eq!(tree.descendants(body), vec![p, t1, b, t2, t3]);
    }

    #[test]
    fn test_location_counts_writes() {
        let location = MemoryLocation::new("top");
        assert_eq!(location.fragment(), "top");
        location.set_fragment("sel:abc").unwrap();
        assert_eq!(location.fragment(), "sel:abc");
        assert_eq!(location.writes(), 1);
    }
}
