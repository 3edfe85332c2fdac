//! Path encoder: from a node to its relative address.

use crate::platform::DocumentTree;
use crate::types::{Address, NodeName, Segment};

/// Compute the address of `node`.
///
/// Walks up from `node` until it reaches either the body (empty remainder)
/// or an element with an id (an [`Segment::Anchor`]), so the result is the
/// shortest address from the nearest anchored ancestor-or-self. Each
/// intermediate step records the node's position among same-named siblings.
///
/// A detached node (no parent and not the body) gets a single segment with
/// index 0; such an address will not resolve.
pub fn address_of<T: DocumentTree + ?Sized>(tree: &T, node: &T::Node) -> Address {
    let mut segments = Vec::new();
    let mut current = node.clone();

    loop {
        let name = tree.node_name(&current);
        if name.is_body() {
            break;
        }
        if let Some(id) = tree.element_id(&current) {
            segments.push(Segment::Anchor(id));
            break;
        }
        let Some(parent) = tree.parent(&current) else {
            segments.push(Segment::Named { name, index: 0 });
            break;
        };
        let index = sibling_index(tree, &parent, &current, &name);
        segments.push(Segment::Named { name, index });
        current = parent;
    }

    segments.reverse();
    Address::from(segments)
}

/// Position of `node` among the children of `parent` that share its name.
pub fn sibling_index<T: DocumentTree + ?Sized>(
    tree: &T,
    parent: &T::Node,
    node: &T::Node,
    name: &NodeName,
) -> usize {
    let mut index = 0;
    for child in tree.children(parent) {
        if child == *node {
            break;
        }
        if tree.node_name(&child) == *name {
            index += 1;
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTree;

    #[test]
    fn test_body_is_empty_address() {
        let tree = MemoryTree::new();
        assert!(address_of(&tree, &tree.body_node()).is_empty());
    }

    #[test]
    fn test_first_sibling_index_omitted() {
        let mut tree = MemoryTree::new();
        let body = tree.body_node();
        let div = tree.append_element(body, "div");
        let p0 = tree.append_element(div, "p");
        tree.append_element(div, "span");
        let p1 = tree.append_element(div, "p");

        assert_eq!(address_of(&tree, &p0).to_string(), "div/p");
        // The span in between does not count towards the p index.
        assert_eq!(address_of(&tree, &p1).to_string(), "div/p.1");
    }

    #[test]
    fn test_text_nodes_share_a_name() {
        let mut tree = MemoryTree::new();
        let body = tree.body_node();
        let p = tree.append_element(body, "p");
        tree.append_text(p, "one ");
        tree.append_element(p, "em");
        tree.append_comment(p, "note");
        let second = tree.append_text(p, " two");

        assert_eq!(address_of(&tree, &second).to_string(), "p/@.1");
    }

    #[test]
    fn test_id_anchors_the_address() {
        let mut tree = MemoryTree::new();
        let body = tree.body_node();
        let outer = tree.append_element(body, "div");
        let article = tree.append_element_with_id(outer, "article", "post-42");
        let section = tree.append_element(article, "section");
        let p = tree.append_element(section, "p");
        let text = tree.append_text(p, "deep");

        let address = address_of(&tree, &text);
        assert!(address.is_anchored());
        assert_eq!(address.to_string(), "#post~42/section/p/@");

        // The anchor is the whole address of the identified element itself.
        let address = address_of(&tree, &article);
        assert_eq!(address.segments(), &[Segment::anchor("post-42")]);
    }

    #[test]
    fn test_nearest_anchor_wins() {
        let mut tree = MemoryTree::new();
        let body = tree.body_node();
        let outer = tree.append_element_with_id(body, "main", "outer");
        let inner = tree.append_element_with_id(outer, "div", "inner");
        let text = tree.append_text(inner, "x");

        assert_eq!(address_of(&tree, &text).to_string(), "#inner/@");
    }

    #[test]
    fn test_detached_node() {
        let mut tree = MemoryTree::new();
        let body = tree.body_node();
        let div = tree.append_element(body, "div");
        tree.append_element(body, "div");
        let second = tree.append_element(body, "div");
        tree.detach(second);

        assert_eq!(address_of(&tree, &second).to_string(), "div");
        assert_eq!(address_of(&tree, &div).to_string(), "div");
    }
}
