//! Node resolver: walks an address back down to a concrete node.

use crate::error::{LinkError, Result};
use crate::platform::DocumentTree;
use crate::types::{Address, NodeName, Segment};

/// Resolve `address` starting from `context`.
///
/// The empty address resolves to `context`. An anchor segment restarts the
/// walk from the identified element, wherever it sits in the document; a
/// named segment steps into the `index`-th child of that name, counting
/// siblings exactly the way [`crate::address_of`] does.
pub fn resolve<T: DocumentTree + ?Sized>(
    tree: &T,
    context: &T::Node,
    address: &Address,
) -> Result<T::Node> {
    let mut current = context.clone();

    for segment in address.segments() {
        current = match segment {
            Segment::Anchor(id) => tree
                .element_by_id(id)
                .ok_or_else(|| LinkError::IdNotFound { id: id.clone() })?,
            Segment::Named { name, index } => nth_child_named(tree, &current, name, *index)
                .ok_or_else(|| LinkError::ChildNotFound {
                    name: name.clone(),
                    index: *index,
                })?,
        };

        tracing::trace!(
            target: "sellink::resolve",
            segment = %segment,
            node = ?current,
            "resolved address segment"
        );
    }

    Ok(current)
}

/// Resolve `address` from the document body.
pub fn resolve_from_body<T: DocumentTree + ?Sized>(tree: &T, address: &Address) -> Result<T::Node> {
    let body = tree.body().ok_or(LinkError::NoBody)?;
    resolve(tree, &body, address)
}

fn nth_child_named<T: DocumentTree + ?Sized>(
    tree: &T,
    parent: &T::Node,
    name: &NodeName,
    index: usize,
) -> Option<T::Node> {
    tree.children(parent)
        .into_iter()
        .filter(|child| tree.node_name(child) == *name)
        .nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::address_of;
    use crate::memory::MemoryTree;

    fn sample_tree() -> MemoryTree {
        let mut tree = MemoryTree::new();
        let body = tree.body_node();
        tree.append_text(body, "\n");
        let header = tree.append_element_with_id(body, "header", "top-bar");
        let h1 = tree.append_element(header, "h1");
        tree.append_text(h1, "Title");
        let main = tree.append_element(body, "main");
        for i in 0..3 {
            let p = tree.append_element(main, "p");
            tree.append_text(p, &format!("para {i} "));
            let b = tree.append_element(p, "b");
            tree.append_text(b, "bold");
            tree.append_comment(p, "c");
            tree.append_text(p, " tail");
        }
        let list = tree.append_element(main, "ul");
        for _ in 0..2 {
            let li = tree.append_element(list, "li");
            tree.append_text(li, "item");
        }
        tree.append_element(main, "my-widget");
        let widget = tree.append_element(main, "my-widget");
        tree.append_text(widget, "custom");
        tree
    }

    #[test]
    fn test_round_trip_every_node() {
        let tree = sample_tree();
        let body = tree.body_node();
        for node in tree.descendants(body) {
            if tree.node_name(&node) == NodeName::tag("#comment") {
                continue;
            }
            let address = address_of(&tree, &node);
            assert_eq!(
                resolve(&tree, &body, &address),
                Ok(node),
                "address {address} did not round-trip"
            );
            // And through the wire form.
            let reparsed: Address = address.to_string().parse().unwrap();
            assert_eq!(reparsed, address);
        }
    }

    #[test]
    fn test_empty_address_is_context() {
        let tree = sample_tree();
        let body = tree.body_node();
        assert_eq!(resolve(&tree, &body, &Address::body()), Ok(body));
        assert_eq!(resolve_from_body(&tree, &Address::body()), Ok(body));
    }

    #[test]
    fn test_anchor_ignores_context() {
        let tree = sample_tree();
        let head = tree.children(&tree.root())[0];
        let address: Address = "#top~bar/h1/@".parse().unwrap();
        let text = resolve(&tree, &head, &address).unwrap();
        assert_eq!(tree.text(text), Some("Title"));
    }

    #[test]
    fn test_missing_id() {
        let tree = sample_tree();
        let address: Address = "#missing~id/p".parse().unwrap();
        assert_eq!(
            resolve_from_body(&tree, &address),
            Err(LinkError::IdNotFound {
                id: "missing-id".into()
            })
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let tree = sample_tree();
        let address: Address = "main/p.3".parse().unwrap();
        let err = resolve_from_body(&tree, &address).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err,
            LinkError::ChildNotFound {
                name: NodeName::tag("p"),
                index: 3
            }
        );
    }

    #[test]
    fn test_stale_after_mutation() {
        let mut tree = sample_tree();
        let body = tree.body_node();
        let main = tree.children(&body)[2];
        let list = tree.children(&main)[3];
        let second = tree.children(&list)[1];
        let address = address_of(&tree, &second);
        assert_eq!(address.to_string(), "main/ul/li.1");

        tree.detach(second);
        assert!(resolve_from_body(&tree, &address).unwrap_err().is_not_found());
    }
}
