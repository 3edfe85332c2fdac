//! Platform abstraction traits for selection links.
//!
//! These traits define the interface between the link codec and a concrete
//! page (the browser DOM, an in-memory tree, a server-side HTML parse). The
//! codec only ever reads the tree; writing the selection back is left to the
//! platform.

use smol_str::SmolStr;

use crate::types::NodeName;

/// Error type for platform operations.
#[derive(Debug, Clone)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Read-only parent/child traversal over a document.
///
/// `children` must return nodes in document order, including text and
/// comment nodes, since sibling indices are positional.
pub trait DocumentTree {
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// The `<body>` element, where every relative address starts.
    fn body(&self) -> Option<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Name used for sibling counting. Text nodes are [`NodeName::Text`].
    fn node_name(&self, node: &Self::Node) -> NodeName;

    /// The element's `id` attribute. Empty ids must be reported as `None`.
    fn element_id(&self, node: &Self::Node) -> Option<SmolStr>;

    /// Document-wide id lookup, first match in tree order.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
}

/// The location fragment (the part of the URL after `#`).
pub trait FragmentStore {
    /// Current fragment without the leading `#`.
    fn fragment(&self) -> String;

    /// Replace the fragment. `fragment` has no leading `#`.
    fn set_fragment(&self, fragment: &str) -> Result<(), PlatformError>;
}
