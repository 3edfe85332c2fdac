//! web-sys implementations of the core platform traits.

use sellink_core::{DocumentTree, FragmentStore, NodeName, PlatformError};
use smol_str::SmolStr;
use wasm_bindgen::JsCast;

/// The live DOM of a document, as seen by the link codec.
#[derive(Clone, Debug)]
pub struct BrowserTree {
    document: web_sys::Document,
}

impl BrowserTree {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Tree over `window.document`.
    pub fn current() -> Result<Self, PlatformError> {
        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl DocumentTree for BrowserTree {
    type Node = web_sys::Node;

    fn body(&self) -> Option<web_sys::Node> {
        self.document.body().map(web_sys::Node::from)
    }

    fn parent(&self, node: &web_sys::Node) -> Option<web_sys::Node> {
        node.parent_node()
    }

    fn children(&self, node: &web_sys::Node) -> Vec<web_sys::Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn node_name(&self, node: &web_sys::Node) -> NodeName {
        // Comments and other non-element nodes keep their DOM name (`#comment`).
        if node.node_type() == web_sys::Node::TEXT_NODE {
            NodeName::Text
        } else {
            NodeName::tag(&node.node_name())
        }
    }

    fn element_id(&self, node: &web_sys::Node) -> Option<SmolStr> {
        let id = node.dyn_ref::<web_sys::Element>()?.id();
        (!id.is_empty()).then(|| SmolStr::from(id))
    }

    fn element_by_id(&self, id: &str) -> Option<web_sys::Node> {
        self.document
            .get_element_by_id(id)
            .map(web_sys::Node::from)
    }
}

/// `window.location.hash`.
#[derive(Clone, Debug)]
pub struct BrowserLocation {
    location: web_sys::Location,
}

impl BrowserLocation {
    pub fn new(location: web_sys::Location) -> Self {
        Self { location }
    }

    pub fn current() -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or("no window")?;
        Ok(Self::new(window.location()))
    }
}

impl FragmentStore for BrowserLocation {
    fn fragment(&self) -> String {
        let hash = self.location.hash().unwrap_or_default();
        match hash.strip_prefix('#') {
            Some(fragment) => fragment.to_string(),
            None => hash,
        }
    }

    fn set_fragment(&self, fragment: &str) -> Result<(), PlatformError> {
        self.location
            .set_hash(fragment)
            .map_err(|e| format!("set_hash failed: {:?}", e).into())
    }
}
