//! Link configuration.

use serde::{Deserialize, Serialize};

/// Marker put in front of the base64 token in the fragment.
pub const DEFAULT_HASH_PREFIX: &str = "sel:";

/// Tunables for encoding links and for the page adapter that restores them.
///
/// Every field has a default, so a partial JSON/JS object is enough to
/// override a single value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkConfig {
    /// Fragment prefix identifying a selection link.
    pub hash_prefix: String,
    /// Quiet period after the last `selectionchange` before the link is written.
    pub selection_debounce_ms: u32,
    /// Horizontal gap left of the restored selection when scrolling to it.
    pub scroll_padding_x: f64,
    /// Vertical gap above the restored selection when scrolling to it.
    pub scroll_padding_y: f64,
    /// Delay before scrolling a second time, for pages that shift after load.
    pub scroll_again_ms: u32,
    /// Also restore on `hashchange`, not only when the page loads.
    pub restore_on_hash_change: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            hash_prefix: DEFAULT_HASH_PREFIX.to_string(),
            selection_debounce_ms: 500,
            scroll_padding_x: 50.0,
            scroll_padding_y: 100.0,
            scroll_again_ms: 500,
            restore_on_hash_change: true,
        }
    }
}

impl LinkConfig {
    pub fn with_hash_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.hash_prefix = prefix.into();
        self
    }
}
