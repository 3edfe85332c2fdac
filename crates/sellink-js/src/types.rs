//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use sellink_core::LinkConfig;
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Linker options. Every field is optional; missing ones keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default, rename_all = "camelCase")]
pub struct JsLinkConfig {
    #[tsify(optional)]
    pub hash_prefix: Option<String>,
    #[tsify(optional)]
    pub selection_debounce_ms: Option<u32>,
    #[tsify(optional)]
    pub scroll_padding_x: Option<f64>,
    #[tsify(optional)]
    pub scroll_padding_y: Option<f64>,
    #[tsify(optional)]
    pub scroll_again_ms: Option<u32>,
    #[tsify(optional)]
    pub restore_on_hash_change: Option<bool>,
}

impl From<JsLinkConfig> for LinkConfig {
    fn from(js: JsLinkConfig) -> Self {
        let defaults = LinkConfig::default();
        LinkConfig {
            hash_prefix: js.hash_prefix.unwrap_or(defaults.hash_prefix),
            selection_debounce_ms: js
                .selection_debounce_ms
                .unwrap_or(defaults.selection_debounce_ms),
            scroll_padding_x: js.scroll_padding_x.unwrap_or(defaults.scroll_padding_x),
            scroll_padding_y: js.scroll_padding_y.unwrap_or(defaults.scroll_padding_y),
            scroll_again_ms: js.scroll_again_ms.unwrap_or(defaults.scroll_again_ms),
            restore_on_hash_change: js
                .restore_on_hash_change
                .unwrap_or(defaults.restore_on_hash_change),
        }
    }
}

/// Effective config for an optional JS options object.
pub(crate) fn link_config(js: Option<JsLinkConfig>) -> LinkConfig {
    js.map(LinkConfig::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let js = JsLinkConfig {
            selection_debounce_ms: Some(250),
            ..JsLinkConfig::default()
        };
        let config = LinkConfig::from(js);
        assert_eq!(config.selection_debounce_ms, 250);
        assert_eq!(config.hash_prefix, "sel:");
        assert_eq!(config.scroll_padding_y, 100.0);
    }

    #[test]
    fn test_missing_config_is_default() {
        assert_eq!(link_config(None), LinkConfig::default());
        let config = link_config(Some(JsLinkConfig {
            hash_prefix: Some("quote=".into()),
            ..JsLinkConfig::default()
        }));
        assert_eq!(config.hash_prefix, "quote=");
        assert_eq!(config.selection_debounce_ms, 500);
    }
}
