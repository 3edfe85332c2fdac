//! WASM bindings for shareable selection links.
//!
//! Lets a page opt into selection links from JavaScript:
//!
//! ```js
//! import init, { SelectionLinker } from "sellink-js";
//! await init();
//! new SelectionLinker();
//! ```

mod linker;
mod types;

pub use linker::*;
pub use types::*;

use sellink_core::{DEFAULT_HASH_PREFIX, decode_payload};
use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}

/// Decode a selection-link fragment to its payload text, for inspecting links.
///
/// `prefix` defaults to `"sel:"`.
#[wasm_bindgen(js_name = decodeFragment)]
pub fn decode_fragment(fragment: &str, prefix: Option<String>) -> Result<String, JsError> {
    let prefix = prefix.as_deref().unwrap_or(DEFAULT_HASH_PREFIX);
    decode_payload(fragment, prefix).map_err(|e| JsError::new(&e.to_string()))
}
