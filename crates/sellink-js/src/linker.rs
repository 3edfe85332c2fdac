//! JsSelectionLinker - the page adapter wrapper for JavaScript.

use sellink_browser::SelectionLinker;
use wasm_bindgen::prelude::*;

use crate::types::{JsLinkConfig, link_config};

/// Keeps `location.hash` in sync with the selection on the current page.
///
/// ```js
/// const linker = new SelectionLinker({ selectionDebounceMs: 300 });
/// // later, on navigation:
/// linker.dispose();
/// ```
#[wasm_bindgen(js_name = SelectionLinker)]
pub struct JsSelectionLinker {
    inner: Option<SelectionLinker>,
}

#[wasm_bindgen(js_class = SelectionLinker)]
impl JsSelectionLinker {
    /// Install the linker on `window.document`.
    ///
    /// Restores the selection from the current fragment once the document
    /// is ready.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsLinkConfig>) -> Result<JsSelectionLinker, JsError> {
        let inner = SelectionLinker::install(link_config(config))
            .map_err(|e| JsError::new(&format!("Failed to install linker: {}", e)))?;
        Ok(Self { inner: Some(inner) })
    }

    /// Recreate the selection from the current fragment.
    ///
    /// Returns false when the fragment is not a selection link or no longer
    /// matches the page.
    #[wasm_bindgen(js_name = restoreFromHash)]
    pub fn restore_from_hash(&self) -> Result<bool, JsError> {
        let Some(inner) = &self.inner else {
            return Ok(false);
        };
        inner
            .restore_from_hash()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Write the current selection to the fragment immediately.
    ///
    /// Returns the fragment (without `#`), or undefined when nothing is selected.
    #[wasm_bindgen(js_name = publishCurrentSelection)]
    pub fn publish_current_selection(&self) -> Result<Option<String>, JsError> {
        let Some(inner) = &self.inner else {
            return Ok(None);
        };
        inner
            .publish_current_selection()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(getter, js_name = isInstalled)]
    pub fn is_installed(&self) -> bool {
        self.inner.is_some()
    }

    /// Remove listeners and cancel pending timers. Safe to call twice.
    pub fn dispose(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.dispose();
        }
    }
}
