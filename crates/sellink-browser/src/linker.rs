//! Page adapter that keeps the URL fragment and the selection in sync.
//!
//! # How it works
//!
//! 1. `selectionchange` events restart a debounce timer; when it fires the
//!    current selection is encoded and written to `location.hash`.
//! 2. When the document is ready (and on `hashchange`), a `#sel:` fragment is
//!    decoded, the selection is recreated and the page scrolls to it.
//! 3. Links that no longer match the page are logged at `warn` and ignored.
//!
//! All state lives in the [`SelectionLinker`]; dropping it removes the
//! listeners and cancels pending timers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use sellink_core::{FragmentStore, LinkConfig, PlatformError, decode_selection, publish_selection};

use crate::selection::{current_range, range_scroll_target, select_range};
use crate::tree::{BrowserLocation, BrowserTree};

/// One per page: create on load, drop (or [`SelectionLinker::dispose`]) on navigation.
pub struct SelectionLinker {
    state: Rc<LinkerState>,
    _listeners: Vec<EventListener>,
}

struct LinkerState {
    config: LinkConfig,
    window: web_sys::Window,
    tree: BrowserTree,
    location: BrowserLocation,
    pending_publish: RefCell<Option<Timeout>>,
    /// Bumped on every restore; a delayed scroll from an older restore bails.
    scroll_generation: Cell<u64>,
    /// Fragment this linker wrote and whose `hashchange` hasn't arrived yet.
    own_write: RefCell<Option<String>>,
}

impl SelectionLinker {
    /// Attach to `window.document` and start listening.
    ///
    /// If the document has already finished loading the current fragment
    /// is restored right away, otherwise on `DOMContentLoaded`.
    pub fn install(config: LinkConfig) -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let state = Rc::new(LinkerState {
            tree: BrowserTree::new(document.clone()),
            location: BrowserLocation::new(window.location()),
            window: window.clone(),
            config,
            pending_publish: RefCell::new(None),
            scroll_generation: Cell::new(0),
            own_write: RefCell::new(None),
        });

        let mut listeners = Vec::new();

        let weak = Rc::downgrade(&state);
        listeners.push(EventListener::new(&document, "selectionchange", move |_| {
            if let Some(state) = weak.upgrade() {
                state.schedule_publish();
            }
        }));

        if state.config.restore_on_hash_change {
            let weak = Rc::downgrade(&state);
            listeners.push(EventListener::new(&window, "hashchange", move |_| {
                if let Some(state) = weak.upgrade() {
                    state.on_hash_change();
                }
            }));
        }

        if document.ready_state() == "loading" {
            let weak = Rc::downgrade(&state);
            listeners.push(EventListener::once(&window, "DOMContentLoaded", move |_| {
                if let Some(state) = weak.upgrade() {
                    state.restore_logged();
                }
            }));
        } else {
            state.restore_logged();
        }

        tracing::debug!(
            target: "sellink::linker",
            prefix = %state.config.hash_prefix,
            debounce_ms = state.config.selection_debounce_ms,
            "selection linker installed"
        );

        Ok(Self {
            state,
            _listeners: listeners,
        })
    }

    pub fn config(&self) -> &LinkConfig {
        &self.state.config
    }

    /// Recreate the selection named by the current fragment.
    ///
    /// Returns `Ok(true)` if a selection was restored. Fragments that are
    /// not selection links, or that no longer match the page, yield
    /// `Ok(false)`; the latter are logged.
    pub fn restore_from_hash(&self) -> Result<bool, PlatformError> {
        self.state.restore_from_hash()
    }

    /// Encode the current selection into the fragment now, skipping the debounce.
    pub fn publish_current_selection(&self) -> Result<Option<String>, PlatformError> {
        self.state.publish_current_selection()
    }

    /// Stop listening and cancel pending work.
    pub fn dispose(self) {
        self.state.cancel_pending();
        tracing::debug!(target: "sellink::linker", "selection linker disposed");
    }
}

impl LinkerState {
    fn schedule_publish(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let timeout = Timeout::new(self.config.selection_debounce_ms, move || {
            if let Some(state) = weak.upgrade() {
                if let Err(err) = state.publish_current_selection() {
                    tracing::warn!(target: "sellink::linker", error = %err, "failed to publish selection link");
                }
            }
        });
        // Dropping the previous timeout cancels it.
        self.pending_publish.replace(Some(timeout));
    }

    fn publish_current_selection(&self) -> Result<Option<String>, PlatformError> {
        let Some(range) = current_range(&self.window)? else {
            return Ok(None);
        };
        let before = self.location.fragment();
        let published = publish_selection(&self.tree, &self.location, &range, &self.config)?;
        if let Some(fragment) = published.as_ref().filter(|f| **f != before) {
            self.own_write.replace(Some(fragment.clone()));
        }
        Ok(published)
    }

    fn on_hash_change(self: &Rc<Self>) {
        let fragment = self.location.fragment();
        // Our own publish fires `hashchange`; the selection is already there.
        if self.own_write.take().as_deref() == Some(fragment.as_str()) {
            tracing::trace!(target: "sellink::linker", %fragment, "skipping own fragment");
            return;
        }
        self.restore_logged();
    }

    fn restore_logged(self: &Rc<Self>) {
        if let Err(err) = self.restore_from_hash() {
            tracing::warn!(target: "sellink::linker", error = %err, "failed to recreate selection");
        }
    }

    fn restore_from_hash(self: &Rc<Self>) -> Result<bool, PlatformError> {
        let fragment = self.location.fragment();
        if !fragment.starts_with(&self.config.hash_prefix) {
            return Ok(false);
        }
        let range = match decode_selection(&self.tree, &fragment, &self.config.hash_prefix) {
            Ok(range) => range,
            Err(err) => {
                tracing::warn!(
                    target: "sellink::linker",
                    error = %err,
                    kind = ?err.kind(),
                    %fragment,
                    "failed to recreate selection"
                );
                return Ok(false);
            }
        };
        tracing::debug!(
            target: "sellink::linker",
            start_offset = range.start_offset,
            end_offset = range.end_offset,
            "restoring selection from link"
        );

        let dom_range = select_range(&self.window, self.tree.document(), &range)?;
        self.schedule_scroll(dom_range);
        Ok(true)
    }

    /// Scroll to `range` on the next tick, then once more after `scroll_again_ms`.
    fn schedule_scroll(self: &Rc<Self>, range: web_sys::Range) {
        let generation = self.scroll_generation.get() + 1;
        self.scroll_generation.set(generation);

        let weak = Rc::downgrade(self);
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(0).await;
            let (x, y, again_ms) = {
                let Some(state) = weak.upgrade() else { return };
                if state.scroll_generation.get() != generation {
                    return;
                }
                let (x, y) = range_scroll_target(&state.window, &range, &state.config);
                tracing::trace!(target: "sellink::linker", x, y, "scrolling to selection");
                state.window.scroll_to_with_x_and_y(x, y);
                (x, y, state.config.scroll_again_ms)
            };

            TimeoutFuture::new(again_ms).await;
            let Some(state) = weak.upgrade() else { return };
            if state.scroll_generation.get() == generation {
                state.window.scroll_to_with_x_and_y(x, y);
            }
        });
    }

    fn cancel_pending(&self) {
        self.pending_publish.replace(None);
        self.scroll_generation.set(self.scroll_generation.get() + 1);
    }
}
