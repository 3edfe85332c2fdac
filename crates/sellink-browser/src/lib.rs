//! Browser DOM layer for selection links.
//!
//! This crate binds the core link codec to the live DOM and wires it to
//! page events. It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `tree`: `DocumentTree` / `FragmentStore` over web-sys
//! - `selection`: Selection API reads and writes, scroll target
//! - `linker`: the page adapter (debounced publish, restore on load/hashchange)
//!
//! # Re-exports
//!
//! This crate re-exports `sellink-core` for convenience, so consumers
//! only need to depend on `sellink-browser`.

// Re-export core crate
pub use sellink_core;
pub use sellink_core::*;

pub mod linker;
pub mod selection;
pub mod tree;

pub use linker::SelectionLinker;
pub use selection::{current_range, dom_range_from, range_scroll_target, select_range};
pub use tree::{BrowserLocation, BrowserTree};
