//! sellink-core: shareable links to a text selection, without framework dependencies.
//!
//! This crate provides:
//! - `DocumentTree` / `FragmentStore` traits for the page abstraction
//! - `address_of` / `resolve` - the path encoder and node resolver
//! - `SelectionToken` - the wire format carried in the URL fragment
//! - `encode_selection` / `publish_selection` / `decode_selection` - the codec
//! - `MemoryTree` - an in-memory document, for native use and tests

pub mod codec;
pub mod config;
pub mod encode;
pub mod error;
pub mod memory;
pub mod platform;
pub mod resolve;
pub mod token;
pub mod types;
pub mod viewport;

pub use codec::{decode_selection, encode_selection, publish_selection, resolve_token};
pub use config::{DEFAULT_HASH_PREFIX, LinkConfig};
pub use encode::{address_of, sibling_index};
pub use error::{ErrorKind, LinkError, Result};
pub use memory::{MemoryLocation, MemoryTree, NodeId};
pub use platform::{DocumentTree, FragmentStore, PlatformError};
pub use resolve::{resolve, resolve_from_body};
pub use smol_str::SmolStr;
pub use token::{SelectionToken, decode_payload};
pub use types::{Address, DomRange, EndContainer, Endpoint, NodeName, Segment};
pub use viewport::scroll_target;
