//! Selection codec: ranges to link fragments and back.

use crate::config::LinkConfig;
use crate::encode::address_of;
use crate::error::Result;
use crate::platform::{DocumentTree, FragmentStore, PlatformError};
use crate::resolve::resolve_from_body;
use crate::token::SelectionToken;
use crate::types::{DomRange, EndContainer, Endpoint};

/// Encode a range as a [`SelectionToken`].
///
/// Returns `None` for a collapsed range: there is nothing to link to. When
/// both endpoints share a container the end is written as
/// [`EndContainer::Same`] instead of repeating the address.
pub fn encode_selection<T: DocumentTree + ?Sized>(
    tree: &T,
    range: &DomRange<T::Node>,
) -> Option<SelectionToken> {
    if range.is_collapsed() {
        return None;
    }

    let start = address_of(tree, &range.start_container);
    let end = if range.same_container() {
        EndContainer::Same
    } else {
        EndContainer::At(address_of(tree, &range.end_container))
    };

    Some(SelectionToken::new(
        Endpoint::new(start, range.start_offset),
        Endpoint::new(end, range.end_offset),
    ))
}

/// Encode a range and write it to the location fragment.
///
/// The fragment is only written when it differs from the current one, so
/// re-publishing an unchanged selection causes no history or address-bar
/// churn. Returns the fragment now in place, or `None` for a collapsed range
/// or one whose addresses can't be written (see [`crate::LinkError::Unencodable`]).
pub fn publish_selection<T, S>(
    tree: &T,
    store: &S,
    range: &DomRange<T::Node>,
    config: &LinkConfig,
) -> Result<Option<String>, PlatformError>
where
    T: DocumentTree + ?Sized,
    S: FragmentStore + ?Sized,
{
    let Some(token) = encode_selection(tree, range) else {
        return Ok(None);
    };

    let fragment = match token.to_fragment(&config.hash_prefix) {
        Ok(fragment) => fragment,
        Err(err) => {
            tracing::warn!(%token, %err, "selection can't be linked");
            return Ok(None);
        }
    };
    if store.fragment() == fragment {
        tracing::trace!(%token, "selection link unchanged");
    } else {
        tracing::debug!(%token, %fragment, "publishing selection link");
        store.set_fragment(&fragment)?;
    }

    Ok(Some(fragment))
}

/// Resolve both endpoints of a token against the current document.
pub fn resolve_token<T: DocumentTree + ?Sized>(
    tree: &T,
    token: &SelectionToken,
) -> Result<DomRange<T::Node>> {
    let start_container = resolve_from_body(tree, &token.start.container)?;
    let end_container = match &token.end.container {
        EndContainer::Same => start_container.clone(),
        EndContainer::At(address) => resolve_from_body(tree, address)?,
    };

    Ok(DomRange {
        start_container,
        start_offset: token.start.offset,
        end_container,
        end_offset: token.end.offset,
    })
}

/// Decode a link fragment into a range over `tree`.
///
/// Parse failures (wrong prefix, bad base64, malformed payload) and stale
/// links whose nodes are gone are both reported as [`crate::LinkError`];
/// see [`crate::LinkError::kind`] to tell them apart.
pub fn decode_selection<T: DocumentTree + ?Sized>(
    tree: &T,
    fragment: &str,
    prefix: &str,
) -> Result<DomRange<T::Node>> {
    let token = SelectionToken::from_fragment(fragment, prefix)?;
    resolve_token(tree, &token)
}
