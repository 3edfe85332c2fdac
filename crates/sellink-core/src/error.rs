//! Error types for encoding and resolving selection links.

use smol_str::SmolStr;
use thiserror::Error;

use crate::types::NodeName;

/// Errors that can occur while decoding or resolving a selection link.
///
/// Apart from [`LinkError::Unencodable`], every variant here comes from
/// reading a link back.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LinkError {
    /// No element in the document carries this id.
    #[error("can't find node with id '{id}'")]
    IdNotFound { id: SmolStr },

    /// The context node has fewer than `index + 1` children named `name`.
    #[error("can't find node <{name}> with index {index}")]
    ChildNotFound { name: NodeName, index: usize },

    /// The document has no body to start resolution from.
    #[error("document has no body")]
    NoBody,

    /// The fragment does not start with the selection prefix.
    #[error("fragment is not a selection link")]
    NotALink,

    #[error("invalid base64 in selection link: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Link payloads are Latin-1; this character has no single-byte form.
    #[error("character '{0}' can't be written to a selection link")]
    Unencodable(char),

    /// Payload has no range separator between the two endpoints.
    #[error("missing range separator in selection link")]
    MissingRangeSeparator,

    /// Payload has more than two endpoints.
    #[error("unexpected third endpoint in selection link")]
    TrailingRangePart,

    #[error("invalid offset '{0}'")]
    InvalidOffset(SmolStr),

    #[error("invalid sibling index '{0}'")]
    InvalidIndex(SmolStr),

    #[error("empty address segment")]
    EmptySegment,
}

/// Coarse classification of a [`LinkError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The link is well-formed but the page no longer has the node it names.
    NotFound,
    /// The link itself is malformed.
    Parse,
}

impl LinkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinkError::IdNotFound { .. } | LinkError::ChildNotFound { .. } | LinkError::NoBody => {
                ErrorKind::NotFound
            }
            _ => ErrorKind::Parse,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T, E = LinkError> = std::result::Result<T, E>;
