//! Core link types: node names, address segments, endpoints and ranges.
//!
//! The internal model uses tagged variants; the compact sentinel characters
//! (`#`, `@`, `*`, `/`, `.`, `:`, `-`) only appear in the `Display` and
//! `FromStr` impls that read and write the wire format.

use std::fmt;
use std::str::FromStr;

use smol_str::{SmolStr, ToSmolStr};

use crate::error::{LinkError, Result};

/// Wire name shared by every text node.
pub const TEXT_NODE_NAME: &str = "@";
/// End container marker meaning "same node as the start container".
pub const SAME_CONTAINER: &str = "*";
/// Prefix of an anchor segment.
pub const ID_PREFIX: char = '#';
pub const PATH_SEPARATOR: char = '/';
pub const INDEX_SEPARATOR: char = '.';
pub const OFFSET_SEPARATOR: char = ':';
pub const RANGE_SEPARATOR: char = '-';
/// Stands in for `-` inside ids and tag names, since `-` separates the two endpoints.
pub const HYPHEN_SUBSTITUTE: char = '~';

fn escape_hyphens(s: &str) -> SmolStr {
    if s.contains(RANGE_SEPARATOR) {
        s.replace(RANGE_SEPARATOR, "~").to_smolstr()
    } else {
        s.to_smolstr()
    }
}

fn restore_hyphens(s: &str) -> SmolStr {
    if s.contains(HYPHEN_SUBSTITUTE) {
        s.replace(HYPHEN_SUBSTITUTE, "-").to_smolstr()
    } else {
        s.to_smolstr()
    }
}

/// Name used to count siblings.
///
/// All text nodes share the synthetic [`NodeName::Text`] name, so a text
/// node's index counts only the text nodes before it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeName {
    Text,
    /// Lowercased node name (`p`, `b`, `my-widget`, `#comment`).
    Tag(SmolStr),
}

impl NodeName {
    /// Build a tag name, lowercasing it the way DOM `nodeName` comparisons expect.
    pub fn tag(name: &str) -> Self {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            NodeName::Tag(name.to_ascii_lowercase().into())
        } else {
            NodeName::Tag(name.into())
        }
    }

    /// Whether this is the `<body>` element, where every relative address starts.
    pub fn is_body(&self) -> bool {
        matches!(self, NodeName::Tag(name) if name == "body")
    }

    fn from_wire(s: &str) -> Self {
        if s == TEXT_NODE_NAME {
            NodeName::Text
        } else {
            NodeName::Tag(restore_hyphens(s))
        }
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeName::Text => f.write_str(TEXT_NODE_NAME),
            NodeName::Tag(name) => f.write_str(&escape_hyphens(name)),
        }
    }
}

/// One step of an [`Address`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Absolute jump to the element carrying this id.
    Anchor(SmolStr),
    /// The `index`-th child named `name` of the current node.
    Named { name: NodeName, index: usize },
}

impl Segment {
    pub fn anchor(id: impl Into<SmolStr>) -> Self {
        Segment::Anchor(id.into())
    }

    pub fn named(name: NodeName, index: usize) -> Self {
        Segment::Named { name, index }
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, Segment::Anchor(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Anchor(id) => write!(f, "{}{}", ID_PREFIX, escape_hyphens(id)),
            Segment::Named { name, index: 0 } => write!(f, "{}", name),
            Segment::Named { name, index } => write!(f, "{}{}{}", name, INDEX_SEPARATOR, index),
        }
    }
}

impl FromStr for Segment {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(id) = s.strip_prefix(ID_PREFIX) {
            if id.is_empty() {
                return Err(LinkError::EmptySegment);
            }
            return Ok(Segment::Anchor(restore_hyphens(id)));
        }

        // An empty index reads as 0, same as an absent one.
        let (name, index) = match s.split_once(INDEX_SEPARATOR) {
            Some((name, "")) => (name, 0),
            Some((name, index)) => (
                name,
                index
                    .parse::<usize>()
                    .map_err(|_| LinkError::InvalidIndex(index.to_smolstr()))?,
            ),
            None => (s, 0),
        };

        if name.is_empty() {
            return Err(LinkError::EmptySegment);
        }

        Ok(Segment::Named {
            name: NodeName::from_wire(name),
            index,
        })
    }
}

/// Relative address of a node: a top-down list of segments.
///
/// The empty address denotes the context node the walk starts from,
/// which for a whole link is the document body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Address(Vec<Segment>);

impl Address {
    /// The empty address (the body itself).
    pub fn body() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the address starts from an element id rather than the body.
    pub fn is_anchored(&self) -> bool {
        self.0.first().is_some_and(Segment::is_anchor)
    }
}

impl From<Vec<Segment>> for Address {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::body());
        }
        s.split(PATH_SEPARATOR)
            .map(Segment::from_str)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

/// Container of the end endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EndContainer {
    /// Same node as the start container.
    Same,
    At(Address),
}

impl fmt::Display for EndContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndContainer::Same => f.write_str(SAME_CONTAINER),
            EndContainer::At(address) => write!(f, "{}", address),
        }
    }
}

impl FromStr for EndContainer {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        if s == SAME_CONTAINER {
            Ok(EndContainer::Same)
        } else {
            s.parse().map(EndContainer::At)
        }
    }
}

/// A container plus an offset into it.
///
/// The offset is a UTF-16 character offset for text nodes and a child
/// index for elements, exactly as the DOM Range API reports it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint<C> {
    pub container: C,
    pub offset: u32,
}

impl<C> Endpoint<C> {
    pub fn new(container: C, offset: u32) -> Self {
        Self { container, offset }
    }
}

impl<C: fmt::Display> fmt::Display for Endpoint<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset == 0 {
            write!(f, "{}", self.container)
        } else {
            write!(f, "{}{}{}", self.container, OFFSET_SEPARATOR, self.offset)
        }
    }
}

impl<C: FromStr<Err = LinkError>> FromStr for Endpoint<C> {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        let (container, offset) = match s.split_once(OFFSET_SEPARATOR) {
            Some((container, "")) => (container, 0),
            Some((container, offset)) => (
                container,
                offset
                    .parse::<u32>()
                    .map_err(|_| LinkError::InvalidOffset(offset.to_smolstr()))?,
            ),
            None => (s, 0),
        };
        Ok(Self {
            container: container.parse()?,
            offset,
        })
    }
}

/// A live selection range expressed over some tree's node handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomRange<N> {
    pub start_container: N,
    pub start_offset: u32,
    pub end_container: N,
    pub end_offset: u32,
}

impl<N: PartialEq> DomRange<N> {
    pub fn new(start_container: N, start_offset: u32, end_container: N, end_offset: u32) -> Self {
        Self {
            start_container,
            start_offset,
            end_container,
            end_offset,
        }
    }

    pub fn same_container(&self) -> bool {
        self.start_container == self.end_container
    }

    /// Nothing selected: both endpoints are the same point.
    pub fn is_collapsed(&self) -> bool {
        self.same_container() && self.start_offset == self.end_offset
    }
}
