//! Wire format of a selection link.
//!
//! Payload: `<startAddr>[:<startOffset>]-<endAddr|*>[:<endOffset>]`, zero
//! offsets omitted. The fragment is the payload base64-encoded with the
//! padding stripped, behind a prefix (`sel:` by default).
//!
//! The payload is base64'd as Latin-1, one byte per char, the same bytes
//! `btoa`/`atob` produce and read. Characters above U+00FF can't be written.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::{LinkError, Result};
use crate::types::{Address, EndContainer, Endpoint, RANGE_SEPARATOR};

/// Standard alphabet, never writes padding, accepts it either way on read.
const FRAGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Both endpoints of a selection, in address form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionToken {
    pub start: Endpoint<Address>,
    pub end: Endpoint<EndContainer>,
}

impl SelectionToken {
    pub fn new(start: Endpoint<Address>, end: Endpoint<EndContainer>) -> Self {
        Self { start, end }
    }

    /// Fragment text (without `#`) carrying this token.
    ///
    /// Fails with [`LinkError::Unencodable`] when an id or tag name holds a
    /// character outside Latin-1.
    pub fn to_fragment(&self, prefix: &str) -> Result<String> {
        let bytes = latin1_bytes(&self.to_string())?;
        Ok(format!("{}{}", prefix, FRAGMENT_ENGINE.encode(bytes)))
    }

    /// Parse a fragment produced by [`SelectionToken::to_fragment`].
    ///
    /// A leading `#` is tolerated. Fragments without `prefix` fail with
    /// [`LinkError::NotALink`].
    pub fn from_fragment(fragment: &str, prefix: &str) -> Result<Self> {
        decode_payload(fragment, prefix)?.parse()
    }
}

/// Strip the prefix and base64 from a fragment, returning the payload text.
pub fn decode_payload(fragment: &str, prefix: &str) -> Result<String> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let encoded = fragment.strip_prefix(prefix).ok_or(LinkError::NotALink)?;
    let bytes = FRAGMENT_ENGINE.decode(encoded)?;
    Ok(bytes.into_iter().map(char::from).collect())
}

fn latin1_bytes(payload: &str) -> Result<Vec<u8>> {
    payload
        .chars()
        .map(|c| u8::try_from(c).map_err(|_| LinkError::Unencodable(c)))
        .collect()
}

impl fmt::Display for SelectionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.start, RANGE_SEPARATOR, self.end)
    }
}

impl FromStr for SelectionToken {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(RANGE_SEPARATOR);
        let start = parts.next().unwrap_or_default();
        let end = parts.next().ok_or(LinkError::MissingRangeSeparator)?;
        if parts.next().is_some() {
            return Err(LinkError::TrailingRangePart);
        }
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_HASH_PREFIX;

    #[test]
    fn test_payload_format() {
        let token: SelectionToken = "#p1/@-*:5".parse().unwrap();
        assert_eq!(token.start.offset, 0);
        assert_eq!(token.end.container, EndContainer::Same);
        assert_eq!(token.end.offset, 5);
        insta::assert_snapshot!(token.to_string(), @"#p1/@-*:5");
    }

    #[test]
    fn test_fragment_strips_padding() {
        let token: SelectionToken = "#p1/@-*:5".parse().unwrap();
        let fragment = token.to_fragment(DEFAULT_HASH_PREFIX).unwrap();
        insta::assert_snapshot!(fragment, @"sel:I3AxL0AtKjo1");
        assert!(!fragment.contains('='));

        // "div-*:1" is 7 bytes, which would normally need a padding char.
        let token: SelectionToken = "div-*:1".parse().unwrap();
        let fragment = token.to_fragment(DEFAULT_HASH_PREFIX).unwrap();
        assert!(!fragment.ends_with('='));
        assert_eq!(
            SelectionToken::from_fragment(&fragment, DEFAULT_HASH_PREFIX),
            Ok(token)
        );
    }

    #[test]
    fn test_fragment_accepts_hash_and_padding() {
        let token: SelectionToken = "div-*:1".parse().unwrap();
        let fragment = format!("#{}==", token.to_fragment(DEFAULT_HASH_PREFIX).unwrap());
        assert!(fragment.ends_with("MQ=="));
        assert_eq!(
            SelectionToken::from_fragment(&fragment, DEFAULT_HASH_PREFIX),
            Ok(token)
        );
    }

    #[test]
    fn test_latin1_payload() {
        // `btoa("#caf\u{e9}/@-*:3")`, padding dropped.
        let fragment = "sel:I2NhZukvQC0qOjM";
        assert_eq!(
            decode_payload(fragment, DEFAULT_HASH_PREFIX),
            Ok("#café/@-*:3".to_string())
        );

        let token = SelectionToken::from_fragment(fragment, DEFAULT_HASH_PREFIX).unwrap();
        assert_eq!(
            token.start.container.segments(),
            &[crate::types::Segment::Anchor("café".into())]
        );
        assert_eq!(token.to_fragment(DEFAULT_HASH_PREFIX).unwrap(), fragment);
    }

    #[test]
    fn test_non_latin1_is_unencodable() {
        let token: SelectionToken = "#日本/@-*:2".parse().unwrap();
        assert_eq!(
            token.to_fragment(DEFAULT_HASH_PREFIX),
            Err(LinkError::Unencodable('日'))
        );
    }

    #[test]
    fn test_not_a_link() {
        assert_eq!(
            SelectionToken::from_fragment("#section-2", DEFAULT_HASH_PREFIX),
            Err(LinkError::NotALink)
        );
    }

    #[test]
    fn test_bad_base64() {
        let err = SelectionToken::from_fragment("#sel:!!!notbase64", DEFAULT_HASH_PREFIX)
            .unwrap_err();
        assert!(matches!(err, LinkError::Base64(_)));
        assert_eq!(err.kind(), crate::ErrorKind::Parse);
    }

    #[test]
    fn test_payload_structure_errors() {
        assert_eq!(
            "div/p:3".parse::<SelectionToken>(),
            Err(LinkError::MissingRangeSeparator)
        );
        assert_eq!(
            "a-b-c".parse::<SelectionToken>(),
            Err(LinkError::TrailingRangePart)
        );
        assert_eq!(
            "p:x-*".parse::<SelectionToken>(),
            Err(LinkError::InvalidOffset("x".into()))
        );
    }

    #[test]
    fn test_custom_prefix() {
        let token: SelectionToken = "-*:3".parse().unwrap();
        assert!(token.start.container.is_empty());
        let fragment = token.to_fragment("quote=").unwrap();
        assert!(fragment.starts_with("quote="));
        assert_eq!(decode_payload(&fragment, "quote="), Ok("-*:3".to_string()));
        assert_eq!(
            decode_payload(&fragment, DEFAULT_HASH_PREFIX),
            Err(LinkError::NotALink)
        );
    }
}
