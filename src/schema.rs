//! Variable-width schema types
//!
//! For the variable-length constructors of the wire format, it is necessary
//! to define custom codec types within this crate to ensure that the
//! intended serialization layout is preserved. Most such definitions
//! consist of newtype patterns around existing Rust-native types, which
//! distinguish their intended use-case and allow for specialized
//! serialization logic.
//!
//! # `Bytes`
//!
//! [`Bytes`] is a variable-length byte-sequence whose contents are
//! otherwise opaque, with no bound on its width. It is the wire image of
//! the unbounded opaque constructor: a four-byte length prefix, the
//! content, and zero-valued residue bytes up to the next four-byte
//! boundary. The domain alias [`Value`] names its primary use.
//!
//! `Bytes` is the variable-length analogue of the fixed-length type
//! [`FixedBytes<N>`](crate::fixed::FixedBytes), which carries no prefix.
//!
//! # `BoundedBytes<MAX>`
//!
//! [`BoundedBytes<MAX>`] shares the wire image of `Bytes` but rejects, at
//! construction and at decode time, content wider than `MAX` bytes. The
//! domain alias [`DataValue`] caps managed-data values at 64 bytes.
//!
//! # `BoundedString<MAX>`
//!
//! [`BoundedString<MAX>`] is the textual counterpart of `BoundedBytes`:
//! the same wire image, but the content is required to be valid UTF-8.
//! The aliases [`String28`], [`String32`], [`String64`] and [`String100`]
//! cover the string widths the protocol's types declare.

use crate::conv::{len::Estimable, len::var_opaque_len, target::Target, Decode, Encode};
use crate::error::WidthError;
use crate::parse::{ParseResult, Parser};
#[cfg(feature = "serde_impls")]
use serde::Serialize;
use std::convert::TryFrom;

/// Variable-length opaque byte-sequence with no width bound.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Bytes(Vec<u8>);

/// Unbounded opaque value payload.
pub type Value = Bytes;

#[cfg(feature = "serde_impls")]
impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl Bytes {
    /// Constructs an empty `Bytes`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Wraps an owned byte-vector without copying.
    #[inline]
    #[must_use]
    pub fn from_vec(contents: Vec<u8>) -> Self {
        Self(contents)
    }

    /// Returns the content width, in bytes, exclusive of prefix and residue.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the content is zero bytes wide.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the content bytes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Destructs `self` and returns the content bytes it contained.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(contents: Vec<u8>) -> Self {
        Self(contents)
    }
}

impl From<&[u8]> for Bytes {
    fn from(contents: &[u8]) -> Self {
        Self(contents.to_vec())
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Estimable for Bytes {
    const KNOWN: Option<usize> = None;

    fn unknown(&self) -> usize {
        var_opaque_len(self.0.len())
    }
}

impl Encode for Bytes {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many((self.0.len() as u32).to_be_bytes())
            + buf.push_all(&self.0)
            + buf.push_padding(self.0.len())
            + buf.resolve_zero()
    }
}

impl Decode for Bytes {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self(p.take_var_bytes(None)?))
    }
}

/// Variable-length opaque byte-sequence holding at most `MAX` content bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct BoundedBytes<const MAX: usize>(Vec<u8>);

/// Managed-data value payload, capped at 64 content bytes.
pub type DataValue = BoundedBytes<64>;

#[cfg(feature = "serde_impls")]
impl<const MAX: usize> Serialize for BoundedBytes<MAX> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<const MAX: usize> BoundedBytes<MAX> {
    /// Maximum permitted content width, in bytes.
    pub const MAX_WIDTH: usize = MAX;

    /// Attempts to wrap an owned byte-vector without copying.
    ///
    /// # Errors
    ///
    /// Returns [`WidthError::TooWide`] if `contents.len() > MAX`.
    pub fn try_from_vec(contents: Vec<u8>) -> Result<Self, WidthError> {
        if contents.len() > MAX {
            Err(WidthError::TooWide {
                limit: MAX,
                actual: contents.len(),
            })
        } else {
            Ok(Self(contents))
        }
    }

    /// Returns the content width, in bytes, exclusive of prefix and residue.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the content is zero bytes wide.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the content bytes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Destructs `self` and returns the content bytes it contained.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl<const MAX: usize> TryFrom<Vec<u8>> for BoundedBytes<MAX> {
    type Error = WidthError;

    fn try_from(contents: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from_vec(contents)
    }
}

impl<const MAX: usize> TryFrom<&[u8]> for BoundedBytes<MAX> {
    type Error = WidthError;

    fn try_from(contents: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_vec(contents.to_vec())
    }
}

impl<const MAX: usize> AsRef<[u8]> for BoundedBytes<MAX> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const MAX: usize> Estimable for BoundedBytes<MAX> {
    const KNOWN: Option<usize> = None;

    fn unknown(&self) -> usize {
        var_opaque_len(self.0.len())
    }
}

impl<const MAX: usize> Encode for BoundedBytes<MAX> {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many((self.0.len() as u32).to_be_bytes())
            + buf.push_all(&self.0)
            + buf.push_padding(self.0.len())
            + buf.resolve_zero()
    }
}

impl<const MAX: usize> Decode for BoundedBytes<MAX> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self(p.take_var_bytes(Some(MAX))?))
    }
}

/// UTF-8 text holding at most `MAX` content bytes.
///
/// The wire image is identical to [`BoundedBytes<MAX>`]; the distinction is
/// semantic, and decode additionally validates that the content is legal
/// UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct BoundedString<const MAX: usize>(String);

pub type String28 = BoundedString<28>;
pub type String32 = BoundedString<32>;
pub type String64 = BoundedString<64>;
pub type String100 = BoundedString<100>;

#[cfg(feature = "serde_impls")]
impl<const MAX: usize> Serialize for BoundedString<MAX> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<const MAX: usize> BoundedString<MAX> {
    /// Maximum permitted content width, in bytes (not characters).
    pub const MAX_WIDTH: usize = MAX;

    /// Attempts to wrap an owned string without copying.
    ///
    /// # Errors
    ///
    /// Returns [`WidthError::TooWide`] if the UTF-8 width of `contents`
    /// exceeds `MAX` bytes.
    pub fn try_from_string(contents: String) -> Result<Self, WidthError> {
        if contents.len() > MAX {
            Err(WidthError::TooWide {
                limit: MAX,
                actual: contents.len(),
            })
        } else {
            Ok(Self(contents))
        }
    }

    /// Returns the content width in bytes, exclusive of prefix and residue.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the content is zero bytes wide.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the content as a string-slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Destructs `self` and returns the string it contained.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<const MAX: usize> TryFrom<String> for BoundedString<MAX> {
    type Error = WidthError;

    fn try_from(contents: String) -> Result<Self, Self::Error> {
        Self::try_from_string(contents)
    }
}

impl<const MAX: usize> TryFrom<&str> for BoundedString<MAX> {
    type Error = WidthError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        Self::try_from_string(contents.to_owned())
    }
}

impl<const MAX: usize> std::str::FromStr for BoundedString<MAX> {
    type Err = WidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_string(s.to_owned())
    }
}

impl<const MAX: usize> std::fmt::Display for BoundedString<MAX> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<const MAX: usize> Estimable for BoundedString<MAX> {
    const KNOWN: Option<usize> = None;

    fn unknown(&self) -> usize {
        var_opaque_len(self.0.len())
    }
}

impl<const MAX: usize> Encode for BoundedString<MAX> {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many((self.0.len() as u32).to_be_bytes())
            + buf.push_all(self.0.as_bytes())
            + buf.push_padding(self.0.len())
            + buf.resolve_zero()
    }
}

impl<const MAX: usize> Decode for BoundedString<MAX> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let raw = p.take_var_bytes(Some(MAX))?;
        let contents = String::from_utf8(raw).map_err(crate::parse::error::ParseError::from)?;
        Ok(Self(contents))
    }
}

#[cfg(test)]
mod bytes_tests {
    use super::*;
    use crate::conv::DecodeError;
    use crate::parse::error::ParseError;

    #[test]
    fn value_round_trip() {
        let v = Value::from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(v.to_bytes(), vec![0, 0, 0, 5, 1, 2, 3, 4, 5, 0, 0, 0]);
        assert_eq!(Value::decode(v.to_bytes()), v);
    }

    #[test]
    fn empty_value_is_prefix_only() {
        assert_eq!(Value::new().to_bytes(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn data_value_cap() {
        assert!(DataValue::try_from_vec(vec![0u8; 64]).is_ok());
        assert!(matches!(
            DataValue::try_from_vec(vec![0u8; 65]),
            Err(WidthError::TooWide {
                limit: 64,
                actual: 65
            })
        ));
    }

    #[test]
    fn data_value_decode_rejects_oversized_prefix() {
        let mut wire = vec![0, 0, 0, 65];
        wire.extend_from_slice(&[0u8; 68]);
        match DataValue::try_decode(wire) {
            Err(DecodeError::Parse(ParseError::External(_))) => {}
            other => panic!("expected width fault, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod string_tests {
    use super::*;

    #[test]
    fn string32_cap() {
        assert!(String32::try_from("a".repeat(32).as_str()).is_ok());
        assert!(matches!(
            String32::try_from("a".repeat(33).as_str()),
            Err(WidthError::TooWide { .. })
        ));
    }

    #[test]
    fn multibyte_width_counts_bytes() {
        // four characters, twelve bytes
        let s = "さよなら";
        assert_eq!(String28::try_from(s).unwrap().len(), 12);
        assert!(String100::try_from(s).is_ok());
    }

    #[test]
    fn string_round_trip() {
        let s = String64::try_from("example.com").unwrap();
        let wire = s.to_bytes();
        assert_eq!(wire.len(), 4 + 11 + 1);
        assert_eq!(String64::decode(wire), s);
    }
}
