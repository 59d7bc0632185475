//! Fixed-width opaque schema types
//!
//! This module contains the definition of [`FixedBytes<N>`], the generic
//! carrier for opaque byte-sequences whose width is a type-level constant,
//! along with the two fixed-width domain types built directly on it:
//! [`UInt256`] for 32-byte words (public-key material and hashes), and
//! [`Thresholds`] for the four-byte operation-threshold tuple.
//!
//! On the wire, a fixed opaque run of `N` bytes carries no length prefix;
//! its content is followed by zero-valued residue bytes up to the next
//! four-byte boundary. All widths used by this crate's domain types are
//! already aligned, so the residue is empty in practice, but the generic
//! codec handles unaligned `N` uniformly.

use crate::conv::{len, target::Target, Decode, Encode};
use crate::error::{BoundsError, WidthError};
use crate::parse::{ParseResult, Parser};
#[cfg(feature = "serde_impls")]
use serde::Serialize;
use std::borrow::Borrow;
use std::convert::TryFrom;

/// Simple type for holding fixed-length binary sequences.
///
/// While [`FixedBytes<N>`] is naturally implemented around `[u8; N]`,
/// it is preferable to use this type instead, in order to signal to
/// downstream consumers that the data in question is specifically
/// intended to be interpreted as raw binary data with a fixed wire width.
///
/// Many intuitive conversion traits are implemented to allow flexible
/// construction and reinterpretation of `FixedBytes` values, with
/// comparably little overhead versus using arrays directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedBytes<const N: usize>([u8; N]);

#[cfg(feature = "serde_impls")]
impl<const N: usize> Serialize for FixedBytes<N>
where
    [u8; N]: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<const N: usize> FixedBytes<N> {
    /// Constructs a [`FixedBytes<N>`] from a byte-array of length `N`.
    #[inline(always)]
    #[must_use]
    pub const fn from_array(arr: [u8; N]) -> FixedBytes<N> {
        Self(arr)
    }

    /// Returns an immutable reference to the raw bytes of this [`FixedBytes<N>`].
    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Attempts to construct a [`FixedBytes<N>`] by copying the bytes of a
    /// byte-slice whose length is presumptively equal to `N`.
    ///
    /// # Errors
    ///
    /// Returns [`WidthError::WrongWidth`] if `bytes.len() != N`.
    pub fn try_from_slice(bytes: &[u8]) -> Result<FixedBytes<N>, WidthError> {
        match <[u8; N]>::try_from(bytes) {
            Ok(arr) => Ok(Self(arr)),
            Err(_) => Err(WidthError::WrongWidth {
                exact: N,
                actual: bytes.len(),
            }),
        }
    }

    /// Returns the length, in bytes, of this [`FixedBytes<N>`].
    ///
    /// The return value will always be equal to `N`.
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns `false` unconditionally for `N > 0`.
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns the contents of this [`FixedBytes<N>`], as `[u8; N]`.
    #[inline(always)]
    #[must_use]
    pub const fn to_array(self) -> [u8; N] {
        self.0
    }

    /// Returns a freshly-allocated [`Vec<u8>`] holding the binary contents
    /// of this [`FixedBytes<N>`].
    #[inline(always)]
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Borrow<[u8]> for FixedBytes<N> {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(value: [u8; N]) -> Self {
        Self(value)
    }
}

impl<const N: usize> From<&[u8; N]> for FixedBytes<N> {
    fn from(arr: &[u8; N]) -> Self {
        Self(*arr)
    }
}

impl<const N: usize> From<FixedBytes<N>> for Vec<u8> {
    fn from(bytes: FixedBytes<N>) -> Self {
        bytes.0.into()
    }
}

impl<const N: usize> From<FixedBytes<N>> for [u8; N] {
    fn from(bytes: FixedBytes<N>) -> Self {
        bytes.0
    }
}

impl<const N: usize> Default for FixedBytes<N>
where
    [u8; N]: Default,
{
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<'a, const N: usize> TryFrom<&'a [u8]> for FixedBytes<N> {
    type Error = WidthError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(value)
    }
}

impl<const N: usize> len::FixedLength for FixedBytes<N> {
    const LEN: usize = len::fixed_opaque_len(N);
}

impl<const N: usize> Encode for FixedBytes<N> {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many(self.0) + buf.push_padding(N) + buf.resolve_zero()
    }
}

impl<const N: usize> Decode for FixedBytes<N> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let contents = p.take_fixed::<N>()?;
        p.take_padding(N)?;
        Ok(Self(contents))
    }
}

/// Unsigned 256-bit word, held as exactly 32 bytes of big-endian content.
///
/// Construction from a shorter byte-run left-pads with zero bytes; input
/// wider than 32 bytes is rejected outright rather than truncated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct UInt256(FixedBytes<32>);

#[cfg(feature = "serde_impls")]
impl Serialize for UInt256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl UInt256 {
    /// Exact content width of a `UInt256`, in bytes.
    pub const WIDTH: usize = 32;

    /// Constructs a [`UInt256`] from exactly 32 bytes.
    #[inline]
    #[must_use]
    pub const fn from_array(arr: [u8; 32]) -> Self {
        Self(FixedBytes::from_array(arr))
    }

    /// Constructs a [`UInt256`] from at most 32 bytes, left-padding
    /// shorter input with zero bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WidthError::TooWide`] if `bytes.len() > 32`.
    pub fn of(bytes: &[u8]) -> Result<Self, WidthError> {
        if bytes.len() > Self::WIDTH {
            return Err(WidthError::TooWide {
                limit: Self::WIDTH,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr[Self::WIDTH - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(FixedBytes::from_array(arr)))
    }

    /// Returns an immutable reference to the raw bytes of this [`UInt256`].
    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &[u8; 32] {
        self.0.bytes()
    }

    /// Returns the contents of this [`UInt256`], as `[u8; 32]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [u8; 32] {
        self.0.to_array()
    }
}

impl From<[u8; 32]> for UInt256 {
    fn from(arr: [u8; 32]) -> Self {
        Self::from_array(arr)
    }
}

impl TryFrom<&[u8]> for UInt256 {
    type Error = WidthError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::of(bytes)
    }
}

impl len::FixedLength for UInt256 {
    const LEN: usize = 32;
}

impl Encode for UInt256 {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.0.write_to(buf)
    }
}

impl Decode for UInt256 {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self(FixedBytes::parse(p)?))
    }
}

/// Four unsigned single-byte weights governing operation authorization:
/// master weight, then the low, medium, and high thresholds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Thresholds(FixedBytes<4>);

impl Thresholds {
    /// Constructs a [`Thresholds`] from four weight values.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Overflow`] if any weight exceeds 255.
    pub fn of(master: u32, low: u32, medium: u32, high: u32) -> Result<Self, BoundsError<i64>> {
        let mut arr = [0u8; 4];
        for (slot, weight) in arr.iter_mut().zip([master, low, medium, high]) {
            *slot = BoundsError::<i64>::restrict(weight, 0u8, u8::MAX)? as u8;
        }
        Ok(Self(FixedBytes::from_array(arr)))
    }

    /// Constructs a [`Thresholds`] directly from its wire representation.
    #[inline]
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self(FixedBytes::from_array(arr))
    }

    /// Weight of the master key.
    #[inline]
    #[must_use]
    pub const fn master(&self) -> u8 {
        self.0.bytes()[0]
    }

    /// Threshold for low-security operations.
    #[inline]
    #[must_use]
    pub const fn low(&self) -> u8 {
        self.0.bytes()[1]
    }

    /// Threshold for medium-security operations.
    #[inline]
    #[must_use]
    pub const fn medium(&self) -> u8 {
        self.0.bytes()[2]
    }

    /// Threshold for high-security operations.
    #[inline]
    #[must_use]
    pub const fn high(&self) -> u8 {
        self.0.bytes()[3]
    }
}

impl len::FixedLength for Thresholds {
    const LEN: usize = 4;
}

impl Encode for Thresholds {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.0.write_to(buf)
    }
}

impl Decode for Thresholds {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self(FixedBytes::parse(p)?))
    }
}

#[cfg(test)]
mod fixedbytes_tests {
    use super::*;

    #[test]
    fn aligned_passthrough() {
        let b = FixedBytes::<4>::decode(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(b, FixedBytes::from_array([0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(b.to_hex(), "deadbeef");
    }

    #[test]
    fn unaligned_residue() {
        let b = FixedBytes::<5>::from_array(*b"hello");
        assert_eq!(b.to_bytes(), vec![b'h', b'e', b'l', b'l', b'o', 0, 0, 0]);
        assert_eq!(
            FixedBytes::<5>::decode(vec![b'h', b'e', b'l', b'l', b'o', 0, 0, 0]),
            b
        );
    }

    #[test]
    fn wrong_width_slice() {
        assert!(matches!(
            FixedBytes::<4>::try_from_slice(&[1, 2, 3]),
            Err(WidthError::WrongWidth {
                exact: 4,
                actual: 3
            })
        ));
    }
}

#[cfg(test)]
mod uint256_tests {
    use super::*;

    #[test]
    fn left_pads_short_input() {
        let word = UInt256::of(&[0xff]).unwrap();
        let mut expected = [0u8; 32];
        expected[31] = 0xff;
        assert_eq!(word.to_array(), expected);
    }

    #[test]
    fn rejects_wide_input() {
        assert!(matches!(
            UInt256::of(&[0u8; 33]),
            Err(WidthError::TooWide {
                limit: 32,
                actual: 33
            })
        ));
    }

    #[test]
    fn wire_width() {
        let word = UInt256::from_array([7u8; 32]);
        assert_eq!(word.to_bytes().len(), 32);
        assert_eq!(UInt256::decode(word.to_bytes()), word);
    }
}

#[cfg(test)]
mod thresholds_tests {
    use super::*;

    #[test]
    fn hex_rendition() {
        assert_eq!(Thresholds::of(1, 2, 3, 4).unwrap().to_hex(), "01020304");
    }

    #[test]
    fn rejects_oversized_weight() {
        assert!(matches!(
            Thresholds::of(300, 0, 0, 0),
            Err(BoundsError::Overflow { .. })
        ));
    }

    #[test]
    fn accessors() {
        let t = Thresholds::of(255, 0, 10, 20).unwrap();
        assert_eq!(
            (t.master(), t.low(), t.medium(), t.high()),
            (255, 0, 10, 20)
        );
    }
}
