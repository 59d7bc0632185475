//! Custom parsing model with byte-level precision
//!
//! This module, along with its submodules, provides the fundamental
//! definitions related to the abstract task of processing raw sequences
//! of binary data into the low-level fragments at the leaf nodes of
//! an arbitrarily complex user-defined type.
//!
//! For type-aware parsing, in other words, parsing user-defined types
//! directly rather than as an unstructured sequence of primitives,
//! see the [`Decode`](crate::conv::Decode) trait, which is a high-level
//! interface built almost entirely around the definitions contained
//! within this module.
//!
//! # Model
//!
//! All parsing is done in a non-backtracking, zero-lookahead fashion over
//! an immutable byte-buffer: a byte can only be viewed by consuming it,
//! only after all preceding indices have been consumed, and never twice.
//! Every multi-byte numeric read is big-endian, and the monomorphic
//! `take_XXX` methods bake in the wire format's alignment rules: booleans
//! and discriminants are four-byte words, and opaque data is followed by
//! zero-valued residue bytes up to the next four-byte boundary.
//!
//! # Layout
//!
//! The top-level of this module defines the [`Parser`] trait, along with
//! the utility trait [`TryIntoParser`] which facilitates the generic
//! instantiation of parser-types from a variety of source types. The
//! sub-module `error` defines the hierarchy of error cases that can be
//! encountered during a call to a `Parser` method, and `buffer` defines
//! the backing structures of the provided implementations: `ByteParser`
//! over an owned buffer, and `SliceParser` over a borrowed one.

pub mod error;

pub use error::ParseResult;
use error::{ParseError, TokenError};
use std::convert::TryFrom;

/// Number of residue bytes required to advance `n` to a four-byte boundary.
pub(crate) const fn padding_of(n: usize) -> usize {
    (4 - n % 4) % 4
}

/// Stateful parse-object over an immutable byte-buffer.
///
/// Implementing types must define their own operational semantics for the
/// required methods, subject to the following properties:
///
/// * A fresh `p: impl Parser` has `p.offset() == 0` and `p.view_len()`
///   equal to the length of the parse-buffer.
/// * `self.remainder() := self.view_len() - self.offset()` is the largest
///   `n` for which `self.consume(n)` returns an `Ok(_)` value; greater
///   values must fail without consuming anything.
/// * A successful `self.consume(n)` decreases `self.remainder()` by
///   exactly `n`; a failed call leaves it unchanged.
pub trait Parser {
    /// Buffer type a new `Parser` object can be safely and infallibly
    /// instantiated from a value of.
    type Buffer;

    /// Constructs an initialized `Parser` value over a buffer
    fn from_buffer(buf: Self::Buffer) -> Self;

    /// Computes the length of the Parser's buffer.
    fn view_len(&self) -> usize;

    /// Computes the current value of the offset into the Parser's buffer.
    ///
    /// This should either be invariant, or increase by the number of bytes
    /// consumed by any method that returns bytes from the buffer.
    fn offset(&self) -> usize;

    /// Computes the remaining number of bytes that can be safely consumed.
    fn remainder(&self) -> usize {
        self.view_len() - self.offset()
    }

    /// Attempt to consume and return a slice of length `nbytes`,
    /// starting from the first unconsumed byte in the buffer.
    ///
    /// # Invariants
    ///
    /// This method **MUST** return `Ok(s)` when and only when no bounds
    /// were violated, and in such cases, `s.len()` must be equal to the
    /// requested length `nbytes`. Failure to guarantee this is an
    /// implementation bug.
    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]>;

    /// Consumes `N` bytes and returns them in array-form
    fn consume_arr<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        error::coerce_slice(self.consume(N)?)
    }

    /// Consumes four bytes and returns the corresponding `u32` value
    ///
    /// As with all fixed-width multi-byte numeric `take_X` methods,
    /// this method performs an implicitly big-endian conversion with
    /// respect to the individual bytes consumed.
    #[inline]
    fn take_u32(&mut self) -> ParseResult<u32> {
        self.consume_arr::<4>().map(u32::from_be_bytes)
    }

    /// Consumes four bytes and returns the corresponding `i32` value
    #[inline]
    fn take_i32(&mut self) -> ParseResult<i32> {
        self.consume_arr::<4>().map(i32::from_be_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `u64` value
    #[inline]
    fn take_u64(&mut self) -> ParseResult<u64> {
        self.consume_arr::<8>().map(u64::from_be_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `i64` value
    #[inline]
    fn take_i64(&mut self) -> ParseResult<i64> {
        self.consume_arr::<8>().map(i64::from_be_bytes)
    }

    /// Consumes a four-byte word and returns the boolean value it represents
    ///
    /// The only valid boolean encodings are a word-value of `1` for `true`
    /// and `0` for `false`.
    ///
    /// # Errors
    ///
    /// If the consume operation itself fails, returns the original error.
    ///
    /// Otherwise, returns [`TokenError::InvalidBoolean`] containing the
    /// invalid word, wrapped suitably as a `ParseError`.
    #[inline]
    fn take_bool(&mut self) -> ParseResult<bool> {
        match self.take_u32()? {
            1 => Ok(true),
            0 => Ok(false),
            word => Err(ParseError::Token(TokenError::InvalidBoolean(word))),
        }
    }

    /// Consumes and returns a `Vec<u8>` of length `nbytes`, following
    /// the same behavioral guarantees as [`consume`](Parser::consume).
    #[inline]
    fn take_dynamic(&mut self, nbytes: usize) -> ParseResult<Vec<u8>> {
        self.consume(nbytes).map(Vec::from)
    }

    /// Consumes and returns an array of the constant length `N`
    #[inline]
    fn take_fixed<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        self.consume_arr::<N>()
    }

    /// Consumes the residue bytes that align a run of `nbytes` content
    /// bytes to a four-byte boundary.
    ///
    /// # Errors
    ///
    /// Unless the `relaxed_padding` feature is enabled, any non-zero
    /// residue byte is reported as [`TokenError::NonZeroPadding`].
    fn take_padding(&mut self, nbytes: usize) -> ParseResult<()> {
        let residue = self.consume(padding_of(nbytes))?;
        cfg_if::cfg_if! {
            if #[cfg(feature = "relaxed_padding")] {
                let _ = residue;
            } else {
                if residue.iter().any(|&b| b != 0) {
                    let padding = residue.to_vec();
                    return Err(TokenError::NonZeroPadding { padding }.into());
                }
            }
        }
        Ok(())
    }

    /// Consumes a four-byte length prefix, the run of content bytes it
    /// declares, and the residue bytes aligning that run, returning the
    /// content.
    ///
    /// # Errors
    ///
    /// When `limit` is provided and the declared length exceeds it,
    /// fails with [`WidthError::TooWide`](crate::error::WidthError::TooWide)
    /// before any content byte is consumed.
    fn take_var_bytes(&mut self, limit: Option<usize>) -> ParseResult<Vec<u8>> {
        let declared = self.take_u32()? as usize;
        if let Some(limit) = limit {
            if declared > limit {
                return Err(crate::error::WidthError::TooWide {
                    limit,
                    actual: declared,
                }
                .into());
            }
        }
        let contents = self.take_dynamic(declared)?;
        self.take_padding(declared)?;
        Ok(contents)
    }

    /// Parses an `i32` discriminant word and verifies that it is a valid
    /// discriminant for the intended type `T`, before returning it.
    ///
    /// # Invariants
    ///
    /// All implementations must uphold the contract that the only possible
    /// return values are `Err(_)`, and `Ok(val)` for some `val` in `valid`.
    fn take_tagword<T>(&mut self, valid: &'static [i32]) -> ParseResult<i32> {
        if valid.is_empty() {
            return Err(error::InternalError::NoValidTags.into());
        }
        let actual = self.take_i32()?;
        if valid.contains(&actual) {
            Ok(actual)
        } else {
            Err(TokenError::InvalidTag {
                actual,
                for_type: std::any::type_name::<T>(),
                valid,
            }
            .into())
        }
    }
}

pub mod buffer {
    //! Common buffer types for `Parser` implementors
    //!
    //! Currently, this includes [`SliceBuffer<'a>`] for `SliceParser<'a>`,
    //! and [`VecBuffer`] for [`ByteParser`](super::byteparser::ByteParser).

    /// Newtype around a lifetime-annotated immutable slice `&'a [u8]`
    ///
    /// `SliceBuffer` is explicitly used only as the buffer type for a
    /// slice-based [`Parser`](super::Parser), and is not to be used in
    /// place of `&'a [u8]` in any other context.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[repr(transparent)]
    pub struct SliceBuffer<'a>(&'a [u8]);

    impl<'a> SliceBuffer<'a> {
        /// Creates a `SliceBuffer<'a>` from a slice of type `&'a [u8]`
        pub const fn new(slice: &'a [u8]) -> Self {
            Self(slice)
        }

        /// Extracts a copy of the internal `&'a [u8]` of a borrowed `SliceBuffer`
        pub const fn as_slice(&self) -> &'a [u8] {
            self.0
        }

        /// Returns the number of bytes in a `SliceBuffer`.
        #[inline]
        pub const fn len(&self) -> usize {
            self.0.len()
        }

        /// Returns `true` if the `SliceBuffer` has a length of 0
        pub const fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        /// Splits a `SliceBuffer` into the segments containing indices
        /// `[0..mid]` and `[mid..]`.
        ///
        /// # Panics
        ///
        /// Will panic if `mid > self.len()`.
        pub fn split(&self, mid: usize) -> (&'a [u8], Self) {
            let (ret, rest) = self.0.split_at(mid);
            (ret, Self(rest))
        }
    }

    impl<'a> From<&'a [u8]> for SliceBuffer<'a> {
        #[inline]
        fn from(bytes: &'a [u8]) -> Self {
            Self(bytes)
        }
    }

    impl<'a, const N: usize> From<&'a [u8; N]> for SliceBuffer<'a> {
        #[inline]
        fn from(bytes: &'a [u8; N]) -> Self {
            Self(bytes)
        }
    }

    /// Newtype around `Vec<u8>` that only permits immutable access
    ///
    /// This newtype is used to allow for explicit signalling of intended
    /// role for the use of `Vec<u8>` as the underlying, immutable buffer of
    /// a [`ByteParser`](super::byteparser::ByteParser).
    ///
    /// The contents of a `VecBuffer` are not mutated by any of the inherent
    /// methods defined in this module.
    #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[repr(transparent)]
    pub struct VecBuffer(Vec<u8>);

    impl VecBuffer {
        /// Returns the number of bytes in a `VecBuffer`
        pub fn len(&self) -> usize {
            self.0.len()
        }

        /// Returns `true` if the buffer contains zero bytes
        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        /// Borrows a range of bytes starting at index `ix`, of length `len`.
        ///
        /// # Panics
        ///
        /// Will panic if `ix + len` is out-of-bounds
        pub fn get_slice(&self, ix: usize, len: usize) -> &[u8] {
            &self.0[ix..ix + len]
        }
    }

    impl std::fmt::Debug for VecBuffer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            <Vec<u8> as std::fmt::Debug>::fmt(&self.0, f)
        }
    }

    impl From<&[u8]> for VecBuffer {
        fn from(bytes: &[u8]) -> Self {
            Self(bytes.to_owned())
        }
    }

    impl From<Vec<u8>> for VecBuffer {
        fn from(bytes: Vec<u8>) -> Self {
            Self(bytes)
        }
    }

    impl From<&Vec<u8>> for VecBuffer {
        fn from(bytes: &Vec<u8>) -> Self {
            Self(bytes.clone())
        }
    }

    impl<const N: usize> From<[u8; N]> for VecBuffer {
        fn from(bytes: [u8; N]) -> Self {
            Self(bytes.to_vec())
        }
    }

    impl<const N: usize> From<&'_ [u8; N]> for VecBuffer {
        fn from(bytes: &'_ [u8; N]) -> Self {
            Self(bytes.to_vec())
        }
    }
}

pub mod byteparser {
    use super::buffer::VecBuffer;
    use super::error::{ParseError, ParseResult, WindowError};
    use super::Parser;

    /// `Parser` implementation over an owned, immutable byte-buffer with a
    /// monotonically increasing parse-head.
    #[derive(Debug)]
    pub struct ByteParser {
        buffer: VecBuffer,
        offset: usize,
    }

    impl Parser for ByteParser {
        type Buffer = VecBuffer;

        /// Create a `ByteParser` from any buffer type, i.e. any type `T`
        /// that satisfies `VecBuffer: From<T>`.
        ///
        /// The resulting parser will have an offset of 0 at time of creation.
        fn from_buffer(buffer: Self::Buffer) -> Self {
            Self { buffer, offset: 0 }
        }

        #[inline]
        #[must_use]
        fn view_len(&self) -> usize {
            self.buffer.len()
        }

        #[inline]
        #[must_use]
        fn offset(&self) -> usize {
            self.offset
        }

        fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
            if self.offset + nbytes <= self.buffer.len() {
                let ix = self.offset;
                self.offset += nbytes;
                Ok(self.buffer.get_slice(ix, nbytes))
            } else {
                Err(ParseError::Window(WindowError::ConsumeWouldExceedLimit {
                    offset: self.offset,
                    requested: nbytes,
                    limit: self.view_len(),
                }))
            }
        }
    }
}

pub mod sliceparser {
    use super::buffer::SliceBuffer;
    use super::error::{ParseError, ParseResult, WindowError};
    use super::Parser;

    /// `Parser` implementation over a borrowed byte-slice, consuming via
    /// the shrinking-slice model.
    #[derive(Debug)]
    pub struct SliceParser<'a> {
        view: SliceBuffer<'a>,
        consumed: usize,
    }

    impl<'a> Parser for SliceParser<'a> {
        type Buffer = SliceBuffer<'a>;

        fn from_buffer(buffer: Self::Buffer) -> Self {
            Self {
                view: buffer,
                consumed: 0,
            }
        }

        #[inline]
        fn view_len(&self) -> usize {
            self.consumed + self.view.len()
        }

        #[inline]
        fn offset(&self) -> usize {
            self.consumed
        }

        #[inline]
        fn remainder(&self) -> usize {
            self.view.len()
        }

        fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
            if nbytes <= self.view.len() {
                let (ret, rest) = self.view.split(nbytes);
                self.view = rest;
                self.consumed += nbytes;
                Ok(ret)
            } else {
                Err(ParseError::Window(WindowError::ConsumeWouldExceedLimit {
                    offset: self.consumed,
                    requested: nbytes,
                    limit: self.view_len(),
                }))
            }
        }
    }
}

use byteparser::ByteParser;

/// Helper trait marking types that can be converted (possibly fallibly),
/// into `Parser` objects of the specified type.
///
/// When no generic argument is provided, the default `Parser` type
/// used is [`ByteParser`]
pub trait TryIntoParser<P = ByteParser>
where
    P: Parser,
{
    /// Attempt to produce a parser object of type `P` over the bytes
    /// represented by `self`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the conversion from `self`
    /// into the buffer-type of `P` failed. The conversions defined within
    /// this library are all infallible.
    fn try_into_parser(self) -> ParseResult<P>;
}

impl<P, T> TryIntoParser<P> for T
where
    P: Parser,
    <P as Parser>::Buffer: TryFrom<T>,
    <T as std::convert::TryInto<<P as Parser>::Buffer>>::Error: Into<ParseError>,
{
    fn try_into_parser(self) -> ParseResult<P> {
        let buffer = match <<P as Parser>::Buffer as TryFrom<T>>::try_from(self) {
            Ok(x) => x,
            Err(err) => return Err(err.into()),
        };
        Ok(P::from_buffer(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::byteparser::ByteParser;
    use super::error::{ParseError, TokenError, WindowError};
    use super::sliceparser::SliceParser;
    use super::{Parser, TryIntoParser};

    #[test]
    fn integers_are_big_endian() {
        let mut p: ByteParser = vec![0x00, 0x00, 0x01, 0x00].try_into_parser().unwrap();
        assert_eq!(p.take_u32().unwrap(), 256);
        assert_eq!(p.remainder(), 0);

        let mut p: ByteParser = vec![0xff; 8].try_into_parser().unwrap();
        assert_eq!(p.take_i64().unwrap(), -1);
    }

    #[test]
    fn boolean_words() {
        let mut p: ByteParser = vec![0, 0, 0, 1, 0, 0, 0, 0].try_into_parser().unwrap();
        assert!(p.take_bool().unwrap());
        assert!(!p.take_bool().unwrap());

        let mut p: ByteParser = vec![0, 0, 0, 2].try_into_parser().unwrap();
        assert!(matches!(
            p.take_bool(),
            Err(ParseError::Token(TokenError::InvalidBoolean(2)))
        ));
    }

    #[test]
    fn truncation_reports_expected_vs_actual() {
        let mut p: ByteParser = vec![0u8; 3].try_into_parser().unwrap();
        match p.take_u32() {
            Err(ParseError::Window(WindowError::ConsumeWouldExceedLimit {
                offset,
                requested,
                limit,
            })) => {
                assert_eq!((offset, requested, limit), (0, 4, 3));
            }
            other => panic!("expected window error, got {other:?}"),
        }
    }

    #[test]
    fn var_bytes_padding() {
        // length 5, contents, then 3 residue bytes
        let buf = vec![0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o', 0, 0, 0];
        let mut p: ByteParser = buf.try_into_parser().unwrap();
        assert_eq!(p.take_var_bytes(None).unwrap(), b"hello");
        assert_eq!(p.remainder(), 0);
    }

    #[cfg(not(feature = "relaxed_padding"))]
    #[test]
    fn var_bytes_rejects_dirty_padding() {
        let buf = vec![0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o', 0, 1, 0];
        let mut p: ByteParser = buf.try_into_parser().unwrap();
        assert!(matches!(
            p.take_var_bytes(None),
            Err(ParseError::Token(TokenError::NonZeroPadding { .. }))
        ));
    }

    #[test]
    fn slice_parser_equivalence() {
        let buf: &[u8] = &[0, 0, 0, 7, 0xde, 0xad, 0xbe, 0xef];
        let mut p: SliceParser = buf.try_into_parser().unwrap();
        assert_eq!(p.take_u32().unwrap(), 7);
        assert_eq!(p.take_fixed::<4>().unwrap(), [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(p.offset(), 8);
    }
}
