//! Error types used to report failure in low-level parsing
//!
//! This module contains a hierarchy of types representing specific
//! classes of error that may arise as a result of calls to
//! [`Parser`](super::Parser) methods. Some of these may also be returned
//! by lower-level operations that specific implementors of `Parser`
//! rely on.
//!
//! # Layout
//!
//! This module defines the primary type `ParseError` and the alias
//! `ParseResult<T>`; it additionally defines various type-level refinements
//! of `ParseError`, grouped according to similar provenance or nature.

use std::array::TryFromSliceError;
use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Display, Formatter, Result};
use std::string::FromUtf8Error;

use crate::error::{BoundsError, LengthError, WidthError};

/// Enumeration type over all errors that may be encountered when calling
/// methods on `Parser` types, or implementation-specific helper types for
/// `Parser` implementors.
#[derive(Debug)]
pub enum ParseError {
    /// Error class encountered when a consume operation would violate the
    /// bounds of the parse-buffer.
    Window(WindowError),
    /// Error class encountered when internal invariants or preconditions are
    /// violated.
    Internal(InternalError),
    /// Error class encountered when low-level parsing is successful but
    /// the resultant raw value cannot be converted into a legal value of
    /// a post-parse type.
    ///
    /// This class of error is the only one that can occur even after the
    /// corresponding parse operation is successful.
    External(ExternalError),
    /// Error class encountered when low-level parsing is unsuccessful due
    /// to a failure of expectation in terms of the binary-lexical contents
    /// of the buffer.
    ///
    /// This includes invalid tag-words, illegal words for four-byte
    /// booleans, and non-zero residue bytes in alignment padding.
    Token(TokenError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ParseError::Window(err) => Display::fmt(err, f),
            ParseError::Internal(err) => Display::fmt(err, f),
            ParseError::External(err) => Display::fmt(err, f),
            ParseError::Token(err) => Display::fmt(err, f),
        }
    }
}

impl From<Infallible> for ParseError {
    fn from(_: Infallible) -> Self {
        unreachable!()
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Window(err) => Some(err),
            ParseError::Internal(err) => Some(err),
            ParseError::External(err) => Some(err),
            ParseError::Token(err) => Some(err),
        }
    }
}

/// Type alias for Result with an error type of [`ParseError`]
///
/// Most `Parser` methods, some lower-level internal methods
/// used in parsing, and certain `Decode` methods have a return
/// type of `ParseResult<T>` for various `T`
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors related to the absolute bounds of the parse-buffer
///
/// A consume operation that would advance the parse-head beyond the final
/// byte of the buffer reports the offset it stood at, the number of bytes
/// it requested, and the limit it would have crossed, so that truncated
/// streams are diagnosable without access to the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// Error case when a method that attempts to consume some number
    /// of bytes from the buffer of a `Parser` would violate the
    /// end-of-buffer in doing so.
    ConsumeWouldExceedLimit {
        offset: usize,
        requested: usize,
        limit: usize,
    },
}

impl From<WindowError> for ParseError {
    fn from(err: WindowError) -> Self {
        Self::Window(err)
    }
}

impl Display for WindowError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            WindowError::ConsumeWouldExceedLimit {
                offset,
                requested,
                limit,
            } => write!(
                f,
                "consume of {requested} bytes at offset {offset} would exceed limit of {limit}"
            ),
        }
    }
}

impl Error for WindowError {}

/// Errors reported when internal invariants or preconditions of the
/// parsing machinery are violated.
///
/// Encountering any of these cases indicates an implementation bug in this
/// crate rather than malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalError {
    /// A slice of statically known length could not be coerced to an array
    /// of that same length.
    SliceCoerceFailure,
    /// A tag-validation call was made with an empty set of valid tags.
    NoValidTags,
}

impl From<InternalError> for ParseError {
    fn from(err: InternalError) -> Self {
        Self::Internal(err)
    }
}

impl Display for InternalError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            InternalError::SliceCoerceFailure => {
                write!(f, "failed to coerce known-length slice into array")
            }
            InternalError::NoValidTags => {
                write!(f, "tag-word validation attempted with no valid tags")
            }
        }
    }
}

impl Error for InternalError {}

/// Errors in which low-level parsing succeeded, but the raw value could
/// not be converted into a legal value of the target type.
#[derive(Debug)]
pub enum ExternalError {
    /// Byte-width invariant of the target type violated
    Width(WidthError),
    /// Element-count invariant of the target type violated
    Length(LengthError),
    /// Numeric range invariant of the target type violated
    Bounds(BoundsError<i64>),
    /// Arbitrary-precision conversion of the parsed value failed
    Math(crate::int::MathError),
    /// Parsed bytes were not valid UTF-8 for a string-typed target
    Utf8(FromUtf8Error),
}

impl From<ExternalError> for ParseError {
    fn from(err: ExternalError) -> Self {
        Self::External(err)
    }
}

impl From<WidthError> for ParseError {
    fn from(err: WidthError) -> Self {
        Self::External(ExternalError::Width(err))
    }
}

impl From<LengthError> for ParseError {
    fn from(err: LengthError) -> Self {
        Self::External(ExternalError::Length(err))
    }
}

impl From<BoundsError<i64>> for ParseError {
    fn from(err: BoundsError<i64>) -> Self {
        Self::External(ExternalError::Bounds(err))
    }
}

impl From<FromUtf8Error> for ParseError {
    fn from(err: FromUtf8Error) -> Self {
        Self::External(ExternalError::Utf8(err))
    }
}

impl From<crate::int::MathError> for ParseError {
    fn from(err: crate::int::MathError) -> Self {
        Self::External(ExternalError::Math(err))
    }
}

impl Display for ExternalError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ExternalError::Width(err) => Display::fmt(err, f),
            ExternalError::Length(err) => Display::fmt(err, f),
            ExternalError::Bounds(err) => Display::fmt(err, f),
            ExternalError::Math(err) => Display::fmt(err, f),
            ExternalError::Utf8(err) => Display::fmt(err, f),
        }
    }
}

impl Error for ExternalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExternalError::Width(err) => Some(err),
            ExternalError::Length(err) => Some(err),
            ExternalError::Bounds(err) => Some(err),
            ExternalError::Math(err) => Some(err),
            ExternalError::Utf8(err) => Some(err),
        }
    }
}

/// Errors in which the binary-lexical contents of the buffer failed an
/// expectation of the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// A four-byte boolean word held a value other than `0` or `1`
    InvalidBoolean(u32),
    /// A discriminant word was not in the valid set for its target type
    InvalidTag {
        actual: i32,
        for_type: &'static str,
        valid: &'static [i32],
    },
    /// Alignment padding contained one or more non-zero bytes
    NonZeroPadding { padding: Vec<u8> },
}

impl From<TokenError> for ParseError {
    fn from(err: TokenError) -> Self {
        Self::Token(err)
    }
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            TokenError::InvalidBoolean(word) => {
                write!(f, "boolean word expected 0 or 1, found {word}")
            }
            TokenError::InvalidTag {
                actual,
                for_type,
                valid,
            } => write!(
                f,
                "discriminant {actual} not valid for `{for_type}` (valid: {valid:?})"
            ),
            TokenError::NonZeroPadding { padding } => {
                write!(f, "non-zero bytes in alignment padding: {padding:?}")
            }
        }
    }
}

impl Error for TokenError {}

/// Converts a byte-slice of presumptively correct length into an array of
/// the same length, reporting an [`InternalError`] on mismatch.
///
/// As `Parser::consume` guarantees the length of the slices it yields,
/// a failure here is an implementation bug and not an input fault.
pub(crate) fn coerce_slice<const N: usize>(slice: &[u8]) -> ParseResult<[u8; N]> {
    let res: std::result::Result<[u8; N], TryFromSliceError> = slice.try_into();
    res.map_err(|_| InternalError::SliceCoerceFailure.into())
}
