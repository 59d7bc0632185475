//! Core of the binary-conversion API
//!
//! This module contains definitions for the high-level transcoding traits
//! [`Encode`] and [`Decode`], which are motivationally equivalent to the
//! `Serialize` and `Deserialize` traits defined in `serde`.
//!
//! While a great deal of the underlying machinery of this crate is subject
//! to customization by end-users, such as the selection or novel definitions
//! of `Parser` and `Target` implementations, `Encode` and `Decode` serve as
//! the core of this library: every schema type in the crate reaches the wire
//! format through them, and any upstream consumer that does not use them
//! even indirectly will derive little benefit from this library.
//!
//! The sub-module [`len`], which defines `Estimable` and its refinement
//! [`FixedLength`](len::FixedLength), is a lesser feature of the runtime:
//! it is possible to code around it in certain places without much
//! side-effect, while `Encode` and `Decode` are fundamental.
//!
//! An additional submodule, [`target`], offers an abstraction along the
//! lines of [`std::io::Write`], namely the [`target::Target`] trait. This is
//! the dual to [`crate::parse::Parser`], acting as the generic bound for
//! serialization in the [`Encode::write_to`] method, among others.

use crate::parse::{ParseResult, Parser, TryIntoParser};

use self::target::Target;

pub mod error;
pub mod len;
pub mod target;

pub use error::{DecodeError, DecodeResult};

#[macro_export]
macro_rules! write_all_to {
    ($($x:expr),* $(,)? => $tgt:expr) => {
        { $( $x.write_to($tgt) + )* $crate::conv::target::Target::resolve_zero($tgt) }
    };
}

/// Trait for types that support serialization into the interoperable
/// big-endian, four-byte-aligned binary form
///
/// Implementing [`Encode`] can be as simple as providing a definition of the
/// required method [`write_to`](Encode::write_to), but for types that have
/// efficient overrides for the other default-implemented methods, such
/// optimizations are recommended as long as the implementations conform to
/// the specified invariants of each method.
pub trait Encode {
    /// Appends the serialized bytes of this value to a generic buffer,
    /// returning the exact number of bytes written
    ///
    /// Morally related to the trait method [`std::io::Write::write`], with
    /// the caveat that `write_to` should be infallible under almost all
    /// operating conditions, as well as being generic over any buffer that
    /// satisfies the trait-bound of [`Target`].
    ///
    /// The natural definition of this method is structurally inductive on
    /// the physical or virtual fields of the type in question.
    fn write_to<U: Target>(&self, buf: &mut U) -> usize;

    /// Appends the serialized bytes of this value to a monomorphized
    /// [`Vec<u8>`] buffer.
    ///
    /// This method is a specialized variant of [`write_to`](Encode::write_to)
    /// for `Vec<u8>` targets, that may be overridden if there is an efficient
    /// implementation for that specific case.
    #[inline]
    fn write_to_vec(&self, buf: &mut Vec<u8>) {
        let _ = self.write_to(buf);
    }

    /// Creates a new buffer and fills it with the serialized bytes of this value.
    #[must_use]
    #[inline]
    fn encode<U: Target>(&self) -> U {
        let mut buf: U = U::create();
        let _ = self.write_to::<U>(&mut buf);
        buf
    }

    /// Creates a [`Vec<u8>`] and fills it with the serialized bytes of this value.
    #[must_use]
    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to_vec(&mut buf);
        buf
    }

    /// Returns the lowercase hexadecimal rendition of the serialized bytes
    /// of this value.
    #[must_use]
    fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Returns the standard-alphabet base64 rendition of the serialized
    /// bytes of this value.
    #[must_use]
    fn to_base64(&self) -> String {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD.encode(self.to_bytes())
    }
}

/// Extension trait for `Encode` that makes use of serialization-length oracles
///
/// This trait defines additional methods on an `Encode` type, which can
/// determine the exact number of bytes in the serialized version of a value
/// without requiring allocations, as well as an optimization of
/// [`Encode::to_bytes`] that makes use of this prediction to avoid
/// reallocation costs.
pub trait EncodeLength: Encode {
    /// Computes, without allocation, the number of bytes in the serialized
    /// form of `self`, based on the implementation of [`Encode::write_to`].
    ///
    /// The default implementation of this method invokes `write_to` over the
    /// zero-allocation target [`ByteCounter`](target::ByteCounter), whose
    /// return value is the number of bytes that were 'written'.
    #[must_use]
    #[inline]
    fn enc_len(&self) -> usize {
        self.write_to(&mut std::io::sink())
    }

    /// Pre-determines the exact number of bytes required to serialize
    /// `self`, and returns a `Vec<u8>` initialized to that capacity, which
    /// contains the serialized bytes of `self`
    ///
    /// Assuming that there is no inconsistency or error in the
    /// implementation of [`enc_len`](EncodeLength::enc_len), the default
    /// implementation of this method should perform zero reallocations while
    /// populating the novel vector.
    #[must_use]
    fn to_bytes_full(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.enc_len());
        self.write_to_vec(&mut buf);
        buf
    }
}

impl<T: Encode + len::Estimable + ?Sized> EncodeLength for T {
    fn enc_len(&self) -> usize {
        self.estimate()
    }
}

/// Trait providing methods for deserializing binary data into values of a
/// certain type
///
/// It is almost always expected that a type implementing `Decode` will also
/// implement [`Encode`], although this is not enforced at any level except
/// in certain contexts, where both traits may appear as simultaneous bounds
/// on generic types.
///
/// Implementations are defined by one required method, [`parse`](Decode::parse),
/// which attempts to consume the contextually appropriate number of bytes
/// from a [`Parser`] type, either returning a valid value of the
/// implementing type that was interpreted from the consumed sequence, or an
/// error if parsing either failed, or yielded a value that was determined
/// to be invalid.
pub trait Decode {
    /// Attempt to consume and interpret a value of type `Self` from an
    /// existing `Parser` object over a binary buffer.
    ///
    /// # Errors
    ///
    /// In most cases, the errors returned by this method will be propagated
    /// from calls made to [`Parser`] methods in the implementation logic.
    ///
    /// In rare cases, it may be necessary to return newly minted
    /// `ParseError` values based on certain invariants of the type being
    /// parsed.
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self>
    where
        Self: Sized;

    /// Attempt to decode a value of the `Self` type from a value `input` of
    /// the generic type `U: TryIntoParser`, using [`ByteParser`] internally.
    ///
    /// A decoded value must account for its entire buffer: any unconsumed
    /// bytes left over after the parse are reported as
    /// [`DecodeError::NonEmpty`].
    ///
    /// [`ByteParser`]: crate::parse::byteparser::ByteParser
    fn try_decode<U>(input: U) -> DecodeResult<Self>
    where
        Self: Sized,
        U: TryIntoParser,
    {
        Self::try_decode_with::<U, crate::parse::byteparser::ByteParser>(input)
    }

    /// Attempt to decode a value of the `Self` type through an explicitly
    /// chosen `Parser` implementation, for callers that want borrowed-input
    /// parsing via [`SliceParser`] or a custom parser type.
    ///
    /// [`SliceParser`]: crate::parse::sliceparser::SliceParser
    fn try_decode_with<U, P>(input: U) -> DecodeResult<Self>
    where
        Self: Sized,
        P: Parser,
        U: TryIntoParser<P>,
    {
        let mut p: P = input.try_into_parser()?;
        let ret = Self::parse(&mut p)?;
        match p.remainder() {
            0 => Ok(ret),
            residual => Err(DecodeError::NonEmpty { residual }),
        }
    }

    /// Attempt to decode a value of the `Self` type from its base64
    /// rendition, the conventional interchange format for serialized values
    /// in API payloads.
    fn try_decode_base64(input: &str) -> DecodeResult<Self>
    where
        Self: Sized,
    {
        use base64::Engine as _;
        let raw: Vec<u8> = base64::engine::general_purpose::STANDARD.decode(input)?;
        Self::try_decode(raw)
    }

    /// Decodes a value of type `Self` from a value `input` of the generic
    /// type `U: TryIntoParser`, using [`ByteParser`] as the `Parser` type
    /// internally.
    ///
    /// # Panics
    ///
    /// This method will panic if the interior call to
    /// [`try_decode`](Decode::try_decode) returns an `Err(_)` value.
    ///
    /// [`ByteParser`]: crate::parse::byteparser::ByteParser
    fn decode<U>(inp: U) -> Self
    where
        Self: Sized,
        U: TryIntoParser,
    {
        Self::try_decode(inp).unwrap_or_else(|err| {
            panic!(
                "<{} as Decode>::decode encountered error: {:?}",
                std::any::type_name::<Self>(),
                err
            )
        })
    }
}

impl<T: Encode> Encode for Option<T> {
    /// Serializes a four-byte presence flag, followed by the payload only
    /// when one is present.
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        (match self {
            Some(val) => buf.push_many(1u32.to_be_bytes()) + val.write_to(buf),
            None => buf.push_many(0u32.to_be_bytes()),
        }) + crate::resolve_zero!(buf)
    }
}

impl<T: Decode> Decode for Option<T> {
    /// Reads the four-byte presence flag, and reads the payload only when
    /// the flag is set.
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        if p.take_bool()? {
            Ok(Some(T::parse(p)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn optional_presence_flag() {
        assert_eq!(Some(7u32).to_bytes(), vec![0, 0, 0, 1, 0, 0, 0, 7]);
        assert_eq!(None::<u32>.to_bytes(), vec![0, 0, 0, 0]);
        assert_eq!(
            Option::<u32>::try_decode(vec![0u8, 0, 0, 0]).unwrap(),
            None
        );
        assert_eq!(
            Option::<u32>::try_decode(vec![0u8, 0, 0, 1, 0, 0, 0, 7]).unwrap(),
            Some(7)
        );
    }

    #[test]
    fn trailing_bytes_rejected() {
        assert!(matches!(
            u32::try_decode(vec![0u8, 0, 0, 1, 9]),
            Err(DecodeError::NonEmpty { residual: 1 })
        ));
    }

    #[test]
    fn base64_rendition() {
        assert_eq!(0u32.to_base64(), "AAAAAA==");
        assert_eq!(u32::try_decode_base64("AAAAAA==").unwrap(), 0);
    }
}
