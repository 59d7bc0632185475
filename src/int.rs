//! Integer newtypes with range-checked construction
//!
//! This module defines the four integer schema types: [`Int32`] and
//! [`UInt32`], serialized as single four-byte big-endian words, and
//! [`Int64`] and [`UInt64`], serialized as eight-byte big-endian words in
//! two's-complement form (so the high bytes of a negative value are `0xFF`
//! and those of a non-negative value are `0x00`).
//!
//! The 64-bit types additionally accept arbitrary-precision input: decimal
//! strings and [`BigInt`] values are admitted through range-checked
//! conversions, and every value can be lifted back into a `BigInt` for
//! arithmetic beyond the native width. Conversion failures are reported as
//! [`MathError`], carrying the original arbitrary-precision cause where one
//! exists.

use crate::conv::{len, target::Target, Decode, Encode};
use crate::error::BoundsError;
use crate::parse::{ParseResult, Parser};
use num_bigint::{BigInt, ParseBigIntError};
#[cfg(feature = "serde_impls")]
use serde::Serialize;
use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;

/// Error type for arbitrary-precision conversions that cannot produce a
/// legal value of the requested fixed-width type.
#[derive(Debug)]
pub enum MathError {
    /// The input string was not a legal decimal numeral
    Malformed { cause: ParseBigIntError },
    /// The converted value falls outside the representable range
    OutOfRange {
        min: BigInt,
        max: BigInt,
        value: BigInt,
    },
    /// A scaled amount was offered a negative value
    NegativeAmount { value: BigInt },
    /// A scaled amount declared more fractional digits than the scale holds
    ExcessPrecision { scale: u32, actual: usize },
    /// The input parsed as a numeral but is not a legal amount string
    InvalidAmount { input: String },
}

impl Display for MathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MathError::Malformed { cause } => {
                write!(f, "malformed decimal numeral: {cause}")
            }
            MathError::OutOfRange { min, max, value } => {
                write!(f, "value {value} outside representable range [{min}, {max}]")
            }
            MathError::NegativeAmount { value } => {
                write!(f, "amount {value} must be non-negative")
            }
            MathError::ExcessPrecision { scale, actual } => {
                write!(
                    f,
                    "{actual} fractional digits exceed the fixed scale of {scale}"
                )
            }
            MathError::InvalidAmount { input } => {
                write!(f, "`{input}` is not a valid amount string")
            }
        }
    }
}

impl std::error::Error for MathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MathError::Malformed { cause } => Some(cause),
            _ => None,
        }
    }
}

impl From<ParseBigIntError> for MathError {
    fn from(cause: ParseBigIntError) -> Self {
        Self::Malformed { cause }
    }
}

macro_rules! impl_word32 {
    ($name:ident, $native:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name($native);

        #[cfg(feature = "serde_impls")]
        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.0.serialize(serializer)
            }
        }

        impl $name {
            pub const MIN: $name = $name(<$native>::MIN);
            pub const MAX: $name = $name(<$native>::MAX);

            /// Constructs a value after checking that `value` falls within
            /// the declared range of this type.
            ///
            /// # Errors
            ///
            /// Returns [`BoundsError::Underflow`] or [`BoundsError::Overflow`]
            /// for out-of-range input.
            pub fn of(value: i64) -> Result<Self, BoundsError<i64>> {
                let checked =
                    BoundsError::<i64>::restrict(value, <$native>::MIN, <$native>::MAX)?;
                Ok(Self(checked as $native))
            }

            /// Returns the native representation of this value.
            #[inline]
            #[must_use]
            pub const fn value(&self) -> $native {
                self.0
            }
        }

        impl From<$native> for $name {
            fn from(value: $native) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $native {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl len::FixedLength for $name {
            const LEN: usize = 4;
        }

        impl Encode for $name {
            fn write_to<U: Target>(&self, buf: &mut U) -> usize {
                self.0.write_to(buf)
            }
        }

        impl Decode for $name {
            fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                Ok(Self(<$native>::parse(p)?))
            }
        }
    };
}

impl_word32!(
    Int32,
    i32,
    "Signed 32-bit integer, serialized as a four-byte big-endian word."
);
impl_word32!(
    UInt32,
    u32,
    "Unsigned 32-bit integer, serialized as a four-byte big-endian word."
);

macro_rules! impl_word64 {
    ($name:ident, $native:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name($native);

        #[cfg(feature = "serde_impls")]
        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.0.serialize(serializer)
            }
        }

        impl $name {
            pub const MIN: $name = $name(<$native>::MIN);
            pub const MAX: $name = $name(<$native>::MAX);

            /// Wraps a native value; the native type covers the full
            /// declared range, so no check is required.
            #[inline]
            #[must_use]
            pub const fn of(value: $native) -> Self {
                Self(value)
            }

            /// Returns the native representation of this value.
            #[inline]
            #[must_use]
            pub const fn value(&self) -> $native {
                self.0
            }

            /// Attempts to narrow an arbitrary-precision integer into this
            /// type's range.
            ///
            /// # Errors
            ///
            /// Returns [`MathError::OutOfRange`] when `big` does not fit.
            pub fn from_big_int(big: &BigInt) -> Result<Self, MathError> {
                match <$native>::try_from(big) {
                    Ok(value) => Ok(Self(value)),
                    Err(_) => Err(MathError::OutOfRange {
                        min: BigInt::from(<$native>::MIN),
                        max: BigInt::from(<$native>::MAX),
                        value: big.clone(),
                    }),
                }
            }

            /// Lifts this value into an arbitrary-precision integer.
            #[must_use]
            pub fn to_big_int(&self) -> BigInt {
                BigInt::from(self.0)
            }

            /// Returns the eight-byte big-endian two's-complement wire image
            /// of this value.
            #[inline]
            #[must_use]
            pub const fn to_be_bytes(&self) -> [u8; 8] {
                self.0.to_be_bytes()
            }

            /// Reconstructs a value from its eight-byte big-endian
            /// two's-complement wire image.
            #[inline]
            #[must_use]
            pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
                Self(<$native>::from_be_bytes(bytes))
            }
        }

        impl From<$native> for $name {
            fn from(value: $native) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $native {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<BigInt> for $name {
            type Error = MathError;

            fn try_from(big: BigInt) -> Result<Self, Self::Error> {
                Self::from_big_int(&big)
            }
        }

        impl FromStr for $name {
            type Err = MathError;

            /// Parses a decimal numeral of arbitrary precision, then narrows
            /// it into this type's range.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let big: BigInt = s.parse()?;
                Self::from_big_int(&big)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl len::FixedLength for $name {
            const LEN: usize = 8;
        }

        impl Encode for $name {
            fn write_to<U: Target>(&self, buf: &mut U) -> usize {
                self.0.write_to(buf)
            }
        }

        impl Decode for $name {
            fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                Ok(Self(<$native>::parse(p)?))
            }
        }
    };
}

impl_word64!(
    Int64,
    i64,
    "Signed 64-bit integer, serialized as an eight-byte big-endian two's-complement word."
);
impl_word64!(
    UInt64,
    u64,
    "Unsigned 64-bit integer, serialized as an eight-byte big-endian word."
);

#[cfg(test)]
mod word32_tests {
    use super::*;

    #[test]
    fn uint32_bounds() {
        assert_eq!(UInt32::of(4_294_967_295).unwrap().value(), u32::MAX);
        assert!(matches!(
            UInt32::of(4_294_967_296),
            Err(BoundsError::Overflow { .. })
        ));
        assert!(matches!(
            UInt32::of(-1),
            Err(BoundsError::Underflow { .. })
        ));
    }

    #[test]
    fn int32_bounds() {
        assert!(Int32::of(i32::MIN as i64).is_ok());
        assert!(Int32::of(i32::MAX as i64 + 1).is_err());
    }

    #[test]
    fn word_round_trip() {
        let v = UInt32::from(7u32);
        assert_eq!(v.to_bytes(), vec![0, 0, 0, 7]);
        assert_eq!(UInt32::decode(v.to_bytes()), v);
    }
}

#[cfg(test)]
mod word64_tests {
    use super::*;

    #[test]
    fn sign_extension() {
        assert_eq!(Int64::of(-256).to_base64(), "/////////wA=");
        assert_eq!(Int64::of(0).to_bytes(), vec![0u8; 8]);
        assert_eq!(
            Int64::of(-256).to_be_bytes(),
            [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00]
        );
    }

    #[test]
    fn bytes_round_trip() {
        for v in [i64::MIN, -1, 0, 1, i64::MAX] {
            let val = Int64::of(v);
            assert_eq!(Int64::from_be_bytes(val.to_be_bytes()), val);
            assert_eq!(Int64::decode(val.to_bytes()), val);
        }
    }

    #[test]
    fn big_int_narrowing() {
        let max = BigInt::from(u64::MAX);
        assert_eq!(UInt64::from_big_int(&max).unwrap().value(), u64::MAX);
        assert!(matches!(
            UInt64::from_big_int(&(max + 1)),
            Err(MathError::OutOfRange { .. })
        ));
        assert!(matches!(
            UInt64::from_big_int(&BigInt::from(-1)),
            Err(MathError::OutOfRange { .. })
        ));
    }

    #[test]
    fn string_parsing() {
        assert_eq!(
            "9223372036854775807".parse::<Int64>().unwrap(),
            Int64::MAX
        );
        assert!(matches!(
            "9223372036854775808".parse::<Int64>(),
            Err(MathError::OutOfRange { .. })
        ));
        assert!(matches!(
            "12a".parse::<Int64>(),
            Err(MathError::Malformed { .. })
        ));
    }
}
