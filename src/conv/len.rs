//! Oracle for the exact byte-length of the serialized form of a value
//!
//! This module contains the [`FixedLength`] and [`Estimable`] pair of
//! traits, with `FixedLength` the maximal refinement of `Estimable`.
//!
//! `FixedLength` requires the definition of only one item, an associated
//! constant `LEN`, equal to the exact and invariant number of bytes in the
//! serialized form of all possible values of a particular type. In the wire
//! format this crate models, that covers the zero-width `()`, the four-byte
//! words (`bool`, `i32`, `u32`), the eight-byte words (`i64`, `u64`),
//! discriminated enumerations, and fixed opaque runs (content plus
//! alignment residue).
//!
//! `Estimable` covers the general case of variable-width serialization,
//! and is blanket-implemented for every `FixedLength` type. It is only
//! necessary to define the most specific refinement for a custom type for
//! all `Estimable` trait bounds to be satisfiable.

use crate::parse::padding_of;

/// Trait marking a type as having an invariant-length serialized form
pub trait FixedLength {
    /// Invariant byte-length of the serialized forms of all possible values of `Self`
    const LEN: usize;
}

macro_rules! fix_length {
    ($n:expr, $($x:ty),+) => {
        $(impl FixedLength for $x {
            const LEN : usize = $n;
        })+
    };
}

fix_length!(0, ());
fix_length!(4, bool, u32, i32);
fix_length!(8, i64, u64);

impl<T: FixedLength, const N: usize> FixedLength for [T; N] {
    const LEN: usize = N * T::LEN;
}

/// Trait for determining the precise number of bytes in the serialized
/// form of a value, without serializing it.
///
/// Most implementations are either derived structurally from the fields of
/// the implementing type, or inherited from [`FixedLength`] via the blanket
/// implementation.
pub trait Estimable {
    /// Statically-determined size (in bytes) of the serialized form of
    /// values of this type, or `None` if value-dependent.
    const KNOWN: Option<usize>;

    /// Computes the serialized size of `self` when it cannot be known
    /// statically.
    fn unknown(&self) -> usize;

    /// Returns the exact byte-length of the serialized form of `self`.
    #[inline]
    fn estimate(&self) -> usize {
        Self::KNOWN.unwrap_or_else(|| self.unknown())
    }
}

impl<T: FixedLength> Estimable for T {
    const KNOWN: Option<usize> = Some(T::LEN);

    #[inline]
    fn unknown(&self) -> usize {
        T::LEN
    }
}

impl<T: Estimable> Estimable for Option<T> {
    const KNOWN: Option<usize> = None;

    fn unknown(&self) -> usize {
        match self {
            Some(x) => 4 + x.estimate(),
            None => 4,
        }
    }
}

/// Serialized width of a variable-length opaque run of `n` content bytes:
/// four-byte length prefix, content, alignment residue.
pub const fn var_opaque_len(n: usize) -> usize {
    4 + n + padding_of(n)
}

/// Serialized width of a fixed-length opaque run of `n` content bytes:
/// content plus alignment residue, no prefix.
pub const fn fixed_opaque_len(n: usize) -> usize {
    n + padding_of(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_lengths() {
        assert_eq!(<bool as FixedLength>::LEN, 4);
        assert_eq!(<i64 as FixedLength>::LEN, 8);
        assert_eq!(var_opaque_len(0), 4);
        assert_eq!(var_opaque_len(5), 12);
        assert_eq!(var_opaque_len(8), 12);
        assert_eq!(fixed_opaque_len(32), 32);
        assert_eq!(fixed_opaque_len(5), 8);
    }

    #[test]
    fn option_estimate() {
        assert_eq!(Some(0u32).estimate(), 8);
        assert_eq!(None::<u32>.estimate(), 4);
    }
}
