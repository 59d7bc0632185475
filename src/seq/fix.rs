//! Sequence-type with a type-level fixed element count
//!
//! This module defines [`FixArray<T, N>`], the schema construct for
//! sequences holding exactly `N` elements of type `T`. As the count is
//! fixed by the type, the wire image carries no count prefix: it is the
//! `N` element encodings and nothing else.

use crate::conv::{len::Estimable, target::Target, Decode, Encode};
use crate::error::LengthError;
use crate::parse::{ParseResult, Parser};
use std::convert::TryFrom;
use std::ops::Deref;

/// Sequence type holding exactly `N` elements of type `T`, serialized
/// without a count prefix.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct FixArray<T, const N: usize>([T; N]);

impl<T, const N: usize> FixArray<T, N> {
    /// Exact element count.
    pub const LENGTH: usize = N;

    /// Wraps an array of exactly `N` elements.
    #[inline]
    #[must_use]
    pub fn from_array(contents: [T; N]) -> Self {
        Self(contents)
    }

    /// Returns the number of elements held; always equal to `N`.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns `true` only for the degenerate `N == 0` instantiation.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Borrows the element at `index`, if in range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// Returns a new sequence with the element at `index` replaced by
    /// `value`, leaving the receiver untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError::IndexOutOfBounds`] if `index >= N`.
    pub fn with(&self, index: usize, value: T) -> Result<Self, LengthError>
    where
        T: Clone,
    {
        if index < N {
            let mut contents = self.0.clone();
            contents[index] = value;
            Ok(Self(contents))
        } else {
            Err(LengthError::IndexOutOfBounds { index, len: N })
        }
    }

    /// Destructs the sequence into its backing array.
    #[inline]
    #[must_use]
    pub fn into_array(self) -> [T; N] {
        self.0
    }

    /// Borrows the contents as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T, const N: usize> From<[T; N]> for FixArray<T, N> {
    fn from(contents: [T; N]) -> Self {
        Self(contents)
    }
}

impl<T, const N: usize> TryFrom<Vec<T>> for FixArray<T, N> {
    type Error = LengthError;

    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        let actual = value.len();
        match <[T; N]>::try_from(value) {
            Ok(contents) => Ok(Self(contents)),
            Err(_) => Err(LengthError::WrongLength { exact: N, actual }),
        }
    }
}

impl<T, const N: usize> Deref for FixArray<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T, const N: usize> IntoIterator for FixArray<T, N> {
    type Item = T;

    type IntoIter = std::array::IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: 'a, const N: usize> IntoIterator for &'a FixArray<T, N> {
    type Item = &'a T;

    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Estimable, const N: usize> Estimable for FixArray<T, N> {
    const KNOWN: Option<usize> = {
        const fn scale(elem: Option<usize>, count: usize) -> Option<usize> {
            match elem {
                Some(k) => Some(k * count),
                None => None,
            }
        }
        scale(T::KNOWN, N)
    };

    fn unknown(&self) -> usize {
        self.0.iter().map(Estimable::estimate).sum()
    }
}

impl<T: Encode, const N: usize> Encode for FixArray<T, N> {
    /// Serializes the `N` elements in order, with no count prefix.
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.0.iter().map(|item| item.write_to(buf)).sum::<usize>() + buf.resolve_zero()
    }
}

impl<T, const N: usize> Decode for FixArray<T, N>
where
    T: Decode,
{
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let mut contents = Vec::with_capacity(N);
        for _ in 0..N {
            contents.push(T::parse(p)?);
        }
        match <[T; N]>::try_from(contents) {
            Ok(arr) => Ok(Self(arr)),
            Err(_) => Err(crate::parse::error::InternalError::SliceCoerceFailure.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Pair = FixArray<u32, 2>;

    #[test]
    fn no_count_prefix() {
        let arr = Pair::from_array([7, 8]);
        assert_eq!(arr.to_bytes(), vec![0, 0, 0, 7, 0, 0, 0, 8]);
        assert_eq!(Pair::decode(arr.to_bytes()), arr);
    }

    #[test]
    fn exact_length_construction() {
        assert!(Pair::try_from(vec![1, 2]).is_ok());
        assert!(matches!(
            Pair::try_from(vec![1]),
            Err(LengthError::WrongLength {
                exact: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn with_replaces_without_mutation() {
        let arr = Pair::from_array([1, 2]);
        let other = arr.with(0, 9).unwrap();
        assert_eq!(other.as_slice(), &[9, 2]);
        assert_eq!(arr.as_slice(), &[1, 2]);
    }

    #[test]
    fn known_width_for_fixed_elements() {
        assert_eq!(<Pair as Estimable>::KNOWN, Some(8));
    }
}
