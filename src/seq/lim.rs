//! Variable-length sequence with a bounded element count
//!
//! This module defines [`VarArray<T, MAX>`], the schema construct for
//! sequences holding no more than `MAX` elements of type `T`, serialized
//! with a four-byte count prefix.
//!
//! Over-saturated values cannot be constructed through the public surface:
//! construction from an oversized source fails with
//! [`LengthError::TooLong`], and appending to a saturated sequence fails
//! with [`LengthError::AtCapacity`]. The two error cases are deliberately
//! distinct so callers can tell an oversized argument from a capacity
//! fault detected mid-operation.

use crate::conv::{len::Estimable, target::Target, Decode, Encode};
use crate::error::LengthError;
use crate::parse::{ParseResult, Parser};
use std::convert::TryFrom;
use std::ops::Deref;

/// Sequence type holding at most `MAX` elements of type `T`, serialized
/// with a four-byte count prefix.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct VarArray<T, const MAX: usize>(Vec<T>);

impl<T, const MAX: usize> VarArray<T, MAX> {
    /// Maximum permitted element count.
    pub const LIMIT: usize = MAX;

    /// Constructs a new, empty `VarArray<T, MAX>`
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of elements currently held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no elements are held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attempt to add an element to the end of the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError::AtCapacity`] if `self.len() == MAX` already.
    pub fn try_push(&mut self, value: T) -> Result<(), LengthError> {
        if self.0.len() < MAX {
            self.0.push(value);
            Ok(())
        } else {
            Err(LengthError::AtCapacity { limit: MAX })
        }
    }

    /// Borrows the element at `index`, if populated.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// Returns a copy of the element at `index`, or `default` when the
    /// index is unpopulated.
    #[must_use]
    pub fn get_or(&self, index: usize, default: T) -> T
    where
        T: Clone,
    {
        self.0.get(index).cloned().unwrap_or(default)
    }

    /// Returns a new sequence with the element at `index` replaced by
    /// `value`, leaving the receiver untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError::IndexOutOfBounds`] if `index` is unpopulated.
    pub fn with(&self, index: usize, value: T) -> Result<Self, LengthError>
    where
        T: Clone,
    {
        if index < self.0.len() {
            let mut contents = self.0.clone();
            contents[index] = value;
            Ok(Self(contents))
        } else {
            Err(LengthError::IndexOutOfBounds {
                index,
                len: self.0.len(),
            })
        }
    }

    /// Destructs a `VarArray<T, MAX>` into a `Vec<T>` with the same contents.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    /// Borrows the contents as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T, const MAX: usize> Default for VarArray<T, MAX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const MAX: usize> From<VarArray<T, MAX>> for Vec<T> {
    fn from(val: VarArray<T, MAX>) -> Self {
        val.into_vec()
    }
}

impl<T, const MAX: usize> IntoIterator for VarArray<T, MAX> {
    type Item = T;

    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: 'a, const MAX: usize> IntoIterator for &'a VarArray<T, MAX> {
    type Item = &'a T;

    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T, const MAX: usize> Deref for VarArray<T, MAX> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T, const MAX: usize> TryFrom<Vec<T>> for VarArray<T, MAX> {
    type Error = LengthError;

    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        if MAX < value.len() {
            Err(LengthError::TooLong {
                limit: MAX,
                actual: value.len(),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl<T, const MAX: usize> TryFrom<&'_ [T]> for VarArray<T, MAX>
where
    T: Clone,
{
    type Error = LengthError;

    fn try_from(slice: &[T]) -> Result<Self, Self::Error> {
        Self::try_from(slice.to_vec())
    }
}

impl<T: Estimable, const MAX: usize> Estimable for VarArray<T, MAX> {
    const KNOWN: Option<usize> = None;

    fn unknown(&self) -> usize {
        4 + self.0.iter().map(Estimable::estimate).sum::<usize>()
    }
}

impl<T: Encode, const MAX: usize> Encode for VarArray<T, MAX> {
    /// Serializes the element count as a four-byte word, followed by each
    /// element in order.
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many((self.0.len() as u32).to_be_bytes())
            + self.0.iter().map(|item| item.write_to(buf)).sum::<usize>()
            + buf.resolve_zero()
    }
}

impl<T, const MAX: usize> Decode for VarArray<T, MAX>
where
    T: Decode,
{
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let count = p.take_u32()? as usize;
        if count > MAX {
            return Err(LengthError::TooLong {
                limit: MAX,
                actual: count,
            }
            .into());
        }
        let mut contents = Vec::with_capacity(count.min(p.remainder()));
        for _ in 0..count {
            contents.push(T::parse(p)?);
        }
        Ok(Self(contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Four = VarArray<u32, 4>;

    #[test]
    fn construction_bound() {
        assert!(Four::try_from(vec![1, 2, 3, 4]).is_ok());
        assert!(matches!(
            Four::try_from(vec![1, 2, 3, 4, 5]),
            Err(LengthError::TooLong {
                limit: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn push_capacity_fault_is_distinct() {
        let mut arr = Four::try_from(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(arr.try_push(5), Err(LengthError::AtCapacity { limit: 4 }));
        let mut partial = Four::try_from(vec![1]).unwrap();
        assert_eq!(partial.try_push(2), Ok(()));
        assert_eq!(partial.len(), 2);
    }

    #[test]
    fn with_replaces_without_mutation() {
        let arr = Four::try_from(vec![1, 2, 3]).unwrap();
        let other = arr.with(1, 9).unwrap();
        assert_eq!(other.as_slice(), &[1, 9, 3]);
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
        assert!(matches!(
            arr.with(3, 9),
            Err(LengthError::IndexOutOfBounds { index: 3, len: 3 })
        ));
    }

    #[test]
    fn get_with_default() {
        let arr = Four::try_from(vec![1, 2]).unwrap();
        assert_eq!(arr.get_or(0, 99), 1);
        assert_eq!(arr.get_or(5, 99), 99);
    }

    #[test]
    fn count_prefixed_codec() {
        let arr = Four::try_from(vec![1u32, 2]).unwrap();
        assert_eq!(arr.to_bytes(), vec![0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 2]);
        assert_eq!(Four::decode(arr.to_bytes()), arr);
        assert_eq!(Four::new().to_bytes(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn decode_rejects_oversized_count() {
        let wire = vec![0, 0, 0, 5, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0, 5];
        assert!(Four::try_decode(wire).is_err());
    }
}
