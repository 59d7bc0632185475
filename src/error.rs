//! General error types
//!
//! This module contains the error types reported by schema constructs that
//! impose static invariants on their prospective values: byte-width limits,
//! element-count limits, and numeric range bounds. Errors specific to the
//! low-level parsing layer live in [`crate::parse::error`]; errors specific
//! to the string-key subsystem live in [`crate::strkey`].

use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Debug, Display};
use std::num::TryFromIntError;

/// Enumerated error type for failures related to schema constructs
/// that impose a check on the byte-width of their prospective values.
///
/// Structurally similar to [`LengthError`], an analogous error-type
/// relating to the number of elements in a collection-type, rather than
/// the number of bytes in a potentially opaque schema type.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum WidthError {
    /// Restriction on maximum byte-width exceeded
    TooWide { limit: usize, actual: usize },
    /// Requirement of precise byte-width not satisfied
    WrongWidth { exact: usize, actual: usize },
}

impl Display for WidthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidthError::TooWide { limit, actual } => {
                write!(f, "{actual}-byte value exceeded limit of {limit} bytes")
            }
            WidthError::WrongWidth { exact, actual } => {
                write!(
                    f,
                    "{actual}-byte value violated requirement of {exact} bytes"
                )
            }
        }
    }
}

impl Error for WidthError {}

/// Enumerated error type for failures related to schema constructs
/// that impose a check on the element-count of their prospective
/// values, which are typically collection types.
///
/// The [`TooLong`](LengthError::TooLong) case reports an oversized value
/// offered at construction time, while [`AtCapacity`](LengthError::AtCapacity)
/// reports an append against a collection already at its limit. The two are
/// deliberately distinct variants: the former is an argument fault, the
/// latter a mid-operation capacity fault.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum LengthError {
    /// Restriction on maximum element-count exceeded
    TooLong { limit: usize, actual: usize },
    /// Requirement of precise element-count not satisfied
    WrongLength { exact: usize, actual: usize },
    /// Append attempted against a collection holding `limit` elements
    AtCapacity { limit: usize },
    /// Index-based access beyond the final populated index
    IndexOutOfBounds { index: usize, len: usize },
}

impl Display for LengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthError::TooLong { limit, actual } => {
                write!(
                    f,
                    "{actual}-element value exceeded limit of {limit} elements"
                )
            }
            LengthError::WrongLength { exact, actual } => {
                write!(
                    f,
                    "{actual}-element value violated requirement of {exact} elements"
                )
            }
            LengthError::AtCapacity { limit } => {
                write!(f, "push would overflow collection at capacity {limit}")
            }
            LengthError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
        }
    }
}

impl Error for LengthError {}

/// Error type representing invalidity of (numeric) values
/// based on an implicit lower and upper bound.
///
/// * `Underflow {..}` contains the illegal value in question, as well as the lower bound it falls below
/// * `Overflow {..}` contains the illegal value in question, as well as the upper bound it falls above
///
/// Because the source type of the value we are attempting to confine to the
/// range may be wider than the type used to represent the range bounds, a
/// generic type parameter `Ext` indicates the type encapsulating the values
/// of both the input and the range bounds; conversion into `Ext` must not
/// perturb relative ordering, hence the `PartialOrd` bound.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BoundsError<Ext: Debug> {
    Underflow { min: Ext, val: Ext },
    Overflow { max: Ext, val: Ext },
    Failed(TryFromIntError),
}

impl<Ext: Debug> From<Infallible> for BoundsError<Ext> {
    fn from(_void: Infallible) -> Self {
        match _void {}
    }
}

impl<Ext: Debug> From<TryFromIntError> for BoundsError<Ext> {
    fn from(err: TryFromIntError) -> Self {
        Self::Failed(err)
    }
}

impl<Ext: Debug> BoundsError<Ext> {
    /// Checks that a value `val` falls into the specified range `[min, max]`,
    /// returning `Ok(val)` if this condition holds.
    ///
    /// If `val < min`, returns `Err(BoundsError::Underflow { .. })`
    ///
    /// If `val > max`, returns `Err(BoundsError::Overflow { .. })`
    ///
    /// As the type of `val` can be different from the type of `min` and `max`,
    /// the comparison is handled by first converting all three values to
    /// the external numeric type `Ext`.
    pub fn restrict<T, U>(val: T, min: U, max: U) -> Result<T, Self>
    where
        Ext: PartialOrd + Copy,
        T: std::convert::TryInto<Ext> + Copy,
        U: Into<Ext>,
        BoundsError<Ext>: From<T::Error>,
    {
        let min_ext: Ext = min.into();
        let max_ext: Ext = max.into();
        let val_ext: Ext = val.try_into()?;
        if val_ext < min_ext {
            Err(Self::Underflow {
                min: min_ext,
                val: val_ext,
            })
        } else if val_ext > max_ext {
            Err(Self::Overflow {
                max: max_ext,
                val: val_ext,
            })
        } else {
            Ok(val)
        }
    }
}

impl<Ext: Debug + Display> Display for BoundsError<Ext> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsError::Underflow { ref min, ref val } => {
                write!(f, "provided value {} less than minimum bound {}", val, min)
            }
            BoundsError::Overflow { ref max, ref val } => {
                write!(
                    f,
                    "provided value {} greater than maximum bound {}",
                    val, max
                )
            }
            BoundsError::Failed(err) => {
                write!(f, "could not convert for bounds-checking: {}", err)
            }
        }
    }
}

impl<Ext: Display + Debug> std::error::Error for BoundsError<Ext> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restrict_bounds() {
        assert_eq!(
            BoundsError::<i64>::restrict(4_294_967_295i64, 0u32, u32::MAX),
            Ok(4_294_967_295i64)
        );
        assert!(matches!(
            BoundsError::<i64>::restrict(4_294_967_296i64, 0u32, u32::MAX),
            Err(BoundsError::Overflow { .. })
        ));
        assert!(matches!(
            BoundsError::<i64>::restrict(-1i64, 0u32, u32::MAX),
            Err(BoundsError::Underflow { .. })
        ));
    }

    #[test]
    fn capacity_is_not_too_long() {
        let cap = LengthError::AtCapacity { limit: 20 };
        let long = LengthError::TooLong {
            limit: 20,
            actual: 21,
        };
        assert_ne!(cap, long);
    }
}
