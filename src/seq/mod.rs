//! Ordered sequence types with wire-level length discipline
//!
//! The wire format distinguishes two array layouts. A *variable-length*
//! array announces its element count in a four-byte prefix and may hold
//! any count up to a declared bound; a *fixed-length* array has its count
//! fixed by the type and writes no prefix at all. This module provides
//! one type for each: [`VarArray<T, MAX>`](lim::VarArray) and
//! [`FixArray<T, N>`](fix::FixArray).
//!
//! Both are ordered, 0-indexed, and gap-free. Mutating operations follow
//! the value-semantics discipline of the rest of the crate: `with`
//! returns a new collection and leaves the receiver untouched, relying on
//! `Clone` for the deep copy.
//!
//! The unbounded alias [`Sequence<T>`] is a `VarArray` whose bound is the
//! maximum count the four-byte prefix can express.

pub mod fix;
pub mod lim;

pub use fix::FixArray;
pub use lim::VarArray;

/// Largest element count expressible in a four-byte count prefix.
pub const XDR_MAX_LEN: usize = u32::MAX as usize;

/// Variable-length sequence bounded only by the wire format itself.
pub type Sequence<T> = VarArray<T, XDR_MAX_LEN>;
