//! Codec implementations for primitive Rust types
//!
//! The wire format represents every primitive as a big-endian word of
//! four or eight bytes: booleans and 32-bit integers occupy one word,
//! 64-bit integers two. The zero-width unit type is included for use as
//! the payload of valueless union arms.

use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseResult, Parser};

impl Encode for () {
    fn write_to<U: Target>(&self, _: &mut U) -> usize {
        0
    }

    #[inline(always)]
    fn write_to_vec(&self, _: &mut Vec<u8>) {}

    fn encode<U: Target>(&self) -> U {
        U::create()
    }

    #[inline(always)]
    fn to_bytes(&self) -> Vec<u8> {
        Vec::new()
    }
}

impl Decode for () {
    #[inline]
    fn parse<P: Parser>(_: &mut P) -> ParseResult<()> {
        Ok(())
    }
}

impl Encode for bool {
    /// Serializes `true` as a word-value of `1` and `false` as `0`.
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many((*self as u32).to_be_bytes()) + crate::resolve_zero!(buf)
    }
}

impl Decode for bool {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_bool()
    }
}

macro_rules! impl_encode_word {
    ( $( $t:ty ),+ ) => {
        $(
            impl Encode for $t {
                fn write_to<U: Target>(&self, buf: &mut U) -> usize {
                    buf.push_many(self.to_be_bytes()) + crate::resolve_zero!(buf)
                }
            }
        )+
    };
}

impl_encode_word!(u32, i32, u64, i64);

impl Decode for u32 {
    #[inline]
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_u32()
    }
}

impl Decode for i32 {
    #[inline]
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_i32()
    }
}

impl Decode for u64 {
    #[inline]
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_u64()
    }
}

impl Decode for i64 {
    #[inline]
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_i64()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn unit_zero_width() {
        assert_eq!(().to_bytes(), Vec::<u8>::new());
        assert_eq!((), <()>::decode(Vec::<u8>::new()));
    }

    #[test]
    fn bool_word() {
        assert_eq!(true.to_bytes(), vec![0, 0, 0, 1]);
        assert_eq!(false.to_bytes(), vec![0, 0, 0, 0]);
        assert!(bool::decode(vec![0u8, 0, 0, 1]));
    }

    #[test]
    fn words_round_trip() {
        assert_eq!(u32::decode(0xdead_beefu32.to_bytes()), 0xdead_beef);
        assert_eq!(i32::decode((-2i32).to_bytes()), -2);
        assert_eq!(u64::decode(u64::MAX.to_bytes()), u64::MAX);
        assert_eq!(i64::decode(i64::MIN.to_bytes()), i64::MIN);
    }
}
