//! Macros and traits for discriminated algebraic types
//!
//! The wire format expresses closed choices two ways: an *enumeration* is a
//! bare four-byte discriminant word drawn from a declared set, and a
//! *union* is a discriminant word followed by a payload whose type is
//! selected by the discriminant (its "arm"). Rather than dispatching
//! through runtime lookup tables, both constructs are modeled as ordinary
//! Rust enums, so that an out-of-set discriminant is impossible to
//! represent once decoding has succeeded, and an unhandled arm is a
//! compile-time error rather than a runtime fault.
//!
//! The [`xdr_enum!`] and [`xdr_union!`] macros generate the enum
//! definition together with its codec implementations; writing the
//! boilerplate by hand is never necessary for conforming types.

use std::fmt::Display;

/// Error reported when a symbolic name or discriminant index offered at
/// construction time does not select any variant of the target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// The rejected selector, rendered as text
    pub given: String,
    /// Name of the enumeration that rejected it
    pub for_type: &'static str,
}

impl Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "`{}` does not select a variant of {}",
            self.given, self.for_type
        )
    }
}

impl std::error::Error for UnknownVariant {}

/// Closed set of discriminant-indexed selections.
///
/// Implemented (via [`xdr_enum!`]) by every enumeration type; the dual
/// index/name addressing mirrors the two ways a selection is spelled in
/// the protocol's JSON and XDR renditions.
pub trait Enumeration: Sized + Copy {
    /// Every discriminant index in the declared set, in declaration order.
    const VALID: &'static [i32];

    /// Resolves a discriminant index to its selection.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVariant`] if `index` is not in [`VALID`](Self::VALID).
    fn from_index(index: i32) -> Result<Self, UnknownVariant>;

    /// Returns the discriminant index of this selection.
    fn index(&self) -> i32;

    /// Returns the symbolic name of this selection.
    fn name(&self) -> &'static str;

    /// Resolves a symbolic name to its selection.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVariant`] if `name` matches no declared variant.
    fn from_name(name: &str) -> Result<Self, UnknownVariant>;

    /// Compares this selection against a discriminant index.
    fn is_index(&self, index: i32) -> bool {
        self.index() == index
    }

    /// Compares this selection against a symbolic name.
    fn is_name(&self, name: &str) -> bool {
        self.name() == name
    }
}

/// Defines an enumeration type together with its codec implementations.
///
/// Expands to the enum itself (with explicit discriminants), an
/// [`Enumeration`] implementation, `FixedLength` (one discriminant word),
/// and `Encode`/`Decode` with tag validation: decoding a word outside the
/// declared set fails with a tag error naming the type and its valid set.
#[macro_export]
macro_rules! xdr_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $vname:ident = $vdisc:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        #[repr(i32)]
        $vis enum $name {
            $( $(#[$vmeta])* $vname = $vdisc ),+
        }

        impl $crate::adt::Enumeration for $name {
            const VALID: &'static [i32] = &[ $( $vdisc ),+ ];

            fn from_index(index: i32) -> ::std::result::Result<Self, $crate::adt::UnknownVariant> {
                match index {
                    $( $vdisc => Ok($name::$vname), )+
                    _ => Err($crate::adt::UnknownVariant {
                        given: index.to_string(),
                        for_type: ::std::stringify!($name),
                    }),
                }
            }

            fn index(&self) -> i32 {
                *self as i32
            }

            fn name(&self) -> &'static str {
                match self {
                    $( $name::$vname => ::std::stringify!($vname), )+
                }
            }

            fn from_name(name: &str) -> ::std::result::Result<Self, $crate::adt::UnknownVariant> {
                match name {
                    $( ::std::stringify!($vname) => Ok($name::$vname), )+
                    _ => Err($crate::adt::UnknownVariant {
                        given: name.to_owned(),
                        for_type: ::std::stringify!($name),
                    }),
                }
            }
        }

        impl $crate::conv::len::FixedLength for $name {
            const LEN: usize = 4;
        }

        impl $crate::conv::Encode for $name {
            fn write_to<U: $crate::conv::target::Target>(&self, buf: &mut U) -> usize {
                $crate::conv::Encode::write_to(&(*self as i32), buf)
            }
        }

        impl $crate::conv::Decode for $name {
            fn parse<P: $crate::parse::Parser>(p: &mut P) -> $crate::parse::ParseResult<Self> {
                match p.take_tagword::<Self>(<Self as $crate::adt::Enumeration>::VALID)? {
                    $( $vdisc => Ok($name::$vname), )+
                    _ => unreachable!(),
                }
            }
        }
    };
}

/// Defines a discriminated-union type together with its codec
/// implementations.
///
/// Each arm pairs a payload-carrying variant with the discriminant
/// selection (of the union's [`Enumeration`] type) that announces it on
/// the wire; valueless arms take `()` as their payload. Decoding first
/// validates the discriminant word against the enumeration's declared set,
/// then rejects validated discriminants that select no arm of this union,
/// so a missing arm surfaces as an explicit tag error rather than a
/// silent default.
#[macro_export]
macro_rules! xdr_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $disc:ty {
            $( $(#[$vmeta:meta])* $vname:ident ( $vty:ty ) = $dvar:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis enum $name {
            $( $(#[$vmeta])* $vname($vty) ),+
        }

        impl $name {
            /// Returns the discriminant selection announcing this arm.
            $vis fn discriminant(&self) -> $disc {
                match self {
                    $( $name::$vname(_) => $dvar, )+
                }
            }
        }

        impl $crate::conv::len::Estimable for $name {
            const KNOWN: Option<usize> = None;

            fn unknown(&self) -> usize {
                4 + match self {
                    $( $name::$vname(inner) =>
                        $crate::conv::len::Estimable::estimate(inner), )+
                }
            }
        }

        impl $crate::conv::Encode for $name {
            fn write_to<U: $crate::conv::target::Target>(&self, buf: &mut U) -> usize {
                (match self {
                    $( $name::$vname(inner) => {
                        $crate::conv::Encode::write_to(
                            &$crate::adt::Enumeration::index(&$dvar),
                            buf,
                        ) + $crate::conv::Encode::write_to(inner, buf)
                    } )+
                }) + $crate::conv::target::Target::resolve_zero(buf)
            }
        }

        impl $crate::conv::Decode for $name {
            fn parse<P: $crate::parse::Parser>(p: &mut P) -> $crate::parse::ParseResult<Self> {
                let tag = p.take_tagword::<Self>(
                    <$disc as $crate::adt::Enumeration>::VALID,
                )?;
                $(
                    if tag == $crate::adt::Enumeration::index(&$dvar) {
                        return Ok($name::$vname(<$vty as $crate::conv::Decode>::parse(p)?));
                    }
                )+
                Err($crate::parse::error::TokenError::InvalidTag {
                    actual: tag,
                    for_type: ::std::any::type_name::<Self>(),
                    valid: <$disc as $crate::adt::Enumeration>::VALID,
                }
                .into())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::Enumeration;
    use crate::conv::{Decode, Encode};
    use crate::parse::error::{ParseError, TokenError};

    xdr_enum! {
        /// Three-way test selection.
        pub enum Flavor {
            Plain = 0,
            Sour = 1,
            Bitter = 5,
        }
    }

    xdr_union! {
        /// Union exercising both valued and void arms.
        pub enum Tagged : Flavor {
            Plain(()) = Flavor::Plain,
            Sour(u32) = Flavor::Sour,
            Bitter(i64) = Flavor::Bitter,
        }
    }

    #[test]
    fn dual_addressing() {
        assert_eq!(Flavor::from_index(5).unwrap(), Flavor::Bitter);
        assert_eq!(Flavor::from_name("Sour").unwrap(), Flavor::Sour);
        assert!(Flavor::Sour.is_index(1));
        assert!(Flavor::Sour.is_name("Sour"));
        assert!(!Flavor::Sour.is_index(0));
        assert!(Flavor::from_index(2).is_err());
        assert!(Flavor::from_name("sour").is_err());
    }

    #[test]
    fn enum_codec() {
        assert_eq!(Flavor::Bitter.to_bytes(), vec![0, 0, 0, 5]);
        assert_eq!(Flavor::decode(vec![0u8, 0, 0, 1]), Flavor::Sour);
        assert!(matches!(
            Flavor::try_decode(vec![0u8, 0, 0, 2]),
            Err(crate::conv::DecodeError::Parse(ParseError::Token(
                TokenError::InvalidTag { actual: 2, .. }
            )))
        ));
    }

    #[test]
    fn union_codec() {
        let v = Tagged::Sour(77);
        assert_eq!(v.discriminant(), Flavor::Sour);
        assert_eq!(v.to_bytes(), vec![0, 0, 0, 1, 0, 0, 0, 77]);
        assert_eq!(Tagged::decode(v.to_bytes()), v);

        // void arm carries no payload bytes
        let plain = Tagged::Plain(());
        assert_eq!(plain.to_bytes(), vec![0, 0, 0, 0]);
        assert_eq!(Tagged::decode(vec![0u8, 0, 0, 0]), plain);
    }

    #[test]
    fn union_rejects_invalid_tag() {
        assert!(matches!(
            Tagged::try_decode(vec![0u8, 0, 0, 3]),
            Err(crate::conv::DecodeError::Parse(ParseError::Token(
                TokenError::InvalidTag { actual: 3, .. }
            )))
        ));
    }
}
