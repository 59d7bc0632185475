//! Scaled decimal asset amounts
//!
//! An asset amount on the wire is a raw 64-bit count of indivisible units
//! ("stroops"), while the human-facing rendition is a decimal numeral with
//! exactly seven fractional digits: one whole unit is `10_000_000` raw
//! units. [`ScaledAmount`] holds the raw count and converts losslessly in
//! both directions; its string form always carries the full seven-digit
//! fraction, so the maximum representable amount is
//! `"922337203685.4775807"`.
//!
//! Arbitrary-precision arithmetic backs the string conversion so that
//! overflow is detected exactly rather than saturating or wrapping.
//!
//! # Normalization
//!
//! [`Int64::normalize`] accepts any of the common spellings of an amount
//! and produces the raw count. The input treatment is deliberately
//! asymmetric and is relied upon by callers:
//!
//! * native integers are taken to be **already-descaled raw units**;
//! * strings are taken to be **human-scaled decimal amounts**, and pass
//!   through [`ScaledAmount`] parsing (comma separators stripped) before
//!   descaling.
//!
//! So `normalize(256)` is 256 raw units while `normalize("256")` is
//! 2_560_000_000.

use crate::conv::{len, target::Target, Decode, Encode};
use crate::int::{Int64, MathError};
use crate::parse::{ParseResult, Parser};
use num_bigint::BigInt;
#[cfg(feature = "serde_impls")]
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// Number of fractional digits in the canonical decimal rendition.
pub const SCALE: u32 = 7;

/// Raw units per whole asset unit.
pub const SCALE_FACTOR: i64 = 10_000_000;

/// Non-negative asset amount held as a raw unit count, rendered as a
/// decimal numeral with exactly [`SCALE`] fractional digits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct ScaledAmount(Int64);

#[cfg(feature = "serde_impls")]
impl Serialize for ScaledAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl ScaledAmount {
    /// Largest representable amount, `"922337203685.4775807"`.
    pub const MAX: ScaledAmount = ScaledAmount(Int64::MAX);

    /// Constructs a [`ScaledAmount`] from a raw unit count.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::NegativeAmount`] for a negative count.
    pub fn from_stroops(raw: Int64) -> Result<Self, MathError> {
        if raw.value() < 0 {
            Err(MathError::NegativeAmount {
                value: raw.to_big_int(),
            })
        } else {
            Ok(Self(raw))
        }
    }

    /// Returns the raw unit count of this amount.
    #[inline]
    #[must_use]
    pub const fn descale(&self) -> Int64 {
        self.0
    }

    /// Returns the canonical decimal rendition of this amount.
    #[must_use]
    pub fn to_amount_string(&self) -> String {
        self.to_string()
    }
}

/// Validates that `part` is a run of ASCII digits, distinguishing
/// numerals rejected outright from numerals that merely carry amount-illegal
/// decoration (an embedded sign, whitespace).
fn digits_only(part: &str, whole_input: &str) -> Result<BigInt, MathError> {
    if part.bytes().all(|b| b.is_ascii_digit()) {
        // a pure digit-run cannot fail to parse
        Ok(part.parse::<BigInt>()?)
    } else {
        match part.parse::<BigInt>() {
            Err(cause) => Err(MathError::Malformed { cause }),
            Ok(_) => Err(MathError::InvalidAmount {
                input: whole_input.to_owned(),
            }),
        }
    }
}

impl FromStr for ScaledAmount {
    type Err = MathError;

    /// Parses a decimal amount string.
    ///
    /// Comma thousands-separators are stripped before parsing. The
    /// fractional part may carry at most [`SCALE`] digits and is
    /// right-padded to exactly [`SCALE`]; the resulting raw count must be
    /// non-negative and within the 64-bit signed range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.chars().filter(|&c| c != ',').collect();
        let (negative, body) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.as_str()),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if frac_part.len() > SCALE as usize {
            return Err(MathError::ExcessPrecision {
                scale: SCALE,
                actual: frac_part.len(),
            });
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(MathError::InvalidAmount { input: s.to_owned() });
        }

        let whole = if int_part.is_empty() {
            BigInt::from(0)
        } else {
            digits_only(int_part, s)?
        };
        let frac = if frac_part.is_empty() {
            BigInt::from(0)
        } else {
            let mut padded = frac_part.to_owned();
            while padded.len() < SCALE as usize {
                padded.push('0');
            }
            digits_only(&padded, s)?
        };

        let raw = whole * BigInt::from(SCALE_FACTOR) + frac;
        if negative && raw != BigInt::from(0) {
            return Err(MathError::NegativeAmount { value: -raw });
        }
        Ok(Self(Int64::from_big_int(&raw)?))
    }
}

impl Display for ScaledAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let raw = self.0.value();
        write!(f, "{}.{:07}", raw / SCALE_FACTOR, raw % SCALE_FACTOR)
    }
}

impl len::FixedLength for ScaledAmount {
    const LEN: usize = 8;
}

impl Encode for ScaledAmount {
    /// Serializes the raw unit count as an eight-byte big-endian word.
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.0.write_to(buf)
    }
}

impl Decode for ScaledAmount {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let raw = Int64::parse(p)?;
        Ok(Self::from_stroops(raw).map_err(crate::parse::error::ParseError::from)?)
    }
}

/// Accepted input spellings for [`Int64::normalize`].
///
/// The variants capture the normalization asymmetry: native integers are
/// raw units, strings are human-scaled decimal amounts.
#[derive(Debug, Clone)]
pub enum AmountArg {
    /// An already-raw unit count
    Raw(Int64),
    /// A scaled amount, descaled on normalization
    Scaled(ScaledAmount),
    /// A native integer, treated as an already-raw unit count
    Native(i64),
    /// A decimal amount string, parsed and descaled on normalization
    Text(String),
}

impl From<Int64> for AmountArg {
    fn from(raw: Int64) -> Self {
        Self::Raw(raw)
    }
}

impl From<ScaledAmount> for AmountArg {
    fn from(amount: ScaledAmount) -> Self {
        Self::Scaled(amount)
    }
}

impl From<i64> for AmountArg {
    fn from(raw: i64) -> Self {
        Self::Native(raw)
    }
}

impl From<&str> for AmountArg {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for AmountArg {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Int64 {
    /// Normalizes any accepted amount spelling into a raw unit count.
    ///
    /// Integer input is passed through as raw units; string input is
    /// parsed as a scaled decimal amount and descaled. See the
    /// [module documentation](self) for the rationale of the asymmetry.
    ///
    /// # Errors
    ///
    /// Propagates [`MathError`] from amount-string parsing.
    pub fn normalize(arg: impl Into<AmountArg>) -> Result<Int64, MathError> {
        match arg.into() {
            AmountArg::Raw(raw) => Ok(raw),
            AmountArg::Scaled(amount) => Ok(amount.descale()),
            AmountArg::Native(raw) => Ok(Int64::of(raw)),
            AmountArg::Text(text) => Ok(text.parse::<ScaledAmount>()?.descale()),
        }
    }
}
