//! Convenience re-export of the names most consumers need
//!
//! Downstream code that works with this crate pervasively can glob-import
//! this module instead of naming each type and trait individually:
//!
//! ```
//! use lumen::prelude::*;
//!
//! let weight = UInt32::of(1).unwrap();
//! assert_eq!(weight.to_bytes(), vec![0, 0, 0, 1]);
//! ```

pub use crate::account::{
    AccountId, Addressable, CryptoKeyType, MuxedAccount, MuxedEd25519Account, PublicKey,
    PublicKeyType, SignedPayload, Signer, SignerArr, SignerKey, SignerKeyType, Signing,
    MAX_SIGNERS,
};
pub use crate::adt::{Enumeration, UnknownVariant};
pub use crate::amount::{AmountArg, ScaledAmount};
pub use crate::conv::{
    len::{Estimable, FixedLength},
    target::Target,
    Decode, DecodeError, DecodeResult, Encode, EncodeLength,
};
pub use crate::error::{BoundsError, LengthError, WidthError};
pub use crate::fixed::{FixedBytes, Thresholds, UInt256};
pub use crate::int::{Int32, Int64, MathError, UInt32, UInt64};
pub use crate::parse::{
    byteparser::ByteParser, error::ParseError, sliceparser::SliceParser, ParseResult, Parser,
    TryIntoParser,
};
pub use crate::schema::{
    BoundedBytes, BoundedString, Bytes, DataValue, String100, String28, String32, String64, Value,
};
pub use crate::seq::{FixArray, Sequence, VarArray};
pub use crate::strkey::{KeyError, VersionByte};
