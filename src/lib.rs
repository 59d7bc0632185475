//! Model for representing and transcoding data types of the Stellar network
//!
//! # Overview
//!
//! This library serves as a backbone for client code that must hold Stellar
//! protocol values in memory and move them to and from the network's wire
//! format. Such code would normally require a great deal of boilerplate,
//! both for generic low-level serialization and deserialization tasks, and
//! for the invariant checks that keep illegal values from being
//! constructed in the first place.
//!
//! Rather than forcing every consumer to write bespoke structures and
//! logic for relatively ubiquitous patterns, `lumen` offers a centralized
//! implementation of common types and traits that allow transcoding
//! implementations to be assembled structurally: 'primitive' and
//! 'composite' types, which represent low-level data objects and functors,
//! form the core of each domain type, with discriminated enumerations and
//! unions supported via macros.
//!
//! The high-level traits [`Encode`] and [`Decode`] are the keystones of
//! the library. They respectively define methods for serialization and
//! deserialization of Rust-local analogues of Stellar protocol values, to
//! and from the XDR binary encoding scheme used on the wire and in the
//! Horizon API: big-endian throughout, with every item aligned to a
//! four-byte boundary by zero-valued residue bytes.
//!
//! # String-keys
//!
//! Alongside the binary codec, the [`strkey`] module implements the
//! human-readable rendition of keys and addresses: a typed version byte,
//! payload, and CRC16 checksum in unpadded Base32, recognizable by leading
//! character (`G` for account ids, `S` for seeds, `M` for muxed accounts,
//! and so on). The two subsystems meet in [`account`], where the concrete
//! key-bearing domain types live.
//!
//! # Background
//!
//! The XDR schemas of the Stellar protocol originate in the `stellar-core`
//! implementation and evolve with each protocol version; all constants,
//! parameters, and values that are defined and used within the Stellar
//! ecosystem, across various contexts and formats, originate as instances
//! of those schemas. For the purposes of writing any sort of client
//! library that interacts with such values, it is necessary to establish a
//! consistent and interoperable view of, at the very least, the subset of
//! data-types relevant to the library's intended functionality. This
//! library provides that view for the account, key, and primitive value
//! types, in a form that lets downstream consumers operate on them in
//! consistent and predictable ways.

pub mod account;
pub mod adt;
pub mod amount;
pub mod base32;
pub mod conv;
pub mod error;
pub mod fixed;
pub mod int;
pub mod parse;
pub mod prelude;
pub mod prim;
pub mod schema;
pub mod seq;
pub mod strkey;

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

pub use ::lazy_static::lazy_static;
