//! Human-readable, checksummed key encoding
//!
//! A string-key is the text rendition of a typed byte-payload: a single
//! version byte announcing the key kind, the payload itself, and a
//! two-byte CRC16/XMODEM checksum (little-endian) over both, the whole
//! rendered in unpadded Base32. The version bytes are chosen so that each
//! kind is recognizable from the leading character of the rendition:
//!
//! | kind | leading char | version byte |
//! |---|---|---|
//! | account id (ed25519 public key) | `G` | `6 << 3` |
//! | seed (ed25519 secret material) | `S` | `18 << 3` |
//! | muxed account | `M` | `12 << 3` |
//! | pre-authorized transaction hash | `T` | `19 << 3` |
//! | SHA-256 hash | `X` | `23 << 3` |
//! | signed payload | `P` | `15 << 3` |
//!
//! Every version byte leaves its low three bits zero, which constrains
//! the second character of a well-formed rendition to `A`/`B`/`C`/`D`.
//!
//! A muxed account packs a 32-byte ed25519 key followed by a 64-bit
//! big-endian multiplexing id; a signed payload packs a 32-byte ed25519
//! key, a four-byte big-endian payload length, and the payload itself
//! zero-padded to a four-byte boundary.
//!
//! All operations here are pure functions over borrowed input; decoding
//! is strict, accepting only renditions that re-encode to the exact input
//! string.

use crate::base32;
use crate::error::WidthError;
use crate::parse::padding_of;
use std::fmt::Display;

/// Exact rendition length of the 32-byte-payload key kinds.
const RAW32_LEN: usize = 56;

/// Exact rendition length of a muxed account key.
const MUXED_LEN: usize = 69;

/// Inclusive rendition-length range of a signed-payload key.
const SIGNED_PAYLOAD_LEN: (usize, usize) = (56, 165);

/// Maximum width of the inner payload of a signed-payload key.
const SIGNED_PAYLOAD_MAX: usize = 64;

/// Typed version byte of a string-key, one per key kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VersionByte {
    /// Account id holding an ed25519 public key (`G...`)
    AccountId = 6 << 3,
    /// Seed holding ed25519 secret key material (`S...`)
    Seed = 18 << 3,
    /// Muxed account holding an ed25519 key and a multiplexing id (`M...`)
    MuxedAccount = 12 << 3,
    /// Pre-authorized transaction hash (`T...`)
    PreAuthTx = 19 << 3,
    /// SHA-256 hash, as used by hash-x signers (`X...`)
    Sha256Hash = 23 << 3,
    /// Ed25519 signed payload (`P...`)
    SignedPayload = 15 << 3,
}

impl VersionByte {
    /// Returns the raw version byte.
    #[inline]
    #[must_use]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Returns the leading character every rendition of this kind carries.
    #[must_use]
    pub const fn leading_char(self) -> char {
        match self {
            VersionByte::AccountId => 'G',
            VersionByte::Seed => 'S',
            VersionByte::MuxedAccount => 'M',
            VersionByte::PreAuthTx => 'T',
            VersionByte::Sha256Hash => 'X',
            VersionByte::SignedPayload => 'P',
        }
    }
}

/// Error type covering every way a string-key can fail to decode or
/// validate.
#[derive(Debug, PartialEq)]
pub enum KeyError {
    /// The rendition is not legal unpadded Base32
    Base32(data_encoding::DecodeError),
    /// The decoded content is too short to hold a version byte and checksum
    TooShort { actual: usize },
    /// The appended checksum does not match the recomputed one
    ChecksumMismatch,
    /// The version byte carries non-zero low bits
    InvalidVersionByte { byte: u8 },
    /// The version byte identifies a different key kind than requested
    VersionMismatch { expected: u8, actual: u8 },
    /// Re-encoding the decoded content does not reproduce the input
    NonCanonical,
    /// The rendition length is illegal for the requested key kind
    WrongLength {
        min: usize,
        max: usize,
        actual: usize,
    },
    /// The leading character identifies no key kind
    UnknownLeadingChar { found: Option<char> },
    /// A signed payload's declared width disagrees with its padded remainder
    PayloadLength { declared: usize, remainder: usize },
    /// A muxed address was offered where a plain account id is required
    AlreadyMuxed,
    /// Raw key material of the wrong width was offered
    Width(WidthError),
}

impl Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyError::Base32(err) => write!(f, "illegal base32 rendition: {err}"),
            KeyError::TooShort { actual } => {
                write!(f, "{actual}-byte content too short for version and checksum")
            }
            KeyError::ChecksumMismatch => write!(f, "checksum verification failed"),
            KeyError::InvalidVersionByte { byte } => {
                write!(f, "version byte {byte:#04x} carries non-zero low bits")
            }
            KeyError::VersionMismatch { expected, actual } => {
                write!(
                    f,
                    "version byte {actual:#04x} found where {expected:#04x} required"
                )
            }
            KeyError::NonCanonical => {
                write!(f, "rendition is not the canonical encoding of its content")
            }
            KeyError::WrongLength { min, max, actual } => {
                write!(
                    f,
                    "rendition length {actual} outside permitted range [{min}, {max}]"
                )
            }
            KeyError::UnknownLeadingChar { found: Some(c) } => {
                write!(f, "leading character `{c}` identifies no key kind")
            }
            KeyError::UnknownLeadingChar { found: None } => {
                write!(f, "empty string holds no key")
            }
            KeyError::PayloadLength {
                declared,
                remainder,
            } => write!(
                f,
                "declared payload width {declared} disagrees with {remainder}-byte padded remainder"
            ),
            KeyError::AlreadyMuxed => {
                write!(f, "account is already muxed")
            }
            KeyError::Width(err) => write!(f, "raw key material: {err}"),
        }
    }
}

impl std::error::Error for KeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeyError::Base32(err) => Some(err),
            KeyError::Width(err) => Some(err),
            _ => None,
        }
    }
}

impl From<data_encoding::DecodeError> for KeyError {
    fn from(err: data_encoding::DecodeError) -> Self {
        Self::Base32(err)
    }
}

impl From<WidthError> for KeyError {
    fn from(err: WidthError) -> Self {
        Self::Width(err)
    }
}

/// Encodes `payload` as a string-key of the given kind.
#[must_use]
pub fn encode(payload: &[u8], version: VersionByte) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + 2);
    data.push(version.byte());
    data.extend_from_slice(payload);
    let cksum = base32::checksum(&data);
    data.extend_from_slice(&cksum);
    base32::encode(&data)
}

/// Decodes a string-key of the given kind, returning its payload.
///
/// Validity requires that the checksum verifies, that the version byte
/// leaves its low three bits zero and matches the requested kind, and
/// that re-encoding the decoded content reproduces `key` exactly.
///
/// This function is the probing counterpart of the panicking conversions
/// elsewhere in the crate: the `Err` cases distinguish *malformed* input
/// from well-formed input of a different kind
/// ([`KeyError::VersionMismatch`]).
pub fn decode(key: &str, version: VersionByte) -> Result<Vec<u8>, KeyError> {
    let raw = base32::decode(key)?;
    if raw.len() < 3 {
        return Err(KeyError::TooShort { actual: raw.len() });
    }
    let (body, cksum) = raw.split_at(raw.len() - 2);
    if !base32::verify_checksum(body, cksum) {
        return Err(KeyError::ChecksumMismatch);
    }
    let ver = body[0];
    if ver & 0x07 != 0 {
        return Err(KeyError::InvalidVersionByte { byte: ver });
    }
    if ver != version.byte() {
        return Err(KeyError::VersionMismatch {
            expected: version.byte(),
            actual: ver,
        });
    }
    if base32::encode(&raw) != key {
        return Err(KeyError::NonCanonical);
    }
    Ok(body[1..].to_vec())
}

/// Returns `true` if `key` passes [`check_validity`] for the given kind.
#[must_use]
pub fn is_valid(key: &str, version: VersionByte) -> bool {
    check_validity(key, version).is_ok()
}

/// Validates a string-key of the given kind, additionally enforcing the
/// kind's exact rendition length and, for signed payloads, the agreement
/// of the declared inner-payload width with the padded remainder.
pub fn check_validity(key: &str, version: VersionByte) -> Result<(), KeyError> {
    let (min, max) = match version {
        VersionByte::MuxedAccount => (MUXED_LEN, MUXED_LEN),
        VersionByte::SignedPayload => SIGNED_PAYLOAD_LEN,
        _ => (RAW32_LEN, RAW32_LEN),
    };
    if key.len() < min || key.len() > max {
        return Err(KeyError::WrongLength {
            min,
            max,
            actual: key.len(),
        });
    }
    let content = decode(key, version)?;
    if version == VersionByte::SignedPayload {
        if content.len() < 36 {
            return Err(KeyError::PayloadLength {
                declared: 0,
                remainder: content.len(),
            });
        }
        let declared =
            u32::from_be_bytes([content[32], content[33], content[34], content[35]]) as usize;
        let remainder = content.len() - 36;
        if declared == 0
            || declared > SIGNED_PAYLOAD_MAX
            || declared + padding_of(declared) != remainder
        {
            return Err(KeyError::PayloadLength {
                declared,
                remainder,
            });
        }
    }
    Ok(())
}

/// Identifies the key kind of `key` from its leading character alone.
///
/// # Errors
///
/// Returns [`KeyError::UnknownLeadingChar`] for an empty string or a
/// leading character outside the kind table.
pub fn key_kind(key: &str) -> Result<VersionByte, KeyError> {
    match key.chars().next() {
        Some('G') => Ok(VersionByte::AccountId),
        Some('S') => Ok(VersionByte::Seed),
        Some('M') => Ok(VersionByte::MuxedAccount),
        Some('T') => Ok(VersionByte::PreAuthTx),
        Some('X') => Ok(VersionByte::Sha256Hash),
        Some('P') => Ok(VersionByte::SignedPayload),
        found => Err(KeyError::UnknownLeadingChar { found }),
    }
}

/// Narrows decoded payload bytes to the exact 32-byte width shared by the
/// raw-key kinds.
fn exact32(content: Vec<u8>) -> Result<[u8; 32], KeyError> {
    <[u8; 32]>::try_from(content.as_slice()).map_err(|_| {
        KeyError::Width(WidthError::WrongWidth {
            exact: 32,
            actual: content.len(),
        })
    })
}

/// Encodes a 32-byte ed25519 public key as an account id (`G...`).
#[must_use]
pub fn encode_account_id(ed25519: &[u8; 32]) -> String {
    encode(ed25519, VersionByte::AccountId)
}

/// Decodes an account id (`G...`) to its 32-byte ed25519 public key.
pub fn decode_account_id(key: &str) -> Result<[u8; 32], KeyError> {
    check_validity(key, VersionByte::AccountId)?;
    exact32(decode(key, VersionByte::AccountId)?)
}

/// Encodes 32 bytes of ed25519 secret key material as a seed (`S...`).
#[must_use]
pub fn encode_seed(seed: &[u8; 32]) -> String {
    encode(seed, VersionByte::Seed)
}

/// Decodes a seed (`S...`) to its 32 bytes of secret key material.
pub fn decode_seed(key: &str) -> Result<[u8; 32], KeyError> {
    check_validity(key, VersionByte::Seed)?;
    exact32(decode(key, VersionByte::Seed)?)
}

/// Encodes a 32-byte pre-authorized transaction hash (`T...`).
#[must_use]
pub fn encode_pre_auth_tx(hash: &[u8; 32]) -> String {
    encode(hash, VersionByte::PreAuthTx)
}

/// Decodes a pre-authorized transaction hash key (`T...`).
pub fn decode_pre_auth_tx(key: &str) -> Result<[u8; 32], KeyError> {
    check_validity(key, VersionByte::PreAuthTx)?;
    exact32(decode(key, VersionByte::PreAuthTx)?)
}

/// Encodes a 32-byte SHA-256 hash as a hash-x key (`X...`).
#[must_use]
pub fn encode_sha256_hash(hash: &[u8; 32]) -> String {
    encode(hash, VersionByte::Sha256Hash)
}

/// Decodes a hash-x key (`X...`) to its 32-byte hash.
pub fn decode_sha256_hash(key: &str) -> Result<[u8; 32], KeyError> {
    check_validity(key, VersionByte::Sha256Hash)?;
    exact32(decode(key, VersionByte::Sha256Hash)?)
}

/// Encodes an ed25519 key and its signed payload (`P...`).
///
/// # Errors
///
/// The payload must be 1 to 64 bytes wide.
pub fn encode_signed_payload(ed25519: &[u8; 32], payload: &[u8]) -> Result<String, KeyError> {
    if payload.is_empty() || payload.len() > SIGNED_PAYLOAD_MAX {
        return Err(KeyError::Width(WidthError::TooWide {
            limit: SIGNED_PAYLOAD_MAX,
            actual: payload.len(),
        }));
    }
    let mut content = Vec::with_capacity(32 + 4 + payload.len() + 3);
    content.extend_from_slice(ed25519);
    content.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    content.extend_from_slice(payload);
    content.resize(content.len() + padding_of(payload.len()), 0);
    Ok(encode(&content, VersionByte::SignedPayload))
}

/// Decodes a signed-payload key (`P...`), returning the ed25519 key and
/// the unpadded inner payload.
pub fn decode_signed_payload(key: &str) -> Result<([u8; 32], Vec<u8>), KeyError> {
    check_validity(key, VersionByte::SignedPayload)?;
    let content = decode(key, VersionByte::SignedPayload)?;
    let ed25519 = <[u8; 32]>::try_from(&content[..32]).map_err(|_| {
        KeyError::Width(WidthError::WrongWidth {
            exact: 32,
            actual: content.len(),
        })
    })?;
    let declared =
        u32::from_be_bytes([content[32], content[33], content[34], content[35]]) as usize;
    Ok((ed25519, content[36..36 + declared].to_vec()))
}

/// Encodes a muxed account (`M...`) from a raw ed25519 key and a
/// multiplexing id.
#[must_use]
pub fn encode_muxed_account(ed25519: &[u8; 32], id: u64) -> String {
    let mut content = Vec::with_capacity(40);
    content.extend_from_slice(ed25519);
    content.extend_from_slice(&id.to_be_bytes());
    encode(&content, VersionByte::MuxedAccount)
}

/// Constructs a muxed address (`M...`) from a plain account id (`G...`)
/// and a multiplexing id.
///
/// # Errors
///
/// Returns [`KeyError::AlreadyMuxed`] if `account` is itself a muxed
/// address; any other input must be a valid account id.
pub fn construct_muxed_address(account: &str, id: u64) -> Result<String, KeyError> {
    if key_kind(account) == Ok(VersionByte::MuxedAccount) {
        return Err(KeyError::AlreadyMuxed);
    }
    let ed25519 = decode_account_id(account)?;
    Ok(encode_muxed_account(&ed25519, id))
}

/// Splits a muxed address (`M...`) into its multiplexing id and raw
/// ed25519 key.
pub fn deconstruct_muxed_address(account: &str) -> Result<(u64, [u8; 32]), KeyError> {
    check_validity(account, VersionByte::MuxedAccount)?;
    let content = decode(account, VersionByte::MuxedAccount)?;
    if content.len() != 40 {
        return Err(KeyError::Width(WidthError::WrongWidth {
            exact: 40,
            actual: content.len(),
        }));
    }
    let ed25519 = <[u8; 32]>::try_from(&content[..32]).expect("split width is static");
    let id = u64::from_be_bytes(<[u8; 8]>::try_from(&content[32..]).expect("split width is static"));
    Ok((id, ed25519))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "GBVG2QOHHFBVHAEGNF4XRUCAPAGWDROONM2LC4BK4ECCQ5RTQOO64VBW";

    fn addr_key() -> [u8; 32] {
        let raw = hex::decode("6a6d41c73943538086697978d040780d61c5ce6b34b1702ae104287633839dee")
            .unwrap();
        <[u8; 32]>::try_from(raw.as_slice()).unwrap()
    }

    #[test]
    fn account_id_round_trip() {
        let encoded = encode_account_id(&addr_key());
        assert_eq!(encoded, ADDR);
        assert_eq!(encoded.len(), 56);
        assert!(encoded.starts_with('G'));
        assert_eq!(decode_account_id(ADDR).unwrap(), addr_key());
    }

    #[test]
    fn second_char_constrained() {
        assert!(matches!(ADDR.as_bytes()[1], b'A'..=b'D'));
        // a version byte with dirty low bits is rejected even when the
        // checksum is consistent
        let mut raw = vec![VersionByte::AccountId.byte() | 0x01];
        raw.extend_from_slice(&addr_key());
        let cksum = base32::checksum(&raw);
        raw.extend_from_slice(&cksum);
        let tampered = base32::encode(&raw);
        assert!(matches!(
            decode(&tampered, VersionByte::AccountId),
            Err(KeyError::InvalidVersionByte { .. })
        ));
    }

    #[test]
    fn lowercase_is_not_canonical() {
        let lowered = ADDR.to_lowercase();
        assert!(matches!(
            decode(&lowered, VersionByte::AccountId),
            Err(KeyError::NonCanonical)
        ));
    }

    #[test]
    fn single_bit_flip_breaks_validity() {
        let mut raw = base32::decode(ADDR).unwrap();
        for ix in 0..raw.len() - 2 {
            for bit in 0..8 {
                raw[ix] ^= 1 << bit;
                let tampered = base32::encode(&raw);
                assert!(
                    !is_valid(&tampered, VersionByte::AccountId),
                    "flip of bit {bit} in byte {ix} went undetected"
                );
                raw[ix] ^= 1 << bit;
            }
        }
    }

    #[test]
    fn wrong_kind_is_version_mismatch() {
        assert!(matches!(
            decode(ADDR, VersionByte::Seed),
            Err(KeyError::VersionMismatch { .. })
        ));
        // still well-formed as an account id
        assert!(is_valid(ADDR, VersionByte::AccountId));
    }

    #[test]
    fn seed_round_trip() {
        let material = [0x69u8; 32];
        let seed = encode_seed(&material);
        assert!(seed.starts_with('S'));
        assert_eq!(seed.len(), 56);
        assert_eq!(decode_seed(&seed).unwrap(), material);
    }

    #[test]
    fn pre_auth_and_hash_prefixes() {
        let hash = [0xabu8; 32];
        assert!(encode_pre_auth_tx(&hash).starts_with('T'));
        assert!(encode_sha256_hash(&hash).starts_with('X'));
        assert_eq!(decode_pre_auth_tx(&encode_pre_auth_tx(&hash)).unwrap(), hash);
        assert_eq!(
            decode_sha256_hash(&encode_sha256_hash(&hash)).unwrap(),
            hash
        );
    }

    #[test]
    fn muxed_identity() {
        let muxed = construct_muxed_address(ADDR, 1).unwrap();
        assert!(muxed.starts_with('M'));
        assert_eq!(muxed.len(), 69);
        assert_eq!(deconstruct_muxed_address(&muxed).unwrap(), (1, addr_key()));

        let high_id = 1u64 << 63;
        let muxed = construct_muxed_address(ADDR, high_id).unwrap();
        assert_eq!(
            deconstruct_muxed_address(&muxed).unwrap(),
            (high_id, addr_key())
        );
    }

    #[test]
    fn muxing_a_muxed_address_is_rejected() {
        let muxed = construct_muxed_address(ADDR, 7).unwrap();
        assert!(matches!(
            construct_muxed_address(&muxed, 8),
            Err(KeyError::AlreadyMuxed)
        ));
    }

    #[test]
    fn signed_payload_round_trip() {
        let key = encode_signed_payload(&addr_key(), &[1, 2, 3, 4]).unwrap();
        assert!(key.starts_with('P'));
        assert!(key.len() >= 56 && key.len() <= 165);
        assert!(check_validity(&key, VersionByte::SignedPayload).is_ok());
        assert_eq!(
            decode_signed_payload(&key).unwrap(),
            (addr_key(), vec![1, 2, 3, 4])
        );

        // maximum payload reaches the maximum rendition length
        let widest = encode_signed_payload(&addr_key(), &[9u8; 64]).unwrap();
        assert_eq!(widest.len(), 165);
        assert!(check_validity(&widest, VersionByte::SignedPayload).is_ok());
    }

    #[test]
    fn signed_payload_declared_width_must_agree() {
        // declare 5 bytes but pack the padded remainder of 4
        let mut content = Vec::new();
        content.extend_from_slice(&addr_key());
        content.extend_from_slice(&5u32.to_be_bytes());
        content.extend_from_slice(&[1, 2, 3, 4]);
        let key = encode(&content, VersionByte::SignedPayload);
        assert!(matches!(
            check_validity(&key, VersionByte::SignedPayload),
            Err(KeyError::PayloadLength { .. })
        ));
    }

    #[test]
    fn signed_payload_width_bounds() {
        assert!(encode_signed_payload(&addr_key(), &[]).is_err());
        assert!(encode_signed_payload(&addr_key(), &[0u8; 65]).is_err());
    }

    #[test]
    fn kind_dispatch() {
        assert_eq!(key_kind(ADDR).unwrap(), VersionByte::AccountId);
        assert_eq!(key_kind("SABC").unwrap(), VersionByte::Seed);
        assert_eq!(key_kind("MABC").unwrap(), VersionByte::MuxedAccount);
        assert_eq!(key_kind("TABC").unwrap(), VersionByte::PreAuthTx);
        assert_eq!(key_kind("XABC").unwrap(), VersionByte::Sha256Hash);
        assert_eq!(key_kind("PABC").unwrap(), VersionByte::SignedPayload);
        assert!(matches!(
            key_kind("ZABC"),
            Err(KeyError::UnknownLeadingChar { found: Some('Z') })
        ));
        assert!(matches!(
            key_kind(""),
            Err(KeyError::UnknownLeadingChar { found: None })
        ));
    }

    #[test]
    fn length_is_enforced_per_kind() {
        // truncating a valid address breaks the length gate before decode
        let truncated = &ADDR[..55];
        assert!(matches!(
            check_validity(truncated, VersionByte::AccountId),
            Err(KeyError::WrongLength {
                min: 56,
                max: 56,
                actual: 55
            })
        ));
    }
}
