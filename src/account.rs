//! Account, signer, and key domain types
//!
//! This module instantiates the generic codec machinery for the concrete
//! key-bearing types of the protocol: the [`PublicKey`] and
//! [`MuxedAccount`] unions, the [`SignerKey`] union with its four signer
//! kinds, and the [`Signer`] record pairing a key with its weight.
//!
//! The [`Addressable`] trait is the capability shared by everything that
//! can stand for an account: it yields the string-key address, the plain
//! account id, the muxed-account form, and a weighted signer entry.
//! [`Signing`] is the seam for the cryptographic collaborator; this crate
//! ships no implementation of it.

use crate::conv::{len, len::Estimable, target::Target, Decode, Encode};
use crate::fixed::UInt256;
use crate::int::{UInt32, UInt64};
use crate::parse::{ParseResult, Parser};
use crate::schema::DataValue;
use crate::seq::VarArray;
use crate::strkey::{self, KeyError};
use crate::{write_all_to, xdr_enum, xdr_union};

/// Largest number of signers an account may hold.
pub const MAX_SIGNERS: usize = 20;

/// Signer collection bounded by [`MAX_SIGNERS`].
pub type SignerArr = VarArray<Signer, { MAX_SIGNERS }>;

xdr_enum! {
    /// Kinds of public key the protocol defines; ed25519 is the only one
    /// in use.
    pub enum PublicKeyType {
        Ed25519 = 0,
    }
}

impl Default for PublicKeyType {
    fn default() -> Self {
        Self::Ed25519
    }
}

xdr_enum! {
    /// Kinds of cryptographic key material, as carried by the muxed
    /// account union and signature hints.
    pub enum CryptoKeyType {
        Ed25519 = 0,
        PreAuthTx = 1,
        HashX = 2,
        Ed25519SignedPayload = 3,
        MuxedEd25519 = 0x100,
    }
}

impl Default for CryptoKeyType {
    fn default() -> Self {
        Self::Ed25519
    }
}

xdr_enum! {
    /// Kinds of key a signer entry may carry.
    pub enum SignerKeyType {
        Ed25519 = 0,
        PreAuthTx = 1,
        HashX = 2,
        Ed25519SignedPayload = 3,
    }
}

impl Default for SignerKeyType {
    fn default() -> Self {
        Self::Ed25519
    }
}

xdr_union! {
    /// A public key, discriminated by [`PublicKeyType`].
    pub enum PublicKey : PublicKeyType {
        Ed25519(UInt256) = PublicKeyType::Ed25519,
    }
}

impl PublicKey {
    /// Wraps raw ed25519 public-key bytes.
    #[must_use]
    pub fn from_ed25519(key: [u8; 32]) -> Self {
        Self::Ed25519(UInt256::from_array(key))
    }

    /// Decodes a `G...` account-id address.
    ///
    /// # Errors
    ///
    /// Propagates [`KeyError`] from string-key validation.
    pub fn from_address(address: &str) -> Result<Self, KeyError> {
        Ok(Self::from_ed25519(strkey::decode_account_id(address)?))
    }

    /// Borrows the raw ed25519 public-key bytes.
    #[must_use]
    pub fn as_ed25519(&self) -> &[u8; 32] {
        match self {
            Self::Ed25519(key) => key.bytes(),
        }
    }
}

/// An account identifier; the wire form is exactly a [`PublicKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct AccountId(pub PublicKey);

impl AccountId {
    /// Decodes a `G...` account-id address.
    ///
    /// # Errors
    ///
    /// Propagates [`KeyError`] from string-key validation.
    pub fn from_address(address: &str) -> Result<Self, KeyError> {
        Ok(Self(PublicKey::from_address(address)?))
    }

    /// Renders the `G...` address of this account id.
    #[must_use]
    pub fn to_address(&self) -> String {
        strkey::encode_account_id(self.0.as_ed25519())
    }
}

impl Estimable for AccountId {
    const KNOWN: Option<usize> = None;

    fn unknown(&self) -> usize {
        self.0.estimate()
    }
}

impl Encode for AccountId {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        self.0.write_to(buf)
    }
}

impl Decode for AccountId {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self(PublicKey::parse(p)?))
    }
}

/// Payload of the muxed arm of [`MuxedAccount`]: the multiplexing id
/// precedes the key on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxedEd25519Account {
    pub id: UInt64,
    pub ed25519: UInt256,
}

impl len::FixedLength for MuxedEd25519Account {
    const LEN: usize = 40;
}

impl Encode for MuxedEd25519Account {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        write_all_to!(self.id, self.ed25519 => buf)
    }
}

impl Decode for MuxedEd25519Account {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self {
            id: UInt64::parse(p)?,
            ed25519: UInt256::parse(p)?,
        })
    }
}

xdr_union! {
    /// An account reference that may multiplex a single ed25519 key
    /// across many sub-accounts via an embedded 64-bit id.
    pub enum MuxedAccount : CryptoKeyType {
        Ed25519(UInt256) = CryptoKeyType::Ed25519,
        MuxedEd25519(MuxedEd25519Account) = CryptoKeyType::MuxedEd25519,
    }
}

impl MuxedAccount {
    /// Decodes either a plain `G...` address or a muxed `M...` address.
    ///
    /// # Errors
    ///
    /// Propagates [`KeyError`] from string-key validation.
    pub fn from_address(address: &str) -> Result<Self, KeyError> {
        match strkey::key_kind(address)? {
            strkey::VersionByte::MuxedAccount => {
                let (id, ed25519) = strkey::deconstruct_muxed_address(address)?;
                Ok(Self::MuxedEd25519(MuxedEd25519Account {
                    id: UInt64::of(id),
                    ed25519: UInt256::from_array(ed25519),
                }))
            }
            _ => Ok(Self::Ed25519(UInt256::from_array(
                strkey::decode_account_id(address)?,
            ))),
        }
    }

    /// Renders the string-key address of this account reference: `M...`
    /// for the muxed arm, `G...` otherwise.
    #[must_use]
    pub fn to_address(&self) -> String {
        match self {
            Self::Ed25519(key) => strkey::encode_account_id(key.bytes()),
            Self::MuxedEd25519(inner) => {
                strkey::encode_muxed_account(inner.ed25519.bytes(), inner.id.value())
            }
        }
    }

    /// Borrows the underlying ed25519 key of either arm.
    #[must_use]
    pub fn ed25519(&self) -> &UInt256 {
        match self {
            Self::Ed25519(key) => key,
            Self::MuxedEd25519(inner) => &inner.ed25519,
        }
    }

    /// Returns the multiplexing id, if this reference carries one.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Ed25519(_) => None,
            Self::MuxedEd25519(inner) => Some(inner.id.value()),
        }
    }
}

/// Payload of the signed-payload arm of [`SignerKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    pub ed25519: UInt256,
    pub payload: DataValue,
}

impl Estimable for SignedPayload {
    const KNOWN: Option<usize> = None;

    fn unknown(&self) -> usize {
        32 + self.payload.estimate()
    }
}

impl Encode for SignedPayload {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        write_all_to!(self.ed25519, self.payload => buf)
    }
}

impl Decode for SignedPayload {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self {
            ed25519: UInt256::parse(p)?,
            payload: DataValue::parse(p)?,
        })
    }
}

xdr_union! {
    /// The key material a signer entry may carry.
    pub enum SignerKey : SignerKeyType {
        Ed25519(UInt256) = SignerKeyType::Ed25519,
        PreAuthTx(UInt256) = SignerKeyType::PreAuthTx,
        HashX(UInt256) = SignerKeyType::HashX,
        Ed25519SignedPayload(SignedPayload) = SignerKeyType::Ed25519SignedPayload,
    }
}

impl SignerKey {
    /// Wraps raw ed25519 public-key bytes as a signer key.
    #[must_use]
    pub fn from_ed25519(key: [u8; 32]) -> Self {
        Self::Ed25519(UInt256::from_array(key))
    }

    /// Decodes the signer-key kinds that have a string-key rendition
    /// (`G...`, `T...`, `X...`, `P...`).
    ///
    /// # Errors
    ///
    /// Propagates [`KeyError`] from string-key validation; a seed or muxed
    /// address is not a signer key.
    pub fn from_address(address: &str) -> Result<Self, KeyError> {
        match strkey::key_kind(address)? {
            strkey::VersionByte::AccountId => Ok(Self::Ed25519(UInt256::from_array(
                strkey::decode_account_id(address)?,
            ))),
            strkey::VersionByte::PreAuthTx => Ok(Self::PreAuthTx(UInt256::from_array(
                strkey::decode_pre_auth_tx(address)?,
            ))),
            strkey::VersionByte::Sha256Hash => Ok(Self::HashX(UInt256::from_array(
                strkey::decode_sha256_hash(address)?,
            ))),
            strkey::VersionByte::SignedPayload => {
                let (ed25519, payload) = strkey::decode_signed_payload(address)?;
                Ok(Self::Ed25519SignedPayload(SignedPayload {
                    ed25519: UInt256::from_array(ed25519),
                    payload: DataValue::try_from_vec(payload)
                        .map_err(KeyError::Width)?,
                }))
            }
            kind => Err(KeyError::VersionMismatch {
                expected: strkey::VersionByte::AccountId.byte(),
                actual: kind.byte(),
            }),
        }
    }

    /// Renders the string-key address of this signer key.
    #[must_use]
    pub fn to_address(&self) -> String {
        match self {
            Self::Ed25519(key) => strkey::encode_account_id(key.bytes()),
            Self::PreAuthTx(hash) => strkey::encode_pre_auth_tx(hash.bytes()),
            Self::HashX(hash) => strkey::encode_sha256_hash(hash.bytes()),
            Self::Ed25519SignedPayload(inner) => {
                // the payload width invariant is enforced at construction
                strkey::encode_signed_payload(inner.ed25519.bytes(), inner.payload.as_slice())
                    .unwrap_or_else(|err| {
                        panic!("signed payload invariant violated: {err}")
                    })
            }
        }
    }
}

/// A signer entry: key material paired with its voting weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: UInt32,
}

impl Signer {
    /// Pairs a signer key with its weight.
    #[must_use]
    pub fn new(key: SignerKey, weight: UInt32) -> Self {
        Self { key, weight }
    }
}

impl Estimable for Signer {
    const KNOWN: Option<usize> = None;

    fn unknown(&self) -> usize {
        self.key.estimate() + 4
    }
}

impl Encode for Signer {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        write_all_to!(self.key, self.weight => buf)
    }
}

impl Decode for Signer {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self {
            key: SignerKey::parse(p)?,
            weight: UInt32::parse(p)?,
        })
    }
}

/// Capability shared by everything that can stand for an account.
///
/// Implementers yield their string-key address, plain account id, muxed
/// form, and a weighted signer entry directly; no runtime type probing is
/// involved.
pub trait Addressable {
    /// Renders the canonical string-key address.
    fn address(&self) -> String;

    /// Returns the plain account id.
    fn account_id(&self) -> AccountId;

    /// Returns the muxed-account form.
    fn muxed_account(&self) -> MuxedAccount;

    /// Returns a signer entry for this account's key at the given weight.
    fn weighted_signer(&self, weight: UInt32) -> Signer;
}

impl Addressable for PublicKey {
    fn address(&self) -> String {
        strkey::encode_account_id(self.as_ed25519())
    }

    fn account_id(&self) -> AccountId {
        AccountId(self.clone())
    }

    fn muxed_account(&self) -> MuxedAccount {
        MuxedAccount::Ed25519(UInt256::from_array(*self.as_ed25519()))
    }

    fn weighted_signer(&self, weight: UInt32) -> Signer {
        Signer::new(SignerKey::from_ed25519(*self.as_ed25519()), weight)
    }
}

impl Addressable for MuxedAccount {
    fn address(&self) -> String {
        self.to_address()
    }

    fn account_id(&self) -> AccountId {
        AccountId(PublicKey::Ed25519(*self.ed25519()))
    }

    fn muxed_account(&self) -> MuxedAccount {
        self.clone()
    }

    fn weighted_signer(&self, weight: UInt32) -> Signer {
        Signer::new(SignerKey::Ed25519(*self.ed25519()), weight)
    }
}

/// Opaque signing capability supplied by a cryptographic collaborator.
///
/// The crate models key material and signatures as plain bytes; producing
/// or checking a signature is delegated entirely to an implementation of
/// this trait.
pub trait Signing {
    /// Signs `message` with the raw private key material `seed`.
    fn sign(&self, seed: &[u8; 32], message: &[u8]) -> Vec<u8>;

    /// Verifies `signature` over `message` against the raw public key
    /// material `public`.
    fn verify(&self, signature: &[u8], message: &[u8], public: &[u8; 32]) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adt::Enumeration;
    use crate::conv::EncodeLength;

    const ADDR: &str = "GBVG2QOHHFBVHAEGNF4XRUCAPAGWDROONM2LC4BK4ECCQ5RTQOO64VBW";
    const SIGNER_XDR: &str = "AAAAAGptQcc5Q1OAhml5eNBAeA1hxc5rNLFwKuEEKHYzg53uAAAAAQ==";

    #[test]
    fn signer_scenario_vector() {
        let key = SignerKey::from_address(ADDR).unwrap();
        let signer = Signer::new(key, UInt32::from(1u32));
        assert_eq!(signer.to_base64(), SIGNER_XDR);
        assert_eq!(Signer::try_decode_base64(SIGNER_XDR).unwrap(), signer);
    }

    #[test]
    fn signer_width_oracle_agrees() {
        let signer = Signer::new(SignerKey::from_ed25519([7u8; 32]), UInt32::from(1u32));
        assert_eq!(signer.enc_len(), signer.to_bytes().len());
        assert_eq!(signer.enc_len(), 40);
    }

    #[test]
    fn account_id_address_round_trip() {
        let id = AccountId::from_address(ADDR).unwrap();
        assert_eq!(id.to_address(), ADDR);
        assert_eq!(AccountId::decode(id.to_bytes()), id);
    }

    #[test]
    fn muxed_union_wire_layout() {
        let muxed = MuxedAccount::MuxedEd25519(MuxedEd25519Account {
            id: UInt64::of(7),
            ed25519: UInt256::from_array([9u8; 32]),
        });
        let wire = muxed.to_bytes();
        // discriminant 0x100, eight-byte id, 32-byte key
        assert_eq!(wire.len(), 44);
        assert_eq!(&wire[..4], &[0, 0, 1, 0]);
        assert_eq!(&wire[4..12], &[0, 0, 0, 0, 0, 0, 0, 7]);
        assert_eq!(MuxedAccount::decode(wire), muxed);
    }

    #[test]
    fn muxed_address_round_trip() {
        let muxed = MuxedAccount::from_address(ADDR).unwrap();
        assert_eq!(muxed.id(), None);
        assert_eq!(muxed.to_address(), ADDR);

        let direct = MuxedAccount::MuxedEd25519(MuxedEd25519Account {
            id: UInt64::of(1),
            ed25519: *muxed.ed25519(),
        });
        let again = MuxedAccount::from_address(&direct.to_address()).unwrap();
        assert_eq!(again, direct);
        assert_eq!(again.id(), Some(1));
    }

    #[test]
    fn signer_key_kinds_round_trip() {
        for key in [
            SignerKey::Ed25519(UInt256::from_array([1u8; 32])),
            SignerKey::PreAuthTx(UInt256::from_array([2u8; 32])),
            SignerKey::HashX(UInt256::from_array([3u8; 32])),
            SignerKey::Ed25519SignedPayload(SignedPayload {
                ed25519: UInt256::from_array([4u8; 32]),
                payload: DataValue::try_from_vec(vec![1, 2, 3]).unwrap(),
            }),
        ] {
            assert_eq!(SignerKey::decode(key.to_bytes()), key);
            assert_eq!(SignerKey::from_address(&key.to_address()).unwrap(), key);
        }
    }

    #[test]
    fn seed_is_not_a_signer_key() {
        let seed = crate::strkey::encode_seed(&[5u8; 32]);
        assert!(SignerKey::from_address(&seed).is_err());
    }

    #[test]
    fn addressable_capability() {
        let key = PublicKey::from_address(ADDR).unwrap();
        assert_eq!(key.address(), ADDR);
        assert_eq!(key.account_id().to_address(), ADDR);
        assert_eq!(key.muxed_account().to_address(), ADDR);

        let signer = key.weighted_signer(UInt32::from(1u32));
        assert_eq!(signer.to_base64(), SIGNER_XDR);

        let muxed = MuxedAccount::from_address(ADDR).unwrap();
        assert_eq!(muxed.account_id().to_address(), ADDR);
    }

    #[test]
    fn signer_collection_capacity() {
        let mut signers = SignerArr::new();
        for weight in 0..MAX_SIGNERS as u32 {
            signers
                .try_push(Signer::new(
                    SignerKey::from_ed25519([weight as u8; 32]),
                    UInt32::from(weight),
                ))
                .unwrap();
        }
        assert!(matches!(
            signers.try_push(Signer::new(
                SignerKey::from_ed25519([0u8; 32]),
                UInt32::from(1u32)
            )),
            Err(crate::error::LengthError::AtCapacity { limit: MAX_SIGNERS })
        ));
        assert_eq!(SignerArr::decode(signers.to_bytes()), signers);
    }

    #[test]
    fn enum_defaults_fall_back_to_ed25519() {
        assert_eq!(PublicKeyType::default(), PublicKeyType::Ed25519);
        assert_eq!(CryptoKeyType::default(), CryptoKeyType::Ed25519);
        assert_eq!(SignerKeyType::default(), SignerKeyType::Ed25519);
        assert!(CryptoKeyType::default().is_index(0));
    }
}
