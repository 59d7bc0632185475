//! Cross-module round-trip properties and interoperability vectors.

use lumen::prelude::*;
use lumen::strkey;
use proptest::prelude::*;

proptest! {
    #[test]
    fn uint32_words_round_trip(v in any::<u32>()) {
        let word = UInt32::from(v);
        prop_assert_eq!(UInt32::decode(word.to_bytes()), word);
    }

    #[test]
    fn int64_words_round_trip(v in any::<i64>()) {
        let word = Int64::of(v);
        prop_assert_eq!(Int64::decode(word.to_bytes()), word);
        prop_assert_eq!(Int64::from_be_bytes(word.to_be_bytes()), word);
    }

    #[test]
    fn uint64_words_round_trip(v in any::<u64>()) {
        let word = UInt64::of(v);
        prop_assert_eq!(UInt64::decode(word.to_bytes()), word);
    }

    #[test]
    fn account_ids_round_trip(key in any::<[u8; 32]>()) {
        let address = strkey::encode_account_id(&key);
        prop_assert_eq!(address.len(), 56);
        prop_assert!(address.starts_with('G'));
        prop_assert!(matches!(address.as_bytes()[1], b'A'..=b'D'));
        prop_assert_eq!(strkey::decode_account_id(&address).unwrap(), key);
    }

    #[test]
    fn seeds_round_trip(material in any::<[u8; 32]>()) {
        let seed = strkey::encode_seed(&material);
        prop_assert!(seed.starts_with('S'));
        prop_assert_eq!(strkey::decode_seed(&seed).unwrap(), material);
        // a seed is never a valid account id
        prop_assert!(!strkey::is_valid(&seed, strkey::VersionByte::AccountId));
    }

    #[test]
    fn muxed_addresses_round_trip(key in any::<[u8; 32]>(), id in any::<u64>()) {
        let muxed = strkey::encode_muxed_account(&key, id);
        prop_assert_eq!(muxed.len(), 69);
        prop_assert!(muxed.starts_with('M'));
        prop_assert_eq!(strkey::deconstruct_muxed_address(&muxed).unwrap(), (id, key));
    }

    #[test]
    fn bounded_bytes_round_trip(contents in proptest::collection::vec(any::<u8>(), 0..=64)) {
        let value = DataValue::try_from_vec(contents).unwrap();
        prop_assert_eq!(DataValue::decode(value.to_bytes()), value);
    }

    #[test]
    fn scaled_amounts_round_trip(raw in 0i64..=i64::MAX) {
        let amount = ScaledAmount::from_stroops(Int64::of(raw)).unwrap();
        let rendered = amount.to_amount_string();
        let parsed: ScaledAmount = rendered.parse().unwrap();
        prop_assert_eq!(parsed.descale(), Int64::of(raw));
    }

    #[test]
    fn truncated_signer_wire_fails(cut in 0usize..40) {
        let signer = Signer::new(SignerKey::from_ed25519([1u8; 32]), UInt32::from(1u32));
        let wire = signer.to_bytes();
        prop_assert!(Signer::try_decode(wire[..cut].to_vec()).is_err());
    }
}

#[test]
fn width_oracles_agree_with_serialization() {
    let signer = Signer::new(
        SignerKey::Ed25519SignedPayload(SignedPayload {
            ed25519: UInt256::from_array([3u8; 32]),
            payload: DataValue::try_from_vec(vec![1, 2, 3, 4, 5]).unwrap(),
        }),
        UInt32::from(255u32),
    );
    assert_eq!(signer.enc_len(), signer.to_bytes().len());

    let signers = SignerArr::try_from(vec![signer]).unwrap();
    assert_eq!(signers.enc_len(), signers.to_bytes().len());
}

#[test]
fn optional_signers_skip_absent_payload() {
    let signer = Signer::new(SignerKey::from_ed25519([4u8; 32]), UInt32::from(2u32));
    let present = Some(signer.clone());
    let absent: Option<Signer> = None;

    assert_eq!(absent.to_bytes(), vec![0, 0, 0, 0]);
    assert_eq!(present.to_bytes().len(), 4 + 40);
    assert_eq!(
        Option::<Signer>::decode(present.to_bytes()),
        Some(signer)
    );
}

#[test]
fn thresholds_interop_vector() {
    let thresholds = Thresholds::of(1, 2, 3, 4).unwrap();
    assert_eq!(thresholds.to_hex(), "01020304");
    assert_eq!(Thresholds::decode(thresholds.to_bytes()), thresholds);
}

#[test]
fn account_scenario_end_to_end() {
    // a muxed reference built over a plain address carries the id through
    // the wire and back to the string rendition
    let account = MuxedAccount::from_address(
        "GBVG2QOHHFBVHAEGNF4XRUCAPAGWDROONM2LC4BK4ECCQ5RTQOO64VBW",
    )
    .unwrap();
    let muxed = strkey::construct_muxed_address(&account.to_address(), 9).unwrap();
    let reparsed = MuxedAccount::from_address(&muxed).unwrap();
    assert_eq!(reparsed.id(), Some(9));
    assert_eq!(reparsed.ed25519(), account.ed25519());
    assert_eq!(MuxedAccount::decode(reparsed.to_bytes()), reparsed);
}
