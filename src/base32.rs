//! Base32 alphabet and checksum primitives for the string-key format
//!
//! String-keys are rendered in the RFC 4648 Base32 alphabet with no
//! padding characters: encoding is canonically uppercase, while decoding
//! tolerates lowercase input by translating it before interpretation.
//! Non-zero trailing bits in the final symbol are rejected, so every byte
//! sequence has exactly one accepted rendition (up to letter case).
//!
//! The integrity of a string-key rests on a CRC16/XMODEM checksum
//! (polynomial `0x1021`, zero initial value, no reflection) computed over
//! the version byte and payload, and appended in little-endian byte order
//! before Base32 encoding.

use data_encoding::{Encoding, Specification};
use lazy_static::lazy_static;

lazy_static! {
    static ref BASE32: Encoding = {
        let mut spec = Specification::new();
        spec.symbols.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ234567");
        spec.translate.from.push_str("abcdefghijklmnopqrstuvwxyz");
        spec.translate.to.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        spec.encoding().expect("static Base32 specification is well-formed")
    };
}

/// Encodes `data` in unpadded, uppercase Base32.
#[must_use]
pub fn encode(data: &[u8]) -> String {
    BASE32.encode(data)
}

/// Decodes unpadded Base32 `text`, accepting either letter case.
///
/// # Errors
///
/// Fails on symbols outside the alphabet, illegal lengths, and non-zero
/// trailing bits in the final symbol.
pub fn decode(text: &str) -> Result<Vec<u8>, data_encoding::DecodeError> {
    BASE32.decode(text.as_bytes())
}

/// Computes the CRC16/XMODEM checksum of `data`.
#[must_use]
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Returns the little-endian checksum bytes appended to `data` in the
/// string-key format.
#[must_use]
pub fn checksum(data: &[u8]) -> [u8; 2] {
    crc16_xmodem(data).to_le_bytes()
}

/// Verifies that `expected` holds the little-endian CRC16/XMODEM checksum
/// of `data`.
#[must_use]
pub fn verify_checksum(data: &[u8], expected: &[u8]) -> bool {
    checksum(data) == *expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc16_check_value() {
        // standard check input for CRC-16/XMODEM
        assert_eq!(crc16_xmodem(b"123456789"), 0x31c3);
        assert_eq!(crc16_xmodem(b""), 0x0000);
    }

    #[test]
    fn checksum_is_little_endian() {
        assert_eq!(checksum(b"123456789"), [0xc3, 0x31]);
        assert!(verify_checksum(b"123456789", &[0xc3, 0x31]));
        assert!(!verify_checksum(b"123456789", &[0x31, 0xc3]));
    }

    #[test]
    fn encode_is_uppercase_unpadded() {
        assert_eq!(encode(b"hello"), "NBSWY3DP");
        assert_eq!(encode(b"he"), "NBSQ");
    }

    #[test]
    fn decode_tolerates_lowercase() {
        assert_eq!(decode("NBSWY3DP").unwrap(), b"hello");
        assert_eq!(decode("nbswy3dp").unwrap(), b"hello");
    }

    #[test]
    fn decode_rejects_noncanonical_trailing_bits() {
        // two symbols decode to one byte; "AB" leaves a non-zero residue bit
        assert_eq!(decode("AA").unwrap(), vec![0u8]);
        assert!(decode("AB").is_err());
    }

    #[test]
    fn decode_rejects_padding_and_aliens() {
        assert!(decode("NBSWY3DP========").is_err());
        assert!(decode("NBSW!3DP").is_err());
    }
}
