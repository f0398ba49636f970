//! Fixed-width codec for values crossing the provider boundary.
//!
//! The engine consumes fixed-width binary state (20-byte addresses, 32-byte
//! hashes, 32-byte big-endian integers); providers speak `0x` hex text and
//! arbitrary-precision integers. Everything here marshals between the two
//! representations. Byte order across the boundary is always big-endian —
//! that is a wire contract, not an implementation detail. No arithmetic is
//! performed at this layer.

use num_bigint::BigUint;
use revm::primitives::{Address, B256, U256};
use thiserror::Error;

/// Decode failure at the codec layer.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CodecError {
    /// The source value does not fit in 256 bits. This marks a violated
    /// wire contract and is kept distinct from every other decode failure
    /// so callers cannot silently corrupt balances.
    #[error("value of {0} bits exceeds 256 bits")]
    Overflow(u64),
    /// The input is not valid hex text.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

// `hex::FromHexError` derives `PartialEq` but not `Eq`; its equality is
// nonetheless a total equivalence, so `CodecError` is soundly `Eq`.
impl Eq for CodecError {}

/// Serialize a 256-bit integer as exactly 32 big-endian bytes, left-padded
/// with zeros. Total and bijective with [`uint256_from_be_bytes`].
pub fn encode_uint256(value: U256) -> [u8; 32] {
    value.to_be_bytes()
}

/// Inverse of [`encode_uint256`].
pub fn uint256_from_be_bytes(bytes: [u8; 32]) -> U256 {
    U256::from_be_bytes(bytes)
}

/// Convert the provider's arbitrary-precision integer into a `U256`.
///
/// Values wider than 256 bits are rejected with [`CodecError::Overflow`],
/// never wrapped or truncated.
pub fn decode_uint256(value: &BigUint) -> Result<U256, CodecError> {
    let bits = value.bits();
    if bits > 256 {
        return Err(CodecError::Overflow(bits));
    }
    let raw = value.to_bytes_be();
    let mut buf = [0u8; 32];
    buf[32 - raw.len()..].copy_from_slice(&raw);
    Ok(U256::from_be_bytes(buf))
}

/// Lowercase `0x`-prefixed hex, two digits per byte, length preserved.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Hex form of an address, as providers expect it.
pub fn address_to_hex(address: Address) -> String {
    format!("0x{address:x}")
}

/// Hex form of a 32-byte hash, as providers expect it.
pub fn hash_to_hex(hash: B256) -> String {
    format!("0x{hash:x}")
}

/// Copy `min(bytes.len(), N)` bytes from offset 0 into a zeroed `N`-byte
/// buffer.
///
/// Shorter input is zero-padded on the right, longer input is truncated to
/// the first `N` bytes. Externally supplied address/hash byte strings come
/// in unpredictable lengths, so this is deliberately permissive; callers
/// that need strict length validation must add it above this layer.
pub fn decode_fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut buf = [0u8; N];
    let n = bytes.len().min(N);
    buf[..n].copy_from_slice(&bytes[..n]);
    buf
}

/// Decode hex text (with or without `0x`) into a 20-byte address, padding
/// or truncating per [`decode_fixed`].
pub fn address_from_hex(text: &str) -> Result<Address, CodecError> {
    let raw = hex::decode(text.strip_prefix("0x").unwrap_or(text))?;
    Ok(Address::from(decode_fixed::<20>(&raw)))
}

/// Decode hex text (with or without `0x`) into a 32-byte hash, padding or
/// truncating per [`decode_fixed`].
pub fn hash_from_hex(text: &str) -> Result<B256, CodecError> {
    let raw = hex::decode(text.strip_prefix("0x").unwrap_or(text))?;
    Ok(B256::from(decode_fixed::<32>(&raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint256_encoding_is_big_endian_and_padded() {
        let one = U256::from(1u64);
        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(encode_uint256(one), expected);
        assert_eq!(uint256_from_be_bytes(expected), one);
    }

    #[test]
    fn bigint_decode_round_trips() {
        let value = BigUint::from(1_000_000_000_000_000_000u64);
        let decoded = decode_uint256(&value).unwrap();
        assert_eq!(decoded, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(BigUint::from_bytes_be(&encode_uint256(decoded)), value);
    }

    #[test]
    fn bigint_wider_than_256_bits_is_overflow_not_zero() {
        let too_wide = BigUint::from(1u8) << 256;
        assert_eq!(decode_uint256(&too_wide), Err(CodecError::Overflow(257)));
    }

    #[test]
    fn max_uint256_still_decodes() {
        let max = (BigUint::from(1u8) << 256) - 1u8;
        assert_eq!(decode_uint256(&max).unwrap(), U256::MAX);
    }

    #[test]
    fn short_input_pads_with_trailing_zeros() {
        let ten = [0xabu8; 10];
        let out = decode_fixed::<20>(&ten);
        assert_eq!(&out[..10], &ten);
        assert_eq!(&out[10..], &[0u8; 10]);
    }

    #[test]
    fn long_input_keeps_the_first_width_bytes() {
        let thirty: Vec<u8> = (0u8..30).collect();
        let out = decode_fixed::<20>(&thirty);
        assert_eq!(&out[..], &thirty[..20]);
    }

    #[test]
    fn hex_text_is_lowercase_and_prefixed() {
        assert_eq!(encode_hex(&[0xde, 0xad, 0xbe, 0xef]), "0xdeadbeef");
        assert_eq!(encode_hex(&[]), "0x");
    }

    #[test]
    fn address_hex_round_trips() {
        let address = Address::from([0x11u8; 20]);
        let text = address_to_hex(address);
        assert_eq!(text, format!("0x{}", "11".repeat(20)));
        assert_eq!(address_from_hex(&text).unwrap(), address);
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(matches!(
            address_from_hex("0xzz"),
            Err(CodecError::InvalidHex(_))
        ));
        assert!(matches!(hash_from_hex("abc"), Err(CodecError::InvalidHex(_))));
    }

    #[test]
    fn zero_word_survives_the_codec_unchanged() {
        let zero = B256::ZERO;
        let text = hash_to_hex(zero);
        assert_eq!(text, format!("0x{}", "00".repeat(32)));
        assert_eq!(hash_from_hex(&text).unwrap(), zero);
    }
}
