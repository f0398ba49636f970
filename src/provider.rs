//! The state-provider capability.
//!
//! A [`StateProvider`] is the opaque external data source behind the
//! adapter — typically a remote node reached through the host environment.
//! The adapter depends only on this trait, never on the concrete object
//! implementing it. Addresses and hashes cross the boundary as
//! `0x`-prefixed lowercase hex text; balances cross as the provider's
//! native arbitrary-precision integer type.

use anyhow::Result;
use num_bigint::BigUint;

use crate::codec::CodecError;

/// Account data exactly as a provider returns it: loosely typed and
/// possibly partial. Field extraction and width enforcement happen in
/// [`decode_account`](crate::decode_account), not here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountRecord {
    pub nonce: Option<u64>,
    pub balance: Option<BigUint>,
    pub incarnation: Option<u64>,
    pub code_hash: Option<String>,
    pub storage_root: Option<String>,
}

/// Header data as a provider returns it. Same loose-typing rules as
/// [`AccountRecord`]; the bloom, extra data, mix hash and nonce are
/// genuinely optional and default to zero when omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderRecord {
    pub parent_hash: Option<String>,
    pub ommers_hash: Option<String>,
    pub beneficiary: Option<String>,
    pub state_root: Option<String>,
    pub transactions_root: Option<String>,
    pub receipts_root: Option<String>,
    pub logs_bloom: Option<Vec<u8>>,
    pub difficulty: Option<BigUint>,
    pub number: Option<u64>,
    pub gas_limit: Option<u64>,
    pub gas_used: Option<u64>,
    pub timestamp: Option<u64>,
    pub extra_data: Option<Vec<u8>>,
    pub mix_hash: Option<String>,
    pub nonce: Option<Vec<u8>>,
}

/// A storage-slot value in either of the encodings providers use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotValue {
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Hex text, with or without the `0x` prefix.
    Hex(String),
}

impl SlotValue {
    /// Normalize to raw bytes. Hex text is decoded; invalid digits are a
    /// codec error, not a panic.
    pub fn into_bytes(self) -> Result<Vec<u8>, CodecError> {
        match self {
            SlotValue::Bytes(bytes) => Ok(bytes),
            SlotValue::Hex(text) => {
                let stripped = text.strip_prefix("0x").unwrap_or(text.as_str());
                Ok(hex::decode(stripped)?)
            }
        }
    }
}

/// Capability interface for the external state source.
///
/// `Ok(None)` means the provider has no record — that is an answer, not a
/// failure. `Err` means the provider itself failed (connection lost,
/// internal error); the adapter never lets such an error cross into the
/// engine. Retry, backoff and timeouts are the provider's business, not
/// the caller's.
pub trait StateProvider {
    /// Account data for a hex address, `None` if the account is unknown.
    fn read_account_data(&self, address_hex: &str) -> Result<Option<AccountRecord>>;

    /// Contract bytecode for a hex code hash, `None` if unknown.
    fn read_code(&self, code_hash_hex: &str) -> Result<Option<Vec<u8>>>;

    /// Raw storage-slot content for (address, incarnation, key), `None`
    /// for an unset slot.
    fn read_account_storage(
        &self,
        address_hex: &str,
        incarnation: u64,
        key_hex: &str,
    ) -> Result<Option<SlotValue>>;

    /// Historical header lookup. Live remote providers routinely cannot
    /// serve this; the default answers "unknown" rather than fabricating
    /// data.
    fn read_header_data(
        &self,
        _block_number: u64,
        _block_hash_hex: &str,
    ) -> Result<Option<HeaderRecord>> {
        Ok(None)
    }

    /// Incarnation history for an address. Defaults to "no history".
    fn read_incarnation(&self, _address_hex: &str) -> Result<Option<u64>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_bytes_pass_through() {
        let value = SlotValue::Bytes(vec![1, 2, 3]);
        assert_eq!(value.into_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn slot_hex_decodes_with_or_without_prefix() {
        assert_eq!(
            SlotValue::Hex("0x0102".into()).into_bytes().unwrap(),
            vec![1, 2]
        );
        assert_eq!(SlotValue::Hex("0102".into()).into_bytes().unwrap(), vec![1, 2]);
    }

    #[test]
    fn slot_hex_garbage_is_an_error() {
        assert!(SlotValue::Hex("0xgg".into()).into_bytes().is_err());
    }
}
