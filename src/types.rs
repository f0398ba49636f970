//! Engine value types surfaced to the host environment.
//!
//! Plain data carriers plus lowercase-hex formatting. Execution semantics —
//! signing, RLP, gas — belong to the engine, not here.

use std::fmt;

use revm::primitives::{Address, Bytes, B256, U256};

use crate::account::DecodeError;
use crate::codec;
use crate::provider::HeaderRecord;

/// Number of bytes in a header logs bloom.
pub const BLOOM_SIZE: usize = 256;

/// A block header, field-for-field what the engine consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    pub parent_hash: B256,
    pub ommers_hash: B256,
    pub beneficiary: Address,
    pub state_root: B256,
    pub transactions_root: B256,
    pub receipts_root: B256,
    pub logs_bloom: [u8; BLOOM_SIZE],
    pub difficulty: U256,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Bytes,
    pub mix_hash: B256,
    pub nonce: [u8; 8],
}

impl fmt::Display for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parent_hash={} ommers_hash={} beneficiary={} state_root={} \
             transactions_root={} receipts_root={} difficulty={} number={} \
             gas_limit={} gas_used={} timestamp={} mix_hash={} nonce={}",
            codec::hash_to_hex(self.parent_hash),
            codec::hash_to_hex(self.ommers_hash),
            codec::address_to_hex(self.beneficiary),
            codec::hash_to_hex(self.state_root),
            codec::hash_to_hex(self.transactions_root),
            codec::hash_to_hex(self.receipts_root),
            self.difficulty,
            self.number,
            self.gas_limit,
            self.gas_used,
            self.timestamp,
            codec::hash_to_hex(self.mix_hash),
            codec::encode_hex(&self.nonce),
        )
    }
}

/// A transaction as bound into the host environment. The `v`/`r`/`s`
/// signature fields are full 256-bit integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub v: U256,
    pub r: U256,
    pub s: U256,
    pub from: Option<Address>,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to = match self.to {
            Some(address) => codec::address_to_hex(address),
            None => "create".to_string(),
        };
        write!(
            f,
            "nonce={} gas_price={} gas_limit={} to={} value={} data={} v={} r={} s={}",
            self.nonce,
            self.gas_price,
            self.gas_limit,
            to,
            self.value,
            codec::encode_hex(&self.data),
            self.v,
            self.r,
            self.s,
        )
    }
}

/// A block: header plus body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
    pub ommers: Vec<BlockHeader>,
}

/// A log entry in a transaction receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topics: Vec<String> = self.topics.iter().map(|t| codec::hash_to_hex(*t)).collect();
        write!(
            f,
            "address: {} topics: [{}] data: {}",
            codec::address_to_hex(self.address),
            topics.join(", "),
            codec::encode_hex(&self.data),
        )
    }
}

/// A transaction receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub success: bool,
    pub cumulative_gas_used: u64,
    pub logs: Vec<LogEntry>,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "SUCCESS" } else { "FAILED" };
        write!(
            f,
            "status: {} cumulative_gas_used: {} logs: {}",
            status,
            self.cumulative_gas_used,
            self.logs.len()
        )
    }
}

/// Decode a provider header record into a [`BlockHeader`].
///
/// The roots, beneficiary, difficulty and scalar fields are required and
/// follow the account rule: any missing or malformed one aborts the
/// decode. The bloom, extra data, mix hash and nonce default to zero when
/// the record omits them.
pub fn decode_header(record: &HeaderRecord) -> Result<BlockHeader, DecodeError> {
    let parent_hash = required_hash(record.parent_hash.as_deref(), "parent_hash")?;
    let ommers_hash = required_hash(record.ommers_hash.as_deref(), "ommers_hash")?;
    let beneficiary = record
        .beneficiary
        .as_deref()
        .ok_or(DecodeError::MissingField("beneficiary"))?;
    let beneficiary = codec::address_from_hex(beneficiary)?;
    let state_root = required_hash(record.state_root.as_deref(), "state_root")?;
    let transactions_root = required_hash(record.transactions_root.as_deref(), "transactions_root")?;
    let receipts_root = required_hash(record.receipts_root.as_deref(), "receipts_root")?;
    let difficulty = record
        .difficulty
        .as_ref()
        .ok_or(DecodeError::MissingField("difficulty"))?;
    let difficulty = codec::decode_uint256(difficulty)?;
    let number = record.number.ok_or(DecodeError::MissingField("number"))?;
    let gas_limit = record
        .gas_limit
        .ok_or(DecodeError::MissingField("gas_limit"))?;
    let gas_used = record
        .gas_used
        .ok_or(DecodeError::MissingField("gas_used"))?;
    let timestamp = record
        .timestamp
        .ok_or(DecodeError::MissingField("timestamp"))?;
    let logs_bloom = match &record.logs_bloom {
        Some(raw) => codec::decode_fixed::<BLOOM_SIZE>(raw),
        None => [0u8; BLOOM_SIZE],
    };
    let extra_data = match &record.extra_data {
        Some(raw) => Bytes::from(raw.clone()),
        None => Bytes::new(),
    };
    let mix_hash = match record.mix_hash.as_deref() {
        Some(text) => codec::hash_from_hex(text)?,
        None => B256::ZERO,
    };
    let nonce = match &record.nonce {
        Some(raw) => codec::decode_fixed::<8>(raw),
        None => [0u8; 8],
    };
    Ok(BlockHeader {
        parent_hash,
        ommers_hash,
        beneficiary,
        state_root,
        transactions_root,
        receipts_root,
        logs_bloom,
        difficulty,
        number,
        gas_limit,
        gas_used,
        timestamp,
        extra_data,
        mix_hash,
        nonce,
    })
}

fn required_hash(value: Option<&str>, name: &'static str) -> Result<B256, DecodeError> {
    let text = value.ok_or(DecodeError::MissingField(name))?;
    Ok(codec::hash_from_hex(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn minimal_record() -> HeaderRecord {
        let zero_hash = format!("0x{}", "00".repeat(32));
        HeaderRecord {
            parent_hash: Some(zero_hash.clone()),
            ommers_hash: Some(zero_hash.clone()),
            beneficiary: Some(format!("0x{}", "00".repeat(20))),
            state_root: Some(zero_hash.clone()),
            transactions_root: Some(zero_hash.clone()),
            receipts_root: Some(zero_hash),
            difficulty: Some(BigUint::from(2u8)),
            number: Some(1000),
            gas_limit: Some(30_000_000),
            gas_used: Some(21_000),
            timestamp: Some(1_600_000_000),
            ..HeaderRecord::default()
        }
    }

    #[test]
    fn minimal_record_decodes_with_zero_defaults() {
        let header = decode_header(&minimal_record()).unwrap();
        assert_eq!(header.number, 1000);
        assert_eq!(header.difficulty, U256::from(2u8));
        assert_eq!(header.logs_bloom, [0u8; BLOOM_SIZE]);
        assert_eq!(header.extra_data, Bytes::new());
        assert_eq!(header.mix_hash, B256::ZERO);
        assert_eq!(header.nonce, [0u8; 8]);
    }

    #[test]
    fn missing_number_aborts_the_decode() {
        let mut record = minimal_record();
        record.number = None;
        assert_eq!(
            decode_header(&record),
            Err(DecodeError::MissingField("number"))
        );
    }

    #[test]
    fn short_header_nonce_pads_to_eight_bytes() {
        let mut record = minimal_record();
        record.nonce = Some(vec![0x42]);
        let header = decode_header(&record).unwrap();
        assert_eq!(header.nonce, [0x42, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn header_display_uses_lowercase_hex() {
        let header = decode_header(&minimal_record()).unwrap();
        let text = header.to_string();
        assert!(text.contains("number=1000"));
        assert!(text.contains(&format!("parent_hash=0x{}", "00".repeat(32))));
    }

    #[test]
    fn receipt_display_spells_out_status() {
        let receipt = Receipt {
            success: true,
            cumulative_gas_used: 21_000,
            logs: vec![],
        };
        assert_eq!(
            receipt.to_string(),
            "status: SUCCESS cumulative_gas_used: 21000 logs: 0"
        );
    }

    #[test]
    fn create_transaction_displays_without_recipient() {
        let tx = Transaction {
            nonce: 0,
            gas_price: U256::from(1u8),
            gas_limit: 21_000,
            to: None,
            value: U256::ZERO,
            data: Bytes::new(),
            v: U256::from(27u8),
            r: U256::from(1u8),
            s: U256::from(1u8),
            from: None,
        };
        assert!(tx.to_string().contains("to=create"));
    }
}
