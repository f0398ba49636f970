//! Account state decoded from provider responses.

use revm::primitives::{B256, U256};
use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::provider::AccountRecord;

/// Decode failure for a provider record.
///
/// Every variant surfaces as "absent" at the adapter boundary, but the
/// distinction is kept here so logs and tests can tell a partially-filled
/// record from a violated wire contract.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A required field was not present in the record.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// A present field could not be converted to its fixed-width form.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl DecodeError {
    /// True for a 256-bit overflow, the one failure that marks a violated
    /// wire contract rather than ordinary partial data.
    pub fn is_overflow(&self) -> bool {
        matches!(self, DecodeError::Codec(CodecError::Overflow(_)))
    }
}

/// Account state as the engine consumes it.
///
/// Produced only by [`decode_account`], never mutated afterwards, and owned
/// by the caller that requested it — there is no caching and no shared
/// ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountView {
    pub nonce: u64,
    pub balance: U256,
    pub incarnation: u64,
    pub code_hash: B256,
    pub storage_root: B256,
}

/// Decode a provider account record into a fixed-width view.
///
/// The balance goes through the 256-bit integer codec; `code_hash` and
/// `storage_root` are hex-decoded and then fitted to 32 bytes. Any field
/// failure aborts the whole decode.
pub fn decode_account(record: &AccountRecord) -> Result<AccountView, DecodeError> {
    let nonce = record.nonce.ok_or(DecodeError::MissingField("nonce"))?;
    let balance = record
        .balance
        .as_ref()
        .ok_or(DecodeError::MissingField("balance"))?;
    let balance = codec::decode_uint256(balance)?;
    let incarnation = record
        .incarnation
        .ok_or(DecodeError::MissingField("incarnation"))?;
    let code_hash = record
        .code_hash
        .as_deref()
        .ok_or(DecodeError::MissingField("code_hash"))?;
    let code_hash = codec::hash_from_hex(code_hash)?;
    let storage_root = record
        .storage_root
        .as_deref()
        .ok_or(DecodeError::MissingField("storage_root"))?;
    let storage_root = codec::hash_from_hex(storage_root)?;
    Ok(AccountView {
        nonce,
        balance,
        incarnation,
        code_hash,
        storage_root,
    })
}
