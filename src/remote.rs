//! `RemoteBuffer` – read-only [`StateBuffer`] backed by an external
//! [`StateProvider`].
//!
//! This bridges the provider's hex-text world with the engine's fixed-width
//! types. A `RemoteBuffer` just borrows the provider handle; all heavy
//! lifting is delegated to it. The boundary is a firewall: no provider
//! failure and no decode failure ever crosses into the engine. Malformed
//! data degrades to absent/empty/zero and is reported through `tracing`,
//! which never changes control flow on the engine side.

use std::{error::Error, fmt};

use revm::bytecode::Bytecode;
use revm::database_interface::{DBErrorMarker, Database, DatabaseRef};
use revm::primitives::{Address, Bytes, StorageKey, StorageValue, B256, U256};
use revm::state::AccountInfo;
use tracing::{error, warn};

use crate::account::{decode_account, AccountView};
use crate::codec;
use crate::provider::StateProvider;
use crate::state::StateBuffer;
use crate::types::{decode_header, BlockHeader, Receipt};

/// Error type for the engine-side database contract. The contract demands
/// one; the fail-safe policy below means it is never actually produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteBufferError(pub String);

impl fmt::Display for RemoteBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for RemoteBufferError {}

impl DBErrorMarker for RemoteBufferError {}

/// Read-only state buffer that forwards every query to a provider.
///
/// One instance serves one logical execution (a block or a transaction
/// run) and holds only a borrow of the provider for its whole lifetime.
/// It keeps no cache and no per-call state: repeated queries against an
/// unchanged provider return identical results. Concurrent use of a
/// single instance is unsupported; parallel executions each get their own
/// buffer over a shared, externally-synchronized provider.
pub struct RemoteBuffer<'p, P: StateProvider> {
    provider: &'p P,
    historical_block: Option<u64>,
}

impl<'p, P: StateProvider> RemoteBuffer<'p, P> {
    /// Wrap a provider, optionally pinned to a historical block height.
    pub fn new(provider: &'p P, historical_block: Option<u64>) -> Self {
        Self {
            provider,
            historical_block,
        }
    }

    /// Block height this buffer reads at, if pinned to one.
    pub fn historical_block(&self) -> Option<u64> {
        self.historical_block
    }
}

impl<P: StateProvider> fmt::Debug for RemoteBuffer<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteBuffer")
            .field("historical_block", &self.historical_block)
            .finish_non_exhaustive()
    }
}

impl<P: StateProvider> StateBuffer for RemoteBuffer<'_, P> {
    fn read_account(&self, address: Address) -> Option<AccountView> {
        let address_hex = codec::address_to_hex(address);
        let record = match self.provider.read_account_data(&address_hex) {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(err) => {
                warn!(address = %address_hex, %err, "account query failed, treating as absent");
                return None;
            }
        };
        match decode_account(&record) {
            Ok(view) => Some(view),
            Err(err) if err.is_overflow() => {
                error!(address = %address_hex, %err, "wire contract violated in account record");
                None
            }
            Err(err) => {
                warn!(address = %address_hex, %err, "malformed account record, treating as absent");
                None
            }
        }
    }

    fn read_code(&self, code_hash: B256) -> Bytes {
        let hash_hex = codec::hash_to_hex(code_hash);
        match self.provider.read_code(&hash_hex) {
            Ok(Some(code)) => Bytes::from(code),
            Ok(None) => Bytes::new(),
            Err(err) => {
                // Indistinguishable from "no code" on the engine side; the
                // log line is the only place the difference survives.
                warn!(code_hash = %hash_hex, %err, "code query failed, returning empty code");
                Bytes::new()
            }
        }
    }

    fn read_storage(&self, address: Address, incarnation: u64, key: B256) -> B256 {
        let address_hex = codec::address_to_hex(address);
        let key_hex = codec::hash_to_hex(key);
        let value = match self
            .provider
            .read_account_storage(&address_hex, incarnation, &key_hex)
        {
            Ok(Some(value)) => value,
            Ok(None) => return B256::ZERO,
            Err(err) => {
                warn!(address = %address_hex, slot = %key_hex, %err, "storage query failed, returning zero slot");
                return B256::ZERO;
            }
        };
        match value.into_bytes() {
            Ok(raw) => B256::from(codec::decode_fixed::<32>(&raw)),
            Err(err) => {
                warn!(address = %address_hex, slot = %key_hex, %err, "malformed storage value, returning zero slot");
                B256::ZERO
            }
        }
    }

    fn read_header(&self, block_number: u64, block_hash: B256) -> Option<BlockHeader> {
        let hash_hex = codec::hash_to_hex(block_hash);
        let record = match self.provider.read_header_data(block_number, &hash_hex) {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(err) => {
                warn!(number = block_number, hash = %hash_hex, %err, "header query failed, treating as absent");
                return None;
            }
        };
        match decode_header(&record) {
            Ok(header) => Some(header),
            Err(err) => {
                warn!(number = block_number, hash = %hash_hex, %err, "malformed header record, treating as absent");
                None
            }
        }
    }

    fn previous_incarnation(&self, address: Address) -> u64 {
        let address_hex = codec::address_to_hex(address);
        match self.provider.read_incarnation(&address_hex) {
            Ok(Some(incarnation)) => incarnation,
            Ok(None) => 0,
            Err(err) => {
                warn!(address = %address_hex, %err, "incarnation query failed, returning 0");
                0
            }
        }
    }

    // Write half of the contract. This buffer serves read-only historical
    // execution, so every mutation is accepted and dropped.

    fn begin_block(&mut self, _block_number: u64) {}

    fn update_account(
        &mut self,
        _address: Address,
        _initial: Option<AccountView>,
        _current: Option<AccountView>,
    ) {
    }

    fn update_account_code(
        &mut self,
        _address: Address,
        _incarnation: u64,
        _code_hash: B256,
        _code: &[u8],
    ) {
    }

    fn update_storage(
        &mut self,
        _address: Address,
        _incarnation: u64,
        _key: B256,
        _initial: B256,
        _current: B256,
    ) {
    }

    fn end_block(&mut self) {}

    fn insert_header(&mut self, _header: &BlockHeader) {}

    fn insert_receipts(&mut self, _block_number: u64, _receipts: &[Receipt]) {}
}

// ---------------------------------------------------------------------------
//  Engine-side database contract
// ---------------------------------------------------------------------------

impl<P: StateProvider> DatabaseRef for RemoteBuffer<'_, P> {
    type Error = RemoteBufferError;

    fn basic_ref(&self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        Ok(self.read_account(address).map(|view| AccountInfo {
            balance: view.balance,
            nonce: view.nonce,
            code_hash: view.code_hash,
            code: None, // code lazy-loaded on demand via code_by_hash
        }))
    }

    fn code_by_hash_ref(&self, code_hash: B256) -> Result<Bytecode, Self::Error> {
        let code = self.read_code(code_hash);
        if code.is_empty() {
            return Ok(Bytecode::new());
        }
        Ok(Bytecode::new_raw(code))
    }

    fn storage_ref(&self, address: Address, index: StorageKey) -> Result<StorageValue, Self::Error> {
        // Storage keys are scoped by the account's current incarnation; an
        // absent account has no slots.
        let Some(account) = self.read_account(address) else {
            return Ok(U256::ZERO);
        };
        let key = B256::from(codec::encode_uint256(index));
        let word = self.read_storage(address, account.incarnation, key);
        Ok(codec::uint256_from_be_bytes(word.0))
    }

    fn block_hash_ref(&self, _number: u64) -> Result<B256, Self::Error> {
        // Historical headers are absent against a live remote provider;
        // the zero hash is the documented sentinel.
        Ok(B256::ZERO)
    }
}

impl<P: StateProvider> Database for RemoteBuffer<'_, P> {
    type Error = RemoteBufferError;

    fn basic(&mut self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        self.basic_ref(address)
    }

    fn code_by_hash(&mut self, code_hash: B256) -> Result<Bytecode, Self::Error> {
        self.code_by_hash_ref(code_hash)
    }

    fn storage(&mut self, address: Address, index: StorageKey) -> Result<StorageValue, Self::Error> {
        self.storage_ref(address, index)
    }

    fn block_hash(&mut self, number: u64) -> Result<B256, Self::Error> {
        self.block_hash_ref(number)
    }
}
