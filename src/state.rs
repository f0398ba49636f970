//! The execution engine's state-access contract.

use revm::primitives::{Address, Bytes, B256};

use crate::account::AccountView;
use crate::types::{BlockHeader, Receipt};

/// State access as the execution engine requires it: five readers plus the
/// write half of the same contract.
///
/// Readers are total. Absence and zero sentinels are the only failure
/// surface — nothing here returns an error to the engine.
pub trait StateBuffer {
    /// Account state for an address, `None` if the account does not exist.
    fn read_account(&self, address: Address) -> Option<AccountView>;

    /// Contract bytecode by code hash. Empty bytes mean "no code".
    fn read_code(&self, code_hash: B256) -> Bytes;

    /// One 32-byte storage word. An unset slot is the all-zero word.
    fn read_storage(&self, address: Address, incarnation: u64, key: B256) -> B256;

    /// Historical header by number and hash, `None` when unknown.
    fn read_header(&self, block_number: u64, block_hash: B256) -> Option<BlockHeader>;

    /// Incarnation preceding the current lifetime of the address, 0 when
    /// the address never existed.
    fn previous_incarnation(&self, address: Address) -> u64;

    /// Mark the start of a block execution.
    fn begin_block(&mut self, block_number: u64);

    /// Record an account transition.
    fn update_account(
        &mut self,
        address: Address,
        initial: Option<AccountView>,
        current: Option<AccountView>,
    );

    /// Record a code deployment.
    fn update_account_code(
        &mut self,
        address: Address,
        incarnation: u64,
        code_hash: B256,
        code: &[u8],
    );

    /// Record a storage transition.
    fn update_storage(
        &mut self,
        address: Address,
        incarnation: u64,
        key: B256,
        initial: B256,
        current: B256,
    );

    /// Mark the end of a block execution.
    fn end_block(&mut self);

    /// Store a header.
    fn insert_header(&mut self, header: &BlockHeader);

    /// Store the receipts of a block.
    fn insert_receipts(&mut self, block_number: u64, receipts: &[Receipt]);
}
