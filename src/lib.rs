//! State bindings between an EVM execution engine and an external state
//! provider.
//!
//! The engine executes against fixed-width binary state — 20-byte
//! addresses, 32-byte hashes, 256-bit big-endian integers. A host
//! environment supplies that state as hex text and arbitrary-precision
//! integers through an opaque [`StateProvider`] handle. This crate carries
//! the conversion in both directions and implements the engine's read-only
//! state contract on top of any provider.
//!
//! The execution engine itself (gas, opcodes, consensus, tries) is an
//! external collaborator; nothing here executes transactions or persists
//! state.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod account;
mod codec;
mod provider;
mod remote;
mod state;
mod types;

pub use account::*;
pub use codec::*;
pub use provider::*;
pub use remote::*;
pub use state::*;
pub use types::*;

// The engine's primitive types, re-exported so provider implementations do
// not need a direct engine dependency.
pub use revm::primitives::{Address, Bytes, B256, U256};
