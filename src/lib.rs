//! Multisig Ledger: a threshold-approval wallet core in Rust
//!
//! This crate provides a multi-signature authorization wallet that gates
//! arbitrary outgoing calls behind a configurable threshold of independent
//! approvers, featuring:
//! - Fixed-at-construction owner set with an M-of-N confirmation threshold
//! - Append-only transaction ledger with monotonic indices
//! - Per-owner confirmation slots with strict duplicate rejection
//! - Confirmation revocation prior to execution
//! - Reentrancy-safe execution (executed flag flips before dispatch)
//! - Pluggable execution sink with a journaling implementation
//! - JSON persistence with rotating backups
//!
//! # Example
//!
//! ```rust
//! use multisig_ledger::ledger::{Address, Ledger, OwnerSet};
//! use multisig_ledger::sink::JournalSink;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let alice: Address = "0x00000000000000000000000000000000000000a1".parse()?;
//! let bob: Address = "0x00000000000000000000000000000000000000b2".parse()?;
//! let carol: Address = "0x00000000000000000000000000000000000000c3".parse()?;
//! let treasury: Address = "0x00000000000000000000000000000000000000ee".parse()?;
//!
//! // Create a 2-of-3 wallet
//! let owners = OwnerSet::new(vec![alice, bob, carol], 2)?;
//! let mut ledger = Ledger::new(owners);
//!
//! // Propose, collect confirmations, execute
//! let index = ledger.submit(&alice, treasury, 1_000, vec![])?;
//! ledger.approve(&alice, index)?;
//! ledger.approve(&bob, index)?;
//!
//! let mut sink = JournalSink::new();
//! let receipt = ledger.execute(&carol, index, &mut sink)?;
//! assert_eq!(receipt.index, index);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod ledger;
pub mod sink;
pub mod storage;
pub mod units;

// Re-export commonly used types
pub use ledger::{
    Address, AddressError, ConfirmationSet, Ledger, LedgerError, OwnerSet, OwnerSetError,
    Transaction, TxStatus,
};
pub use sink::{DispatchRequest, ExecutionSink, JournalEntry, JournalSink, SinkError, SinkReceipt};
pub use storage::{Storage, StorageConfig, StorageError, WalletState};
pub use units::{format_units, parse_units, DECIMALS, UNIT};
