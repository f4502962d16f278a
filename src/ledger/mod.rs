//! Multi-signature approval ledger
//!
//! A deterministic state machine over an append-only list of proposed
//! transactions, gated by a fixed owner set with a confirmation threshold.
//! Owners submit, confirm, optionally revoke, and finally execute; execution
//! dispatches to an [`ExecutionSink`](crate::sink::ExecutionSink) only after
//! the threshold is met.
//!
//! # Example
//!
//! ```ignore
//! use multisig_ledger::ledger::{Ledger, OwnerSet};
//! use multisig_ledger::sink::JournalSink;
//!
//! // 2-of-3 wallet
//! let set = OwnerSet::new(vec![alice, bob, carol], 2)?;
//! let mut ledger = Ledger::new(set);
//!
//! let index = ledger.submit(&alice, treasury, amount, vec![])?;
//! ledger.approve(&alice, index)?;
//! ledger.approve(&bob, index)?;
//!
//! let receipt = ledger.execute(&carol, index, &mut JournalSink::new())?;
//! ```

pub mod address;
pub mod ledger;
pub mod owners;
pub mod transaction;

pub use address::{Address, AddressError, ADDRESS_LEN};
pub use ledger::{Ledger, LedgerError};
pub use owners::{OwnerSet, OwnerSetError};
pub use transaction::{ConfirmationSet, Transaction, TxStatus};
