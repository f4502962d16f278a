//! The approval ledger state machine
//!
//! Owns the owner set and the append-only transaction list, and applies
//! every mutation as an all-or-nothing transition. Callers arrive already
//! authenticated; the ledger only decides whether the action is permitted.
//!
//! The one ordering that matters: `execute` marks a transaction executed
//! *before* handing it to the execution sink, so a sink that calls back into
//! the ledger can only observe the post-flip state.

use crate::ledger::address::Address;
use crate::ledger::owners::OwnerSet;
use crate::ledger::transaction::{Transaction, TxStatus};
use crate::sink::{DispatchRequest, ExecutionSink, SinkReceipt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from ledger operations
///
/// All variants are recoverable caller-facing results. `SinkDispatchFailed`
/// is the one asymmetric case: it is reported only after the transaction has
/// irreversibly been marked executed, so it must never be read as
/// rejected-before-effect.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("caller {0} is not an owner")]
    Unauthorized(Address),
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("value overflows the ledger's numeric domain")]
    ValueOverflow,
    #[error("unknown transaction index {0}")]
    UnknownTransaction(u64),
    #[error("transaction {0} already executed")]
    AlreadyExecuted(u64),
    #[error("owner {owner} already confirmed transaction {index}")]
    AlreadyConfirmed { index: u64, owner: Address },
    #[error("owner {owner} has not confirmed transaction {index}")]
    NotConfirmed { index: u64, owner: Address },
    #[error("transaction {index} has {have} of {need} required confirmations")]
    InsufficientConfirmations {
        index: u64,
        have: usize,
        need: usize,
    },
    #[error("transaction {index} marked executed but dispatch failed: {reason}")]
    SinkDispatchFailed { index: u64, reason: String },
}

/// Multi-signature approval ledger
///
/// Single source of truth for the owner set and all proposed transactions.
/// Mutating operations must be externally serialized; the ledger itself
/// holds no locks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ledger {
    owners: OwnerSet,
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger over a fixed owner set
    pub fn new(owners: OwnerSet) -> Self {
        Self {
            owners,
            transactions: Vec::new(),
        }
    }

    /// The owner set this ledger was constructed with
    pub fn owner_set(&self) -> &OwnerSet {
        &self.owners
    }

    /// The owners in construction order
    pub fn owners(&self) -> &[Address] {
        self.owners.owners()
    }

    /// Confirmations required before execution
    pub fn required_confirmations(&self) -> usize {
        self.owners.required_confirmations()
    }

    /// Resolve the caller to an owner position, checked fresh on every call
    fn authorize(&self, caller: &Address) -> Result<usize, LedgerError> {
        self.owners
            .position(caller)
            .ok_or(LedgerError::Unauthorized(*caller))
    }

    fn tx(&self, index: u64) -> Result<&Transaction, LedgerError> {
        self.transactions
            .get(index as usize)
            .ok_or(LedgerError::UnknownTransaction(index))
    }

    fn tx_mut(&mut self, index: u64) -> Result<&mut Transaction, LedgerError> {
        self.transactions
            .get_mut(index as usize)
            .ok_or(LedgerError::UnknownTransaction(index))
    }

    /// Propose a new transaction
    ///
    /// Allocates the next index (starting at 0) and appends a pending entry
    /// with no confirmations. Submitting does not confirm: the submitter
    /// must call [`approve`](Self::approve) like any other owner.
    ///
    /// # Errors
    /// `Unauthorized` for non-owners, `InvalidTarget` for the zero address.
    pub fn submit(
        &mut self,
        caller: &Address,
        target: Address,
        value: u128,
        payload: Vec<u8>,
    ) -> Result<u64, LedgerError> {
        self.authorize(caller)?;

        if target.is_zero() {
            return Err(LedgerError::InvalidTarget(
                "target must not be the zero address".to_string(),
            ));
        }

        let index = self.transactions.len() as u64;
        self.transactions
            .push(Transaction::new(index, target, value, payload, self.owners.len()));

        log::info!(
            "tx {} submitted by {}: target {} value {}",
            index,
            caller,
            target,
            value
        );

        Ok(index)
    }

    /// Record the caller's confirmation on a pending transaction
    ///
    /// Confirming twice is rejected with `AlreadyConfirmed` rather than
    /// silently ignored, so caller bugs surface instead of being masked.
    ///
    /// Returns the confirmation count after recording.
    pub fn approve(&mut self, caller: &Address, index: u64) -> Result<usize, LedgerError> {
        let position = self.authorize(caller)?;
        let tx = self.tx_mut(index)?;

        if tx.executed {
            return Err(LedgerError::AlreadyExecuted(index));
        }

        if tx.confirmations.is_confirmed(position) {
            return Err(LedgerError::AlreadyConfirmed {
                index,
                owner: *caller,
            });
        }

        tx.confirmations.confirm(position);
        let count = tx.confirmations.count();

        log::info!("tx {} confirmed by {} ({} total)", index, caller, count);

        Ok(count)
    }

    /// Retract the caller's prior confirmation
    ///
    /// Only possible before execution; confirmations are frozen once the
    /// transaction has been dispatched.
    ///
    /// Returns the confirmation count after removal.
    pub fn revoke(&mut self, caller: &Address, index: u64) -> Result<usize, LedgerError> {
        let position = self.authorize(caller)?;
        let tx = self.tx_mut(index)?;

        if tx.executed {
            return Err(LedgerError::AlreadyExecuted(index));
        }

        if !tx.confirmations.is_confirmed(position) {
            return Err(LedgerError::NotConfirmed {
                index,
                owner: *caller,
            });
        }

        tx.confirmations.revoke(position);
        let count = tx.confirmations.count();

        log::info!("tx {} confirmation revoked by {} ({} left)", index, caller, count);

        Ok(count)
    }

    /// Dispatch a fully confirmed transaction to the execution sink
    ///
    /// The executed flag flips true *before* dispatch, and never flips back:
    /// a sink that re-enters `execute` on the same index sees the flag set
    /// and gets `AlreadyExecuted`, and a sink failure leaves the transaction
    /// executed. Retrying a failed dispatch means submitting a new
    /// transaction, which keeps the approval record auditable.
    pub fn execute(
        &mut self,
        caller: &Address,
        index: u64,
        sink: &mut dyn ExecutionSink,
    ) -> Result<SinkReceipt, LedgerError> {
        self.authorize(caller)?;

        let required = self.owners.required_confirmations();
        let tx = self.tx_mut(index)?;

        if tx.executed {
            return Err(LedgerError::AlreadyExecuted(index));
        }

        let have = tx.confirmations.count();
        if have < required {
            return Err(LedgerError::InsufficientConfirmations {
                index,
                have,
                need: required,
            });
        }

        // Flip before dispatch. The sink is an external boundary that can
        // fail or re-enter; it must only ever see the post-flip state.
        tx.executed = true;
        tx.executed_at = Some(chrono::Utc::now());

        let request = DispatchRequest {
            index,
            target: tx.target,
            value: tx.value,
            payload: tx.payload.clone(),
        };

        log::info!("tx {} executing: target {} value {}", index, request.target, request.value);

        match sink.dispatch(self, &request) {
            Ok(receipt) => {
                log::info!("tx {} dispatched, receipt {}", index, receipt.id);
                Ok(receipt)
            }
            Err(err) => {
                // The executed flag stays set; the decision was committed.
                log::warn!("tx {} dispatch failed: {}", index, err);
                Err(LedgerError::SinkDispatchFailed {
                    index,
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Look up a transaction by index
    pub fn transaction(&self, index: u64) -> Result<&Transaction, LedgerError> {
        self.tx(index)
    }

    /// Total number of transactions ever submitted
    pub fn transaction_count(&self) -> u64 {
        self.transactions.len() as u64
    }

    /// All transactions in submission order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions that have not yet executed
    pub fn pending(&self) -> Vec<&Transaction> {
        self.transactions.iter().filter(|tx| !tx.executed).collect()
    }

    /// Derived status of a transaction against this ledger's threshold
    pub fn status(&self, index: u64) -> Result<TxStatus, LedgerError> {
        let required = self.owners.required_confirmations();
        Ok(self.tx(index)?.status(required))
    }
}
