//! Proposed transactions and their confirmation bookkeeping
//!
//! A transaction is a proposed external action: target, value, and an opaque
//! payload. Owners confirm it by flipping their slot in the transaction's
//! confirmation set; the slot layout mirrors owner positions so duplicate
//! confirmations are locally detectable.

use crate::ledger::address::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serde helper: payload bytes as a hex string
mod hex_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(de::Error::custom)
    }
}

/// Derived lifecycle state of a transaction
///
/// Only `executed` and the confirmation slots are stored; whether a pending
/// transaction has reached the threshold is computed on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxStatus {
    /// Below the confirmation threshold
    AwaitingConfirmations,
    /// Threshold reached, ready to execute
    Confirmed,
    /// Dispatched; terminal
    Executed,
}

/// Per-owner confirmation slots for one transaction
///
/// Slot `i` belongs to the owner at position `i` in the owner set. Slots are
/// frozen once the transaction executes; the ledger enforces that ordering.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfirmationSet {
    slots: Vec<bool>,
}

impl ConfirmationSet {
    /// Create an empty set sized to the owner count
    pub fn new(owner_count: usize) -> Self {
        Self {
            slots: vec![false; owner_count],
        }
    }

    /// Whether the owner at `position` has confirmed
    pub fn is_confirmed(&self, position: usize) -> bool {
        self.slots.get(position).copied().unwrap_or(false)
    }

    /// Mark the owner at `position` as confirmed
    pub fn confirm(&mut self, position: usize) {
        if let Some(slot) = self.slots.get_mut(position) {
            *slot = true;
        }
    }

    /// Clear the owner's confirmation
    pub fn revoke(&mut self, position: usize) {
        if let Some(slot) = self.slots.get_mut(position) {
            *slot = false;
        }
    }

    /// Number of confirmed slots
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|c| **c).count()
    }
}

/// A proposed external action awaiting threshold approval
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    /// Position in the ledger, assigned at submission and never reused
    pub index: u64,
    /// Destination identity
    pub target: Address,
    /// Amount to transfer, in base units
    pub value: u128,
    /// Opaque call data, interpreted by the execution sink
    #[serde(with = "hex_bytes")]
    pub payload: Vec<u8>,
    /// Flips false -> true exactly once, before dispatch
    pub executed: bool,
    /// Per-owner confirmation slots
    pub(crate) confirmations: ConfirmationSet,
    /// When the transaction was submitted
    pub submitted_at: DateTime<Utc>,
    /// When `executed` flipped true, if it has
    pub executed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create a fresh pending transaction with no confirmations
    pub fn new(index: u64, target: Address, value: u128, payload: Vec<u8>, owner_count: usize) -> Self {
        Self {
            index,
            target,
            value,
            payload,
            executed: false,
            confirmations: ConfirmationSet::new(owner_count),
            submitted_at: Utc::now(),
            executed_at: None,
        }
    }

    /// Number of owners who have confirmed
    pub fn confirmation_count(&self) -> usize {
        self.confirmations.count()
    }

    /// Whether the owner at `position` has confirmed
    pub fn is_confirmed_by(&self, position: usize) -> bool {
        self.confirmations.is_confirmed(position)
    }

    /// Derived status against a confirmation threshold
    pub fn status(&self, required: usize) -> TxStatus {
        if self.executed {
            TxStatus::Executed
        } else if self.confirmation_count() >= required {
            TxStatus::Confirmed
        } else {
            TxStatus::AwaitingConfirmations
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Address {
        "0x00000000000000000000000000000000000000ee".parse().unwrap()
    }

    #[test]
    fn test_new_transaction_is_pending() {
        let tx = Transaction::new(0, target(), 10, vec![], 3);
        assert!(!tx.executed);
        assert_eq!(tx.confirmation_count(), 0);
        assert_eq!(tx.status(2), TxStatus::AwaitingConfirmations);
        assert!(tx.executed_at.is_none());
    }

    #[test]
    fn test_confirmation_slots() {
        let mut set = ConfirmationSet::new(3);
        assert_eq!(set.count(), 0);

        set.confirm(0);
        set.confirm(2);
        assert_eq!(set.count(), 2);
        assert!(set.is_confirmed(0));
        assert!(!set.is_confirmed(1));
        assert!(set.is_confirmed(2));

        set.revoke(0);
        assert_eq!(set.count(), 1);
        assert!(!set.is_confirmed(0));
    }

    #[test]
    fn test_confirm_same_slot_twice_counts_once() {
        let mut set = ConfirmationSet::new(2);
        set.confirm(1);
        set.confirm(1);
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn test_status_is_derived() {
        let mut tx = Transaction::new(0, target(), 10, vec![], 3);
        tx.confirmations.confirm(0);
        assert_eq!(tx.status(2), TxStatus::AwaitingConfirmations);

        tx.confirmations.confirm(1);
        assert_eq!(tx.status(2), TxStatus::Confirmed);

        tx.executed = true;
        assert_eq!(tx.status(2), TxStatus::Executed);
    }

    #[test]
    fn test_payload_serializes_as_hex() {
        let tx = Transaction::new(0, target(), 0, vec![0xde, 0xad, 0xbe, 0xef], 1);
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"payload\":\"deadbeef\""));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.payload, vec![0xde, 0xad, 0xbe, 0xef]);
    }
}
