//! Journaling execution sink
//!
//! Records every dispatched transaction in an append-only journal with a
//! derived receipt id. This is the sink the CLI runs against; it stands in
//! for whatever transport actually carries the call out.

use crate::ledger::address::Address;
use crate::ledger::ledger::Ledger;
use crate::sink::{DispatchRequest, ExecutionSink, SinkError, SinkReceipt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One dispatched action, as recorded by the journal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Receipt id handed back to the executor
    pub receipt_id: String,
    /// Ledger index of the executed transaction
    pub index: u64,
    /// Destination identity
    pub target: Address,
    /// Amount in base units
    pub value: u128,
    /// Call data, hex-encoded
    pub payload: String,
    /// When the dispatch was recorded
    pub dispatched_at: DateTime<Utc>,
}

/// Sink that appends every dispatch to an in-memory journal
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JournalSink {
    entries: Vec<JournalEntry>,
}

impl JournalSink {
    /// Create an empty journal
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All recorded dispatches, oldest first
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Derive a receipt id from the dispatch contents and journal length
    fn receipt_id(&self, request: &DispatchRequest) -> String {
        let mut hasher = Sha256::new();
        hasher.update(request.index.to_be_bytes());
        hasher.update(request.target.as_bytes());
        hasher.update(request.value.to_be_bytes());
        hasher.update(&request.payload);
        hasher.update((self.entries.len() as u64).to_be_bytes());
        hex::encode(&hasher.finalize()[..16])
    }
}

impl ExecutionSink for JournalSink {
    fn dispatch(
        &mut self,
        _ledger: &mut Ledger,
        request: &DispatchRequest,
    ) -> Result<SinkReceipt, SinkError> {
        let receipt_id = self.receipt_id(request);

        self.entries.push(JournalEntry {
            receipt_id: receipt_id.clone(),
            index: request.index,
            target: request.target,
            value: request.value,
            payload: hex::encode(&request.payload),
            dispatched_at: Utc::now(),
        });

        Ok(SinkReceipt {
            id: receipt_id,
            index: request.index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::owners::OwnerSet;

    fn addr(byte: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = byte;
        Address::from_bytes(bytes)
    }

    fn empty_ledger() -> Ledger {
        Ledger::new(OwnerSet::new(vec![addr(1)], 1).unwrap())
    }

    #[test]
    fn test_journal_records_dispatches() {
        let mut ledger = empty_ledger();
        let mut sink = JournalSink::new();

        let request = DispatchRequest {
            index: 0,
            target: addr(0xee),
            value: 42,
            payload: vec![0xab],
        };

        let receipt = sink.dispatch(&mut ledger, &request).unwrap();
        assert_eq!(receipt.index, 0);
        assert_eq!(sink.entries().len(), 1);

        let entry = &sink.entries()[0];
        assert_eq!(entry.receipt_id, receipt.id);
        assert_eq!(entry.value, 42);
        assert_eq!(entry.payload, "ab");
    }

    #[test]
    fn test_receipt_ids_differ_per_dispatch() {
        let mut ledger = empty_ledger();
        let mut sink = JournalSink::new();

        let request = DispatchRequest {
            index: 0,
            target: addr(0xee),
            value: 42,
            payload: vec![],
        };

        // Same request twice still yields distinct receipts
        let r1 = sink.dispatch(&mut ledger, &request).unwrap();
        let r2 = sink.dispatch(&mut ledger, &request).unwrap();
        assert_ne!(r1.id, r2.id);
    }

    #[test]
    fn test_journal_roundtrips_through_json() {
        let mut ledger = empty_ledger();
        let mut sink = JournalSink::new();
        sink.dispatch(
            &mut ledger,
            &DispatchRequest {
                index: 3,
                target: addr(0xee),
                value: 7,
                payload: vec![1, 2, 3],
            },
        )
        .unwrap();

        let json = serde_json::to_string(&sink).unwrap();
        let back: JournalSink = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries().len(), 1);
        assert_eq!(back.entries()[0].index, 3);
    }
}
