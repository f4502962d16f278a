//! Execution sink boundary
//!
//! A confirmed transaction leaves the ledger through an [`ExecutionSink`],
//! which performs the actual external effect. The sink is an untrusted
//! capability boundary: it can fail, and it can call back into the ledger
//! while a dispatch is still on the stack. The ledger defends against that
//! by marking the transaction executed before dispatching, never by locking.

pub mod journal;

pub use journal::{JournalEntry, JournalSink};

use crate::ledger::address::Address;
use crate::ledger::ledger::Ledger;
use thiserror::Error;

/// Errors a sink may report for a dispatch
///
/// By the time a sink error surfaces, the transaction is already marked
/// executed; the ledger maps this to its own post-flip failure variant.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("dispatch rejected: {0}")]
    Rejected(String),
}

/// The action handed to a sink: one confirmed transaction
#[derive(Clone, Debug)]
pub struct DispatchRequest {
    /// Ledger index of the transaction being executed
    pub index: u64,
    /// Destination identity
    pub target: Address,
    /// Amount in base units
    pub value: u128,
    /// Opaque call data
    pub payload: Vec<u8>,
}

/// Proof that a sink accepted a dispatch
#[derive(Clone, Debug)]
pub struct SinkReceipt {
    /// Sink-assigned receipt identifier
    pub id: String,
    /// Ledger index the receipt belongs to
    pub index: u64,
}

/// Receiver of confirmed transactions
pub trait ExecutionSink {
    /// Perform the external effect for a confirmed transaction
    ///
    /// The ledger is passed back in so the sink may re-enter it; any
    /// reentrant call observes the transaction already marked executed.
    fn dispatch(
        &mut self,
        ledger: &mut Ledger,
        request: &DispatchRequest,
    ) -> Result<SinkReceipt, SinkError>;
}
