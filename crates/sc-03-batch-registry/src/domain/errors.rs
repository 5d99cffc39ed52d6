use sc_02_custody_ledger::LedgerError;
use shared_types::{BatchId, BatchStatus, StoreError};
use thiserror::Error;

/// Batch lifecycle and reconciliation failures.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("batch {0} not found")]
    BatchNotFound(BatchId),

    #[error("batch {batch_id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        batch_id: BatchId,
        from: BatchStatus,
        to: BatchStatus,
    },

    /// `Sealed` and `WithLecturer` carry stamps and side effects that only
    /// their dedicated operations apply.
    #[error("{status:?} is set through its dedicated operation, not a status update")]
    DedicatedTransition { status: BatchStatus },

    /// Reconciliation found more collected scripts than registered
    /// students. Storage corruption, surfaced rather than cached.
    #[error(
        "batch {batch_id} counters violate graded <= submitted <= registered \
         ({graded}/{submitted}/{registered})"
    )]
    CounterInvariant {
        batch_id: BatchId,
        graded: u32,
        submitted: u32,
        registered: u32,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
