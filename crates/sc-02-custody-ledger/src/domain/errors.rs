use shared_types::StoreError;
use thiserror::Error;

/// Ledger failures: the only way an append can fail is the store being
/// unavailable, since no business rules are checked here.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
