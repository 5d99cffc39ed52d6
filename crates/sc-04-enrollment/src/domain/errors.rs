use sc_01_identifier_codec::CodecError;
use shared_types::{CatalogError, ExamEntryId, StoreError};
use thiserror::Error;

/// Enrollment provisioning failures.
#[derive(Debug, Clone, Error)]
pub enum EnrollmentError {
    #[error("exam entry {0} not found in the timetable catalog")]
    ExamEntryNotFound(ExamEntryId),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("token minting failed: {0}")]
    Codec(#[from] CodecError),
}
