use sc_01_identifier_codec::CodecError;
use sc_02_custody_ledger::LedgerError;
use sc_03_batch_registry::RegistryError;
use shared_types::{
    CatalogError, CourseId, ExamEntryId, ScriptId, ScriptStatus, StoreError, StudentId,
};
use thiserror::Error;

/// Submission hot-path failures.
///
/// Each variant carries enough context for the scan station to show an
/// operator-actionable one-liner.
#[derive(Debug, Clone, Error)]
pub enum SubmissionError {
    /// The scanned identifier failed decoding or verification. Nothing was
    /// loaded or written.
    #[error("token rejected: {0}")]
    Token(#[from] CodecError),

    #[error("student {student_id} is not registered for exam entry {exam_entry_id}")]
    NotRegistered {
        student_id: StudentId,
        exam_entry_id: ExamEntryId,
    },

    /// The idempotency guard: a second scan of the same student changes
    /// nothing and double-counts nothing.
    #[error("script already submitted for student {student_id} in exam entry {exam_entry_id}")]
    AlreadySubmitted {
        student_id: StudentId,
        exam_entry_id: ExamEntryId,
    },

    /// Enrollment never provisioned a container for this sitting.
    #[error("no batch provisioned for exam entry {exam_entry_id}, course {course_id}")]
    BatchNotProvisioned {
        exam_entry_id: ExamEntryId,
        course_id: CourseId,
    },

    #[error("script {0} not found")]
    ScriptNotFound(ScriptId),

    #[error("script {script_id} cannot be verified while {status:?}")]
    InvalidScriptState {
        script_id: ScriptId,
        status: ScriptStatus,
    },

    #[error("student {0} has no profile in the directory")]
    UnknownStudent(StudentId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
