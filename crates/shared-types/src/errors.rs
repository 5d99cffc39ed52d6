//! Shared error types for the storage and catalog boundaries.

use crate::entities::{CourseId, ExamEntryId, StudentId};
use thiserror::Error;

/// Errors surfaced by the storage ports.
///
/// The conflict variants are the storage-layer backstop for the two
/// uniqueness constraints; callers are expected to reject earlier with a
/// friendlier message, but a race that slips past the application-level
/// check lands here.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("batch already exists for exam entry {exam_entry_id}, course {course_id}")]
    DuplicateBatch {
        exam_entry_id: ExamEntryId,
        course_id: CourseId,
    },

    #[error("an open script already exists for student {student_id}, exam entry {exam_entry_id}")]
    ScriptConflict {
        student_id: StudentId,
        exam_entry_id: ExamEntryId,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the read-only catalog ports.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
