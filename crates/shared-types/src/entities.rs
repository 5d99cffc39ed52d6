//! # Core Domain Entities
//!
//! The four records that make up the chain of custody for physical exam
//! scripts.
//!
//! ## Clusters
//!
//! - **Registration**: `ExamRegistration`, one row per (student, exam entry)
//! - **Custody containers**: `BatchScript`, one per (exam entry, course),
//!   and `Script`, one per physically submitted answer booklet
//! - **Audit**: `ScriptMovement`, the immutable append-only movement record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ID ALIASES
// =============================================================================

/// A student identity from the surrounding user system.
pub type StudentId = u64;
/// One scheduled exam sitting (course + date/time + venue) within a timetable.
pub type ExamEntryId = u64;
/// A course from the catalog.
pub type CourseId = u64;
/// A semester from the catalog.
pub type SemesterId = u64;
/// An academic program from the catalog.
pub type ProgramId = u64;
/// A published exam timetable.
pub type TimetableId = u64;
/// Any user that can hold custody: invigilator, lecturer, admin.
pub type ActorId = u64;
/// Store-assigned id of an [`ExamRegistration`] row.
pub type RegistrationId = u64;
/// Store-assigned id of a [`BatchScript`] row.
pub type BatchId = u64;
/// Store-assigned id of a [`Script`] row.
pub type ScriptId = u64;
/// Store-assigned id of a [`ScriptMovement`] row.
pub type MovementId = u64;

// =============================================================================
// STATUS ENUMERATIONS
// =============================================================================

/// Lifecycle of a batch container.
///
/// Linear state machine:
/// `Pending -> Sealed -> WithLecturer -> GradingInProgress -> GradingCompleted`.
///
/// Discriminants are part of the stored representation: extend by
/// appending, never renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchStatus {
    /// Created by enrollment; scripts are still being collected.
    Pending = 1,
    /// Physically sealed by an invigilator after the exam.
    Sealed = 2,
    /// Handed over to the assigned lecturer.
    WithLecturer = 3,
    /// Lecturer has started grading.
    GradingInProgress = 4,
    /// Terminal: every script graded and the batch closed out.
    GradingCompleted = 5,
}

impl BatchStatus {
    /// Whether `next` is the legal successor of `self` in the lifecycle.
    pub fn can_advance_to(self, next: BatchStatus) -> bool {
        matches!(
            (self, next),
            (BatchStatus::Pending, BatchStatus::Sealed)
                | (BatchStatus::Sealed, BatchStatus::WithLecturer)
                | (BatchStatus::WithLecturer, BatchStatus::GradingInProgress)
                | (BatchStatus::GradingInProgress, BatchStatus::GradingCompleted)
        )
    }

    /// Terminal state check.
    pub fn is_terminal(self) -> bool {
        self == BatchStatus::GradingCompleted
    }
}

/// Lifecycle of a single physical script.
///
/// Discriminants are part of the stored representation: extend by
/// appending, never renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptStatus {
    /// Taken from the student by an invigilator at scan time.
    Collected = 1,
    /// Passed the secondary invigilator checkpoint.
    Verified = 2,
    /// Scanned into the batch inventory.
    Scanned = 3,
    /// Dispatched from the venue toward grading.
    Dispatched = 4,
    /// In the assigned lecturer's hands.
    ReceivedForGrading = 5,
    /// Lecturer is grading this script.
    GradingInProgress = 6,
    /// Terminal: grade recorded.
    Graded = 7,
}

impl ScriptStatus {
    /// Whether the script has been physically taken from the student.
    ///
    /// Every status in the current lifecycle qualifies; the set exists so
    /// that a future pre-collection state (e.g. a reserved placeholder)
    /// only needs to be excluded here.
    pub fn is_physically_collected(self) -> bool {
        matches!(
            self,
            ScriptStatus::Collected
                | ScriptStatus::Verified
                | ScriptStatus::Scanned
                | ScriptStatus::Dispatched
                | ScriptStatus::ReceivedForGrading
                | ScriptStatus::GradingInProgress
                | ScriptStatus::Graded
        )
    }

    /// Terminal state check.
    pub fn is_terminal(self) -> bool {
        self == ScriptStatus::Graded
    }
}

/// The kind of physical transfer a [`ScriptMovement`] records.
///
/// Discriminants are part of the stored representation: extend by
/// appending, never renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// Script taken from the student at the desk.
    CollectedFromStudent = 1,
    /// Script checked at the secondary invigilator checkpoint.
    VerifiedByInvigilator = 2,
    /// Batch container sealed at the venue.
    BatchSealed = 3,
    /// Batch handed to the assigned lecturer.
    BatchTransferred = 4,
    /// Grading closed out for the batch.
    GradingCompleted = 5,
    /// Administrative status override (audit trail for the escape hatch).
    StatusOverride = 6,
}

// =============================================================================
// ENTITIES
// =============================================================================

/// One student's registration for one exam sitting.
///
/// Unique on `(student_id, exam_entry_id)`. Created at timetable-publish
/// time by enrollment; mutated only by the submission workflow
/// (attendance and submission fields); never deleted.
///
/// Invariant: `script_submitted == true` implies `script_id`, `batch_id`
/// and `submitted_at` are all populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRegistration {
    pub id: RegistrationId,
    pub student_id: StudentId,
    pub exam_entry_id: ExamEntryId,
    pub course_id: CourseId,
    /// Tamper-evident token issued at enrollment, printed on the exam slip.
    pub student_token: String,
    /// Physical presence in the venue. A valid scan flips this on.
    pub is_present: bool,
    pub attendance_marked_at: Option<DateTime<Utc>>,
    /// Idempotency guard for the submission hot path.
    pub script_submitted: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    /// The invigilator the script was handed to.
    pub submitted_to: Option<ActorId>,
    pub batch_id: Option<BatchId>,
    pub script_id: Option<ScriptId>,
    pub notes: Option<String>,
}

/// The administrative container tracking all scripts for one course within
/// one exam entry.
///
/// Exactly one exists per `(exam_entry_id, course_id)`; never deleted.
///
/// Invariant: `scripts_graded <= scripts_submitted <= total_registered`.
/// The three `scripts_*` counters are a cache recomputed from the `Script`
/// table; there is no increment-in-place code path anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchScript {
    pub id: BatchId,
    pub exam_entry_id: ExamEntryId,
    pub course_id: CourseId,
    /// Tamper-evident token printed on the batch envelope.
    pub batch_token: String,
    pub status: BatchStatus,
    /// Snapshot of the eligible student count at provisioning time.
    pub total_registered: u32,
    pub scripts_submitted: u32,
    pub scripts_collected: u32,
    pub scripts_graded: u32,
    pub sealed_by: Option<ActorId>,
    pub sealed_at: Option<DateTime<Utc>>,
    pub assigned_lecturer_id: Option<ActorId>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// A single student's physical answer booklet, once collected.
///
/// At most one non-terminal `Script` exists per
/// `(student_id, exam_entry_id)`; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub id: ScriptId,
    /// The scanned token value, embedded for offline reconciliation.
    pub token: String,
    pub student_id: StudentId,
    pub exam_entry_id: ExamEntryId,
    pub batch_id: BatchId,
    /// Who physically has this booklet right now.
    pub current_holder_id: ActorId,
    pub status: ScriptStatus,
    pub notes: Option<String>,
}

/// One immutable audit record of a physical transfer.
///
/// `script_id` is absent for batch-level events. The ordered sequence of
/// movements for a batch or script is the authoritative history from which
/// every current-state field is, in principle, reconstructible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptMovement {
    pub id: MovementId,
    pub script_id: Option<ScriptId>,
    pub batch_id: Option<BatchId>,
    pub movement_type: MovementType,
    /// Who received custody.
    pub to_actor_id: ActorId,
    /// Free-form location label ("Hall B, desk 14").
    pub location: String,
    pub notes: Option<String>,
    /// Assigned at insert by the ledger; monotonically non-decreasing per
    /// batch; never mutated.
    pub recorded_at: DateTime<Utc>,
}
