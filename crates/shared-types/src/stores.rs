//! # Storage Ports (Driven Ports)
//!
//! Abstract interfaces over the persistence layer. The engine never talks
//! to a database directly; production wires an ORM-backed adapter behind
//! these traits, tests wire the in-memory adapters.
//!
//! All stores are `Send + Sync` and take `&self`: adapters use interior
//! mutability so concurrent submission calls can share them behind an
//! `Arc`.

use chrono::{DateTime, Utc};

use crate::entities::{
    ActorId, BatchId, BatchScript, CourseId, ExamEntryId, ExamRegistration, MovementId,
    MovementType, RegistrationId, Script, ScriptId, ScriptMovement, ScriptStatus, StudentId,
};
use crate::errors::StoreError;

/// Row data for a registration about to be created by enrollment.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub student_id: StudentId,
    pub exam_entry_id: ExamEntryId,
    pub course_id: CourseId,
    pub student_token: String,
}

/// Registration persistence.
///
/// Uniqueness on `(student_id, exam_entry_id)` is enforced inside the
/// store: `insert_new` silently skips rows that would violate it, which
/// makes re-running enrollment additive-only.
pub trait RegistrationStore: Send + Sync {
    /// Bulk-insert, skipping `(student_id, exam_entry_id)` duplicates.
    /// Returns the number of rows actually inserted.
    fn insert_new(&self, rows: Vec<NewRegistration>) -> Result<usize, StoreError>;

    fn get(
        &self,
        student_id: StudentId,
        exam_entry_id: ExamEntryId,
    ) -> Result<Option<ExamRegistration>, StoreError>;

    fn get_by_id(&self, id: RegistrationId) -> Result<Option<ExamRegistration>, StoreError>;

    /// Persist mutated attendance/submission fields. `NotFound` if the row
    /// was never created.
    fn update(&self, registration: &ExamRegistration) -> Result<(), StoreError>;

    fn count_for_exam_entry(
        &self,
        exam_entry_id: ExamEntryId,
        course_id: CourseId,
    ) -> Result<u32, StoreError>;

    fn list_for_student(&self, student_id: StudentId)
        -> Result<Vec<ExamRegistration>, StoreError>;
}

/// Row data for a batch container about to be provisioned.
///
/// The token is absent on purpose: it is minted only after the store has
/// assigned the real batch id, then persisted via `update`.
#[derive(Debug, Clone)]
pub struct NewBatchScript {
    pub exam_entry_id: ExamEntryId,
    pub course_id: CourseId,
    pub total_registered: u32,
}

/// Batch container persistence.
pub trait BatchStore: Send + Sync {
    /// Insert with `DuplicateBatch` on a second row for the same
    /// `(exam_entry_id, course_id)` pair.
    fn insert(&self, new: NewBatchScript) -> Result<BatchScript, StoreError>;

    fn get(&self, id: BatchId) -> Result<Option<BatchScript>, StoreError>;

    fn get_for_entry_course(
        &self,
        exam_entry_id: ExamEntryId,
        course_id: CourseId,
    ) -> Result<Option<BatchScript>, StoreError>;

    fn update(&self, batch: &BatchScript) -> Result<(), StoreError>;

    /// Sealed batches with no assigned lecturer, oldest seal first.
    fn list_sealed_unassigned(&self) -> Result<Vec<BatchScript>, StoreError>;

    fn list_for_lecturer(&self, lecturer_id: ActorId) -> Result<Vec<BatchScript>, StoreError>;
}

/// Row data for a script created on first valid scan.
#[derive(Debug, Clone)]
pub struct NewScript {
    pub token: String,
    pub student_id: StudentId,
    pub exam_entry_id: ExamEntryId,
    pub batch_id: BatchId,
    pub current_holder_id: ActorId,
    pub status: ScriptStatus,
    pub notes: Option<String>,
}

/// Physical script persistence.
pub trait ScriptStore: Send + Sync {
    /// Insert with `ScriptConflict` when a non-terminal script already
    /// exists for `(student_id, exam_entry_id)`: the storage backstop
    /// behind the application-level already-submitted check.
    fn insert(&self, new: NewScript) -> Result<Script, StoreError>;

    fn get(&self, id: ScriptId) -> Result<Option<Script>, StoreError>;

    fn update(&self, script: &Script) -> Result<(), StoreError>;

    fn list_for_batch(&self, batch_id: BatchId) -> Result<Vec<Script>, StoreError>;
}

/// Row data for a movement about to be appended.
#[derive(Debug, Clone)]
pub struct NewMovement {
    pub script_id: Option<ScriptId>,
    pub batch_id: Option<BatchId>,
    pub movement_type: MovementType,
    pub to_actor_id: ActorId,
    pub location: String,
    pub notes: Option<String>,
}

/// Movement-log persistence. Append-only: no update or delete exists on
/// this port, by design.
pub trait MovementStore: Send + Sync {
    /// Append a movement with the ledger-assigned timestamp.
    fn append(
        &self,
        movement: NewMovement,
        recorded_at: DateTime<Utc>,
    ) -> Result<MovementId, StoreError>;

    /// Movements referencing the batch, most recent first.
    fn history_for_batch(
        &self,
        batch_id: BatchId,
        limit: usize,
    ) -> Result<Vec<ScriptMovement>, StoreError>;

    /// Movements referencing the script, most recent first.
    fn history_for_script(
        &self,
        script_id: ScriptId,
        limit: usize,
    ) -> Result<Vec<ScriptMovement>, StoreError>;

    /// Timestamp of the newest movement for the batch, if any. Used by the
    /// ledger to keep per-batch timestamps monotonically non-decreasing.
    fn latest_for_batch(&self, batch_id: BatchId) -> Result<Option<DateTime<Utc>>, StoreError>;
}
