//! In-memory implementations of the four storage ports.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

use shared_types::{
    ActorId, BatchId, BatchScript, BatchStatus, CourseId, ExamEntryId, ExamRegistration,
    MovementId, MovementStore, NewBatchScript, NewMovement, NewRegistration, NewScript,
    RegistrationId, RegistrationStore, Script, ScriptId, ScriptMovement, ScriptStore, StoreError,
    StudentId,
};

/// Registration rows, unique on `(student_id, exam_entry_id)`.
#[derive(Default)]
pub struct InMemoryRegistrationStore {
    rows: RwLock<Vec<ExamRegistration>>,
    next_id: AtomicU64,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistrationStore for InMemoryRegistrationStore {
    fn insert_new(&self, new_rows: Vec<NewRegistration>) -> Result<usize, StoreError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let mut inserted = 0;
        for new in new_rows {
            let duplicate = rows
                .iter()
                .any(|r| r.student_id == new.student_id && r.exam_entry_id == new.exam_entry_id);
            if duplicate {
                continue;
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            rows.push(ExamRegistration {
                id,
                student_id: new.student_id,
                exam_entry_id: new.exam_entry_id,
                course_id: new.course_id,
                student_token: new.student_token,
                is_present: false,
                attendance_marked_at: None,
                script_submitted: false,
                submitted_at: None,
                submitted_to: None,
                batch_id: None,
                script_id: None,
                notes: None,
            });
            inserted += 1;
        }
        Ok(inserted)
    }

    fn get(
        &self,
        student_id: StudentId,
        exam_entry_id: ExamEntryId,
    ) -> Result<Option<ExamRegistration>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .iter()
            .find(|r| r.student_id == student_id && r.exam_entry_id == exam_entry_id)
            .cloned())
    }

    fn get_by_id(&self, id: RegistrationId) -> Result<Option<ExamRegistration>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    fn update(&self, registration: &ExamRegistration) -> Result<(), StoreError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        match rows.iter_mut().find(|r| r.id == registration.id) {
            Some(row) => {
                *row = registration.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "registration",
                id: registration.id,
            }),
        }
    }

    fn count_for_exam_entry(
        &self,
        exam_entry_id: ExamEntryId,
        course_id: CourseId,
    ) -> Result<u32, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .iter()
            .filter(|r| r.exam_entry_id == exam_entry_id && r.course_id == course_id)
            .count() as u32)
    }

    fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<ExamRegistration>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }
}

/// Batch rows, unique on `(exam_entry_id, course_id)`.
#[derive(Default)]
pub struct InMemoryBatchStore {
    rows: RwLock<Vec<BatchScript>>,
    next_id: AtomicU64,
}

impl InMemoryBatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl shared_types::BatchStore for InMemoryBatchStore {
    fn insert(&self, new: NewBatchScript) -> Result<BatchScript, StoreError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let duplicate = rows
            .iter()
            .any(|b| b.exam_entry_id == new.exam_entry_id && b.course_id == new.course_id);
        if duplicate {
            return Err(StoreError::DuplicateBatch {
                exam_entry_id: new.exam_entry_id,
                course_id: new.course_id,
            });
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let batch = BatchScript {
            id,
            exam_entry_id: new.exam_entry_id,
            course_id: new.course_id,
            batch_token: String::new(),
            status: BatchStatus::Pending,
            total_registered: new.total_registered,
            scripts_submitted: 0,
            scripts_collected: 0,
            scripts_graded: 0,
            sealed_by: None,
            sealed_at: None,
            assigned_lecturer_id: None,
            delivered_at: None,
            completed_at: None,
            notes: None,
        };
        rows.push(batch.clone());
        Ok(batch)
    }

    fn get(&self, id: BatchId) -> Result<Option<BatchScript>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows.iter().find(|b| b.id == id).cloned())
    }

    fn get_for_entry_course(
        &self,
        exam_entry_id: ExamEntryId,
        course_id: CourseId,
    ) -> Result<Option<BatchScript>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .iter()
            .find(|b| b.exam_entry_id == exam_entry_id && b.course_id == course_id)
            .cloned())
    }

    fn update(&self, batch: &BatchScript) -> Result<(), StoreError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        match rows.iter_mut().find(|b| b.id == batch.id) {
            Some(row) => {
                *row = batch.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "batch",
                id: batch.id,
            }),
        }
    }

    fn list_sealed_unassigned(&self) -> Result<Vec<BatchScript>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        let mut sealed: Vec<BatchScript> = rows
            .iter()
            .filter(|b| b.status == BatchStatus::Sealed && b.assigned_lecturer_id.is_none())
            .cloned()
            .collect();
        sealed.sort_by_key(|b| b.sealed_at);
        Ok(sealed)
    }

    fn list_for_lecturer(&self, lecturer_id: ActorId) -> Result<Vec<BatchScript>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .iter()
            .filter(|b| b.assigned_lecturer_id == Some(lecturer_id))
            .cloned()
            .collect())
    }
}

/// Script rows; rejects a second non-terminal script per
/// `(student_id, exam_entry_id)`.
#[derive(Default)]
pub struct InMemoryScriptStore {
    rows: RwLock<Vec<Script>>,
    next_id: AtomicU64,
}

impl InMemoryScriptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScriptStore for InMemoryScriptStore {
    fn insert(&self, new: NewScript) -> Result<Script, StoreError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let open_exists = rows.iter().any(|s| {
            s.student_id == new.student_id
                && s.exam_entry_id == new.exam_entry_id
                && !s.status.is_terminal()
        });
        if open_exists {
            return Err(StoreError::ScriptConflict {
                student_id: new.student_id,
                exam_entry_id: new.exam_entry_id,
            });
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let script = Script {
            id,
            token: new.token,
            student_id: new.student_id,
            exam_entry_id: new.exam_entry_id,
            batch_id: new.batch_id,
            current_holder_id: new.current_holder_id,
            status: new.status,
            notes: new.notes,
        };
        rows.push(script.clone());
        Ok(script)
    }

    fn get(&self, id: ScriptId) -> Result<Option<Script>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows.iter().find(|s| s.id == id).cloned())
    }

    fn update(&self, script: &Script) -> Result<(), StoreError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        match rows.iter_mut().find(|s| s.id == script.id) {
            Some(row) => {
                *row = script.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "script",
                id: script.id,
            }),
        }
    }

    fn list_for_batch(&self, batch_id: BatchId) -> Result<Vec<Script>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .iter()
            .filter(|s| s.batch_id == batch_id)
            .cloned()
            .collect())
    }
}

/// Append-only movement rows. No update or delete is implemented, matching
/// the port.
#[derive(Default)]
pub struct InMemoryMovementStore {
    rows: RwLock<Vec<ScriptMovement>>,
    next_id: AtomicU64,
}

impl InMemoryMovementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MovementStore for InMemoryMovementStore {
    fn append(
        &self,
        movement: NewMovement,
        recorded_at: DateTime<Utc>,
    ) -> Result<MovementId, StoreError> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        rows.push(ScriptMovement {
            id,
            script_id: movement.script_id,
            batch_id: movement.batch_id,
            movement_type: movement.movement_type,
            to_actor_id: movement.to_actor_id,
            location: movement.location,
            notes: movement.notes,
            recorded_at,
        });
        Ok(id)
    }

    fn history_for_batch(
        &self,
        batch_id: BatchId,
        limit: usize,
    ) -> Result<Vec<ScriptMovement>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        let mut history: Vec<ScriptMovement> = rows
            .iter()
            .filter(|m| m.batch_id == Some(batch_id))
            .cloned()
            .collect();
        history.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        history.truncate(limit);
        Ok(history)
    }

    fn history_for_script(
        &self,
        script_id: ScriptId,
        limit: usize,
    ) -> Result<Vec<ScriptMovement>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        let mut history: Vec<ScriptMovement> = rows
            .iter()
            .filter(|m| m.script_id == Some(script_id))
            .cloned()
            .collect();
        history.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        history.truncate(limit);
        Ok(history)
    }

    fn latest_for_batch(
        &self,
        batch_id: BatchId,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .iter()
            .filter(|m| m.batch_id == Some(batch_id))
            .map(|m| m.recorded_at)
            .max())
    }
}
