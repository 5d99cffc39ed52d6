//! Batch lifecycle operations and counter reconciliation.

use std::sync::Arc;

use tracing::{info, warn};

use sc_02_custody_ledger::CustodyLedger;
use shared_types::{
    ActorId, BatchId, BatchScript, BatchStatus, BatchStore, MovementType, NewMovement,
    ScriptStatus, ScriptStore, TimeSource,
};

use super::errors::RegistryError;
use super::stats::BatchStatistics;

/// Owns `BatchScript` lifecycle state and the derived counters.
pub struct BatchRegistry {
    batches: Arc<dyn BatchStore>,
    scripts: Arc<dyn ScriptStore>,
    ledger: Arc<CustodyLedger>,
    clock: Arc<dyn TimeSource>,
}

impl BatchRegistry {
    pub fn new(
        batches: Arc<dyn BatchStore>,
        scripts: Arc<dyn ScriptStore>,
        ledger: Arc<CustodyLedger>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            batches,
            scripts,
            ledger,
            clock,
        }
    }

    /// Fetch a batch or fail with `BatchNotFound`.
    pub fn get(&self, batch_id: BatchId) -> Result<BatchScript, RegistryError> {
        self.batches
            .get(batch_id)?
            .ok_or(RegistryError::BatchNotFound(batch_id))
    }

    /// Seal a batch after the exam: `Pending -> Sealed`.
    ///
    /// Re-sealing an already-`Sealed` batch is a no-op returning the batch
    /// unchanged, so a scan-station retry cannot duplicate the
    /// `BatchSealed` ledger entry. Sealing a batch that has moved past
    /// `Sealed` is rejected.
    pub fn seal(
        &self,
        batch_id: BatchId,
        sealed_by: ActorId,
        notes: Option<String>,
    ) -> Result<BatchScript, RegistryError> {
        let mut batch = self.get(batch_id)?;

        match batch.status {
            BatchStatus::Sealed => return Ok(batch),
            BatchStatus::Pending => {}
            from => {
                return Err(RegistryError::InvalidTransition {
                    batch_id,
                    from,
                    to: BatchStatus::Sealed,
                })
            }
        }

        batch.status = BatchStatus::Sealed;
        batch.sealed_by = Some(sealed_by);
        batch.sealed_at = Some(self.clock.now());
        if notes.is_some() {
            batch.notes = notes.clone();
        }
        self.batches.update(&batch)?;

        let mut note = format!(
            "sealed with {} of {} scripts submitted",
            batch.scripts_submitted, batch.total_registered
        );
        if let Some(extra) = notes {
            note.push_str("; ");
            note.push_str(&extra);
        }
        self.ledger.append(NewMovement {
            script_id: None,
            batch_id: Some(batch.id),
            movement_type: MovementType::BatchSealed,
            to_actor_id: sealed_by,
            location: "batch sealing point".into(),
            notes: Some(note),
        })?;

        info!(batch_id = batch.id, sealed_by, "batch sealed");
        Ok(batch)
    }

    /// Hand the batch to a lecturer for grading.
    ///
    /// Accepted only from `Pending` or `Sealed`. Custody of the whole
    /// batch moves with the container: every script in it gets the
    /// lecturer as its current holder and advances to
    /// `ReceivedForGrading`.
    pub fn assign_to_lecturer(
        &self,
        batch_id: BatchId,
        lecturer_id: ActorId,
        assigned_by: ActorId,
    ) -> Result<BatchScript, RegistryError> {
        let mut batch = self.get(batch_id)?;

        if !matches!(batch.status, BatchStatus::Pending | BatchStatus::Sealed) {
            return Err(RegistryError::InvalidTransition {
                batch_id,
                from: batch.status,
                to: BatchStatus::WithLecturer,
            });
        }

        batch.status = BatchStatus::WithLecturer;
        batch.assigned_lecturer_id = Some(lecturer_id);
        batch.delivered_at = Some(self.clock.now());
        self.batches.update(&batch)?;

        let scripts = self.scripts.list_for_batch(batch_id)?;
        let moved = scripts.len();
        for mut script in scripts {
            script.current_holder_id = lecturer_id;
            script.status = ScriptStatus::ReceivedForGrading;
            self.scripts.update(&script)?;
        }

        self.ledger.append(NewMovement {
            script_id: None,
            batch_id: Some(batch.id),
            movement_type: MovementType::BatchTransferred,
            to_actor_id: lecturer_id,
            location: "lecturer handover".into(),
            notes: Some(format!(
                "batch of {moved} scripts transferred by actor {assigned_by}"
            )),
        })?;

        info!(batch_id, lecturer_id, moved, "batch assigned to lecturer");
        Ok(batch)
    }

    /// Advance a batch through the grading phase of the lifecycle.
    ///
    /// Only `GradingInProgress` and `GradingCompleted` can be reached
    /// here; `Sealed` and `WithLecturer` carry stamps and side effects
    /// applied by [`BatchRegistry::seal`] and
    /// [`BatchRegistry::assign_to_lecturer`]. Anything else needs the
    /// audited [`BatchRegistry::override_status`].
    pub fn advance_status(
        &self,
        batch_id: BatchId,
        status: BatchStatus,
        updated_by: ActorId,
        notes: Option<String>,
    ) -> Result<BatchScript, RegistryError> {
        if !matches!(
            status,
            BatchStatus::GradingInProgress | BatchStatus::GradingCompleted
        ) {
            return Err(RegistryError::DedicatedTransition { status });
        }

        let mut batch = self.get(batch_id)?;
        if !batch.status.can_advance_to(status) {
            return Err(RegistryError::InvalidTransition {
                batch_id,
                from: batch.status,
                to: status,
            });
        }

        batch.status = status;
        if notes.is_some() {
            batch.notes = notes;
        }
        if status == BatchStatus::GradingCompleted {
            batch.completed_at = Some(self.clock.now());
        }
        self.batches.update(&batch)?;

        if status == BatchStatus::GradingCompleted {
            self.ledger.append(NewMovement {
                script_id: None,
                batch_id: Some(batch.id),
                movement_type: MovementType::GradingCompleted,
                to_actor_id: updated_by,
                location: "grading office".into(),
                notes: Some(format!(
                    "grading completed with {} of {} scripts graded",
                    batch.scripts_graded, batch.scripts_submitted
                )),
            })?;
        }

        info!(batch_id, status = ?status, "batch status advanced");
        Ok(batch)
    }

    /// Administrative escape hatch: set any status, and leave an audit
    /// trail saying so.
    pub fn override_status(
        &self,
        batch_id: BatchId,
        status: BatchStatus,
        actor: ActorId,
        reason: &str,
    ) -> Result<BatchScript, RegistryError> {
        let mut batch = self.get(batch_id)?;
        let from = batch.status;

        batch.status = status;
        if status == BatchStatus::GradingCompleted {
            batch.completed_at = Some(self.clock.now());
        }
        self.batches.update(&batch)?;

        self.ledger.append(NewMovement {
            script_id: None,
            batch_id: Some(batch.id),
            movement_type: MovementType::StatusOverride,
            to_actor_id: actor,
            location: "administrative override".into(),
            notes: Some(format!("status override {from:?} -> {status:?}: {reason}")),
        })?;

        warn!(batch_id, ?from, to = ?status, actor, "batch status overridden");
        Ok(batch)
    }

    /// Recompute the derived counters from the Script table.
    ///
    /// This is the reconciliation primitive: the counters on the batch row
    /// are a cache, and this is the only code path that writes them.
    /// `scripts_submitted` and `scripts_collected` are computed from the
    /// same physically-collected status set and are equal by construction;
    /// a future divergence only needs the two filters split here.
    pub fn recompute_counts(&self, batch_id: BatchId) -> Result<BatchScript, RegistryError> {
        let mut batch = self.get(batch_id)?;
        let scripts = self.scripts.list_for_batch(batch_id)?;

        let submitted = scripts
            .iter()
            .filter(|s| s.status.is_physically_collected())
            .count() as u32;
        let graded = scripts
            .iter()
            .filter(|s| s.status == ScriptStatus::Graded)
            .count() as u32;

        if graded > submitted || submitted > batch.total_registered {
            return Err(RegistryError::CounterInvariant {
                batch_id,
                graded,
                submitted,
                registered: batch.total_registered,
            });
        }

        batch.scripts_submitted = submitted;
        batch.scripts_collected = submitted;
        batch.scripts_graded = graded;
        self.batches.update(&batch)?;
        Ok(batch)
    }

    /// Progress snapshot for a batch, from the cached counters.
    pub fn statistics(&self, batch_id: BatchId) -> Result<BatchStatistics, RegistryError> {
        Ok(BatchStatistics::for_batch(&self.get(batch_id)?))
    }

    /// Sealed batches awaiting a lecturer, oldest seal first. This is the
    /// fairness ordering for dispatch.
    pub fn pending_assignment(&self) -> Result<Vec<BatchScript>, RegistryError> {
        Ok(self.batches.list_sealed_unassigned()?)
    }

    /// Every batch currently assigned to the lecturer.
    pub fn batches_for_lecturer(
        &self,
        lecturer_id: ActorId,
    ) -> Result<Vec<BatchScript>, RegistryError> {
        Ok(self.batches.list_for_lecturer(lecturer_id)?)
    }
}
