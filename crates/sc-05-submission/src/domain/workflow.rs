//! The scan-driven submission hot path.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sc_01_identifier_codec::{IdentifierCodec, TokenPayload, TokenType};
use sc_02_custody_ledger::CustodyLedger;
use sc_03_batch_registry::BatchRegistry;
use shared_types::{
    ActorDirectory, ActorId, BatchId, BatchStore, CourseId, ExamEntryId, ExamEntryProvider,
    MovementType, NewMovement, NewScript, RegistrationStore, Script, ScriptId, ScriptStatus,
    ScriptStore, StoreError, StudentId, TimeSource,
};

use super::errors::SubmissionError;

/// One scan at the collection desk.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub student_token: String,
    pub invigilator_id: ActorId,
    /// Advisory only: the token's own exam entry always wins.
    pub exam_entry_hint: Option<ExamEntryId>,
    pub location: String,
    pub notes: Option<String>,
}

/// Counter snapshot embedded in the receipt, refreshed after the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSnapshot {
    pub total_registered: u32,
    pub scripts_submitted: u32,
    /// Registered students whose script is still outstanding.
    pub remaining: u32,
}

/// What the scan station shows after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub script_id: ScriptId,
    pub batch_id: BatchId,
    pub student_id: StudentId,
    pub exam_entry_id: ExamEntryId,
    pub submitted_at: DateTime<Utc>,
    pub batch: BatchSnapshot,
}

/// One of the student's exam sittings scheduled for today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamToday {
    pub exam_entry_id: ExamEntryId,
    pub course_id: CourseId,
    pub course_code: String,
    pub venue: String,
    pub is_present: bool,
    pub script_submitted: bool,
}

/// Read-only preview shown before committing a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanPreview {
    pub student_id: StudentId,
    pub full_name: String,
    pub exams_today: Vec<ExamToday>,
    /// Whether any of today's sittings can still accept this student's
    /// script: present in the venue and not yet submitted.
    pub can_submit: bool,
}

/// One queued scan from an offline station.
#[derive(Debug, Clone)]
pub struct BulkSubmissionItem {
    pub student_token: String,
    pub location: String,
    pub notes: Option<String>,
}

/// Per-item result of a bulk catch-up run.
#[derive(Debug, Clone)]
pub struct BulkSubmissionOutcome {
    pub student_token: String,
    pub receipt: Option<SubmissionReceipt>,
    pub message: String,
}

impl BulkSubmissionOutcome {
    pub fn succeeded(&self) -> bool {
        self.receipt.is_some()
    }
}

/// Orchestrates the collection of a physical script into custody.
pub struct SubmissionWorkflow {
    registrations: Arc<dyn RegistrationStore>,
    batches: Arc<dyn BatchStore>,
    scripts: Arc<dyn ScriptStore>,
    entries: Arc<dyn ExamEntryProvider>,
    directory: Arc<dyn ActorDirectory>,
    codec: Arc<IdentifierCodec>,
    ledger: Arc<CustodyLedger>,
    registry: Arc<BatchRegistry>,
    clock: Arc<dyn TimeSource>,
}

impl SubmissionWorkflow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        batches: Arc<dyn BatchStore>,
        scripts: Arc<dyn ScriptStore>,
        entries: Arc<dyn ExamEntryProvider>,
        directory: Arc<dyn ActorDirectory>,
        codec: Arc<IdentifierCodec>,
        ledger: Arc<CustodyLedger>,
        registry: Arc<BatchRegistry>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            registrations,
            batches,
            scripts,
            entries,
            directory,
            codec,
            ledger,
            registry,
            clock,
        }
    }

    /// Collect one script.
    ///
    /// Token verification comes first; a rejected token aborts before any
    /// state is loaded, so a forged slip leaves no trace beyond the scan
    /// station's own log line. A valid scan marks attendance as a side
    /// effect, creates the `Script`, appends the ledger entry, flips the
    /// registration's idempotency flag, and refreshes the batch counters.
    pub fn submit(&self, request: SubmitRequest) -> Result<SubmissionReceipt, SubmissionError> {
        let (student_id, exam_entry_id, course_id) =
            match self
                .codec
                .decode_and_verify(&request.student_token, TokenType::Student)?
            {
                TokenPayload::Student {
                    student_id,
                    exam_entry_id,
                    course_id,
                    ..
                } => (student_id, exam_entry_id, course_id),
                // decode_and_verify already rejected non-student payloads.
                TokenPayload::Batch { .. } => unreachable!("verified as a student token"),
            };
        if let Some(hint) = request.exam_entry_hint {
            if hint != exam_entry_id {
                warn!(hint, exam_entry_id, "scan hint disagrees with token, using token");
            }
        }

        let mut registration = self
            .registrations
            .get(student_id, exam_entry_id)?
            .ok_or(SubmissionError::NotRegistered {
                student_id,
                exam_entry_id,
            })?;
        if registration.script_submitted {
            return Err(SubmissionError::AlreadySubmitted {
                student_id,
                exam_entry_id,
            });
        }

        let now = self.clock.now();
        if !registration.is_present {
            // A scan is proof of presence even if attendance was never taken.
            registration.is_present = true;
            registration.attendance_marked_at = Some(now);
        }

        let batch = self
            .batches
            .get_for_entry_course(exam_entry_id, course_id)?
            .ok_or(SubmissionError::BatchNotProvisioned {
                exam_entry_id,
                course_id,
            })?;

        let script = self
            .scripts
            .insert(NewScript {
                token: request.student_token.clone(),
                student_id,
                exam_entry_id,
                batch_id: batch.id,
                current_holder_id: request.invigilator_id,
                status: ScriptStatus::Collected,
                notes: request.notes.clone(),
            })
            .map_err(|err| match err {
                // The storage backstop behind the flag check above.
                StoreError::ScriptConflict { .. } => SubmissionError::AlreadySubmitted {
                    student_id,
                    exam_entry_id,
                },
                other => SubmissionError::Store(other),
            })?;

        self.ledger.append(NewMovement {
            script_id: Some(script.id),
            batch_id: Some(batch.id),
            movement_type: MovementType::CollectedFromStudent,
            to_actor_id: request.invigilator_id,
            location: request.location,
            notes: request.notes,
        })?;

        registration.script_submitted = true;
        registration.submitted_at = Some(now);
        registration.submitted_to = Some(request.invigilator_id);
        registration.batch_id = Some(batch.id);
        registration.script_id = Some(script.id);
        self.registrations.update(&registration)?;

        let refreshed = self.registry.recompute_counts(batch.id)?;

        info!(
            student_id,
            exam_entry_id,
            script_id = script.id,
            batch_id = batch.id,
            submitted = refreshed.scripts_submitted,
            "script collected"
        );
        Ok(SubmissionReceipt {
            script_id: script.id,
            batch_id: batch.id,
            student_id,
            exam_entry_id,
            submitted_at: now,
            batch: BatchSnapshot {
                total_registered: refreshed.total_registered,
                scripts_submitted: refreshed.scripts_submitted,
                remaining: refreshed
                    .total_registered
                    .saturating_sub(refreshed.scripts_submitted),
            },
        })
    }

    /// Read-only preview of a scanned student: profile, today's sittings,
    /// and whether a submission would be accepted. Never mutates state.
    pub async fn scan_student(&self, token: &str) -> Result<ScanPreview, SubmissionError> {
        let student_id = match self.codec.decode_and_verify(token, TokenType::Student)? {
            TokenPayload::Student { student_id, .. } => student_id,
            TokenPayload::Batch { .. } => unreachable!("verified as a student token"),
        };

        let profile = self
            .directory
            .actor(student_id)
            .await?
            .ok_or(SubmissionError::UnknownStudent(student_id))?;

        let today = self.clock.now().date_naive();
        let mut exams_today = Vec::new();
        for registration in self.registrations.list_for_student(student_id)? {
            let Some(entry) = self.entries.exam_entry(registration.exam_entry_id).await? else {
                continue;
            };
            if entry.exam_date != today {
                continue;
            }
            exams_today.push(ExamToday {
                exam_entry_id: entry.id,
                course_id: entry.course_id,
                course_code: entry.course_code,
                venue: entry.venue,
                is_present: registration.is_present,
                script_submitted: registration.script_submitted,
            });
        }

        let can_submit = exams_today
            .iter()
            .any(|e| e.is_present && !e.script_submitted);
        Ok(ScanPreview {
            student_id,
            full_name: profile.full_name().to_owned(),
            exams_today,
            can_submit,
        })
    }

    /// Replay queued scans from an offline station. Items are independent:
    /// one failure never blocks the rest, and each outcome carries its own
    /// message.
    pub fn bulk_submit(
        &self,
        items: Vec<BulkSubmissionItem>,
        invigilator_id: ActorId,
    ) -> Vec<BulkSubmissionOutcome> {
        items
            .into_iter()
            .map(|item| {
                let token = item.student_token;
                match self.submit(SubmitRequest {
                    student_token: token.clone(),
                    invigilator_id,
                    exam_entry_hint: None,
                    location: item.location,
                    notes: item.notes,
                }) {
                    Ok(receipt) => BulkSubmissionOutcome {
                        student_token: token,
                        message: format!("script {} collected", receipt.script_id),
                        receipt: Some(receipt),
                    },
                    Err(err) => BulkSubmissionOutcome {
                        student_token: token,
                        receipt: None,
                        message: err.to_string(),
                    },
                }
            })
            .collect()
    }

    /// Secondary checkpoint: `Collected -> Verified`, custody moves to the
    /// verifier. Any other starting state is rejected.
    pub fn verify(
        &self,
        script_id: ScriptId,
        verified_by: ActorId,
        location: String,
    ) -> Result<Script, SubmissionError> {
        let mut script = self
            .scripts
            .get(script_id)?
            .ok_or(SubmissionError::ScriptNotFound(script_id))?;
        if script.status != ScriptStatus::Collected {
            return Err(SubmissionError::InvalidScriptState {
                script_id,
                status: script.status,
            });
        }

        script.status = ScriptStatus::Verified;
        script.current_holder_id = verified_by;
        self.scripts.update(&script)?;

        self.ledger.append(NewMovement {
            script_id: Some(script.id),
            batch_id: Some(script.batch_id),
            movement_type: MovementType::VerifiedByInvigilator,
            to_actor_id: verified_by,
            location,
            notes: None,
        })?;

        info!(script_id, verified_by, "script verified");
        Ok(script)
    }
}
