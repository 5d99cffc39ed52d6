//! Timetable-publish provisioning.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sc_01_identifier_codec::IdentifierCodec;
use shared_types::{
    BatchStore, EnrollmentProvider, ExamEntry, ExamEntryId, ExamEntryProvider, NewBatchScript,
    NewRegistration, RegistrationStore, TimeSource, TimetableId,
};

use super::errors::EnrollmentError;

/// What one `enroll_for_exam_entry` run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentOutcome {
    pub exam_entry_id: ExamEntryId,
    /// Students enrolled in the course and in a program sitting this exam.
    pub eligible_students: usize,
    /// Rows actually inserted; re-runs count only the newcomers.
    pub registrations_created: usize,
    /// 0 or 1: at most one batch container exists per entry.
    pub batch_scripts_created: usize,
}

/// One entry that failed during a timetable run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFailure {
    pub exam_entry_id: ExamEntryId,
    pub reason: String,
}

/// Aggregate of a best-effort timetable run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEnrollment {
    pub timetable_id: TimetableId,
    pub entries_processed: usize,
    pub registrations_created: usize,
    pub batch_scripts_created: usize,
    /// Entries that failed; the rest of the run is unaffected by them.
    pub failures: Vec<EntryFailure>,
}

/// Provisions registrations, student tokens, and batch containers when a
/// timetable is published.
pub struct RegistrationEnroller {
    entries: Arc<dyn ExamEntryProvider>,
    enrollments: Arc<dyn EnrollmentProvider>,
    registrations: Arc<dyn RegistrationStore>,
    batches: Arc<dyn BatchStore>,
    codec: Arc<IdentifierCodec>,
    clock: Arc<dyn TimeSource>,
}

impl RegistrationEnroller {
    pub fn new(
        entries: Arc<dyn ExamEntryProvider>,
        enrollments: Arc<dyn EnrollmentProvider>,
        registrations: Arc<dyn RegistrationStore>,
        batches: Arc<dyn BatchStore>,
        codec: Arc<IdentifierCodec>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            entries,
            enrollments,
            registrations,
            batches,
            codec,
            clock,
        }
    }

    /// Enroll every eligible student for one exam entry and make sure its
    /// batch container exists.
    ///
    /// Safe to re-run: duplicate registrations are skipped by the store,
    /// and an existing batch is reused with its `total_registered`
    /// refreshed to the current registration count.
    pub async fn enroll_for_exam_entry(
        &self,
        exam_entry_id: ExamEntryId,
    ) -> Result<EnrollmentOutcome, EnrollmentError> {
        let entry = self
            .entries
            .exam_entry(exam_entry_id)
            .await?
            .ok_or(EnrollmentError::ExamEntryNotFound(exam_entry_id))?;

        let enrolled = self
            .enrollments
            .enrolled_students(entry.course_id, entry.semester_id)
            .await?;
        let eligible: Vec<_> = enrolled
            .into_iter()
            .filter(|s| s.in_any_program(&entry.program_ids))
            .collect();

        let issued_at = self.clock.now();
        let mut rows = Vec::with_capacity(eligible.len());
        for student in &eligible {
            let token = self.codec.encode_student_token(
                student.student_id,
                entry.id,
                entry.course_id,
                issued_at,
            )?;
            rows.push(NewRegistration {
                student_id: student.student_id,
                exam_entry_id: entry.id,
                course_id: entry.course_id,
                student_token: token,
            });
        }
        let registrations_created = self.registrations.insert_new(rows)?;

        let batch_scripts_created = self.ensure_batch(&entry, eligible.len() as u32).await?;

        info!(
            exam_entry_id,
            eligible = eligible.len(),
            registrations_created,
            batch_scripts_created,
            "enrollment run completed"
        );
        Ok(EnrollmentOutcome {
            exam_entry_id,
            eligible_students: eligible.len(),
            registrations_created,
            batch_scripts_created,
        })
    }

    /// Enroll every entry of a published timetable, best-effort.
    ///
    /// One entry failing does not stop the others; its failure is reported
    /// in the aggregate instead of aborting the run.
    pub async fn enroll_for_timetable(
        &self,
        timetable_id: TimetableId,
    ) -> Result<TimetableEnrollment, EnrollmentError> {
        let entries = self.entries.entries_for_timetable(timetable_id).await?;

        let mut result = TimetableEnrollment {
            timetable_id,
            entries_processed: entries.len(),
            registrations_created: 0,
            batch_scripts_created: 0,
            failures: Vec::new(),
        };
        for entry in entries {
            match self.enroll_for_exam_entry(entry.id).await {
                Ok(outcome) => {
                    result.registrations_created += outcome.registrations_created;
                    result.batch_scripts_created += outcome.batch_scripts_created;
                }
                Err(err) => {
                    warn!(timetable_id, exam_entry_id = entry.id, %err, "entry enrollment failed");
                    result.failures.push(EntryFailure {
                        exam_entry_id: entry.id,
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(result)
    }

    /// Create the batch container on first run; refresh its registration
    /// snapshot on later runs. Returns how many containers were created.
    async fn ensure_batch(
        &self,
        entry: &ExamEntry,
        eligible: u32,
    ) -> Result<usize, EnrollmentError> {
        if let Some(mut batch) = self
            .batches
            .get_for_entry_course(entry.id, entry.course_id)?
        {
            let current = self
                .registrations
                .count_for_exam_entry(entry.id, entry.course_id)?;
            if batch.total_registered != current {
                batch.total_registered = current;
                self.batches.update(&batch)?;
            }
            return Ok(0);
        }

        let mut batch = self.batches.insert(NewBatchScript {
            exam_entry_id: entry.id,
            course_id: entry.course_id,
            total_registered: eligible,
        })?;
        // The token embeds the store-assigned id, so it is minted only now.
        batch.batch_token = self.codec.encode_batch_token(
            batch.id,
            entry.course_id,
            &entry.course_code,
            entry.id,
            self.clock.now(),
        )?;
        self.batches.update(&batch)?;
        Ok(1)
    }
}
