//! Full-stack in-memory fixture wiring every subsystem together the way a
//! deployment would, with a pinned clock.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use memory_store::{
    FixedClock, InMemoryBatchStore, InMemoryCatalog, InMemoryMovementStore,
    InMemoryRegistrationStore, InMemoryScriptStore,
};
use sc_01_identifier_codec::{IdentifierCodec, SigningKey};
use sc_02_custody_ledger::CustodyLedger;
use sc_03_batch_registry::BatchRegistry;
use sc_04_enrollment::RegistrationEnroller;
use sc_05_submission::{SubmissionWorkflow, SubmitRequest};
use shared_types::{
    CourseId, EnrolledStudent, ExamEntry, ExamEntryId, ProgramId, RegistrationStore, StudentId,
};

pub const TIMETABLE: u64 = 1;
pub const SEMESTER: u64 = 2;
pub const PROGRAM: ProgramId = 5;
pub const INVIGILATOR: u64 = 900;

/// One fully wired engine over in-memory adapters.
pub struct Harness {
    pub catalog: Arc<InMemoryCatalog>,
    pub registrations: Arc<InMemoryRegistrationStore>,
    pub batches: Arc<InMemoryBatchStore>,
    pub scripts: Arc<InMemoryScriptStore>,
    pub clock: Arc<FixedClock>,
    pub codec: Arc<IdentifierCodec>,
    pub ledger: Arc<CustodyLedger>,
    pub registry: Arc<BatchRegistry>,
    pub enroller: RegistrationEnroller,
    pub workflow: SubmissionWorkflow,
}

impl Harness {
    /// Clock pinned to exam-day morning, 2026-05-02 08:00 UTC.
    pub fn new() -> Self {
        init_tracing();

        let catalog = Arc::new(InMemoryCatalog::new());
        let registrations = Arc::new(InMemoryRegistrationStore::new());
        let batches = Arc::new(InMemoryBatchStore::new());
        let scripts = Arc::new(InMemoryScriptStore::new());
        let movements = Arc::new(InMemoryMovementStore::new());
        let clock = Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(2026, 5, 2, 8, 0, 0).unwrap(),
        ));
        let codec = Arc::new(IdentifierCodec::new(SigningKey::from_bytes(
            *b"scan-station-shared-secret-0001!",
        )));
        let ledger = Arc::new(CustodyLedger::new(movements, clock.clone()));
        let registry = Arc::new(BatchRegistry::new(
            batches.clone(),
            scripts.clone(),
            ledger.clone(),
            clock.clone(),
        ));
        let enroller = RegistrationEnroller::new(
            catalog.clone(),
            catalog.clone(),
            registrations.clone(),
            batches.clone(),
            codec.clone(),
            clock.clone(),
        );
        let workflow = SubmissionWorkflow::new(
            registrations.clone(),
            batches.clone(),
            scripts.clone(),
            catalog.clone(),
            catalog.clone(),
            codec.clone(),
            ledger.clone(),
            registry.clone(),
            clock.clone(),
        );

        Self {
            catalog,
            registrations,
            batches,
            scripts,
            clock,
            codec,
            ledger,
            registry,
            enroller,
            workflow,
        }
    }

    pub fn exam_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()
    }

    /// Add one exam entry scheduled for exam day.
    pub fn seed_entry(&self, id: ExamEntryId, course_id: CourseId, course_code: &str) {
        self.catalog.add_entry(ExamEntry {
            id,
            timetable_id: TIMETABLE,
            course_id,
            course_code: course_code.into(),
            semester_id: SEMESTER,
            venue: "Hall B".into(),
            exam_date: Self::exam_date(),
            program_ids: vec![PROGRAM],
        });
    }

    /// Enroll students into a course, all in the default program.
    pub fn seed_students(&self, course_id: CourseId, student_ids: &[StudentId]) {
        for &student_id in student_ids {
            self.catalog.add_enrollment(
                course_id,
                SEMESTER,
                EnrolledStudent {
                    student_id,
                    program_ids: vec![PROGRAM],
                },
            );
        }
    }

    /// The token enrollment minted for a student, straight off the slip.
    pub fn issued_token(&self, student_id: StudentId, exam_entry_id: ExamEntryId) -> String {
        self.registrations
            .get(student_id, exam_entry_id)
            .unwrap()
            .unwrap()
            .student_token
    }

    pub fn scan(&self, token: &str) -> SubmitRequest {
        SubmitRequest {
            student_token: token.into(),
            invigilator_id: INVIGILATOR,
            exam_entry_hint: None,
            location: "Hall B, collection desk".into(),
            notes: None,
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-process subscriber so `RUST_LOG=debug cargo test -p sc-tests` shows
/// the engine's own log lines.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
