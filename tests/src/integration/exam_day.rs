//! # Exam Day Flows
//!
//! The full provisioning-to-collection choreography:
//!
//! ```text
//! [Enroller (04)] ──registrations + batch──→ [stores]
//!        │
//!        └─ student tokens on exam slips
//!                    │
//! [Workflow (05)] ←──scan── invigilator desk
//!        │
//!        ├──→ Script created, ledger appended
//!        └──→ [Registry (03)] recomputes counters
//! ```

#[cfg(test)]
mod tests {
    use crate::integration::harness::{Harness, INVIGILATOR, TIMETABLE};
    use shared_types::{BatchStatus, BatchStore, RegistrationStore};

    /// Scenario: three students enrolled, two hand in scripts.
    #[tokio::test]
    async fn enrollment_then_partial_submission() -> anyhow::Result<()> {
        let h = Harness::new();
        h.seed_entry(20, 30, "CSC101");
        h.seed_students(30, &[1, 2, 3]);

        let outcome = h.enroller.enroll_for_exam_entry(20).await?;
        assert_eq!(outcome.registrations_created, 3);
        assert_eq!(outcome.batch_scripts_created, 1);

        let batch = h.batches.get_for_entry_course(20, 30)?.unwrap();
        assert_eq!(batch.status, BatchStatus::Pending);
        assert_eq!(batch.total_registered, 3);

        h.workflow.submit(h.scan(&h.issued_token(1, 20)))?;
        let receipt = h.workflow.submit(h.scan(&h.issued_token(2, 20)))?;
        assert_eq!(receipt.batch.scripts_submitted, 2);
        assert_eq!(receipt.batch.remaining, 1);

        let stats = h.registry.statistics(batch.id)?;
        assert_eq!(stats.scripts_submitted, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.submission_rate, 66.67);
        Ok(())
    }

    /// Scenario: a late course enrollment between two enrollment runs.
    #[tokio::test]
    async fn rerun_picks_up_the_late_student() -> anyhow::Result<()> {
        let h = Harness::new();
        h.seed_entry(20, 30, "CSC101");
        h.seed_students(30, &[1, 2, 3]);
        h.enroller.enroll_for_exam_entry(20).await?;

        h.seed_students(30, &[4]);
        let second = h.enroller.enroll_for_exam_entry(20).await?;

        // Only the newcomer, and the existing batch catches up.
        assert_eq!(second.registrations_created, 1);
        assert_eq!(second.batch_scripts_created, 0);
        let batch = h.batches.get_for_entry_course(20, 30)?.unwrap();
        assert_eq!(batch.total_registered, 4);

        // The late student's slip works like everyone else's.
        let receipt = h.workflow.submit(h.scan(&h.issued_token(4, 20)))?;
        assert_eq!(receipt.student_id, 4);
        Ok(())
    }

    #[tokio::test]
    async fn timetable_publish_provisions_every_entry() -> anyhow::Result<()> {
        let h = Harness::new();
        h.seed_entry(20, 30, "CSC101");
        h.seed_entry(21, 31, "MTH202");
        h.seed_students(30, &[1, 2]);
        h.seed_students(31, &[1, 3, 4]);

        let result = h.enroller.enroll_for_timetable(TIMETABLE).await?;
        assert_eq!(result.entries_processed, 2);
        assert_eq!(result.registrations_created, 5);
        assert_eq!(result.batch_scripts_created, 2);
        assert!(result.failures.is_empty());

        // Student 1 sits both exams with two independent registrations.
        assert_eq!(h.registrations.list_for_student(1)?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn scan_preview_follows_the_student_through_the_day() -> anyhow::Result<()> {
        let h = Harness::new();
        h.seed_entry(20, 30, "CSC101");
        h.seed_students(30, &[1]);
        h.catalog.add_actor(shared_types::ActorProfile::Student {
            id: 1,
            full_name: "B. Candidate".into(),
            matric_number: "MAT-001".into(),
            program_ids: vec![5],
        });
        h.enroller.enroll_for_exam_entry(20).await?;
        let token = h.issued_token(1, 20);

        // Attendance not taken yet.
        let preview = h.workflow.scan_student(&token).await?;
        assert_eq!(preview.exams_today.len(), 1);
        assert!(!preview.can_submit);

        // Submitting marks presence and closes the sitting.
        h.workflow.submit(h.scan(&token))?;
        let preview = h.workflow.scan_student(&token).await?;
        assert!(preview.exams_today[0].is_present);
        assert!(preview.exams_today[0].script_submitted);
        assert!(!preview.can_submit);

        let registration = h.registrations.get(1, 20)?.unwrap();
        assert_eq!(registration.submitted_to, Some(INVIGILATOR));
        Ok(())
    }

    #[tokio::test]
    async fn bulk_catchup_after_an_offline_shift() -> anyhow::Result<()> {
        let h = Harness::new();
        h.seed_entry(20, 30, "CSC101");
        h.seed_students(30, &[1, 2]);
        h.enroller.enroll_for_exam_entry(20).await?;

        let outcomes = h.workflow.bulk_submit(
            vec![
                sc_05_submission::BulkSubmissionItem {
                    student_token: h.issued_token(1, 20),
                    location: "Hall B".into(),
                    notes: Some("offline sync".into()),
                },
                sc_05_submission::BulkSubmissionItem {
                    student_token: "not-a-token".into(),
                    location: "Hall B".into(),
                    notes: None,
                },
                sc_05_submission::BulkSubmissionItem {
                    student_token: h.issued_token(2, 20),
                    location: "Hall B".into(),
                    notes: None,
                },
            ],
            INVIGILATOR,
        );

        assert!(outcomes[0].succeeded());
        assert!(!outcomes[1].succeeded());
        assert!(outcomes[2].succeeded());

        let batch = h.batches.get_for_entry_course(20, 30)?.unwrap();
        assert_eq!(batch.scripts_submitted, 2);
        Ok(())
    }
}
