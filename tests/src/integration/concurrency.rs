//! # Concurrent Scan Properties
//!
//! Two stations scanning at once must never double-count: the storage
//! uniqueness constraints are the final backstop behind the
//! application-level checks.

#[cfg(test)]
mod tests {
    use crate::integration::harness::Harness;
    use sc_05_submission::SubmissionError;
    use shared_types::{BatchStore, NewRegistration, RegistrationStore};

    #[tokio::test]
    async fn same_student_scanned_on_two_stations_counts_once() -> anyhow::Result<()> {
        let h = Harness::new();
        h.seed_entry(20, 30, "CSC101");
        h.seed_students(30, &[1]);
        h.enroller.enroll_for_exam_entry(20).await?;
        let token = h.issued_token(1, 20);

        let outcomes: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| h.workflow.submit(h.scan(&token))))
                .collect();
            handles.into_iter().map(|j| j.join().unwrap()).collect()
        });

        let successes = outcomes.iter().filter(|o| o.is_ok()).count();
        assert_eq!(successes, 1);
        for outcome in outcomes.iter().filter(|o| o.is_err()) {
            assert!(matches!(
                outcome.as_ref().unwrap_err(),
                SubmissionError::AlreadySubmitted { .. }
            ));
        }

        let batch = h.batches.get_for_entry_course(20, 30)?.unwrap();
        assert_eq!(batch.scripts_submitted, 1);
        assert_eq!(h.ledger.history_for_batch(batch.id, 10)?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn distinct_students_in_parallel_all_land() -> anyhow::Result<()> {
        let h = Harness::new();
        h.seed_entry(20, 30, "CSC101");
        h.seed_students(30, &[1, 2, 3, 4, 5]);
        h.enroller.enroll_for_exam_entry(20).await?;
        let tokens: Vec<String> = (1..=5).map(|s| h.issued_token(s, 20)).collect();

        std::thread::scope(|scope| {
            for token in &tokens {
                scope.spawn(|| h.workflow.submit(h.scan(token)).unwrap());
            }
        });

        let batch_id = h.batches.get_for_entry_course(20, 30)?.unwrap().id;
        let batch = h.registry.recompute_counts(batch_id)?;
        assert_eq!(batch.scripts_submitted, 5);
        assert_eq!(h.ledger.history_for_batch(batch_id, 10)?.len(), 5);
        Ok(())
    }

    /// Concurrent enrollment runs cannot create a second registration for
    /// the same sitting.
    #[test]
    fn registration_uniqueness_under_concurrent_inserts() {
        let h = Harness::new();
        let row = || NewRegistration {
            student_id: 1,
            exam_entry_id: 20,
            course_id: 30,
            student_token: "slip".into(),
        };

        let inserted: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| h.registrations.insert_new(vec![row()]).unwrap()))
                .collect();
            handles.into_iter().map(|j| j.join().unwrap()).sum()
        });

        assert_eq!(inserted, 1);
        assert_eq!(h.registrations.count_for_exam_entry(20, 30).unwrap(), 1);
    }
}
