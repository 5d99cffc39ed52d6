//! # Enrollment Subsystem (sc-04)
//!
//! Provisions the custody chain when a timetable is published: one
//! `ExamRegistration` (with a printed student token) per eligible student,
//! and one `BatchScript` container (with a batch token) per exam entry.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Re-running enrollment is additive | duplicate registrations skipped by the store |
//! | One batch per (exam entry, course) | existing batch reused, counter refreshed |
//! | Batch tokens carry the real batch id | row inserted first, token minted after |
//! | Timetable runs never fail halfway silently | per-entry failures are collected and returned |

pub mod domain;

pub use domain::{
    EnrollmentError, EnrollmentOutcome, EntryFailure, RegistrationEnroller, TimetableEnrollment,
};
