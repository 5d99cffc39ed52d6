//! # Submission Subsystem (sc-05)
//!
//! The front-line operation behind an invigilator's scan: verify the
//! student token, collect the physical script into its batch, record the
//! transfer in the custody ledger, and refresh the batch counters.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Token failure touches no state | decode/verify is step one, before any load |
//! | One submission per (student, exam entry) | `AlreadySubmitted` guard + store conflict backstop |
//! | Every collection is in the ledger | `CollectedFromStudent` appended before the flags flip |
//! | A scan proves presence | attendance marked opportunistically on submit |

pub mod domain;

pub use domain::{
    BatchSnapshot, BulkSubmissionItem, BulkSubmissionOutcome, ExamToday, ScanPreview,
    SubmissionError, SubmissionReceipt, SubmissionWorkflow, SubmitRequest,
};
