mod errors;
mod workflow;

pub use errors::SubmissionError;
pub use workflow::{
    BatchSnapshot, BulkSubmissionItem, BulkSubmissionOutcome, ExamToday, ScanPreview,
    SubmissionReceipt, SubmissionWorkflow, SubmitRequest,
};
