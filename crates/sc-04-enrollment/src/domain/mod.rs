mod enroller;
mod errors;

pub use enroller::{EnrollmentOutcome, EntryFailure, RegistrationEnroller, TimetableEnrollment};
pub use errors::EnrollmentError;
