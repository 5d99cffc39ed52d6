//! # Catalog Ports (External Collaborators)
//!
//! Read-only views into the surrounding exam-administration system:
//! timetable entries, course enrollments, and user profiles. These are
//! async because production adapters reach another service over the wire.
//!
//! The engine never writes through these ports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{
    ActorId, CourseId, ExamEntryId, ProgramId, SemesterId, StudentId, TimetableId,
};
use crate::errors::CatalogError;

/// One scheduled exam sitting within a timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamEntry {
    pub id: ExamEntryId,
    pub timetable_id: TimetableId,
    pub course_id: CourseId,
    pub course_code: String,
    pub semester_id: SemesterId,
    pub venue: String,
    pub exam_date: NaiveDate,
    /// The programs sitting this exam.
    pub program_ids: Vec<ProgramId>,
}

/// A student actively enrolled in a course, with program memberships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledStudent {
    pub student_id: StudentId,
    pub program_ids: Vec<ProgramId>,
}

impl EnrolledStudent {
    /// Whether this student belongs to any of the programs sitting an exam.
    pub fn in_any_program(&self, program_ids: &[ProgramId]) -> bool {
        self.program_ids.iter().any(|p| program_ids.contains(p))
    }
}

/// Role-specific user profile.
///
/// A tagged union instead of the loosely-typed metadata blob the
/// surrounding system stores: role-specific fields are matched
/// exhaustively at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ActorProfile {
    Student {
        id: ActorId,
        full_name: String,
        matric_number: String,
        program_ids: Vec<ProgramId>,
    },
    Lecturer {
        id: ActorId,
        full_name: String,
        staff_number: String,
        department: String,
    },
    Invigilator {
        id: ActorId,
        full_name: String,
        staff_number: String,
    },
    Admin {
        id: ActorId,
        full_name: String,
    },
}

impl ActorProfile {
    pub fn id(&self) -> ActorId {
        match self {
            ActorProfile::Student { id, .. }
            | ActorProfile::Lecturer { id, .. }
            | ActorProfile::Invigilator { id, .. }
            | ActorProfile::Admin { id, .. } => *id,
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            ActorProfile::Student { full_name, .. }
            | ActorProfile::Lecturer { full_name, .. }
            | ActorProfile::Invigilator { full_name, .. }
            | ActorProfile::Admin { full_name, .. } => full_name,
        }
    }
}

/// Exam-entry lookups.
#[async_trait::async_trait]
pub trait ExamEntryProvider: Send + Sync {
    async fn exam_entry(&self, id: ExamEntryId) -> Result<Option<ExamEntry>, CatalogError>;

    async fn entries_for_timetable(
        &self,
        timetable_id: TimetableId,
    ) -> Result<Vec<ExamEntry>, CatalogError>;
}

/// Active enrollments for a course within a semester, joined to each
/// student's program membership.
#[async_trait::async_trait]
pub trait EnrollmentProvider: Send + Sync {
    async fn enrolled_students(
        &self,
        course_id: CourseId,
        semester_id: SemesterId,
    ) -> Result<Vec<EnrolledStudent>, CatalogError>;
}

/// Actor lookup for display names and scan previews.
#[async_trait::async_trait]
pub trait ActorDirectory: Send + Sync {
    async fn actor(&self, id: ActorId) -> Result<Option<ActorProfile>, CatalogError>;
}
