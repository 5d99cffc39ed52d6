//! In-memory catalog fixture implementing the three read-only ports.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use shared_types::{
    ActorDirectory, ActorId, ActorProfile, CatalogError, CourseId, EnrolledStudent,
    EnrollmentProvider, ExamEntry, ExamEntryId, ExamEntryProvider, SemesterId, TimetableId,
};

/// Mutable catalog fixture: tests add entries, enrollments, and actors as
/// the scenario unfolds (e.g. a late enrollment between two enrollment
/// runs).
#[derive(Default)]
pub struct InMemoryCatalog {
    entries: RwLock<HashMap<ExamEntryId, ExamEntry>>,
    enrollments: RwLock<HashMap<(CourseId, SemesterId), Vec<EnrolledStudent>>>,
    actors: RwLock<HashMap<ActorId, ActorProfile>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&self, entry: ExamEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entry.id, entry);
    }

    pub fn add_enrollment(
        &self,
        course_id: CourseId,
        semester_id: SemesterId,
        student: EnrolledStudent,
    ) {
        self.enrollments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((course_id, semester_id))
            .or_default()
            .push(student);
    }

    pub fn add_actor(&self, profile: ActorProfile) {
        self.actors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.id(), profile);
    }
}

#[async_trait::async_trait]
impl ExamEntryProvider for InMemoryCatalog {
    async fn exam_entry(&self, id: ExamEntryId) -> Result<Option<ExamEntry>, CatalogError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&id).cloned())
    }

    async fn entries_for_timetable(
        &self,
        timetable_id: TimetableId,
    ) -> Result<Vec<ExamEntry>, CatalogError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut found: Vec<ExamEntry> = entries
            .values()
            .filter(|e| e.timetable_id == timetable_id)
            .cloned()
            .collect();
        found.sort_by_key(|e| e.id);
        Ok(found)
    }
}

#[async_trait::async_trait]
impl EnrollmentProvider for InMemoryCatalog {
    async fn enrolled_students(
        &self,
        course_id: CourseId,
        semester_id: SemesterId,
    ) -> Result<Vec<EnrolledStudent>, CatalogError> {
        let enrollments = self
            .enrollments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(enrollments
            .get(&(course_id, semester_id))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl ActorDirectory for InMemoryCatalog {
    async fn actor(&self, id: ActorId) -> Result<Option<ActorProfile>, CatalogError> {
        let actors = self.actors.read().unwrap_or_else(PoisonError::into_inner);
        Ok(actors.get(&id).cloned())
    }
}
