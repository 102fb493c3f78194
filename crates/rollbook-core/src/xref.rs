//! Cross-reference resolution between record kinds.
//!
//! Registration operations need Student records for validation and Course
//! records for report enrichment. Lookups are linear rescans of the backing
//! file on every call; the files are small and nothing is cached.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::store::RecordFile;
use crate::types::{Course, Student};

pub struct Resolver<'a> {
    students: &'a RecordFile<Student>,
    courses: &'a RecordFile<Course>,
}

impl<'a> Resolver<'a> {
    pub fn new(students: &'a RecordFile<Student>, courses: &'a RecordFile<Course>) -> Self {
        Self { students, courses }
    }

    /// Look up one student by id.
    pub fn find_student(&self, student_id: &str) -> Result<Option<Student>, StoreError> {
        Ok(self
            .students
            .scan_all()?
            .into_iter()
            .find(|s| s.student_id == student_id))
    }

    /// Look up one course by id.
    pub fn find_course(&self, course_id: &str) -> Result<Option<Course>, StoreError> {
        Ok(self
            .courses
            .scan_all()?
            .into_iter()
            .find(|c| c.course_id == course_id))
    }

    /// Batch map for report joins: student_id -> Student.
    pub fn student_map(&self) -> Result<HashMap<String, Student>, StoreError> {
        Ok(self
            .students
            .scan_all()?
            .into_iter()
            .map(|s| (s.student_id.clone(), s))
            .collect())
    }

    /// Batch map for report joins: course_id -> Course.
    pub fn course_map(&self) -> Result<HashMap<String, Course>, StoreError> {
        Ok(self
            .courses
            .scan_all()?
            .into_iter()
            .map(|c| (c.course_id.clone(), c))
            .collect())
    }
}
