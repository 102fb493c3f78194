//! High-level operation facade consumed by the console layer.
//!
//! [`Rollbook`] owns the three backing files in one data directory and
//! exposes the CRUD and reporting contract. The UI layer does all prompting
//! and printing; everything here returns data or a formatted report string.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::encoding::Record;
use crate::error::{Error, Result, ValidationError};
use crate::report;
use crate::store::RecordFile;
use crate::types::{
    ActivityStatus, Course, CoursePatch, Registration, RegistrationStatus, Student, StudentPatch,
};
use crate::xref::Resolver;

pub const STUDENT_FILE: &str = "student.bin";
pub const COURSE_FILE: &str = "CourseSubject.bin";
pub const REGISTRATION_FILE: &str = "RegisterCourse.bin";
pub const STUDENT_REPORT_FILE: &str = "report.txt";
pub const REGISTRATION_REPORT_FILE: &str = "registration_report.txt";

pub struct Rollbook {
    data_dir: PathBuf,
    students: RecordFile<Student>,
    courses: RecordFile<Course>,
    registrations: RecordFile<Registration>,
}

impl Rollbook {
    /// Open (creating if needed) the data directory holding the three
    /// backing files.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(crate::error::StoreError::from)?;
        Ok(Self {
            students: RecordFile::new(data_dir.join(STUDENT_FILE)),
            courses: RecordFile::new(data_dir.join(COURSE_FILE)),
            registrations: RecordFile::new(data_dir.join(REGISTRATION_FILE)),
            data_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.students, &self.courses)
    }

    // ---- students ----

    /// Add a student. The id must be non-empty and not already present.
    pub fn add_student(&self, student: Student) -> Result<()> {
        if student.student_id.is_empty() {
            return Err(ValidationError::EmptyKey {
                field: "student_id",
            }
            .into());
        }
        if self.resolver().find_student(&student.student_id)?.is_some() {
            return Err(ValidationError::DuplicateKey {
                kind: Student::KIND,
                key: student.student_id,
            }
            .into());
        }
        self.students.append(&student)?;
        info!(student_id = %student.student_id, "added student");
        Ok(())
    }

    pub fn list_students(&self) -> Result<Vec<Student>> {
        Ok(self.students.scan_all()?)
    }

    pub fn find_student(&self, student_id: &str) -> Result<Student> {
        self.resolver()
            .find_student(student_id)?
            .ok_or_else(|| not_found::<Student>(student_id))
    }

    /// Apply a patch to one student and rewrite the file. Unpatched fields
    /// are untouched; the key is immutable.
    pub fn update_student(&self, student_id: &str, patch: &StudentPatch) -> Result<Student> {
        let mut all = self.students.scan_all()?;
        let target = all
            .iter_mut()
            .find(|s| s.student_id == student_id)
            .ok_or_else(|| not_found::<Student>(student_id))?;
        patch.apply(target);
        let updated = target.clone();
        self.students.rewrite_all(&all)?;
        Ok(updated)
    }

    /// Remove one student, preserving the order of the survivors.
    pub fn delete_student(&self, student_id: &str) -> Result<()> {
        let all = self.students.scan_all()?;
        let remaining: Vec<Student> = all
            .iter()
            .filter(|s| s.student_id != student_id)
            .cloned()
            .collect();
        if remaining.len() == all.len() {
            return Err(not_found::<Student>(student_id));
        }
        self.students.rewrite_all(&remaining)?;
        info!(student_id, "deleted student");
        Ok(())
    }

    // ---- courses ----

    /// Add a course. The id must be non-empty and not already present, and
    /// the semester must be 1, 2, or 3.
    pub fn add_course(&self, course: Course) -> Result<()> {
        if course.course_id.is_empty() {
            return Err(ValidationError::EmptyKey { field: "course_id" }.into());
        }
        if !(1..=3).contains(&course.semester) {
            return Err(ValidationError::InvalidSemester(course.semester).into());
        }
        if self.resolver().find_course(&course.course_id)?.is_some() {
            return Err(ValidationError::DuplicateKey {
                kind: Course::KIND,
                key: course.course_id,
            }
            .into());
        }
        self.courses.append(&course)?;
        info!(course_id = %course.course_id, "added course");
        Ok(())
    }

    pub fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.scan_all()?)
    }

    pub fn find_course(&self, course_id: &str) -> Result<Course> {
        self.resolver()
            .find_course(course_id)?
            .ok_or_else(|| not_found::<Course>(course_id))
    }

    pub fn update_course(&self, course_id: &str, patch: &CoursePatch) -> Result<Course> {
        if let Some(semester) = patch.semester {
            if !(1..=3).contains(&semester) {
                return Err(ValidationError::InvalidSemester(semester).into());
            }
        }
        let mut all = self.courses.scan_all()?;
        let target = all
            .iter_mut()
            .find(|c| c.course_id == course_id)
            .ok_or_else(|| not_found::<Course>(course_id))?;
        patch.apply(target);
        let updated = target.clone();
        self.courses.rewrite_all(&all)?;
        Ok(updated)
    }

    pub fn delete_course(&self, course_id: &str) -> Result<()> {
        let all = self.courses.scan_all()?;
        let remaining: Vec<Course> = all
            .iter()
            .filter(|c| c.course_id != course_id)
            .cloned()
            .collect();
        if remaining.len() == all.len() {
            return Err(not_found::<Course>(course_id));
        }
        self.courses.rewrite_all(&remaining)?;
        info!(course_id, "deleted course");
        Ok(())
    }

    // ---- registrations ----

    /// Next registration id: max(existing) + 1, or 1 when the file is empty
    /// or missing. Gaps left by deletions are never reused.
    pub fn next_register_id(&self) -> Result<u32> {
        let next = self
            .registrations
            .scan_all()?
            .iter()
            .map(|r| r.register_id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1))
            .ok_or(ValidationError::RegisterIdExhausted)?;
        Ok(next)
    }

    /// Create a registration for a student on a course.
    ///
    /// The student must exist and be Active, and the course must exist and
    /// be open; otherwise a ValidationError is returned and nothing is
    /// written. The id and timestamp are assigned here.
    pub fn add_registration(
        &self,
        student_id: &str,
        course_id: &str,
        status: RegistrationStatus,
    ) -> Result<Registration> {
        let resolver = self.resolver();
        let student = resolver
            .find_student(student_id)?
            .ok_or_else(|| ValidationError::UnknownStudent(student_id.to_string()))?;
        if student.status == ActivityStatus::Inactive {
            return Err(ValidationError::InactiveStudent(student_id.to_string()).into());
        }
        let course = resolver
            .find_course(course_id)?
            .ok_or_else(|| ValidationError::UnknownCourse(course_id.to_string()))?;
        if course.status == ActivityStatus::Inactive {
            return Err(ValidationError::InactiveCourse(course_id.to_string()).into());
        }

        let registration = Registration {
            register_id: self.next_register_id()?,
            student_id: student.student_id,
            course_id: course.course_id,
            registration_date: Utc::now().timestamp() as f64,
            status,
        };
        self.registrations.append(&registration)?;
        info!(
            register_id = registration.register_id,
            student_id, course_id, "added registration"
        );
        Ok(registration)
    }

    pub fn list_registrations(&self) -> Result<Vec<Registration>> {
        Ok(self.registrations.scan_all()?)
    }

    pub fn registrations_for_student(&self, student_id: &str) -> Result<Vec<Registration>> {
        Ok(self
            .registrations
            .scan_all()?
            .into_iter()
            .filter(|r| r.student_id == student_id)
            .collect())
    }

    pub fn registrations_for_course(&self, course_id: &str) -> Result<Vec<Registration>> {
        Ok(self
            .registrations
            .scan_all()?
            .into_iter()
            .filter(|r| r.course_id == course_id)
            .collect())
    }

    pub fn registrations_with_status(
        &self,
        status: RegistrationStatus,
    ) -> Result<Vec<Registration>> {
        Ok(self
            .registrations
            .scan_all()?
            .into_iter()
            .filter(|r| r.status == status)
            .collect())
    }

    pub fn find_registration(&self, register_id: u32) -> Result<Registration> {
        self.registrations
            .scan_all()?
            .into_iter()
            .find(|r| r.register_id == register_id)
            .ok_or_else(|| not_found::<Registration>(&register_id.to_string()))
    }

    /// Change the status of one registration. Status is the only mutable
    /// field on a registration.
    pub fn update_registration_status(
        &self,
        register_id: u32,
        status: RegistrationStatus,
    ) -> Result<Registration> {
        let mut all = self.registrations.scan_all()?;
        let target = all
            .iter_mut()
            .find(|r| r.register_id == register_id)
            .ok_or_else(|| not_found::<Registration>(&register_id.to_string()))?;
        target.status = status;
        let updated = target.clone();
        self.registrations.rewrite_all(&all)?;
        Ok(updated)
    }

    pub fn delete_registration(&self, register_id: u32) -> Result<()> {
        let all = self.registrations.scan_all()?;
        let remaining: Vec<Registration> = all
            .iter()
            .filter(|r| r.register_id != register_id)
            .cloned()
            .collect();
        if remaining.len() == all.len() {
            return Err(not_found::<Registration>(&register_id.to_string()));
        }
        self.registrations.rewrite_all(&remaining)?;
        info!(register_id, "deleted registration");
        Ok(())
    }

    // ---- reports ----

    pub fn student_report(&self) -> Result<String> {
        Ok(report::student_report(&self.students.scan_all()?))
    }

    pub fn registration_report(&self) -> Result<String> {
        let resolver = self.resolver();
        Ok(report::registration_report(
            &self.registrations.scan_all()?,
            &resolver.student_map()?,
            &resolver.course_map()?,
        ))
    }

    /// Build the student report and also write it to `report.txt` in the
    /// data directory. Returns the report text and the file path.
    pub fn save_student_report(&self) -> Result<(String, PathBuf)> {
        let text = self.student_report()?;
        let path = self.data_dir.join(STUDENT_REPORT_FILE);
        fs::write(&path, &text).map_err(crate::error::StoreError::from)?;
        Ok((text, path))
    }

    /// Build the registration report and also write it to
    /// `registration_report.txt` in the data directory.
    pub fn save_registration_report(&self) -> Result<(String, PathBuf)> {
        let text = self.registration_report()?;
        let path = self.data_dir.join(REGISTRATION_REPORT_FILE);
        fs::write(&path, &text).map_err(crate::error::StoreError::from)?;
        Ok((text, path))
    }
}

fn not_found<R: Record>(key: &str) -> Error {
    Error::NotFound {
        kind: R::KIND,
        key: key.to_string(),
    }
}
