//! Record types shared across the store, resolver, and report layers.

use serde::Serialize;

/// Activity flag shared by students and courses. Stored on disk as a
/// single byte: 1 = Active, 0 = Inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityStatus {
    Active,
    Inactive,
}

impl ActivityStatus {
    pub fn as_byte(self) -> u8 {
        match self {
            ActivityStatus::Active => 1,
            ActivityStatus::Inactive => 0,
        }
    }

    /// 1 decodes to Active; any other byte is treated as Inactive.
    pub fn from_byte(b: u8) -> Self {
        if b == 1 {
            ActivityStatus::Active
        } else {
            ActivityStatus::Inactive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityStatus::Active => "Active",
            ActivityStatus::Inactive => "Inactive",
        }
    }
}

/// Registration status byte: 1 = Registered, 0 = Dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistrationStatus {
    Registered,
    Dropped,
}

impl RegistrationStatus {
    pub fn as_byte(self) -> u8 {
        match self {
            RegistrationStatus::Registered => 1,
            RegistrationStatus::Dropped => 0,
        }
    }

    /// 1 decodes to Registered; any other byte is treated as Dropped.
    pub fn from_byte(b: u8) -> Self {
        if b == 1 {
            RegistrationStatus::Registered
        } else {
            RegistrationStatus::Dropped
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "Registered",
            RegistrationStatus::Dropped => "Dropped",
        }
    }
}

/// One student record. Encodes to a fixed 138-byte block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    /// Unique key, at most 16 bytes on disk.
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub major: String,
    pub year_level: u8,
    pub status: ActivityStatus,
}

/// One course record. Encodes to a fixed 65-byte block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    /// Unique key, at most 10 bytes on disk.
    pub course_id: String,
    pub course_name: String,
    pub credit: u8,
    /// e.g. 2568.
    pub academic_year: u16,
    /// 1, 2, or 3.
    pub semester: u8,
    pub status: ActivityStatus,
}

/// One registration record. Encodes to a fixed 45-byte block.
///
/// `student_id` and `course_id` are soft foreign keys: the file format does
/// not enforce them, the operation layer validates them on create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    /// Unique key, assigned as max(existing) + 1.
    pub register_id: u32,
    pub student_id: String,
    pub course_id: String,
    /// Unix timestamp, seconds since epoch.
    pub registration_date: f64,
    pub status: RegistrationStatus,
}

/// Field-level patch for updating a student in place. `None` keeps the
/// stored value. The key field is immutable.
#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub major: Option<String>,
    pub year_level: Option<u8>,
    pub status: Option<ActivityStatus>,
}

impl StudentPatch {
    pub fn apply(&self, student: &mut Student) {
        if let Some(v) = &self.first_name {
            student.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            student.last_name = v.clone();
        }
        if let Some(v) = &self.major {
            student.major = v.clone();
        }
        if let Some(v) = self.year_level {
            student.year_level = v;
        }
        if let Some(v) = self.status {
            student.status = v;
        }
    }
}

/// Field-level patch for updating a course in place.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub course_name: Option<String>,
    pub credit: Option<u8>,
    pub academic_year: Option<u16>,
    pub semester: Option<u8>,
    pub status: Option<ActivityStatus>,
}

impl CoursePatch {
    pub fn apply(&self, course: &mut Course) {
        if let Some(v) = &self.course_name {
            course.course_name = v.clone();
        }
        if let Some(v) = self.credit {
            course.credit = v;
        }
        if let Some(v) = self.academic_year {
            course.academic_year = v;
        }
        if let Some(v) = self.semester {
            course.semester = v;
        }
        if let Some(v) = self.status {
            course.status = v;
        }
    }
}
