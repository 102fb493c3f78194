use rollbook_core::types::{Course, CoursePatch, RegistrationStatus, Student, StudentPatch};

/// A parsed console command.
#[derive(Debug)]
pub enum Command {
    AddStudent(Student),
    AddCourse(Course),
    ListStudents,
    ListCourses,
    ListRegistrations(RegistrationFilter),
    GetStudent(String),
    GetCourse(String),
    GetRegistration(u32),
    UpdateStudent {
        student_id: String,
        patch: StudentPatch,
    },
    UpdateCourse {
        course_id: String,
        patch: CoursePatch,
    },
    UpdateRegistration {
        register_id: u32,
        status: RegistrationStatus,
    },
    DeleteStudent(String),
    DeleteCourse(String),
    DeleteRegistration(u32),
    Register {
        student_id: String,
        course_id: String,
        status: RegistrationStatus,
    },
    Report {
        kind: ReportKind,
        save: bool,
    },
    Help(Option<String>),
    Exit,
}

/// Optional narrowing of LIST REGISTRATIONS.
#[derive(Debug, PartialEq)]
pub enum RegistrationFilter {
    All,
    Student(String),
    Course(String),
    Status(RegistrationStatus),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportKind {
    Students,
    Registrations,
}
