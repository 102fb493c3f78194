use std::path::PathBuf;

use rollbook_core::error::Error;
use rollbook_core::types::{Course, Registration, Student};
use rollbook_core::Rollbook;
use tracing::debug;

use crate::commands::{Command, RegistrationFilter, ReportKind};

/// Structured result from executing a command.
pub enum CommandResult {
    /// Mutation succeeded (ADD, UPDATE, DELETE, REGISTER).
    Ok(String),
    /// Single student (GET STUDENT).
    Student(Student),
    /// Student roster (LIST STUDENTS).
    Students(Vec<Student>),
    /// Single course (GET COURSE).
    Course(Course),
    /// Course catalog (LIST COURSES).
    Courses(Vec<Course>),
    /// Single registration (GET REGISTRATION).
    Registration(Registration),
    /// Registration listing, possibly filtered (LIST REGISTRATIONS).
    Registrations(Vec<Registration>),
    /// Formatted report text, with the file path when SAVE was given.
    Report {
        text: String,
        saved_to: Option<PathBuf>,
    },
    /// Help text (optional topic for per-command help).
    Help(Option<String>),
    /// Exit signal.
    Exit,
}

/// Execute a parsed command against an open rollbook.
pub fn execute(book: &Rollbook, cmd: Command) -> Result<CommandResult, Error> {
    debug!(?cmd, "executing command");
    match cmd {
        Command::AddStudent(student) => {
            let id = student.student_id.clone();
            book.add_student(student)?;
            Ok(CommandResult::Ok(format!("Added student '{id}'.")))
        }
        Command::AddCourse(course) => {
            let id = course.course_id.clone();
            book.add_course(course)?;
            Ok(CommandResult::Ok(format!("Added course '{id}'.")))
        }
        Command::ListStudents => Ok(CommandResult::Students(book.list_students()?)),
        Command::ListCourses => Ok(CommandResult::Courses(book.list_courses()?)),
        Command::ListRegistrations(filter) => {
            let regs = match filter {
                RegistrationFilter::All => book.list_registrations()?,
                RegistrationFilter::Student(id) => book.registrations_for_student(&id)?,
                RegistrationFilter::Course(id) => book.registrations_for_course(&id)?,
                RegistrationFilter::Status(status) => book.registrations_with_status(status)?,
            };
            Ok(CommandResult::Registrations(regs))
        }
        Command::GetStudent(id) => Ok(CommandResult::Student(book.find_student(&id)?)),
        Command::GetCourse(id) => Ok(CommandResult::Course(book.find_course(&id)?)),
        Command::GetRegistration(id) => {
            Ok(CommandResult::Registration(book.find_registration(id)?))
        }
        Command::UpdateStudent { student_id, patch } => {
            book.update_student(&student_id, &patch)?;
            Ok(CommandResult::Ok(format!("Updated student '{student_id}'.")))
        }
        Command::UpdateCourse { course_id, patch } => {
            book.update_course(&course_id, &patch)?;
            Ok(CommandResult::Ok(format!("Updated course '{course_id}'.")))
        }
        Command::UpdateRegistration {
            register_id,
            status,
        } => {
            let updated = book.update_registration_status(register_id, status)?;
            Ok(CommandResult::Ok(format!(
                "Registration {} is now {}.",
                register_id,
                updated.status.label()
            )))
        }
        Command::DeleteStudent(id) => {
            book.delete_student(&id)?;
            Ok(CommandResult::Ok(format!("Deleted student '{id}'.")))
        }
        Command::DeleteCourse(id) => {
            book.delete_course(&id)?;
            Ok(CommandResult::Ok(format!("Deleted course '{id}'.")))
        }
        Command::DeleteRegistration(id) => {
            book.delete_registration(id)?;
            Ok(CommandResult::Ok(format!("Deleted registration {id}.")))
        }
        Command::Register {
            student_id,
            course_id,
            status,
        } => {
            let reg = book.add_registration(&student_id, &course_id, status)?;
            Ok(CommandResult::Ok(format!(
                "Registered '{}' on '{}' (id {}).",
                reg.student_id, reg.course_id, reg.register_id
            )))
        }
        Command::Report { kind, save } => {
            let (text, saved_to) = match (kind, save) {
                (ReportKind::Students, false) => (book.student_report()?, None),
                (ReportKind::Students, true) => {
                    let (text, path) = book.save_student_report()?;
                    (text, Some(path))
                }
                (ReportKind::Registrations, false) => (book.registration_report()?, None),
                (ReportKind::Registrations, true) => {
                    let (text, path) = book.save_registration_report()?;
                    (text, Some(path))
                }
            };
            Ok(CommandResult::Report { text, saved_to })
        }
        Command::Help(topic) => Ok(CommandResult::Help(topic)),
        Command::Exit => Ok(CommandResult::Exit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use tempfile::tempdir;

    fn run(book: &Rollbook, line: &str) -> Result<CommandResult, Error> {
        execute(book, parser::parse(line).unwrap())
    }

    #[test]
    fn test_add_get_delete_student() {
        let dir = tempdir().unwrap();
        let book = Rollbook::open(dir.path()).unwrap();

        run(&book, "ADD STUDENT STU001 Ada Lovelace CS 2").unwrap();
        match run(&book, "GET STUDENT STU001").unwrap() {
            CommandResult::Student(s) => assert_eq!(s.first_name, "Ada"),
            _ => panic!("expected student"),
        }
        run(&book, "DELETE STUDENT STU001").unwrap();
        assert!(run(&book, "GET STUDENT STU001").is_err());
    }

    #[test]
    fn test_register_flow_and_filtered_list() {
        let dir = tempdir().unwrap();
        let book = Rollbook::open(dir.path()).unwrap();

        run(&book, "ADD STUDENT STU001 Ada Lovelace CS 2").unwrap();
        run(&book, r#"ADD COURSE CS101 "Intro to CS" 3 2568 1"#).unwrap();
        run(&book, "REGISTER STU001 CS101").unwrap();
        run(&book, "UPDATE REGISTRATION 1 SET status=dropped").unwrap();

        match run(&book, "LIST REGISTRATIONS STATUS dropped").unwrap() {
            CommandResult::Registrations(regs) => {
                assert_eq!(regs.len(), 1);
                assert_eq!(regs[0].register_id, 1);
            }
            _ => panic!("expected registrations"),
        }
        match run(&book, "LIST REGISTRATIONS STUDENT STU999").unwrap() {
            CommandResult::Registrations(regs) => assert!(regs.is_empty()),
            _ => panic!("expected registrations"),
        }
    }

    #[test]
    fn test_register_unknown_student_fails() {
        let dir = tempdir().unwrap();
        let book = Rollbook::open(dir.path()).unwrap();
        run(&book, r#"ADD COURSE CS101 "Intro" 3 2568 1"#).unwrap();
        assert!(run(&book, "REGISTER GHOST CS101").is_err());
    }

    #[test]
    fn test_report_save_returns_path() {
        let dir = tempdir().unwrap();
        let book = Rollbook::open(dir.path()).unwrap();
        run(&book, "ADD STUDENT STU001 Ada Lovelace CS 2").unwrap();

        match run(&book, "REPORT STUDENTS SAVE").unwrap() {
            CommandResult::Report { text, saved_to } => {
                assert!(text.contains("Total students: 1"));
                let path = saved_to.unwrap();
                assert!(path.ends_with("report.txt"));
                assert!(path.exists());
            }
            _ => panic!("expected report"),
        }
        match run(&book, "REPORT REGISTRATIONS").unwrap() {
            CommandResult::Report { saved_to, .. } => assert!(saved_to.is_none()),
            _ => panic!("expected report"),
        }
    }
}
