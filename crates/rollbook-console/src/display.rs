use chrono::DateTime;
use rollbook_core::types::{Course, Registration, Student};
use serde_json::json;

use crate::executor::CommandResult;

/// Output mode for rendering command results.
pub enum OutputMode {
    /// Human-readable pretty-printed output.
    Pretty,
    /// Machine-parseable JSON (one JSON object per result on stdout).
    Json,
}

/// Render a command result to stdout in the given mode.
///
/// Returns `true` to continue execution, `false` to signal exit.
pub fn render(result: &CommandResult, mode: &OutputMode) -> bool {
    match result {
        CommandResult::Ok(msg) => match mode {
            OutputMode::Pretty => println!("{msg}"),
            OutputMode::Json => println!("{}", json!({"ok": true, "message": msg})),
        },
        CommandResult::Student(s) => match mode {
            OutputMode::Pretty => print_students(std::slice::from_ref(s)),
            OutputMode::Json => println!("{}", json!({"student": s})),
        },
        CommandResult::Students(students) => match mode {
            OutputMode::Pretty => print_students(students),
            OutputMode::Json => {
                println!("{}", json!({"students": students, "count": students.len()}))
            }
        },
        CommandResult::Course(c) => match mode {
            OutputMode::Pretty => print_courses(std::slice::from_ref(c)),
            OutputMode::Json => println!("{}", json!({"course": c})),
        },
        CommandResult::Courses(courses) => match mode {
            OutputMode::Pretty => print_courses(courses),
            OutputMode::Json => println!("{}", json!({"courses": courses, "count": courses.len()})),
        },
        CommandResult::Registration(r) => match mode {
            OutputMode::Pretty => print_registrations(std::slice::from_ref(r)),
            OutputMode::Json => println!("{}", json!({"registration": r})),
        },
        CommandResult::Registrations(regs) => match mode {
            OutputMode::Pretty => print_registrations(regs),
            OutputMode::Json => {
                println!("{}", json!({"registrations": regs, "count": regs.len()}))
            }
        },
        CommandResult::Report { text, saved_to } => match mode {
            OutputMode::Pretty => {
                print!("{text}");
                if let Some(path) = saved_to {
                    println!("Saved to {}.", path.display());
                }
            }
            OutputMode::Json => println!(
                "{}",
                json!({
                    "report": text,
                    "saved_to": saved_to.as_ref().map(|p| p.display().to_string()),
                })
            ),
        },
        CommandResult::Help(topic) => match mode {
            OutputMode::Pretty => print_help(topic.as_deref()),
            OutputMode::Json => println!("{}", json!({"help": help_text(topic.as_deref())})),
        },
        CommandResult::Exit => return false,
    }
    true
}

/// Render an error in the given mode (always to stderr).
pub fn render_error(err: &dyn std::fmt::Display, mode: &OutputMode) {
    match mode {
        OutputMode::Pretty => print_error(err),
        OutputMode::Json => {
            eprintln!("{}", json!({"error": err.to_string()}));
        }
    }
}

/// Print an error to stderr (pretty mode).
pub fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("Error: {err}");
}

// ---- Pretty-print helpers ----

fn print_students(students: &[Student]) {
    if students.is_empty() {
        println!("No students.");
        return;
    }
    println!(
        "{:<16} {:<20} {:<20} {:<15} {:<5} {:<10}",
        "STUDENT ID", "FIRST NAME", "LAST NAME", "MAJOR", "YEAR", "STATUS"
    );
    for s in students {
        println!(
            "{:<16} {:<20} {:<20} {:<15} {:<5} {:<10}",
            s.student_id,
            s.first_name,
            s.last_name,
            s.major,
            s.year_level,
            s.status.label()
        );
    }
    println!("{} student(s).", students.len());
}

fn print_courses(courses: &[Course]) {
    if courses.is_empty() {
        println!("No courses.");
        return;
    }
    println!(
        "{:<12} {:<30} {:<7} {:<6} {:<9} {:<10}",
        "COURSE ID", "COURSE NAME", "CREDIT", "YEAR", "SEMESTER", "STATUS"
    );
    for c in courses {
        println!(
            "{:<12} {:<30} {:<7} {:<6} {:<9} {:<10}",
            c.course_id,
            c.course_name,
            c.credit,
            c.academic_year,
            c.semester,
            c.status.label()
        );
    }
    println!("{} course(s).", courses.len());
}

fn print_registrations(regs: &[Registration]) {
    if regs.is_empty() {
        println!("No registrations.");
        return;
    }
    println!(
        "{:<8} {:<16} {:<16} {:<20} {:<12}",
        "ID", "STUDENT ID", "COURSE ID", "DATE", "STATUS"
    );
    for r in regs {
        println!(
            "{:<8} {:<16} {:<16} {:<20} {:<12}",
            r.register_id,
            r.student_id,
            r.course_id,
            format_timestamp(r.registration_date),
            r.status.label()
        );
    }
    println!("{} registration(s).", regs.len());
}

fn format_timestamp(ts: f64) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

// ---- Help ----

const HELP_GENERAL: &str = "\
Commands:
  ADD STUDENT <id> <first> <last> <major> <year> [ACTIVE|INACTIVE]
  ADD COURSE <id> <name> <credit> <year> <semester> [ACTIVE|INACTIVE]
  LIST STUDENTS
  LIST COURSES
  LIST REGISTRATIONS [STUDENT <id> | COURSE <id> | STATUS <value>]
  GET STUDENT|COURSE|REGISTRATION <id>
  UPDATE STUDENT <id> SET field=value ...
  UPDATE COURSE <id> SET field=value ...
  UPDATE REGISTRATION <id> SET status=registered|dropped
  DELETE STUDENT|COURSE|REGISTRATION <id>
  REGISTER <student-id> <course-id> [DROPPED]
  REPORT STUDENTS|REGISTRATIONS [SAVE]
  HELP [command]
  EXIT

Quote multi-word values: ADD COURSE CS101 \"Intro to CS\" 3 2568 1
Type HELP <command> for details on one command.";

fn help_text(topic: Option<&str>) -> String {
    let Some(topic) = topic else {
        return HELP_GENERAL.to_string();
    };
    match topic {
        "ADD" => "ADD STUDENT <id> <first> <last> <major> <year> [ACTIVE|INACTIVE]\n\
                  ADD COURSE <id> <name> <credit> <year> <semester> [ACTIVE|INACTIVE]\n\
                  Ids must be unique; semester must be 1, 2, or 3."
            .to_string(),
        "LIST" => "LIST STUDENTS | LIST COURSES\n\
                   LIST REGISTRATIONS [STUDENT <id> | COURSE <id> | STATUS registered|dropped]"
            .to_string(),
        "GET" => "GET STUDENT|COURSE|REGISTRATION <id> -- fetch one record by key.".to_string(),
        "UPDATE" => "UPDATE STUDENT <id> SET first_name=... last_name=... major=... \
                     year_level=... status=active|inactive\n\
                     UPDATE COURSE <id> SET course_name=... credit=... academic_year=... \
                     semester=... status=active|inactive\n\
                     UPDATE REGISTRATION <id> SET status=registered|dropped\n\
                     Unmentioned fields keep their stored values. Keys cannot change."
            .to_string(),
        "DELETE" => "DELETE STUDENT|COURSE|REGISTRATION <id> -- remove one record.".to_string(),
        "REGISTER" => "REGISTER <student-id> <course-id> [DROPPED]\n\
                       The student must exist and be Active; the course must exist and be open.\n\
                       The registration id and timestamp are assigned automatically."
            .to_string(),
        "REPORT" => "REPORT STUDENTS [SAVE] | REPORT REGISTRATIONS [SAVE]\n\
                     SAVE also writes the text to report.txt / registration_report.txt\n\
                     in the data directory."
            .to_string(),
        other => format!("No help for '{other}'. Type HELP for the command list."),
    }
}

fn print_help(topic: Option<&str>) {
    println!("{}", help_text(topic));
}
