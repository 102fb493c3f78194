//! Human-oriented text reports with fixed tabular layouts.
//!
//! The layouts are stable output: callers write them verbatim to the report
//! text files, so the column widths here are part of the produced format.

use std::collections::HashMap;

use chrono::DateTime;

use crate::types::{Course, Registration, Student};

use super::stats::{RegistrationStats, StudentStats};

const RULE: &str =
    "-----------------------------------------------------------------------------------------";
const BANNER: &str =
    "=========================================================================================";

/// Clip to `width` characters, marking truncation with `...`, then left-pad.
fn cell(value: &str, width: usize) -> String {
    let clipped = if value.chars().count() > width {
        let prefix: String = value.chars().take(width.saturating_sub(3)).collect();
        format!("{prefix}...")
    } else {
        value.to_string()
    };
    format!("{clipped:<width$}")
}

fn header_row(columns: &[(&str, usize)]) -> String {
    columns
        .iter()
        .map(|(name, width)| cell(name, *width))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn data_row(values: &[String], columns: &[(&str, usize)]) -> String {
    values
        .iter()
        .zip(columns)
        .map(|(v, (_, width))| cell(v, *width))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn format_timestamp(ts: f64) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

/// Full student report: roster table plus major/year/status summaries.
pub fn student_report(students: &[Student]) -> String {
    const COLUMNS: &[(&str, usize)] = &[
        ("STUDENT ID", 15),
        ("FIRST NAME", 20),
        ("LAST NAME", 20),
        ("MAJOR", 15),
        ("YEAR", 5),
        ("STATUS", 12),
    ];

    let mut out = String::new();
    out.push_str(BANNER);
    out.push('\n');
    out.push_str("                               Student Report\n");
    out.push_str(BANNER);
    out.push('\n');

    let header = header_row(COLUMNS);
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');

    for s in students {
        let row = data_row(
            &[
                s.student_id.clone(),
                s.first_name.clone(),
                s.last_name.clone(),
                s.major.clone(),
                s.year_level.to_string(),
                s.status.label().to_string(),
            ],
            COLUMNS,
        );
        out.push_str(&row);
        out.push('\n');
    }

    let stats = StudentStats::compute(students);

    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Total students: {}\n", stats.total));
    out.push_str("Students by Major:\n");
    for (major, count) in &stats.by_major {
        out.push_str(&format!("  - {major}: {count}\n"));
    }
    out.push_str("Students by Year:\n");
    for (year, count) in &stats.by_year {
        out.push_str(&format!("  - Year {year}: {count}\n"));
    }

    out.push_str(RULE);
    out.push('\n');
    out.push_str("Status summary:\n");
    out.push_str(&format!("  - Active: {}\n", stats.active));
    out.push_str(&format!("  - Inactive: {}\n", stats.inactive));

    out.push_str(RULE);
    out.push('\n');
    out.push_str("Summary:\n");
    if students.is_empty() {
        out.push_str("- No data to summarize.\n");
    } else {
        if let Some((year, count)) = stats.most_common_year() {
            out.push_str(&format!("- Most common year: Year {year} ({count} students)\n"));
        }
        if let Some((major, count)) = stats.most_common_major() {
            out.push_str(&format!("- Most common major: {major} ({count} students)\n"));
        }
        if let Some((major, count)) = stats.least_common_major() {
            out.push_str(&format!("- Least common major: {major} ({count} students)\n"));
        }
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

/// Full registration report: each row joined with student and course
/// metadata, followed by the aggregate breakdowns.
pub fn registration_report(
    registrations: &[Registration],
    students: &HashMap<String, Student>,
    courses: &HashMap<String, Course>,
) -> String {
    const COLUMNS: &[(&str, usize)] = &[
        ("ID", 8),
        ("STUDENT ID", 16),
        ("NAME", 22),
        ("MAJOR", 10),
        ("COURSE ID", 10),
        ("COURSE NAME", 20),
        ("REGISTRATION DATE", 19),
        ("STATUS", 10),
    ];

    let mut out = String::new();
    out.push_str(BANNER);
    out.push('\n');
    out.push_str("                               Registration Report\n");
    out.push_str(BANNER);
    out.push('\n');

    let header = header_row(COLUMNS);
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');

    for r in registrations {
        let student = students.get(&r.student_id);
        let name = student
            .map(|s| format!("{} {}", s.first_name, s.last_name))
            .unwrap_or_else(|| "-".to_string());
        let major = student.map(|s| s.major.clone()).unwrap_or_else(|| "-".to_string());
        let course_name = courses
            .get(&r.course_id)
            .map(|c| c.course_name.clone())
            .unwrap_or_else(|| "-".to_string());

        let row = data_row(
            &[
                r.register_id.to_string(),
                r.student_id.clone(),
                name,
                major,
                r.course_id.clone(),
                course_name,
                format_timestamp(r.registration_date),
                r.status.label().to_string(),
            ],
            COLUMNS,
        );
        out.push_str(&row);
        out.push('\n');
    }

    let stats = RegistrationStats::compute(registrations, students);

    out.push_str(RULE);
    out.push('\n');
    out.push_str("Overall:\n");
    out.push_str(&format!("  - Registered: {}\n", stats.overall.registered));
    out.push_str(&format!("  - Dropped: {}\n", stats.overall.dropped));
    out.push_str(&format!("  - Drop rate: {:.1}%\n", stats.overall.drop_rate()));
    out.push_str(&format!(
        "  - Distinct registered students: {}\n",
        stats.distinct_registered_students
    ));

    out.push_str(RULE);
    out.push('\n');
    out.push_str("Popular courses (by registered count):\n");
    for (course_id, b) in stats.popular_courses() {
        let name = courses
            .get(course_id)
            .map(|c| c.course_name.as_str())
            .unwrap_or("-");
        out.push_str(&format!(
            "  - {course_id} ({name}): {} registered, {} dropped (drop rate {:.1}%)\n",
            b.registered,
            b.dropped,
            b.drop_rate()
        ));
    }

    out.push_str("Courses by drop rate:\n");
    for (course_id, b) in stats.courses_by_drop_rate() {
        out.push_str(&format!(
            "  - {course_id}: {:.1}% ({} dropped / {} total)\n",
            b.drop_rate(),
            b.dropped,
            b.total()
        ));
    }

    out.push_str(RULE);
    out.push('\n');
    out.push_str("By major:\n");
    for (major, b) in &stats.by_major {
        out.push_str(&format!(
            "  - {major}: {} registered, {} dropped (drop rate {:.1}%)\n",
            b.registered,
            b.dropped,
            b.drop_rate()
        ));
    }
    out.push_str("By year level:\n");
    for (year, b) in &stats.by_year {
        out.push_str(&format!(
            "  - Year {year}: {} registered, {} dropped (drop rate {:.1}%)\n",
            b.registered,
            b.dropped,
            b.drop_rate()
        ));
    }

    out.push_str(RULE);
    out.push('\n');
    out.push_str("Busiest days (top 5):\n");
    for (day, count) in stats.busiest_days(5) {
        out.push_str(&format!("  - {day}: {count} registrations\n"));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityStatus, RegistrationStatus};

    fn student(id: &str, first: &str, major: &str) -> Student {
        Student {
            student_id: id.to_string(),
            first_name: first.to_string(),
            last_name: "Last".to_string(),
            major: major.to_string(),
            year_level: 2,
            status: ActivityStatus::Active,
        }
    }

    #[test]
    fn test_cell_pads_and_clips() {
        assert_eq!(cell("ab", 5), "ab   ");
        assert_eq!(cell("abcde", 5), "abcde");
        assert_eq!(cell("abcdefgh", 5), "ab...");
    }

    #[test]
    fn test_student_report_contains_rows_and_summary() {
        let students = vec![
            student("S1", "Ada", "CS"),
            student("S2", "Grace", "CS"),
            student("S3", "Alan", "Math"),
        ];
        let report = student_report(&students);
        assert!(report.contains("STUDENT ID"));
        assert!(report.contains("Ada"));
        assert!(report.contains("Total students: 3"));
        assert!(report.contains("  - CS: 2"));
        assert!(report.contains("- Most common major: CS (2 students)"));
        assert!(report.contains("- Least common major: Math (1 students)"));
    }

    #[test]
    fn test_student_report_empty() {
        let report = student_report(&[]);
        assert!(report.contains("Total students: 0"));
        assert!(report.contains("- No data to summarize."));
    }

    #[test]
    fn test_registration_report_joins_course_name() {
        let students: HashMap<String, Student> =
            [("S1".to_string(), student("S1", "Ada", "CS"))].into();
        let courses: HashMap<String, Course> = [(
            "C1".to_string(),
            Course {
                course_id: "C1".to_string(),
                course_name: "Intro".to_string(),
                credit: 3,
                academic_year: 2568,
                semester: 1,
                status: ActivityStatus::Active,
            },
        )]
        .into();
        let regs = vec![Registration {
            register_id: 1,
            student_id: "S1".to_string(),
            course_id: "C1".to_string(),
            registration_date: 1_757_400_000.0,
            status: RegistrationStatus::Registered,
        }];

        let report = registration_report(&regs, &students, &courses);
        assert!(report.contains("Intro"));
        assert!(report.contains("Ada Last"));
        assert!(report.contains("Registered"));
        assert!(report.contains("Drop rate: 0.0%"));
    }

    #[test]
    fn test_registration_report_unknown_refs_use_placeholder() {
        let regs = vec![Registration {
            register_id: 9,
            student_id: "GHOST".to_string(),
            course_id: "NOPE".to_string(),
            registration_date: 0.0,
            status: RegistrationStatus::Dropped,
        }];
        let report = registration_report(&regs, &HashMap::new(), &HashMap::new());
        assert!(report.contains("GHOST"));
        assert!(report.contains("- "));
        assert!(report.contains("Drop rate: 100.0%"));
    }

    #[test]
    fn test_format_timestamp() {
        // 2025-09-09 00:00:00 UTC
        assert_eq!(format_timestamp(1_757_376_000.0), "2025-09-09 00:00:00");
    }
}
