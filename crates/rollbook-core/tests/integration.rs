//! End-to-end scenarios over the full stack: encode, append, scan,
//! rewrite, cross-file validation, and reporting.

use std::fs;

use rollbook_core::api::{Rollbook, COURSE_FILE, REGISTRATION_FILE, STUDENT_FILE};
use rollbook_core::encoding::Record;
use rollbook_core::error::{Error, ValidationError};
use rollbook_core::types::{
    ActivityStatus, Course, CoursePatch, Registration, RegistrationStatus, Student, StudentPatch,
};
use tempfile::tempdir;

fn student(id: &str, first: &str, major: &str, year: u8) -> Student {
    Student {
        student_id: id.to_string(),
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        major: major.to_string(),
        year_level: year,
        status: ActivityStatus::Active,
    }
}

fn course(id: &str, name: &str) -> Course {
    Course {
        course_id: id.to_string(),
        course_name: name.to_string(),
        credit: 3,
        academic_year: 2568,
        semester: 1,
        status: ActivityStatus::Active,
    }
}

#[test]
fn test_student_file_grows_by_record_size() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();

    book.add_student(student("STU001", "Ada", "CS", 1)).unwrap();
    book.add_student(student("STU002", "Grace", "CS", 2)).unwrap();

    let len = fs::metadata(dir.path().join(STUDENT_FILE)).unwrap().len();
    assert_eq!(len, 2 * Student::SIZE as u64);
}

#[test]
fn test_records_come_back_in_insertion_order() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();

    let ids = ["STU003", "STU001", "STU002"];
    for id in ids {
        book.add_student(student(id, "X", "CS", 1)).unwrap();
    }

    let listed: Vec<String> = book
        .list_students()
        .unwrap()
        .into_iter()
        .map(|s| s.student_id)
        .collect();
    assert_eq!(listed, ids);
}

#[test]
fn test_update_then_read_back() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();

    book.add_student(student("STU001", "Ada", "CS", 1)).unwrap();
    book.add_course(course("CS101", "Intro to CS")).unwrap();

    book.update_student(
        "STU001",
        &StudentPatch {
            year_level: Some(2),
            status: Some(ActivityStatus::Inactive),
            ..Default::default()
        },
    )
    .unwrap();
    book.update_course(
        "CS101",
        &CoursePatch {
            credit: Some(4),
            ..Default::default()
        },
    )
    .unwrap();

    // Reopen over the same directory to prove persistence.
    let book = Rollbook::open(dir.path()).unwrap();
    let s = book.find_student("STU001").unwrap();
    assert_eq!(s.year_level, 2);
    assert_eq!(s.status, ActivityStatus::Inactive);
    assert_eq!(s.first_name, "Ada");
    assert_eq!(book.find_course("CS101").unwrap().credit, 4);
}

#[test]
fn test_delete_shrinks_the_file() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();

    book.add_course(course("CS101", "Intro")).unwrap();
    book.add_course(course("CS102", "Data Structures")).unwrap();
    book.delete_course("CS101").unwrap();

    let len = fs::metadata(dir.path().join(COURSE_FILE)).unwrap().len();
    assert_eq!(len, Course::SIZE as u64);
    assert!(matches!(book.find_course("CS101"), Err(Error::NotFound { .. })));
    assert_eq!(book.find_course("CS102").unwrap().course_name, "Data Structures");
}

#[test]
fn test_add_delete_re_add_same_key() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();

    book.add_student(student("STU001", "Ada", "CS", 1)).unwrap();
    book.delete_student("STU001").unwrap();
    // The key is free again after deletion.
    book.add_student(student("STU001", "Ada", "Math", 1)).unwrap();
    assert_eq!(book.find_student("STU001").unwrap().major, "Math");
}

#[test]
fn test_registration_guard_and_id_assignment() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();

    book.add_student(student("STU001", "Ada", "CS", 1)).unwrap();
    book.add_course(course("CS101", "Intro")).unwrap();

    let r1 = book
        .add_registration("STU001", "CS101", RegistrationStatus::Registered)
        .unwrap();
    assert_eq!(r1.register_id, 1);

    let r2 = book
        .add_registration("STU001", "CS101", RegistrationStatus::Registered)
        .unwrap();
    assert_eq!(r2.register_id, 2);

    // Deleting the highest id does not cause reuse of lower gaps.
    book.delete_registration(1).unwrap();
    let r3 = book
        .add_registration("STU001", "CS101", RegistrationStatus::Registered)
        .unwrap();
    assert_eq!(r3.register_id, 3);

    let err = book
        .add_registration("GHOST", "CS101", RegistrationStatus::Registered)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::UnknownStudent(_))
    ));

    let len = fs::metadata(dir.path().join(REGISTRATION_FILE)).unwrap().len();
    assert_eq!(len, 2 * Registration::SIZE as u64);
}

#[test]
fn test_drop_rate_in_registration_report() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();

    for id in ["S1", "S2", "S3", "S4"] {
        book.add_student(student(id, "N", "CS", 1)).unwrap();
    }
    book.add_course(course("CS101", "Intro")).unwrap();

    for id in ["S1", "S2", "S3"] {
        book.add_registration(id, "CS101", RegistrationStatus::Registered)
            .unwrap();
    }
    book.add_registration("S4", "CS101", RegistrationStatus::Dropped)
        .unwrap();

    let report = book.registration_report().unwrap();
    assert!(report.contains("Registered: 3"));
    assert!(report.contains("Dropped: 1"));
    assert!(report.contains("Drop rate: 25.0%"));
}

#[test]
fn test_registration_report_joins_names() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();

    book.add_student(student("STU001", "Ada", "CS", 1)).unwrap();
    book.add_course(course("CS101", "Intro to CS")).unwrap();
    book.add_registration("STU001", "CS101", RegistrationStatus::Registered)
        .unwrap();

    let report = book.registration_report().unwrap();
    assert!(report.contains("Ada Tester"));
    assert!(report.contains("Intro to CS"));
}

#[test]
fn test_saved_reports_land_in_data_dir() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();
    book.add_student(student("STU001", "Ada", "CS", 1)).unwrap();

    let (text, path) = book.save_student_report().unwrap();
    assert_eq!(path, dir.path().join("report.txt"));
    assert_eq!(fs::read_to_string(path).unwrap(), text);

    let (_, path) = book.save_registration_report().unwrap();
    assert_eq!(path, dir.path().join("registration_report.txt"));
}

#[test]
fn test_long_fields_survive_round_trip_truncated() {
    let dir = tempdir().unwrap();
    let book = Rollbook::open(dir.path()).unwrap();

    let long_name = "a".repeat(80);
    let mut s = student("STU001", &long_name, "CS", 1);
    s.last_name = long_name.clone();
    book.add_student(s).unwrap();

    let fetched = book.find_student("STU001").unwrap();
    // Names are clipped to the on-disk field width of 50 bytes.
    assert_eq!(fetched.first_name, "a".repeat(50));
    assert_eq!(fetched.last_name, "a".repeat(50));
}
