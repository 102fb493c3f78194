use rollbook_core::types::{
    ActivityStatus, Course, CoursePatch, RegistrationStatus, Student, StudentPatch,
};

use crate::commands::{Command, RegistrationFilter, ReportKind};

/// Tokenize an input line into a vector of string tokens.
///
/// Handles:
/// - Whitespace-separated words
/// - Quoted strings: `"Intro to CS"` becomes a single token (quotes preserved)
/// - `key="quoted value"` stays one token; `=` is never split out
fn tokenize(input: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        // Quoted string.
        if chars[i] == '"' {
            let start = i;
            i += 1;
            while i < len && chars[i] != '"' {
                if chars[i] == '\\' {
                    i += 1; // skip escaped char
                }
                i += 1;
            }
            if i >= len {
                return Err("Unterminated quoted string".to_string());
            }
            i += 1; // skip closing quote
            let token: String = chars[start..i].iter().collect();
            tokens.push(token);
            continue;
        }

        // Word token; `key="..."` absorbs the quoted value.
        let start = i;
        while i < len && !chars[i].is_whitespace() && chars[i] != '"' {
            i += 1;
        }
        if i < len && chars[i] == '"' && i > start && chars[i - 1] == '=' {
            i += 1; // skip opening quote
            while i < len && chars[i] != '"' {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            if i >= len {
                return Err("Unterminated quoted string".to_string());
            }
            i += 1; // skip closing quote
        }
        if i > start {
            let token: String = chars[start..i].iter().collect();
            tokens.push(token);
        }
    }

    Ok(tokens)
}

/// Strip surrounding quotes from a token, if present.
fn unquote(s: &str) -> String {
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

fn parse_activity_status(s: &str) -> Result<ActivityStatus, String> {
    match s.to_uppercase().as_str() {
        "ACTIVE" => Ok(ActivityStatus::Active),
        "INACTIVE" => Ok(ActivityStatus::Inactive),
        _ => Err(format!("Invalid status '{s}'. Expected ACTIVE or INACTIVE.")),
    }
}

fn parse_registration_status(s: &str) -> Result<RegistrationStatus, String> {
    match s.to_uppercase().as_str() {
        "REGISTERED" => Ok(RegistrationStatus::Registered),
        "DROPPED" => Ok(RegistrationStatus::Dropped),
        _ => Err(format!(
            "Invalid status '{s}'. Expected REGISTERED or DROPPED."
        )),
    }
}

fn parse_u8(s: &str, what: &str) -> Result<u8, String> {
    s.parse::<u8>().map_err(|_| format!("Invalid {what} '{s}'"))
}

fn parse_u16(s: &str, what: &str) -> Result<u16, String> {
    s.parse::<u16>().map_err(|_| format!("Invalid {what} '{s}'"))
}

fn parse_u32(s: &str, what: &str) -> Result<u32, String> {
    s.parse::<u32>().map_err(|_| format!("Invalid {what} '{s}'"))
}

/// Split a `key=value` pair token such as `major=Math` or `credit=4`.
fn parse_kv_pair(token: &str) -> Result<(&str, String), String> {
    let eq_pos = token
        .find('=')
        .ok_or_else(|| format!("Expected key=value pair, got '{token}'"))?;
    let key = &token[..eq_pos];
    let val = &token[eq_pos + 1..];
    if val.is_empty() {
        return Err(format!("Missing value after '=' in '{token}'"));
    }
    Ok((key, unquote(val)))
}

/// Parse an input line into a [`Command`].
pub fn parse(input: &str) -> Result<Command, String> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err("Empty command".to_string());
    }

    let first = tokens[0].to_uppercase();
    match first.as_str() {
        "ADD" => {
            if tokens.len() < 2 {
                return Err("Expected STUDENT or COURSE after ADD".to_string());
            }
            match tokens[1].to_uppercase().as_str() {
                "STUDENT" => parse_add_student(&tokens),
                "COURSE" => parse_add_course(&tokens),
                _ => Err("Expected STUDENT or COURSE after ADD".to_string()),
            }
        }
        "LIST" => parse_list(&tokens),
        "GET" => parse_get(&tokens),
        "UPDATE" => parse_update(&tokens),
        "DELETE" => parse_delete(&tokens),
        "REGISTER" => parse_register(&tokens),
        "REPORT" => parse_report(&tokens),
        "HELP" => Ok(Command::Help(
            tokens.get(1).map(|t| t.to_uppercase()),
        )),
        "EXIT" | "QUIT" => Ok(Command::Exit),
        _ => Err(format!(
            "Unknown command '{}'. Type HELP for available commands.",
            tokens[0]
        )),
    }
}

/// ADD STUDENT <id> <first> <last> <major> <year> [ACTIVE|INACTIVE]
fn parse_add_student(tokens: &[String]) -> Result<Command, String> {
    if tokens.len() < 7 || tokens.len() > 8 {
        return Err(
            "Usage: ADD STUDENT <id> <first> <last> <major> <year> [ACTIVE|INACTIVE]".to_string(),
        );
    }
    let status = match tokens.get(7) {
        Some(t) => parse_activity_status(t)?,
        None => ActivityStatus::Active,
    };
    Ok(Command::AddStudent(Student {
        student_id: unquote(&tokens[2]),
        first_name: unquote(&tokens[3]),
        last_name: unquote(&tokens[4]),
        major: unquote(&tokens[5]),
        year_level: parse_u8(&tokens[6], "year level")?,
        status,
    }))
}

/// ADD COURSE <id> <name> <credit> <academic-year> <semester> [ACTIVE|INACTIVE]
fn parse_add_course(tokens: &[String]) -> Result<Command, String> {
    if tokens.len() < 7 || tokens.len() > 8 {
        return Err(
            "Usage: ADD COURSE <id> <name> <credit> <year> <semester> [ACTIVE|INACTIVE]"
                .to_string(),
        );
    }
    let status = match tokens.get(7) {
        Some(t) => parse_activity_status(t)?,
        None => ActivityStatus::Active,
    };
    Ok(Command::AddCourse(Course {
        course_id: unquote(&tokens[2]),
        course_name: unquote(&tokens[3]),
        credit: parse_u8(&tokens[4], "credit")?,
        academic_year: parse_u16(&tokens[5], "academic year")?,
        semester: parse_u8(&tokens[6], "semester")?,
        status,
    }))
}

/// LIST STUDENTS | LIST COURSES |
/// LIST REGISTRATIONS [STUDENT <id> | COURSE <id> | STATUS <value>]
fn parse_list(tokens: &[String]) -> Result<Command, String> {
    if tokens.len() < 2 {
        return Err("Expected STUDENTS, COURSES, or REGISTRATIONS after LIST".to_string());
    }
    match tokens[1].to_uppercase().as_str() {
        "STUDENTS" => Ok(Command::ListStudents),
        "COURSES" => Ok(Command::ListCourses),
        "REGISTRATIONS" => {
            if tokens.len() == 2 {
                return Ok(Command::ListRegistrations(RegistrationFilter::All));
            }
            if tokens.len() != 4 {
                return Err(
                    "Usage: LIST REGISTRATIONS [STUDENT <id> | COURSE <id> | STATUS <value>]"
                        .to_string(),
                );
            }
            let filter = match tokens[2].to_uppercase().as_str() {
                "STUDENT" => RegistrationFilter::Student(unquote(&tokens[3])),
                "COURSE" => RegistrationFilter::Course(unquote(&tokens[3])),
                "STATUS" => RegistrationFilter::Status(parse_registration_status(&tokens[3])?),
                other => {
                    return Err(format!(
                        "Invalid filter '{other}'. Expected STUDENT, COURSE, or STATUS."
                    ))
                }
            };
            Ok(Command::ListRegistrations(filter))
        }
        other => Err(format!(
            "Invalid target '{other}'. Expected STUDENTS, COURSES, or REGISTRATIONS."
        )),
    }
}

/// GET STUDENT <id> | GET COURSE <id> | GET REGISTRATION <id>
fn parse_get(tokens: &[String]) -> Result<Command, String> {
    if tokens.len() != 3 {
        return Err("Usage: GET STUDENT|COURSE|REGISTRATION <id>".to_string());
    }
    match tokens[1].to_uppercase().as_str() {
        "STUDENT" => Ok(Command::GetStudent(unquote(&tokens[2]))),
        "COURSE" => Ok(Command::GetCourse(unquote(&tokens[2]))),
        "REGISTRATION" => Ok(Command::GetRegistration(parse_u32(
            &tokens[2],
            "registration id",
        )?)),
        other => Err(format!(
            "Invalid target '{other}'. Expected STUDENT, COURSE, or REGISTRATION."
        )),
    }
}

/// UPDATE STUDENT <id> SET field=value ... |
/// UPDATE COURSE <id> SET field=value ... |
/// UPDATE REGISTRATION <id> SET status=<value>
fn parse_update(tokens: &[String]) -> Result<Command, String> {
    if tokens.len() < 5 || tokens[3].to_uppercase() != "SET" {
        return Err("Usage: UPDATE STUDENT|COURSE|REGISTRATION <id> SET field=value ...".to_string());
    }
    let pairs = &tokens[4..];
    match tokens[1].to_uppercase().as_str() {
        "STUDENT" => {
            let mut patch = StudentPatch::default();
            for token in pairs {
                let (key, value) = parse_kv_pair(token)?;
                match key {
                    "first_name" => patch.first_name = Some(value),
                    "last_name" => patch.last_name = Some(value),
                    "major" => patch.major = Some(value),
                    "year_level" => patch.year_level = Some(parse_u8(&value, "year level")?),
                    "status" => patch.status = Some(parse_activity_status(&value)?),
                    _ => return Err(format!("Unknown student field '{key}'")),
                }
            }
            Ok(Command::UpdateStudent {
                student_id: unquote(&tokens[2]),
                patch,
            })
        }
        "COURSE" => {
            let mut patch = CoursePatch::default();
            for token in pairs {
                let (key, value) = parse_kv_pair(token)?;
                match key {
                    "course_name" => patch.course_name = Some(value),
                    "credit" => patch.credit = Some(parse_u8(&value, "credit")?),
                    "academic_year" => {
                        patch.academic_year = Some(parse_u16(&value, "academic year")?)
                    }
                    "semester" => patch.semester = Some(parse_u8(&value, "semester")?),
                    "status" => patch.status = Some(parse_activity_status(&value)?),
                    _ => return Err(format!("Unknown course field '{key}'")),
                }
            }
            Ok(Command::UpdateCourse {
                course_id: unquote(&tokens[2]),
                patch,
            })
        }
        "REGISTRATION" => {
            if pairs.len() != 1 {
                return Err("Usage: UPDATE REGISTRATION <id> SET status=<value>".to_string());
            }
            let (key, value) = parse_kv_pair(&pairs[0])?;
            if key != "status" {
                return Err(format!(
                    "Unknown registration field '{key}'. Only status can be updated."
                ));
            }
            Ok(Command::UpdateRegistration {
                register_id: parse_u32(&tokens[2], "registration id")?,
                status: parse_registration_status(&value)?,
            })
        }
        other => Err(format!(
            "Invalid target '{other}'. Expected STUDENT, COURSE, or REGISTRATION."
        )),
    }
}

/// DELETE STUDENT <id> | DELETE COURSE <id> | DELETE REGISTRATION <id>
fn parse_delete(tokens: &[String]) -> Result<Command, String> {
    if tokens.len() != 3 {
        return Err("Usage: DELETE STUDENT|COURSE|REGISTRATION <id>".to_string());
    }
    match tokens[1].to_uppercase().as_str() {
        "STUDENT" => Ok(Command::DeleteStudent(unquote(&tokens[2]))),
        "COURSE" => Ok(Command::DeleteCourse(unquote(&tokens[2]))),
        "REGISTRATION" => Ok(Command::DeleteRegistration(parse_u32(
            &tokens[2],
            "registration id",
        )?)),
        other => Err(format!(
            "Invalid target '{other}'. Expected STUDENT, COURSE, or REGISTRATION."
        )),
    }
}

/// REGISTER <student-id> <course-id> [DROPPED]
fn parse_register(tokens: &[String]) -> Result<Command, String> {
    if tokens.len() < 3 || tokens.len() > 4 {
        return Err("Usage: REGISTER <student-id> <course-id> [DROPPED]".to_string());
    }
    let status = match tokens.get(3) {
        Some(t) => parse_registration_status(t)?,
        None => RegistrationStatus::Registered,
    };
    Ok(Command::Register {
        student_id: unquote(&tokens[1]),
        course_id: unquote(&tokens[2]),
        status,
    })
}

/// REPORT STUDENTS [SAVE] | REPORT REGISTRATIONS [SAVE]
fn parse_report(tokens: &[String]) -> Result<Command, String> {
    if tokens.len() < 2 || tokens.len() > 3 {
        return Err("Usage: REPORT STUDENTS|REGISTRATIONS [SAVE]".to_string());
    }
    let kind = match tokens[1].to_uppercase().as_str() {
        "STUDENTS" => ReportKind::Students,
        "REGISTRATIONS" => ReportKind::Registrations,
        other => {
            return Err(format!(
                "Invalid target '{other}'. Expected STUDENTS or REGISTRATIONS."
            ))
        }
    };
    let save = match tokens.get(2) {
        Some(t) if t.to_uppercase() == "SAVE" => true,
        Some(t) => return Err(format!("Unexpected token '{t}'. Did you mean SAVE?")),
        None => false,
    };
    Ok(Command::Report { kind, save })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- tokenizer ----

    #[test]
    fn test_tokenize_words() {
        assert_eq!(
            tokenize("LIST STUDENTS").unwrap(),
            vec!["LIST".to_string(), "STUDENTS".to_string()]
        );
    }

    #[test]
    fn test_tokenize_quoted_string() {
        let tokens = tokenize(r#"ADD COURSE CS101 "Intro to CS" 3 2568 1"#).unwrap();
        assert_eq!(tokens[3], r#""Intro to CS""#);
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_tokenize_kv_with_quoted_value() {
        let tokens = tokenize(r#"UPDATE COURSE CS101 SET course_name="Data Structures""#).unwrap();
        assert_eq!(tokens[4], r#"course_name="Data Structures""#);
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        assert!(tokenize(r#"ADD COURSE C1 "oops"#).is_err());
    }

    // ---- ADD ----

    #[test]
    fn test_parse_add_student() {
        let cmd = parse("ADD STUDENT STU001 Ada Lovelace Math 2").unwrap();
        match cmd {
            Command::AddStudent(s) => {
                assert_eq!(s.student_id, "STU001");
                assert_eq!(s.first_name, "Ada");
                assert_eq!(s.last_name, "Lovelace");
                assert_eq!(s.major, "Math");
                assert_eq!(s.year_level, 2);
                assert_eq!(s.status, ActivityStatus::Active);
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_student_explicit_status() {
        let cmd = parse("ADD STUDENT STU001 Ada Lovelace Math 2 INACTIVE").unwrap();
        match cmd {
            Command::AddStudent(s) => assert_eq!(s.status, ActivityStatus::Inactive),
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_student_bad_year() {
        assert!(parse("ADD STUDENT STU001 Ada Lovelace Math twelve").is_err());
    }

    #[test]
    fn test_parse_add_student_too_few_args() {
        assert!(parse("ADD STUDENT STU001 Ada").is_err());
    }

    #[test]
    fn test_parse_add_rejects_trailing_tokens() {
        assert!(parse("ADD STUDENT STU001 Ada Lovelace Math 2 ACTIVE junk").is_err());
        assert!(parse(r#"ADD COURSE CS101 "Intro" 3 2568 1 ACTIVE junk"#).is_err());
    }

    #[test]
    fn test_parse_add_course_quoted_name() {
        let cmd = parse(r#"ADD COURSE CS101 "Intro to CS" 3 2568 1"#).unwrap();
        match cmd {
            Command::AddCourse(c) => {
                assert_eq!(c.course_id, "CS101");
                assert_eq!(c.course_name, "Intro to CS");
                assert_eq!(c.credit, 3);
                assert_eq!(c.academic_year, 2568);
                assert_eq!(c.semester, 1);
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    // ---- LIST ----

    #[test]
    fn test_parse_list_students() {
        assert!(matches!(
            parse("list students").unwrap(),
            Command::ListStudents
        ));
    }

    #[test]
    fn test_parse_list_registrations_all() {
        assert!(matches!(
            parse("LIST REGISTRATIONS").unwrap(),
            Command::ListRegistrations(RegistrationFilter::All)
        ));
    }

    #[test]
    fn test_parse_list_registrations_by_student() {
        match parse("LIST REGISTRATIONS STUDENT STU001").unwrap() {
            Command::ListRegistrations(RegistrationFilter::Student(id)) => {
                assert_eq!(id, "STU001")
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_registrations_by_status() {
        assert!(matches!(
            parse("LIST REGISTRATIONS STATUS dropped").unwrap(),
            Command::ListRegistrations(RegistrationFilter::Status(RegistrationStatus::Dropped))
        ));
    }

    #[test]
    fn test_parse_list_registrations_bad_filter() {
        assert!(parse("LIST REGISTRATIONS MAJOR CS").is_err());
    }

    // ---- GET / DELETE ----

    #[test]
    fn test_parse_get_student() {
        match parse("GET STUDENT STU001").unwrap() {
            Command::GetStudent(id) => assert_eq!(id, "STU001"),
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_get_registration_numeric_id() {
        assert!(matches!(
            parse("GET REGISTRATION 42").unwrap(),
            Command::GetRegistration(42)
        ));
        assert!(parse("GET REGISTRATION abc").is_err());
    }

    #[test]
    fn test_parse_delete_course() {
        match parse("DELETE COURSE CS101").unwrap() {
            Command::DeleteCourse(id) => assert_eq!(id, "CS101"),
            other => panic!("wrong command: {other:?}"),
        }
    }

    // ---- UPDATE ----

    #[test]
    fn test_parse_update_student_fields() {
        match parse("UPDATE STUDENT STU001 SET major=Math year_level=3").unwrap() {
            Command::UpdateStudent { student_id, patch } => {
                assert_eq!(student_id, "STU001");
                assert_eq!(patch.major.as_deref(), Some("Math"));
                assert_eq!(patch.year_level, Some(3));
                assert!(patch.first_name.is_none());
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update_student_status() {
        match parse("UPDATE STUDENT STU001 SET status=inactive").unwrap() {
            Command::UpdateStudent { patch, .. } => {
                assert_eq!(patch.status, Some(ActivityStatus::Inactive))
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update_course_quoted_value() {
        match parse(r#"UPDATE COURSE CS101 SET course_name="Data Structures" credit=4"#).unwrap() {
            Command::UpdateCourse { course_id, patch } => {
                assert_eq!(course_id, "CS101");
                assert_eq!(patch.course_name.as_deref(), Some("Data Structures"));
                assert_eq!(patch.credit, Some(4));
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update_unknown_field() {
        assert!(parse("UPDATE STUDENT STU001 SET gpa=4.0").is_err());
    }

    #[test]
    fn test_parse_update_registration_status_only() {
        assert!(matches!(
            parse("UPDATE REGISTRATION 7 SET status=dropped").unwrap(),
            Command::UpdateRegistration {
                register_id: 7,
                status: RegistrationStatus::Dropped,
            }
        ));
        assert!(parse("UPDATE REGISTRATION 7 SET course_id=CS102").is_err());
    }

    #[test]
    fn test_parse_update_missing_set() {
        assert!(parse("UPDATE STUDENT STU001 major=Math").is_err());
    }

    // ---- REGISTER / REPORT ----

    #[test]
    fn test_parse_register_default_status() {
        match parse("REGISTER STU001 CS101").unwrap() {
            Command::Register {
                student_id,
                course_id,
                status,
            } => {
                assert_eq!(student_id, "STU001");
                assert_eq!(course_id, "CS101");
                assert_eq!(status, RegistrationStatus::Registered);
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_dropped() {
        assert!(matches!(
            parse("REGISTER STU001 CS101 DROPPED").unwrap(),
            Command::Register {
                status: RegistrationStatus::Dropped,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_report_variants() {
        assert!(matches!(
            parse("REPORT STUDENTS").unwrap(),
            Command::Report {
                kind: ReportKind::Students,
                save: false,
            }
        ));
        assert!(matches!(
            parse("REPORT REGISTRATIONS SAVE").unwrap(),
            Command::Report {
                kind: ReportKind::Registrations,
                save: true,
            }
        ));
        assert!(parse("REPORT GRADES").is_err());
    }

    // ---- HELP / EXIT ----

    #[test]
    fn test_parse_help() {
        assert!(matches!(parse("HELP").unwrap(), Command::Help(None)));
        match parse("help register").unwrap() {
            Command::Help(Some(topic)) => assert_eq!(topic, "REGISTER"),
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_exit_aliases() {
        assert!(matches!(parse("EXIT").unwrap(), Command::Exit));
        assert!(matches!(parse("quit").unwrap(), Command::Exit));
    }

    #[test]
    fn test_parse_empty_and_unknown() {
        assert!(parse("   ").is_err());
        assert!(parse("FROBNICATE").is_err());
    }
}
