//! Handlers for listing, adding, enrolling, grading, transcripts, search and save

use super::{Session, SAVE_AUDIT_ACTION};
use campus_registrar::core::commands;
use campus_registrar::core::search::search;
use campus_registrar::core::transcript::transcript;
use campus_registrar::core::RegistrarError;
use campus_registrar::verbose;
use std::io::Write;

/// Print every student, then every course
pub fn list(session: &Session, out: &mut impl Write) -> Result<(), RegistrarError> {
    writeln!(out, "Students:")?;
    for student in session.store.students() {
        writeln!(out, "{student}")?;
    }
    writeln!(out, "\nCourses:")?;
    for course in session.store.courses() {
        writeln!(out, "{course}")?;
    }
    Ok(())
}

/// Add a student and report success
pub fn add_student(
    session: &mut Session,
    out: &mut impl Write,
    id: u32,
    name: &str,
    year: u32,
    gpa: f64,
) -> Result<(), RegistrarError> {
    commands::add_student(&mut session.store, &mut session.audit, id, name, year, gpa)?;
    writeln!(out, "✓ Student added.")?;
    Ok(())
}

/// Add a course and report success
pub fn add_course(
    session: &mut Session,
    out: &mut impl Write,
    code: &str,
    title: &str,
    credits: u32,
    capacity: u32,
    prereqs: &[String],
) -> Result<(), RegistrarError> {
    commands::add_course(
        &mut session.store,
        &mut session.audit,
        code,
        title,
        credits,
        capacity,
        prereqs,
    )?;
    writeln!(out, "✓ Course added.")?;
    Ok(())
}

/// Enroll a student in a course
pub fn enroll(
    session: &mut Session,
    out: &mut impl Write,
    id: u32,
    code: &str,
) -> Result<(), RegistrarError> {
    commands::enroll_student(&mut session.store, &mut session.audit, id, code)?;
    writeln!(out, "✓ Enrolled student {id} in {code}.")?;
    verbose!(
        "{code} now has {} enrollment(s)",
        session.store.enrolled_count(code)
    );
    Ok(())
}

/// Record or replace the grade of an existing enrollment
pub fn grade(
    session: &mut Session,
    out: &mut impl Write,
    id: u32,
    code: &str,
    grade: f64,
) -> Result<(), RegistrarError> {
    commands::record_grade(&mut session.store, &mut session.audit, id, code, grade)?;
    writeln!(out, "✓ Grade recorded.")?;
    Ok(())
}

/// Print a transcript followed by its computed average
pub fn show_transcript(
    session: &Session,
    out: &mut impl Write,
    id: u32,
) -> Result<(), RegistrarError> {
    let report = transcript(&session.store, id)?;
    write!(out, "{report}")?;
    Ok(())
}

/// Print students whose name and courses whose code contain `query`
pub fn find(session: &Session, out: &mut impl Write, query: &str) -> Result<(), RegistrarError> {
    let results = search(&session.store, query);
    if results.is_empty() {
        writeln!(out, "No matches for '{query}'.")?;
        return Ok(());
    }
    for student in &results.students {
        writeln!(out, "Found student: {} - {}", student.id, student.name)?;
    }
    for course in &results.courses {
        writeln!(out, "Found course: {} - {}", course.code, course.title)?;
    }
    Ok(())
}

/// Write all data files with backups and audit the save
pub fn save(session: &mut Session, out: &mut impl Write) -> Result<(), RegistrarError> {
    session.save()?;
    writeln!(out, "✓ {SAVE_AUDIT_ACTION}")?;
    verbose!("Backups written to {}", session.files.backup_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_registrar::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn session(temp_dir: &TempDir) -> Session {
        let mut config = Config::default();
        config.paths.data_dir = temp_dir.path().join("data").to_string_lossy().to_string();
        config.paths.backup_dir = temp_dir.path().join("backups").to_string_lossy().to_string();
        config.paths.audit_log = temp_dir.path().join("app.log").to_string_lossy().to_string();
        Session::open(&config).expect("Failed to open session")
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_prints_seeded_records() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let session = session(&temp_dir);
        let mut out = Vec::new();

        list(&session, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("1003: Grace Hopper (Year 3, GPA 4.0)"));
        assert!(text.contains("CS401: Operating Systems (4 credits, capacity 2)"));
    }

    #[test]
    fn test_enroll_grade_and_transcript() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut session = session(&temp_dir);
        let mut out = Vec::new();

        enroll(&mut session, &mut out, 1003, "CS101").unwrap();
        grade(&mut session, &mut out, 1003, "CS101", 95.0).unwrap();
        show_transcript(&session, &mut out, 1003).unwrap();

        let text = output(out);
        assert!(text.contains("✓ Enrolled student 1003 in CS101."));
        assert!(text.contains("Transcript for Grace Hopper:"));
        assert!(text.contains(" - CS101: grade 95.0"));
        assert!(text.contains("Calculated GPA: 95.00"));

        let audit = fs::read_to_string(temp_dir.path().join("app.log")).unwrap();
        assert_eq!(audit.lines().count(), 2);
    }

    #[test]
    fn test_find_reports_no_matches() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let session = session(&temp_dir);
        let mut out = Vec::new();

        find(&session, &mut out, "zzz").unwrap();
        find(&session, &mut out, "cs2").unwrap();

        let text = output(out);
        assert!(text.contains("No matches for 'zzz'."));
        assert!(text.contains("Found course: CS201 - Data Structures"));
    }

    #[test]
    fn test_save_writes_backups_and_audit() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut session = session(&temp_dir);
        let mut out = Vec::new();

        save(&mut session, &mut out).unwrap();

        assert_eq!(fs::read_dir(temp_dir.path().join("backups")).unwrap().count(), 3);
        let audit = fs::read_to_string(temp_dir.path().join("app.log")).unwrap();
        assert!(audit.trim_end().ends_with(SAVE_AUDIT_ACTION));
    }
}
