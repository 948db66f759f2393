//! Analytics report handlers

use super::Session;
use campus_registrar::core::analytics::{average_grades, fill_rates, top_students_by_gpa};
use campus_registrar::core::RegistrarError;
use std::io::Write;

/// Print the `n` highest-GPA students, best first
pub fn top_students(session: &Session, out: &mut impl Write, n: i64) -> Result<(), RegistrarError> {
    for student in top_students_by_gpa(&session.store, n) {
        writeln!(out, "{}: {} GPA {:?}", student.id, student.name, student.gpa)?;
    }
    Ok(())
}

/// Print the fill rate of every course; fails as a whole on a zero-capacity course
pub fn course_fill_rates(session: &Session, out: &mut impl Write) -> Result<(), RegistrarError> {
    for rate in fill_rates(&session.store)? {
        writeln!(out, "{rate}")?;
    }
    Ok(())
}

/// Print the average recorded grade of every graded course
pub fn course_average_grades(session: &Session, out: &mut impl Write) -> Result<(), RegistrarError> {
    let averages = average_grades(&session.store);
    if averages.is_empty() {
        writeln!(out, "No grades recorded yet.")?;
    }
    for average in averages {
        writeln!(out, "{average}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_registrar::core::audit::AuditLog;
    use campus_registrar::core::commands;
    use campus_registrar::core::models::{Course, Student};
    use campus_registrar::core::persistence::DataFiles;
    use campus_registrar::core::RecordStore;
    use tempfile::TempDir;

    fn session(temp_dir: &TempDir, store: RecordStore) -> Session {
        Session {
            store,
            files: DataFiles::new(temp_dir.path(), temp_dir.path().join("backups")),
            audit: AuditLog::new(temp_dir.path().join("app.log")),
        }
    }

    fn students() -> Vec<Student> {
        vec![
            Student::new(1, "Ada".to_string(), 1, 3.2),
            Student::new(2, "Bea".to_string(), 2, 3.9),
            Student::new(3, "Cy".to_string(), 3, 3.5),
        ]
    }

    #[test]
    fn test_top_students_output() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let session = session(
            &temp_dir,
            RecordStore::from_parts(students(), Vec::<Course>::new(), Vec::new()),
        );
        let mut out = Vec::new();

        top_students(&session, &mut out, 2).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "2: Bea GPA 3.9\n3: Cy GPA 3.5\n");
    }

    #[test]
    fn test_nearly_full_course_is_flagged() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut session = session(
            &temp_dir,
            RecordStore::from_parts(
                students(),
                vec![Course::new("SEM1".to_string(), "Seminar".to_string(), 1, 2)],
                Vec::new(),
            ),
        );
        let mut audit: Vec<String> = Vec::new();
        commands::enroll_student(&mut session.store, &mut audit, 1, "SEM1").unwrap();
        commands::enroll_student(&mut session.store, &mut audit, 2, "SEM1").unwrap();
        let mut out = Vec::new();

        course_fill_rates(&session, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "SEM1: 100.0% full (Nearly full!)\n");
    }

    #[test]
    fn test_zero_capacity_fails_report() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let session = session(
            &temp_dir,
            RecordStore::from_parts(
                students(),
                vec![Course::new("LAB0".to_string(), "Closed Lab".to_string(), 1, 0)],
                Vec::new(),
            ),
        );
        let mut out = Vec::new();

        let err = course_fill_rates(&session, &mut out).unwrap_err();
        assert!(matches!(err, RegistrarError::DivisionByZero { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_average_grades_without_grades() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let session = session(&temp_dir, RecordStore::new());
        let mut out = Vec::new();

        course_average_grades(&session, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "No grades recorded yet.\n");
    }
}
