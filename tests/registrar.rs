//! End-to-end registrar scenarios over real data files

use campus_registrar::core::analytics::{fill_rates, top_students_by_gpa};
use campus_registrar::core::audit::{AuditLog, AuditSink};
use campus_registrar::core::commands::{add_course, add_student, enroll_student, record_grade};
use campus_registrar::core::persistence::DataFiles;
use campus_registrar::core::transcript::transcript;
use campus_registrar::core::{RecordStore, RegistrarError};
use std::fs;
use tempfile::TempDir;

/// Store, audit log and data files rooted in a fresh temp dir, with nothing seeded
fn empty_registrar(temp_dir: &TempDir) -> (RecordStore, AuditLog, DataFiles) {
    let files = DataFiles::new(temp_dir.path().join("data"), temp_dir.path().join("backups"));
    let audit = AuditLog::new(temp_dir.path().join("app.log"));
    (RecordStore::new(), audit, files)
}

fn audit_lines(temp_dir: &TempDir) -> Vec<String> {
    fs::read_to_string(temp_dir.path().join("app.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn grace_hopper_transcript() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (mut store, mut audit, _) = empty_registrar(&temp_dir);

    add_student(&mut store, &mut audit, 1003, "Grace Hopper", 3, 4.0).unwrap();
    add_course(&mut store, &mut audit, "CS101", "Intro to Programming", 3, 5, &[]).unwrap();
    enroll_student(&mut store, &mut audit, 1003, "CS101").unwrap();
    record_grade(&mut store, &mut audit, 1003, "CS101", 95.0).unwrap();

    let report = transcript(&store, 1003).unwrap();
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].course_code, "CS101");
    assert_eq!(report.entries[0].grade, Some(95.0));
    assert!(report.to_string().contains("Calculated GPA: 95.00"));

    let lines = audit_lines(&temp_dir);
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("] Added student 1003 - Grace Hopper"));
    assert!(lines[3].ends_with("] Recorded grade 95.0 for student 1003 in CS101"));
}

#[test]
fn duplicate_student_leaves_original() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (mut store, mut audit, _) = empty_registrar(&temp_dir);

    add_student(&mut store, &mut audit, 1003, "Grace Hopper", 3, 4.0).unwrap();
    let err = add_student(&mut store, &mut audit, 1003, "Impostor", 1, 0.5).unwrap_err();

    assert!(matches!(err, RegistrarError::DuplicateKey(_)));
    let student = store.student(1003).unwrap();
    assert_eq!(student.name, "Grace Hopper");
    assert_eq!(audit_lines(&temp_dir).len(), 1);
}

#[test]
fn capacity_is_enforced_and_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (mut store, mut audit, _) = empty_registrar(&temp_dir);

    add_course(&mut store, &mut audit, "SEM1", "Seminar", 1, 2, &[]).unwrap();
    for (id, name) in [(1, "Ada"), (2, "Bea"), (3, "Cy")] {
        add_student(&mut store, &mut audit, id, name, 1, 3.0).unwrap();
    }
    enroll_student(&mut store, &mut audit, 1, "SEM1").unwrap();
    enroll_student(&mut store, &mut audit, 2, "SEM1").unwrap();

    let again = enroll_student(&mut store, &mut audit, 1, "SEM1").unwrap_err();
    assert!(matches!(again, RegistrarError::AlreadyEnrolled { .. }));
    let full = enroll_student(&mut store, &mut audit, 3, "SEM1").unwrap_err();
    assert!(matches!(full, RegistrarError::CourseFull { capacity: 2, .. }));
    assert_eq!(store.enrolled_count("SEM1"), 2);

    let rates = fill_rates(&store).unwrap();
    assert_eq!(rates.len(), 1);
    assert!((rates[0].percent - 100.0).abs() < f64::EPSILON);
    assert!(rates[0].nearly_full());
    assert_eq!(rates[0].to_string(), "SEM1: 100.0% full (Nearly full!)");
}

#[test]
fn grading_missing_enrollment_appends_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (mut store, mut audit, _) = empty_registrar(&temp_dir);
    add_student(&mut store, &mut audit, 1003, "Grace Hopper", 3, 4.0).unwrap();
    let before = store.clone();

    let err = record_grade(&mut store, &mut audit, 1003, "CS999", 50.0).unwrap_err();

    assert!(matches!(err, RegistrarError::NotFound(_)));
    assert_eq!(store, before);
    assert_eq!(audit_lines(&temp_dir).len(), 1);
}

#[test]
fn top_two_by_gpa() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (mut store, mut audit, _) = empty_registrar(&temp_dir);
    add_student(&mut store, &mut audit, 5, "Marie Curie", 4, 3.6).unwrap();
    add_student(&mut store, &mut audit, 6, "Grace Hopper", 3, 4.0).unwrap();
    add_student(&mut store, &mut audit, 7, "John von Neumann", 2, 3.8).unwrap();

    let top: Vec<&str> = top_students_by_gpa(&store, 2)
        .into_iter()
        .map(|s| s.name.as_str())
        .collect();

    assert_eq!(top, vec!["Grace Hopper", "John von Neumann"]);
}

#[test]
fn save_and_reload_from_seeded_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (_, mut audit, files) = empty_registrar(&temp_dir);
    let mut store = files.load().unwrap().store;

    enroll_student(&mut store, &mut audit, 1004, "CS401").unwrap();
    enroll_student(&mut store, &mut audit, 1005, "CS401").unwrap();
    record_grade(&mut store, &mut audit, 1005, "CS401", 88.5).unwrap();
    add_course(
        &mut store,
        &mut audit,
        "CS601",
        "Compilers, Advanced",
        4,
        12,
        &[" CS301".to_string(), String::new(), "CS401 ".to_string()],
    )
    .unwrap();
    files.save(&store).unwrap();
    audit.record("Data saved and backed up.").unwrap();

    let reloaded = files.load().unwrap();
    assert_eq!(reloaded.store, store);
    assert_eq!(reloaded.skipped_count(), 0);
    assert_eq!(
        reloaded.store.course("CS601").unwrap().prereqs,
        vec!["CS301", "CS401"]
    );
    assert_eq!(fs::read_dir(&files.backup_dir).unwrap().count(), 3);
    assert!(audit_lines(&temp_dir)
        .last()
        .is_some_and(|line| line.ends_with("] Data saved and backed up.")));
}

#[test]
fn malformed_rows_do_not_block_loading() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (_, _, files) = empty_registrar(&temp_dir);
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    fs::write(
        &files.students,
        "student_id,full_name,year,gpa\n1,Ada,1,3.9\ntwo,Bad,1,3.0\n",
    )
    .unwrap();
    fs::write(
        &files.enrollments,
        "student_id,course_code,grade\n1,CS101,\n1,CS201,great\n",
    )
    .unwrap();

    let loaded = files.load().unwrap();

    assert_eq!(loaded.store.student_count(), 1);
    assert_eq!(loaded.store.course_count(), 5);
    assert_eq!(loaded.store.enrollments().len(), 1);
    assert_eq!(loaded.skipped_count(), 2);
    assert_eq!(loaded.reports[0].skipped[0].line, Some(3));
    assert_eq!(loaded.reports[2].skipped[0].reason, "invalid grade 'great'");
}
