//! Persistence adapter: loading, seeding, saving and backing up the data files
//!
//! Three canonical files live in the data directory:
//! - `students.csv` (`student_id,full_name,year,gpa`)
//! - `courses.json` (object keyed by course code)
//! - `enrollments.csv` (`student_id,course_code,grade`, empty grade = none)
//!
//! Rows that cannot be coerced are never fatal. They are collected in a
//! [`LoadReport`] and logged as warnings, and the rest of the file still loads.

pub mod backup;
pub mod courses;
pub mod csv;
pub mod enrollments;
pub mod students;

use super::error::RegistrarError;
use super::store::RecordStore;
use crate::{info, warn};
use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub use courses::{load_courses, save_courses};
pub use enrollments::{load_enrollments, save_enrollments};
pub use students::{load_students, save_students};

/// Canonical students file name
pub const STUDENTS_FILE: &str = "students.csv";
/// Canonical courses file name
pub const COURSES_FILE: &str = "courses.json";
/// Canonical enrollments file name
pub const ENROLLMENTS_FILE: &str = "enrollments.csv";

/// A persisted row that was dropped during load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number for CSV files, `None` for JSON entries
    pub line: Option<usize>,
    /// Offending row (CSV) or entry key (JSON)
    pub content: String,
    /// Why the row was rejected
    pub reason: String,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line} '{}': {}", self.content, self.reason),
            None => write!(f, "entry '{}': {}", self.content, self.reason),
        }
    }
}

/// Outcome of loading one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// File that was read
    pub path: PathBuf,
    /// Whether default data was written because the file was absent or empty
    pub seeded: bool,
    /// Number of records loaded
    pub loaded: usize,
    /// Rows dropped, in file order
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            seeded: false,
            loaded: 0,
            skipped: Vec::new(),
        }
    }

    pub(crate) fn skip(&mut self, line: Option<usize>, content: String, reason: String) {
        self.skipped.push(SkippedRow {
            line,
            content,
            reason,
        });
    }

    /// Whether every row loaded
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Log one warning per skipped row
    pub fn log_skipped(&self) {
        for row in &self.skipped {
            warn!("Skipped row in {}: {row}", self.path.display());
        }
    }
}

/// Records loaded from one file plus the report describing the load
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    /// Successfully parsed records
    pub records: Vec<T>,
    /// Diagnostics for the load
    pub report: LoadReport,
}

/// A fully loaded store and the per-file reports
#[derive(Debug, Clone)]
pub struct StoreLoad {
    /// The populated store
    pub store: RecordStore,
    /// Reports for students, courses and enrollments, in that order
    pub reports: Vec<LoadReport>,
}

impl StoreLoad {
    /// Total number of skipped rows across all files
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.reports.iter().map(|r| r.skipped.len()).sum()
    }
}

/// Locations of the canonical files and their backups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    /// Students CSV
    pub students: PathBuf,
    /// Courses JSON
    pub courses: PathBuf,
    /// Enrollments CSV
    pub enrollments: PathBuf,
    /// Directory receiving timestamped backup copies
    pub backup_dir: PathBuf,
}

impl DataFiles {
    /// Canonical file names inside `data_dir`, backups in `backup_dir`
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>, backup_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            students: data_dir.join(STUDENTS_FILE),
            courses: data_dir.join(COURSES_FILE),
            enrollments: data_dir.join(ENROLLMENTS_FILE),
            backup_dir: backup_dir.as_ref().to_path_buf(),
        }
    }

    /// Load all three collections, seeding defaults where files are missing
    ///
    /// # Errors
    /// Returns an error only for I/O failures; malformed rows end up in the reports.
    pub fn load(&self) -> Result<StoreLoad, RegistrarError> {
        let students = load_students(&self.students)?;
        let courses = load_courses(&self.courses)?;
        let enrollments = load_enrollments(&self.enrollments)?;

        let reports = vec![students.report, courses.report, enrollments.report];
        for report in &reports {
            report.log_skipped();
            info!(
                "Loaded {} record(s) from {}{}",
                report.loaded,
                report.path.display(),
                if report.seeded { " (seeded defaults)" } else { "" }
            );
        }

        Ok(StoreLoad {
            store: RecordStore::from_parts(students.records, courses.records, enrollments.records),
            reports,
        })
    }

    /// Save all three collections, each followed by a backup stamped with the current minute
    ///
    /// # Errors
    /// Returns an error if any file or backup cannot be written.
    pub fn save(&self, store: &RecordStore) -> Result<Vec<PathBuf>, RegistrarError> {
        self.save_at(store, Local::now().naive_local())
    }

    /// [`save`](Self::save) with an explicit backup timestamp
    ///
    /// # Errors
    /// Returns an error if any file or backup cannot be written.
    pub fn save_at(
        &self,
        store: &RecordStore,
        at: NaiveDateTime,
    ) -> Result<Vec<PathBuf>, RegistrarError> {
        let backups = vec![
            save_students(store, &self.students, &self.backup_dir, at)?,
            save_courses(store, &self.courses, &self.backup_dir, at)?,
            save_enrollments(store, &self.enrollments, &self.backup_dir, at)?,
        ];
        info!(
            "Saved {} student(s), {} course(s), {} enrollment(s)",
            store.student_count(),
            store.course_count(),
            store.enrollments().len()
        );
        Ok(backups)
    }
}

/// Whether a canonical file should be (re)seeded with defaults
pub(crate) fn needs_seed(path: &Path) -> bool {
    fs::metadata(path).map_or(true, |meta| meta.len() == 0)
}

/// Write `content` to `path`, creating the parent directory if necessary
pub(crate) fn write_file(path: &Path, content: &str) -> Result<(), RegistrarError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 31)
            .and_then(|d| d.and_hms_opt(9, 41, 0))
            .unwrap()
    }

    #[test]
    fn test_first_load_seeds_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let files = DataFiles::new(temp_dir.path().join("data"), temp_dir.path().join("backups"));

        let loaded = files.load().unwrap();

        assert_eq!(loaded.store.student_count(), 3);
        assert_eq!(loaded.store.course_count(), 5);
        assert!(loaded.store.enrollments().is_empty());
        assert!(loaded.reports[0].seeded);
        assert!(loaded.reports[1].seeded);
        assert!(!loaded.reports[2].seeded);
        assert_eq!(loaded.skipped_count(), 0);
        assert!(files.students.exists());
        assert!(files.courses.exists());
        assert!(!files.enrollments.exists());
    }

    #[test]
    fn test_save_then_reload_round_trips() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let files = DataFiles::new(temp_dir.path(), temp_dir.path().join("backups"));
        let mut store = files.load().unwrap().store;
        let mut audit: Vec<String> = Vec::new();

        commands::add_student(&mut store, &mut audit, 2001, "Hopper, Grace \"Amazing\"", 1, 3.25)
            .unwrap();
        commands::add_course(
            &mut store,
            &mut audit,
            "CS102",
            "Intro, Part 2",
            3,
            10,
            &["CS101".to_string()],
        )
        .unwrap();
        commands::enroll_student(&mut store, &mut audit, 2001, "CS102").unwrap();
        commands::enroll_student(&mut store, &mut audit, 1003, "CS102").unwrap();
        commands::record_grade(&mut store, &mut audit, 2001, "CS102", 91.5).unwrap();

        files.save_at(&store, stamp()).unwrap();
        let reloaded = files.load().unwrap();

        assert_eq!(reloaded.store, store);
        assert_eq!(reloaded.skipped_count(), 0);
    }

    #[test]
    fn test_edge_whitespace_round_trips() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let files = DataFiles::new(temp_dir.path(), temp_dir.path().join("backups"));
        let mut store = files.load().unwrap().store;
        let mut audit: Vec<String> = Vec::new();

        commands::add_student(&mut store, &mut audit, 7, " Ada Lovelace ", 1, 3.9).unwrap();
        commands::add_course(&mut store, &mut audit, "LAB1 ", " Lab ", 1, 1, &[]).unwrap();
        commands::enroll_student(&mut store, &mut audit, 7, "LAB1 ").unwrap();
        commands::enroll_student(&mut store, &mut audit, 1003, "CS101").unwrap();
        commands::record_grade(&mut store, &mut audit, 7, "LAB1 ", 80.0).unwrap();

        files.save_at(&store, stamp()).unwrap();
        let mut reloaded = files.load().unwrap().store;

        assert_eq!(reloaded, store);
        assert_eq!(reloaded.student(7).unwrap().name, " Ada Lovelace ");
        assert_eq!(reloaded.enrolled_count("LAB1 "), 1);
        let full = commands::enroll_student(&mut reloaded, &mut audit, 1003, "LAB1 ").unwrap_err();
        assert!(matches!(full, RegistrarError::CourseFull { capacity: 1, .. }));
    }

    #[test]
    fn test_save_creates_minute_stamped_backups() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let backup_dir = temp_dir.path().join("backups");
        let files = DataFiles::new(temp_dir.path(), &backup_dir);
        let store = files.load().unwrap().store;

        let backups = files.save_at(&store, stamp()).unwrap();

        assert_eq!(
            backups,
            vec![
                backup_dir.join("students_202501310941.csv"),
                backup_dir.join("courses_202501310941.json"),
                backup_dir.join("enrollments_202501310941.csv"),
            ]
        );
        for (backup, canonical) in backups.iter().zip([&files.students, &files.courses, &files.enrollments]) {
            assert_eq!(
                fs::read_to_string(backup).unwrap(),
                fs::read_to_string(canonical).unwrap()
            );
        }
    }

    #[test]
    fn test_saving_twice_in_same_minute_overwrites_backup() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let files = DataFiles::new(temp_dir.path(), temp_dir.path().join("backups"));
        let mut store = files.load().unwrap().store;
        let mut audit: Vec<String> = Vec::new();

        files.save_at(&store, stamp()).unwrap();
        commands::add_student(&mut store, &mut audit, 7, "Ada Lovelace", 1, 3.9).unwrap();
        let backups = files.save_at(&store, stamp()).unwrap();

        let entries = fs::read_dir(&files.backup_dir).unwrap().count();
        assert_eq!(entries, 3);
        assert!(fs::read_to_string(&backups[0]).unwrap().contains("Ada Lovelace"));
    }
}
