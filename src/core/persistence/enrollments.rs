//! Enrollments CSV: `student_id,course_code,grade`

use super::csv::{format_float, format_record, parse_records, CsvRecord, Header};
use super::{backup, write_file, LoadReport, Loaded};
use crate::core::error::RegistrarError;
use crate::core::models::Enrollment;
use crate::core::store::RecordStore;
use crate::debug;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

/// Column headers, in file order
pub const ENROLLMENT_COLUMNS: [&str; 3] = ["student_id", "course_code", "grade"];

/// Encode enrollments as CSV, header first. Absent grades become empty cells.
#[must_use]
pub fn encode_enrollments(enrollments: &[Enrollment]) -> String {
    let mut out = format_record(&ENROLLMENT_COLUMNS);
    out.push('\n');
    for enrollment in enrollments {
        let id = enrollment.student_id.to_string();
        let grade = enrollment.grade.map(format_float).unwrap_or_default();
        out.push_str(&format_record(&[
            id.as_str(),
            enrollment.course_code.as_str(),
            grade.as_str(),
        ]));
        out.push('\n');
    }
    out
}

fn parse_enrollment(header: &Header, record: &CsvRecord) -> Result<Enrollment, String> {
    let id = header.require(record, "student_id")?;
    let code = header.require(record, "course_code")?;
    let grade = header.require(record, "grade")?;

    let mut enrollment = Enrollment::new(
        id.trim()
            .parse()
            .map_err(|_| format!("invalid student_id '{id}'"))?,
        code.to_string(),
    );
    let grade = grade.trim();
    if !grade.is_empty() {
        enrollment.grade = Some(
            grade
                .parse()
                .map_err(|_| format!("invalid grade '{grade}'"))?,
        );
    }
    Ok(enrollment)
}

/// Load the enrollments file; an absent file yields no enrollments
///
/// Unlike students and courses, nothing is seeded.
///
/// # Errors
/// Returns an error if an existing file cannot be read.
pub fn load_enrollments(path: &Path) -> Result<Loaded<Enrollment>, RegistrarError> {
    let mut report = LoadReport::new(path);
    if !path.exists() {
        debug!("No enrollments file at {}", path.display());
        return Ok(Loaded {
            records: Vec::new(),
            report,
        });
    }

    let content = fs::read_to_string(path)?;
    let mut records = parse_records(&content).into_iter();
    let mut enrollments = Vec::new();

    if let Some(header_record) = records.next() {
        let header = Header::new(&header_record);
        for record in records.filter(|r| !r.is_blank()) {
            match parse_enrollment(&header, &record) {
                Ok(enrollment) => enrollments.push(enrollment),
                Err(reason) => report.skip(Some(record.line), record.to_line(), reason),
            }
        }
    }

    report.loaded = enrollments.len();
    Ok(Loaded {
        records: enrollments,
        report,
    })
}

/// Overwrite the enrollments file from the store, then back it up
///
/// # Errors
/// Returns an error if the file or its backup cannot be written.
pub fn save_enrollments(
    store: &RecordStore,
    path: &Path,
    backup_dir: &Path,
    at: NaiveDateTime,
) -> Result<PathBuf, RegistrarError> {
    write_file(path, &encode_enrollments(store.enrollments()))?;
    backup::create_backup(path, backup_dir, at)
}
