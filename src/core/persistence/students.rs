//! Students CSV: `student_id,full_name,year,gpa`

use super::csv::{format_float, format_record, parse_records, CsvRecord, Header};
use super::{backup, needs_seed, write_file, LoadReport, Loaded};
use crate::core::error::RegistrarError;
use crate::core::models::Student;
use crate::core::store::RecordStore;
use crate::info;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

/// Column headers, in file order
pub const STUDENT_COLUMNS: [&str; 4] = ["student_id", "full_name", "year", "gpa"];

/// Students written to a fresh students file
#[must_use]
pub fn default_students() -> Vec<Student> {
    vec![
        Student::new(1003, "Grace Hopper".to_string(), 3, 4.0),
        Student::new(1004, "John von Neumann".to_string(), 2, 3.8),
        Student::new(1005, "Marie Curie".to_string(), 4, 3.6),
    ]
}

/// Encode students as CSV, header first
#[must_use]
pub fn encode_students<'a>(students: impl IntoIterator<Item = &'a Student>) -> String {
    let mut out = format_record(&STUDENT_COLUMNS);
    out.push('\n');
    for student in students {
        let id = student.id.to_string();
        let year = student.year.to_string();
        let gpa = format_float(student.gpa);
        out.push_str(&format_record(&[
            id.as_str(),
            student.name.as_str(),
            year.as_str(),
            gpa.as_str(),
        ]));
        out.push('\n');
    }
    out
}

fn parse_student(header: &Header, record: &CsvRecord) -> Result<Student, String> {
    let id = header.require(record, "student_id")?;
    let name = header.require(record, "full_name")?;
    let year = header.require(record, "year")?;
    let gpa = header.require(record, "gpa")?;

    Ok(Student::new(
        id.trim()
            .parse()
            .map_err(|_| format!("invalid student_id '{id}'"))?,
        name.to_string(),
        year.trim()
            .parse()
            .map_err(|_| format!("invalid year '{year}'"))?,
        gpa.trim()
            .parse()
            .map_err(|_| format!("invalid gpa '{gpa}'"))?,
    ))
}

/// Load the students file, seeding the defaults if it is absent or empty
///
/// # Errors
/// Returns an error if the file cannot be read or the seed cannot be written.
pub fn load_students(path: &Path) -> Result<Loaded<Student>, RegistrarError> {
    let mut report = LoadReport::new(path);
    if needs_seed(path) {
        write_file(path, &encode_students(&default_students()))?;
        info!("Seeded default students into {}", path.display());
        report.seeded = true;
    }

    let content = fs::read_to_string(path)?;
    let mut records = parse_records(&content).into_iter();
    let mut students = Vec::new();

    if let Some(header_record) = records.next() {
        let header = Header::new(&header_record);
        for record in records.filter(|r| !r.is_blank()) {
            match parse_student(&header, &record) {
                Ok(student) => students.push(student),
                Err(reason) => report.skip(Some(record.line), record.to_line(), reason),
            }
        }
    }

    report.loaded = students.len();
    Ok(Loaded {
        records: students,
        report,
    })
}

/// Overwrite the students file from the store, then back it up
///
/// # Errors
/// Returns an error if the file or its backup cannot be written.
pub fn save_students(
    store: &RecordStore,
    path: &Path,
    backup_dir: &Path,
    at: NaiveDateTime,
) -> Result<PathBuf, RegistrarError> {
    write_file(path, &encode_students(store.students()))?;
    backup::create_backup(path, backup_dir, at)
}
