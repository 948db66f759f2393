//! Student transcripts

use super::error::RegistrarError;
use super::store::RecordStore;
use std::fmt;

/// One course line on a transcript
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    /// Course code
    pub course_code: String,
    /// Grade, if recorded
    pub grade: Option<f64>,
}

/// A student's enrollments with the average of their recorded grades
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// Student id
    pub student_id: u32,
    /// Student name
    pub name: String,
    /// Enrollments in insertion order
    pub entries: Vec<TranscriptEntry>,
    /// Mean of the recorded 0-100 grades, or 0 when none are recorded.
    /// This is unrelated to the student's stored GPA.
    pub average: f64,
}

impl Transcript {
    /// Number of entries that carry a grade
    #[must_use]
    pub fn graded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.grade.is_some()).count()
    }
}

/// Build the transcript for a student
///
/// # Errors
/// Returns [`RegistrarError::NotFound`] if the student does not exist.
pub fn transcript(store: &RecordStore, id: u32) -> Result<Transcript, RegistrarError> {
    let student = store
        .student(id)
        .ok_or_else(|| RegistrarError::NotFound(format!("Student {id}")))?;

    let entries: Vec<TranscriptEntry> = store
        .enrollments_for_student(id)
        .map(|e| TranscriptEntry {
            course_code: e.course_code.clone(),
            grade: e.grade,
        })
        .collect();

    let grades: Vec<f64> = entries.iter().filter_map(|e| e.grade).collect();
    let average = mean(&grades).unwrap_or(0.0);

    Ok(Transcript {
        student_id: id,
        name: student.name.clone(),
        entries,
        average,
    })
}

/// Arithmetic mean, `None` for an empty slice
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transcript for {}:", self.name)?;
        for entry in &self.entries {
            match entry.grade {
                Some(grade) => writeln!(f, " - {}: grade {grade:?}", entry.course_code)?,
                None => writeln!(f, " - {}: no grade", entry.course_code)?,
            }
        }
        writeln!(f, "Calculated GPA: {:.2}", self.average)
    }
}
