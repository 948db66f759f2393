//! Analytics over the record store
//!
//! Three independent reports:
//! - top-N students by stored GPA
//! - per-course fill rate
//! - per-course average grade

use super::error::RegistrarError;
use super::models::Student;
use super::store::RecordStore;
use super::transcript::mean;
use std::fmt;
use std::str::FromStr;

/// Fill rate above which a course is flagged as nearly full
pub const NEARLY_FULL_PERCENT: f64 = 90.0;

/// Available analytics reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsReport {
    /// Top N students by GPA
    TopStudents,
    /// Course fill rates
    FillRates,
    /// Average grade per course
    AverageGrades,
}

impl FromStr for AnalyticsReport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "top" | "top-students" => Ok(Self::TopStudents),
            "2" | "fill" | "fill-rates" => Ok(Self::FillRates),
            "3" | "average" | "average-grades" => Ok(Self::AverageGrades),
            _ => Err(format!("Unknown analytics report: {s}")),
        }
    }
}

impl fmt::Display for AnalyticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopStudents => write!(f, "Top N students by GPA"),
            Self::FillRates => write!(f, "Course fill rates"),
            Self::AverageGrades => write!(f, "Average grade per course"),
        }
    }
}

/// Enrollment load of one course
#[derive(Debug, Clone, PartialEq)]
pub struct FillRate {
    /// Course code
    pub course_code: String,
    /// Current enrollments
    pub enrolled: usize,
    /// Course capacity
    pub capacity: u32,
    /// `enrolled / capacity * 100`
    pub percent: f64,
}

impl FillRate {
    /// Whether the course is above [`NEARLY_FULL_PERCENT`]
    #[must_use]
    pub fn nearly_full(&self) -> bool {
        self.percent > NEARLY_FULL_PERCENT
    }
}

impl fmt::Display for FillRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.1}% full", self.course_code, self.percent)?;
        if self.nearly_full() {
            write!(f, " (Nearly full!)")?;
        }
        Ok(())
    }
}

/// Mean of recorded grades for one course
#[derive(Debug, Clone, PartialEq)]
pub struct AverageGrade {
    /// Course code
    pub course_code: String,
    /// Number of graded enrollments
    pub graded: usize,
    /// Mean grade
    pub average: f64,
}

impl fmt::Display for AverageGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: average grade {:.2}", self.course_code, self.average)
    }
}

/// The `n` students with the highest GPA, best first
///
/// The sort is stable, so ties keep id order. `n <= 0` yields nothing and `n`
/// larger than the population yields everyone.
#[must_use]
pub fn top_students_by_gpa(store: &RecordStore, n: i64) -> Vec<&Student> {
    if n <= 0 {
        return Vec::new();
    }
    let take = usize::try_from(n).unwrap_or(usize::MAX);

    let mut ranked: Vec<&Student> = store.students().collect();
    ranked.sort_by(|a, b| b.gpa.total_cmp(&a.gpa));
    ranked.truncate(take);
    ranked
}

/// Compute the fill rate of a single course
///
/// # Errors
/// Returns [`RegistrarError::NotFound`] for an unknown course and
/// [`RegistrarError::DivisionByZero`] when its capacity is 0.
#[allow(clippy::cast_precision_loss)]
pub fn fill_rate(store: &RecordStore, code: &str) -> Result<FillRate, RegistrarError> {
    let course = store
        .course(code)
        .ok_or_else(|| RegistrarError::NotFound(format!("Course {code}")))?;
    if course.capacity == 0 {
        return Err(RegistrarError::DivisionByZero {
            course_code: course.code.clone(),
        });
    }

    let enrolled = store.enrolled_count(code);
    Ok(FillRate {
        course_code: course.code.clone(),
        enrolled,
        capacity: course.capacity,
        percent: enrolled as f64 / f64::from(course.capacity) * 100.0,
    })
}

/// Fill rates for every course, in course order
///
/// # Errors
/// Returns [`RegistrarError::DivisionByZero`] naming the first course with zero
/// capacity; no partial report is produced.
pub fn fill_rates(store: &RecordStore) -> Result<Vec<FillRate>, RegistrarError> {
    store
        .courses()
        .map(|course| fill_rate(store, &course.code))
        .collect()
}

/// Average recorded grade per course, in course order
///
/// Courses without any graded enrollment are left out.
#[must_use]
pub fn average_grades(store: &RecordStore) -> Vec<AverageGrade> {
    store
        .courses()
        .filter_map(|course| {
            let grades: Vec<f64> = store
                .enrollments_for_course(&course.code)
                .filter_map(|e| e.grade)
                .collect();
            mean(&grades).map(|average| AverageGrade {
                course_code: course.code.clone(),
                graded: grades.len(),
                average,
            })
        })
        .collect()
}
