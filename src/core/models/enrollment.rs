//! Enrollment model

use serde::{Deserialize, Serialize};

/// Links one student to one course, optionally carrying a grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrolled student's id
    pub student_id: u32,

    /// Course code the student is enrolled in
    pub course_code: String,

    /// Raw 0-100 grade, absent until recorded
    pub grade: Option<f64>,
}

impl Enrollment {
    /// Create an ungraded enrollment
    #[must_use]
    pub const fn new(student_id: u32, course_code: String) -> Self {
        Self {
            student_id,
            course_code,
            grade: None,
        }
    }

    /// Whether this enrollment is for the given `(student, course)` pair
    #[must_use]
    pub fn is_for(&self, student_id: u32, course_code: &str) -> bool {
        self.student_id == student_id && self.course_code == course_code
    }
}
