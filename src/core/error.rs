//! Error type shared by the record store, persistence and command operations

use thiserror::Error;

/// Errors surfaced by registrar operations.
///
/// Every variant except [`Io`](Self::Io) and [`Json`](Self::Json) is recoverable:
/// the operation that produced it left the store untouched.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// A student id or course code is already taken
    #[error("{0} already exists")]
    DuplicateKey(String),

    /// A referenced student, course or enrollment does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The student already holds an enrollment in the course
    #[error("student {student_id} is already enrolled in {course_code}")]
    AlreadyEnrolled {
        /// Student being enrolled
        student_id: u32,
        /// Target course
        course_code: String,
    },

    /// The course has reached its capacity
    #[error("course {course_code} is full (capacity {capacity})")]
    CourseFull {
        /// Full course
        course_code: String,
        /// Capacity at enrollment time
        capacity: u32,
    },

    /// A value could not be coerced to the expected type or range
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A fill rate was requested for a zero-capacity course
    #[error("cannot compute fill rate for {course_code}: capacity is 0")]
    DivisionByZero {
        /// Course with zero capacity
        course_code: String,
    },

    /// Underlying file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Course data could not be encoded as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistrarError {
    /// Returns `true` for failures that leave the store usable (everything but I/O)
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Json(_))
    }
}
