//! Course model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a course offered by the registrar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, the lookup key (e.g., "CS101")
    pub code: String,

    /// Course title (e.g., "Intro to Programming")
    pub title: String,

    /// Credit hours
    pub credits: u32,

    /// Maximum number of enrollments accepted
    pub capacity: u32,

    /// Prerequisite course codes, in the order given. Recorded, never enforced.
    pub prereqs: Vec<String>,
}

impl Course {
    /// Create a new course without prerequisites
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `title` - Course title
    /// * `credits` - Credit hours
    /// * `capacity` - Enrollment capacity
    #[must_use]
    pub const fn new(code: String, title: String, credits: u32, capacity: u32) -> Self {
        Self {
            code,
            title,
            credits,
            capacity,
            prereqs: Vec::new(),
        }
    }

    /// Builder-style helper attaching prerequisites
    #[must_use]
    pub fn with_prereqs<I, S>(mut self, prereqs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prereq in prereqs {
            self.add_prerequisite(prereq.into());
        }
        self
    }

    /// Add a prerequisite by course code
    ///
    /// Surrounding whitespace is trimmed and blank codes are ignored. Codes are
    /// kept in insertion order; repeats are allowed since the list is stored as given.
    pub fn add_prerequisite(&mut self, prereq: String) {
        let trimmed = prereq.trim();
        if !trimmed.is_empty() {
            self.prereqs.push(trimmed.to_string());
        }
    }

    /// Case-insensitive substring match against the course code
    #[must_use]
    pub fn code_matches(&self, query: &str) -> bool {
        self.code.to_lowercase().contains(&query.to_lowercase())
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} credits, capacity {})",
            self.code, self.title, self.credits, self.capacity
        )
    }
}
