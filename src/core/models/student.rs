//! Student model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents an enrolled student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Student id, unique across the store
    pub id: u32,

    /// Full name (e.g., "Grace Hopper")
    pub name: String,

    /// Year of study, nominally 1-4 (not range checked)
    pub year: u32,

    /// Recorded GPA, nominally 0.0-4.0 (not range checked)
    pub gpa: f64,
}

impl Student {
    /// Create a new student
    #[must_use]
    pub const fn new(id: u32, name: String, year: u32, gpa: f64) -> Self {
        Self {
            id,
            name,
            year,
            gpa,
        }
    }

    /// Case-insensitive substring match against the student's name
    #[must_use]
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (Year {}, GPA {:?})",
            self.id, self.name, self.year, self.gpa
        )
    }
}
