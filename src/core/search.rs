//! Case-insensitive search over student names and course codes

use super::models::{Course, Student};
use super::store::RecordStore;

/// Matches from a search, students first then courses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults<'a> {
    /// Students whose name contains the query
    pub students: Vec<&'a Student>,
    /// Courses whose code contains the query
    pub courses: Vec<&'a Course>,
}

impl SearchResults<'_> {
    /// Whether nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.courses.is_empty()
    }
}

/// Search student names and course codes for `query`
///
/// An empty query matches everything. Course titles are not searched.
#[must_use]
pub fn search<'a>(store: &'a RecordStore, query: &str) -> SearchResults<'a> {
    SearchResults {
        students: store.students().filter(|s| s.name_matches(query)).collect(),
        courses: store.courses().filter(|c| c.code_matches(query)).collect(),
    }
}
