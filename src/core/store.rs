//! In-memory record store
//!
//! Holds the three collections the registrar works with. Students and courses are
//! kept in ordered maps so listings and searches are deterministic; enrollments
//! keep their insertion order, which transcripts and grade lookups rely on.

use super::models::{Course, Enrollment, Student};
use std::collections::BTreeMap;

/// Owns every student, course and enrollment for the running process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    /// Students indexed by id
    students: BTreeMap<u32, Student>,

    /// Courses indexed by course code
    courses: BTreeMap<String, Course>,

    /// Enrollments in insertion order
    enrollments: Vec<Enrollment>,
}

impl RecordStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-loaded collections
    ///
    /// Later duplicates of a student id or course code replace earlier ones, the
    /// same way a keyed load would.
    #[must_use]
    pub fn from_parts(
        students: impl IntoIterator<Item = Student>,
        courses: impl IntoIterator<Item = Course>,
        enrollments: Vec<Enrollment>,
    ) -> Self {
        Self {
            students: students.into_iter().map(|s| (s.id, s)).collect(),
            courses: courses.into_iter().map(|c| (c.code.clone(), c)).collect(),
            enrollments,
        }
    }

    /// Look up a student by id
    #[must_use]
    pub fn student(&self, id: u32) -> Option<&Student> {
        self.students.get(&id)
    }

    /// Look up a course by code
    #[must_use]
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// All students, ascending by id
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// All courses, ascending by code
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// All enrollments in insertion order
    #[must_use]
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// Number of students
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Enrollments for one course, in insertion order
    pub fn enrollments_for_course<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a Enrollment> + 'a {
        self.enrollments
            .iter()
            .filter(move |e| e.course_code == code)
    }

    /// Enrollments for one student, in insertion order
    pub fn enrollments_for_student(&self, id: u32) -> impl Iterator<Item = &Enrollment> + '_ {
        self.enrollments.iter().filter(move |e| e.student_id == id)
    }

    /// Current number of enrollments in a course
    #[must_use]
    pub fn enrolled_count(&self, code: &str) -> usize {
        self.enrollments_for_course(code).count()
    }

    /// First enrollment matching the pair, in insertion order
    #[must_use]
    pub fn find_enrollment(&self, id: u32, code: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.is_for(id, code))
    }

    pub(crate) fn find_enrollment_mut(&mut self, id: u32, code: &str) -> Option<&mut Enrollment> {
        self.enrollments.iter_mut().find(|e| e.is_for(id, code))
    }

    pub(crate) fn insert_student(&mut self, student: Student) {
        self.students.insert(student.id, student);
    }

    pub(crate) fn insert_course(&mut self, course: Course) {
        self.courses.insert(course.code.clone(), course);
    }

    pub(crate) fn push_enrollment(&mut self, enrollment: Enrollment) {
        self.enrollments.push(enrollment);
    }
}
