//! Mutating command operations
//!
//! Each operation validates against the store first and only then mutates it and
//! writes the audit entry, so a failed command leaves no trace.

use super::audit::AuditSink;
use super::error::RegistrarError;
use super::models::{Course, Enrollment, Student};
use super::store::RecordStore;
use crate::debug;

/// Add a new student
///
/// # Errors
/// Returns [`RegistrarError::DuplicateKey`] if the id is already taken, or an
/// I/O error if the audit entry cannot be written.
pub fn add_student(
    store: &mut RecordStore,
    audit: &mut impl AuditSink,
    id: u32,
    name: &str,
    year: u32,
    gpa: f64,
) -> Result<(), RegistrarError> {
    if store.student(id).is_some() {
        return Err(RegistrarError::DuplicateKey(format!("Student {id}")));
    }

    store.insert_student(Student::new(id, name.to_string(), year, gpa));
    debug!("Inserted student {id}");
    audit.record(&format!("Added student {id} - {name}"))
}

/// Add a new course
///
/// Prerequisite codes are trimmed and blanks dropped; they are not checked
/// against existing courses.
///
/// # Errors
/// Returns [`RegistrarError::DuplicateKey`] if the code is already taken, or an
/// I/O error if the audit entry cannot be written.
pub fn add_course(
    store: &mut RecordStore,
    audit: &mut impl AuditSink,
    code: &str,
    title: &str,
    credits: u32,
    capacity: u32,
    prereqs: &[String],
) -> Result<(), RegistrarError> {
    if store.course(code).is_some() {
        return Err(RegistrarError::DuplicateKey(format!("Course {code}")));
    }

    let course = Course::new(code.to_string(), title.to_string(), credits, capacity)
        .with_prereqs(prereqs.iter().map(String::as_str));
    store.insert_course(course);
    debug!("Inserted course {code}");
    audit.record(&format!("Added course {code} - {title}"))
}

/// Enroll a student in a course
///
/// Checks run in order: student exists, course exists, not already enrolled,
/// course not full.
///
/// # Errors
/// Returns [`RegistrarError::NotFound`], [`RegistrarError::AlreadyEnrolled`] or
/// [`RegistrarError::CourseFull`] when a check fails, or an I/O error if the audit
/// entry cannot be written.
pub fn enroll_student(
    store: &mut RecordStore,
    audit: &mut impl AuditSink,
    id: u32,
    code: &str,
) -> Result<(), RegistrarError> {
    if store.student(id).is_none() {
        return Err(RegistrarError::NotFound(format!("Student {id}")));
    }
    let capacity = store
        .course(code)
        .map(|course| course.capacity)
        .ok_or_else(|| RegistrarError::NotFound(format!("Course {code}")))?;

    if store.find_enrollment(id, code).is_some() {
        return Err(RegistrarError::AlreadyEnrolled {
            student_id: id,
            course_code: code.to_string(),
        });
    }

    let enrolled = store.enrolled_count(code);
    if enrolled >= capacity as usize {
        return Err(RegistrarError::CourseFull {
            course_code: code.to_string(),
            capacity,
        });
    }

    store.push_enrollment(Enrollment::new(id, code.to_string()));
    debug!("Enrolled {id} in {code} ({}/{capacity})", enrolled + 1);
    audit.record(&format!("Enrolled student {id} in {code}"))
}

/// Record or overwrite the grade of an existing enrollment
///
/// # Errors
/// Returns [`RegistrarError::NotFound`] if the student is not enrolled in the
/// course, or an I/O error if the audit entry cannot be written.
pub fn record_grade(
    store: &mut RecordStore,
    audit: &mut impl AuditSink,
    id: u32,
    code: &str,
    grade: f64,
) -> Result<(), RegistrarError> {
    let enrollment = store
        .find_enrollment_mut(id, code)
        .ok_or_else(|| RegistrarError::NotFound(format!("Enrollment of {id} in {code}")))?;

    enrollment.grade = Some(grade);
    audit.record(&format!(
        "Recorded grade {grade:?} for student {id} in {code}"
    ))
}
