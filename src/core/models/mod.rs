//! Data models for the registrar

pub mod course;
pub mod enrollment;
pub mod student;

pub use course::Course;
pub use enrollment::Enrollment;
pub use student::Student;
