//! Courses JSON: an object keyed by course code
//!
//! ```json
//! {
//!   "CS201": {
//!     "title": "Data Structures",
//!     "credits": 4,
//!     "capacity": 4,
//!     "prereqs": ["CS101"]
//!   }
//! }
//! ```
//!
//! After seeding, the file is always read back into memory so the store never
//! starts with an empty course set while a courses file exists.

use super::{backup, needs_seed, write_file, LoadReport, Loaded};
use crate::core::error::RegistrarError;
use crate::core::models::Course;
use crate::core::store::RecordStore;
use crate::info;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Value stored under each course code
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CourseEntry {
    title: String,
    credits: u32,
    capacity: u32,
    #[serde(default)]
    prereqs: Vec<String>,
}

impl CourseEntry {
    fn from_course(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            credits: course.credits,
            capacity: course.capacity,
            prereqs: course.prereqs.clone(),
        }
    }

    fn into_course(self, code: String) -> Course {
        Course {
            code,
            title: self.title,
            credits: self.credits,
            capacity: self.capacity,
            prereqs: self.prereqs,
        }
    }
}

/// Courses written to a fresh courses file
#[must_use]
pub fn default_courses() -> Vec<Course> {
    vec![
        Course::new("CS101".to_string(), "Intro to Programming".to_string(), 3, 5),
        Course::new("CS201".to_string(), "Data Structures".to_string(), 4, 4).with_prereqs(["CS101"]),
        Course::new("CS301".to_string(), "Algorithms".to_string(), 4, 3).with_prereqs(["CS201"]),
        Course::new("CS401".to_string(), "Operating Systems".to_string(), 4, 2)
            .with_prereqs(["CS201"]),
        Course::new("CS501".to_string(), "Machine Learning".to_string(), 3, 3)
            .with_prereqs(["CS301"]),
    ]
}

/// Encode courses as pretty-printed JSON keyed by code
///
/// # Errors
/// Returns an error if serialization fails.
pub fn encode_courses<'a>(
    courses: impl IntoIterator<Item = &'a Course>,
) -> Result<String, RegistrarError> {
    let entries: BTreeMap<&str, CourseEntry> = courses
        .into_iter()
        .map(|c| (c.code.as_str(), CourseEntry::from_course(c)))
        .collect();
    let mut json = serde_json::to_string_pretty(&entries)?;
    json.push('\n');
    Ok(json)
}

/// Decode course JSON, reporting entries that do not fit the schema
fn decode_courses(content: &str, report: &mut LoadReport) -> Vec<Course> {
    let object: Map<String, Value> = match serde_json::from_str(content) {
        Ok(object) => object,
        Err(e) => {
            report.skip(
                Some(e.line()),
                String::new(),
                format!("not a JSON object keyed by course code: {e}"),
            );
            return Vec::new();
        }
    };

    let mut courses = Vec::with_capacity(object.len());
    for (code, value) in object {
        match serde_json::from_value::<CourseEntry>(value) {
            Ok(entry) => courses.push(entry.into_course(code)),
            Err(e) => report.skip(None, code, e.to_string()),
        }
    }
    courses
}

/// Load the courses file, seeding the defaults if it is absent or empty
///
/// # Errors
/// Returns an error if the file cannot be read or the seed cannot be written.
pub fn load_courses(path: &Path) -> Result<Loaded<Course>, RegistrarError> {
    let mut report = LoadReport::new(path);
    if needs_seed(path) {
        write_file(path, &encode_courses(&default_courses())?)?;
        info!("Seeded default courses into {}", path.display());
        report.seeded = true;
    }

    let content = fs::read_to_string(path)?;
    let courses = decode_courses(&content, &mut report);

    report.loaded = courses.len();
    Ok(Loaded {
        records: courses,
        report,
    })
}

/// Overwrite the courses file from the store, then back it up
///
/// # Errors
/// Returns an error if the file or its backup cannot be written.
pub fn save_courses(
    store: &RecordStore,
    path: &Path,
    backup_dir: &Path,
    at: NaiveDateTime,
) -> Result<PathBuf, RegistrarError> {
    write_file(path, &encode_courses(store.courses())?)?;
    backup::create_backup(path, backup_dir, at)
}
