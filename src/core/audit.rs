//! Append-only audit log of mutating actions
//!
//! Every successful mutation records one line of the form
//! `[YYYY-MM-DD HH:MM:SS] <action>`. The sink is a trait so command operations can
//! be exercised against an in-memory log.

use super::error::RegistrarError;
use chrono::{Local, NaiveDateTime};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Timestamp layout used for audit lines
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Destination for audit entries
pub trait AuditSink {
    /// Record one mutating action
    ///
    /// # Errors
    /// Returns an error if the entry cannot be persisted
    fn record(&mut self, action: &str) -> Result<(), RegistrarError>;
}

/// Format a single audit line (without trailing newline)
#[must_use]
pub fn format_entry(at: NaiveDateTime, action: &str) -> String {
    format!("[{}] {action}", at.format(AUDIT_TIMESTAMP_FORMAT))
}

/// File-backed audit log
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Create an audit log writing to `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for AuditLog {
    fn record(&mut self, action: &str) -> Result<(), RegistrarError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", format_entry(Local::now().naive_local(), action))?;
        Ok(())
    }
}

/// In-memory sink; keeps bare action text without timestamps
impl AuditSink for Vec<String> {
    fn record(&mut self, action: &str) -> Result<(), RegistrarError> {
        self.push(action.to_string());
        Ok(())
    }
}
