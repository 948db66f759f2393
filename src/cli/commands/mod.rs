//! CLI command handlers for `registrar`.
//!
//! Each group of subcommands is implemented in its own submodule. Record
//! handlers work on a [`Session`] and return [`RegistrarError`]; `main`
//! reports failures and sets the exit status.

pub mod analytics;
pub mod config;
pub mod records;
pub mod shell;

use crate::args::{AnalyticsSubcommand, Command};
use campus_registrar::config::Config;
use campus_registrar::core::audit::{AuditLog, AuditSink};
use campus_registrar::core::persistence::DataFiles;
use campus_registrar::core::{RecordStore, RegistrarError};
use campus_registrar::{debug, info};
use std::io::Write;
use std::str::FromStr;

/// Audit text written by an explicit save
pub const SAVE_AUDIT_ACTION: &str = "Data saved and backed up.";

/// Loaded records plus where they came from and where actions are audited
#[derive(Debug)]
pub struct Session {
    /// In-memory records
    pub store: RecordStore,
    /// Canonical data files and backup directory
    pub files: DataFiles,
    /// Audit trail for mutating actions
    pub audit: AuditLog,
}

impl Session {
    /// Load (and seed where missing) the data files named by `config`
    pub fn open(config: &Config) -> Result<Self, RegistrarError> {
        let files = config.data_files();
        let loaded = files.load()?;
        if loaded.skipped_count() > 0 {
            campus_registrar::warn!("{} malformed row(s) were skipped", loaded.skipped_count());
        }
        Ok(Self {
            store: loaded.store,
            files,
            audit: config.audit_log(),
        })
    }

    /// Write every data file and its backup
    pub fn persist(&self) -> Result<(), RegistrarError> {
        let backups = self.files.save(&self.store)?;
        for backup in &backups {
            debug!("Backup written to {}", backup.display());
        }
        Ok(())
    }

    /// Persist and record the save in the audit log
    pub fn save(&mut self) -> Result<(), RegistrarError> {
        self.persist()?;
        self.audit.record(SAVE_AUDIT_ACTION)
    }
}

/// Run one non-config command
///
/// Output is buffered and only written to `out` once the command, and the save
/// that follows a mutation, have succeeded. The audit entry of a mutation is
/// written by the operation itself, so it is already present if the save fails.
pub fn execute(
    command: Command,
    session: &mut Session,
    out: &mut impl Write,
) -> Result<(), RegistrarError> {
    let mutates = command.mutates();
    let mut buffer = Vec::new();
    let buf = &mut buffer;

    match command {
        Command::List => records::list(session, buf)?,
        Command::AddStudent {
            id,
            name,
            year,
            gpa,
        } => records::add_student(
            session,
            buf,
            non_negative("id", id)?,
            &name,
            non_negative("year", year)?,
            gpa,
        )?,
        Command::AddCourse {
            code,
            title,
            credits,
            capacity,
            prereqs,
        } => records::add_course(
            session,
            buf,
            &code,
            &title,
            non_negative("credits", credits)?,
            non_negative("capacity", capacity)?,
            &prereqs,
        )?,
        Command::Enroll { id, code } => {
            records::enroll(session, buf, non_negative("id", id)?, &code)?;
        }
        Command::Grade { id, code, grade } => {
            records::grade(session, buf, non_negative("id", id)?, &code, grade)?;
        }
        Command::Transcript { id } => {
            records::show_transcript(session, buf, non_negative("id", id)?)?;
        }
        Command::Search { query } => records::find(session, buf, &query)?,
        Command::Save => records::save(session, buf)?,
        Command::Analytics { report } => match report {
            AnalyticsSubcommand::Top { n } => analytics::top_students(session, buf, n)?,
            AnalyticsSubcommand::FillRates => analytics::course_fill_rates(session, buf)?,
            AnalyticsSubcommand::AverageGrades => {
                analytics::course_average_grades(session, buf)?;
            }
        },
        // The shell talks to the terminal directly and saves on request.
        Command::Shell => shell::run(session)?,
        Command::Config { .. } => {}
    }

    if mutates {
        session.persist()?;
        info!("Saved changes to {}", session.files.students.display());
    }
    out.write_all(&buffer)?;
    Ok(())
}

/// Convert a signed CLI number into a non-negative field value
pub fn non_negative(field: &str, value: i64) -> Result<u32, RegistrarError> {
    u32::try_from(value).map_err(|_| {
        RegistrarError::InvalidInput(format!("{field} must be a non-negative integer, got {value}"))
    })
}

/// Parse free-form text typed at a prompt
pub fn parse_field<T: FromStr>(field: &str, raw: &str) -> Result<T, RegistrarError> {
    raw.trim()
        .parse()
        .map_err(|_| RegistrarError::InvalidInput(format!("expected {field}, got '{}'", raw.trim())))
}

/// Print a failure the way every handler reports it
pub fn report_error(e: &RegistrarError) {
    debug!("Command failed: {e:?}");
    eprintln!("✗ {e}");
}
