//! CLI argument definitions for `registrar`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use campus_registrar::config::ConfigOverrides;
use campus_registrar::logger::Level;

/// CLI log level argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key (e.g., `level`, `data_dir`, `audit_log`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum AnalyticsSubcommand {
    /// Top N students by GPA.
    Top {
        /// Number of students to show; zero or negative shows none
        #[arg(short, long, allow_negative_numbers = true)]
        n: i64,
    },
    /// Enrollment as a percentage of capacity, per course.
    FillRates,
    /// Mean recorded grade per course.
    AverageGrades,
}

// Counts and ids are taken as i64 so negative input reaches the handlers
// and is rejected as invalid input rather than as a usage error.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every student and course.
    List,
    /// Add a student record.
    AddStudent {
        /// Unique student id
        #[arg(long, allow_negative_numbers = true)]
        id: i64,
        /// Full name
        #[arg(long)]
        name: String,
        /// Year of study (1-4)
        #[arg(long, allow_negative_numbers = true)]
        year: i64,
        /// GPA (0.0-4.0)
        #[arg(long)]
        gpa: f64,
    },
    /// Add a course to the catalogue.
    AddCourse {
        /// Unique course code
        #[arg(long)]
        code: String,
        /// Course title
        #[arg(long)]
        title: String,
        /// Credit hours
        #[arg(long, allow_negative_numbers = true)]
        credits: i64,
        /// Maximum enrollments
        #[arg(long, allow_negative_numbers = true)]
        capacity: i64,
        /// Prerequisite course codes, comma separated
        #[arg(long, value_delimiter = ',')]
        prereqs: Vec<String>,
    },
    /// Enroll a student in a course.
    Enroll {
        /// Student id
        #[arg(long, allow_negative_numbers = true)]
        id: i64,
        /// Course code
        #[arg(long)]
        code: String,
    },
    /// Record or update a grade for an existing enrollment.
    Grade {
        /// Student id
        #[arg(long, allow_negative_numbers = true)]
        id: i64,
        /// Course code
        #[arg(long)]
        code: String,
        /// Grade (0-100)
        #[arg(long, allow_negative_numbers = true)]
        grade: f64,
    },
    /// Show a student's transcript and computed average.
    Transcript {
        /// Student id
        #[arg(long, allow_negative_numbers = true)]
        id: i64,
    },
    /// Search student names and course codes (case-insensitive).
    Search {
        /// Text to look for
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// Save all data files and write timestamped backups.
    Save,
    /// Run an analytics report.
    Analytics {
        #[command(subcommand)]
        report: AnalyticsSubcommand,
    },
    /// Interactive numbered menu; saves only when asked.
    Shell,
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

impl Command {
    /// Whether a successful run changes the store and should be saved
    #[must_use]
    pub const fn mutates(&self) -> bool {
        matches!(
            self,
            Self::AddStudent { .. } | Self::AddCourse { .. } | Self::Enroll { .. } | Self::Grade { .. }
        )
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "registrar",
    about = "Campus registrar: students, courses, enrollments and grades",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Override the data directory for this run
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the backup directory for this run
    #[arg(long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Override the audit log path for this run
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into per-run config overrides
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.log_level.map(|lvl| Level::from(lvl).to_string()),
            file: path_string(self.log_file.as_ref()),
            verbose: self.verbose.then_some(true),
            data_dir: path_string(self.data_dir.as_ref()),
            backup_dir: path_string(self.backup_dir.as_ref()),
            audit_log: path_string(self.audit_log.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::parse_from(["registrar", "list"]);

        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.backup_dir.is_none());
        assert!(overrides.audit_log.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::parse_from([
            "registrar",
            "--log-level",
            "info",
            "-v",
            "--data-dir",
            "/srv/data",
            "--backup-dir",
            "/srv/backups",
            "--audit-log",
            "/srv/app.log",
            "save",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("info".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_dir, Some("/srv/data".to_string()));
        assert_eq!(overrides.backup_dir, Some("/srv/backups".to_string()));
        assert_eq!(overrides.audit_log, Some("/srv/app.log".to_string()));
    }

    #[test]
    fn test_add_course_splits_prereqs() {
        let cli = Cli::parse_from([
            "registrar",
            "add-course",
            "--code",
            "CS601",
            "--title",
            "Compilers",
            "--credits",
            "4",
            "--capacity",
            "20",
            "--prereqs",
            "CS301,CS401",
        ]);

        match cli.command {
            Command::AddCourse { prereqs, .. } => assert_eq!(prereqs, vec!["CS301", "CS401"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_negative_values_reach_the_handler() {
        let cli = Cli::parse_from(["registrar", "analytics", "top", "--n", "-2"]);
        assert!(matches!(
            cli.command,
            Command::Analytics {
                report: AnalyticsSubcommand::Top { n: -2 }
            }
        ));

        let cli = Cli::parse_from(["registrar", "transcript", "--id", "-5"]);
        assert!(matches!(cli.command, Command::Transcript { id: -5 }));
    }

    #[test]
    fn test_only_record_changes_mutate() {
        let grade = Cli::parse_from([
            "registrar", "grade", "--id", "1003", "--code", "CS101", "--grade", "95",
        ]);
        assert!(grade.command.mutates());
        assert!(!Cli::parse_from(["registrar", "list"]).command.mutates());
        assert!(!Cli::parse_from(["registrar", "save"]).command.mutates());
    }
}
