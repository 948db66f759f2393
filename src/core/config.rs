//! Configuration for the registrar CLI
//!
//! Settings come from three layers, later ones winning:
//! 1. compiled-in defaults (`src/assets/DefaultCLIConfig{Debug,Release}.toml`)
//! 2. the user config file in the platform config directory
//! 3. per-run CLI overrides ([`ConfigOverrides`])

use crate::core::audit::AuditLog;
use crate::core::persistence::DataFiles;
use crate::logger::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration, chosen by build profile.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to [`Config::get_registrar_dir`] in path values
pub const REGISTRAR_VAR: &str = "$REGISTRAR";

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: [&str; 6] = [
    "level",
    "file",
    "verbose",
    "data_dir",
    "backup_dir",
    "audit_log",
];

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Diagnostic log file path; empty means console only
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Where records, backups and the audit trail live
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding `students.csv`, `courses.json` and `enrollments.csv`
    #[serde(default)]
    pub data_dir: String,
    /// Directory receiving minute-stamped backup copies
    #[serde(default)]
    pub backup_dir: String,
    /// Append-only audit log file
    #[serde(default)]
    pub audit_log: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override data directory
    pub data_dir: Option<String>,
    /// Override backup directory
    pub backup_dir: Option<String>,
    /// Override audit log path
    pub audit_log: Option<String>,
}

fn fill_if_empty(field: &mut String, default: &str) -> bool {
    if field.is_empty() && !default.is_empty() {
        *field = default.to_string();
        true
    } else {
        false
    }
}

impl Config {
    /// The `$REGISTRAR` directory
    ///
    /// - Linux: `~/.config/registrar`
    /// - macOS: `~/Library/Application Support/registrar`
    /// - Windows: `%APPDATA%\registrar`
    #[must_use]
    pub fn get_registrar_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("registrar")
    }

    /// Full path of the user config file (`dconfig.toml` in debug builds)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_registrar_dir().join(CONFIG_FILE_NAME)
    }

    /// Fill empty string fields from `defaults`
    ///
    /// Used on load so settings introduced by a newer version show up in an
    /// older config file. Returns `true` if anything changed.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        // Non-short-circuiting `|` so every field is visited.
        fill_if_empty(&mut self.logging.level, &defaults.logging.level)
            | fill_if_empty(&mut self.logging.file, &defaults.logging.file)
            | fill_if_empty(&mut self.paths.data_dir, &defaults.paths.data_dir)
            | fill_if_empty(&mut self.paths.backup_dir, &defaults.paths.backup_dir)
            | fill_if_empty(&mut self.paths.audit_log, &defaults.paths.audit_log)
    }

    /// Apply CLI-provided overrides for this run only
    ///
    /// Nothing is written back to the config file.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir.clone_from(data_dir);
        }
        if let Some(backup_dir) = &overrides.backup_dir {
            self.paths.backup_dir.clone_from(backup_dir);
        }
        if let Some(audit_log) = &overrides.audit_log {
            self.paths.audit_log.clone_from(audit_log);
        }
    }

    /// Replace `$REGISTRAR` with the config directory
    ///
    /// ```ignore
    /// Config::expand_variables("$REGISTRAR/data");
    /// // "/home/user/.config/registrar/data" on Linux
    /// ```
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        if value.contains(REGISTRAR_VAR) {
            let registrar_dir = Self::get_registrar_dir();
            value.replace(REGISTRAR_VAR, &registrar_dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Parse a TOML string, expanding `$REGISTRAR` in path values
    ///
    /// Missing sections and fields fall back to empty strings and `false`.
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the schema.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.backup_dir = Self::expand_variables(&config.paths.backup_dir);
        config.paths.audit_log = Self::expand_variables(&config.paths.audit_log);

        Ok(config)
    }

    /// Compiled-in defaults for the current build profile
    ///
    /// # Panics
    /// Panics if the embedded default configuration is not valid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load the user config, creating it from defaults on first run
    ///
    /// An existing file has missing fields merged in from defaults (and is
    /// rewritten when that changes anything). Any read or parse failure falls
    /// back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        let Ok(content) = fs::read_to_string(&config_file) else {
            return defaults;
        };
        match Self::from_toml(&content) {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Err(e) => {
                crate::warn!("Ignoring unreadable config {}: {e}", config_file.display());
                defaults
            }
        }
    }

    /// Write the configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, serialization
    /// fails, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Value for one of [`CONFIG_KEYS`]; `None` for unknown keys
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_dir" | "data-dir" => Some(self.paths.data_dir.clone()),
            "backup_dir" | "backup-dir" => Some(self.paths.backup_dir.clone()),
            "audit_log" | "audit-log" => Some(self.paths.audit_log.clone()),
            _ => None,
        }
    }

    /// Set one of [`CONFIG_KEYS`] in memory; call [`save`](Self::save) to persist
    ///
    /// Path values may use `$REGISTRAR`.
    ///
    /// # Errors
    /// Returns an error for unknown keys, unknown log levels, or a
    /// non-boolean `verbose` value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                let level: Level = value.parse()?;
                self.logging.level = level.to_string();
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "data_dir" | "data-dir" => self.paths.data_dir = Self::expand_variables(value),
            "backup_dir" | "backup-dir" => self.paths.backup_dir = Self::expand_variables(value),
            "audit_log" | "audit-log" => self.paths.audit_log = Self::expand_variables(value),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset one key to its value in `defaults`
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" | "data-dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "backup_dir" | "backup-dir" => {
                self.paths.backup_dir.clone_from(&defaults.paths.backup_dir);
            }
            "audit_log" | "audit-log" => self.paths.audit_log.clone_from(&defaults.paths.audit_log),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the user config file so the next [`load`](Self::load) recreates it
    ///
    /// Succeeds without doing anything if no file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Canonical data files and backup directory described by `[paths]`
    #[must_use]
    pub fn data_files(&self) -> DataFiles {
        DataFiles::new(&self.paths.data_dir, &self.paths.backup_dir)
    }

    /// Audit log described by `[paths]`
    #[must_use]
    pub fn audit_log(&self) -> AuditLog {
        AuditLog::new(&self.paths.audit_log)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  backup_dir = \"{}\"", self.paths.backup_dir)?;
        writeln!(f, "  audit_log = \"{}\"", self.paths.audit_log)?;

        Ok(())
    }
}
