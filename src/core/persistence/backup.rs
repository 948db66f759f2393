//! Timestamped backup copies of the canonical data files

use crate::core::error::RegistrarError;
use crate::debug;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

/// Minute-granularity stamp appended to backup file names
pub const BACKUP_STAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Backup location for `canonical` at time `at`
///
/// `students.csv` saved at 2025-01-31 09:41 becomes `students_202501310941.csv`
/// inside `backup_dir`.
#[must_use]
pub fn backup_path(canonical: &Path, backup_dir: &Path, at: NaiveDateTime) -> PathBuf {
    let stem = canonical
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("backup");
    let stamp = at.format(BACKUP_STAMP_FORMAT);
    let file_name = match canonical.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}_{stamp}.{ext}"),
        None => format!("{stem}_{stamp}"),
    };
    backup_dir.join(file_name)
}

/// Copy `canonical` into `backup_dir`, replacing any backup from the same minute
///
/// # Errors
/// Returns an error if the directory cannot be created or the copy fails.
pub fn create_backup(
    canonical: &Path,
    backup_dir: &Path,
    at: NaiveDateTime,
) -> Result<PathBuf, RegistrarError> {
    fs::create_dir_all(backup_dir)?;
    let target = backup_path(canonical, backup_dir, at);
    fs::copy(canonical, &target)?;
    debug!("Backed up {} to {}", canonical.display(), target.display());
    Ok(target)
}
