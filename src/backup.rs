//! Backup policy for in-place optimization.
//!
//! The decision (where a backup would live, whether one is wanted) is
//! separated from the rename side effect so the policy can be tested
//! without a filesystem.

use crate::constants::BACKUP_INFIX;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Derived backup location: the original path with a `.backup` infix
/// before its suffix (`photo.jpg` -> `photo.backup.jpg`).
pub fn backup_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => path.with_extension(format!("{}.{}", BACKUP_INFIX, ext)),
        None => path.with_extension(BACKUP_INFIX),
    }
}

/// Whether a backup rename should happen for this file. Only in-place
/// overwrites with backups requested qualify, and only while no backup
/// exists at the derived path yet.
pub fn backup_needed(path: &Path, backup_requested: bool, in_place: bool) -> bool {
    backup_requested && in_place && !backup_path(path).exists()
}

/// Rename the original aside when a backup is due and return the path the
/// optimizer should read from. With a backup made, that is the backup
/// itself (the optimized result then lands at the original name). When a
/// backup already exists it is left untouched and the original is read
/// and overwritten in place.
pub fn prepare_backup(path: &Path, backup_requested: bool, in_place: bool) -> Result<PathBuf> {
    if !backup_needed(path, backup_requested, in_place) {
        return Ok(path.to_path_buf());
    }

    let backup = backup_path(path);
    fs::rename(path, &backup)?;
    Ok(backup)
}
