// SettingsVault - platform/fs.rs
//
// Filesystem helpers shared by the profile store.

use crate::util::constants;
use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path used while `path` is being replaced (`Clothing.json.tmp`).
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name.push(constants::TEMP_FILE_SUFFIX);
    path.with_file_name(name)
}

/// Replace the contents of `path` with `bytes` atomically (write temp → rename).
///
/// A crash between write and rename loses the new content but never leaves a
/// truncated file at `path`; rename is atomic on all supported platforms.
/// The parent directory must already exist.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = temp_path(path);
    std::fs::write(&tmp, bytes)?;

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        e
    })
}

/// Last modification time of `path` in UTC.
pub fn modified_utc(path: &Path) -> io::Result<DateTime<Utc>> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}
