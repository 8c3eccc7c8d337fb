//! Atomic file writes.
//!
//! Caption files are written to a temporary sibling (`.{filename}.tmp`),
//! synced, then renamed over the target, so a reader never sees a
//! half-written caption. `std::fs::rename` replaces an existing target on
//! both POSIX and Windows; source and target share a directory, so the
//! rename never crosses filesystems.

use crate::error::{CaptionError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write a string to a file, creating parent directories.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            CaptionError::UserError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CaptionError::UserError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e
        ))
    })
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            CaptionError::UserError(format!("invalid file path '{}'", target.display()))
        })?;
    Ok(target.with_file_name(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        CaptionError::UserError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            CaptionError::UserError(format!(
                "failed to write temporary file '{}': {}",
                path.display(),
                e
            ))
        })
}
