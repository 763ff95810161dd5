//! Shared utility functions

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Replace `path` with `contents` without ever exposing a partial file.
///
/// The data is written to a temporary file in the same directory (so the
/// final rename stays on one filesystem), flushed to disk, then renamed over
/// the destination. An interrupted run leaves either the old file or the new
/// one, never a truncated mix.
///
/// A symlinked `path` is followed: the link stays and its target is
/// replaced. The permissions of an existing file carry over.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let target = resolve_symlink(path)?;
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::Builder::new()
        .prefix(".theme-sync")
        .suffix(".tmp")
        .tempfile_in(parent)?;
    temp_file.write_all(contents)?;
    if let Ok(metadata) = fs::metadata(&target) {
        temp_file.as_file().set_permissions(metadata.permissions())?;
    }
    temp_file.as_file_mut().sync_all()?;
    temp_file.persist(&target).map_err(|error| error.error)?;
    Ok(())
}

/// The file a write to `path` should land on
fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => fs::canonicalize(path),
        _ => Ok(path.to_path_buf()),
    }
}

/// Serialize a JSON value the way editors write settings: two-space indent
/// and a trailing newline.
pub fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
