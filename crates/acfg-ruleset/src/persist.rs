//! # Artifact Persistence
//!
//! Writes go to a temporary file beside the target, which is restricted to
//! the requested mode, flushed to disk, and renamed over the target. The
//! target is therefore either the previous file or the complete new one.
//! The parent directory is never created.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::PersistenceError;

/// Owner read/write, nothing else.
pub const FILE_MODE: u32 = 0o600;

/// Atomically write `bytes` to `path` with permissions `mode`.
pub fn persist(path: &Path, bytes: &[u8], mode: u32) -> Result<(), PersistenceError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(PersistenceError::MissingParent {
            path: path.to_path_buf(),
        });
    }

    let io_err = |source: std::io::Error| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".acfg-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(io_err)?;
    set_mode(tmp.as_file(), mode).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), mode = %format!("{mode:o}"), "persisted");
    Ok(())
}

#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
