//! Whole-file reads and all-or-nothing writes.

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a text file, mapping a missing file to [`Error::FileNotFound`].
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::on_read(path, e))
}

/// Read a text file, returning `None` when it does not exist.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match read_file(path) {
        Ok(content) => Ok(Some(content)),
        Err(Error::FileNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replace `path` with `content` atomically.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old or the new file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let fail = |source: std::io::Error| Error::FileWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(fail)?;
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions()).map_err(fail)?;
    }
    tmp.write_all(content.as_bytes()).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    tmp.persist(path).map_err(|e| fail(e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "file persisted");
    Ok(())
}

/// Write a file that does not exist yet, creating its parent directories first.
pub fn write_new(path: &Path, content: &str) -> Result<()> {
    let fail = |source: std::io::Error| Error::FileWriteFailure {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(fail)?;
        }
    }
    std::fs::write(path, content).map_err(fail)
}
