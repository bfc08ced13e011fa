//! Output persistence.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Errors writing the showcase document. Always fatal.
#[derive(Debug, thiserror::Error)]
#[error("Failed to write {}: {source}", .path.display())]
pub struct WriteError {
    /// Destination path
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Write `contents` to `path`, replacing any existing file.
///
/// The document is written to a temporary file next to the destination and
/// renamed over it, so a failed write leaves the previous output in place.
pub fn write_document(path: &Path, contents: &str) -> Result<(), WriteError> {
    let fail = |source: io::Error| WriteError {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(fail)?;

    // Temporary files are created owner-only; keep the old output's mode.
    let permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => new_file_permissions(),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(fail)?;
    if let Some(permissions) = permissions {
        file.as_file().set_permissions(permissions).map_err(fail)?;
    }
    file.write_all(contents.as_bytes()).map_err(fail)?;
    file.as_file().sync_all().map_err(fail)?;
    file.persist(path).map_err(|e| fail(e.error))?;

    tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());

    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
