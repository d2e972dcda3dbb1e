//! Splices generated markup into the target document.
//!
//! The document is read fully, the insertion region is replaced and the
//! result is written through a temporary file in the same directory that is
//! then renamed over the original. A document without the region is never
//! written.

mod error;
mod region;

pub use error::PatchError;
pub use region::{InsertionRegion, DEFAULT_END_MARKER, DEFAULT_START_MARKER};

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Replaces the insertion region of the document at `path` with `body`.
///
/// # Errors
///
/// - [`PatchError::RegionNotFound`] if either marker is missing; the file is
///   left untouched
/// - [`PatchError::Io`] if the file cannot be read or replaced
pub fn patch_document(
    path: &Path,
    region: &InsertionRegion,
    body: &str,
) -> Result<(), PatchError> {
    debug!(path = %path.display(), "Reading target document");

    let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let patched = region.splice(&content, body)?;

    write_atomically(path, &patched)?;

    info!(
        path = %path.display(),
        bytes = patched.len(),
        "Updated target document"
    );
    Ok(())
}

/// Writes `content` to a sibling temporary file and renames it over `path`,
/// carrying over the original file's permissions.
fn write_atomically(path: &Path, content: &str) -> Result<(), PatchError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = std::fs::metadata(path)
        .map_err(|e| io_error(path, e))?
        .permissions();

    let mut temp = NamedTempFile::new_in(directory).map_err(|e| io_error(directory, e))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| io_error(temp.path(), e))?;
    temp.as_file()
        .set_permissions(permissions)
        .map_err(|e| io_error(temp.path(), e))?;
    temp.persist(path).map_err(|e| io_error(path, e.error))?;

    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> PatchError {
    PatchError::Io {
        path: path.display().to_string(),
        source,
    }
}
