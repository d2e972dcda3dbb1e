//! Document patch error types.

use thiserror::Error;

/// Errors that can occur while patching the target document.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Failed to read, write or replace the document.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document does not contain the insertion region.
    #[error("Could not find insertion region marker {marker:?}")]
    RegionNotFound { marker: String },
}
