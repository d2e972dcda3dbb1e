//! Runner error types.

use crate::fetch::FetchError;

/// Errors that end a pipeline invocation.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Repository listing errors.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The account has no repositories at all.
    #[error("No repositories found for '{account}'")]
    NoRepositories { account: String },

    /// Every repository was a fork.
    #[error(transparent)]
    Selection(#[from] crate::selection::SelectionError),

    /// Card rendering errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Document patching errors.
    #[error(transparent)]
    Patch(#[from] crate::patch::PatchError),
}

impl RunnerError {
    /// Returns a remediation hint for the user, if one applies.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Fetch(e) if e.is_not_found() => {
                Some("Make sure your GitHub username is correct and your repositories are public")
            }
            Self::Fetch(FetchError::Status { status: 403, .. }) => {
                Some("The GitHub API rate limit may have been reached; try again later")
            }
            Self::Patch(crate::patch::PatchError::RegionNotFound { .. }) => {
                Some("Check that the target document contains the projects grid markers")
            }
            _ => None,
        }
    }
}
