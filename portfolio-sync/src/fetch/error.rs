//! Repository fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching an account's repository listing.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The account handle was empty.
    #[error("Account handle must not be empty")]
    EmptyHandle,

    /// Transport failure (DNS, connection, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[from] octocrab::Error),

    /// The API answered with a non-success status.
    #[error("GitHub API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The payload is not a JSON array of repository objects.
    #[error("Malformed repository listing: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// A repository object parsed but is missing required data.
    #[error("Malformed repository at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The configured API base URL cannot carry a request path.
    #[error("Invalid API base URL: {url}")]
    InvalidUrl { url: String },
}

impl FetchError {
    /// Returns true when the API reported that the account does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Returns true for payloads that could not be turned into records.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedResponse(_) | Self::InvalidRecord { .. }
        )
    }
}
