//! Chooses which repositories appear on the portfolio page.

use crate::fetch::RepositoryRecord;
use thiserror::Error;
use tracing::debug;

/// Number of project cards shown on the portfolio page.
pub const DISPLAY_COUNT: usize = 6;

/// Errors that can occur while selecting repositories.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Every fetched repository is a fork.
    #[error("No original repositories found (only forks)")]
    NoOriginalRepositories,
}

/// Repositories chosen for display.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Chosen repositories, most starred first.
    pub repositories: Vec<RepositoryRecord>,

    /// Number of forks that were dropped.
    pub forks_skipped: usize,
}

/// Drops forks, ranks by stars (descending) and keeps the first `limit`.
///
/// The sort is stable, so repositories with equal star counts keep the order
/// they were fetched in.
///
/// # Errors
///
/// Returns [`SelectionError::NoOriginalRepositories`] if no non-fork
/// repository remains.
pub fn select_repositories(
    repositories: Vec<RepositoryRecord>,
    limit: usize,
) -> Result<Selection, SelectionError> {
    let total = repositories.len();
    let mut originals: Vec<RepositoryRecord> =
        repositories.into_iter().filter(|r| !r.is_fork).collect();
    let forks_skipped = total - originals.len();

    if originals.is_empty() {
        return Err(SelectionError::NoOriginalRepositories);
    }

    originals.sort_by(|a, b| b.popularity_score.cmp(&a.popularity_score));
    originals.truncate(limit);

    debug!(
        total,
        forks_skipped,
        selected = originals.len(),
        "Selected repositories"
    );

    Ok(Selection {
        repositories: originals,
        forks_skipped,
    })
}
