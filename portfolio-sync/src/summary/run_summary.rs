//! Run summary types.

use crate::classify::{Category, ClassifiedRepository};
use serde::Serialize;
use std::path::PathBuf;

/// One project that made it onto the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    /// Title shown on the card.
    pub display_name: String,

    /// Primary language, if the repository reports one.
    pub language: Option<String>,

    /// Card category.
    pub category: Category,

    /// Star count.
    pub popularity_score: u64,
}

impl From<&ClassifiedRepository> for ProjectSummary {
    fn from(repository: &ClassifiedRepository) -> Self {
        Self {
            display_name: repository.display_name.clone(),
            language: repository.record.primary_language.clone(),
            category: repository.category,
            popularity_score: repository.record.popularity_score,
        }
    }
}

/// Summary of a completed `run`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Account whose repositories were published.
    pub account: String,

    /// Number of repositories in the listing.
    pub repositories_fetched: usize,

    /// Number of forks left out.
    pub forks_skipped: usize,

    /// Projects written to the document, in card order.
    pub projects: Vec<ProjectSummary>,

    /// Document that was patched.
    pub document: PathBuf,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(account: impl Into<String>, document: PathBuf) -> Self {
        Self {
            account: account.into(),
            document,
            ..Default::default()
        }
    }

    /// Records a project written to the document.
    pub fn record_project(&mut self, repository: &ClassifiedRepository) {
        self.projects.push(ProjectSummary::from(repository));
    }

    /// Number of cards written.
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Number of cards of the given category.
    #[must_use]
    pub fn count_in(&self, category: Category) -> usize {
        self.projects
            .iter()
            .filter(|p| p.category == category)
            .count()
    }
}
