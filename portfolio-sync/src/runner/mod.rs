//! Orchestrates the fetch, select, render and patch pipeline.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::classify::ClassifiedRepository;
use crate::fetch::{build_client, fetch_repositories, ListingRequest, RepositoryRecord};
use crate::patch::patch_document;
use crate::search::{search_repositories, SearchReport};
use crate::selection::select_repositories;
use crate::summary::RunSummary;
use crate::templates::{join_snippets, SnippetRenderer};
use octocrab::Octocrab;
use tracing::{info, info_span, warn, Instrument};

/// Rendered cards for a set of fetched repositories.
#[derive(Debug, Clone)]
pub struct RenderedCards {
    /// Number of repositories in the listing.
    pub repositories_fetched: usize,

    /// Number of forks left out.
    pub forks_skipped: usize,

    /// Selected repositories in card order.
    pub projects: Vec<ClassifiedRepository>,

    /// Card markup joined in card order.
    pub markup: String,
}

/// Runs pipeline commands against the GitHub API.
pub struct Runner {
    config: RunnerConfig,
    octocrab: Octocrab,
    renderer: SnippetRenderer,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or the card
    /// template does not parse.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let octocrab = build_client()?;
        let renderer = renderer_for(&config)?;
        Ok(Self {
            config,
            octocrab,
            renderer,
        })
    }

    /// Returns the runner configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Fetches, renders and patches the target document.
    ///
    /// # Errors
    ///
    /// Returns the first failing stage's error; the document is only written
    /// when every earlier stage succeeded.
    pub async fn run(&self, account: &str) -> Result<RunSummary, RunnerError> {
        let span = info_span!("run", account = %account);

        async {
            let records = self.fetch(account).await?;
            publish(&self.config, &self.renderer, account, records)
        }
        .instrument(span)
        .await
    }

    /// Fetches and renders cards without touching the document.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching, selection or rendering fails.
    pub async fn preview(&self, account: &str) -> Result<RenderedCards, RunnerError> {
        let records = self.fetch(account).await?;
        render_cards(&self.config, &self.renderer, account, records)
    }

    /// Lists every repository of the account (forks included) and matches
    /// the keywords against names and descriptions.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched, or
    /// [`RunnerError::NoRepositories`] if it is empty.
    pub async fn search<S: AsRef<str>>(
        &self,
        account: &str,
        keywords: &[S],
    ) -> Result<SearchReport, RunnerError> {
        let request = ListingRequest {
            account,
            page_size: self.config.search_page_size(),
            include_all: true,
        };
        let records = fetch_repositories(&self.octocrab, self.config.api_base(), &request).await?;
        if records.is_empty() {
            warn!(account, "Account has no repositories");
            return Err(RunnerError::NoRepositories {
                account: account.to_string(),
            });
        }

        let report = search_repositories(records, keywords);

        info!(
            scanned = report.repositories.len(),
            matches = report.match_count(),
            "Search complete"
        );
        Ok(report)
    }

    async fn fetch(&self, account: &str) -> Result<Vec<RepositoryRecord>, RunnerError> {
        let request = ListingRequest {
            account,
            page_size: self.config.page_size(),
            include_all: false,
        };
        Ok(fetch_repositories(&self.octocrab, self.config.api_base(), &request).await?)
    }
}

/// Builds the card renderer described by the configuration.
///
/// # Errors
///
/// Returns [`RunnerError::Template`] if a custom template does not parse.
pub fn renderer_for(config: &RunnerConfig) -> Result<SnippetRenderer, RunnerError> {
    let mut renderer = SnippetRenderer::new().with_escape_html(config.escape_html());
    if let Some(template) = config.snippet_template() {
        renderer = renderer.with_template(template.to_string());
    }
    renderer.validate()?;
    Ok(renderer)
}

/// Selects, classifies and renders fetched repositories.
///
/// # Errors
///
/// - [`RunnerError::NoRepositories`] if the listing is empty
/// - [`RunnerError::Selection`] if every repository is a fork
/// - [`RunnerError::Template`] if a card fails to render
pub fn render_cards(
    config: &RunnerConfig,
    renderer: &SnippetRenderer,
    account: &str,
    records: Vec<RepositoryRecord>,
) -> Result<RenderedCards, RunnerError> {
    if records.is_empty() {
        warn!(account, "Account has no repositories");
        return Err(RunnerError::NoRepositories {
            account: account.to_string(),
        });
    }

    let repositories_fetched = records.len();
    let selection = select_repositories(records, config.display_count())?;
    let projects: Vec<ClassifiedRepository> = selection
        .repositories
        .into_iter()
        .map(ClassifiedRepository::classify)
        .collect();

    let snippets = renderer.render_all(&projects)?;

    Ok(RenderedCards {
        repositories_fetched,
        forks_skipped: selection.forks_skipped,
        projects,
        markup: join_snippets(&snippets),
    })
}

/// Renders fetched repositories and writes them into the target document.
///
/// # Errors
///
/// Returns the first failing stage's error. Nothing is written unless
/// rendering succeeded.
pub fn publish(
    config: &RunnerConfig,
    renderer: &SnippetRenderer,
    account: &str,
    records: Vec<RepositoryRecord>,
) -> Result<RunSummary, RunnerError> {
    let cards = render_cards(config, renderer, account, records)?;

    patch_document(config.document(), config.region(), &cards.markup)?;

    let mut summary = RunSummary::new(account, config.document().to_path_buf());
    summary.repositories_fetched = cards.repositories_fetched;
    summary.forks_skipped = cards.forks_skipped;
    for project in &cards.projects {
        summary.record_project(project);
    }

    info!(
        account,
        projects = summary.project_count(),
        forks_skipped = summary.forks_skipped,
        document = %summary.document.display(),
        "Published projects"
    );
    Ok(summary)
}
