//! Runner configuration.

use crate::config::{ConfigError, PortfolioConfig};
use crate::patch::InsertionRegion;
use std::path::{Path, PathBuf};
use url::Url;

/// Settings for one pipeline invocation, resolved from a [`PortfolioConfig`].
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// API endpoint.
    api_base: Url,
    /// Document patched by `run`.
    document: PathBuf,
    /// Region of the document that is replaced.
    region: InsertionRegion,
    /// Maximum number of cards.
    display_count: usize,
    /// Page size for the portfolio listing.
    page_size: u8,
    /// Page size for the search listing.
    search_page_size: u8,
    /// Whether interpolated text is HTML-escaped.
    escape_html: bool,
    /// Custom card template source.
    snippet_template: Option<String>,
}

impl RunnerConfig {
    /// Resolves runner settings, reading the custom card template if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API URL is invalid or the template
    /// cannot be read.
    pub fn from_portfolio(config: &PortfolioConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: config.api_base()?,
            document: config.target_document.clone(),
            region: config.region(),
            display_count: config.display_count,
            page_size: config.page_size,
            search_page_size: config.search_page_size,
            escape_html: config.escape_html,
            snippet_template: config.load_snippet_template()?,
        })
    }

    /// Overrides the target document.
    #[must_use]
    pub fn with_document(mut self, document: PathBuf) -> Self {
        self.document = document;
        self
    }

    /// Overrides the API endpoint.
    #[must_use]
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    /// Returns the API endpoint.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Returns the target document path.
    pub fn document(&self) -> &Path {
        &self.document
    }

    /// Returns the insertion region.
    pub fn region(&self) -> &InsertionRegion {
        &self.region
    }

    /// Returns the maximum number of cards.
    pub fn display_count(&self) -> usize {
        self.display_count
    }

    /// Returns the portfolio listing page size.
    pub fn page_size(&self) -> u8 {
        self.page_size
    }

    /// Returns the search listing page size.
    pub fn search_page_size(&self) -> u8 {
        self.search_page_size
    }

    /// Returns whether HTML escaping is enabled.
    pub fn escape_html(&self) -> bool {
        self.escape_html
    }

    /// Returns the custom card template, if any.
    pub fn snippet_template(&self) -> Option<&str> {
        self.snippet_template.as_deref()
    }
}
