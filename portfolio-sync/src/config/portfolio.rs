//! `portfolio.toml` deserialization and validation.

use crate::config::ConfigError;
use crate::fetch::DEFAULT_API_BASE_URL;
use crate::patch::{InsertionRegion, DEFAULT_END_MARKER, DEFAULT_START_MARKER};
use crate::search::SEARCH_PAGE_SIZE;
use crate::selection::DISPLAY_COUNT;
use crate::stamp::{DEFAULT_ASSET_DOCUMENTS, DEFAULT_VERSIONED_ASSETS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Largest page size the listing endpoint accepts.
const MAX_PAGE_SIZE: u8 = 100;

/// Settings for a portfolio site. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct PortfolioConfig {
    /// HTML document holding the projects grid (defaults to "portfolio.html").
    pub target_document: PathBuf,

    /// Marker after which generated cards are inserted.
    pub start_marker: String,

    /// Marker before which generated cards end.
    pub end_marker: String,

    /// Number of project cards to show.
    pub display_count: usize,

    /// Page size for the `run` and `preview` listings.
    pub page_size: u8,

    /// Page size for the `search` listing.
    pub search_page_size: u8,

    /// GitHub REST API endpoint.
    pub api_base_url: String,

    /// Whether repository text is HTML-escaped in cards.
    pub escape_html: bool,

    /// Custom Handlebars card template.
    pub snippet_template: Option<PathBuf>,

    /// HTML documents whose asset links are version-stamped.
    pub asset_documents: Vec<PathBuf>,

    /// Asset paths whose links receive a version query string.
    pub versioned_assets: Vec<String>,

    /// File the settings were loaded from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            target_document: PathBuf::from("portfolio.html"),
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            display_count: DISPLAY_COUNT,
            page_size: 10,
            search_page_size: SEARCH_PAGE_SIZE,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            escape_html: false,
            snippet_template: None,
            asset_documents: DEFAULT_ASSET_DOCUMENTS.iter().map(PathBuf::from).collect(),
            versioned_assets: DEFAULT_VERSIONED_ASSETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            source: None,
        }
    }
}

impl PortfolioConfig {
    /// Loads and validates a config file.
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unparseable or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(path)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.rebase(base);
        }
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validates value ranges and formats.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: String| {
            Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message,
            })
        };

        if self.start_marker.is_empty() || self.end_marker.is_empty() {
            return fail("start-marker and end-marker must not be empty".to_string());
        }

        if self.display_count == 0 {
            return fail("display-count must be at least 1".to_string());
        }

        for (key, value) in [
            ("page-size", self.page_size),
            ("search-page-size", self.search_page_size),
        ] {
            if value == 0 || value > MAX_PAGE_SIZE {
                return fail(format!("{key} must be between 1 and {MAX_PAGE_SIZE}, got {value}"));
            }
        }

        match Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return fail(format!(
                    "api-base-url is not a valid http(s) URL: {}",
                    self.api_base_url
                ))
            }
        }

        if self.versioned_assets.iter().any(|a| a.trim().is_empty()) {
            return fail("versioned-assets must not contain empty entries".to_string());
        }

        Ok(())
    }

    /// Returns the insertion region described by the markers.
    #[must_use]
    pub fn region(&self) -> InsertionRegion {
        InsertionRegion::new(self.start_marker.clone(), self.end_marker.clone())
    }

    /// Returns the parsed API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the URL does not parse.
    pub fn api_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_base_url).map_err(|e| ConfigError::ValidationError {
            path: self.source_label(),
            message: format!("api-base-url {:?} is not a valid URL: {e}", self.api_base_url),
        })
    }

    fn source_label(&self) -> String {
        self.source
            .as_deref()
            .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string())
    }

    /// Reads the custom card template, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the template cannot be read or is empty.
    pub fn load_snippet_template(&self) -> Result<Option<String>, ConfigError> {
        let Some(path) = &self.snippet_template else {
            return Ok(None);
        };

        let template = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        if template.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: "snippet template is empty".to_string(),
            });
        }

        Ok(Some(template))
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };

        self.target_document = join(&self.target_document);
        self.snippet_template = self.snippet_template.as_deref().map(join);
        self.asset_documents = self.asset_documents.iter().map(|p| join(p)).collect();
    }
}
