//! Cache-busting version stamps for asset links.
//!
//! Rewrites `href="styles.css"` / `src="script.js?v=123"` style attributes
//! to carry `?v=<version>` so browsers fetch fresh copies after a deploy.

use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// HTML files stamped when none are given.
pub const DEFAULT_ASSET_DOCUMENTS: &[&str] =
    &["index.html", "about.html", "portfolio.html", "contact.html"];

/// Assets whose links are stamped when none are configured.
pub const DEFAULT_VERSIONED_ASSETS: &[&str] = &["styles.css", "script.js"];

/// Errors that can occur while stamping.
#[derive(Debug, Error)]
pub enum StampError {
    /// Failed to read or write a document.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An asset name produced an invalid pattern.
    #[error("Invalid asset pattern for '{asset}': {source}")]
    Pattern {
        asset: String,
        #[source]
        source: regex::Error,
    },
}

/// Result of stamping one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StampOutcome {
    /// The document was rewritten.
    Updated {
        /// Document path.
        path: PathBuf,
        /// Number of asset links stamped.
        links: usize,
    },

    /// The document has no links to the configured assets.
    Unchanged {
        /// Document path.
        path: PathBuf,
    },

    /// The document does not exist.
    Skipped {
        /// Document path.
        path: PathBuf,
    },

    /// Reading or writing the document failed.
    Failed {
        /// Document path.
        path: PathBuf,
        /// Error message.
        error: String,
    },
}

/// Derives a version token from a point in time (milliseconds since the epoch).
///
/// Computed once per invocation and passed to [`AssetStamper::new`].
#[must_use]
pub fn version_token(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// Stamps asset links with a fixed version token.
#[derive(Debug)]
pub struct AssetStamper {
    patterns: Vec<(String, Regex)>,
    version: String,
}

impl AssetStamper {
    /// Builds a stamper for the given asset paths.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::Pattern`] if an asset name cannot be matched.
    pub fn new<S: AsRef<str>>(assets: &[S], version: impl Into<String>) -> Result<Self, StampError> {
        let patterns = assets
            .iter()
            .map(|asset| {
                let asset = asset.as_ref();
                let pattern = format!(
                    r#"(?P<attr>href|src)="{}(?:\?v=[^"]*)?""#,
                    regex::escape(asset)
                );
                Regex::new(&pattern)
                    .map(|re| (asset.to_string(), re))
                    .map_err(|source| StampError::Pattern {
                        asset: asset.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            version: version.into(),
        })
    }

    /// Returns the version token.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Stamps every matching link in `content`, returning the new text and
    /// the number of links stamped.
    #[must_use]
    pub fn stamp_content(&self, content: &str) -> (String, usize) {
        let mut stamped = content.to_string();
        let mut links = 0;

        for (asset, re) in &self.patterns {
            links += re.find_iter(&stamped).count();
            stamped = re
                .replace_all(&stamped, |caps: &Captures<'_>| {
                    format!(r#"{}="{}?v={}""#, &caps["attr"], asset, self.version)
                })
                .into_owned();
        }

        (stamped, links)
    }

    /// Stamps a single document on disk.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::Io`] if the document cannot be read or written.
    pub fn stamp_file(&self, path: &Path) -> Result<StampOutcome, StampError> {
        if !path.exists() {
            debug!(path = %path.display(), "Document not found, skipping");
            return Ok(StampOutcome::Skipped {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| StampError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let (stamped, links) = self.stamp_content(&content);
        if links == 0 {
            return Ok(StampOutcome::Unchanged {
                path: path.to_path_buf(),
            });
        }

        std::fs::write(path, stamped).map_err(|source| StampError::Io {
            path: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), links, version = %self.version, "Stamped asset links");
        Ok(StampOutcome::Updated {
            path: path.to_path_buf(),
            links,
        })
    }

    /// Stamps every document, continuing past failures.
    pub fn stamp_files(&self, paths: &[PathBuf]) -> Vec<StampOutcome> {
        paths
            .iter()
            .map(|path| match self.stamp_file(path) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to stamp document");
                    StampOutcome::Failed {
                        path: path.clone(),
                        error: e.to_string(),
                    }
                }
            })
            .collect()
    }
}
