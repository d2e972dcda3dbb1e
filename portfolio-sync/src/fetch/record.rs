//! Repository records and wire-format parsing.

use super::FetchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository from the account listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRecord {
    /// Repository name (e.g., "weather-app").
    pub name: String,

    /// Short description, if one is set.
    pub description: Option<String>,

    /// Primary language as reported by the API.
    pub primary_language: Option<String>,

    /// Topic tags in the order the API returned them.
    pub topics: Vec<String>,

    /// Whether this repository is a fork of another.
    pub is_fork: bool,

    /// Star count, used to rank repositories.
    pub popularity_score: u64,

    /// Project homepage, if one is set.
    pub homepage_url: Option<String>,

    /// Repository page on GitHub.
    pub canonical_url: String,

    /// Last update time.
    pub last_updated: DateTime<Utc>,
}

impl RepositoryRecord {
    /// Returns the homepage when set, otherwise the repository page.
    #[must_use]
    pub fn live_url(&self) -> &str {
        self.homepage_url.as_deref().unwrap_or(&self.canonical_url)
    }
}

/// Repository object as served by `GET /users/{user}/repos`.
#[derive(Debug, Deserialize)]
struct RawRepository {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    topics: Option<Vec<String>>,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    homepage: Option<String>,
    html_url: String,
    updated_at: DateTime<Utc>,
}

/// Error body returned by the API on failures (e.g. `{"message": "Not Found"}`).
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Parses a repository listing payload.
///
/// # Errors
///
/// Returns [`FetchError::MalformedResponse`] if the body is not a JSON array
/// of repository objects, or [`FetchError::InvalidRecord`] if an entry has an
/// empty name or URL.
pub fn parse_repositories(body: &str) -> Result<Vec<RepositoryRecord>, FetchError> {
    let raw: Vec<RawRepository> = serde_json::from_str(body)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, repo)| into_record(index, repo))
        .collect()
}

/// Extracts the `message` field of an API error body, falling back to the raw body.
pub(crate) fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

fn into_record(index: usize, raw: RawRepository) -> Result<RepositoryRecord, FetchError> {
    if raw.name.trim().is_empty() {
        return Err(FetchError::InvalidRecord {
            index,
            reason: "name is empty".to_string(),
        });
    }

    if raw.html_url.trim().is_empty() {
        return Err(FetchError::InvalidRecord {
            index,
            reason: format!("html_url is empty for '{}'", raw.name),
        });
    }

    Ok(RepositoryRecord {
        name: raw.name,
        description: non_empty(raw.description),
        primary_language: non_empty(raw.language),
        topics: raw.topics.unwrap_or_default(),
        is_fork: raw.fork,
        popularity_score: raw.stargazers_count,
        homepage_url: non_empty(raw.homepage),
        canonical_url: raw.html_url,
        last_updated: raw.updated_at,
    })
}

// The API reports unset homepages and descriptions as "" as often as null.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
