//! Repository listing fetch against the GitHub REST API.
//!
//! One unauthenticated request per call: no retry, no pagination beyond the
//! first page.

mod error;
mod record;

pub use error::FetchError;
pub use record::{parse_repositories, RepositoryRecord};

use http::header::{ACCEPT, USER_AGENT};
use octocrab::Octocrab;
use tracing::{debug, info, info_span, Instrument};
use url::Url;

/// Client identifier sent with every request.
pub const CLIENT_USER_AGENT: &str = "Portfolio-Website";

/// Media type requested from the API.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Default API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Parameters of a single repository listing request.
#[derive(Debug, Clone)]
pub struct ListingRequest<'a> {
    /// Account handle whose repositories are listed.
    pub account: &'a str,

    /// Page size (`per_page`), 1 to 100.
    pub page_size: u8,

    /// Whether to pass `type=all` so forks and member repositories are listed too.
    pub include_all: bool,
}

/// Builds an unauthenticated client carrying the fixed request headers.
///
/// # Errors
///
/// Returns an error if the underlying HTTP client cannot be constructed.
pub fn build_client() -> Result<Octocrab, octocrab::Error> {
    Octocrab::builder()
        .add_header(USER_AGENT, CLIENT_USER_AGENT.to_string())
        .add_header(ACCEPT, ACCEPT_MEDIA_TYPE.to_string())
        .build()
}

/// Builds the listing URL: `{base}/users/{account}/repos?sort=updated&per_page={n}`.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if `api_base` cannot have path segments
/// (e.g. a `mailto:` URL).
pub fn listing_url(api_base: &Url, request: &ListingRequest<'_>) -> Result<Url, FetchError> {
    let mut url = api_base.clone();

    url.path_segments_mut()
        .map_err(|()| FetchError::InvalidUrl {
            url: api_base.to_string(),
        })?
        .pop_if_empty()
        .extend(["users", request.account, "repos"]);

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("sort", "updated")
            .append_pair("per_page", &request.page_size.to_string());
        if request.include_all {
            query.append_pair("type", "all");
        }
    }

    Ok(url)
}

/// Fetches the first page of an account's repositories, most recently updated first.
///
/// An account without repositories yields `Ok` with an empty vector.
///
/// # Errors
///
/// - [`FetchError::EmptyHandle`] for a blank account handle
/// - [`FetchError::Network`] on transport failure
/// - [`FetchError::Status`] if the API answers with a non-success status
/// - [`FetchError::MalformedResponse`] / [`FetchError::InvalidRecord`] for
///   payloads that are not a repository array
pub async fn fetch_repositories(
    octocrab: &Octocrab,
    api_base: &Url,
    request: &ListingRequest<'_>,
) -> Result<Vec<RepositoryRecord>, FetchError> {
    if request.account.trim().is_empty() {
        return Err(FetchError::EmptyHandle);
    }

    let url = listing_url(api_base, request)?;
    let span = info_span!(
        "fetch",
        account = %request.account,
        per_page = request.page_size,
        include_all = request.include_all
    );

    async {
        debug!(url = %url, "Requesting repository listing");

        let response = octocrab._get(url.as_str()).await?;
        let status = response.status();
        let body = octocrab.body_to_string(response).await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: record::api_message(&body),
            });
        }

        let records = parse_repositories(&body)?;
        info!(count = records.len(), "Fetched repositories");
        Ok(records)
    }
    .instrument(span)
    .await
}
