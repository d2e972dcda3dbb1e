#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod classify;
pub mod config;
pub mod fetch;
pub mod patch;
pub mod runner;
pub mod search;
pub mod selection;
pub mod stamp;
pub mod summary;
pub mod templates;

#[cfg(test)]
mod test_support;

pub use classify::{Category, ClassifiedRepository};
pub use config::{ConfigError, PortfolioConfig};
pub use fetch::{fetch_repositories, FetchError, ListingRequest, RepositoryRecord};
pub use patch::{patch_document, InsertionRegion, PatchError};
pub use runner::{publish, render_cards, RenderedCards, Runner, RunnerConfig, RunnerError};
pub use search::{search_repositories, SearchReport};
pub use selection::{select_repositories, Selection, SelectionError};
pub use stamp::{version_token, AssetStamper, StampError, StampOutcome};
pub use summary::{ProjectSummary, RunSummary};
pub use templates::{SnippetRenderer, TemplateError};
