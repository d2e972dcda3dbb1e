//! Run summary types.

mod run_summary;

pub use run_summary::{ProjectSummary, RunSummary};
