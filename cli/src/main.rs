//! CLI for portfolio-sync.
//!
//! Fetches a GitHub account's repositories and writes the most starred ones
//! into a static portfolio page as project cards.

use chrono::Utc;
use clap::{Parser, Subcommand};
use portfolio_sync::config::{self, PortfolioConfig, CONFIG_ENV_VAR};
use portfolio_sync::{
    version_token, AssetStamper, RenderedCards, RunSummary, Runner, RunnerConfig, RunnerError,
    SearchReport, StampOutcome,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Portfolio Sync - Keep a portfolio page's projects grid in step with GitHub.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the portfolio.toml config file.
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch repositories and patch the portfolio page.
    Run {
        /// GitHub account whose repositories are shown.
        account: String,

        /// Document to patch instead of the configured one.
        #[arg(long)]
        document: Option<PathBuf>,
    },

    /// Print the generated project cards without writing anything.
    Preview {
        /// GitHub account whose repositories are shown.
        account: String,
    },

    /// Search every repository of an account (forks included) for keywords.
    Search {
        /// GitHub account to search.
        account: String,

        /// Keyword matched against names and descriptions; repeatable.
        #[arg(long = "keyword", short = 'k')]
        keywords: Vec<String>,
    },

    /// Append a cache-busting version to asset links.
    Stamp {
        /// HTML files to stamp (defaults to the configured documents).
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // The TLS connector needs a process-wide crypto provider
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let cli = Cli::parse();

    let config = match config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Command::Run { account, document } => run(&config, &account, document)
            .await
            .map(|summary| print_summary(&summary)),
        Command::Preview { account } => preview(&config, &account)
            .await
            .map(|cards| print_preview(&cards)),
        Command::Search { account, keywords } => search(&config, &account, &keywords)
            .await
            .map(|report| print_search(&report, &keywords)),
        Command::Stamp { files } => return stamp(&config, files),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            if let Some(hint) = e.hint() {
                eprintln!("Hint: {hint}");
            }
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn runner(config: &PortfolioConfig, document: Option<PathBuf>) -> Result<Runner, RunnerError> {
    let mut runner_config = RunnerConfig::from_portfolio(config)?;
    if let Some(document) = document {
        runner_config = runner_config.with_document(document);
    }
    Runner::new(runner_config)
}

async fn run(
    config: &PortfolioConfig,
    account: &str,
    document: Option<PathBuf>,
) -> Result<RunSummary, RunnerError> {
    runner(config, document)?.run(account).await
}

async fn preview(config: &PortfolioConfig, account: &str) -> Result<RenderedCards, RunnerError> {
    runner(config, None)?.preview(account).await
}

async fn search(
    config: &PortfolioConfig,
    account: &str,
    keywords: &[String],
) -> Result<SearchReport, RunnerError> {
    runner(config, None)?.search(account, keywords).await
}

fn stamp(config: &PortfolioConfig, files: Vec<PathBuf>) -> ExitCode {
    let files = if files.is_empty() {
        config.asset_documents.clone()
    } else {
        files
    };

    let version = version_token(Utc::now());
    let stamper = match AssetStamper::new(config.versioned_assets.as_slice(), version) {
        Ok(stamper) => stamper,
        Err(e) => {
            error!(error = %e, "Failed to prepare asset patterns");
            return ExitCode::from(1);
        }
    };

    println!("Version: {}", stamper.version());
    let outcomes = stamper.stamp_files(&files);
    let mut failed = false;

    for outcome in &outcomes {
        match outcome {
            StampOutcome::Updated { path, links } => {
                println!("  Updated {} ({links} links)", path.display());
            }
            StampOutcome::Unchanged { path } => {
                println!("  No asset links in {}", path.display());
            }
            StampOutcome::Skipped { path } => {
                warn!(path = %path.display(), "File not found, skipped");
            }
            StampOutcome::Failed { path, error } => {
                println!("  Failed {}: {error}", path.display());
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Account: {}", summary.account);
    println!("  Repositories fetched: {}", summary.repositories_fetched);
    println!("  Forks skipped: {}", summary.forks_skipped);
    println!("  Document: {}", summary.document.display());
    println!("  Projects:");

    for (position, project) in summary.projects.iter().enumerate() {
        println!(
            "    {}. {} ({}, {})",
            position + 1,
            project.display_name,
            project.language.as_deref().unwrap_or("no language"),
            project.category
        );
    }
}

fn print_preview(cards: &RenderedCards) {
    println!("{}", cards.markup);
}

fn print_search(report: &SearchReport, keywords: &[String]) {
    if report.match_count() > 0 {
        println!(
            "Found {} repositories matching {}:\n",
            report.match_count(),
            keywords.join(", ")
        );
        for repo in report.matches() {
            println!("{}", repo.name);
            println!(
                "  Description: {}",
                repo.description.as_deref().unwrap_or("No description")
            );
            println!(
                "  Language: {}",
                repo.primary_language.as_deref().unwrap_or("Not specified")
            );
            println!("  URL: {}", repo.canonical_url);
            println!("  Fork: {}", if repo.is_fork { "yes" } else { "no" });
            println!("  Updated: {}", repo.last_updated.format("%Y-%m-%d"));
            println!();
        }
        return;
    }

    println!("No matching repositories. All repositories:\n");
    for repo in &report.repositories {
        println!(
            "  {} ({}) - {}",
            repo.name,
            repo.primary_language.as_deref().unwrap_or("Not specified"),
            if repo.is_fork { "Fork" } else { "Original" }
        );
    }
}
