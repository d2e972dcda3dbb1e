//! Configuration loading.
//!
//! Settings live in an optional `portfolio.toml`. The file is located in this
//! order:
//!
//! 1. An explicit path (the CLI's `--config`)
//! 2. The `PORTFOLIO_SYNC_CONFIG` environment variable
//! 3. `portfolio.toml` in the working directory, if present
//!
//! When none apply, built-in defaults are used.

mod error;
mod portfolio;

pub use error::ConfigError;
pub use portfolio::PortfolioConfig;

use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "PORTFOLIO_SYNC_CONFIG";

/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

/// Determines which config file applies, if any.
#[must_use]
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(value) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(value));
    }

    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.exists().then_some(fallback)
}

/// Loads the applicable config, falling back to defaults.
///
/// An explicitly named file (argument or environment variable) must exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the selected file cannot be loaded.
pub fn resolve(explicit: Option<&Path>) -> Result<PortfolioConfig, ConfigError> {
    match config_path(explicit) {
        Some(path) => {
            let config = PortfolioConfig::load(&path)?;
            info!(path = %path.display(), "Loaded config");
            Ok(config)
        }
        None => Ok(PortfolioConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_wins_over_environment() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("explicit.toml");
        let from_env = temp.path().join("env.toml");

        temp_env::with_var(CONFIG_ENV_VAR, Some(&from_env), || {
            assert_eq!(config_path(Some(&explicit)), Some(explicit.clone()));
            assert_eq!(config_path(None), Some(from_env.clone()));
        });
    }

    #[test]
    fn environment_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");

        temp_env::with_var(CONFIG_ENV_VAR, Some(&missing), || {
            assert!(matches!(resolve(None), Err(ConfigError::MissingFile { .. })));
        });
    }

    #[test]
    fn resolves_from_environment() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "display-count = 4\n").unwrap();

        temp_env::with_var(CONFIG_ENV_VAR, Some(&path), || {
            let config = resolve(None).unwrap();
            assert_eq!(config.display_count, 4);
            assert_eq!(config.target_document, temp.path().join("portfolio.html"));
        });
    }

    #[test]
    fn empty_environment_variable_is_ignored() {
        temp_env::with_var(CONFIG_ENV_VAR, Some(""), || {
            let path = config_path(None);
            assert!(path.is_none() || path == Some(PathBuf::from(DEFAULT_CONFIG_FILE)));
        });
    }
}
