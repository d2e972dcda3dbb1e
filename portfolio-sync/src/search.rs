//! Keyword search over an account's full repository list.

use crate::fetch::RepositoryRecord;

/// Page size used when listing every repository, forks included.
pub const SEARCH_PAGE_SIZE: u8 = 100;

/// Outcome of a keyword search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Every repository that was scanned, in fetch order.
    pub repositories: Vec<RepositoryRecord>,

    /// Indices into `repositories` of the matches.
    matches: Vec<usize>,
}

impl SearchReport {
    /// Repositories whose name or description contains a keyword.
    pub fn matches(&self) -> impl Iterator<Item = &RepositoryRecord> {
        self.matches.iter().map(|&i| &self.repositories[i])
    }

    /// Number of matching repositories.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Scans repositories for keywords (case-insensitive substring match against
/// the name and the description). Blank keywords are ignored.
#[must_use]
pub fn search_repositories<S: AsRef<str>>(
    repositories: Vec<RepositoryRecord>,
    keywords: &[S],
) -> SearchReport {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let matches = repositories
        .iter()
        .enumerate()
        .filter(|(_, repo)| matches_any(repo, &keywords))
        .map(|(i, _)| i)
        .collect();

    SearchReport {
        repositories,
        matches,
    }
}

fn matches_any(repo: &RepositoryRecord, keywords: &[String]) -> bool {
    let name = repo.name.to_lowercase();
    let description = repo
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    keywords
        .iter()
        .any(|k| name.contains(k.as_str()) || description.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo(name: &str, description: Option<&str>, fork: bool) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            description: description.map(str::to_string),
            primary_language: None,
            topics: Vec::new(),
            is_fork: fork,
            popularity_score: 0,
            homepage_url: None,
            canonical_url: format!("https://github.com/octocat/{name}"),
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<RepositoryRecord> {
        vec![
            repo("CarMarket", None, false),
            repo("blog", Some("Personal blog about AUTOmation"), true),
            repo("todo", Some("A todo list"), false),
        ]
    }

    #[test]
    fn matches_name_and_description_case_insensitively() {
        let report = search_repositories(sample(), &["car", "auto"]);

        let names: Vec<&str> = report.matches().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["CarMarket", "blog"]);
        assert_eq!(report.match_count(), 2);
        assert_eq!(report.repositories.len(), 3);
    }

    #[test]
    fn forks_are_searched_too() {
        let report = search_repositories(sample(), &["automation"]);
        assert!(report.matches().all(|r| r.is_fork));
        assert_eq!(report.match_count(), 1);
    }

    #[test]
    fn no_keywords_match_nothing() {
        let report = search_repositories(sample(), &[" ", ""]);
        assert_eq!(report.match_count(), 0);

        let empty: [&str; 0] = [];
        assert_eq!(search_repositories(sample(), &empty).match_count(), 0);
    }
}
