//! Maps repositories to a display category, tags and name.

use crate::fetch::RepositoryRecord;
use serde::Serialize;
use std::fmt;

/// Tag shown when a repository has neither a language nor a recognised topic.
pub const FALLBACK_TAG: &str = "Web Development";

/// Maximum number of topic tags added after the language tag.
const MAX_TOPIC_TAGS: usize = 2;

/// Topics recognised as technology tags (compared lowercase).
const RECOGNISED_TOPICS: &[&str] = &[
    "react",
    "vue",
    "angular",
    "node",
    "express",
    "mongodb",
    "mysql",
    "postgresql",
    "docker",
    "aws",
    "firebase",
    "typescript",
    "javascript",
    "html",
    "css",
    "python",
    "java",
    "php",
];

/// Portfolio filter category, emitted as the card's `data-category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Web projects; also the default for unmapped languages.
    Web,
    /// Mobile projects.
    Mobile,
}

impl Category {
    /// Returns the value used in `data-category`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
        }
    }

    /// Looks up the category for a primary language.
    ///
    /// Unknown and absent languages map to [`Category::Web`] so every
    /// repository still renders.
    #[must_use]
    pub fn for_language(language: Option<&str>) -> Self {
        match language {
            Some("Swift" | "Kotlin") => Self::Mobile,
            Some(
                "JavaScript" | "TypeScript" | "HTML" | "CSS" | "Python" | "Java" | "C#" | "PHP"
                | "Ruby" | "Go" | "Rust" | "React" | "Vue" | "Angular" | "Node.js",
            ) => Self::Web,
            _ => Self::Web,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository with its derived display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRepository {
    /// The fetched record.
    pub record: RepositoryRecord,

    /// Filter category.
    pub category: Category,

    /// One to three technology tags.
    pub display_tags: Vec<String>,

    /// Human-readable title derived from the repository name.
    pub display_name: String,
}

impl ClassifiedRepository {
    /// Classifies a record. Never fails.
    #[must_use]
    pub fn classify(record: RepositoryRecord) -> Self {
        let language = record.primary_language.as_deref();
        let category = Category::for_language(language);
        let display_tags = display_tags(language, &record.topics);
        let display_name = format_display_name(&record.name);

        Self {
            record,
            category,
            display_tags,
            display_name,
        }
    }
}

/// Computes the technology tags for a card.
///
/// The language comes first, then up to two recognised topics in their
/// original order and spelling. Falls back to [`FALLBACK_TAG`].
#[must_use]
pub fn display_tags(language: Option<&str>, topics: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = language.map(str::to_string).into_iter().collect();

    tags.extend(
        topics
            .iter()
            .filter(|topic| RECOGNISED_TOPICS.contains(&topic.to_lowercase().as_str()))
            .take(MAX_TOPIC_TAGS)
            .cloned(),
    );

    if tags.is_empty() {
        tags.push(FALLBACK_TAG.to_string());
    }

    tags
}

/// Turns `my-cool_project` into `My Cool Project`.
///
/// Each separator becomes one space, so runs of separators leave runs of
/// spaces.
#[must_use]
pub fn format_display_name(name: &str) -> String {
    name.replace(['-', '_'], " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn topics(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn mobile_languages() {
        assert_eq!(Category::for_language(Some("Swift")), Category::Mobile);
        assert_eq!(Category::for_language(Some("Kotlin")), Category::Mobile);
    }

    #[test]
    fn unmapped_and_missing_languages_are_web() {
        assert_eq!(Category::for_language(Some("Rust")), Category::Web);
        assert_eq!(Category::for_language(Some("Haskell")), Category::Web);
        assert_eq!(Category::for_language(None), Category::Web);
    }

    #[test]
    fn category_renders_lowercase() {
        assert_eq!(Category::Mobile.to_string(), "mobile");
        assert_eq!(
            serde_json::to_string(&Category::Web).unwrap(),
            "\"web\""
        );
    }

    #[test]
    fn language_then_two_recognised_topics() {
        let tags = display_tags(
            Some("TypeScript"),
            &topics(&["hacktoberfest", "React", "docker", "aws"]),
        );
        assert_eq!(tags, vec!["TypeScript", "React", "docker"]);
    }

    #[test]
    fn topics_without_language() {
        let tags = display_tags(None, &topics(&["firebase"]));
        assert_eq!(tags, vec!["firebase"]);
    }

    #[test]
    fn falls_back_when_nothing_matches() {
        assert_eq!(display_tags(None, &[]), vec![FALLBACK_TAG]);
        assert_eq!(
            display_tags(None, &topics(&["portfolio", "game"])),
            vec![FALLBACK_TAG]
        );
    }

    #[test]
    fn tags_are_never_empty_or_longer_than_three() {
        let languages = [None, Some("Go")];
        let topic_sets = [
            topics(&[]),
            topics(&["unknown"]),
            topics(&["react", "vue", "angular", "node"]),
        ];

        for language in languages {
            for set in &topic_sets {
                let tags = display_tags(language, set);
                assert!(!tags.is_empty());
                assert!(tags.len() <= 3);
            }
        }
    }

    #[test]
    fn formats_display_names() {
        assert_eq!(format_display_name("weather-app"), "Weather App");
        assert_eq!(format_display_name("my_cool-project"), "My Cool Project");
        assert_eq!(format_display_name("dotfiles"), "Dotfiles");
        assert_eq!(format_display_name("a--b"), "A  B");
        assert_eq!(format_display_name("éclair-shop"), "Éclair Shop");
    }

    #[test]
    fn classify_sparse_record() {
        let record = RepositoryRecord {
            name: "bare-repo".to_string(),
            description: None,
            primary_language: None,
            topics: Vec::new(),
            is_fork: false,
            popularity_score: 0,
            homepage_url: None,
            canonical_url: "https://github.com/octocat/bare-repo".to_string(),
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        let classified = ClassifiedRepository::classify(record);

        assert_eq!(classified.category, Category::Web);
        assert_eq!(classified.display_tags, vec![FALLBACK_TAG]);
        assert_eq!(classified.display_name, "Bare Repo");
    }
}
