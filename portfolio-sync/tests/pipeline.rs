use std::fs;
use std::path::{Path, PathBuf};

use portfolio_sync::stamp::DEFAULT_VERSIONED_ASSETS;
use portfolio_sync::templates::FALLBACK_DESCRIPTION;
use portfolio_sync::{
    fetch::parse_repositories, publish, runner::renderer_for, AssetStamper, Category,
    PortfolioConfig, RunnerConfig, RunnerError, StampOutcome,
};
use tempfile::TempDir;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixtures_root().join(name)).unwrap()
}

/// Copies the fixture page into a scratch directory next to a config file.
fn site(temp: &TempDir, config: &str) -> (RunnerConfig, PathBuf) {
    let document = temp.path().join("portfolio.html");
    fs::write(&document, fixture("portfolio.html")).unwrap();
    let config_path = temp.path().join("portfolio.toml");
    fs::write(&config_path, config).unwrap();

    let portfolio = PortfolioConfig::load(&config_path).unwrap();
    (RunnerConfig::from_portfolio(&portfolio).unwrap(), document)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn publishes_fixture_listing() {
    let temp = TempDir::new().unwrap();
    let (config, document) = site(&temp, "");
    let renderer = renderer_for(&config).unwrap();
    let records = parse_repositories(&fixture("repos.json")).unwrap();

    let summary = publish(&config, &renderer, "octocat", records).unwrap();

    let names: Vec<&str> = summary
        .projects
        .iter()
        .map(|p| p.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["Car Market", "Weather App", "Blog", "Dotfiles"]);
    assert_eq!(summary.repositories_fetched, 5);
    assert_eq!(summary.forks_skipped, 1);
    assert_eq!(summary.count_in(Category::Mobile), 1);
    assert_eq!(summary.document, document);

    let content = read(&document);
    assert!(!content.contains("Old Project"));
    assert!(!content.contains("octocat/linux"));
    assert!(content.contains(
        r#"<span class="tech-tag">TypeScript</span><span class="tech-tag">react</span><span class="tech-tag">mongodb</span>"#
    ));
    assert!(content.contains(r#"<a href="https://cars.example.com" class="project-link""#));
    // Empty homepage falls back to the repository page.
    assert_eq!(
        content
            .matches(r#"href="https://github.com/octocat/weather_app""#)
            .count(),
        2
    );
    assert!(content.contains(&format!("<p>{FALLBACK_DESCRIPTION}</p>")));
    assert!(content.contains(r#"<span class="tech-tag">Web Development</span>"#));
    assert!(content.contains("<!-- Project 4 -->"));
    assert!(content.ends_with(
        "            </div>\n        </div>\n    </section>\n    <script src=\"script.js\"></script>\n</body>\n</html>\n"
    ));
}

#[test]
fn republishing_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let (config, document) = site(&temp, "");
    let renderer = renderer_for(&config).unwrap();

    let records = parse_repositories(&fixture("repos.json")).unwrap();
    publish(&config, &renderer, "octocat", records.clone()).unwrap();
    let first = read(&document);
    publish(&config, &renderer, "octocat", records).unwrap();

    assert_eq!(read(&document), first);
}

#[test]
fn custom_markers_and_template() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("card.hbs"), "<li>{{display_name}} ({{category}})</li>").unwrap();
    let (config, _) = site(
        &temp,
        r#"
target-document = "work.html"
start-marker = "<ul id=\"work\">"
end-marker = "</ul>"
display-count = 2
snippet-template = "card.hbs"
"#,
    );
    let document = temp.path().join("work.html");
    fs::write(&document, "<ul id=\"work\">\n<li>stale</li>\n</ul>\n").unwrap();
    let renderer = renderer_for(&config).unwrap();
    let records = parse_repositories(&fixture("repos.json")).unwrap();

    publish(&config, &renderer, "octocat", records).unwrap();

    assert_eq!(
        read(&document),
        "<ul id=\"work\">\n<li>Car Market (web)</li>\n<li>Weather App (mobile)</li>\n</ul>\n"
    );
}

#[test]
fn fork_only_listing_changes_nothing() {
    let temp = TempDir::new().unwrap();
    let (config, document) = site(&temp, "");
    let renderer = renderer_for(&config).unwrap();
    let records: Vec<_> = parse_repositories(&fixture("repos.json"))
        .unwrap()
        .into_iter()
        .filter(|r| r.is_fork)
        .collect();

    let result = publish(&config, &renderer, "octocat", records);

    assert!(matches!(result, Err(RunnerError::Selection(_))));
    assert_eq!(read(&document), fixture("portfolio.html"));
}

#[test]
fn stamps_fixture_page() {
    let temp = TempDir::new().unwrap();
    let (_, document) = site(&temp, "");
    let stamper = AssetStamper::new(DEFAULT_VERSIONED_ASSETS, "1704067200000").unwrap();

    let outcomes = stamper.stamp_files(&[document.clone()]);

    assert_eq!(
        outcomes,
        vec![StampOutcome::Updated {
            path: document.clone(),
            links: 2
        }]
    );
    let content = read(&document);
    assert!(content.contains(r#"href="styles.css?v=1704067200000""#));
    assert!(content.contains(r#"src="script.js?v=1704067200000""#));
}
