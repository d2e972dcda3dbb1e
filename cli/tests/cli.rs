use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("portfolio-sync").unwrap();
    cmd.env_remove("PORTFOLIO_SYNC_CONFIG");
    cmd
}

#[test]
fn missing_account_is_a_usage_error() {
    let temp = TempDir::new().unwrap();

    cli()
        .current_dir(temp.path())
        .arg("run")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    cli().assert().failure().code(2);
}

#[test]
fn invalid_config_fails_before_any_request() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("portfolio.toml");
    fs::write(&config, "display-count = 0\n").unwrap();

    cli()
        .current_dir(temp.path())
        .args(["--config", config.to_str().unwrap(), "run", "octocat"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn stamps_documents_in_working_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("index.html"),
        r#"<link href="styles.css?v=1"><script src="script.js"></script>"#,
    )
    .unwrap();

    cli()
        .current_dir(temp.path())
        .arg("stamp")
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join("index.html")).unwrap();
    assert!(!content.contains("styles.css?v=1\""));
    assert!(content.contains("styles.css?v="));
    assert!(content.contains("script.js?v="));
}

#[test]
fn stamps_named_files_only() {
    let temp = TempDir::new().unwrap();
    let page = temp.path().join("landing.html");
    let untouched = temp.path().join("index.html");
    fs::write(&page, r#"<link href="styles.css">"#).unwrap();
    fs::write(&untouched, r#"<link href="styles.css">"#).unwrap();

    cli()
        .current_dir(temp.path())
        .arg("stamp")
        .arg(&page)
        .assert()
        .success();

    assert!(fs::read_to_string(&page).unwrap().contains("styles.css?v="));
    assert_eq!(
        fs::read_to_string(&untouched).unwrap(),
        r#"<link href="styles.css">"#
    );
}
