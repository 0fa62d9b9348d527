// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_uses_defaults() {
    let config = Config::parse("backend = \"gitlab\"\nurl = \"https://gitlab.example.com\"\n").unwrap();
    assert_eq!(config.backend, Backend::Gitlab);
    assert_eq!(config.url, "https://gitlab.example.com");
    assert_eq!(config.api_version, None);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert!(config.discovery);
}

#[test]
fn test_parse_full() {
    let content = r#"
backend = "jira"
url = "https://jira.example.com"
api_version = "3"
login = "alice"
password = "secret"
timeout_secs = 5
page_size = 10
discovery = false
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.backend, Backend::Jira);
    assert_eq!(config.api_version.as_deref(), Some("3"));
    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(config.page_size, 10);
    assert!(!config.discovery);
    assert!(config.credentials().needs_login());
}

#[test]
fn test_parse_unknown_backend() {
    let err = Config::parse("backend = \"svn\"\nurl = \"https://x\"\n").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_parse_empty_url() {
    let err = Config::parse("backend = \"github\"\nurl = \"\"\n").unwrap_err();
    assert!(err.to_string().contains("url"));
}

#[test]
fn test_debug_masks_secrets() {
    let mut config = Config::new(Backend::Github, "https://api.github.com");
    config.token = Some("ghp_supersecret".to_string());
    let debug = format!("{:?}", config);
    assert!(!debug.contains("ghp_supersecret"));
}

#[test]
fn test_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    let mut config = Config::new(Backend::Gitlab, "https://gitlab.example.com");
    config.api_version = Some("4".to_string());
    config.page_size = 20;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(&temp.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}

#[test]
fn test_find_config_explicit_wins() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");
    assert_eq!(find_config(Some(&path)).unwrap(), path);
    assert_eq!(search_paths(Some(&path)), vec![path]);
}

#[test]
fn test_resolve_applies_env_overrides() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "backend = \"gitlab\"\nurl = \"https://gitlab.example.com\"\ntoken = \"from-file\"\n",
    )
    .unwrap();

    std::env::set_var("TSYNC_TOKEN", "from-env");
    let config = Config::resolve(Some(&path)).unwrap();
    std::env::remove_var("TSYNC_TOKEN");

    assert_eq!(config.token.as_deref(), Some("from-env"));
}

#[test]
fn test_credentials_from_config() {
    let mut config = Config::new(Backend::Gitlab, "https://gitlab.example.com");
    config.email = Some("alice@example.com".to_string());
    config.password = Some("pw".to_string());
    let credentials = config.credentials();
    assert_eq!(credentials.user(), Some("alice@example.com"));
    assert!(credentials.needs_login());
}
