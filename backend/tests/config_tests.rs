//! Configuration loading from the process environment.

mod support;

use celestial_watch::config::{AppConfig, ConfigError};
use celestial_watch::db::RepositoryType;
use celestial_watch::models::ScoringPolicy;

const KEYS: [&str; 7] = [
    "HOST",
    "PORT",
    "ALLOWED_ORIGINS",
    "MAX_IMAGE_SIZE_MB",
    "SCORING_POLICY",
    "REPOSITORY_TYPE",
    "MAX_SESSIONS",
];

fn cleared<'a>(overrides: &[(&'a str, &'a str)]) -> Vec<(&'a str, Option<&'a str>)> {
    KEYS.iter()
        .map(|key| {
            let value = overrides.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
            (*key, value)
        })
        .collect()
}

#[test]
fn test_load_without_env_uses_defaults() {
    let config = support::with_scoped_env(&cleared(&[]), AppConfig::load).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_applies_env() {
    let env = cleared(&[
        ("HOST", "127.0.0.1"),
        ("PORT", "8081"),
        ("ALLOWED_ORIGINS", "https://sky.example"),
        ("SCORING_POLICY", "continuous"),
        ("REPOSITORY_TYPE", "local"),
        ("MAX_SESSIONS", "64"),
    ]);
    let config = support::with_scoped_env(&env, AppConfig::load).unwrap();

    assert_eq!(config.bind_address(), "127.0.0.1:8081");
    assert_eq!(config.server.allowed_origins, vec!["https://sky.example"]);
    assert_eq!(config.scoring.policy, ScoringPolicy::Continuous);
    assert_eq!(config.repository.repo_type, RepositoryType::Local);
    assert_eq!(config.repository.max_sessions, 64);
}

#[test]
fn test_load_rejects_bad_env() {
    let env = cleared(&[("MAX_IMAGE_SIZE_MB", "-1")]);
    let err = support::with_scoped_env(&env, AppConfig::load).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "max_image_size_mb",
            ..
        }
    ));
}

#[test]
fn test_example_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/celestial.example.toml");
    let config = AppConfig::from_file(path).unwrap();
    assert_eq!(config.server.port, 3001);
    assert_eq!(config.scoring.policy, ScoringPolicy::Additive);
    assert_eq!(config.repository.max_sessions, 10_000);
}
