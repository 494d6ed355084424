use std::fs;
use std::path::PathBuf;

use fimon::config::merge::service::MergeService;
use fimon::config::sources::legacy_env::LegacyEnvironment;
use fimon::config::{ConfigLoader, ConfigOverrides};
use fimon::scan::HashAlgorithm;
use tempfile::TempDir;

fn write_config(temp: &TempDir, body: &str) -> PathBuf {
    let path = temp.path().join("fimon.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn explicit_file_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
[monitor]
root = "/srv/data"
interval_secs = 30
ignore_patterns = ["*.swp"]
hash_algorithm = "blake3"

[notify]
endpoint = "https://relay.example.com/send"
username = "ops@example.com"
"#,
    );

    let no_legacy = LegacyEnvironment::from_vars(Vec::<(String, String)>::new());
    let config = MergeService::load_with_legacy(Some(&path), no_legacy).unwrap();
    assert_eq!(config.monitor.root, PathBuf::from("/srv/data"));
    assert_eq!(config.monitor.interval_secs, 30);
    assert_eq!(config.monitor.ignore_patterns, vec!["*.swp".to_string()]);
    assert_eq!(config.monitor.hash_algorithm, HashAlgorithm::Blake3);
    assert_eq!(config.storage.baseline_file, PathBuf::from("baseline.json"));
    assert_eq!(config.notify.timeout_secs, 20);
    assert!(config.notify.password.is_none());
}

#[test]
fn legacy_names_override_the_file() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[monitor]\nroot = \"/from/file\"\ninterval_secs = 30\n");

    let legacy = LegacyEnvironment::from_vars([
        ("MONITOR_DIR", "/from/env"),
        ("CHECK_INTERVAL", "5"),
        ("EMAIL_PASS", "secret"),
    ]);
    let config = MergeService::load_with_legacy(Some(&path), legacy).unwrap();
    assert_eq!(config.monitor.root, PathBuf::from("/from/env"));
    assert_eq!(config.monitor.interval_secs, 5);
    assert_eq!(config.notify.password.as_deref(), Some("secret"));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.toml");
    assert!(ConfigLoader::load(Some(&missing)).is_err());
}

#[test]
fn overrides_are_applied_then_validated() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[monitor]\ninterval_secs = 30\n");

    let config = ConfigLoader::load_with_overrides(
        Some(&path),
        &ConfigOverrides {
            root: Some(PathBuf::from("/srv/cli")),
            interval_secs: Some(2),
            ..ConfigOverrides::default()
        },
    )
    .unwrap();
    assert_eq!(config.monitor.root, PathBuf::from("/srv/cli"));
    assert_eq!(config.monitor.interval_secs, 2);

    let rejected = ConfigLoader::load_with_overrides(
        Some(&path),
        &ConfigOverrides {
            interval_secs: Some(0),
            ..ConfigOverrides::default()
        },
    );
    assert!(rejected.is_err());
}
