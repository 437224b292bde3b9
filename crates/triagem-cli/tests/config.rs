use serde_json::json;

use triagem_cli::config::{
    self, CURRENT_VERSION, ConfigError, LogFormat, TriagemConfig, load_config, load_or_default,
    save_config,
};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_or_default(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, TriagemConfig::default());
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.session_max_age(), jiff::SignedDuration::from_hours(24));
}

#[test]
fn save_then_load_keeps_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = TriagemConfig {
        data_dir: dir.path().join("data"),
        min_questions: 5,
        catalog_path: Some(dir.path().join("catalog.json")),
        session_max_age_hours: 2,
        log_filter: "triagem_session=debug".to_string(),
        log_format: LogFormat::Json,
        ..TriagemConfig::default()
    };
    save_config(&path, &config).unwrap();

    assert!(!path.with_extension("json.tmp").exists());
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.history_path(), dir.path().join("data").join("history.jsonl"));
    assert_eq!(loaded.catalog_policy().min_questions, 5);
}

#[test]
fn save_stamps_current_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = TriagemConfig {
        config_version: 0,
        ..TriagemConfig::default()
    };
    save_config(&path, &config).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["config_version"], json!(CURRENT_VERSION));
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, json!({ "data_dir": "/tmp/triagem" }).to_string()).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.min_questions, 10);
    assert_eq!(config.session_max_age_hours, 24);
    assert_eq!(config.log_filter, "warn");
    assert_eq!(config.log_format, LogFormat::Text);
    assert!(config.catalog_path.is_none());
}

#[test]
fn migration_keeps_values_already_present() {
    let migrated = config::migrate(
        json!({ "data_dir": "/d", "min_questions": 3, "log_format": "json" }),
        0,
    )
    .unwrap();
    assert_eq!(migrated["min_questions"], json!(3));
    assert_eq!(migrated["log_format"], json!("json"));
    assert_eq!(migrated["config_version"], json!(1));
}

#[test]
fn newer_config_is_refused() {
    let err = config::migrate(json!({}), CURRENT_VERSION + 1).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedVersion { .. }));
}

#[test]
fn non_object_config_is_refused() {
    let err = config::migrate(json!([1, 2]), 0).unwrap_err();
    assert!(matches!(err, ConfigError::NotAnObject));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
}
