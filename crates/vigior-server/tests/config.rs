use std::collections::HashMap;
use std::path::PathBuf;

use tempfile::TempDir;

use vigior_engine::validation::InputPolicy;
use vigior_server::config::{
    load_config, resolve, save_config, ServerConfig, BIND_ADDR_ENV, CONFIG_ENV, DATA_FILE_ENV,
    DEFAULT_BIND_ADDR,
};

fn env_of(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_config_file() {
    let config = resolve(env_of(&[])).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.data_file, PathBuf::from("patients.jsonl"));
}

#[test]
fn env_overrides_win() {
    let config = resolve(env_of(&[
        (BIND_ADDR_ENV, "0.0.0.0:9000".to_string()),
        (DATA_FILE_ENV, "/var/lib/vigior/cases.jsonl".to_string()),
    ]))
    .unwrap();
    assert_eq!(config.bind_addr, "0.0.0.0:9000");
    assert_eq!(config.data_file, PathBuf::from("/var/lib/vigior/cases.jsonl"));
}

#[test]
fn missing_config_file_is_written_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf/vigior.json");

    let config = resolve(env_of(&[(CONFIG_ENV, path.display().to_string())])).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert!(path.exists());
    assert_eq!(load_config(&path).unwrap(), config);
}

#[test]
fn save_then_load_keeps_engine_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vigior.json");

    let mut config = ServerConfig::default();
    config.engine.input_policy = InputPolicy::Clamp;
    config.engine.model_id = "baseline".to_string();
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.engine.input_policy, InputPolicy::Clamp);
    assert_eq!(loaded.engine.model_id, "baseline");
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn pre_versioned_config_is_migrated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vigior.json");
    std::fs::write(
        &path,
        r#"{ "bind_addr": "127.0.0.1:7000", "model_id": "baseline", "input_policy": "pass_through" }"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.bind_addr, "127.0.0.1:7000");
    assert_eq!(config.engine.model_id, "baseline");
    assert_eq!(config.engine.input_policy, InputPolicy::PassThrough);
}

#[test]
fn newer_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vigior.json");
    std::fs::write(&path, r#"{ "config_version": 99 }"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build"));
}

#[test]
fn oversized_config_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vigior.json");
    // 2^32 + 1 would wrap to 1 if narrowed
    std::fs::write(&path, r#"{ "config_version": 4294967297 }"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build"));
}
