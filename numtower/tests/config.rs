//! Configuration loading

use numtower::{AngleUnit, ConfigLoader, LogLevel, PoolPreset, TowerConfig};
use numtower::pool::PoolConfig;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_yaml_file_loading() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".numtower.yaml");
    fs::write(
        &path,
        "pool:\n  preset: low-memory\n  max_capacity: 512\nlogging:\n  level: debug\nangle: degrees\n",
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.pool.preset, Some(PoolPreset::LowMemory));
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert!(config.logging.enabled);
    assert_eq!(config.angle, AngleUnit::Degrees);

    let pool = config.pool.resolve().unwrap();
    assert_eq!(pool.max_capacity, 512);
    assert_eq!(pool.initial_capacity, PoolConfig::low_memory().initial_capacity);
}

#[test]
fn test_json_and_toml_files() {
    let temp_dir = TempDir::new().unwrap();

    let json = temp_dir.path().join("numtower.config.json");
    fs::write(&json, r#"{"angle": "gradians", "logging": {"enabled": false}}"#).unwrap();
    let config = ConfigLoader::load_from_file(&json).unwrap();
    assert_eq!(config.angle, AngleUnit::Gradians);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, LogLevel::Info);

    let toml = temp_dir.path().join("numtower.config.toml");
    fs::write(&toml, "angle = \"degrees\"\n\n[pool]\nverify_on_release = true\n").unwrap();
    let config = ConfigLoader::load_from_file(&toml).unwrap();
    assert_eq!(config.angle, AngleUnit::Degrees);
    assert!(config.pool.resolve().unwrap().verify_on_release);
}

#[test]
fn test_unknown_extension_is_auto_detected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("numtowerrc");
    fs::write(&path, "angle: gradians\n").unwrap();
    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.angle, AngleUnit::Gradians);
}

#[test]
fn test_malformed_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn test_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("saved.yaml");

    let mut config = TowerConfig::default();
    config.pool.preset = Some(PoolPreset::Debug);
    config.angle = AngleUnit::Degrees;
    ConfigLoader::save_to_file(&config, &path).unwrap();

    assert_eq!(ConfigLoader::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_overrides() {
    let vars: HashMap<&str, &str> = [
        ("NUMTOWER_POOL_PRESET", "high-throughput"),
        ("NUMTOWER_POOL_MAX_CAPACITY", "2048"),
        ("NUMTOWER_POOL_INITIAL_CAPACITY", "not a number"),
        ("NUMTOWER_POOL_VERIFY", "yes"),
        ("NUMTOWER_LOG_LEVEL", "WARN"),
        ("NUMTOWER_ANGLE_UNIT", "deg"),
    ]
    .into_iter()
    .collect();

    let mut config = TowerConfig::default();
    ConfigLoader::apply_overrides(&mut config, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(config.pool.preset, Some(PoolPreset::HighThroughput));
    assert_eq!(config.pool.max_capacity, Some(2048));
    assert_eq!(config.pool.initial_capacity, None);
    assert_eq!(config.pool.verify_on_release, Some(true));
    assert_eq!(config.logging.level, LogLevel::Warn);
    assert_eq!(config.angle, AngleUnit::Degrees);

    let pool = config.pool.resolve().unwrap();
    assert_eq!(pool.initial_capacity, PoolConfig::high_throughput().initial_capacity);
    assert_eq!(pool.max_capacity, 2048);
}

#[test]
fn test_invalid_pool_overrides_are_rejected() {
    let mut config = TowerConfig::default();
    config.pool.initial_capacity = Some(100);
    config.pool.max_capacity = Some(10);
    assert!(config.pool.resolve().is_err());
}

#[test]
fn test_sample_config_parses() {
    let sample = ConfigLoader::generate_sample_config();
    let parsed: TowerConfig = serde_yaml::from_str(&sample).unwrap();
    assert_eq!(parsed, TowerConfig::default());
}
