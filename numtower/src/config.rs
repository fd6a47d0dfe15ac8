//! Configuration for numtower
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. The first configuration file found (`.numtower.yaml`, `numtower.config.toml`, ...)
//! 3. `NUMTOWER_*` environment variables

use anyhow::{Context, Result};
use log::{debug, info, warn};
use numtower_pool::PoolConfig;
pub use numtower_pool::PoolPreset;
use numtower_runtime::AngleUnit;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main numtower configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    /// Matrix element pool sizing
    pub pool: PoolSection,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Unit assumed by the default angle conversions
    pub angle: AngleUnit,
}

/// Pool preset plus individual overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSection {
    pub preset: Option<PoolPreset>,
    pub initial_capacity: Option<usize>,
    pub max_capacity: Option<usize>,
    pub buffer_capacity: Option<usize>,
    pub verify_on_release: Option<bool>,
    pub collect_statistics: Option<bool>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Install the logging subscriber during `init`
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log level
    #[serde(default)]
    pub level: LogLevel,
}

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
        }
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

impl PoolSection {
    /// Apply the overrides on top of the preset and validate the result
    pub fn resolve(&self) -> Result<PoolConfig> {
        let mut config = self.preset.map(PoolPreset::config).unwrap_or_default();
        if let Some(initial) = self.initial_capacity {
            config.initial_capacity = initial;
        }
        if let Some(max) = self.max_capacity {
            config.max_capacity = max;
        }
        if let Some(buffer) = self.buffer_capacity {
            config.buffer_capacity = buffer;
        }
        if let Some(verify) = self.verify_on_release {
            config.verify_on_release = verify;
        }
        if let Some(stats) = self.collect_statistics {
            config.collect_statistics = stats;
        }

        config
            .validate()
            .map_err(|msg| anyhow::anyhow!("Invalid pool configuration: {msg}"))?;
        Ok(config)
    }
}

/// Configuration loader with multiple source support
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<TowerConfig> {
        let mut config = Self::load_from_files()?;
        Self::apply_environment_variables(&mut config);
        Ok(config)
    }

    fn load_from_files() -> Result<TowerConfig> {
        for path in Self::find_config_files() {
            if path.exists() {
                info!("Loading configuration from: {}", path.display());
                return Self::load_from_file(&path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(TowerConfig::default())
    }

    /// Candidate configuration files in order of preference
    pub fn find_config_files() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(config_path) = env::var("NUMTOWER_CONFIG") {
            paths.push(PathBuf::from(config_path));
        }

        if let Ok(current_dir) = env::current_dir() {
            for name in [
                ".numtower.yaml",
                ".numtower.yml",
                ".numtower.json",
                ".numtower.toml",
                "numtower.config.yaml",
                "numtower.config.yml",
                "numtower.config.json",
                "numtower.config.toml",
            ] {
                paths.push(current_dir.join(name));
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            for name in [".numtower.yaml", ".numtower.yml", ".numtower.json"] {
                paths.push(home_dir.join(name));
            }
            for name in ["config.yaml", "config.yml", "config.json", "config.toml"] {
                paths.push(home_dir.join(".config").join("numtower").join(name));
            }
        }

        paths
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<TowerConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            _ => {
                if let Ok(config) = serde_yaml::from_str(&content) {
                    config
                } else if let Ok(config) = serde_json::from_str(&content) {
                    config
                } else {
                    return Err(anyhow::anyhow!(
                        "Could not parse config file {} (tried YAML, JSON)",
                        path.display()
                    ));
                }
            }
        };

        Ok(config)
    }

    /// Apply `NUMTOWER_*` environment variable overrides
    pub fn apply_environment_variables(config: &mut TowerConfig) {
        Self::apply_overrides(config, |key| env::var(key).ok());
    }

    /// Apply overrides read through `lookup`; unparseable values are ignored
    pub fn apply_overrides<F>(config: &mut TowerConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(preset) = lookup("NUMTOWER_POOL_PRESET") {
            match preset.parse::<PoolPreset>() {
                Ok(preset) => config.pool.preset = Some(preset),
                Err(err) => warn!("Ignoring NUMTOWER_POOL_PRESET: {err}"),
            }
        }

        if let Some(max) = lookup("NUMTOWER_POOL_MAX_CAPACITY") {
            match max.parse() {
                Ok(max) => config.pool.max_capacity = Some(max),
                Err(_) => warn!("Ignoring NUMTOWER_POOL_MAX_CAPACITY=`{max}`"),
            }
        }

        if let Some(initial) = lookup("NUMTOWER_POOL_INITIAL_CAPACITY") {
            match initial.parse() {
                Ok(initial) => config.pool.initial_capacity = Some(initial),
                Err(_) => warn!("Ignoring NUMTOWER_POOL_INITIAL_CAPACITY=`{initial}`"),
            }
        }

        if let Some(verify) = lookup("NUMTOWER_POOL_VERIFY") {
            match parse_bool(&verify) {
                Some(verify) => config.pool.verify_on_release = Some(verify),
                None => warn!("Ignoring NUMTOWER_POOL_VERIFY=`{verify}`"),
            }
        }

        if let Some(level) = lookup("NUMTOWER_LOG_LEVEL") {
            match LogLevel::parse(&level) {
                Some(level) => config.logging.level = level,
                None => warn!("Ignoring NUMTOWER_LOG_LEVEL=`{level}`"),
            }
        }

        if let Some(unit) = lookup("NUMTOWER_ANGLE_UNIT") {
            match unit.parse() {
                Ok(unit) => config.angle = unit,
                Err(err) => warn!("Ignoring NUMTOWER_ANGLE_UNIT: {err}"),
            }
        }
    }

    /// Save configuration to a file, choosing the format by extension
    pub fn save_to_file(config: &TowerConfig, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(config)
                .context("Failed to serialize config to JSON")?,
            Some("toml") => {
                toml::to_string_pretty(config).context("Failed to serialize config to TOML")?
            }
            _ => serde_yaml::to_string(config).context("Failed to serialize config to YAML")?,
        };

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Default configuration rendered as YAML
    pub fn generate_sample_config() -> String {
        serde_yaml::to_string(&TowerConfig::default())
            .unwrap_or_else(|_| "# Failed to generate config".to_string())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disable" | "disabled" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TowerConfig::default();
        assert!(config.logging.enabled);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.angle, AngleUnit::Radians);
        assert_eq!(config.pool.resolve().unwrap(), PoolConfig::default());
    }

    #[test]
    fn test_bool_parsing() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_unparseable_overrides_keep_loaded_values() {
        let mut config: TowerConfig = serde_yaml::from_str(
            "pool:\n  verify_on_release: true\nlogging:\n  level: debug\n",
        )
        .unwrap();

        ConfigLoader::apply_overrides(&mut config, |key| match key {
            "NUMTOWER_POOL_VERIFY" => Some("maybe".to_string()),
            "NUMTOWER_LOG_LEVEL" => Some("loud".to_string()),
            "NUMTOWER_POOL_PRESET" => Some("turbo".to_string()),
            _ => None,
        });

        assert_eq!(config.pool.verify_on_release, Some(true));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.pool.preset, None);
    }
}
