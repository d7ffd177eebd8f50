//! Configuration for the isoplot CLI
//!
//! Sources, highest priority first:
//! 1. Command-line arguments
//! 2. Environment variables (`ISOPLOT_*`)
//! 3. Configuration files (.isoplot.toml, .isoplot.yaml, ...)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use clap::ValueEnum;
use isoplot_plot::Extend;
use isoplot_runtime::DEFAULT_LEVELS;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IsoplotConfig {
    /// Contour defaults
    #[serde(default)]
    pub plotting: PlottingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlottingConfig {
    /// Level count used when neither the command line nor the data file gives levels
    #[serde(default = "default_levels")]
    pub default_levels: usize,
    /// Extend mode used when none is given
    #[serde(default)]
    pub extend: ExtendMode,
    /// Attach a colorbar to the plotted axes
    #[serde(default = "default_true")]
    pub colorbar: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    /// Force debug logging regardless of `level`
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtendMode {
    #[default]
    Neither,
    Min,
    Max,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for PlottingConfig {
    fn default() -> Self {
        Self {
            default_levels: default_levels(),
            extend: ExtendMode::default(),
            colorbar: true,
        }
    }
}

impl From<ExtendMode> for Extend {
    fn from(mode: ExtendMode) -> Self {
        match mode {
            ExtendMode::Neither => Extend::Neither,
            ExtendMode::Min => Extend::Min,
            ExtendMode::Max => Extend::Max,
            ExtendMode::Both => Extend::Both,
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_levels() -> usize {
    DEFAULT_LEVELS
}

fn default_true() -> bool {
    true
}

/// Configuration loader with multiple source support
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment
    pub fn load() -> Result<IsoplotConfig> {
        let mut config = Self::load_from_files()?;
        Self::apply_environment_variables(&mut config)?;
        Ok(config)
    }

    /// Load an explicit file, then apply environment overrides
    pub fn load_with_file(path: &Path) -> Result<IsoplotConfig> {
        let mut config = Self::load_from_file(path)?;
        Self::apply_environment_variables(&mut config)?;
        Ok(config)
    }

    fn load_from_files() -> Result<IsoplotConfig> {
        for path in Self::find_config_files() {
            if path.is_dir() {
                info!(
                    "Ignoring config directory path (expected file): {}",
                    path.display()
                );
                continue;
            }
            if path.exists() {
                info!("Loading configuration from: {}", path.display());
                return Self::load_from_file(&path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(IsoplotConfig::default())
    }

    /// Candidate configuration paths in search order
    pub fn find_config_files() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(config_path) = env::var("ISOPLOT_CONFIG") {
            if !config_path.is_empty() {
                paths.push(PathBuf::from(config_path));
            }
        }

        if let Ok(current_dir) = env::current_dir() {
            for name in [
                ".isoplot.toml",
                ".isoplot.yaml",
                ".isoplot.yml",
                ".isoplot.json",
            ] {
                paths.push(current_dir.join(name));
            }
        }

        if let Some(config_dir) = dirs::home_dir().map(|home| home.join(".config/isoplot")) {
            for name in ["config.toml", "config.yaml", "config.yml", "config.json"] {
                paths.push(config_dir.join(name));
            }
        }

        paths
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<IsoplotConfig> {
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
                if let Ok(config) = toml::from_str(&content) {
                    config
                } else if let Ok(config) = serde_yaml::from_str(&content) {
                    config
                } else if let Ok(config) = serde_json::from_str(&content) {
                    config
                } else {
                    return Err(anyhow::anyhow!(
                        "Could not parse config file {} (tried TOML, YAML, JSON)",
                        path.display()
                    ));
                }
            }
        };

        Ok(config)
    }

    fn apply_environment_variables(config: &mut IsoplotConfig) -> Result<()> {
        if let Ok(levels) = env::var("ISOPLOT_LEVELS") {
            let count: usize = levels
                .trim()
                .parse()
                .with_context(|| format!("Invalid ISOPLOT_LEVELS value '{levels}'"))?;
            config.plotting.default_levels = count;
        }

        if let Ok(extend) = env::var("ISOPLOT_EXTEND") {
            if let Ok(mode) = ExtendMode::from_str(extend.trim(), true) {
                config.plotting.extend = mode;
            }
        }

        if let Some(flag) = env::var("ISOPLOT_COLORBAR")
            .ok()
            .and_then(|v| parse_bool(&v))
        {
            config.plotting.colorbar = flag;
        }

        if let Ok(level) = env::var("ISOPLOT_LOG_LEVEL") {
            if let Ok(level) = LogLevel::from_str(level.trim(), true) {
                config.logging.level = level;
            }
        }

        if let Ok(flag) = env::var("ISOPLOT_DEBUG") {
            config.logging.debug = parse_bool(&flag).unwrap_or(false);
        }

        Ok(())
    }

    /// Save configuration; the format follows the file extension (YAML otherwise)
    pub fn save_to_file(config: &IsoplotConfig, path: &Path) -> Result<()> {
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
}

pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disable" | "disabled" => Some(false),
        "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn test_config_defaults() {
        let config = IsoplotConfig::default();
        assert_eq!(config.plotting.default_levels, 10);
        assert_eq!(config.plotting.extend, ExtendMode::Neither);
        assert!(config.plotting.colorbar);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(!config.logging.debug);
    }

    #[test]
    fn test_serialization_round_trips() {
        let mut config = IsoplotConfig::default();
        config.plotting.extend = ExtendMode::Both;
        config.logging.level = LogLevel::Debug;

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(serde_yaml::from_str::<IsoplotConfig>(&yaml).unwrap(), config);

        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(serde_json::from_str::<IsoplotConfig>(&json).unwrap(), config);

        let toml_text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<IsoplotConfig>(&toml_text).unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: IsoplotConfig = toml::from_str("[plotting]\nextend = \"max\"\n").unwrap();
        assert_eq!(config.plotting.extend, ExtendMode::Max);
        assert_eq!(config.plotting.default_levels, 10);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_file_loading() {
        let temp_dir = TempDir::new().unwrap();

        for name in [".isoplot.yaml", ".isoplot.json", ".isoplot.toml"] {
            let config_path = temp_dir.path().join(name);
            let mut config = IsoplotConfig::default();
            config.plotting.default_levels = 7;
            config.plotting.colorbar = false;

            ConfigLoader::save_to_file(&config, &config_path).unwrap();
            let loaded = ConfigLoader::load_from_file(&config_path).unwrap();
            assert_eq!(loaded.plotting.default_levels, 7, "{name}");
            assert!(!loaded.plotting.colorbar, "{name}");
        }
    }

    #[test]
    fn test_unknown_extension_is_sniffed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("isoplot.conf");
        fs::write(&path, "{\"plotting\": {\"default_levels\": 4}}").unwrap();
        let loaded = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(loaded.plotting.default_levels, 4);

        fs::write(&path, "[[[").unwrap();
        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_bool_parsing() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    fn env_overrides_apply_over_file_values() {
        let _lock = ENV_GUARD.lock().unwrap();
        std::env::set_var("ISOPLOT_LEVELS", "5");
        std::env::set_var("ISOPLOT_EXTEND", "Both");
        std::env::set_var("ISOPLOT_COLORBAR", "off");
        std::env::set_var("ISOPLOT_LOG_LEVEL", "trace");
        let mut config = IsoplotConfig::default();
        ConfigLoader::apply_environment_variables(&mut config).unwrap();
        assert_eq!(config.plotting.default_levels, 5);
        assert_eq!(config.plotting.extend, ExtendMode::Both);
        assert!(!config.plotting.colorbar);
        assert_eq!(config.logging.level, LogLevel::Trace);

        std::env::set_var("ISOPLOT_LEVELS", "many");
        assert!(ConfigLoader::apply_environment_variables(&mut config).is_err());

        for key in [
            "ISOPLOT_LEVELS",
            "ISOPLOT_EXTEND",
            "ISOPLOT_COLORBAR",
            "ISOPLOT_LOG_LEVEL",
        ] {
            std::env::remove_var(key);
        }
    }
}
