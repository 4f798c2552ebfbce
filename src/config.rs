//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Environment variables
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use crate::flexfringe::Options;
use crate::flexfringe::options::{DEFAULT_DATA, DEFAULT_HEURISTIC};
use crate::render::{DEFAULT_FORMAT, default_viewer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub flexfringe: FlexFringeConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// flexfringe invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlexFringeConfig {
    /// Explicit executable path; `PATH` is searched when unset
    pub path: Option<PathBuf>,

    #[serde(default = "default_heuristic")]
    pub heuristic_name: String,

    #[serde(default = "default_data")]
    pub data_name: String,

    /// Extra `--key=value` options passed to every run
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// Graph rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_format")]
    pub format: String,

    /// Graphviz `dot` executable
    #[serde(default = "default_dot_path")]
    pub dot_path: PathBuf,

    #[serde(default = "default_viewer_program")]
    pub viewer: String,

    #[serde(default)]
    pub viewer_args: Vec<String>,

    /// Pause after launching the viewer
    #[serde(default = "default_viewer_delay_ms")]
    pub viewer_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_heuristic() -> String {
    DEFAULT_HEURISTIC.to_string()
}

fn default_data() -> String {
    DEFAULT_DATA.to_string()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_dot_path() -> PathBuf {
    PathBuf::from("dot")
}

fn default_viewer_program() -> String {
    default_viewer().to_string()
}

fn default_viewer_delay_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for FlexFringeConfig {
    fn default() -> Self {
        Self {
            path: None,
            heuristic_name: default_heuristic(),
            data_name: default_data(),
            options: BTreeMap::new(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            dot_path: default_dot_path(),
            viewer: default_viewer_program(),
            viewer_args: Vec::new(),
            viewer_delay_ms: default_viewer_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        Ok(config)
    }

    /// Default config file locations, in search order
    ///
    /// 1. ./flexfringe-wrapper.toml
    /// 2. ~/.flexfringe-wrapper/config.toml
    /// 3. /etc/flexfringe-wrapper/config.toml
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("flexfringe-wrapper.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".flexfringe-wrapper").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/flexfringe-wrapper/config.toml"));
        paths
    }

    /// The first default location that holds a config file
    pub fn find_file() -> Option<PathBuf> {
        first_existing(Self::search_paths())
    }

    /// Load configuration from the first default location, or use defaults
    pub fn load() -> Result<Self> {
        match Self::find_file() {
            Some(path) => Self::from_file(path),
            None => Ok(Config::default()),
        }
    }

    /// Options every run starts from: heuristic, data name, then extras
    pub fn base_options(&self) -> Options {
        let mut options = Options::default()
            .heuristic(&self.flexfringe.heuristic_name)
            .data(&self.flexfringe.data_name);
        for (name, value) in &self.flexfringe.options {
            options.insert(name, value);
        }
        options
    }
}

fn first_existing(paths: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    paths.into_iter().find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.flexfringe.path, None);
        assert_eq!(config.flexfringe.heuristic_name, "alergia");
        assert_eq!(config.flexfringe.data_name, "alergia_data");
        assert_eq!(config.render.format, "png");
        assert_eq!(config.render.viewer_delay_ms, 1000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[flexfringe]
path = "/opt/flexfringe/flexfringe"
heuristic_name = "kldistance"

[flexfringe.options]
state_count = "25"
symbol_count = "10"

[render]
format = "svg"
viewer = "eog"

[logging]
level = "debug"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.flexfringe.path,
            Some(PathBuf::from("/opt/flexfringe/flexfringe"))
        );
        assert_eq!(config.flexfringe.data_name, "alergia_data");
        assert_eq!(config.render.format, "svg");
        assert_eq!(config.render.dot_path, PathBuf::from("dot"));
        assert_eq!(config.logging.level, "debug");

        assert_eq!(
            config.base_options().to_flags(),
            vec![
                "--heuristic_name=kldistance",
                "--data_name=alergia_data",
                "--state_count=25",
                "--symbol_count=10",
            ]
        );
    }

    #[test]
    fn test_first_existing_location_wins() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("flexfringe-wrapper.toml");
        let home = dir.path().join("config.toml");
        std::fs::write(&home, "[logging]\nlevel = \"debug\"\n").unwrap();

        assert_eq!(
            first_existing([local.clone(), home.clone()]),
            Some(home.clone())
        );
        std::fs::write(&local, "").unwrap();
        assert_eq!(first_existing([local.clone(), home]), Some(local));
        assert_eq!(first_existing([dir.path().join("none.toml")]), None);
    }

    #[test]
    fn test_search_paths_order() {
        let paths = Config::search_paths();
        assert_eq!(paths.first(), Some(&PathBuf::from("flexfringe-wrapper.toml")));
        assert_eq!(
            paths.last(),
            Some(&PathBuf::from("/etc/flexfringe-wrapper/config.toml"))
        );
    }

    #[test]
    fn test_from_file_errors_are_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, Error::Config(_)));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[render\nformat = ").unwrap();
        assert!(matches!(Config::from_file(&bad).unwrap_err(), Error::Config(_)));
    }
}
