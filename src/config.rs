use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the persisted task list
    pub data_dir: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            // A comments-only file (as written by `tudu config init`) parses
            // as a null document, not an empty mapping
            let file_config: ConfigFile = serde_yaml::from_str::<Option<ConfigFile>>(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?
                .unwrap_or_default();

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("TUDU_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }

        Ok(Self {
            data_dir,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/tudu/
    /// - macOS: ~/Library/Application Support/tudu/
    /// - Windows: %APPDATA%/tudu/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tudu")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/tudu/
    /// - macOS: ~/Library/Application Support/tudu/
    /// - Windows: %APPDATA%/tudu/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tudu")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
