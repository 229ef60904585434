//! Application configuration.

use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::infrastructure::cache::CacheConfig;

const APP_NAME: &str = "darshan";
const APP_QUALIFIER: &str = "org";
const APP_ORGANIZATION: &str = "shrine";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from the config file and CLI.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Base URL of the shrine CMS API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Read-cache tuning.
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            log_path: None,
            log_level: LogLevel::Info,
            cache: CacheConfig::default(),
        }
    }
}

use super::args::CliArgs;

impl AppConfig {
    /// Loads configuration from the given path, or the default location,
    /// falling back to defaults when no file exists.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> io::Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);

        match path {
            Some(p) if p.exists() => {
                let text = std::fs::read_to_string(&p)?;
                toml::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            _ => Ok(Self::default()),
        }
    }

    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(base_url) = &args.api_base_url {
            self.api_base_url.clone_from(base_url);
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("darshan.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            api_base_url = "https://shrine.example.org/api"
            log_level = "debug"

            [cache]
            capacity = 16
            list_ttl_secs = 120
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("config should parse");

        assert_eq!(config.api_base_url, "https://shrine.example.org/api");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.cache.capacity, 16);
        assert_eq!(config.cache.list_ttl_secs, 120);
        // Unspecified table keys keep their defaults.
        assert_eq!(config.cache.stats_ttl_secs, 60);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.cache.list_ttl_secs, 300);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.api_base_url, default_api_base_url());
    }
}
