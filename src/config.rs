//! Configuration
//!
//! Loaded from a TOML file with environment variable overrides. Every field has
//! a default, so an absent or partial file is fine.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::stats::{MAX_TREND_MONTHS, StatsOptions};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub journal: JournalConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JournalConfig {
    #[serde(default = "default_journal_file")]
    pub file: PathBuf,
}

fn default_journal_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("lucid-journal").join("dreams.json"))
        .unwrap_or_else(|| PathBuf::from("./dreams.json"))
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            file: default_journal_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_months_back")]
    pub months_back: u32,

    #[serde(default = "default_starred_limit")]
    pub starred_limit: usize,
}

fn default_top_n() -> usize {
    5
}

fn default_months_back() -> u32 {
    6
}

fn default_starred_limit() -> usize {
    3
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            months_back: default_months_back(),
            starred_limit: default_starred_limit(),
        }
    }
}

impl AnalyticsConfig {
    pub fn stats_options(&self) -> StatsOptions {
        StatsOptions {
            top_n: self.top_n,
            months_back: self.months_back,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid setting in {path:?}: {error}")]
    Invalid { path: PathBuf, error: String },
}

impl Config {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        if config.analytics.months_back > MAX_TREND_MONTHS {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                error: format!(
                    "analytics.months_back is {}, at most {} allowed",
                    config.analytics.months_back, MAX_TREND_MONTHS
                ),
            });
        }

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Explicit path if given (must load), otherwise the first default
    /// location that exists, otherwise built-in defaults. Environment
    /// overrides are applied in every case.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => Self::load_default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_default() -> Self {
        let candidates = [
            dirs::config_dir().map(|p| p.join("lucid-journal").join("config.toml")),
            Some(PathBuf::from("./lucid-journal.toml")),
        ];

        for path in candidates.iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load(path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {:?}", path);
                    return config;
                }
                Err(e) => tracing::warn!("Ignoring config {:?}: {}", path, e),
            }
        }
        Self::default()
    }

    /// Apply `LUCID_JOURNAL_*` overrides using `lookup` to read variables
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(file) = lookup("LUCID_JOURNAL_FILE") {
            self.journal.file = PathBuf::from(file);
        }
        if let Some(level) = lookup("LUCID_JOURNAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LUCID_JOURNAL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

pub fn generate_default_config() -> String {
    r#"# lucid-journal configuration
#
# Environment variables override these settings:
# - LUCID_JOURNAL_FILE
# - LUCID_JOURNAL_LOG_LEVEL
# - LUCID_JOURNAL_LOG_FORMAT

[journal]
# Where dreams are stored
# file = "~/.local/share/lucid-journal/dreams.json"

[analytics]
# How many emotions and tags to rank
top_n = 5

# Months shown in the lucid/normal trend
months_back = 6

# Starred dreams listed on the dashboard
starred_limit = 3

[logging]
# trace, debug, info, warn, error
level = "info"

# pretty or json
format = "pretty"
"#
    .to_string()
}
