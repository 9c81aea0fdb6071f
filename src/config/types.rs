//! Configuration data types.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::validation;
use crate::domain::{Partitioning, Period};

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Period before the reference instant to keep entries for
    pub period: Period,

    /// Base path for file output (empty = stdout)
    pub output_file_path: String,

    /// Split file output into one file per month
    pub divide_by_month: bool,

    /// Split file output into one file per year
    pub divide_by_year: bool,

    /// Enable debug logging to file
    pub debug: bool,

    /// Path to log directory
    pub log_path: PathBuf,

    /// Additional user agent patterns treated as bots
    pub extra_bot_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period: Period::default(),
            output_file_path: String::new(),
            divide_by_month: false,
            divide_by_year: false,
            debug: false,
            log_path: default_log_path(),
            extra_bot_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration and return errors if invalid.
    /// Delegates to the comprehensive validation module.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Partitioning options for file output.
    pub fn partitioning(&self) -> Partitioning {
        Partitioning {
            divide_by_month: self.divide_by_month,
            divide_by_year: self.divide_by_year,
        }
    }
}

/// Get default log path (relative to config directory).
/// This returns a placeholder; the actual path is set by ConfigService based on config file location.
pub fn default_log_path() -> PathBuf {
    default_log_path_for_config_dir(None)
}

/// Get log path based on config directory.
pub fn default_log_path_for_config_dir(config_dir: Option<&Path>) -> PathBuf {
    config_dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("logsieve")
        })
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.period, Period::Week);
        assert!(config.output_file_path.is_empty());
        assert_eq!(config.partitioning(), Partitioning::default());
        assert!(config.log_path.ends_with("logs"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = toml::from_str(
            r#"
period = "month"
output_file_path = "/var/lib/logsieve"
divide_by_year = true
extra_bot_patterns = ["Netcraft"]
"#,
        )
        .unwrap();
        assert_eq!(config.period, Period::Month);
        assert_eq!(config.output_file_path, "/var/lib/logsieve");
        assert!(config.partitioning().divide_by_year);
        assert!(!config.partitioning().divide_by_month);
        assert_eq!(config.extra_bot_patterns, vec!["Netcraft".to_string()]);
    }

    #[test]
    fn test_deserialize_rejects_unknown_period() {
        let err = toml::from_str::<Config>(r#"period = "moth""#).unwrap_err();
        assert!(err.to_string().contains("unknown period 'moth'"), "{}", err);
    }

    #[test]
    fn test_deserialize_rejects_unknown_field() {
        assert!(toml::from_str::<Config>(r#"perod = "week""#).is_err());
    }
}
