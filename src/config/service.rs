//! Configuration service for loading and generating config files.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::default_log_path_for_config_dir;
use super::Config;

/// Configuration service.
pub struct ConfigService;

impl ConfigService {
    /// Get the default configuration file path.
    /// Always uses ~/.config/logsieve/config.toml for cross-platform consistency.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("logsieve")
            .join("config.toml")
    }

    /// Load configuration from file.
    ///
    /// If `path` is `None`, uses the default path, falling back to built-in
    /// defaults when that file does not exist. An explicit `path` must exist.
    /// Log path defaults to the `logs` directory next to the config file.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let explicit = path.is_some();
        let path = path.map(PathBuf::from).unwrap_or_else(Self::default_path);
        let config_dir = path.parent();

        if !path.exists() {
            if explicit {
                bail!("Config file not found: {}", path.display());
            }
            debug!("No config file at {}, using defaults", path.display());
            let config = Config {
                log_path: default_log_path_for_config_dir(config_dir),
                ..Config::default()
            };
            return Ok(config);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        // log_path left at the general default follows the config file
        if config.log_path == default_log_path_for_config_dir(None) {
            config.log_path = default_log_path_for_config_dir(config_dir);
        }

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Generate default configuration file at the default path.
    pub fn generate_default() -> Result<()> {
        Self::generate_at(&Self::default_path())
    }

    /// Generate default configuration file at the specified path.
    pub fn generate_at(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, Self::default_config_content())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Generate default configuration content with comments.
    fn default_config_content() -> &'static str {
        r#"# logsieve configuration file
# Command-line flags override the values below.

# Period before now to keep entries for: "day", "week", "month" or "any" (default: "week")
period = "week"

# Base path for output files. Empty writes admitted lines to stdout (default: "")
# With no partitioning, lines go to <output_file_path>/outputs.reqs
# output_file_path = "/var/lib/logsieve"

# Split output files by year: <output_file_path>/<year>.reqs (default: false)
divide_by_year = false

# Split output files by month: <output_file_path>[/<year>]/<month>.reqs (default: false)
divide_by_month = false

# Enable debug logging to file (default: false)
debug = false

# Path to log directory (default: same directory as config.toml/logs)
# log_path = "~/.config/logsieve/logs"

# Extra user agent regexes rejected as bots, on top of the built-in list
# extra_bot_patterns = ["NetcraftSurveyAgent", "SemrushBot"]
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Period;

    #[test]
    fn test_generated_config_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        ConfigService::generate_at(&path).unwrap();
        let config = ConfigService::load(Some(&path)).unwrap();

        assert_eq!(config.period, Period::Week);
        assert!(config.output_file_path.is_empty());
        assert_eq!(config.log_path, dir.path().join("nested").join("logs"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigService::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "extra_bot_patterns = [\"(\"]\n").unwrap();
        let err = ConfigService::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));

        fs::write(&path, "period = \"fortnight\"\n").unwrap();
        let err = ConfigService::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
