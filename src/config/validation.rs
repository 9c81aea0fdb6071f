//! Configuration validation.

use anyhow::{bail, Result};
use regex::Regex;

use super::Config;

/// Validate configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.log_path.to_string_lossy().contains('\0') {
        bail!("Invalid log_path: contains null character");
    }

    if config.output_file_path.contains('\0') {
        bail!("Invalid output_file_path: contains null character");
    }

    for (i, pattern) in config.extra_bot_patterns.iter().enumerate() {
        if pattern.is_empty() {
            bail!("extra_bot_patterns[{}]: pattern cannot be empty", i);
        }

        if let Err(e) = Regex::new(pattern) {
            bail!(
                "extra_bot_patterns[{}]: invalid regex pattern '{}': {}",
                i,
                pattern,
                e
            );
        }
    }

    Ok(())
}
