//! Checker configuration.
//!
//! Handles loading and validating `config.toml`. User files are sparse:
//! every key has a default, and the keys present in the file override it.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! on_broken_links = "throw"    # ignore | log | warn | throw
//! on_broken_anchors = "throw"  # ignore | log | warn | throw
//!
//! [frequency]
//! threshold = 2                # a link broken on more pages than this is "frequent"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::aggregate::DEFAULT_FREQUENT_THRESHOLD;
use crate::policy::ReportingSeverity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Checker configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkCheckConfig {
    /// Policy for links whose target page does not exist.
    pub on_broken_links: ReportingSeverity,
    /// Policy for anchors missing from an existing target page.
    pub on_broken_anchors: ReportingSeverity,
    /// Frequent-link detection settings.
    pub frequency: FrequencyConfig,
}

/// Frequent broken link detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrequencyConfig {
    /// A raw link broken on more than this many distinct pages is listed as
    /// frequent.
    pub threshold: usize,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_FREQUENT_THRESHOLD,
        }
    }
}

impl LinkCheckConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency.threshold == 0 {
            return Err(ConfigError::Validation(
                "frequency.threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Parse and validate `config.toml` content. Missing keys keep their defaults.
pub fn parse_config(content: &str) -> Result<LinkCheckConfig, ConfigError> {
    let config: LinkCheckConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// A missing file yields the defaults.
pub fn load_config(dir: &Path) -> Result<LinkCheckConfig, ConfigError> {
    let config_path = dir.join("config.toml");
    let config = match fs::read_to_string(&config_path) {
        Ok(content) => parse_config(&content)?,
        Err(e) if e.kind() == ErrorKind::NotFound => LinkCheckConfig::default(),
        Err(e) => return Err(e.into()),
    };
    tracing::debug!(
        path = %config_path.display(),
        on_broken_links = %config.on_broken_links,
        on_broken_anchors = %config.on_broken_anchors,
        threshold = config.frequency.threshold,
        "loaded link check config"
    );
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Broken Links Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# What to do when a link points to a page that does not exist.
#   ignore - drop the findings silently
#   log    - print the report and continue
#   warn   - print the report as a warning and continue
#   throw  - fail the build with the report
on_broken_links = "throw"

# What to do when a link's #anchor does not exist on its (existing) target page.
# Same values as on_broken_links.
on_broken_anchors = "throw"

# ---------------------------------------------------------------------------
# Frequent broken links
# ---------------------------------------------------------------------------
[frequency]
# A broken link found on more than this many pages is listed separately as
# "frequent": it most likely comes from the navbar or footer.
threshold = 2
"##
}
