//! File configuration for sift, read from `.sift/sift.toml`.
//!
//! Every field has a default, so a missing file or section is valid.
//!
//! # Configuration File Format
//!
//! ```toml
//! [source]
//! manifest = "manifest.json"
//! api_base = "https://en.wikipedia.org/api/rest_v1"
//! timeout_secs = 20
//! user_agent = "sift/0.1 (excerpt review)"
//!
//! [records]
//! path = "records.jsonl"
//!
//! [display]
//! wrap_width = 0
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::source::wikipedia::DEFAULT_API_BASE;

pub const CONFIG_FILE: &str = "sift.toml";

/// Where documents come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSection {
    /// Manifest path, relative to `.sift/` unless absolute
    #[serde(default = "default_manifest")]
    pub manifest: String,
    /// Base URL of the REST API serving page summaries
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_manifest() -> String {
    "manifest.json".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_user_agent() -> String {
    format!("sift/{} (excerpt review)", env!("CARGO_PKG_VERSION"))
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsSection {
    /// Record log path, relative to `.sift/` unless absolute
    #[serde(default = "default_records_path")]
    pub path: String,
}

fn default_records_path() -> String {
    "records.jsonl".to_string()
}

impl Default for RecordsSection {
    fn default() -> Self {
        Self {
            path: default_records_path(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Wrap column; 0 uses the terminal width
    #[serde(default)]
    pub wrap_width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Default filter when `SIFT_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Parsed `sift.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiftToml {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub records: RecordsSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl SiftToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse sift.toml")
    }

    /// Load `.sift/sift.toml`, or defaults when the file does not exist.
    pub fn load_or_default(sift_dir: &Path) -> Result<Self> {
        let config_path = sift_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize sift.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply `SIFT_*` environment overrides.
    pub fn apply_env(&mut self) {
        if let Ok(api_base) = std::env::var("SIFT_API_BASE") {
            self.source.api_base = api_base;
        }
        if let Ok(manifest) = std::env::var("SIFT_MANIFEST") {
            self.source.manifest = manifest;
        }
        if let Ok(records) = std::env::var("SIFT_RECORDS") {
            self.records.path = records;
        }
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.source.api_base.starts_with("http://")
            && !self.source.api_base.starts_with("https://")
        {
            warnings.push(format!(
                "Invalid api_base '{}': should start with http:// or https://",
                self.source.api_base
            ));
        }
        if self.source.timeout_secs == 0 {
            warnings.push("timeout_secs is 0: every fetch will time out".to_string());
        }
        if self.source.user_agent.trim().is_empty() {
            warnings.push("user_agent is empty: the API may reject requests".to_string());
        }
        if self.logging.level.parse::<tracing_subscriber::EnvFilter>().is_err() {
            warnings.push(format!(
                "Invalid logging level '{}': use a filter such as 'info' or 'sift=debug'",
                self.logging.level
            ));
        }

        warnings
    }
}
