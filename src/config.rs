//! TOML configuration parsing and validation.
//!
//! Only `[store]` is required. Every other section falls back to the
//! engine defaults, so a minimal config is two lines. See
//! [`load_config`] for the validation rules.

use anyhow::{Context, Result};
use docsift_core::models::DuplicateCheckOptions;
use docsift_core::patterns::PatternTable;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub connectors: ConnectorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DedupConfig {
    #[serde(default = "default_true")]
    pub check_name: bool,
    #[serde(default = "default_true")]
    pub check_content: bool,
    #[serde(default = "default_content_threshold")]
    pub content_threshold: f64,
    #[serde(default = "default_name_threshold")]
    pub name_threshold: f64,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default = "default_min_content_length")]
    pub min_content_length: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            check_name: true,
            check_content: true,
            content_threshold: default_content_threshold(),
            name_threshold: default_name_threshold(),
            case_sensitive: false,
            min_content_length: default_min_content_length(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_content_threshold() -> f64 {
    0.8
}
fn default_name_threshold() -> f64 {
    0.85
}
fn default_min_content_length() -> usize {
    100
}

impl DedupConfig {
    pub fn options(&self) -> DuplicateCheckOptions {
        DuplicateCheckOptions {
            check_name: self.check_name,
            check_content: self.check_content,
            content_threshold: self.content_threshold,
            name_threshold: self.name_threshold,
            case_sensitive: self.case_sensitive,
            min_content_length: self.min_content_length,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClassifierConfig {
    /// TOML file with `[[patterns]]` entries replacing the built-in table.
    #[serde(default)]
    pub patterns_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_recent_window_days")]
    pub recent_window_days: i64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            recent_window_days: default_recent_window_days(),
        }
    }
}

fn default_recent_window_days() -> i64 {
    7
}

/// Upper bound for `metrics.recent_window_days` (about a century).
pub const MAX_RECENT_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConnectorsConfig {
    pub filesystem: Option<FilesystemConnectorConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemConnectorConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string(), "**/*.txt".to_string()]
}

impl Config {
    /// A config with defaults everywhere and the store at `path`.
    pub fn minimal(path: impl Into<PathBuf>) -> Self {
        Self {
            store: StoreConfig { path: path.into() },
            dedup: DedupConfig::default(),
            classifier: ClassifierConfig::default(),
            metrics: MetricsConfig::default(),
            connectors: ConnectorsConfig::default(),
        }
    }

    /// The configured pattern table, or `None` to use the built-in one.
    pub fn load_patterns(&self) -> Result<Option<PatternTable>> {
        let Some(path) = &self.classifier.patterns_path else {
            return Ok(None);
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern file: {}", path.display()))?;
        let table: PatternTable = toml::from_str(&content)
            .with_context(|| format!("Failed to parse pattern file: {}", path.display()))?;
        Ok(Some(table))
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if !(0.0..=1.0).contains(&config.dedup.content_threshold) {
        anyhow::bail!("dedup.content_threshold must be in [0.0, 1.0]");
    }

    if !(0.0..=1.0).contains(&config.dedup.name_threshold) {
        anyhow::bail!("dedup.name_threshold must be in [0.0, 1.0]");
    }

    if !config.dedup.check_name && !config.dedup.check_content {
        tracing::warn!("dedup.check_name and dedup.check_content are both disabled; every document will be accepted");
    }

    if !(1..=MAX_RECENT_WINDOW_DAYS).contains(&config.metrics.recent_window_days) {
        anyhow::bail!(
            "metrics.recent_window_days must be in [1, {}]",
            MAX_RECENT_WINDOW_DAYS
        );
    }

    if let Some(fs) = &config.connectors.filesystem {
        if fs.include_globs.is_empty() {
            anyhow::bail!("connectors.filesystem.include_globs must not be empty");
        }
    }

    Ok(())
}
