//! Catalog configuration with sensible defaults.
//!
//! [`CatalogConfig`] names the static resources the catalog is served from,
//! the fetch timeout and the preference storage keys. Every field has a
//! default, so a config file only needs the keys it overrides.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Invalid(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path of the benchmark collection, relative to the fetcher's origin.
    pub dataset_path: String,
    /// Prefix under which manifests and markdown reports live.
    pub research_root: String,
    /// Upper bound on any single fetch. Must be greater than 0.
    pub fetch_timeout_secs: u64,
    pub dismissed_key: String,
    pub settings_key: String,
    /// Papers published before this year count as old.
    pub old_paper_cutoff: i32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dataset_path: "/benchmarks.json".into(),
            research_root: "/research".into(),
            fetch_timeout_secs: 30,
            dismissed_key: "edubench-dismissed".into(),
            settings_key: "edubench-settings".into(),
            old_paper_cutoff: 2023,
        }
    }
}

impl CatalogConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let f = std::fs::File::open(path)?;
        let config: CatalogConfig = serde_json::from_reader(f)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks:
    /// - `fetch_timeout_secs` must be greater than 0
    /// - `dataset_path` and `research_root` must be absolute (start with `/`)
    /// - storage keys must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch_timeout_secs must be greater than 0".into(),
            ));
        }
        if !self.dataset_path.starts_with('/') {
            return Err(ConfigError::Invalid(
                "dataset_path must start with '/'".into(),
            ));
        }
        if !self.research_root.starts_with('/') {
            return Err(ConfigError::Invalid(
                "research_root must start with '/'".into(),
            ));
        }
        if self.dismissed_key.is_empty() || self.settings_key.is_empty() {
            return Err(ConfigError::Invalid(
                "storage keys must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// At least one second, even for a config that skipped `validate`.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    /// `{research_root}/{rest}` without doubled slashes.
    pub fn research_path(&self, rest: &str) -> String {
        format!(
            "{}/{}",
            self.research_root.trim_end_matches('/'),
            rest.trim_start_matches('/')
        )
    }
}
