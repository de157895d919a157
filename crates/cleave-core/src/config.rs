//! Analysis configuration file (`cleave.toml`).
//!
//! ```toml
//! [betweenness]
//! normalized = true
//! method = "accumulation"      # or "path-enumeration"
//!
//! [communities]
//! max_levels = 4               # omit for the full hierarchy
//!
//! [report]
//! top_k = 4
//! ```
//!
//! Every section and key is optional; missing values take the defaults
//! shown above (except `max_levels`, which defaults to unbounded).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::metrics::{BetweennessConfig, Method};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "cleave.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub betweenness: BetweennessSection,
    #[serde(default)]
    pub communities: CommunitySection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetweennessSection {
    #[serde(default = "default_true")]
    pub normalized: bool,
    #[serde(default)]
    pub method: Method,
}

impl Default for BetweennessSection {
    fn default() -> Self {
        Self {
            normalized: default_true(),
            method: Method::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySection {
    #[serde(default)]
    pub max_levels: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub const fn betweenness_config(&self) -> BetweennessConfig {
        BetweennessConfig {
            normalized: self.betweenness.normalized,
            method: self.betweenness.method,
        }
    }
}

/// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] in
/// `dir` when `path` is `None`. A missing default file yields defaults; an
/// explicitly named file must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`AnalysisConfig`].
pub fn load_config(path: Option<&Path>, dir: &Path) -> Result<AnalysisConfig> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (dir.join(DEFAULT_CONFIG_FILE), false),
    };

    if !required && !path.exists() {
        return Ok(AnalysisConfig::default());
    }

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: AnalysisConfig =
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

const fn default_true() -> bool {
    true
}

const fn default_top_k() -> usize {
    4
}
