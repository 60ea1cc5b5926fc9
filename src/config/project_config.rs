//! Project-level configuration support
//!
//! Loads per-project configuration from `evalmetrics.toml` or
//! `.evalmetricsrc.json` in a directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # evalmetrics.toml
//!
//! [keys]
//! coverage-statement = 20   # override the points of a default key
//! compiles = 5              # register an additional key
//!
//! [report]
//! format = "csv"
//! ```

use crate::metrics::{KeyRegistry, MetricsResult};
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

pub const TOML_CONFIG_FILE: &str = "evalmetrics.toml";
pub const JSON_CONFIG_FILE: &str = ".evalmetricsrc.json";

/// Project configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Assessment key weights, keyed by key name
    #[serde(default)]
    pub keys: BTreeMap<String, u64>,

    /// Report defaults
    #[serde(default)]
    pub report: ReportConfig,
}

/// Defaults for the `report` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Output format: text, csv, json
    #[serde(default)]
    pub format: Option<String>,
}

impl ProjectConfig {
    /// Derive a registry from `base` with this configuration's keys applied.
    ///
    /// Names already in `base` get their points replaced; new names are
    /// registered.
    pub fn build_registry(&self, base: &KeyRegistry) -> MetricsResult<KeyRegistry> {
        let mut builder = base.to_builder();
        for (name, points) in &self.keys {
            if builder.contains(name) {
                debug!("Overriding points of {} with {}", name, points);
                builder.reweight(name, *points)?;
            } else {
                debug!("Registering assessment key {} worth {}", name, points);
                builder.register(name, *points)?;
            }
        }
        Ok(builder.build())
    }
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `evalmetrics.toml`
/// 2. `.evalmetricsrc.json`
///
/// Returns default configuration if no usable config file is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(TOML_CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(JSON_CONFIG_FILE);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load an explicitly named configuration file.
///
/// Unlike [`load_project_config`], errors are returned to the caller.
/// Files ending in `.json` are parsed as JSON, everything else as TOML.
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        load_json_config(path)
    } else {
        load_toml_config(path)
    }
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}
