//! Configuration module for evalmetrics
//!
//! This module handles:
//! - Project-level configuration (evalmetrics.toml)
//! - Assessment key weight overrides and additional keys
//! - Report defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, ProjectConfig, ReportConfig, JSON_CONFIG_FILE,
    TOML_CONFIG_FILE,
};
