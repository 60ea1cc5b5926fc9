//! Output reporters for evaluation results
//!
//! Supports multiple output formats:
//! - `text` - One canonical report line per model
//! - `csv` - Header of key names followed by one row per model
//! - `json` - Machine-readable JSON
//!
//! Every format lists models in leaderboard order: ascending score, ties
//! broken by model name.

mod csv;
mod json;
mod text;

use crate::metrics::{Assessments, KeyRegistry};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, csv, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Aggregated assessments per model, with the registry that describes them
#[derive(Debug, Clone, Copy)]
pub struct Leaderboard<'a> {
    pub registry: &'a KeyRegistry,
    pub models: &'a BTreeMap<String, Assessments>,
}

impl<'a> Leaderboard<'a> {
    pub fn new(registry: &'a KeyRegistry, models: &'a BTreeMap<String, Assessments>) -> Self {
        Self { registry, models }
    }
}

/// Render a leaderboard in the specified format
pub fn report(leaderboard: &Leaderboard<'_>, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(leaderboard, fmt)
}

/// Render a leaderboard using an OutputFormat enum
pub fn report_with_format(leaderboard: &Leaderboard<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(leaderboard),
        OutputFormat::Csv => csv::render(leaderboard),
        OutputFormat::Json => json::render(leaderboard),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Csv => "csv",
        OutputFormat::Json => "json",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::metrics::{keys, KeyRegistry};

    /// Registry with the default keys and three ranked models
    pub(crate) fn test_models() -> (KeyRegistry, BTreeMap<String, Assessments>) {
        let registry = KeyRegistry::with_defaults();
        let award = |names: &[&str]| {
            let mut assessments = Assessments::new();
            for name in names {
                assessments.award(&registry, &registry.key(name).unwrap());
            }
            assessments
        };

        let models = BTreeMap::from([
            (
                "openrouter/alpha".to_string(),
                award(&[keys::COVERAGE_STATEMENT, keys::FILES_EXECUTED]),
            ),
            ("openrouter/beta".to_string(), award(&[keys::RESPONSE_NO_ERROR])),
            ("openrouter/gamma".to_string(), award(&[keys::RESPONSE_NOT_EMPTY])),
        ]);
        (registry, models)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("TXT").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_format_display_round_trips() {
        for format in [OutputFormat::Text, OutputFormat::Csv, OutputFormat::Json] {
            assert_eq!(OutputFormat::from_str(&format.to_string()).unwrap(), format);
        }
        assert_eq!(file_extension(OutputFormat::Csv), "csv");
    }

    #[test]
    fn test_report_rejects_unknown_format() {
        let (registry, models) = test_models();
        let leaderboard = Leaderboard::new(&registry, &models);
        assert!(report(&leaderboard, "html").is_err());
        assert!(report(&leaderboard, "text").is_ok());
    }
}
