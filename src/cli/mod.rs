//! CLI command definitions and handlers

mod doctor;
mod keys;
mod report;

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use crate::metrics::KeyRegistry;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// evalmetrics - Score and rank code-generation evaluations
#[derive(Parser, Debug)]
#[command(name = "evalmetrics")]
#[command(
    version,
    about = "Score, merge and rank weighted assessments of code-generation models",
    after_help = "\
Examples:
  evalmetrics report results.json                 Leaderboard as text
  evalmetrics report results.json --format csv    CSV with one row per model
  evalmetrics keys                                List assessment keys and points
  evalmetrics doctor                              Check the symflower binary"
)]
pub struct Cli {
    /// Configuration file (default: evalmetrics.toml or .evalmetricsrc.json in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank models from a JSON file of assessments
    #[command(after_help = "\
Input format:
  {
    \"model-a\": { \"files-executed\": 2, \"coverage-statement\": 10 },
    \"model-b\": { \"response-no-error\": 1 }
  }")]
    Report {
        /// JSON file mapping model names to assessment counts
        input: PathBuf,

        /// Output format: text, csv, json (default: from config, else text)
        #[arg(long, short = 'f', value_parser = ["text", "txt", "csv", "json"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List registered assessment keys and their points
    Keys,

    /// Check the symflower binary used to execute generated code
    Doctor {
        /// Directory evalmetrics installs symflower into
        #[arg(long, default_value = ".evalmetrics/bin")]
        install_dir: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;
    let registry = config
        .build_registry(&KeyRegistry::with_defaults())
        .context("Invalid assessment keys in configuration")?;

    match cli.command {
        Commands::Report {
            input,
            format,
            output,
        } => {
            let format = format
                .or_else(|| config.report.format.clone())
                .unwrap_or_else(|| "text".to_string());
            report::run(&registry, &input, &format, output.as_deref())
        }
        Commands::Keys => keys::run(&registry),
        Commands::Doctor { install_dir } => doctor::run(&install_dir),
    }
}

/// Explicit `--config` files must load; otherwise look in the current directory
fn resolve_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_project_config(Path::new("."))),
    }
}
