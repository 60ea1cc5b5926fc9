//! Report command - rank models and render the leaderboard

use crate::metrics::{Assessments, KeyRegistry};
use crate::reporters::{self, Leaderboard};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

pub fn run(registry: &KeyRegistry, input: &Path, format: &str, output: Option<&Path>) -> Result<()> {
    let models = load_assessments(input)?;
    debug!("Loaded assessments of {} models from {}", models.len(), input.display());
    warn_unregistered(registry, &models);

    let rendered = reporters::report(&Leaderboard::new(registry, &models), format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!("Wrote {} report to {}", format, path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn load_assessments(path: &Path) -> Result<BTreeMap<String, Assessments>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse assessments in {}", path.display()))
}

/// Unregistered keys still count towards the score but are not listed
fn warn_unregistered(registry: &KeyRegistry, models: &BTreeMap<String, Assessments>) {
    for (model, assessments) in models {
        for (key, count) in assessments.iter() {
            if !registry.contains(key) {
                warn!(
                    "Model {} has {} for unregistered key {}; it counts towards the score only",
                    model, count, key
                );
            }
        }
    }
}
