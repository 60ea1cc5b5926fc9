//! Text reporter

use super::Leaderboard;
use crate::metrics::walk_by_score;
use anyhow::Result;
use std::fmt::Write;

/// Render one `<model>: score=<n>, <key>=<n>, ...` line per model
pub fn render(leaderboard: &Leaderboard<'_>) -> Result<String> {
    let mut out = String::new();
    walk_by_score(leaderboard.models, |model, assessments, _| {
        writeln!(out, "{}: {}", model, assessments.display(leaderboard.registry))
    })?;
    Ok(out)
}
