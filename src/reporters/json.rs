//! JSON reporter
//!
//! Outputs the leaderboard as a pretty-printed array of
//! `{ "model", "score", "assessments" }` objects. `assessments` lists every
//! registered key, including those with a zero count.

use super::Leaderboard;
use crate::metrics::rank_by_score;
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct ModelEntry<'a> {
    model: &'a str,
    score: u64,
    assessments: BTreeMap<&'a str, u64>,
}

/// Render the leaderboard as JSON
pub fn render(leaderboard: &Leaderboard<'_>) -> Result<String> {
    let entries: Vec<ModelEntry<'_>> = rank_by_score(leaderboard.models)
        .into_iter()
        .map(|(model, assessments, score)| ModelEntry {
            model,
            score,
            assessments: leaderboard
                .registry
                .keys()
                .map(|key| (key.as_str(), assessments.count(key)))
                .collect(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
