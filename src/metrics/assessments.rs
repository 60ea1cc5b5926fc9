//! Assessment collections
//!
//! An [`Assessments`] value counts how often each outcome occurred for one
//! unit of work (or one entity, after merging). Counts only grow. Keys that
//! are not part of the registry may be present; they contribute to
//! [`score`](Assessments::score) but are ignored by [`equal`], [`display`]
//! and [`csv_row`].
//!
//! Counts and scores saturate at `u64::MAX` instead of wrapping, so an
//! oversized input can never reorder a ranking.
//!
//! The free functions accept `Option<&Assessments>` for collections that may
//! not exist (a task that never produced any). Mutation always goes through
//! `&mut Assessments`, which can only be obtained from [`Assessments::new`].

use super::{AssessmentKey, KeyRegistry};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Sparse counter of assessment outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assessments {
    counts: BTreeMap<AssessmentKey, u64>,
}

impl Assessments {
    /// Create an empty collection
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Accumulate every entry of `other` into this collection
    pub fn add(&mut self, other: &Assessments) {
        for (key, value) in &other.counts {
            self.accumulate(key.clone(), *value);
        }
    }

    /// Credit `key` with its registered points
    pub fn award(&mut self, registry: &KeyRegistry, key: &AssessmentKey) {
        self.accumulate(key.clone(), registry.weight(key));
    }

    /// Sum of every entry present, registered or not
    pub fn score(&self) -> u64 {
        self.counts.values().copied().fold(0, u64::saturating_add)
    }

    /// Count recorded for `key` (zero if absent)
    pub fn count(&self, key: &AssessmentKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Entries actually present, in key name order
    pub fn iter(&self) -> impl Iterator<Item = (&AssessmentKey, u64)> + '_ {
        self.counts.iter().map(|(key, count)| (key, *count))
    }

    /// Number of entries present
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn accumulate(&mut self, key: AssessmentKey, count: u64) {
        let entry = self.counts.entry(key).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Single-line report, see [`display`]
    pub fn display<'a>(&'a self, registry: &'a KeyRegistry) -> AssessmentsDisplay<'a> {
        display(registry, Some(self))
    }

    /// CSV data row, see [`csv_row`]
    pub fn csv_row(&self, registry: &KeyRegistry) -> Vec<String> {
        csv_row(registry, Some(self))
    }
}

impl FromIterator<(AssessmentKey, u64)> for Assessments {
    fn from_iter<I: IntoIterator<Item = (AssessmentKey, u64)>>(iter: I) -> Self {
        let mut assessments = Assessments::new();
        assessments.extend(iter);
        assessments
    }
}

impl Extend<(AssessmentKey, u64)> for Assessments {
    fn extend<I: IntoIterator<Item = (AssessmentKey, u64)>>(&mut self, iter: I) {
        for (key, count) in iter {
            self.accumulate(key, count);
        }
    }
}

impl<'a> IntoIterator for &'a Assessments {
    type Item = (&'a AssessmentKey, &'a u64);
    type IntoIter = btree_map::Iter<'a, AssessmentKey, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Combine two collections into a new one. Absent operands contribute nothing.
pub fn merge(a: Option<&Assessments>, b: Option<&Assessments>) -> Assessments {
    let mut merged = Assessments::new();
    if let Some(a) = a {
        merged.add(a);
    }
    if let Some(b) = b {
        merged.add(b);
    }
    merged
}

/// Compare two collections over the registered keys.
///
/// An absent collection only equals another absent one, so an absent
/// collection and an empty one are different.
pub fn equal(registry: &KeyRegistry, a: Option<&Assessments>, b: Option<&Assessments>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => registry.keys().all(|key| a.count(key) == b.count(key)),
        (None, None) => true,
        _ => false,
    }
}

/// Single-line report: `score=<n>, <key>=<n>, ...` in registry order.
///
/// An absent collection renders as all zeros.
pub fn display<'a>(
    registry: &'a KeyRegistry,
    assessments: Option<&'a Assessments>,
) -> AssessmentsDisplay<'a> {
    AssessmentsDisplay {
        registry,
        assessments,
    }
}

/// Counts in registry order, one field per registered key.
///
/// The matching header is [`KeyRegistry::csv_header`].
pub fn csv_row(registry: &KeyRegistry, assessments: Option<&Assessments>) -> Vec<String> {
    registry
        .keys()
        .map(|key| assessments.map_or(0, |a| a.count(key)).to_string())
        .collect()
}

/// Formatter returned by [`display`]
pub struct AssessmentsDisplay<'a> {
    registry: &'a KeyRegistry,
    assessments: Option<&'a Assessments>,
}

impl fmt::Display for AssessmentsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |key: &AssessmentKey| self.assessments.map_or(0, |a| a.count(key));
        let score = self.assessments.map_or(0, Assessments::score);

        write!(f, "score={}", score)?;
        for key in self.registry.keys() {
            write!(f, ", {}={}", key, count(key))?;
        }
        Ok(())
    }
}
