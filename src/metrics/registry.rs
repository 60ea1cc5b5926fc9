//! Assessment key registry
//!
//! Keys are registered on a [`KeyRegistryBuilder`] during start-up and then
//! frozen into a [`KeyRegistry`]. The frozen registry has no mutating API, so
//! it can be shared across threads (`&KeyRegistry` or `Arc<KeyRegistry>`)
//! while collections are scored and formatted concurrently.

use super::keys;
use super::{AssessmentKey, MetricsError, MetricsResult};
use std::collections::BTreeMap;
use tracing::debug;

/// Mutable registry used during the initialization phase
#[derive(Debug, Clone, Default)]
pub struct KeyRegistryBuilder {
    weights: BTreeMap<AssessmentKey, u64>,
}

impl KeyRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-populated with the default evaluation keys
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        for (name, points) in keys::DEFAULTS {
            builder.weights.insert(AssessmentKey::new(name), *points);
        }
        builder
    }

    /// Register a new key worth `points` each time it is awarded.
    ///
    /// Registering a name twice is rejected; use [`reweight`](Self::reweight)
    /// to change the points of an existing key.
    pub fn register(&mut self, name: &str, points: u64) -> MetricsResult<AssessmentKey> {
        if self.weights.contains_key(name) {
            return Err(MetricsError::DuplicateKey(name.to_string()));
        }
        let key = AssessmentKey::new(name);
        self.weights.insert(key.clone(), points);
        Ok(key)
    }

    /// Change the points of an already registered key
    pub fn reweight(&mut self, name: &str, points: u64) -> MetricsResult<AssessmentKey> {
        let (key, weight) = self
            .weights
            .iter_mut()
            .find(|(key, _)| key.as_str() == name)
            .ok_or_else(|| MetricsError::UnknownKey(name.to_string()))?;
        *weight = points;
        Ok(key.clone())
    }

    /// Whether a key with this name has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.weights.contains_key(name)
    }

    /// Freeze the registry. No further registration is possible.
    pub fn build(self) -> KeyRegistry {
        debug!("Assessment key registry frozen with {} keys", self.weights.len());
        KeyRegistry {
            weights: self.weights,
        }
    }
}

/// Frozen, read-only catalog of assessment keys and their weights.
///
/// Iteration always yields keys in ascending name order; both textual
/// formats of [`Assessments`](super::Assessments) rely on this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRegistry {
    weights: BTreeMap<AssessmentKey, u64>,
}

impl KeyRegistry {
    /// Registry holding only the default evaluation keys
    pub fn with_defaults() -> Self {
        KeyRegistryBuilder::with_defaults().build()
    }

    /// Start a new builder from this registry's keys
    pub fn to_builder(&self) -> KeyRegistryBuilder {
        KeyRegistryBuilder {
            weights: self.weights.clone(),
        }
    }

    /// Registered keys in ascending name order
    pub fn keys(&self) -> impl Iterator<Item = &AssessmentKey> + '_ {
        self.weights.keys()
    }

    /// Registered key names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.weights.keys().map(AssessmentKey::as_str)
    }

    /// Keys paired with their points, in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = (&AssessmentKey, u64)> + '_ {
        self.weights.iter().map(|(key, points)| (key, *points))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Look up a key by name
    pub fn get(&self, name: &str) -> Option<AssessmentKey> {
        self.weights.get_key_value(name).map(|(key, _)| key.clone())
    }

    /// Look up a key by name, failing for unregistered names
    pub fn key(&self, name: &str) -> MetricsResult<AssessmentKey> {
        self.get(name)
            .ok_or_else(|| MetricsError::UnknownKey(name.to_string()))
    }

    pub fn contains(&self, key: &AssessmentKey) -> bool {
        self.weights.contains_key(key)
    }

    /// Points awarded for `key`; unregistered keys are worth nothing
    pub fn weight(&self, key: &AssessmentKey) -> u64 {
        self.weights.get(key).copied().unwrap_or(0)
    }

    /// Header row matching [`csv_row`](super::csv_row)
    pub fn csv_header(&self) -> Vec<String> {
        self.names().map(str::to_string).collect()
    }
}
