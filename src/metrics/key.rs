//! Assessment key identifiers

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifier naming one measurable outcome, e.g. `files-executed`.
///
/// Keys are immutable and cheap to clone. They order, hash and compare by
/// their textual name, so a `BTreeMap` keyed by them iterates in name order.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssessmentKey(Arc<str>);

impl AssessmentKey {
    pub(crate) fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Textual name of the key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssessmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AssessmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssessmentKey({:?})", &*self.0)
    }
}

impl Borrow<str> for AssessmentKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for AssessmentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssessmentKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self(Arc::from(name)))
    }
}
