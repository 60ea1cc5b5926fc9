//! Weighted assessment metrics
//!
//! This module holds the scoring core shared by every evaluation run:
//!
//! - [`KeyRegistry`] - the catalog of known assessment keys and the points
//!   awarded each time one of them is credited
//! - [`Assessments`] - a sparse counter of outcomes for one unit of work, or
//!   for one entity after aggregation
//! - [`walk_by_score`] - a deterministic leaderboard traversal
//!
//! # Lifecycle
//!
//! ```text
//! KeyRegistryBuilder ──build()──▶ KeyRegistry (frozen, shared read-only)
//!                                      │
//!   unit of work ─▶ Assessments ──award()/add()
//!                                      │
//!   coordinator  ─▶ merge(per task) ─▶ per model ─▶ walk_by_score ─▶ reporters
//! ```
//!
//! # Example
//!
//! ```rust
//! use evalmetrics::metrics::{Assessments, KeyRegistryBuilder};
//!
//! let mut builder = KeyRegistryBuilder::new();
//! let a = builder.register("A", 1).unwrap();
//! let b = builder.register("B", 10).unwrap();
//! let registry = builder.build();
//!
//! let mut assessments = Assessments::new();
//! assessments.award(&registry, &a);
//! assessments.award(&registry, &b);
//!
//! assert_eq!(assessments.score(), 11);
//! assert_eq!(assessments.display(&registry).to_string(), "score=11, A=1, B=10");
//! ```

mod assessments;
mod key;
mod ranking;
mod registry;

pub use assessments::{csv_row, display, equal, merge, Assessments, AssessmentsDisplay};
pub use key::AssessmentKey;
pub use ranking::{rank_by_score, walk_by_score};
pub use registry::{KeyRegistry, KeyRegistryBuilder};

use thiserror::Error;

/// Names of the assessment keys every evaluation registers.
pub mod keys {
    /// Successfully executed files.
    pub const FILES_EXECUTED: &str = "files-executed";
    /// Cases where 100% statement coverage was reached.
    pub const COVERAGE_STATEMENT: &str = "coverage-statement";
    /// The model responded without error.
    pub const RESPONSE_NO_ERROR: &str = "response-no-error";
    /// The model response was not empty.
    pub const RESPONSE_NOT_EMPTY: &str = "response-not-empty";
    /// The model responded with code.
    pub const RESPONSE_WITH_CODE: &str = "response-with-code";
    /// The model did not produce more content than requested.
    pub const RESPONSE_NO_EXCESS: &str = "response-no-excess";

    /// Default keys with their points.
    pub const DEFAULTS: &[(&str, u64)] = &[
        (FILES_EXECUTED, 1),
        (COVERAGE_STATEMENT, 10),
        (RESPONSE_NO_ERROR, 1),
        (RESPONSE_NOT_EMPTY, 1),
        (RESPONSE_WITH_CODE, 1),
        (RESPONSE_NO_EXCESS, 1),
    ];
}

/// Errors raised while building a key registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Assessment key '{0}' is already registered")]
    DuplicateKey(String),

    #[error("Unknown assessment key '{0}'")]
    UnknownKey(String),
}

pub type MetricsResult<T> = Result<T, MetricsError>;
