//! evalmetrics - weighted assessment metrics for code-generation evaluations
//!
//! Models are asked to perform tasks; each task run yields an
//! [`Assessments`](metrics::Assessments) collection of weighted outcomes.
//! Collections are merged per model and ranked into a leaderboard that can
//! be rendered as text, CSV or JSON.

pub mod cli;
pub mod config;
pub mod evaluate;
pub mod metrics;
pub mod reporters;
pub mod tools;
