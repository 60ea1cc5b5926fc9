//! Evaluation collaborators
//!
//! A [`Model`] runs tasks and reports what it achieved as [`Assessments`].
//! The [`Evaluation`] coordinator fans the (model, task) units out over a
//! thread pool, then merges every unit's collection into one collection per
//! model on the calling thread.

mod runner;

pub use runner::{Evaluation, EvaluationResult, FailedRun};

use crate::metrics::Assessments;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Identifier of a task a model can be asked to perform, e.g. `write-tests`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskIdentifier(String);

impl TaskIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inputs shared by every task of one evaluation
#[derive(Debug, Clone)]
pub struct TaskContext {
    /// Language the repository is written in
    pub language: String,
    /// Repository the tasks operate on
    pub repository_path: PathBuf,
}

/// A task that failed part-way.
///
/// Whatever was assessed before the failure is kept in `partial` and still
/// counts towards the model's result.
#[derive(Error, Debug)]
#[error("{error:#}")]
pub struct TaskFailure {
    pub partial: Assessments,
    pub error: anyhow::Error,
}

impl TaskFailure {
    pub fn new(partial: Assessments, error: anyhow::Error) -> Self {
        Self { partial, error }
    }
}

/// A model under evaluation
pub trait Model: Send + Sync {
    /// Unique model identifier, used as the leaderboard entry name
    fn id(&self) -> &str;

    /// Whether the model can perform `task`
    fn is_task_supported(&self, task: &TaskIdentifier) -> bool;

    /// Run `task` and return the assessments earned
    fn run_task(
        &self,
        context: &TaskContext,
        task: &TaskIdentifier,
    ) -> Result<Assessments, TaskFailure>;
}
