//! Parallel evaluation coordinator

use super::{Model, TaskContext, TaskFailure, TaskIdentifier};
use crate::metrics::{merge, Assessments, KeyRegistry};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A unit of work that did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRun {
    pub model: String,
    pub task: TaskIdentifier,
    pub error: String,
}

/// Aggregated outcome of an evaluation
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    /// One merged collection per model, including models that ran nothing
    pub per_model: BTreeMap<String, Assessments>,
    /// Collection of every unit of work, keyed by model then task
    pub per_task: BTreeMap<(String, TaskIdentifier), Assessments>,
    /// Units that failed, in model then task order
    pub failures: Vec<FailedRun>,
}

impl EvaluationResult {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs every supported task of every model
pub struct Evaluation<'a> {
    registry: &'a KeyRegistry,
    context: &'a TaskContext,
}

impl<'a> Evaluation<'a> {
    pub fn new(registry: &'a KeyRegistry, context: &'a TaskContext) -> Self {
        Self { registry, context }
    }

    /// Run all units of work in parallel and merge the results per model.
    ///
    /// Each unit owns its collection while it runs. Merging happens only
    /// after every unit has finished, on the calling thread.
    pub fn run(&self, models: &[Box<dyn Model>], tasks: &[TaskIdentifier]) -> EvaluationResult {
        let mut units = Vec::new();
        for model in models {
            for task in tasks {
                if model.is_task_supported(task) {
                    units.push((&**model, task));
                } else {
                    debug!("Model {} does not support task {}, skipping", model.id(), task);
                }
            }
        }

        let outcomes: Vec<(&str, &TaskIdentifier, Result<Assessments, TaskFailure>)> = units
            .par_iter()
            .map(|(model, task)| (model.id(), *task, model.run_task(self.context, task)))
            .collect();

        let mut result = EvaluationResult {
            per_model: models
                .iter()
                .map(|model| (model.id().to_string(), Assessments::new()))
                .collect(),
            per_task: BTreeMap::new(),
            failures: Vec::new(),
        };

        for (model, task, outcome) in outcomes {
            let assessments = match outcome {
                Ok(assessments) => assessments,
                Err(failure) => {
                    warn!("Model {} failed task {}: {}", model, task, failure);
                    result.failures.push(FailedRun {
                        model: model.to_string(),
                        task: task.clone(),
                        error: failure.to_string(),
                    });
                    failure.partial
                }
            };

            let merged = merge(result.per_model.get(model), Some(&assessments));
            result.per_model.insert(model.to_string(), merged);

            let task_key = (model.to_string(), task.clone());
            let merged = merge(result.per_task.get(&task_key), Some(&assessments));
            result.per_task.insert(task_key, merged);
        }

        for (model, assessments) in &result.per_model {
            info!("{}: {}", model, assessments.display(self.registry));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{keys, AssessmentKey, KeyRegistryBuilder};
    use anyhow::anyhow;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Model with scripted per-task outcomes
    struct ScriptedModel {
        id: String,
        registry: KeyRegistry,
        /// Keys awarded per task, and whether the task then succeeds
        script: HashMap<String, (Vec<AssessmentKey>, bool)>,
    }

    impl ScriptedModel {
        fn new(id: &str, registry: &KeyRegistry) -> Self {
            Self {
                id: id.to_string(),
                registry: registry.clone(),
                script: HashMap::new(),
            }
        }

        fn succeeds(mut self, task: &str, awarded: &[&str]) -> Self {
            let awarded = self.keys(awarded);
            self.script.insert(task.to_string(), (awarded, true));
            self
        }

        fn fails(mut self, task: &str, awarded: &[&str]) -> Self {
            let awarded = self.keys(awarded);
            self.script.insert(task.to_string(), (awarded, false));
            self
        }

        fn keys(&self, names: &[&str]) -> Vec<AssessmentKey> {
            names
                .iter()
                .map(|name| self.registry.key(name).unwrap())
                .collect()
        }
    }

    impl Model for ScriptedModel {
        fn id(&self) -> &str {
            &self.id
        }

        fn is_task_supported(&self, task: &TaskIdentifier) -> bool {
            self.script.contains_key(task.as_str())
        }

        fn run_task(
            &self,
            _context: &TaskContext,
            task: &TaskIdentifier,
        ) -> Result<Assessments, TaskFailure> {
            let (awarded, ok) = &self.script[task.as_str()];
            let mut assessments = Assessments::new();
            for key in awarded {
                assessments.award(&self.registry, key);
            }
            if *ok {
                Ok(assessments)
            } else {
                Err(TaskFailure::new(assessments, anyhow!("compilation failed")))
            }
        }
    }

    fn context() -> TaskContext {
        TaskContext {
            language: "golang".into(),
            repository_path: PathBuf::from("testdata/plain"),
        }
    }

    fn tasks() -> Vec<TaskIdentifier> {
        vec![TaskIdentifier::new("write-tests"), TaskIdentifier::new("code-repair")]
    }

    #[test]
    fn test_merges_tasks_per_model() {
        let registry = KeyRegistry::with_defaults();
        let context = context();
        let models: Vec<Box<dyn Model>> = vec![Box::new(
            ScriptedModel::new("model-a", &registry)
                .succeeds("write-tests", &[keys::RESPONSE_NO_ERROR, keys::COVERAGE_STATEMENT])
                .succeeds("code-repair", &[keys::RESPONSE_NO_ERROR, keys::FILES_EXECUTED]),
        )];

        let result = Evaluation::new(&registry, &context).run(&models, &tasks());

        assert!(result.is_success());
        let merged = &result.per_model["model-a"];
        assert_eq!(merged.score(), 13);
        assert_eq!(
            merged.display(&registry).to_string(),
            "score=13, coverage-statement=10, files-executed=1, response-no-error=2, \
             response-no-excess=0, response-not-empty=0, response-with-code=0"
        );
        assert_eq!(result.per_task.len(), 2);
        assert_eq!(
            result.per_task[&("model-a".to_string(), TaskIdentifier::new("write-tests"))].score(),
            11
        );
    }

    #[test]
    fn test_unsupported_tasks_are_skipped() {
        let registry = KeyRegistry::with_defaults();
        let context = context();
        let models: Vec<Box<dyn Model>> = vec![
            Box::new(
                ScriptedModel::new("model-a", &registry)
                    .succeeds("write-tests", &[keys::RESPONSE_NO_ERROR]),
            ),
            Box::new(ScriptedModel::new("model-idle", &registry)),
        ];

        let result = Evaluation::new(&registry, &context).run(&models, &tasks());

        assert_eq!(result.per_task.len(), 1);
        assert_eq!(result.per_model["model-a"].score(), 1);
        // Models without any supported task still get an (empty) entry
        assert!(result.per_model["model-idle"].is_empty());
    }

    #[test]
    fn test_failed_task_keeps_partial_assessments() {
        let registry = KeyRegistry::with_defaults();
        let context = context();
        let models: Vec<Box<dyn Model>> = vec![Box::new(
            ScriptedModel::new("model-a", &registry)
                .succeeds("write-tests", &[keys::RESPONSE_NO_ERROR])
                .fails("code-repair", &[keys::RESPONSE_NOT_EMPTY, keys::RESPONSE_WITH_CODE]),
        )];

        let result = Evaluation::new(&registry, &context).run(&models, &tasks());

        assert!(!result.is_success());
        assert_eq!(
            result.failures,
            vec![FailedRun {
                model: "model-a".into(),
                task: TaskIdentifier::new("code-repair"),
                error: "compilation failed".into(),
            }]
        );
        assert_eq!(result.per_model["model-a"].score(), 3);
    }

    #[test]
    fn test_many_models_in_parallel() {
        let mut builder = KeyRegistryBuilder::with_defaults();
        builder.reweight(keys::FILES_EXECUTED, 2).unwrap();
        let registry = builder.build();
        let context = context();

        let models: Vec<Box<dyn Model>> = (0..32)
            .map(|i| {
                Box::new(
                    ScriptedModel::new(&format!("model-{:02}", i), &registry)
                        .succeeds("write-tests", &[keys::FILES_EXECUTED])
                        .succeeds("code-repair", &[keys::FILES_EXECUTED]),
                ) as Box<dyn Model>
            })
            .collect();

        let result = Evaluation::new(&registry, &context).run(&models, &tasks());

        assert_eq!(result.per_model.len(), 32);
        assert!(result.per_model.values().all(|a| a.score() == 4));
    }
}
