use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use veridata_suite::ExpectationSuite;

use crate::engine::Validator;
use crate::errors::EvalError;
use crate::model::{EvalOptions, ResultKind, RunReport, ValidationResult};
use crate::sources::BatchSource;

/// One (source, suite) pair evaluated by a checkpoint.
pub struct Binding {
    pub source: Box<dyn BatchSource>,
    pub suite: ExpectationSuite,
}

impl Binding {
    pub fn new(source: impl BatchSource + 'static, suite: ExpectationSuite) -> Self {
        Self {
            source: Box::new(source),
            suite,
        }
    }
}

/// Orchestrates one named run over an explicit, ordered binding list.
///
/// Each run gets a fresh id and timestamp and produces a new report;
/// nothing from earlier runs is patched or reused.
pub struct Checkpoint {
    name: String,
    validator: Validator,
}

impl Checkpoint {
    pub fn new(name: impl Into<String>, options: EvalOptions) -> Self {
        Self {
            name: name.into(),
            validator: Validator::new(options),
        }
    }

    /// Evaluate every binding in order and aggregate the results.
    ///
    /// A binding whose source fails to load contributes a single
    /// `execution_error` result and the run continues with the next
    /// binding; completed bindings are never discarded.
    pub fn run(&self, bindings: &[Binding]) -> RunReport {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        info!(checkpoint = %self.name, run_id = %run_id, bindings = bindings.len(), "checkpoint run started");

        let mut results = Vec::new();
        for binding in bindings {
            match binding.source.load() {
                Ok(dataset) => {
                    results.extend(self.validator.validate(&dataset, &binding.suite));
                }
                Err(err) => {
                    warn!(
                        checkpoint = %self.name,
                        source = %binding.source.describe(),
                        error = %err,
                        "binding failed to load"
                    );
                    results.push(execution_error_result(
                        &binding.suite.name,
                        &binding.source.describe(),
                        &err,
                    ));
                }
            }
        }

        let report = RunReport {
            run_id,
            started_at,
            checkpoint: self.name.clone(),
            results,
        };
        info!(
            checkpoint = %self.name,
            run_id = %report.run_id,
            success = report.success(),
            failures = report.failure_count(),
            "checkpoint run finished"
        );
        report
    }
}

fn execution_error_result(
    suite_name: &str,
    source: &str,
    err: &EvalError,
) -> ValidationResult {
    let mut observed = BTreeMap::new();
    observed.insert("execution_error".to_string(), json!(true));
    observed.insert("source".to_string(), json!(source));
    observed.insert("error".to_string(), json!(err.to_string()));

    ValidationResult {
        suite: suite_name.to_string(),
        expectation: None,
        kind: ResultKind::ExecutionError,
        success: false,
        element_count: 0,
        unexpected_count: 0,
        unexpected_sample: Vec::new(),
        observed,
    }
}
