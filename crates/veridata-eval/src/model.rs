use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use veridata_core::Value;
use veridata_suite::Expectation;

/// Options for expectation evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalOptions {
    /// Cap on failing values captured per result (K).
    pub max_examples: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { max_examples: 20 }
    }
}

/// How a result entry came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// The predicate ran over the column.
    Evaluated,
    /// The referenced column does not exist in the dataset.
    SchemaError,
    /// The predicate parameters cannot be compared with the column values.
    TypeMismatch,
    /// The binding's dataset could not be loaded at all.
    ExecutionError,
}

/// Structured outcome of evaluating one expectation.
///
/// Immutable once produced. `expectation` is absent only for
/// `execution_error` entries, which stand in for a whole binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Name of the suite this result belongs to.
    pub suite: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectation: Option<Expectation>,
    pub kind: ResultKind,
    pub success: bool,
    /// Rows in the evaluated column.
    pub element_count: u64,
    pub unexpected_count: u64,
    /// First K offending values, in original row order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unexpected_sample: Vec<Value>,
    /// Summary statistics observed during evaluation.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub observed: BTreeMap<String, serde_json::Value>,
}

/// Aggregated outcome of one checkpoint execution.
///
/// `success` is never stored: it is recomputed from the result list on
/// every call, so it cannot go stale.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    /// Checkpoint name this run belongs to.
    pub checkpoint: String,
    /// Concatenation, in binding order, of every binding's results in
    /// expectation order.
    pub results: Vec<ValidationResult>,
}

impl RunReport {
    /// Conjunction over every contained result.
    pub fn success(&self) -> bool {
        self.results.iter().all(|result| result.success)
    }

    /// Number of results that did not succeed.
    pub fn failure_count(&self) -> u64 {
        self.results.iter().filter(|result| !result.success).count() as u64
    }

    /// Serializable view of this report, with `success` derived now.
    pub fn document(&self) -> RunReportDoc {
        RunReportDoc {
            run_id: self.run_id.clone(),
            started_at: self.started_at.to_rfc3339(),
            checkpoint: self.checkpoint.clone(),
            success: self.success(),
            results: self.results.clone(),
        }
    }
}

/// JSON artifact written for each run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReportDoc {
    pub run_id: String,
    pub started_at: String,
    pub checkpoint: String,
    pub success: bool,
    pub results: Vec<ValidationResult>,
}
