use std::collections::BTreeMap;
use std::collections::HashMap;

use serde_json::json;
use tracing::debug;
use veridata_core::{Dataset, Value};
use veridata_suite::{Expectation, ExpectationSuite, Predicate};

use crate::model::{EvalOptions, ResultKind, ValidationResult};

/// Evaluates an expectation suite against an in-memory dataset.
///
/// Evaluation is a deterministic single-threaded scan in row order, so
/// the captured samples are always the first K offenders encountered.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: EvalOptions,
}

impl Validator {
    pub fn new(options: EvalOptions) -> Self {
        Self { options }
    }

    /// Evaluate every expectation of `suite` against `dataset`.
    ///
    /// Returns exactly one result per expectation, in suite order. A
    /// missing column or an incomparable bound fails that expectation
    /// only; the remaining expectations still run.
    pub fn validate(&self, dataset: &Dataset, suite: &ExpectationSuite) -> Vec<ValidationResult> {
        suite
            .expectations
            .iter()
            .map(|expectation| {
                let result = self.evaluate(dataset, &suite.name, expectation);
                debug!(
                    suite = %suite.name,
                    column = %expectation.column,
                    kind = expectation.predicate.kind(),
                    success = result.success,
                    unexpected = result.unexpected_count,
                    "expectation evaluated"
                );
                result
            })
            .collect()
    }

    fn evaluate(
        &self,
        dataset: &Dataset,
        suite_name: &str,
        expectation: &Expectation,
    ) -> ValidationResult {
        let column = match dataset.column(&expectation.column) {
            Ok(column) => column,
            Err(err) => {
                return schema_error_result(suite_name, expectation, dataset.row_count(), &err)
            }
        };

        match &expectation.predicate {
            Predicate::Between { min, max } => {
                self.eval_between(suite_name, expectation, column, min.as_ref(), max.as_ref())
            }
            Predicate::InSet { value_set } => {
                self.eval_in_set(suite_name, expectation, column, value_set)
            }
            Predicate::NotNull => self.eval_not_null(suite_name, expectation, column),
            Predicate::Unique => self.eval_unique(suite_name, expectation, column),
        }
    }

    fn eval_between(
        &self,
        suite_name: &str,
        expectation: &Expectation,
        column: &[Value],
        min: Option<&Value>,
        max: Option<&Value>,
    ) -> ValidationResult {
        let mut missing = 0u64;
        let mut unexpected = 0u64;
        let mut sample = Vec::new();

        for value in column {
            if value.is_null() {
                missing += 1;
                continue;
            }
            match in_bounds(value, min, max) {
                Ok(true) => {}
                Ok(false) => {
                    unexpected += 1;
                    if sample.len() < self.options.max_examples {
                        sample.push(value.clone());
                    }
                }
                Err(message) => {
                    return type_mismatch_result(
                        suite_name,
                        expectation,
                        column.len() as u64,
                        message,
                    );
                }
            }
        }

        let element_count = column.len() as u64;
        let evaluated = element_count - missing;
        let mut observed = BTreeMap::new();
        observed.insert("missing_count".to_string(), json!(missing));
        observed.insert(
            "unexpected_percent".to_string(),
            json!(percent(unexpected, evaluated)),
        );

        evaluated_result(
            suite_name,
            expectation,
            element_count,
            unexpected,
            sample,
            observed,
        )
    }

    fn eval_in_set(
        &self,
        suite_name: &str,
        expectation: &Expectation,
        column: &[Value],
        value_set: &[Value],
    ) -> ValidationResult {
        let null_allowed = value_set.iter().any(Value::is_null);
        let mut missing = 0u64;
        let mut unexpected = 0u64;
        let mut sample = Vec::new();

        for value in column {
            let passes = if value.is_null() {
                missing += 1;
                null_allowed
            } else {
                value_set.contains(value)
            };
            if !passes {
                unexpected += 1;
                if sample.len() < self.options.max_examples {
                    sample.push(value.clone());
                }
            }
        }

        let element_count = column.len() as u64;
        let mut observed = BTreeMap::new();
        observed.insert("missing_count".to_string(), json!(missing));
        observed.insert(
            "unexpected_percent".to_string(),
            json!(percent(unexpected, element_count)),
        );

        evaluated_result(
            suite_name,
            expectation,
            element_count,
            unexpected,
            sample,
            observed,
        )
    }

    fn eval_not_null(
        &self,
        suite_name: &str,
        expectation: &Expectation,
        column: &[Value],
    ) -> ValidationResult {
        let mut unexpected = 0u64;
        let mut sample = Vec::new();

        for value in column {
            if value.is_null() {
                unexpected += 1;
                if sample.len() < self.options.max_examples {
                    sample.push(Value::Null);
                }
            }
        }

        let element_count = column.len() as u64;
        let mut observed = BTreeMap::new();
        observed.insert("missing_count".to_string(), json!(unexpected));
        observed.insert(
            "unexpected_percent".to_string(),
            json!(percent(unexpected, element_count)),
        );

        evaluated_result(
            suite_name,
            expectation,
            element_count,
            unexpected,
            sample,
            observed,
        )
    }

    /// Uniqueness is a column-wide property: every occurrence of a
    /// duplicated value counts as unexpected, the first one included.
    /// Nulls participate like any other value.
    fn eval_unique(
        &self,
        suite_name: &str,
        expectation: &Expectation,
        column: &[Value],
    ) -> ValidationResult {
        let mut frequency: HashMap<String, u64> = HashMap::new();
        for value in column {
            *frequency.entry(value.key()).or_insert(0) += 1;
        }

        let duplicated_values = frequency.values().filter(|count| **count > 1).count() as u64;
        let unexpected: u64 = frequency.values().filter(|count| **count > 1).sum();

        let mut sample = Vec::new();
        for value in column {
            if sample.len() >= self.options.max_examples {
                break;
            }
            if frequency[&value.key()] > 1 {
                sample.push(value.clone());
            }
        }

        let element_count = column.len() as u64;
        let mut observed = BTreeMap::new();
        observed.insert("distinct_count".to_string(), json!(frequency.len()));
        observed.insert(
            "duplicate_value_count".to_string(),
            json!(duplicated_values),
        );

        evaluated_result(
            suite_name,
            expectation,
            element_count,
            unexpected,
            sample,
            observed,
        )
    }
}

/// Check `value` against inclusive bounds.
///
/// An undefined ordering between the value and a bound is a type
/// mismatch, never a silent false.
fn in_bounds(value: &Value, min: Option<&Value>, max: Option<&Value>) -> Result<bool, String> {
    if let Some(min) = min {
        match value.partial_cmp_value(min) {
            None => return Err(mismatch_message(value, min)),
            Some(std::cmp::Ordering::Less) => return Ok(false),
            Some(_) => {}
        }
    }
    if let Some(max) = max {
        match value.partial_cmp_value(max) {
            None => return Err(mismatch_message(value, max)),
            Some(std::cmp::Ordering::Greater) => return Ok(false),
            Some(_) => {}
        }
    }
    Ok(true)
}

fn mismatch_message(value: &Value, bound: &Value) -> String {
    format!("cannot compare value '{value}' with bound '{bound}'")
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        let raw = part as f64 * 100.0 / whole as f64;
        (raw * 100.0).round() / 100.0
    }
}

fn evaluated_result(
    suite_name: &str,
    expectation: &Expectation,
    element_count: u64,
    unexpected_count: u64,
    unexpected_sample: Vec<Value>,
    observed: BTreeMap<String, serde_json::Value>,
) -> ValidationResult {
    ValidationResult {
        suite: suite_name.to_string(),
        expectation: Some(expectation.clone()),
        kind: ResultKind::Evaluated,
        success: unexpected_count == 0,
        element_count,
        unexpected_count,
        unexpected_sample,
        observed,
    }
}

fn schema_error_result(
    suite_name: &str,
    expectation: &Expectation,
    row_count: usize,
    err: &veridata_core::Error,
) -> ValidationResult {
    let mut observed = BTreeMap::new();
    observed.insert("schema_error".to_string(), json!(true));
    observed.insert("error".to_string(), json!(err.to_string()));

    ValidationResult {
        suite: suite_name.to_string(),
        expectation: Some(expectation.clone()),
        kind: ResultKind::SchemaError,
        success: false,
        element_count: row_count as u64,
        unexpected_count: row_count as u64,
        unexpected_sample: Vec::new(),
        observed,
    }
}

fn type_mismatch_result(
    suite_name: &str,
    expectation: &Expectation,
    element_count: u64,
    message: String,
) -> ValidationResult {
    let mut observed = BTreeMap::new();
    observed.insert("type_mismatch".to_string(), json!(message));

    ValidationResult {
        suite: suite_name.to_string(),
        expectation: Some(expectation.clone()),
        kind: ResultKind::TypeMismatch,
        success: false,
        element_count,
        unexpected_count: element_count,
        unexpected_sample: Vec::new(),
        observed,
    }
}
