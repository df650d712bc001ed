use jsonschema::JSONSchema;
use serde_json::Value as JsonValue;

use crate::errors::{SuiteError, ValidationIssue, ValidationReport};
use crate::model::{ExpectationSuite, Predicate};

/// Parsed suite with accumulated warnings.
#[derive(Debug, Clone)]
pub struct ValidatedSuite {
    pub suite: ExpectationSuite,
    pub warnings: Vec<ValidationIssue>,
}

/// Validate a suite JSON document against the suite JSON Schema.
pub fn validate_suite_json(
    suite_json: &JsonValue,
    suite_schema: &JsonValue,
) -> Result<ValidationReport, SuiteError> {
    let compiled =
        JSONSchema::compile(suite_schema).map_err(|err| SuiteError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(suite_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push(ValidationIssue::error(
                "schema_violation",
                path,
                error.to_string(),
            ));
        }
    }

    Ok(report)
}

/// Validate a parsed suite's semantic invariants.
///
/// These checks run before any evaluation: a suite that fails here never
/// reaches the engine.
pub fn validate_suite(suite: &ExpectationSuite) -> ValidationReport {
    let mut report = ValidationReport::default();

    if suite.name.trim().is_empty() {
        report.push(ValidationIssue::error(
            "empty_suite_name",
            "/name",
            "suite name must not be empty",
        ));
    }

    if suite.expectations.is_empty() {
        report.push(
            ValidationIssue::warning(
                "empty_suite",
                "/expectations",
                "suite contains no expectations",
            )
            .with_hint("a run over this suite always succeeds".to_string()),
        );
    }

    for (index, expectation) in suite.expectations.iter().enumerate() {
        let path = format!("/expectations/{index}");

        if expectation.column.trim().is_empty() {
            report.push(ValidationIssue::error(
                "empty_column",
                format!("{path}/column"),
                "expectation column must not be empty",
            ));
        }

        match &expectation.predicate {
            Predicate::Between { min, max } => match (min, max) {
                (None, None) => {
                    report.push(
                        ValidationIssue::warning(
                            "unbounded_between",
                            path.clone(),
                            "between with no bounds passes every value",
                        )
                        .with_hint("set min, max, or both".to_string()),
                    );
                }
                (Some(min), Some(max)) => match min.partial_cmp_value(max) {
                    None => {
                        report.push(ValidationIssue::error(
                            "incomparable_bounds",
                            path.clone(),
                            format!("min '{min}' and max '{max}' have no common ordering"),
                        ));
                    }
                    Some(std::cmp::Ordering::Greater) => {
                        report.push(ValidationIssue::error(
                            "inverted_bounds",
                            path.clone(),
                            format!("min '{min}' is greater than max '{max}'"),
                        ));
                    }
                    _ => {}
                },
                _ => {}
            },
            Predicate::InSet { value_set } => {
                if value_set.is_empty() {
                    report.push(
                        ValidationIssue::warning(
                            "empty_value_set",
                            path.clone(),
                            "in_set with an empty set fails every value",
                        )
                        .with_hint("list at least one allowed value".to_string()),
                    );
                }
            }
            Predicate::Unique | Predicate::NotNull => {}
        }
    }

    report
}

/// Validate a suite document end to end: structure, parse, semantics.
///
/// Returns the parsed suite with any warnings on success, or the full
/// issue report on failure.
pub fn validate_suite_document(
    suite_json: &JsonValue,
    suite_schema: &JsonValue,
) -> Result<ValidatedSuite, ValidationReport> {
    let structural = match validate_suite_json(suite_json, suite_schema) {
        Ok(report) => report,
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push(ValidationIssue::error(
                "schema_validation_error",
                "/",
                err.to_string(),
            ));
            return Err(report);
        }
    };

    if !structural.is_ok() {
        return Err(structural);
    }

    let suite: ExpectationSuite = match serde_json::from_value(suite_json.clone()) {
        Ok(suite) => suite,
        Err(err) => {
            let mut report = structural;
            report.push(ValidationIssue::error("parse_error", "/", err.to_string()));
            return Err(report);
        }
    };

    let mut semantic = validate_suite(&suite);
    semantic.merge(structural);

    if semantic.is_ok() {
        Ok(ValidatedSuite {
            suite,
            warnings: semantic.warnings,
        })
    } else {
        Err(semantic)
    }
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
