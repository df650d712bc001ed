use serde::{Deserialize, Serialize};
use veridata_core::Value;

/// Closed set of column-level predicates.
///
/// The interchange representation is `{ "kind": ..., "params": ... }`;
/// an unknown kind is a deserialization error, so malformed suites fail
/// before any row scan. Adding a kind means adding one variant here and
/// one evaluator in the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum Predicate {
    /// Value within inclusive bounds; an absent bound is unbounded on
    /// that side. Missing values are excluded from pass/fail and counted
    /// separately.
    Between {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Value>,
    },
    /// Value is a member of the allowed set. A missing value fails unless
    /// the set explicitly contains null.
    InSet { value_set: Vec<Value> },
    /// Value occurs exactly once across the whole column.
    Unique,
    /// Value is not the missing marker.
    NotNull,
}

impl Predicate {
    /// Stable identifier matching the interchange `kind` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Predicate::Between { .. } => "between",
            Predicate::InSet { .. } => "in_set",
            Predicate::Unique => "unique",
            Predicate::NotNull => "not_null",
        }
    }
}

/// A single declarative rule about one column's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    /// Column the predicate applies to.
    pub column: String,
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl Expectation {
    pub fn new(column: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            column: column.into(),
            predicate,
        }
    }
}

/// A named, ordered collection of expectations.
///
/// Order is preserved and defines report ordering. Duplicate expectations
/// are legal and evaluated independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationSuite {
    /// Suite name, carried into every result it produces.
    pub name: String,
    /// Expectations in evaluation order.
    pub expectations: Vec<Expectation>,
}

impl ExpectationSuite {
    pub fn new(name: impl Into<String>, expectations: Vec<Expectation>) -> Self {
        Self {
            name: name.into(),
            expectations,
        }
    }
}
