//! Expectation suite contracts and validation.
//!
//! A suite is the declarative side of the engine: an ordered list of
//! column-level expectations. Suites arrive either programmatically or as
//! JSON documents, which are validated structurally (JSON Schema) and
//! semantically before any row is scanned.

pub mod errors;
pub mod model;
pub mod validate;

pub use errors::{IssueSeverity, SuiteError, ValidationIssue, ValidationReport};
pub use model::{Expectation, ExpectationSuite, Predicate};
pub use validate::{ValidatedSuite, validate_suite, validate_suite_document, validate_suite_json};

/// Current contract version for suite documents.
pub const SUITE_VERSION: &str = "0.1";
