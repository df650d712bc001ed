//! Validation engine for Veridata.
//!
//! The engine binds an immutable dataset to an expectation suite and
//! produces one result per expectation, in suite order. A checkpoint
//! orchestrates one or more (source, suite) bindings into a single run
//! report. All evaluation is synchronous over in-memory batches; loading
//! data belongs to the `BatchSource` implementations supplied by callers.

pub mod checkpoint;
pub mod engine;
pub mod errors;
pub mod model;
pub mod report;
pub mod sources;

pub use checkpoint::{Binding, Checkpoint};
pub use engine::Validator;
pub use errors::EvalError;
pub use model::{EvalOptions, ResultKind, RunReport, RunReportDoc, ValidationResult};
pub use report::render_report;
pub use sources::{BatchSource, MemorySource};
