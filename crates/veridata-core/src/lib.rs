//! Core contracts for Veridata.
//!
//! This crate defines the cell value model, the immutable column-oriented
//! dataset used as the evaluation target, and the shared error type.

pub mod dataset;
pub mod error;
pub mod value;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use value::Value;
