use veridata_core::Dataset;

use crate::errors::EvalError;

/// A collaborator that can produce a dataset for one checkpoint binding.
///
/// Loading is the only place I/O may happen; the validator itself never
/// touches a source. A failing `load` surfaces as an `execution_error`
/// result for that binding, not as an aborted run.
pub trait BatchSource {
    /// Human-readable identity of the batch, used in reports and logs.
    fn describe(&self) -> String;

    /// Produce the dataset for this binding.
    fn load(&self) -> Result<Dataset, EvalError>;
}

/// An already-materialized in-memory batch.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    dataset: Dataset,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, dataset: Dataset) -> Self {
        Self {
            name: name.into(),
            dataset,
        }
    }
}

impl BatchSource for MemorySource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<Dataset, EvalError> {
        Ok(self.dataset.clone())
    }
}
