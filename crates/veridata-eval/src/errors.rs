use thiserror::Error;

/// Errors emitted by the evaluation engine and its collaborators.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A batch source could not produce its dataset.
    #[error("source error: {0}")]
    Source(String),
    /// Strict-mode signal: the run finished with failing expectations.
    #[error("validation failed with {0} failing expectation(s)")]
    FailedExpectations(u64),
    /// I/O failure inside a batch source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
