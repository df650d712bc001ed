use thiserror::Error;

/// Core error type shared across Veridata crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced column does not exist in the dataset.
    #[error("unknown column: {0}")]
    MissingColumn(String),
    /// The dataset violates internal invariants.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
}

/// Convenience alias for results returned by Veridata crates.
pub type Result<T> = std::result::Result<T, Error>;
