//! Error types for table transformation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A column required by a profile formatter is absent.
    #[error("{profile} table has no '{column}' column")]
    MissingColumn { profile: String, column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
