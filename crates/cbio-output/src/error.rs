//! Error types for output generation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to read an input or create a directory.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output artifact.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a Parquet or TSV table.
    #[error("failed to write table {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },

    /// Failed to serialize a JSON document.
    #[error("failed to write JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the manifest TSV.
    #[error("failed to write manifest {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Hash algorithm outside md5/sha1/sha256/sha512.
    #[error("unsupported hash algorithm '{0}'")]
    UnsupportedHash(String),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
