//! Error types for study ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading study files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// File has no header row.
    #[error("no header row in {path}")]
    EmptyFile { path: PathBuf },

    /// A data row has more cells than the header row.
    #[error("malformed row at {path}:{line}: expected at most {expected} cells, found {found}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    // === Discovery Errors ===
    /// None of the clinical files exist.
    #[error("no clinical files found in {path}")]
    NoClinicalFiles { path: PathBuf },

    /// Invalid filename pattern.
    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
