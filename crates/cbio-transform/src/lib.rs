//! Table transformation for converted datasets.
//!
//! - **missing**: pseudo-missing literal substitution
//! - **inference**: `NUMBER` / `BOOLEAN` / `STRING` classification
//! - **coercion**: declared-vs-inferred reconciliation and casting into a
//!   Polars-backed [`TypedTable`]
//! - **dictionary**: per-column schema records
//! - **formatter**: per-profile reshaping of omics tables

pub mod coercion;
pub mod dictionary;
pub mod error;
pub mod formatter;
pub mod inference;
pub mod missing;

pub use coercion::{
    CoercionFailure, TypeCoercionEngine, TypedColumnInfo, TypedTable, cast_column, parse_boolean,
};
pub use dictionary::{DictionaryBuilder, distinct_values, numeric_range};
pub use error::{Result, TransformError};
pub use formatter::{format_profile, transpose_gene_matrix};
pub use inference::infer_type;
pub use missing::{BASELINE_MISSING, EXTENDED_MISSING, MissingValuePolicy};
