//! Shared utilities for the cbio crates.
//!
//! Polars `AnyValue` conversions used when reading typed columns back out
//! for dictionaries and summaries, plus the number parser shared by type
//! inference and coercion.

pub mod polars;

pub use polars::{any_to_f64, any_to_json, any_to_string, format_numeric, parse_f64};
