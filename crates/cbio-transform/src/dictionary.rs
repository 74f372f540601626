//! Data dictionary derivation from a typed table.

use std::collections::HashSet;

use cbio_common::any_to_json;
use cbio_model::{
    ColumnProvenance, DataType, Diagnostic, DiagnosticCode, DiagnosticReport, DictionaryRecord,
    DisplayOrder, ValueDomain,
};
use polars::prelude::{AnyValue, ChunkAgg, Column, PolarsResult};
use serde_json::Value;
use tracing::warn;

use crate::coercion::{TypedColumnInfo, TypedTable};

/// Emits one [`DictionaryRecord`] per column of a typed table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryBuilder {
    max_allowed_values: Option<usize>,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns with more distinct values than `max` get an empty list.
    pub fn with_max_allowed_values(mut self, max: Option<usize>) -> Self {
        self.max_allowed_values = max;
        self
    }

    /// Records use the resolved column type. Display name, description and
    /// order come from `provenance` when the column has an entry, otherwise
    /// from the header text, an empty string and 0.
    pub fn build(
        &self,
        table: &TypedTable,
        provenance: &ColumnProvenance,
        report: &mut DiagnosticReport,
    ) -> Vec<DictionaryRecord> {
        table
            .columns
            .iter()
            .zip(table.data.get_columns())
            .map(|(info, column)| self.record(info, column, provenance, report))
            .collect()
    }

    fn record(
        &self,
        info: &TypedColumnInfo,
        column: &Column,
        provenance: &ColumnProvenance,
        report: &mut DiagnosticReport,
    ) -> DictionaryRecord {
        let annotation = provenance.get(&info.key);
        let allowed_values = if info.data_type == DataType::Number {
            match numeric_range(column) {
                Ok(range) => ValueDomain::Range(range),
                Err(err) => {
                    warn!(column = %info.key, error = %err, "range computation failed");
                    report.push(Diagnostic::warning(
                        DiagnosticCode::RangeFailed,
                        Some(&info.key),
                        format!("could not compute range of '{}': {err}", info.key),
                    ));
                    ValueDomain::empty()
                }
            }
        } else {
            let values = distinct_values(column);
            match self.max_allowed_values {
                Some(max) if values.len() > max => ValueDomain::empty(),
                _ => ValueDomain::Values(values),
            }
        };

        DictionaryRecord {
            key: info.key.clone(),
            name: annotation.map_or_else(|| info.header.clone(), |a| a.display_name.clone()),
            description: annotation.map(|a| a.description.clone()).unwrap_or_default(),
            data_type: info.data_type,
            notes: String::new(),
            allowed_values,
            order: annotation.map_or_else(DisplayOrder::default, |a| a.display_order.clone()),
        }
    }
}

/// `[min, max]` over non-null values; both `None` when all are missing.
pub fn numeric_range(column: &Column) -> PolarsResult<[Option<f64>; 2]> {
    let values = column.as_materialized_series().f64()?;
    Ok([values.min(), values.max()])
}

/// Distinct non-null values in first-seen order.
pub fn distinct_values(column: &Column) -> Vec<Value> {
    let series = column.as_materialized_series();
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for index in 0..series.len() {
        let value = series.get(index).unwrap_or(AnyValue::Null);
        if matches!(value, AnyValue::Null) {
            continue;
        }
        let value = any_to_json(value);
        if seen.insert(value.to_string()) {
            values.push(value);
        }
    }
    values
}
