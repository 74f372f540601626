//! Per-column type reconciliation and casting.

use cbio_common::parse_f64;
use cbio_ingest::{RawColumn, RawTable};
use cbio_model::{ColumnProvenance, DataType, Diagnostic, DiagnosticCode, DiagnosticReport};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::Result;
use crate::inference::infer_type;
use crate::missing::MissingValuePolicy;

/// Resolved identity of one typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedColumnInfo {
    pub key: String,
    /// Source header text.
    pub header: String,
    pub data_type: DataType,
}

/// A table whose columns each carry exactly one resolved type.
///
/// `NUMBER` columns are `Float64`, `BOOLEAN` columns `Boolean` and
/// `STRING` columns `String`, all nullable.
#[derive(Debug, Clone)]
pub struct TypedTable {
    pub data: DataFrame,
    pub columns: Vec<TypedColumnInfo>,
}

impl TypedTable {
    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn info(&self, key: &str) -> Option<&TypedColumnInfo> {
        self.columns.iter().find(|info| info.key == key)
    }

    pub fn data_type(&self, key: &str) -> Option<DataType> {
        self.info(key).map(|info| info.data_type)
    }
}

/// Why a column could not be cast to its resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionFailure {
    #[error("column has {found} cells, table has {expected} rows")]
    LengthMismatch { expected: usize, found: usize },
}

/// Maps boolean literals; anything else is `None`.
pub fn parse_boolean(value: &str) -> Option<bool> {
    match value {
        "True" | "true" | "1" => Some(true),
        "False" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Casts string cells to a column of `data_type`.
///
/// Numbers that fail to parse become null rather than failing the column.
pub fn cast_column(
    key: &str,
    cells: &[Option<String>],
    data_type: DataType,
    rows: usize,
) -> std::result::Result<Column, CoercionFailure> {
    if cells.len() != rows {
        return Err(CoercionFailure::LengthMismatch {
            expected: rows,
            found: cells.len(),
        });
    }
    let series = match data_type {
        DataType::Number => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| cell.as_deref().and_then(parse_f64))
                .collect();
            Series::new(key.into(), values)
        }
        DataType::Boolean => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| cell.as_deref().and_then(parse_boolean))
                .collect();
            Series::new(key.into(), values)
        }
        DataType::String => string_series(key, cells),
    };
    Ok(series.into_column())
}

fn string_series(key: &str, cells: &[Option<String>]) -> Series {
    let values: Vec<Option<&str>> = cells.iter().map(Option::as_deref).collect();
    Series::new(key.into(), values)
}

/// Applies the missing-value policy and type inference to every column,
/// then casts each column to its resolved type.
#[derive(Debug, Clone, Default)]
pub struct TypeCoercionEngine {
    policy: MissingValuePolicy,
}

impl TypeCoercionEngine {
    pub fn new(policy: MissingValuePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MissingValuePolicy {
        &self.policy
    }

    /// Coerces `table`. The inferred type always wins over the declared
    /// one; disagreements are recorded as `type_mismatch` warnings and
    /// cast failures as `cast_failed` errors that leave the column as text.
    pub fn coerce(
        &self,
        table: &RawTable,
        provenance: &ColumnProvenance,
        report: &mut DiagnosticReport,
    ) -> Result<TypedTable> {
        let rows = table.row_count();
        let mut columns = Vec::with_capacity(table.width());
        let mut infos = Vec::with_capacity(table.width());

        for raw in table.columns() {
            let (column, info) = self.coerce_column(raw, rows, provenance, report);
            columns.push(column);
            infos.push(info);
        }

        let data = DataFrame::new(columns)?;
        Ok(TypedTable {
            data,
            columns: infos,
        })
    }

    fn coerce_column(
        &self,
        raw: &RawColumn,
        rows: usize,
        provenance: &ColumnProvenance,
        report: &mut DiagnosticReport,
    ) -> (Column, TypedColumnInfo) {
        let cells = self.policy.apply(&raw.cells);
        let inferred = infer_type(&cells);

        if let Some(declared) = provenance.get(&raw.key).map(|a| a.declared_type)
            && declared != inferred
        {
            let message = format!(
                "column '{}' declared {declared} but inferred {inferred}, using {inferred}",
                raw.key
            );
            warn!(column = %raw.key, %declared, %inferred, "declared type overridden");
            report.push(Diagnostic::warning(
                DiagnosticCode::TypeMismatch,
                Some(&raw.key),
                message,
            ));
        }

        let (column, data_type) = cast_or_keep_text(&raw.key, cells, inferred, rows, report);
        debug!(column = %raw.key, %data_type, "coerced column");

        (
            column,
            TypedColumnInfo {
                key: raw.key.clone(),
                header: raw.header.clone(),
                data_type,
            },
        )
    }
}

/// Casts `cells` to `inferred`; on failure records `cast_failed` and
/// returns the cells as a padded text column.
///
/// Columns of a [`RawTable`] always have the table's row count, so the
/// failure branch is only taken for cells that did not come from one.
fn cast_or_keep_text(
    key: &str,
    cells: Vec<Option<String>>,
    inferred: DataType,
    rows: usize,
    report: &mut DiagnosticReport,
) -> (Column, DataType) {
    match cast_column(key, &cells, inferred, rows) {
        Ok(column) => (column, inferred),
        Err(failure) => {
            warn!(column = %key, %failure, "cast failed, keeping text");
            report.push(Diagnostic::error(
                DiagnosticCode::CastFailed,
                Some(key),
                format!("failed to cast column '{key}' to {inferred}: {failure}"),
            ));
            let mut padded = cells;
            padded.resize(rows, None);
            (string_series(key, &padded).into_column(), DataType::String)
        }
    }
}
