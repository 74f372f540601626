//! Column-wise union of tables describing the same entities.

use cbio_model::{ColumnProvenance, Diagnostic, DiagnosticCode, DiagnosticReport};
use tracing::{debug, warn};

use crate::table::{RawColumn, RawTable};

/// Result of merging one or more tables.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    pub table: RawTable,
    pub provenance: ColumnProvenance,
    pub report: DiagnosticReport,
}

/// Accumulates columns left to right; the first column seen under a key
/// wins and later ones are dropped.
///
/// Provenance is merged the same way. A dropped column whose cells differ
/// from the kept one is reported as `duplicate_column_conflict`.
#[derive(Debug, Default)]
pub struct TableMerger {
    columns: Vec<RawColumn>,
    provenance: ColumnProvenance,
    report: DiagnosticReport,
}

impl TableMerger {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            provenance: ColumnProvenance::new(),
            report: DiagnosticReport::new(source),
        }
    }

    /// Adds every column of `table` in order, then the provenance keys not
    /// already present.
    pub fn add_table(&mut self, table: RawTable, provenance: &ColumnProvenance) {
        for column in table.into_columns() {
            self.add_column(column);
        }
        self.provenance.merge_from(provenance);
    }

    /// Adds one column; returns `false` if its key was already taken.
    pub fn add_column(&mut self, column: RawColumn) -> bool {
        let Some(kept) = self.columns.iter().find(|existing| existing.key == column.key) else {
            self.columns.push(column);
            return true;
        };
        if cells_differ(kept, &column) {
            let message = format!(
                "column '{}' (header '{}') dropped in favor of earlier '{}' with different values",
                column.key, column.header, kept.header
            );
            warn!(column = %column.key, "{message}");
            self.report.push(Diagnostic::warning(
                DiagnosticCode::DuplicateColumnConflict,
                Some(&column.key),
                message,
            ));
        } else {
            debug!(column = %column.key, "dropped identical duplicate column");
        }
        false
    }

    pub fn report_mut(&mut self) -> &mut DiagnosticReport {
        &mut self.report
    }

    pub fn finish(self) -> MergedTable {
        MergedTable {
            table: RawTable::new(self.columns),
            provenance: self.provenance,
            report: self.report,
        }
    }
}

fn cells_differ(kept: &RawColumn, dropped: &RawColumn) -> bool {
    let rows = kept.len().max(dropped.len());
    (0..rows).any(|row| kept.cell(row) != dropped.cell(row))
}

/// Merges tables in the given order.
pub fn merge_tables(
    source: impl Into<String>,
    parts: impl IntoIterator<Item = (RawTable, ColumnProvenance)>,
) -> MergedTable {
    let mut merger = TableMerger::new(source);
    for (table, provenance) in parts {
        merger.add_table(table, &provenance);
    }
    merger.finish()
}
