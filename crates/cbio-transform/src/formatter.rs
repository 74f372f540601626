//! Per-profile reshaping of omics tables before coercion.

use std::collections::HashSet;

use cbio_ingest::{RawColumn, RawTable, TableMerger, normalize_column_name};
use cbio_model::{DiagnosticReport, GeneticAlterationType, NameCase};
use tracing::{debug, info};

use crate::error::{Result, TransformError};
use crate::missing::MissingValuePolicy;

pub const GENE_SYMBOL_HEADER: &str = "Hugo_Symbol";
pub const GENE_SYMBOL: &str = "gene_symbol";
pub const ENTREZ_HEADER: &str = "Entrez_Gene_Id";
pub const SAMPLE_ID: &str = "sample_id";

/// Reshapes `table` according to the profile kind.
///
/// Gene-by-sample matrices (copy number, expression, methylation) are
/// transposed to sample-by-gene. Mutation, structural variant and
/// unrecognized profiles pass through unchanged.
pub fn format_profile(
    table: RawTable,
    alteration: &GeneticAlterationType,
    policy: &MissingValuePolicy,
    case: NameCase,
    report: &mut DiagnosticReport,
) -> Result<RawTable> {
    match alteration {
        GeneticAlterationType::CopyNumberAlteration
        | GeneticAlterationType::MrnaExpression
        | GeneticAlterationType::Methylation => {
            transpose_gene_matrix(&table, alteration, policy, case, report)
        }
        GeneticAlterationType::MutationExtended
        | GeneticAlterationType::StructuralVariant
        | GeneticAlterationType::Unrecognized(_) => Ok(table),
    }
}

/// Turns a `Hugo_Symbol` x samples matrix into a `sample_id` x genes table.
///
/// `Entrez_Gene_Id` is dropped. Rows with a missing gene symbol are
/// dropped, and for repeated symbols only the first row is kept.
pub fn transpose_gene_matrix(
    table: &RawTable,
    alteration: &GeneticAlterationType,
    policy: &MissingValuePolicy,
    case: NameCase,
    report: &mut DiagnosticReport,
) -> Result<RawTable> {
    let genes = table
        .column_by_header(GENE_SYMBOL_HEADER)
        .or_else(|| table.column_by_header(GENE_SYMBOL))
        .ok_or_else(|| TransformError::MissingColumn {
            profile: alteration.to_string(),
            column: GENE_SYMBOL_HEADER.to_string(),
        })?;

    let samples: Vec<&RawColumn> = table
        .columns()
        .iter()
        .filter(|column| column.key != genes.key && column.header != ENTREZ_HEADER)
        .collect();

    let mut seen = HashSet::new();
    let mut kept_rows = Vec::new();
    for row in 0..table.row_count() {
        let Some(symbol) = genes.cell(row).filter(|symbol| !policy.is_missing(symbol)) else {
            continue;
        };
        if seen.insert(symbol) {
            kept_rows.push((row, symbol));
        }
    }
    let dropped = table.row_count() - kept_rows.len();

    let mut merger = TableMerger::new(report.source.clone());
    merger.add_column(RawColumn::new(
        normalize_column_name(SAMPLE_ID, case),
        SAMPLE_ID,
        samples
            .iter()
            .map(|sample| Some(sample.header.clone()))
            .collect(),
    ));
    for (row, symbol) in &kept_rows {
        let cells = samples
            .iter()
            .map(|sample| sample.cells.get(*row).cloned().flatten())
            .collect();
        merger.add_column(RawColumn::new(
            normalize_column_name(symbol, case),
            *symbol,
            cells,
        ));
    }
    let merged = merger.finish();
    report.extend(merged.report);

    debug!(dropped_rows = dropped, "dropped null and repeated gene symbols");
    info!(
        profile = %alteration,
        samples = samples.len(),
        genes = merged.table.width().saturating_sub(1),
        "transposed gene matrix"
    );
    Ok(merged.table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(header: &str, values: &[Option<&str>]) -> RawColumn {
        RawColumn::new(
            header,
            header,
            values.iter().map(|v| v.map(str::to_string)).collect(),
        )
    }

    fn cna_table() -> RawTable {
        RawTable::new(vec![
            column("Hugo_Symbol", &[Some("TP53"), Some("KRAS"), Some("TP53"), Some("NA")]),
            column("Entrez_Gene_Id", &[Some("7157"), Some("3845"), Some("7157"), Some("1")]),
            column("S1", &[Some("-1"), Some("2"), Some("0"), Some("1")]),
            column("S2", &[Some("0"), None, Some("1"), Some("1")]),
        ])
    }

    #[test]
    fn test_transpose_cna() {
        let mut report = DiagnosticReport::new("data_cna.txt");
        let out = format_profile(
            cna_table(),
            &GeneticAlterationType::CopyNumberAlteration,
            &MissingValuePolicy::default(),
            NameCase::Preserve,
            &mut report,
        )
        .unwrap();

        let keys: Vec<&str> = out.keys().collect();
        assert_eq!(keys, ["sample_id", "TP53", "KRAS"]);
        assert_eq!(out.row_count(), 2);
        let samples = out.column("sample_id").unwrap();
        assert_eq!(samples.cell(0), Some("S1"));
        assert_eq!(samples.cell(1), Some("S2"));
        let tp53 = out.column("TP53").unwrap();
        assert_eq!(tp53.cell(0), Some("-1"));
        assert_eq!(tp53.cell(1), Some("0"));
        assert_eq!(out.column("KRAS").unwrap().cell(1), None);
        assert!(report.is_empty());
    }

    #[test]
    fn test_methylation_drops_missing_symbols() {
        let table = RawTable::new(vec![
            column("Hugo_Symbol", &[Some("MLH1"), None, Some(""), Some("MGMT")]),
            column("S1", &[Some("0.81"), Some("0.10"), Some("0.20"), Some("0.33")]),
        ]);
        let mut report = DiagnosticReport::new("data_methylation_hm27.txt");
        let out = format_profile(
            table,
            &GeneticAlterationType::Methylation,
            &MissingValuePolicy::default(),
            NameCase::Preserve,
            &mut report,
        )
        .unwrap();

        let keys: Vec<&str> = out.keys().collect();
        assert_eq!(keys, ["sample_id", "MLH1", "MGMT"]);
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.column("MGMT").unwrap().cell(0), Some("0.33"));
    }

    #[test]
    fn test_mutation_passes_through() {
        let table = cna_table();
        let mut report = DiagnosticReport::new("data_mutations.txt");
        let out = format_profile(
            table.clone(),
            &GeneticAlterationType::MutationExtended,
            &MissingValuePolicy::default(),
            NameCase::Preserve,
            &mut report,
        )
        .unwrap();
        assert_eq!(out, table);
    }

    #[test]
    fn test_unrecognized_passes_through() {
        let table = cna_table();
        let mut report = DiagnosticReport::new("data_x.txt");
        let out = format_profile(
            table.clone(),
            &GeneticAlterationType::Unrecognized("PROTEIN_LEVEL".to_string()),
            &MissingValuePolicy::default(),
            NameCase::Preserve,
            &mut report,
        )
        .unwrap();
        assert_eq!(out, table);
    }

    #[test]
    fn test_missing_gene_column_is_error() {
        let table = RawTable::new(vec![column("S1", &[Some("1")])]);
        let mut report = DiagnosticReport::new("data_mrna_seq.txt");
        let err = format_profile(
            table,
            &GeneticAlterationType::MrnaExpression,
            &MissingValuePolicy::default(),
            NameCase::Preserve,
            &mut report,
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn { .. }));
    }
}
