//! Data model for converted cBioPortal-style datasets.
//!
//! The types here are the serialized outputs of the conversion pipeline
//! (dictionary records, dataset metadata, manifest entries) and the
//! per-column provenance that flows between ingestion and transformation.

pub mod dataset;
pub mod diagnostics;
pub mod dictionary;
pub mod enums;
pub mod error;
pub mod manifest;
pub mod options;
pub mod provenance;
pub mod taxonomy;

pub use dataset::{DatasetMetadata, OmicsProfileMetadata};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticReport, Severity};
pub use dictionary::{DictionaryRecord, ValueDomain};
pub use enums::{Access, DataType, FileStatus, GeneticAlterationType};
pub use error::{ModelError, Result};
pub use manifest::{DataFile, FileAlias, FileHash, FileTag, FileUrl};
pub use options::{ConvertOptions, MissingValueSet, NameCase};
pub use provenance::{ColumnAnnotation, ColumnProvenance, DisplayOrder};
pub use taxonomy::Taxonomy;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_report_counts() {
        let mut report = DiagnosticReport::new("data_clinical_patient.txt");
        report.push(Diagnostic::warning(
            DiagnosticCode::TypeMismatch,
            Some("age"),
            "declared NUMBER but inferred STRING",
        ));
        report.push(Diagnostic::error(
            DiagnosticCode::CastFailed,
            Some("os_months"),
            "column length mismatch",
        ));
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn dataset_metadata_serializes() {
        let meta = DatasetMetadata {
            key: "brca_tcga".to_string(),
            name: "Breast Invasive Carcinoma".to_string(),
            ..DatasetMetadata::default()
        };
        let json = serde_json::to_string(&meta).expect("serialize metadata");
        let round: DatasetMetadata = serde_json::from_str(&json).expect("deserialize metadata");
        assert_eq!(round.key, "brca_tcga");
        assert!(!round.is_filebased);
    }
}
