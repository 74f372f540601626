//! Parser for tab-delimited files with a `#`-prefixed annotation block.
//!
//! ```text
//! #Patient Identifier<TAB>Age
//! #Identifier<TAB>Age at diagnosis
//! #STRING<TAB>NUMBER
//! #1<TAB>2
//! PATIENT_ID<TAB>AGE
//! P1<TAB>40
//! ```
//!
//! The four annotation rows hold display names, descriptions, declared
//! types and display orders. The first non-comment line is the header row.

use std::path::Path;

use cbio_model::{
    ColumnAnnotation, ColumnProvenance, DataType, Diagnostic, DiagnosticCode, DiagnosticReport,
    DisplayOrder, NameCase,
};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::merge::TableMerger;
use crate::normalize::normalize_column_name;
use crate::table::{RawColumn, RawTable};

pub const COMMENT_MARKER: char = '#';
pub const DELIMITER: char = '\t';
pub const ANNOTATION_ROWS: usize = 4;

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct AnnotatedFile {
    pub table: RawTable,
    /// Annotation rows in file order, marker stripped and cells trimmed.
    pub annotations: Vec<Vec<String>>,
    /// `(key, header text)` of every header cell in file order, repeated
    /// keys included. Annotation cells line up with this list.
    pub header: Vec<(String, String)>,
    pub report: DiagnosticReport,
}

impl AnnotatedFile {
    /// Builds per-column provenance from the annotation rows.
    ///
    /// Missing rows or cells fall back to the header text, an empty
    /// description, `STRING` and order 0. Fewer than four rows is
    /// recorded as a warning; a file without any annotation rows yields
    /// an empty provenance map.
    pub fn provenance(&mut self) -> ColumnProvenance {
        let mut provenance = ColumnProvenance::new();
        if self.annotations.is_empty() {
            return provenance;
        }
        if self.annotations.len() < ANNOTATION_ROWS {
            let message = format!(
                "found {} annotation rows, expected {ANNOTATION_ROWS}; using defaults",
                self.annotations.len()
            );
            warn!(source = %self.report.source, "{message}");
            self.report.push(Diagnostic::warning(
                DiagnosticCode::MissingAnnotations,
                None,
                message,
            ));
        }
        let width = self.header.len();
        if let Some(row) = self
            .annotations
            .iter()
            .take(ANNOTATION_ROWS)
            .find(|row| row.len() != width)
        {
            let message = format!(
                "annotation row has {} cells but header has {width}",
                row.len()
            );
            warn!(source = %self.report.source, "{message}");
            self.report.push(Diagnostic::warning(
                DiagnosticCode::AnnotationWidth,
                None,
                message,
            ));
        }

        let cell = |row: usize, index: usize| {
            self.annotations
                .get(row)
                .and_then(|cells| cells.get(index))
                .map(String::as_str)
        };
        for (index, (key, header)) in self.header.iter().enumerate() {
            if provenance.contains(key) {
                continue;
            }
            let annotation = ColumnAnnotation {
                display_name: cell(0, index).unwrap_or(header.as_str()).to_string(),
                description: cell(1, index).unwrap_or_default().to_string(),
                declared_type: cell(2, index).map_or(DataType::String, DataType::from_declared),
                display_order: cell(3, index).map_or_else(DisplayOrder::default, DisplayOrder::parse),
            };
            provenance.insert_if_absent(key.clone(), annotation);
        }
        provenance
    }
}

/// Reads and parses an annotated file.
pub fn read_annotated_file(path: &Path, case: NameCase) -> Result<AnnotatedFile> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_annotated(&content, path, case)
}

/// Parses file content; `path` is used for diagnostics and errors only.
///
/// Rows shorter than the header are padded with `None`; longer rows are a
/// [`IngestError::MalformedRow`].
pub fn parse_annotated(content: &str, path: &Path, case: NameCase) -> Result<AnnotatedFile> {
    let mut annotations = Vec::new();
    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if let Some(annotation) = line.strip_prefix(COMMENT_MARKER) {
            annotations.push(
                annotation
                    .split(DELIMITER)
                    .map(|cell| cell.trim().to_string())
                    .collect(),
            );
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<String> = line.split(DELIMITER).map(str::to_string).collect();
        if let Some(names) = &header {
            if cells.len() > names.len() {
                return Err(IngestError::MalformedRow {
                    path: path.to_path_buf(),
                    line: index + 1,
                    expected: names.len(),
                    found: cells.len(),
                });
            }
            rows.push(cells);
        } else {
            header = Some(cells);
        }
    }

    let Some(header) = header else {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    };

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(rows.len()); header.len()];
    for row in rows {
        let mut cells = row.into_iter();
        for column in &mut columns {
            column.push(cells.next());
        }
    }

    let source = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    let header: Vec<(String, String)> = header
        .iter()
        .map(|name| (normalize_column_name(name, case), name.trim().to_string()))
        .collect();
    let mut merger = TableMerger::new(source);
    for ((key, name), cells) in header.iter().zip(columns) {
        merger.add_column(RawColumn::new(key.clone(), name.clone(), cells));
    }
    let merged = merger.finish();
    debug!(
        path = %path.display(),
        rows = merged.table.row_count(),
        columns = merged.table.width(),
        annotation_rows = annotations.len(),
        "parsed annotated file"
    );

    Ok(AnnotatedFile {
        table: merged.table,
        annotations,
        header,
        report: merged.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATIENT: &str = "#Patient Identifier\tAge\tOverall Status\n\
#Identifier to uniquely specify a patient.\tAge at diagnosis\tVital status\n\
#STRING\tNUMBER\tSTRING\n\
#1\t2\tx\n\
PATIENT_ID\tAGE\tOS_STATUS\n\
P1\t40\tLIVING\n\
P2\t67\n\
\n\
P3\tNA\tDECEASED\n";

    fn parse(content: &str) -> Result<AnnotatedFile> {
        parse_annotated(content, Path::new("data_clinical_patient.txt"), NameCase::Lower)
    }

    #[test]
    fn test_parse_table_and_annotations() {
        let file = parse(PATIENT).unwrap();
        assert_eq!(file.annotations.len(), 4);
        assert_eq!(file.table.row_count(), 3);
        let keys: Vec<&str> = file.table.keys().collect();
        assert_eq!(keys, ["patient_id", "age", "os_status"]);
        let status = file.table.column("os_status").unwrap();
        assert_eq!(status.header, "OS_STATUS");
        assert_eq!(status.cell(1), None);
        assert_eq!(file.table.column("age").unwrap().cell(2), Some("NA"));
    }

    #[test]
    fn test_provenance_from_four_rows() {
        let mut file = parse(PATIENT).unwrap();
        let provenance = file.provenance();
        let age = provenance.get("age").unwrap();
        assert_eq!(age.display_name, "Age");
        assert_eq!(age.description, "Age at diagnosis");
        assert_eq!(age.declared_type, DataType::Number);
        assert_eq!(age.display_order, DisplayOrder::Position(2));
        let status = provenance.get("os_status").unwrap();
        assert_eq!(status.display_order, DisplayOrder::Raw("x".to_string()));
        assert!(file.report.is_empty());
    }

    #[test]
    fn test_repeated_header_keeps_annotations_aligned() {
        let content = "#Patient Identifier\tAge Dup\tVital Status\n\
#Identifier\tAge copy\tStatus of patient\n\
#STRING\tNUMBER\tSTRING\n\
#1\t2\t3\n\
ID\tid\tSTATUS\n\
P1\t40\tALIVE\n";
        let mut file = parse(content).unwrap();
        let keys: Vec<&str> = file.table.keys().collect();
        assert_eq!(keys, ["id", "status"]);

        let provenance = file.provenance();
        assert_eq!(provenance.len(), 2);
        let id = provenance.get("id").unwrap();
        assert_eq!(id.display_name, "Patient Identifier");
        assert_eq!(id.declared_type, DataType::String);
        let status = provenance.get("status").unwrap();
        assert_eq!(status.display_name, "Vital Status");
        assert_eq!(status.description, "Status of patient");
        assert_eq!(status.declared_type, DataType::String);
        assert_eq!(status.display_order, DisplayOrder::Position(3));
        assert_eq!(file.report.with_code(DiagnosticCode::AnnotationWidth).count(), 0);
    }

    #[test]
    fn test_short_annotation_block_uses_defaults() {
        let mut file = parse("#Name A\tName B\nA\tB\n1\t2\n").unwrap();
        let provenance = file.provenance();
        let b = provenance.get("b").unwrap();
        assert_eq!(b.display_name, "Name B");
        assert_eq!(b.description, "");
        assert_eq!(b.declared_type, DataType::String);
        assert_eq!(file.report.warning_count(), 1);
        assert_eq!(
            file.report.diagnostics[0].code,
            DiagnosticCode::MissingAnnotations
        );
    }

    #[test]
    fn test_no_annotations_means_empty_provenance() {
        let mut file = parse("Hugo_Symbol\tS1\nTP53\t1\n").unwrap();
        assert!(file.provenance().is_empty());
        assert!(file.report.is_empty());
    }

    #[test]
    fn test_long_row_is_malformed() {
        let err = parse("A\tB\n1\t2\n1\t2\t3\n").unwrap_err();
        match err {
            IngestError::MalformedRow {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_comment_only_file_is_empty() {
        let err = parse("#A\n#B\n\n").unwrap_err();
        assert!(matches!(err, IngestError::EmptyFile { .. }));
    }

    #[test]
    fn test_cells_are_not_trimmed() {
        let file = parse("A\tB\n x\t \n").unwrap();
        let b = file.table.column("b").unwrap();
        assert_eq!(b.cell(0), Some(" "));
        assert_eq!(file.table.column("a").unwrap().cell(0), Some(" x"));
    }
}
