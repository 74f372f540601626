//! Clinical table loading for a study directory.

use std::path::{Path, PathBuf};

use cbio_model::NameCase;
use tracing::{debug, info};

use crate::annotated::read_annotated_file;
use crate::error::{IngestError, Result};
use crate::merge::{MergedTable, TableMerger};

/// Clinical files in merge order. Earlier files win on duplicate columns.
pub const CLINICAL_FILES: [&str; 4] = [
    "data_clinical_sample.txt",
    "data_clinical_patient.txt",
    "data_clinical_patient.tsv",
    "data_clinical_sample.tsv",
];

/// Existing clinical files of a study, in merge order.
pub fn clinical_files(study_dir: &Path) -> Vec<PathBuf> {
    CLINICAL_FILES
        .iter()
        .map(|name| study_dir.join(name))
        .filter(|path| path.is_file())
        .collect()
}

/// Reads every clinical file present and merges them into one table.
///
/// Diagnostics from each file are folded into the merged report.
pub fn load_clinical_table(study_dir: &Path, case: NameCase) -> Result<MergedTable> {
    let files = clinical_files(study_dir);
    if files.is_empty() {
        return Err(IngestError::NoClinicalFiles {
            path: study_dir.to_path_buf(),
        });
    }

    let mut merger = TableMerger::new("clinical");
    for path in &files {
        let mut file = read_annotated_file(path, case)?;
        let provenance = file.provenance();
        debug!(
            path = %path.display(),
            rows = file.table.row_count(),
            annotated = provenance.len(),
            "loaded clinical file"
        );
        merger.report_mut().extend(file.report);
        merger.add_table(file.table, &provenance);
    }
    let merged = merger.finish();
    info!(
        files = files.len(),
        rows = merged.table.row_count(),
        columns = merged.table.width(),
        "merged clinical tables"
    );
    Ok(merged)
}
