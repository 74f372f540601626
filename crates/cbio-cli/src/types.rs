use std::path::PathBuf;

use cbio_model::DiagnosticReport;

/// Outcome of converting one study directory.
#[derive(Debug)]
pub struct StudyResult {
    pub key: String,
    pub output_dir: PathBuf,
    pub rows: usize,
    pub columns: usize,
    /// Outputs were already complete and nothing was rewritten.
    pub skipped: bool,
    pub guid: Option<String>,
    pub report: DiagnosticReport,
}

/// One study of a bulk run.
#[derive(Debug)]
pub struct BulkEntry {
    pub name: String,
    pub outcome: Result<StudyResult, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairStatus {
    Converted,
    Skipped,
    Failed,
}

/// Outcome of converting one omics pair.
#[derive(Debug)]
pub struct PairOutcome {
    pub prefix: String,
    pub status: PairStatus,
    pub profile_type: Option<String>,
    pub rows: usize,
    pub columns: usize,
    pub report: DiagnosticReport,
    pub error: Option<String>,
}

impl PairOutcome {
    pub fn skipped(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            status: PairStatus::Skipped,
            profile_type: None,
            rows: 0,
            columns: 0,
            report: DiagnosticReport::new(prefix),
            error: None,
        }
    }

    pub fn failed(prefix: &str, error: String) -> Self {
        Self {
            prefix: prefix.to_string(),
            status: PairStatus::Failed,
            profile_type: None,
            rows: 0,
            columns: 0,
            report: DiagnosticReport::new(prefix),
            error: Some(error),
        }
    }
}

/// Run-level counts of a batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub output_dir: PathBuf,
    pub pairs: Vec<PairOutcome>,
}

impl BatchSummary {
    fn count(&self, status: PairStatus) -> usize {
        self.pairs.iter().filter(|pair| pair.status == status).count()
    }

    pub fn converted(&self) -> usize {
        self.count(PairStatus::Converted)
    }

    pub fn skipped(&self) -> usize {
        self.count(PairStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(PairStatus::Failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}
