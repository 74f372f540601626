//! Structured non-fatal findings collected while converting one source.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// Declared type disagrees with the inferred one.
    TypeMismatch,
    /// Casting a column to its resolved type failed.
    CastFailed,
    /// A duplicate column dropped on merge held different values.
    DuplicateColumnConflict,
    /// Numeric range could not be computed.
    RangeFailed,
    /// Fewer than four annotation rows were present.
    MissingAnnotations,
    /// Annotation rows and header row have different widths.
    AnnotationWidth,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::TypeMismatch => "type_mismatch",
            DiagnosticCode::CastFailed => "cast_failed",
            DiagnosticCode::DuplicateColumnConflict => "duplicate_column_conflict",
            DiagnosticCode::RangeFailed => "range_failed",
            DiagnosticCode::MissingAnnotations => "missing_annotations",
            DiagnosticCode::AnnotationWidth => "annotation_width",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// Column key, when the finding concerns a single column.
    pub column: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(code: DiagnosticCode, column: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            column: column.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn error(code: DiagnosticCode, column: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            column: column.map(str::to_string),
            message: message.into(),
        }
    }
}

/// Diagnostics for a single source file or merged table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, other: DiagnosticReport) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.code == code)
    }
}
