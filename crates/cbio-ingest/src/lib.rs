//! Study ingestion.
//!
//! Reads cBioPortal-style study folders: annotated clinical tables, `key:
//! value` meta blocks and paired omics files.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cbio_ingest::{load_clinical_table, read_meta_file, OmicsDirectoryScanner};
//! use cbio_model::NameCase;
//!
//! let study_dir = Path::new("studies/brca_demo");
//! let meta = read_meta_file(&study_dir.join("meta_study.txt"))?;
//! let clinical = load_clinical_table(study_dir, NameCase::Lower)?;
//! let pairs = OmicsDirectoryScanner::new()?.scan(study_dir)?;
//! ```

mod annotated;
mod clinical;
mod discovery;
mod error;
mod merge;
mod meta;
mod normalize;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parsing ===
pub use annotated::{ANNOTATION_ROWS, AnnotatedFile, parse_annotated, read_annotated_file};
pub use meta::{
    DEFAULT_STUDY_KEY, DEFAULT_STUDY_NAME, MetaBlock, profile_metadata, read_meta_file,
    study_metadata,
};
pub use normalize::normalize_column_name;
pub use table::{RawColumn, RawTable};

// === Merging ===
pub use clinical::{CLINICAL_FILES, clinical_files, load_clinical_table};
pub use merge::{MergedTable, TableMerger, merge_tables};

// === File Discovery ===
pub use discovery::{OMICS_PATTERNS, OmicsDirectoryScanner, OmicsPair};
