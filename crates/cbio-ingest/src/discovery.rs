//! Omics file discovery for study folders.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Filenames eligible for omics conversion.
pub const OMICS_PATTERNS: [&str; 10] = [
    "data_cna*",
    "meta_cna*",
    "data_mutation*",
    "meta_mutation*",
    "data_mrna_seq*",
    "meta_mrna_seq*",
    "data_sv*",
    "meta_sv*",
    "data_methylation*",
    "meta_methylation*",
];

/// A data file and its meta file sharing one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmicsPair {
    /// `cna` for `data_cna.txt` / `meta_cna.txt`.
    pub prefix: String,
    pub data_path: PathBuf,
    pub meta_path: PathBuf,
}

/// Finds `(data_<prefix>.txt, meta_<prefix>.txt)` pairs in a directory.
#[derive(Debug, Clone)]
pub struct OmicsDirectoryScanner {
    patterns: Vec<Pattern>,
}

impl OmicsDirectoryScanner {
    pub fn new() -> Result<Self> {
        Self::with_patterns(&OMICS_PATTERNS)
    }

    pub fn with_patterns(patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| IngestError::InvalidPattern {
                    pattern: (*pattern).to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_allowed(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(file_name))
    }

    /// Lists pairs sorted by data file name. Unpaired files are dropped.
    pub fn scan(&self, dir: &Path) -> Result<Vec<OmicsPair>> {
        if !dir.is_dir() {
            return Err(IngestError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut data_files = BTreeMap::new();
        let mut meta_files = BTreeMap::new();
        for entry_result in entries {
            let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !self.is_allowed(name) {
                continue;
            }
            if let Some(prefix) = file_prefix(name, "data_") {
                data_files.insert(prefix.to_string(), path.clone());
            } else if let Some(prefix) = file_prefix(name, "meta_") {
                meta_files.insert(prefix.to_string(), path.clone());
            }
        }

        let mut pairs: Vec<OmicsPair> = data_files
            .into_iter()
            .filter_map(|(prefix, data_path)| match meta_files.remove(&prefix) {
                Some(meta_path) => Some(OmicsPair {
                    prefix,
                    data_path,
                    meta_path,
                }),
                None => {
                    debug!(path = %data_path.display(), "no meta file for data file");
                    None
                }
            })
            .collect();
        pairs.sort_by(|a, b| a.data_path.file_name().cmp(&b.data_path.file_name()));
        Ok(pairs)
    }
}

/// `data_cna.txt` with kind `data_` gives `cna`.
fn file_prefix<'a>(name: &'a str, kind: &str) -> Option<&'a str> {
    name.strip_prefix(kind)
        .and_then(|rest| rest.strip_suffix(".txt"))
        .filter(|prefix| !prefix.is_empty())
}
