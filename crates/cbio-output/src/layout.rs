//! Output directory layout and skip checks.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{OutputError, Result};
use crate::manifest::DATAFILE_TSV;

pub const METADATA_TABLE: &str = "metadata_table.parquet";
pub const METADATA_DICTIONARY: &str = "metadata_dictionary.json";
pub const DATASET_JSON: &str = "dataset.json";
pub const README: &str = "README.md";
pub const LICENSE: &str = "LICENSE.md";
pub const DATAFILES_DIR: &str = "datafiles";

/// Paths of one converted study: `<output>/<version>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyLayout {
    dir: PathBuf,
    key: String,
}

impl StudyLayout {
    pub fn new(output_root: &Path, version: &str, key: impl Into<String>) -> Self {
        Self {
            dir: output_root.join(version),
            key: key.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self) -> PathBuf {
        self.dir.join(METADATA_TABLE)
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.dir.join(METADATA_DICTIONARY)
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.dir.join(DATASET_JSON)
    }

    pub fn tarball_name(&self) -> String {
        format!("{}.tar.gz", self.key)
    }

    pub fn tarball_path(&self) -> PathBuf {
        self.dir.join(self.tarball_name())
    }

    pub fn datafile_path(&self) -> PathBuf {
        self.dir.join(DATAFILE_TSV)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.dir.join(README)
    }

    pub fn license_path(&self) -> PathBuf {
        self.dir.join(LICENSE)
    }

    pub fn datafiles_dir(&self) -> PathBuf {
        self.dir.join(DATAFILES_DIR)
    }

    /// Every artifact skip mode requires.
    pub fn artifacts(&self) -> [PathBuf; 7] {
        [
            self.table_path(),
            self.dictionary_path(),
            self.dataset_path(),
            self.tarball_path(),
            self.datafile_path(),
            self.readme_path(),
            self.license_path(),
        ]
    }

    pub fn is_complete(&self) -> bool {
        self.artifacts().iter().all(|path| path.is_file())
    }

    /// Table, dictionary and dataset document all exist.
    pub fn has_primary_artifacts(&self) -> bool {
        [self.table_path(), self.dictionary_path(), self.dataset_path()]
            .iter()
            .all(|path| path.is_file())
    }

    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| OutputError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    /// Creates empty README/LICENSE files when absent; returns the ones
    /// created.
    pub fn ensure_placeholder_docs(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for path in [self.readme_path(), self.license_path()] {
            if path.exists() {
                continue;
            }
            warn!(path = %path.display(), "creating empty placeholder");
            fs::write(&path, b"").map_err(|source| OutputError::Write {
                path: path.clone(),
                source,
            })?;
            created.push(path);
        }
        Ok(created)
    }

    /// Removes the output directory if a primary artifact is missing.
    ///
    /// Returns `true` when the directory was removed.
    pub fn remove_if_incomplete(&self) -> Result<bool> {
        if !self.dir.exists() || self.has_primary_artifacts() {
            return Ok(false);
        }
        fs::remove_dir_all(&self.dir).map_err(|source| OutputError::Io {
            path: self.dir.clone(),
            source,
        })?;
        info!(path = %self.dir.display(), "removed incomplete output directory");
        Ok(true)
    }
}

/// Paths of one converted omics pair in `<dir>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmicsLayout {
    dir: PathBuf,
    prefix: String,
}

impl OmicsLayout {
    pub fn new(dir: &Path, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.to_path_buf(),
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn parquet_path(&self) -> PathBuf {
        self.dir.join(format!("{}.parquet", self.prefix))
    }

    pub fn tsv_path(&self) -> PathBuf {
        self.dir.join(format!("{}.tsv", self.prefix))
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.dir.join(format!("{}_dictionary.json", self.prefix))
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(format!("{}_metadata.json", self.prefix))
    }

    pub fn artifacts(&self) -> [PathBuf; 4] {
        [
            self.parquet_path(),
            self.tsv_path(),
            self.dictionary_path(),
            self.metadata_path(),
        ]
    }

    pub fn is_complete(&self) -> bool {
        self.artifacts().iter().all(|path| path.is_file())
    }
}
