//! Configuration options for a conversion run.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ORGANIZATION: &str = "Unassigned";
pub const DEFAULT_VERSION: &str = "v0.0.1";
pub const DEFAULT_UPLOADER: &str = "BioMiner";
pub const DEFAULT_URL_BASE: &str = "minio://processed-data/OmicsDatasets";

/// Which literal strings count as missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingValueSet {
    /// `NA`, `N/A`, empty, `null`, `NULL`, `[Not Available]`, `Na`.
    #[default]
    Baseline,
    /// Baseline plus a single space, `[Not Applicable]` and `[Discrepancy]`.
    Extended,
}

/// Case handling of normalized column keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameCase {
    #[default]
    Lower,
    Preserve,
}

/// Options controlling conversion behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Organization recorded as the `org:` tag.
    pub organization: String,

    /// Dataset version; also names the versioned output directory.
    pub version: String,

    /// Skip work whose outputs already exist.
    pub skip: bool,

    pub missing_values: MissingValueSet,

    /// Key case for clinical tables.
    pub clinical_case: NameCase,

    /// Key case for omics tables.
    pub omics_case: NameCase,

    /// Columns with more distinct values than this get an empty
    /// `allowed_values` list. `None` keeps every value.
    pub max_allowed_values: Option<usize>,

    pub uploader: String,

    /// Object-store prefix used for manifest URLs.
    pub url_base: String,

    pub license: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.to_string(),
            version: DEFAULT_VERSION.to_string(),
            skip: false,
            missing_values: MissingValueSet::Baseline,
            clinical_case: NameCase::Lower,
            omics_case: NameCase::Preserve,
            max_allowed_values: None,
            uploader: DEFAULT_UPLOADER.to_string(),
            url_base: DEFAULT_URL_BASE.to_string(),
            license: String::new(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_missing_values(mut self, set: MissingValueSet) -> Self {
        self.missing_values = set;
        self
    }
}
