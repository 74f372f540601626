//! Dataset-level and omics-profile-level metadata documents.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::GeneticAlterationType;

/// Contents of `dataset.json`.
///
/// `key` must equal the base name of the source study directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub key: String,
    pub name: String,
    pub description: String,
    pub citation: String,
    pub pmid: String,
    pub groups: Vec<String>,
    /// Facets such as `disease:<name>`, `organ:<tissue>`, `org:<organization>`.
    pub tags: BTreeSet<String>,
    /// Row count of the merged clinical table.
    pub total: usize,
    pub is_filebased: bool,
    pub version: String,
    /// Empty when no license was given.
    pub license: String,
}

/// Contents of `<prefix>_metadata.json` for one omics profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmicsProfileMetadata {
    pub title: String,
    pub description: String,
    pub datatype: String,
    pub genetic_alteration_type: GeneticAlterationType,
    pub id_column_name: String,
}

impl OmicsProfileMetadata {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        datatype: impl Into<String>,
        genetic_alteration_type: GeneticAlterationType,
    ) -> Self {
        let id_column_name = genetic_alteration_type.id_column_name().to_string();
        Self {
            title: title.into(),
            description: description.into(),
            datatype: datatype.into(),
            genetic_alteration_type,
            id_column_name,
        }
    }
}
