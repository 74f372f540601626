//! `key: value` metadata blocks (`meta_study.txt`, `meta_<profile>.txt`).

use std::collections::BTreeMap;
use std::path::Path;

use cbio_model::{DatasetMetadata, GeneticAlterationType, OmicsProfileMetadata, Taxonomy};

use crate::error::{IngestError, Result};

pub const DEFAULT_STUDY_KEY: &str = "unknown";
pub const DEFAULT_STUDY_NAME: &str = "Unnamed Study";

/// Parsed `key: value` pairs. Later duplicates overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaBlock {
    entries: BTreeMap<String, String>,
}

impl MetaBlock {
    /// Splits each line on its first `:`; both sides are trimmed and lines
    /// without a colon are ignored.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn read_meta_file(path: &Path) -> Result<MetaBlock> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(MetaBlock::parse(&content))
}

/// Maps a study meta block onto dataset metadata.
///
/// Disease and organ tags come from `type_of_cancer` via `taxonomy`;
/// `total`, `version` and `license` are left for the caller to fill in.
pub fn study_metadata(meta: &MetaBlock, taxonomy: &Taxonomy, organization: &str) -> DatasetMetadata {
    let mut dataset = DatasetMetadata {
        key: meta.get_or("cancer_study_identifier", DEFAULT_STUDY_KEY).to_string(),
        name: meta.get_or("name", DEFAULT_STUDY_NAME).to_string(),
        description: meta.get_or("description", "").to_string(),
        citation: meta.get_or("citation", "").to_string(),
        pmid: meta.get_or("pmid", "").to_string(),
        groups: meta
            .get_or("groups", "")
            .split(';')
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(str::to_string)
            .collect(),
        is_filebased: false,
        ..DatasetMetadata::default()
    };

    if let Some(code) = meta.get("type_of_cancer") {
        if let Some(disease) = taxonomy.disease(code) {
            dataset.tags.insert(format!("disease:{disease}"));
        }
        if let Some(organ) = taxonomy.organ(code) {
            dataset.tags.insert(format!("organ:{organ}"));
        }
    }
    dataset.tags.insert(format!("org:{organization}"));
    dataset
}

/// Maps an omics profile meta block onto profile metadata.
pub fn profile_metadata(meta: &MetaBlock) -> OmicsProfileMetadata {
    let Ok(alteration) = meta
        .get_or("genetic_alteration_type", "")
        .parse::<GeneticAlterationType>();
    OmicsProfileMetadata::new(
        meta.get_or("stable_id", "").to_uppercase(),
        meta.get_or("profile_description", ""),
        meta.get_or("datatype", ""),
        alteration,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDY: &str = "type_of_cancer: brca
cancer_study_identifier: brca_demo
name: Breast Cancer (Demo)
description: Demo study: with a colon
groups: PUBLIC;;GDAC
pmid: 123
";

    fn taxonomy() -> Taxonomy {
        Taxonomy::from_mappings(
            [("BRCA".to_string(), "Invasive Breast Carcinoma".to_string())].into(),
            [("BRCA".to_string(), "Breast".to_string())].into(),
        )
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let meta = MetaBlock::parse(STUDY);
        assert_eq!(meta.get("description"), Some("Demo study: with a colon"));
        assert_eq!(meta.get("pmid"), Some("123"));
        assert!(meta.get("citation").is_none());
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let meta = MetaBlock::parse("no colon here\nkey:value\n\n");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("key"), Some("value"));
    }

    #[test]
    fn test_study_metadata_mapping() {
        let dataset = study_metadata(&MetaBlock::parse(STUDY), &taxonomy(), "FUDAN");
        assert_eq!(dataset.key, "brca_demo");
        assert_eq!(dataset.name, "Breast Cancer (Demo)");
        assert_eq!(dataset.groups, ["PUBLIC", "GDAC"]);
        assert!(dataset.tags.contains("disease:Invasive Breast Carcinoma"));
        assert!(dataset.tags.contains("organ:Breast"));
        assert!(dataset.tags.contains("org:FUDAN"));
        assert!(!dataset.is_filebased);
    }

    #[test]
    fn test_study_metadata_defaults() {
        let dataset = study_metadata(&MetaBlock::default(), &Taxonomy::empty(), "Unassigned");
        assert_eq!(dataset.key, DEFAULT_STUDY_KEY);
        assert_eq!(dataset.name, DEFAULT_STUDY_NAME);
        assert!(dataset.groups.is_empty());
        assert_eq!(dataset.tags.len(), 1);
        assert!(dataset.tags.contains("org:Unassigned"));
    }

    #[test]
    fn test_profile_metadata_mapping() {
        let meta = MetaBlock::parse(
            "stable_id: gistic\nprofile_description: Putative copy-number\n\
datatype: DISCRETE\ngenetic_alteration_type: COPY_NUMBER_ALTERATION\n",
        );
        let profile = profile_metadata(&meta);
        assert_eq!(profile.title, "GISTIC");
        assert_eq!(profile.description, "Putative copy-number");
        assert_eq!(profile.datatype, "DISCRETE");
        assert_eq!(
            profile.genetic_alteration_type,
            GeneticAlterationType::CopyNumberAlteration
        );
        assert_eq!(profile.id_column_name, "sample_id");
    }
}
