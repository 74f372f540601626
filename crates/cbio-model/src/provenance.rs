//! Per-column provenance taken from annotated header blocks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::DataType;

/// Display order from the fourth annotation row.
///
/// Parsed as an integer when possible; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayOrder {
    Position(i64),
    Raw(String),
}

impl DisplayOrder {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(position) => DisplayOrder::Position(position),
            Err(_) => DisplayOrder::Raw(raw.to_string()),
        }
    }

    pub fn position(&self) -> Option<i64> {
        match self {
            DisplayOrder::Position(position) => Some(*position),
            DisplayOrder::Raw(_) => None,
        }
    }
}

impl Default for DisplayOrder {
    fn default() -> Self {
        DisplayOrder::Position(0)
    }
}

/// Annotation of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAnnotation {
    pub display_name: String,
    pub description: String,
    pub declared_type: DataType,
    pub display_order: DisplayOrder,
}

impl ColumnAnnotation {
    /// Annotation for a column that had no header block: the header text
    /// doubles as display name.
    pub fn from_header(header: &str) -> Self {
        Self {
            display_name: header.to_string(),
            description: String::new(),
            declared_type: DataType::String,
            display_order: DisplayOrder::default(),
        }
    }
}

/// Column key to annotation, for every column that appeared in an
/// annotated header. Keys are normalized column identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProvenance {
    columns: BTreeMap<String, ColumnAnnotation>,
}

impl ColumnProvenance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ColumnAnnotation> {
        self.columns.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.columns.contains_key(key)
    }

    /// Inserts an annotation unless the key is already present.
    ///
    /// Returns `true` when the annotation was added.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, annotation: ColumnAnnotation) -> bool {
        let key = key.into();
        if self.columns.contains_key(&key) {
            return false;
        }
        self.columns.insert(key, annotation);
        true
    }

    /// Adds every key of `other` not already present; existing entries win.
    pub fn merge_from(&mut self, other: &ColumnProvenance) {
        for (key, annotation) in &other.columns {
            self.insert_if_absent(key.clone(), annotation.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ColumnAnnotation)> {
        self.columns.iter()
    }
}
