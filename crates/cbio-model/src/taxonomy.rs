//! Disease/organ lookup built from a tumor-type tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};

pub const TAXONOMY_ROOT: &str = "TISSUE";

/// Read-only `code -> disease` and `code -> organ` mappings.
///
/// Loaded once by the caller and passed into study metadata building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub code_to_disease: BTreeMap<String, String>,
    pub code_to_organ: BTreeMap<String, String>,
}

impl Taxonomy {
    /// An empty lookup; every query misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_mappings(
        code_to_disease: BTreeMap<String, String>,
        code_to_organ: BTreeMap<String, String>,
    ) -> Self {
        Self {
            code_to_disease,
            code_to_organ,
        }
    }

    /// Walks the tree under the `TISSUE` node.
    ///
    /// Every node carrying `code`, `name` and `tissue` contributes one entry
    /// to each mapping. Children are read from the `children` object.
    pub fn from_tree(tree: &Value) -> Result<Self> {
        let root = tree
            .get(TAXONOMY_ROOT)
            .ok_or_else(|| ModelError::MissingTaxonomyRoot(TAXONOMY_ROOT.to_string()))?;
        let mut taxonomy = Self::default();
        taxonomy.visit(root);
        Ok(taxonomy)
    }

    fn visit(&mut self, node: &Value) {
        let field = |name: &str| {
            node.get(name)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
        };
        if let (Some(code), Some(name), Some(tissue)) = (field("code"), field("name"), field("tissue"))
        {
            self.code_to_disease.insert(code.to_string(), name.to_string());
            self.code_to_organ.insert(code.to_string(), tissue.to_string());
        }
        if let Some(children) = node.get("children").and_then(Value::as_object) {
            for child in children.values() {
                self.visit(child);
            }
        }
    }

    /// Disease name for a cancer type code (case-insensitive).
    pub fn disease(&self, code: &str) -> Option<&str> {
        self.code_to_disease
            .get(&code.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Organ (tissue) for a cancer type code (case-insensitive).
    pub fn organ(&self, code: &str) -> Option<&str> {
        self.code_to_organ
            .get(&code.trim().to_uppercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.code_to_disease.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_disease.is_empty()
    }
}
