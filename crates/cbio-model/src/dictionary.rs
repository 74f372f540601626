//! Data dictionary records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::DataType;
use crate::provenance::DisplayOrder;

/// Value domain of a column, serialized as the record's `allowed_values`.
///
/// Numeric columns carry `[min, max]` (either may be `null`), all other
/// columns the distinct non-null values in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDomain {
    Range([Option<f64>; 2]),
    Values(Vec<Value>),
}

impl ValueDomain {
    pub fn empty() -> Self {
        ValueDomain::Values(Vec::new())
    }

    pub fn range(&self) -> Option<(Option<f64>, Option<f64>)> {
        match self {
            ValueDomain::Range([min, max]) => Some((*min, *max)),
            ValueDomain::Values(_) => None,
        }
    }

    pub fn values(&self) -> Option<&[Value]> {
        match self {
            ValueDomain::Values(values) => Some(values),
            ValueDomain::Range(_) => None,
        }
    }
}

/// One schema entry per output column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryRecord {
    pub key: String,
    pub name: String,
    pub description: String,
    pub data_type: DataType,
    pub notes: String,
    pub allowed_values: ValueDomain,
    pub order: DisplayOrder,
}
