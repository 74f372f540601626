//! Closed enumerations for values that appear as strings in source files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Column data type, both as declared in an annotated header and as
/// resolved by content inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    #[default]
    String,
    Number,
    Boolean,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "STRING",
            DataType::Number => "NUMBER",
            DataType::Boolean => "BOOLEAN",
        }
    }

    /// Parses a declared type annotation.
    ///
    /// Anything outside `STRING`/`NUMBER`/`BOOLEAN` (after trimming and
    /// upper-casing) falls back to `String`.
    pub fn from_declared(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "NUMBER" => DataType::Number,
            "BOOLEAN" => DataType::Boolean,
            _ => DataType::String,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Number)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Known omics profile kinds, keyed by the `genetic_alteration_type` field
/// of a profile meta file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeneticAlterationType {
    CopyNumberAlteration,
    MutationExtended,
    StructuralVariant,
    MrnaExpression,
    Methylation,
    /// Any value not in the list above, kept verbatim.
    Unrecognized(String),
}

impl GeneticAlterationType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CopyNumberAlteration => "COPY_NUMBER_ALTERATION",
            Self::MutationExtended => "MUTATION_EXTENDED",
            Self::StructuralVariant => "STRUCTURAL_VARIANT",
            Self::MrnaExpression => "MRNA_EXPRESSION",
            Self::Methylation => "METHYLATION",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Name of the column that identifies samples in this profile's table.
    pub fn id_column_name(&self) -> &'static str {
        match self {
            Self::MutationExtended => "Tumor_Sample_Barcode",
            Self::StructuralVariant => "Sample_Id",
            Self::CopyNumberAlteration
            | Self::MrnaExpression
            | Self::Methylation
            | Self::Unrecognized(_) => "sample_id",
        }
    }
}

impl FromStr for GeneticAlterationType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "COPY_NUMBER_ALTERATION" => Self::CopyNumberAlteration,
            "MUTATION_EXTENDED" => Self::MutationExtended,
            "STRUCTURAL_VARIANT" => Self::StructuralVariant,
            "MRNA_EXPRESSION" => Self::MrnaExpression,
            "METHYLATION" => Self::Methylation,
            other => Self::Unrecognized(other.to_string()),
        })
    }
}

impl fmt::Display for GeneticAlterationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for GeneticAlterationType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GeneticAlterationType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(parsed) = raw.parse::<GeneticAlterationType>();
        Ok(parsed)
    }
}

/// Lifecycle state of a manifest entry in the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    #[default]
    Pending,
    Processing,
    Validated,
    Failed,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Pending => "pending",
            FileStatus::Processing => "processing",
            FileStatus::Validated => "validated",
            FileStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(FileStatus::Pending),
            "processing" => Ok(FileStatus::Processing),
            "validated" => Ok(FileStatus::Validated),
            "failed" => Ok(FileStatus::Failed),
            _ => Err(ModelError::InvalidValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Private,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Private => "private",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Access {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Access::Public),
            "private" => Ok(Access::Private),
            _ => Err(ModelError::InvalidValue {
                field: "access",
                value: s.to_string(),
            }),
        }
    }
}
