//! Pseudo-missing literal substitution.

use std::collections::BTreeSet;

use cbio_ingest::RawTable;
use cbio_model::MissingValueSet;

/// Literals treated as missing by default.
pub const BASELINE_MISSING: [&str; 7] = ["NA", "N/A", "", "null", "NULL", "[Not Available]", "Na"];

/// Added on top of the baseline by [`MissingValueSet::Extended`].
pub const EXTENDED_MISSING: [&str; 3] = [" ", "[Not Applicable]", "[Discrepancy]"];

/// Replaces exact-literal matches with `None`.
///
/// Matching is exact: no trimming and no case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValuePolicy {
    literals: BTreeSet<String>,
}

impl MissingValuePolicy {
    pub fn new(set: MissingValueSet) -> Self {
        let extra: &[&str] = match set {
            MissingValueSet::Baseline => &[],
            MissingValueSet::Extended => &EXTENDED_MISSING,
        };
        Self::from_literals(BASELINE_MISSING.iter().chain(extra).copied())
    }

    pub fn from_literals<'a>(literals: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            literals: literals.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn is_missing(&self, value: &str) -> bool {
        self.literals.contains(value)
    }

    fn substitute(&self, cell: Option<String>) -> Option<String> {
        cell.filter(|value| !self.is_missing(value))
    }

    /// Returns a copy of `cells` with missing literals nulled.
    pub fn apply(&self, cells: &[Option<String>]) -> Vec<Option<String>> {
        cells
            .iter()
            .map(|cell| self.substitute(cell.clone()))
            .collect()
    }

    /// Nulls missing literals in every column of `table`.
    pub fn apply_table(&self, table: &mut RawTable) {
        table.map_cells(|cell| self.substitute(cell));
    }
}

impl Default for MissingValuePolicy {
    fn default() -> Self {
        Self::new(MissingValueSet::Baseline)
    }
}
