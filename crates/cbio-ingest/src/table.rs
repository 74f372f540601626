//! In-memory string table produced by file parsing.

/// One named column of string cells. `None` marks a cell absent from a
/// short row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    /// Normalized identifier.
    pub key: String,
    /// Header text as it appeared in the source file.
    pub header: String,
    pub cells: Vec<Option<String>>,
}

impl RawColumn {
    pub fn new(key: impl Into<String>, header: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(Option::as_deref)
    }
}

/// Ordered columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<RawColumn>,
    row_count: usize,
}

impl RawTable {
    /// Builds a table, padding shorter columns with `None` up to the
    /// longest one.
    pub fn new(mut columns: Vec<RawColumn>) -> Self {
        let row_count = columns.iter().map(RawColumn::len).max().unwrap_or(0);
        for column in &mut columns {
            column.cells.resize(row_count, None);
        }
        Self { columns, row_count }
    }

    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<RawColumn> {
        self.columns
    }

    pub fn column(&self, key: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|column| column.key == key)
    }

    pub fn column_by_header(&self, header: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|column| column.header == header)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.key.as_str())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Applies `f` to every cell of every column.
    pub fn map_cells(&mut self, mut f: impl FnMut(Option<String>) -> Option<String>) {
        for column in &mut self.columns {
            let cells = std::mem::take(&mut column.cells);
            column.cells = cells.into_iter().map(&mut f).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some((*v).to_string())).collect()
    }

    #[test]
    fn test_new_pads_short_columns() {
        let table = RawTable::new(vec![
            RawColumn::new("a", "A", cells(&["1", "2", "3"])),
            RawColumn::new("b", "B", cells(&["x"])),
        ]);
        assert_eq!(table.row_count(), 3);
        let b = table.column("b").unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(b.cell(0), Some("x"));
        assert_eq!(b.cell(2), None);
    }

    #[test]
    fn test_lookup_by_header() {
        let table = RawTable::new(vec![RawColumn::new("hugo_symbol", "Hugo_Symbol", cells(&["TP53"]))]);
        assert!(table.column_by_header("Hugo_Symbol").is_some());
        assert!(table.column("Hugo_Symbol").is_none());
    }
}
