use serde::Serialize;

/// A statistics table advertised on a page, as found by the table scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    pub id: String,
    pub caption: String,
}

/// A table converted from markup into headers and rows of cell text.
///
/// Every row has exactly as many cells as there are headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Per-team stats of a single match: one row per team, `Team` first.
pub type MatchRecord = ExtractedTable;

impl ExtractedTable {
    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Position of the column labelled `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of the column labelled `name`, in row order.
    ///
    /// `None` when there is no such column or a row is too short to have it.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str))
            .collect()
    }

    /// Value of `column` in the row at `row`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    /// Relabel the first column called `from`. Returns whether a column was renamed.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(index) => {
                self.headers[index] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Keep only the rows whose `column` equals `value`.
    ///
    /// A table without that column comes back with no rows. Rows too short
    /// to have the column are dropped.
    pub fn filter_rows(mut self, column: &str, value: &str) -> Self {
        match self.column_index(column) {
            Some(index) => self
                .rows
                .retain(|row| row.get(index).is_some_and(|cell| cell == value)),
            None => self.rows.clear(),
        }
        self
    }
}
