//! Authoritative table data
//!
//! Rows are stored as `Vec<Vec<String>>` with every row exactly
//! `column_count` cells wide. The column count is tracked separately so a
//! table can have columns but no rows.

/// Errors for out-of-range table access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Cell lookup or write outside the current shape
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Structural operation on a row/column that does not exist
    InvalidIndex { axis: Axis, index: usize, len: usize },
}

/// Which dimension a structural operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({}, {}) is outside the {}x{} table",
                row, col, rows, cols
            ),
            Self::InvalidIndex { axis, index, len } => {
                write!(f, "{} {} does not exist ({} {}s)", axis, index, len, axis)
            }
        }
    }
}

impl std::error::Error for TableError {}

/// The in-memory table every other component reads from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableModel {
    rows: Vec<Vec<String>>,
    column_count: usize,
}

impl TableModel {
    /// Create an empty 0x0 table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table of empty cells
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![String::new(); cols]; rows],
            column_count: cols,
        }
    }

    /// Create a table from possibly ragged rows, padding short rows
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new();
        table.replace(rows);
        table
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.column_count)
    }

    /// True when the table has no cells at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count == 0
    }

    /// All rows, each exactly `column_count` wide
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get the value of a cell
    pub fn get(&self, row: usize, col: usize) -> Result<&str, TableError> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Overwrite a cell in place
    ///
    /// Equal old/new values are not detected here; see `EditCommand::set_cell`.
    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), TableError> {
        let err = self.out_of_bounds(row, col);
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(err)?;
        value.clone_into(cell);
        Ok(())
    }

    /// Insert an empty row, returning the index it landed at
    pub fn insert_row(&mut self, at: usize) -> usize {
        self.insert_row_with(at, Vec::new())
    }

    /// Insert a row with the given cells (padded or truncated to the column count)
    pub fn insert_row_with(&mut self, at: usize, mut cells: Vec<String>) -> usize {
        let at = at.min(self.rows.len());
        cells.resize(self.column_count, String::new());
        self.rows.insert(at, cells);
        at
    }

    /// Insert an empty column, returning the index it landed at
    pub fn insert_column(&mut self, at: usize) -> usize {
        self.insert_column_with(at, Vec::new())
    }

    /// Insert a column with one value per row (missing values are empty)
    pub fn insert_column_with(&mut self, at: usize, cells: Vec<String>) -> usize {
        let at = at.min(self.column_count);
        let mut values = cells.into_iter();
        for row in &mut self.rows {
            row.insert(at, values.next().unwrap_or_default());
        }
        self.column_count += 1;
        at
    }

    /// Remove a row, returning its cells
    pub fn delete_row(&mut self, at: usize) -> Result<Vec<String>, TableError> {
        if at >= self.rows.len() {
            return Err(TableError::InvalidIndex {
                axis: Axis::Row,
                index: at,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(at))
    }

    /// Remove a column, returning its cells top to bottom
    pub fn delete_column(&mut self, at: usize) -> Result<Vec<String>, TableError> {
        if at >= self.column_count {
            return Err(TableError::InvalidIndex {
                axis: Axis::Column,
                index: at,
                len: self.column_count,
            });
        }
        let removed = self.rows.iter_mut().map(|row| row.remove(at)).collect();
        self.column_count -= 1;
        Ok(removed)
    }

    /// Replace the whole table, padding ragged rows to the widest one
    pub fn replace(&mut self, mut rows: Vec<Vec<String>>) {
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(column_count, String::new());
        }
        self.rows = rows;
        self.column_count = column_count;
    }

    /// All values of one column, top to bottom
    pub fn column(&self, col: usize) -> Result<Vec<&str>, TableError> {
        if col >= self.column_count {
            return Err(TableError::InvalidIndex {
                axis: Axis::Column,
                index: col,
                len: self.column_count,
            });
        }
        Ok(self.rows.iter().map(|row| row[col].as_str()).collect())
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> TableError {
        TableError::IndexOutOfBounds {
            row,
            col,
            rows: self.rows.len(),
            cols: self.column_count,
        }
    }

    /// Check the rectangular invariant (every row is `column_count` wide)
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.column_count)
    }
}
