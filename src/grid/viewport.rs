//! Grid viewport calculations
//!
//! Tracks which portion of the grid is visible.

/// Viewport state for the grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridViewport {
    /// First visible row (0-indexed)
    pub top_row: usize,
    /// First visible column (0-indexed)
    pub left_col: usize,
    /// Number of rows that fit in the viewport
    pub visible_rows: usize,
    /// Number of columns that fit in the viewport
    pub visible_cols: usize,
}

impl GridViewport {
    /// Create a new viewport with given dimensions
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            top_row: 0,
            left_col: 0,
            visible_rows,
            visible_cols,
        }
    }

    /// Ensure a cell is visible, scrolling if necessary
    pub fn ensure_visible(&mut self, row: usize, col: usize, total_rows: usize, total_cols: usize) {
        // Vertical scrolling
        if row < self.top_row {
            self.top_row = row;
        } else if row >= self.top_row + self.visible_rows && self.visible_rows > 0 {
            self.top_row = row.saturating_sub(self.visible_rows - 1);
        }

        // Horizontal scrolling
        if col < self.left_col {
            self.left_col = col;
        } else if col >= self.left_col + self.visible_cols && self.visible_cols > 0 {
            self.left_col = col.saturating_sub(self.visible_cols - 1);
        }

        // Clamp to valid range
        let max_top = total_rows.saturating_sub(self.visible_rows);
        let max_left = total_cols.saturating_sub(self.visible_cols);
        self.top_row = self.top_row.min(max_top);
        self.left_col = self.left_col.min(max_left);
    }

    /// Visible row range, clipped to `total_rows`
    pub fn row_range(&self, total_rows: usize) -> std::ops::Range<usize> {
        let start = self.top_row.min(total_rows);
        start..(start + self.visible_rows).min(total_rows)
    }

    /// Visible column range, clipped to `total_cols`
    pub fn col_range(&self, total_cols: usize) -> std::ops::Range<usize> {
        let start = self.left_col.min(total_cols);
        start..(start + self.visible_cols).min(total_cols)
    }
}
