//! Cell navigation logic for the grid
//!
//! Pure view-level movement: arrow keys, Tab/Shift+Tab, Home/End, paging.
//! Arrow movement stops at the grid edges; it never wraps.

use super::view::{CellPosition, GridView};

impl GridView {
    /// Move selection by delta (handles bounds)
    pub fn move_selection(&mut self, delta_row: isize, delta_col: isize) {
        let new_row = self
            .selected_cell
            .row
            .saturating_add_signed(delta_row)
            .min(self.row_count().saturating_sub(1));
        let new_col = self
            .selected_cell
            .col
            .saturating_add_signed(delta_col)
            .min(self.column_count().saturating_sub(1));

        self.selected_cell = CellPosition::new(new_row, new_col);
        self.ensure_selection_visible();
    }

    /// Select a specific cell and ensure it's visible
    pub fn select_cell(&mut self, row: usize, col: usize) {
        self.selected_cell = CellPosition::new(row, col);
        self.clamp_selection();
        self.ensure_selection_visible();
    }

    /// Move to next cell (Tab behavior)
    pub fn move_to_next_cell(&mut self) {
        let col_count = self.column_count();
        let row_count = self.row_count();

        if col_count == 0 || row_count == 0 {
            return;
        }

        let mut new_col = self.selected_cell.col + 1;
        let mut new_row = self.selected_cell.row;

        if new_col >= col_count {
            new_col = 0;
            new_row += 1;
            if new_row >= row_count {
                new_row = row_count - 1;
                new_col = col_count - 1;
            }
        }

        self.selected_cell = CellPosition::new(new_row, new_col);
        self.ensure_selection_visible();
    }

    /// Move to previous cell (Shift+Tab behavior)
    pub fn move_to_prev_cell(&mut self) {
        let col_count = self.column_count();

        if col_count == 0 || self.row_count() == 0 {
            return;
        }

        if self.selected_cell.col > 0 {
            self.selected_cell.col -= 1;
        } else if self.selected_cell.row > 0 {
            self.selected_cell.row -= 1;
            self.selected_cell.col = col_count - 1;
        }

        self.ensure_selection_visible();
    }

    /// Move to first cell (Cmd+Home)
    pub fn move_to_first_cell(&mut self) {
        self.selected_cell = CellPosition::new(0, 0);
        self.ensure_selection_visible();
    }

    /// Move to last cell (Cmd+End)
    pub fn move_to_last_cell(&mut self) {
        let row = self.row_count().saturating_sub(1);
        let col = self.column_count().saturating_sub(1);
        self.selected_cell = CellPosition::new(row, col);
        self.ensure_selection_visible();
    }

    /// Move to first column in current row (Home)
    pub fn move_to_row_start(&mut self) {
        self.selected_cell.col = 0;
        self.ensure_selection_visible();
    }

    /// Move to last column in current row (End)
    pub fn move_to_row_end(&mut self) {
        self.selected_cell.col = self.column_count().saturating_sub(1);
        self.ensure_selection_visible();
    }

    pub fn page_up(&mut self) {
        let page_size = self.viewport.visible_rows.max(1);
        self.selected_cell.row = self.selected_cell.row.saturating_sub(page_size);
        self.ensure_selection_visible();
    }

    pub fn page_down(&mut self) {
        let page_size = self.viewport.visible_rows.max(1);
        self.selected_cell.row =
            (self.selected_cell.row + page_size).min(self.row_count().saturating_sub(1));
        self.ensure_selection_visible();
    }

    /// Ensure the selected cell is visible, scrolling viewport if necessary
    pub fn ensure_selection_visible(&mut self) {
        let (rows, cols) = (self.row_count(), self.column_count());
        self.viewport
            .ensure_visible(self.selected_cell.row, self.selected_cell.col, rows, cols);
    }

    /// Set viewport dimensions (called on resize)
    pub fn set_viewport_size(&mut self, rows: usize, cols: usize) {
        self.viewport.visible_rows = rows;
        self.viewport.visible_cols = cols;
        self.ensure_selection_visible();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_grid(rows: usize, cols: usize) -> GridView {
        let mut view = GridView::new(10, 5);
        view.suspend().resize(rows, cols);
        view
    }

    #[test]
    fn test_move_selection_down_and_right() {
        let mut view = make_grid(5, 3);
        view.move_selection(1, 0);
        assert_eq!(view.selected_cell, CellPosition::new(1, 0));
        view.move_selection(0, 1);
        assert_eq!(view.selected_cell, CellPosition::new(1, 1));
    }

    #[test]
    fn test_move_selection_clamped_without_wrap() {
        let mut view = make_grid(5, 3);
        view.move_selection(-10, 0);
        assert_eq!(view.selected_cell.row, 0);

        view.move_selection(100, 0);
        assert_eq!(view.selected_cell.row, 4);

        view.move_selection(0, -1);
        assert_eq!(view.selected_cell.col, 0);

        view.move_selection(0, 7);
        assert_eq!(view.selected_cell.col, 2);
        view.move_selection(0, 1);
        assert_eq!(view.selected_cell, CellPosition::new(4, 2));
    }

    #[test]
    fn test_move_on_empty_grid() {
        let mut view = make_grid(0, 0);
        view.move_selection(1, 1);
        assert_eq!(view.selected_cell, CellPosition::new(0, 0));
        view.move_to_next_cell();
        view.move_to_prev_cell();
        assert_eq!(view.selected_cell, CellPosition::new(0, 0));
    }

    #[test]
    fn test_move_to_next_cell_wrap() {
        let mut view = make_grid(3, 3);
        view.selected_cell = CellPosition::new(0, 2);
        view.move_to_next_cell();
        assert_eq!(view.selected_cell, CellPosition::new(1, 0));

        view.selected_cell = CellPosition::new(2, 2);
        view.move_to_next_cell();
        assert_eq!(view.selected_cell, CellPosition::new(2, 2));
    }

    #[test]
    fn test_move_to_prev_cell_wrap() {
        let mut view = make_grid(3, 3);
        view.selected_cell = CellPosition::new(1, 0);
        view.move_to_prev_cell();
        assert_eq!(view.selected_cell, CellPosition::new(0, 2));
    }

    #[test]
    fn test_move_to_first_last_cell() {
        let mut view = make_grid(5, 4);
        view.selected_cell = CellPosition::new(2, 2);

        view.move_to_first_cell();
        assert_eq!(view.selected_cell, CellPosition::new(0, 0));

        view.move_to_last_cell();
        assert_eq!(view.selected_cell, CellPosition::new(4, 3));

        view.move_to_row_start();
        assert_eq!(view.selected_cell.col, 0);
        view.move_to_row_end();
        assert_eq!(view.selected_cell.col, 3);
    }

    #[test]
    fn test_page_navigation() {
        let mut view = make_grid(100, 5);

        view.page_down();
        assert_eq!(view.selected_cell.row, 10);
        assert_eq!(view.viewport.top_row, 1);

        view.page_up();
        assert_eq!(view.selected_cell.row, 0);
        assert_eq!(view.viewport.top_row, 0);
    }

    #[test]
    fn test_select_cell_clamps() {
        let mut view = make_grid(3, 3);
        view.select_cell(10, 10);
        assert_eq!(view.selected_cell, CellPosition::new(2, 2));
    }
}
