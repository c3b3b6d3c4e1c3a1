//! Keeping the grid and the table in step
//!
//! Model -> View: every write happens under a [`RenderGuard`], so it can
//! never come back as a user edit.
//!
//! View -> Model: queued [`CellChanged`] notifications are compared with the
//! table and recorded in the undo stack when they differ.
//!
//! [`RenderGuard`]: super::RenderGuard
//! [`CellChanged`]: super::CellChanged

use super::view::GridView;
use crate::history::{EditTarget, UndoStack};
use crate::table::{TableError, TableModel};

/// Rewrite the whole grid from the table: shape, labels and every cell
pub fn render_full(view: &mut GridView, table: &TableModel) {
    {
        let mut guard = view.suspend();
        guard.resize(table.row_count(), table.column_count());
        for (r, row) in table.rows().iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                guard.set_text(r, c, value);
            }
        }
    }
    view.cancel_edit();
    view.clamp_selection();
    view.ensure_selection_visible();
    tracing::debug!(
        "Rendered {}x{} grid",
        table.row_count(),
        table.column_count()
    );
}

/// Rewrite one cell from the table
pub fn render_cell(view: &mut GridView, table: &TableModel, row: usize, col: usize) {
    match table.get(row, col) {
        Ok(value) => view.suspend().set_text(row, col, value),
        Err(e) => tracing::warn!("Cannot render cell: {}", e),
    }
}

/// A table and its grid, edited together.
///
/// Each operation mutates the table first and mirrors the result into the
/// grid under a render guard, so the two never disagree after a step.
pub struct SyncedGrid<'a> {
    pub table: &'a mut TableModel,
    pub view: &'a mut GridView,
}

impl<'a> SyncedGrid<'a> {
    pub fn new(table: &'a mut TableModel, view: &'a mut GridView) -> Self {
        Self { table, view }
    }

    fn after_shape_change(&mut self) {
        self.view.clamp_selection();
        self.view.ensure_selection_visible();
    }
}

impl EditTarget for SyncedGrid<'_> {
    fn set_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), TableError> {
        self.table.set_cell(row, col, value)?;
        self.view.suspend().set_text(row, col, value);
        Ok(())
    }

    fn insert_row(&mut self, at: usize, cells: Vec<String>) -> usize {
        let at = self.table.insert_row_with(at, cells);
        let row = self.table.rows()[at].clone();
        self.view.suspend().insert_row(at, row);
        self.after_shape_change();
        at
    }

    fn delete_row(&mut self, at: usize) -> Result<Vec<String>, TableError> {
        let removed = self.table.delete_row(at)?;
        self.view.suspend().delete_row(at);
        self.after_shape_change();
        Ok(removed)
    }

    fn insert_column(&mut self, at: usize, cells: Vec<String>) -> usize {
        let at = self.table.insert_column_with(at, cells);
        let column = self
            .table
            .rows()
            .iter()
            .map(|row| row[at].clone())
            .collect();
        self.view.suspend().insert_column(at, column);
        self.after_shape_change();
        at
    }

    fn delete_column(&mut self, at: usize) -> Result<Vec<String>, TableError> {
        let removed = self.table.delete_column(at)?;
        self.view.suspend().delete_column(at);
        self.after_shape_change();
        Ok(removed)
    }
}

/// Commit queued user edits from the grid into the table via the undo stack.
///
/// Returns how many edits were recorded. Changes equal to the table's
/// current value are dropped.
pub fn commit_user_edits(
    table: &mut TableModel,
    view: &mut GridView,
    history: &mut UndoStack,
) -> Result<usize, TableError> {
    debug_assert!(
        !view.signals_blocked(),
        "user edits committed while a render is in progress"
    );

    let mut recorded = 0;
    for change in view.take_changes() {
        let (row, col) = (change.position.row, change.position.col);
        let old_value = match table.get(row, col) {
            Ok(value) => value.to_string(),
            Err(e) => {
                // The grid showed a cell the table does not have; resync.
                tracing::error!("Grid and table disagree: {}", e);
                render_full(view, table);
                return Err(e);
            }
        };

        let mut target = SyncedGrid::new(table, view);
        if history.record_cell_edit(&mut target, row, col, &old_value, &change.text)? {
            recorded += 1;
        }
    }
    Ok(recorded)
}
