//! The interactive grid: display strings, labels, selection and edit state
//!
//! The grid never owns table data. It holds the strings it was last told to
//! display and reports user edits as [`CellChanged`] notifications. Writes
//! that come from the table (renders, undo, redo) go through a
//! [`RenderGuard`], which blocks those notifications for its lifetime.

use std::ops::Deref;

use super::viewport::GridViewport;
use crate::table::column_labels;

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Notification emitted when the user changes a cell's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChanged {
    pub position: CellPosition,
    pub text: String,
}

/// In-progress edit of a single cell
#[derive(Debug, Clone)]
pub struct CellEditState {
    /// Position of the cell being edited
    pub position: CellPosition,
    /// Current buffer content
    buffer: String,
    /// Cursor position in characters
    cursor: usize,
    /// Original value before editing (for cancel)
    pub original: String,
}

impl CellEditState {
    /// Create new edit state for a cell, cursor at the end
    pub fn new(position: CellPosition, value: String) -> Self {
        Self {
            position,
            cursor: value.chars().count(),
            buffer: value.clone(),
            original: value,
        }
    }

    /// Create new edit state starting with a character (replaces content)
    pub fn with_char(position: CellPosition, original: String, ch: char) -> Self {
        Self {
            position,
            buffer: ch.to_string(),
            cursor: 1,
            original,
        }
    }

    /// Get the current buffer content
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert text at cursor, dropping line breaks
    pub fn insert_text(&mut self, text: &str) {
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    /// Replace the whole buffer, cursor at the end
    pub fn set_buffer(&mut self, text: &str) {
        self.buffer.clear();
        self.cursor = 0;
        self.insert_text(text);
    }

    /// Delete character before cursor (backspace)
    pub fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
    }

    /// Delete character at cursor (delete)
    pub fn delete_forward(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    /// Check if content changed from original
    pub fn is_modified(&self) -> bool {
        self.buffer != self.original
    }
}

/// Visual projection of the table
#[derive(Debug, Clone, Default)]
pub struct GridView {
    cells: Vec<Vec<String>>,
    column_count: usize,
    column_labels: Vec<String>,
    /// Currently selected cell
    pub selected_cell: CellPosition,
    /// Viewport for visible region
    pub viewport: GridViewport,
    /// Cell editing state (Some when editing a cell)
    pub editing: Option<CellEditState>,
    signals_blocked: bool,
    pending: Vec<CellChanged>,
}

impl GridView {
    /// Create an empty grid showing `visible_rows` x `visible_cols` at a time
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            viewport: GridViewport::new(visible_rows, visible_cols),
            ..Self::default()
        }
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Column header labels (A, B, ...)
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// Row header label (1-based)
    pub fn row_label(&self, row: usize) -> String {
        (row + 1).to_string()
    }

    /// Displayed text of a cell
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    /// All displayed rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// True while a render guard is alive
    pub fn signals_blocked(&self) -> bool {
        self.signals_blocked
    }

    /// Block change notifications until the returned guard is dropped
    pub fn suspend(&mut self) -> RenderGuard<'_> {
        let was_blocked = self.signals_blocked;
        self.signals_blocked = true;
        RenderGuard {
            view: self,
            was_blocked,
        }
    }

    /// Change a cell's text as the user would.
    ///
    /// Queues a [`CellChanged`] unless a render guard is alive. Returns false
    /// when the position is outside the grid.
    pub fn user_edit(&mut self, row: usize, col: usize, text: &str) -> bool {
        let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) else {
            tracing::warn!("Edit outside grid at ({}, {})", row, col);
            return false;
        };
        text.clone_into(cell);

        if !self.signals_blocked {
            self.pending.push(CellChanged {
                position: CellPosition::new(row, col),
                text: text.to_string(),
            });
        }
        true
    }

    /// Drain queued change notifications
    pub fn take_changes(&mut self) -> Vec<CellChanged> {
        std::mem::take(&mut self.pending)
    }

    /// True if notifications are waiting to be committed
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Ensure selected cell is within valid bounds
    pub fn clamp_selection(&mut self) {
        let max_row = self.row_count().saturating_sub(1);
        let max_col = self.column_count().saturating_sub(1);

        self.selected_cell.row = self.selected_cell.row.min(max_row);
        self.selected_cell.col = self.selected_cell.col.min(max_col);
    }

    /// Check if currently editing a cell
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Start editing the selected cell
    pub fn start_editing(&mut self) {
        let pos = self.selected_cell;
        if let Some(value) = self.text(pos.row, pos.col) {
            self.editing = Some(CellEditState::new(pos, value.to_string()));
        }
    }

    /// Start editing with initial character (replaces cell content)
    pub fn start_editing_with_char(&mut self, ch: char) {
        let pos = self.selected_cell;
        if let Some(value) = self.text(pos.row, pos.col) {
            self.editing = Some(CellEditState::with_char(pos, value.to_string(), ch));
        }
    }

    /// Finish the current edit, emitting a user edit if the text changed
    pub fn confirm_edit(&mut self) -> bool {
        let Some(edit) = self.editing.take() else {
            return false;
        };
        if !edit.is_modified() {
            return false;
        }
        self.user_edit(edit.position.row, edit.position.col, edit.buffer())
    }

    /// Cancel edit and discard changes
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}

/// Scoped suppression of change notifications.
///
/// Programmatic writes are only available through this guard. Dropping it,
/// including during unwinding, restores the previous notification state.
pub struct RenderGuard<'a> {
    view: &'a mut GridView,
    was_blocked: bool,
}

impl RenderGuard<'_> {
    /// Resize to `rows` x `cols`, relabelling columns. New cells are empty.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let view = &mut *self.view;
        view.cells.resize_with(rows, Vec::new);
        for row in &mut view.cells {
            row.resize(cols, String::new());
        }
        view.column_count = cols;
        view.column_labels = column_labels(cols);
    }

    /// Overwrite a cell's text without notifying
    pub fn set_text(&mut self, row: usize, col: usize, text: &str) {
        if let Some(cell) = self.view.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            text.clone_into(cell);
        }
    }

    pub fn insert_row(&mut self, at: usize, mut cells: Vec<String>) {
        let view = &mut *self.view;
        cells.resize(view.column_count, String::new());
        view.cells.insert(at.min(view.cells.len()), cells);
    }

    pub fn delete_row(&mut self, at: usize) {
        if at < self.view.cells.len() {
            self.view.cells.remove(at);
        }
    }

    pub fn insert_column(&mut self, at: usize, cells: Vec<String>) {
        let view = &mut *self.view;
        let at = at.min(view.column_count);
        let mut values = cells.into_iter();
        for row in &mut view.cells {
            row.insert(at, values.next().unwrap_or_default());
        }
        view.column_count += 1;
        view.column_labels = column_labels(view.column_count);
    }

    pub fn delete_column(&mut self, at: usize) {
        let view = &mut *self.view;
        if at >= view.column_count {
            return;
        }
        for row in &mut view.cells {
            row.remove(at);
        }
        view.column_count -= 1;
        view.column_labels = column_labels(view.column_count);
    }
}

impl Deref for RenderGuard<'_> {
    type Target = GridView;

    fn deref(&self) -> &GridView {
        self.view
    }
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.view.signals_blocked = self.was_blocked;
    }
}
