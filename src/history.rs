//! Edit history (undo/redo) for table edits.
//!
//! History is a single list of commands with a cursor: everything before the
//! cursor has been applied, everything after it has been undone and can be
//! redone. Recording a new command drops the redo tail.

use crate::table::{TableError, TableModel};

/// Something an [`EditCommand`] can be applied to.
///
/// `TableModel` implements this directly; the session implements it on a
/// pairing of table and grid so both change in the same step.
pub trait EditTarget {
    fn set_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), TableError>;
    fn insert_row(&mut self, at: usize, cells: Vec<String>) -> usize;
    fn delete_row(&mut self, at: usize) -> Result<Vec<String>, TableError>;
    fn insert_column(&mut self, at: usize, cells: Vec<String>) -> usize;
    fn delete_column(&mut self, at: usize) -> Result<Vec<String>, TableError>;
}

impl EditTarget for TableModel {
    fn set_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), TableError> {
        TableModel::set_cell(self, row, col, value)
    }

    fn insert_row(&mut self, at: usize, cells: Vec<String>) -> usize {
        self.insert_row_with(at, cells)
    }

    fn delete_row(&mut self, at: usize) -> Result<Vec<String>, TableError> {
        TableModel::delete_row(self, at)
    }

    fn insert_column(&mut self, at: usize, cells: Vec<String>) -> usize {
        self.insert_column_with(at, cells)
    }

    fn delete_column(&mut self, at: usize) -> Result<Vec<String>, TableError> {
        TableModel::delete_column(self, at)
    }
}

/// A single reversible table edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Replace one cell's value. `old_value != new_value` always holds.
    SetCell {
        row: usize,
        col: usize,
        old_value: String,
        new_value: String,
    },
    /// Insert an empty row
    InsertRow { at: usize },
    /// Delete a row; `cells` holds what was removed once applied
    DeleteRow { at: usize, cells: Vec<String> },
    /// Insert an empty column
    InsertColumn { at: usize },
    /// Delete a column; `cells` holds what was removed once applied
    DeleteColumn { at: usize, cells: Vec<String> },
}

impl EditCommand {
    /// Create a cell edit, or `None` if the value does not change
    pub fn set_cell(
        row: usize,
        col: usize,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Option<Self> {
        let old_value = old_value.into();
        let new_value = new_value.into();
        if old_value == new_value {
            return None;
        }
        Some(Self::SetCell {
            row,
            col,
            old_value,
            new_value,
        })
    }

    pub fn insert_row(at: usize) -> Self {
        Self::InsertRow { at }
    }

    pub fn delete_row(at: usize) -> Self {
        Self::DeleteRow {
            at,
            cells: Vec::new(),
        }
    }

    pub fn insert_column(at: usize) -> Self {
        Self::InsertColumn { at }
    }

    pub fn delete_column(at: usize) -> Self {
        Self::DeleteColumn {
            at,
            cells: Vec::new(),
        }
    }

    /// Apply the command, returning it resolved against the target
    /// (clamped insert index, captured cells of a deletion).
    fn apply(&self, target: &mut dyn EditTarget) -> Result<Self, TableError> {
        match self {
            Self::SetCell { row, col, new_value, .. } => {
                target.set_cell(*row, *col, new_value)?;
                Ok(self.clone())
            }
            Self::InsertRow { at } => Ok(Self::InsertRow {
                at: target.insert_row(*at, Vec::new()),
            }),
            Self::DeleteRow { at, .. } => Ok(Self::DeleteRow {
                at: *at,
                cells: target.delete_row(*at)?,
            }),
            Self::InsertColumn { at } => Ok(Self::InsertColumn {
                at: target.insert_column(*at, Vec::new()),
            }),
            Self::DeleteColumn { at, .. } => Ok(Self::DeleteColumn {
                at: *at,
                cells: target.delete_column(*at)?,
            }),
        }
    }

    /// Apply the inverse of an already-applied command
    fn revert(&self, target: &mut dyn EditTarget) -> Result<(), TableError> {
        match self {
            Self::SetCell { row, col, old_value, .. } => target.set_cell(*row, *col, old_value),
            Self::InsertRow { at } => target.delete_row(*at).map(|_| ()),
            Self::DeleteRow { at, cells } => {
                target.insert_row(*at, cells.clone());
                Ok(())
            }
            Self::InsertColumn { at } => target.delete_column(*at).map(|_| ()),
            Self::DeleteColumn { at, cells } => {
                target.insert_column(*at, cells.clone());
                Ok(())
            }
        }
    }

    /// Short human-readable description for status messages
    pub fn describe(&self) -> String {
        match self {
            Self::SetCell { row, col, .. } => {
                format!("edit {}", crate::table::cell_name(*row, *col))
            }
            Self::InsertRow { at } => format!("insert row {}", at + 1),
            Self::DeleteRow { at, .. } => format!("delete row {}", at + 1),
            Self::InsertColumn { at } => {
                format!("insert column {}", crate::table::column_label(at + 1))
            }
            Self::DeleteColumn { at, .. } => {
                format!("delete column {}", crate::table::column_label(at + 1))
            }
        }
    }
}

/// Linear undo/redo history.
#[derive(Debug, Clone)]
pub struct UndoStack {
    commands: Vec<EditCommand>,
    cursor: usize,
    /// `None` keeps every edit
    max_size: Option<usize>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::with_max_size(0)
    }

    /// Create a history keeping at most `max_size` edits; 0 means unbounded
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            max_size: (max_size > 0).then_some(max_size),
        }
    }

    /// Apply a command and push it at the cursor (drops the redo tail).
    ///
    /// Returns `Ok(false)` without touching anything for a cell edit whose
    /// old and new values are equal.
    pub fn record(
        &mut self,
        target: &mut dyn EditTarget,
        command: EditCommand,
    ) -> Result<bool, TableError> {
        if let EditCommand::SetCell {
            old_value,
            new_value,
            ..
        } = &command
        {
            if old_value == new_value {
                tracing::debug!("Ignoring no-op cell edit");
                return Ok(false);
            }
        }

        let applied = command.apply(target)?;
        tracing::debug!("Recorded {}", applied.describe());

        self.commands.truncate(self.cursor);
        self.commands.push(applied);
        self.cursor += 1;

        // Oldest edits fall off a bounded history
        if let Some(max_size) = self.max_size {
            if self.commands.len() > max_size {
                let excess = self.commands.len() - max_size;
                self.commands.drain(..excess);
                self.cursor -= excess;
            }
        }
        Ok(true)
    }

    /// Record a single cell edit; no-op when the value is unchanged
    pub fn record_cell_edit(
        &mut self,
        target: &mut dyn EditTarget,
        row: usize,
        col: usize,
        old_value: &str,
        new_value: &str,
    ) -> Result<bool, TableError> {
        match EditCommand::set_cell(row, col, old_value, new_value) {
            Some(command) => self.record(target, command),
            None => Ok(false),
        }
    }

    /// Undo the command before the cursor. `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, target: &mut dyn EditTarget) -> Result<bool, TableError> {
        if self.cursor == 0 {
            tracing::debug!("Nothing to undo");
            return Ok(false);
        }
        let command = &self.commands[self.cursor - 1];
        command.revert(target)?;
        tracing::debug!("Undid {}", command.describe());
        self.cursor -= 1;
        Ok(true)
    }

    /// Redo the command after the cursor. `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, target: &mut dyn EditTarget) -> Result<bool, TableError> {
        let Some(command) = self.commands.get(self.cursor) else {
            tracing::debug!("Nothing to redo");
            return Ok(false);
        };
        let applied = command.apply(target)?;
        tracing::debug!("Redid {}", applied.describe());
        self.commands[self.cursor] = applied;
        self.cursor += 1;
        Ok(true)
    }

    /// Clear all history
    pub fn reset(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Number of commands that can be undone
    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    /// Number of commands that can be redone
    pub fn redo_count(&self) -> usize {
        self.commands.len() - self.cursor
    }

    /// The command `undo` would revert next
    pub fn peek_undo(&self) -> Option<&EditCommand> {
        self.cursor.checked_sub(1).map(|i| &self.commands[i])
    }

    /// The command `redo` would apply next
    pub fn peek_redo(&self) -> Option<&EditCommand> {
        self.commands.get(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableModel {
        TableModel::from_rows(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ])
    }

    #[test]
    fn test_set_cell_rejects_no_op() {
        assert!(EditCommand::set_cell(0, 0, "a", "a").is_none());
        assert!(EditCommand::set_cell(0, 0, "a", "b").is_some());
    }

    #[test]
    fn test_record_applies_immediately() {
        let mut t = table();
        let mut history = UndoStack::new();

        assert!(history.record_cell_edit(&mut t, 0, 0, "a", "x").unwrap());
        assert_eq!(t.get(0, 0), Ok("x"));
        assert_eq!(history.undo_count(), 1);
    }

    #[test]
    fn test_no_op_edit_not_recorded() {
        let mut t = table();
        let mut history = UndoStack::new();

        assert!(!history.record_cell_edit(&mut t, 0, 0, "a", "a").unwrap());
        let forced = EditCommand::SetCell {
            row: 0,
            col: 0,
            old_value: "a".to_string(),
            new_value: "a".to_string(),
        };
        assert!(!history.record(&mut t, forced).unwrap());
        assert_eq!(history.undo_count(), 0);
    }

    #[test]
    fn test_undo_redo_cell_edit() {
        let mut t = table();
        let mut history = UndoStack::new();
        history.record_cell_edit(&mut t, 1, 1, "d", "z").unwrap();

        assert!(history.undo(&mut t).unwrap());
        assert_eq!(t.get(1, 1), Ok("d"));
        assert!(history.can_redo());

        assert!(history.redo(&mut t).unwrap());
        assert_eq!(t.get(1, 1), Ok("z"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_on_empty_history_is_not_fatal() {
        let mut t = table();
        let mut history = UndoStack::new();
        assert!(!history.undo(&mut t).unwrap());
        assert!(!history.redo(&mut t).unwrap());
        assert_eq!(t, table());
    }

    #[test]
    fn test_record_drops_redo_tail() {
        let mut t = table();
        let mut history = UndoStack::new();
        history.record_cell_edit(&mut t, 0, 0, "a", "1").unwrap();
        history.record_cell_edit(&mut t, 0, 1, "b", "2").unwrap();
        history.undo(&mut t).unwrap();

        history.record_cell_edit(&mut t, 1, 0, "c", "3").unwrap();
        assert!(!history.can_redo());
        assert!(!history.redo(&mut t).unwrap());
        assert_eq!(t.get(0, 1), Ok("b"));
    }

    #[test]
    fn test_undo_delete_row_restores_cells() {
        let mut t = table();
        let mut history = UndoStack::new();
        history.record(&mut t, EditCommand::delete_row(0)).unwrap();
        assert_eq!(t.shape(), (1, 2));
        assert_eq!(
            history.peek_undo(),
            Some(&EditCommand::DeleteRow {
                at: 0,
                cells: vec!["a".to_string(), "b".to_string()],
            })
        );

        history.undo(&mut t).unwrap();
        assert_eq!(t, table());

        history.redo(&mut t).unwrap();
        assert_eq!(t.get(0, 0), Ok("c"));
    }

    #[test]
    fn test_undo_delete_column_restores_cells() {
        let mut t = table();
        let mut history = UndoStack::new();
        history.record(&mut t, EditCommand::delete_column(0)).unwrap();
        assert_eq!(t.shape(), (2, 1));

        history.undo(&mut t).unwrap();
        assert_eq!(t, table());
    }

    #[test]
    fn test_insert_records_clamped_index() {
        let mut t = table();
        let mut history = UndoStack::new();
        history.record(&mut t, EditCommand::insert_column(40)).unwrap();

        assert_eq!(history.peek_undo(), Some(&EditCommand::InsertColumn { at: 2 }));
        history.undo(&mut t).unwrap();
        assert_eq!(t, table());
    }

    #[test]
    fn test_failed_record_leaves_history_untouched() {
        let mut t = table();
        let mut history = UndoStack::new();
        assert!(history.record(&mut t, EditCommand::delete_row(9)).is_err());
        assert_eq!(history.undo_count(), 0);
        assert_eq!(t, table());
    }

    #[test]
    fn test_max_size() {
        let mut t = TableModel::blank(1, 1);
        let mut history = UndoStack::with_max_size(3);

        let mut previous = String::new();
        for i in 0..5 {
            let value = i.to_string();
            history
                .record_cell_edit(&mut t, 0, 0, &previous, &value)
                .unwrap();
            previous = value;
        }

        assert_eq!(history.undo_count(), 3);
        while history.undo(&mut t).unwrap() {}
        assert_eq!(t.get(0, 0), Ok("1"));
    }

    #[test]
    fn test_unbounded_history_undoes_everything() {
        let mut t = TableModel::blank(1, 1);
        let mut history = UndoStack::new();

        let mut previous = String::new();
        for i in 0..1500 {
            let value = i.to_string();
            history
                .record_cell_edit(&mut t, 0, 0, &previous, &value)
                .unwrap();
            previous = value;
        }

        assert_eq!(history.undo_count(), 1500);
        while history.undo(&mut t).unwrap() {}
        assert_eq!(t.get(0, 0), Ok(""));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut t = table();
        let mut history = UndoStack::new();
        history.record_cell_edit(&mut t, 0, 0, "a", "x").unwrap();
        history.undo(&mut t).unwrap();
        history.reset();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
