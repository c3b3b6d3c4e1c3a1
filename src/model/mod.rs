//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.
//!
//! ```text
//! AppModel
//! ├── table: TableModel   (authoritative cells)
//! ├── view: GridView      (display strings, selection, viewport)
//! ├── history: UndoStack
//! ├── document: DocumentInfo (path, delimiter, modified flag)
//! ├── ui: UiState         (status line, console output)
//! └── config: EditorConfig
//! ```

pub mod ui;

pub use ui::{ConsoleOutput, UiState};

use std::path::{Path, PathBuf};

use crate::config::EditorConfig;
use crate::grid::{self, GridView, SyncedGrid};
use crate::history::{EditCommand, UndoStack};
use crate::table::{cell_name, Delimiter, TableError, TableModel};

/// Where the table came from and how it will be written back
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    /// File the table was loaded from or last saved to
    pub file_path: Option<PathBuf>,
    /// Delimiter used for that file
    pub delimiter: Delimiter,
    /// Table differs from what was last loaded or saved
    pub is_modified: bool,
}

impl DocumentInfo {
    /// File name for the status bar
    pub fn display_name(&self) -> String {
        match &self.file_path {
            Some(path) => crate::table::display_name(path),
            None => "[untitled]".to_string(),
        }
    }
}

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// The single authoritative table
    pub table: TableModel,
    /// Display projection of the table
    pub view: GridView,
    /// Undo/redo history for `table`
    pub history: UndoStack,
    pub document: DocumentInfo,
    pub ui: UiState,
    /// Persisted editor configuration
    pub config: EditorConfig,
}

impl AppModel {
    /// Create a model with a blank table sized from the config
    pub fn new(config: EditorConfig) -> Self {
        let table = TableModel::blank(config.blank_rows, config.blank_columns);
        let document = DocumentInfo {
            delimiter: config.default_delimiter,
            ..DocumentInfo::default()
        };
        Self::with_table(config, table, document, "New table")
    }

    /// Create a model around an already loaded table
    pub fn with_table(
        config: EditorConfig,
        table: TableModel,
        document: DocumentInfo,
        status: impl Into<String>,
    ) -> Self {
        let mut view = GridView::new(config.visible_rows, config.visible_columns);
        grid::render_full(&mut view, &table);
        Self {
            table,
            view,
            history: UndoStack::with_max_size(config.undo_limit),
            document,
            ui: UiState::with_status(status),
            config,
        }
    }

    /// Table and grid paired for an undoable edit
    pub fn edit_target(&mut self) -> SyncedGrid<'_> {
        SyncedGrid::new(&mut self.table, &mut self.view)
    }

    /// Replace the whole table, re-render and forget all history
    pub fn replace_table(&mut self, table: TableModel) {
        tracing::debug!(
            "Replacing table: {}x{} -> {}x{}",
            self.table.row_count(),
            self.table.column_count(),
            table.row_count(),
            table.column_count()
        );
        self.table = table;
        grid::render_full(&mut self.view, &self.table);
        self.history.reset();
    }

    /// Commit queued grid edits through the undo stack
    pub fn commit_user_edits(&mut self) -> Result<usize, TableError> {
        let recorded = grid::commit_user_edits(&mut self.table, &mut self.view, &mut self.history)?;
        if recorded > 0 {
            self.document.is_modified = true;
        }
        Ok(recorded)
    }

    /// Apply a command and record it for undo
    pub fn apply(&mut self, command: EditCommand) -> Result<bool, TableError> {
        let mut target = SyncedGrid::new(&mut self.table, &mut self.view);
        let applied = self.history.record(&mut target, command)?;
        if applied {
            self.document.is_modified = true;
        }
        Ok(applied)
    }

    pub fn undo(&mut self) -> Result<bool, TableError> {
        let mut target = SyncedGrid::new(&mut self.table, &mut self.view);
        let undone = self.history.undo(&mut target)?;
        if undone {
            self.document.is_modified = true;
        }
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, TableError> {
        let mut target = SyncedGrid::new(&mut self.table, &mut self.view);
        let redone = self.history.redo(&mut target)?;
        if redone {
            self.document.is_modified = true;
        }
        Ok(redone)
    }

    /// Name of the selected cell, e.g. "B3"
    pub fn selection_name(&self) -> String {
        let pos = self.view.selected_cell;
        cell_name(pos.row, pos.col)
    }

    /// Delimiter to write `path` with: its extension, else the current one
    pub fn delimiter_for(&self, path: &Path) -> Delimiter {
        Delimiter::for_path(path).unwrap_or(self.document.delimiter)
    }

    /// Resize the printed grid area
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.view.set_viewport_size(rows.max(1), cols.max(1));
    }
}
