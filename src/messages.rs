//! Message types for the Elm-style architecture
//!
//! Messages represent all possible events that can update the application state.

use std::path::PathBuf;

use crate::table::{Delimiter, TableModel};
use crate::transform::TransformOutcome;

/// Direction for selection movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, column) step for this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Grid messages (selection, cell editing, structure)
#[derive(Debug, Clone, PartialEq)]
pub enum GridMsg {
    // === Navigation ===
    /// Move the selection one cell, stopping at the edges
    Move(Direction),
    /// Tab
    NextCell,
    /// Shift+Tab
    PrevCell,
    RowStart,
    RowEnd,
    FirstCell,
    LastCell,
    PageUp,
    PageDown,
    /// Select a specific cell (0-indexed)
    SelectCell { row: usize, col: usize },

    // === Cell editing ===
    /// Start editing the selected cell with its current text
    StartEditing,
    /// Start editing, replacing the content with a character
    StartEditingWithChar(char),
    EditInsertChar(char),
    EditDeleteBackward,
    EditDeleteForward,
    EditCursorLeft,
    EditCursorRight,
    EditCursorHome,
    EditCursorEnd,
    /// Confirm the edit and move down
    ConfirmEdit,
    /// Discard the edit
    CancelEdit,
    /// Replace the selected cell's text in one step
    EditSelected(String),
    /// Replace a cell's text as if typed into it (0-indexed)
    SetCell { row: usize, col: usize, text: String },

    // === History ===
    Undo,
    Redo,

    // === Structure (None = at the selection) ===
    InsertRow(Option<usize>),
    DeleteRow(Option<usize>),
    InsertColumn(Option<usize>),
    DeleteColumn(Option<usize>),
}

/// Transform console messages
#[derive(Debug, Clone, PartialEq)]
pub enum TransformMsg {
    /// Run a pipeline against the current table
    Run(String),
    /// Pipeline finished
    Completed {
        source: String,
        outcome: TransformOutcome,
    },
}

/// Application-level messages (file operations, display)
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// Printed grid area changed
    Resize { rows: usize, cols: usize },
    /// Save to the current path, or to a new one
    SaveFile(Option<PathBuf>),
    /// Import a file, replacing the table. The delimiter is detected when not given.
    LoadFile {
        path: PathBuf,
        delimiter: Option<Delimiter>,
    },
    /// Replace the table with a blank one
    NewFile,
    /// File save completed
    SaveCompleted {
        path: PathBuf,
        delimiter: Delimiter,
        result: Result<(), String>,
    },
    /// File load completed
    FileLoaded {
        path: PathBuf,
        result: Result<(TableModel, Delimiter), String>,
    },
    /// Print the grid
    Show,
    /// Quit the application
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Grid messages (selection, editing, structure, history)
    Grid(GridMsg),
    /// Transform console messages
    Transform(TransformMsg),
    /// App messages (file I/O, display)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn move_selection(direction: Direction) -> Self {
        Msg::Grid(GridMsg::Move(direction))
    }

    pub fn set_cell(row: usize, col: usize, text: impl Into<String>) -> Self {
        Msg::Grid(GridMsg::SetCell {
            row,
            col,
            text: text.into(),
        })
    }

    pub fn run_transform(source: impl Into<String>) -> Self {
        Msg::Transform(TransformMsg::Run(source.into()))
    }
}
