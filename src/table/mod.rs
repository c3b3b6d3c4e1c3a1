//! Tabular data: the authoritative model, column labels and CSV persistence
//!
//! # Architecture
//!
//! ```text
//! AppModel
//! ├── TableModel (authoritative cells)
//! ├── GridView   (display strings, derived)
//! └── UndoStack  (EditCommands applied to both)
//! ```
//!
//! Nothing outside this module stores cell data; the grid only holds what it
//! was last told to display.

pub mod io;
pub mod labels;
mod model;
pub mod source;

pub use io::{
    detect_delimiter, export, import, import_with_delimiter, parse_csv, serialize,
    trim_empty_edges, Delimiter, ExportError, ImportError, ParseError,
};
pub use labels::{cell_name, column_index, column_label, column_labels, parse_cell_name};
pub use model::{Axis, TableError, TableModel};
pub use source::{display_name, read_source, SourceError, MAX_SOURCE_SIZE};
