//! Logging setup and update diagnostics
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=whisk::history=debug` - module-level filtering
//! - `RUST_LOG=message=debug,grid=trace` - scoped filtering
//!
//! Logs are also written to `~/.config/whisk/logs/whisk.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::AppModel;

/// Initialize tracing subscriber with console and file logging
///
/// The console layer writes to stderr so it never mixes with the grid
/// printed on stdout.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of grid state for diffing around an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub shape: (usize, usize),
    pub selected: (usize, usize),
    pub editing: bool,
    pub undo_count: usize,
    pub redo_count: usize,
}

impl GridSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        let selected = model.view.selected_cell;
        Self {
            shape: model.table.shape(),
            selected: (selected.row, selected.col),
            editing: model.view.is_editing(),
            undo_count: model.history.undo_count(),
            redo_count: model.history.redo_count(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &GridSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.shape != other.shape {
            changes.push(format!(
                "shape: {}x{} → {}x{}",
                self.shape.0, self.shape.1, other.shape.0, other.shape.1
            ));
        }
        if self.selected != other.selected {
            changes.push(format!(
                "selection: ({},{}) → ({},{})",
                self.selected.0, self.selected.1, other.selected.0, other.selected.1
            ));
        }
        if self.editing != other.editing {
            let status = if other.editing { "started" } else { "ended" };
            changes.push(format!("edit {}", status));
        }
        if (self.undo_count, self.redo_count) != (other.undo_count, other.redo_count) {
            changes.push(format!(
                "history: {}/{} → {}/{}",
                self.undo_count, self.redo_count, other.undo_count, other.redo_count
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
