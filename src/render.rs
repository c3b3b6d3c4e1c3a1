//! Text rendering of the grid, status bar and console output
//!
//! The visible part of the grid is printed as fixed-width columns. The
//! selected cell is bracketed; numbers are right-aligned.

use std::fmt::Write;

use crate::commands::{Damage, DamageArea};
use crate::model::{AppModel, ConsoleOutput};

/// Check if a string looks like a number (for right-alignment)
pub fn is_number(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.parse::<f64>().is_ok()
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

/// Render the areas named by `damage`
pub fn render(model: &AppModel, damage: &Damage) -> String {
    let mut out = String::new();
    if damage.includes(DamageArea::Grid) {
        out.push_str(&render_grid(model));
    }
    if damage.includes(DamageArea::Console) {
        out.push_str(&render_console(model));
    }
    if damage.includes(DamageArea::StatusBar) {
        out.push_str(&render_status_bar(model));
    }
    out
}

/// Text shown for a cell: the edit buffer while editing it, else the grid text
fn display_text(model: &AppModel, row: usize, col: usize) -> String {
    if let Some(edit) = &model.view.editing {
        if edit.position.row == row && edit.position.col == col {
            return edit.buffer().to_string();
        }
    }
    model.view.text(row, col).unwrap_or_default().to_string()
}

/// Column headers, row labels and the visible cells
pub fn render_grid(model: &AppModel) -> String {
    let view = &model.view;
    let max_width = model.config.max_cell_width;
    let rows = view.viewport.row_range(view.row_count());
    let cols = view.viewport.col_range(view.column_count());

    if cols.is_empty() {
        return "(empty table)\n".to_string();
    }

    let widths: Vec<usize> = cols
        .clone()
        .map(|c| {
            let label = view.column_labels()[c].chars().count();
            rows.clone()
                .map(|r| display_text(model, r, c).chars().count())
                .fold(label, usize::max)
                .clamp(1, max_width)
        })
        .collect();
    let gutter = view.row_label(rows.end.saturating_sub(1)).len().max(1);

    let mut out = String::new();
    let _ = write!(out, "{:>gutter$} ", "");
    for (c, width) in cols.clone().zip(&widths) {
        let _ = write!(out, " {:^width$} ", view.column_labels()[c], width = *width);
    }
    out.push('\n');

    let selected = view.selected_cell;
    for r in rows {
        let _ = write!(out, "{:>gutter$} ", view.row_label(r));
        for (c, width) in cols.clone().zip(&widths) {
            let text = truncate_text(&display_text(model, r, c), *width);
            let cell = if is_number(&text) {
                format!("{:>width$}", text, width = *width)
            } else {
                format!("{:<width$}", text, width = *width)
            };
            if selected.row == r && selected.col == c {
                let _ = write!(out, "[{}]", cell);
            } else {
                let _ = write!(out, " {} ", cell);
            }
        }
        out.push('\n');
    }
    out
}

/// Selection, file, shape, history and the last status message
pub fn render_status_bar(model: &AppModel) -> String {
    let modified = if model.document.is_modified { "*" } else { "" };
    let mode = if model.view.is_editing() { " EDIT" } else { "" };
    format!(
        "-- {}{} | {}{} | {}x{} | undo {} redo {} | {}\n",
        model.document.display_name(),
        modified,
        model.selection_name(),
        mode,
        model.table.row_count(),
        model.table.column_count(),
        model.history.undo_count(),
        model.history.redo_count(),
        model.ui.status_message
    )
}

/// Output of the last pipeline, if any
pub fn render_console(model: &AppModel) -> String {
    match &model.ui.console {
        Some(ConsoleOutput::Text(text)) => {
            let mut out = String::new();
            for line in text.lines() {
                let _ = writeln!(out, "> {}", line);
            }
            if text.is_empty() {
                out.push_str(">\n");
            }
            out
        }
        Some(ConsoleOutput::Error(message)) => format!("! {}\n", message),
        None => String::new(),
    }
}
