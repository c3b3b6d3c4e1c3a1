//! Grid update functions
//!
//! Handles GridMsg messages: selection, cell editing, undo/redo and
//! structural edits. Every edit reaches the table through the undo stack.

use crate::commands::Cmd;
use crate::history::EditCommand;
use crate::messages::GridMsg;
use crate::model::AppModel;
use crate::table::{cell_name, column_label};

/// Handle grid messages
pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::Move(direction) => {
            let (rows, cols) = direction.delta();
            navigate(model, |view| view.move_selection(rows, cols))
        }
        GridMsg::NextCell => navigate(model, |view| view.move_to_next_cell()),
        GridMsg::PrevCell => navigate(model, |view| view.move_to_prev_cell()),
        GridMsg::RowStart => navigate(model, |view| view.move_to_row_start()),
        GridMsg::RowEnd => navigate(model, |view| view.move_to_row_end()),
        GridMsg::FirstCell => navigate(model, |view| view.move_to_first_cell()),
        GridMsg::LastCell => navigate(model, |view| view.move_to_last_cell()),
        GridMsg::PageUp => navigate(model, |view| view.page_up()),
        GridMsg::PageDown => navigate(model, |view| view.page_down()),
        GridMsg::SelectCell { row, col } => navigate(model, |view| view.select_cell(row, col)),

        GridMsg::StartEditing => {
            if model.view.is_editing() {
                return None;
            }
            model.view.start_editing();
            Some(Cmd::redraw_grid())
        }
        GridMsg::StartEditingWithChar(ch) => {
            if model.view.is_editing() {
                return edit_buffer(model, |edit| edit.insert_char(ch));
            }
            model.view.start_editing_with_char(ch);
            Some(Cmd::redraw_grid())
        }
        GridMsg::EditInsertChar(ch) => edit_buffer(model, |edit| edit.insert_char(ch)),
        GridMsg::EditDeleteBackward => edit_buffer(model, |edit| edit.delete_backward()),
        GridMsg::EditDeleteForward => edit_buffer(model, |edit| edit.delete_forward()),
        GridMsg::EditCursorLeft => edit_buffer(model, |edit| edit.cursor_left()),
        GridMsg::EditCursorRight => edit_buffer(model, |edit| edit.cursor_right()),
        GridMsg::EditCursorHome => edit_buffer(model, |edit| edit.cursor_home()),
        GridMsg::EditCursorEnd => edit_buffer(model, |edit| edit.cursor_end()),
        GridMsg::ConfirmEdit => confirm_edit(model),
        GridMsg::CancelEdit => {
            if !model.view.is_editing() {
                return None;
            }
            model.view.cancel_edit();
            Some(Cmd::redraw_grid())
        }
        GridMsg::EditSelected(text) => edit_selected(model, &text),
        GridMsg::SetCell { row, col, text } => set_cell(model, row, col, &text),

        GridMsg::Undo => undo(model),
        GridMsg::Redo => redo(model),

        GridMsg::InsertRow(at) => {
            let at = at.unwrap_or(model.view.selected_cell.row);
            structural_edit(model, EditCommand::insert_row(at))
        }
        GridMsg::DeleteRow(at) => {
            let at = at.unwrap_or(model.view.selected_cell.row);
            structural_edit(model, EditCommand::delete_row(at))
        }
        GridMsg::InsertColumn(at) => {
            let at = at.unwrap_or(model.view.selected_cell.col);
            structural_edit(model, EditCommand::insert_column(at))
        }
        GridMsg::DeleteColumn(at) => {
            let at = at.unwrap_or(model.view.selected_cell.col);
            structural_edit(model, EditCommand::delete_column(at))
        }
    }
}

/// Apply a selection movement. An in-progress edit is confirmed first.
fn navigate(model: &mut AppModel, f: impl FnOnce(&mut crate::grid::GridView)) -> Option<Cmd> {
    if model.view.is_editing() {
        model.view.confirm_edit();
        commit(model);
    }
    f(&mut model.view);
    Some(Cmd::redraw_grid())
}

fn edit_buffer(
    model: &mut AppModel,
    f: impl FnOnce(&mut crate::grid::CellEditState),
) -> Option<Cmd> {
    let edit = model.view.editing.as_mut()?;
    f(edit);
    Some(Cmd::redraw_grid())
}

/// Confirm the edit, commit it and move down
fn confirm_edit(model: &mut AppModel) -> Option<Cmd> {
    if !model.view.is_editing() {
        return None;
    }
    model.view.confirm_edit();
    commit(model);
    model.view.move_selection(1, 0);
    Some(Cmd::redraw_grid())
}

fn edit_selected(model: &mut AppModel, text: &str) -> Option<Cmd> {
    if model.table.is_empty() {
        model.ui.set_status("Table has no cells");
        return Some(Cmd::redraw_status_bar());
    }
    model.view.start_editing();
    if let Some(edit) = model.view.editing.as_mut() {
        edit.set_buffer(text);
    }
    model.view.confirm_edit();
    commit(model);
    Some(Cmd::redraw_grid())
}

fn set_cell(model: &mut AppModel, row: usize, col: usize, text: &str) -> Option<Cmd> {
    model.view.cancel_edit();
    if !model.view.user_edit(row, col, text) {
        model.ui.set_status(format!(
            "{} is outside the table ({} rows, {} columns)",
            cell_name(row, col),
            model.table.row_count(),
            model.table.column_count()
        ));
        return Some(Cmd::redraw_status_bar());
    }
    model.view.select_cell(row, col);
    commit(model);
    Some(Cmd::redraw_grid())
}

/// Commit queued user edits, reporting the outcome in the status bar
fn commit(model: &mut AppModel) {
    match model.commit_user_edits() {
        Ok(0) => {}
        Ok(_) => {
            if let Some(command) = model.history.peek_undo() {
                model.ui.set_status(command.describe());
            }
        }
        Err(e) => {
            tracing::error!("Failed to commit edit: {}", e);
            model.ui.set_status(format!("Edit rejected: {}", e));
        }
    }
}

fn undo(model: &mut AppModel) -> Option<Cmd> {
    model.view.cancel_edit();
    let description = model.history.peek_undo().map(|c| c.describe());
    match model.undo() {
        Ok(true) => {
            model
                .ui
                .set_status(format!("Undo: {}", description.unwrap_or_default()));
            Some(Cmd::redraw_grid())
        }
        Ok(false) => {
            model.ui.set_status("Nothing to undo");
            Some(Cmd::redraw_status_bar())
        }
        Err(e) => {
            tracing::error!("Undo failed: {}", e);
            debug_assert!(false, "undo failed: {}", e);
            model.ui.set_status(format!("Undo failed: {}", e));
            Some(Cmd::redraw_status_bar())
        }
    }
}

fn redo(model: &mut AppModel) -> Option<Cmd> {
    model.view.cancel_edit();
    let description = model.history.peek_redo().map(|c| c.describe());
    match model.redo() {
        Ok(true) => {
            model
                .ui
                .set_status(format!("Redo: {}", description.unwrap_or_default()));
            Some(Cmd::redraw_grid())
        }
        Ok(false) => {
            model.ui.set_status("Nothing to redo");
            Some(Cmd::redraw_status_bar())
        }
        Err(e) => {
            tracing::error!("Redo failed: {}", e);
            debug_assert!(false, "redo failed: {}", e);
            model.ui.set_status(format!("Redo failed: {}", e));
            Some(Cmd::redraw_status_bar())
        }
    }
}

fn structural_edit(model: &mut AppModel, command: EditCommand) -> Option<Cmd> {
    if model.view.is_editing() {
        model.view.confirm_edit();
        commit(model);
    }
    let label = match &command {
        EditCommand::InsertRow { at } | EditCommand::DeleteRow { at, .. } => {
            format!("row {}", at + 1)
        }
        EditCommand::InsertColumn { at } | EditCommand::DeleteColumn { at, .. } => {
            format!("column {}", column_label(at + 1))
        }
        EditCommand::SetCell { .. } => String::new(),
    };

    match model.apply(command) {
        Ok(_) => {
            if let Some(applied) = model.history.peek_undo() {
                model.ui.set_status(applied.describe());
            }
            Some(Cmd::redraw_grid())
        }
        Err(e) => {
            tracing::warn!("Rejected edit of {}: {}", label, e);
            model.ui.set_status(format!("Cannot change {}: {}", label, e));
            Some(Cmd::redraw_status_bar())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::messages::Direction;
    use crate::table::TableModel;

    fn model() -> AppModel {
        let mut model = AppModel::new(EditorConfig::default());
        model.replace_table(TableModel::from_rows(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ]));
        model
    }

    #[test]
    fn test_move_clamps_at_edges() {
        let mut m = model();
        update_grid(&mut m, GridMsg::Move(Direction::Up));
        update_grid(&mut m, GridMsg::Move(Direction::Left));
        assert_eq!(m.selection_name(), "A1");
        for _ in 0..5 {
            update_grid(&mut m, GridMsg::Move(Direction::Right));
        }
        assert_eq!(m.selection_name(), "B1");
    }

    #[test]
    fn test_typed_edit_confirms_and_moves_down() {
        let mut m = model();
        update_grid(&mut m, GridMsg::StartEditingWithChar('x'));
        update_grid(&mut m, GridMsg::EditInsertChar('y'));
        update_grid(&mut m, GridMsg::ConfirmEdit);

        assert_eq!(m.table.get(0, 0), Ok("xy"));
        assert_eq!(m.selection_name(), "A2");
        assert_eq!(m.history.undo_count(), 1);
    }

    #[test]
    fn test_cancel_edit_records_nothing() {
        let mut m = model();
        update_grid(&mut m, GridMsg::StartEditingWithChar('x'));
        update_grid(&mut m, GridMsg::CancelEdit);
        assert_eq!(m.table.get(0, 0), Ok("a"));
        assert_eq!(m.view.text(0, 0), Some("a"));
        assert!(!m.history.can_undo());
    }

    #[test]
    fn test_set_cell_same_value_is_not_recorded() {
        let mut m = model();
        update_grid(
            &mut m,
            GridMsg::SetCell {
                row: 1,
                col: 1,
                text: "d".to_string(),
            },
        );
        assert!(!m.history.can_undo());
        assert!(!m.document.is_modified);
    }

    #[test]
    fn test_set_cell_outside_table_reports_status() {
        let mut m = model();
        let cmd = update_grid(
            &mut m,
            GridMsg::SetCell {
                row: 5,
                col: 0,
                text: "x".to_string(),
            },
        );
        assert_eq!(cmd, Some(Cmd::redraw_status_bar()));
        assert!(m.ui.status_message.contains("A6"));
        assert_eq!(m.table.row_count(), 2);
    }

    #[test]
    fn test_undo_redo_messages() {
        let mut m = model();
        update_grid(&mut m, GridMsg::EditSelected("z".to_string()));
        update_grid(&mut m, GridMsg::Undo);
        assert_eq!(m.table.get(0, 0), Ok("a"));
        assert_eq!(m.view.text(0, 0), Some("a"));
        update_grid(&mut m, GridMsg::Redo);
        assert_eq!(m.view.text(0, 0), Some("z"));

        update_grid(&mut m, GridMsg::Redo);
        assert_eq!(m.ui.status_message, "Nothing to redo");
    }

    #[test]
    fn test_delete_row_out_of_range_is_rejected() {
        let mut m = model();
        update_grid(&mut m, GridMsg::DeleteRow(Some(9)));
        assert_eq!(m.table.row_count(), 2);
        assert!(!m.history.can_undo());
        assert!(m.ui.status_message.starts_with("Cannot change row 10"));
    }

    #[test]
    fn test_insert_column_at_selection() {
        let mut m = model();
        update_grid(&mut m, GridMsg::Move(Direction::Right));
        update_grid(&mut m, GridMsg::InsertColumn(None));
        assert_eq!(m.table.rows()[0], vec!["a", "", "b"]);
        assert_eq!(m.view.column_labels(), ["A", "B", "C"]);
    }
}
