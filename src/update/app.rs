//! App message handlers (file operations, display)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::AppModel;
use crate::table::{display_name, TableModel};

/// Handle app messages (file operations, display)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize { rows, cols } => {
            model.resize(rows, cols);
            Some(Cmd::redraw_grid())
        }

        AppMsg::SaveFile(path) => {
            let Some(path) = path.or_else(|| model.document.file_path.clone()) else {
                model.ui.set_status("No file path - use save PATH");
                return Some(Cmd::redraw_status_bar());
            };
            if model.view.is_editing() {
                model.view.confirm_edit();
                if let Err(e) = model.commit_user_edits() {
                    tracing::error!("Failed to commit edit before save: {}", e);
                }
            }
            let delimiter = model.delimiter_for(&path);
            model.ui.is_saving = true;
            model.ui.set_status("Saving...");
            Some(Cmd::SaveFile {
                path,
                table: model.table.clone(),
                delimiter,
            })
        }

        AppMsg::LoadFile { path, delimiter } => {
            model.ui.is_loading = true;
            model.ui.set_status("Loading...");
            Some(Cmd::LoadFile { path, delimiter })
        }

        AppMsg::NewFile => {
            let table = TableModel::blank(model.config.blank_rows, model.config.blank_columns);
            model.replace_table(table);
            model.document.file_path = None;
            model.document.delimiter = model.config.default_delimiter;
            model.document.is_modified = false;
            model.ui.console = None;
            model.ui.set_status("New table");
            Some(Cmd::Redraw)
        }

        AppMsg::SaveCompleted {
            path,
            delimiter,
            result,
        } => {
            model.ui.is_saving = false;
            match result {
                Ok(()) => {
                    model.ui.set_status(format!("Saved: {}", display_name(&path)));
                    model.document.file_path = Some(path);
                    model.document.delimiter = delimiter;
                    model.document.is_modified = false;
                }
                Err(e) => {
                    model.ui.set_status(format!("Error: {}", e));
                }
            }
            Some(Cmd::redraw_status_bar())
        }

        AppMsg::FileLoaded { path, result } => {
            model.ui.is_loading = false;
            match result {
                Ok((table, delimiter)) => {
                    let shape = table.shape();
                    model.replace_table(table);
                    model.view.move_to_first_cell();
                    model.document.file_path = Some(path.clone());
                    model.document.delimiter = delimiter;
                    model.document.is_modified = false;
                    model.ui.console = None;
                    model.ui.set_status(format!(
                        "Loaded: {} ({} rows, {} columns)",
                        display_name(&path),
                        shape.0,
                        shape.1
                    ));
                    Some(Cmd::Redraw)
                }
                Err(e) => {
                    // The current table stays as it was
                    model.ui.set_status(format!("Error: {}", e));
                    Some(Cmd::redraw_status_bar())
                }
            }
        }

        AppMsg::Show => Some(Cmd::Redraw),

        AppMsg::Quit => Some(Cmd::Quit),
    }
}
