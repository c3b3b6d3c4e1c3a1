//! Transform console update functions

use crate::commands::Cmd;
use crate::messages::TransformMsg;
use crate::model::{AppModel, ConsoleOutput};
use crate::transform::TransformOutcome;

/// Handle transform console messages
pub fn update_transform(model: &mut AppModel, msg: TransformMsg) -> Option<Cmd> {
    match msg {
        TransformMsg::Run(source) => {
            let source = source.trim().to_string();
            if source.is_empty() {
                model.ui.set_status("Nothing to run");
                return Some(Cmd::redraw_status_bar());
            }
            if model.view.is_editing() {
                model.view.confirm_edit();
                if let Err(e) = model.commit_user_edits() {
                    tracing::error!("Failed to commit edit before transform: {}", e);
                }
            }
            model.ui.is_transforming = true;
            model.ui.last_transform = Some(source.clone());
            model.ui.set_status("Running...");
            Some(Cmd::RunTransform {
                source,
                table: model.table.clone(),
            })
        }

        TransformMsg::Completed { source, outcome } => {
            model.ui.is_transforming = false;
            match outcome {
                TransformOutcome::Table(table) => {
                    let (rows, cols) = table.shape();
                    model.replace_table(table);
                    model.document.is_modified = true;
                    model.ui.console = None;
                    model
                        .ui
                        .set_status(format!("Applied '{}' ({} rows, {} columns)", source, rows, cols));
                    Some(Cmd::Redraw)
                }
                TransformOutcome::Text(text) => {
                    model.ui.console = Some(ConsoleOutput::Text(text));
                    model.ui.set_status(format!("Ran '{}'", source));
                    Some(Cmd::redraw_console())
                }
                TransformOutcome::Error(e) => {
                    tracing::warn!("Transform '{}' failed: {}", source, e);
                    model.ui.console = Some(ConsoleOutput::Error(e.to_string()));
                    model.ui.set_status("Transform failed; table unchanged");
                    Some(Cmd::redraw_console())
                }
            }
        }
    }
}
