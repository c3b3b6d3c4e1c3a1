//! Runtime: drives the update loop and performs side effects
//!
//! Messages go through [`update`]; the returned [`Cmd`]s are executed here.
//! File I/O and transforms run synchronously and report back as messages,
//! which are queued and processed before control returns to the caller.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;

use crate::commands::{Cmd, Damage};
use crate::input::{parse_line, Input, HELP};
use crate::messages::{AppMsg, Msg, TransformMsg};
use crate::model::AppModel;
use crate::render::render;
use crate::table::{self, Delimiter, TableModel};
use crate::transform::{self, TransformError, TransformOutcome};
use crate::update::update;

/// The application loop around an [`AppModel`]
pub struct App {
    pub model: AppModel,
    queue: VecDeque<Msg>,
    quit: bool,
}

impl App {
    pub fn new(model: AppModel) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            quit: false,
        }
    }

    /// True once a quit command has been processed
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Process a message and everything it triggers, returning what to redraw
    pub fn dispatch(&mut self, msg: Msg) -> Damage {
        let mut damage = Damage::Areas(vec![]);
        self.queue.push_back(msg);
        while let Some(msg) = self.queue.pop_front() {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.process_cmd(cmd, &mut damage);
            }
        }
        damage
    }

    fn process_cmd(&mut self, cmd: Cmd, damage: &mut Damage) {
        damage.merge(cmd.damage());
        match cmd {
            Cmd::None | Cmd::Redraw | Cmd::RedrawAreas(_) => {}
            Cmd::SaveFile {
                path,
                table,
                delimiter,
            } => self.queue.push_back(save_file(path, &table, delimiter)),
            Cmd::LoadFile { path, delimiter } => self.queue.push_back(load_file(path, delimiter)),
            Cmd::RunTransform { source, table } => {
                self.queue.push_back(run_transform(source, &table))
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, damage);
                }
            }
            Cmd::Quit => self.quit = true,
        }
    }

    /// Handle one line of user input, returning the text to print
    pub fn handle_line(&mut self, line: &str) -> String {
        match parse_line(line) {
            Ok(Input::Msg(msg)) => {
                let damage = self.dispatch(msg);
                if self.quit {
                    return String::new();
                }
                render(&self.model, &damage)
            }
            Ok(Input::Help) => HELP.to_string(),
            Ok(Input::Nothing) => String::new(),
            Err(e) => {
                tracing::debug!("Rejected input {:?}: {}", line, e);
                format!("? {}\n", e)
            }
        }
    }

    /// Everything: grid, console and status bar
    pub fn render_all(&self) -> String {
        render(&self.model, &Damage::Full)
    }
}

fn save_file(path: PathBuf, table: &TableModel, delimiter: Delimiter) -> Msg {
    let result = table::export(table, &path, delimiter).map_err(|e| {
        tracing::error!("Failed to save {}: {}", path.display(), e);
        e.user_message(&path)
    });
    Msg::App(AppMsg::SaveCompleted {
        path,
        delimiter,
        result,
    })
}

fn load_file(path: PathBuf, delimiter: Option<Delimiter>) -> Msg {
    let result = table::import_with_delimiter(&path, delimiter).map_err(|e| {
        tracing::warn!("Failed to open {}: {}", path.display(), e);
        e.user_message(&path)
    });
    Msg::App(AppMsg::FileLoaded { path, result })
}

/// Run a pipeline on its own copy of the table; a panic becomes an error outcome
fn run_transform(source: String, table: &TableModel) -> Msg {
    let outcome = catch_unwind(AssertUnwindSafe(|| transform::run(&source, table)))
        .unwrap_or_else(|_| {
            tracing::error!("Transform panicked: {}", source);
            TransformOutcome::Error(TransformError::new("transform aborted unexpectedly"))
        });
    Msg::Transform(TransformMsg::Completed { source, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    fn app() -> App {
        App::new(AppModel::new(EditorConfig {
            blank_rows: 3,
            blank_columns: 3,
            ..EditorConfig::default()
        }))
    }

    #[test]
    fn test_handle_line_renders_grid() {
        let mut app = app();
        let out = app.handle_line("set B2 hi");
        assert!(out.contains("[hi]"));
        assert!(out.contains("B2"));
    }

    #[test]
    fn test_unknown_line_is_reported() {
        let mut app = app();
        assert!(app.handle_line("jump").starts_with("? unknown command"));
        assert_eq!(app.handle_line(""), "");
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert_eq!(app.handle_line("quit"), "");
        assert!(app.should_quit());
    }

    #[test]
    fn test_transform_round_trip_through_queue() {
        let mut app = app();
        app.handle_line("set A1 3");
        app.handle_line("set A2 4");
        let out = app.handle_line("run sum A");
        assert!(out.contains("> 7"));
        assert!(app.model.history.can_undo());
    }

    #[test]
    fn test_open_missing_file_keeps_table() {
        let mut app = app();
        app.handle_line("set A1 keep");
        let out = app.handle_line("open /definitely/not/here.csv");
        assert!(out.contains("not found") || out.contains("Error"));
        assert_eq!(app.model.table.get(0, 0), Ok("keep"));
    }
}
