//! Line-driven input: one editor action per line
//!
//! Each line is turned into a [`Msg`] for the update loop. Cell addresses use
//! spreadsheet names (`B3`), rows are 1-based and columns are letters.

use std::fmt;
use std::path::PathBuf;

use crate::messages::{AppMsg, Direction, GridMsg, Msg};
use crate::table::{column_index, parse_cell_name};

/// Summary printed by `help`
pub const HELP: &str = "\
Navigation:  up down left right  tab backtab  home end  first last  pgup pgdn  goto B3
Editing:     set B3 TEXT   edit TEXT   undo   redo
Structure:   insert-row [N]   delete-row [N]   insert-col [L]   delete-col [L]
Files:       open PATH   save [PATH]   new
Console:     run PIPELINE   (e.g. run filter C contains ann | sort B desc | head 10)
Display:     show   resize ROWS COLS   help   quit
";

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Dispatch this message
    Msg(Msg),
    /// Print the help text
    Help,
    /// Blank line or comment
    Nothing,
}

/// A line that could not be understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    pub message: String,
}

impl InputError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InputError {}

fn cell_arg(arg: &str) -> Result<(usize, usize), InputError> {
    parse_cell_name(arg).ok_or_else(|| InputError::new(format!("'{}' is not a cell name", arg)))
}

/// Optional 1-based row number, returned 0-based
fn row_arg(arg: &str) -> Result<Option<usize>, InputError> {
    if arg.is_empty() {
        return Ok(None);
    }
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n - 1)),
        _ => Err(InputError::new(format!("'{}' is not a row number", arg))),
    }
}

/// Optional column letter, returned 0-based
fn column_arg(arg: &str) -> Result<Option<usize>, InputError> {
    if arg.is_empty() {
        return Ok(None);
    }
    column_index(arg)
        .map(|i| Some(i - 1))
        .ok_or_else(|| InputError::new(format!("'{}' is not a column letter", arg)))
}

fn required<'a>(command: &str, arg: &'a str, what: &str) -> Result<&'a str, InputError> {
    if arg.is_empty() {
        Err(InputError::new(format!("{} needs {}", command, what)))
    } else {
        Ok(arg)
    }
}

/// Parse one input line
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Input::Nothing);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let command = command.to_lowercase();

    let grid = |msg: GridMsg| -> Result<Input, InputError> { Ok(Input::Msg(Msg::Grid(msg))) };
    let app = |msg: AppMsg| -> Result<Input, InputError> { Ok(Input::Msg(Msg::App(msg))) };

    match command.as_str() {
        "up" | "k" => grid(GridMsg::Move(Direction::Up)),
        "down" | "j" => grid(GridMsg::Move(Direction::Down)),
        "left" | "h" => grid(GridMsg::Move(Direction::Left)),
        "right" | "l" => grid(GridMsg::Move(Direction::Right)),
        "tab" => grid(GridMsg::NextCell),
        "backtab" => grid(GridMsg::PrevCell),
        "home" => grid(GridMsg::RowStart),
        "end" => grid(GridMsg::RowEnd),
        "first" => grid(GridMsg::FirstCell),
        "last" => grid(GridMsg::LastCell),
        "pgup" => grid(GridMsg::PageUp),
        "pgdn" => grid(GridMsg::PageDown),
        "goto" => {
            let (row, col) = cell_arg(required("goto", rest, "a cell name")?)?;
            grid(GridMsg::SelectCell { row, col })
        }
        "set" => {
            let (cell, text) = match rest.split_once(char::is_whitespace) {
                Some((cell, text)) => (cell, text),
                None => (required("set", rest, "a cell name")?, ""),
            };
            let (row, col) = cell_arg(cell)?;
            grid(GridMsg::SetCell {
                row,
                col,
                text: text.to_string(),
            })
        }
        "edit" => grid(GridMsg::EditSelected(rest.to_string())),
        "undo" => grid(GridMsg::Undo),
        "redo" => grid(GridMsg::Redo),
        "insert-row" => grid(GridMsg::InsertRow(row_arg(rest)?)),
        "delete-row" => grid(GridMsg::DeleteRow(row_arg(rest)?)),
        "insert-col" => grid(GridMsg::InsertColumn(column_arg(rest)?)),
        "delete-col" => grid(GridMsg::DeleteColumn(column_arg(rest)?)),
        "open" => app(AppMsg::LoadFile {
            path: PathBuf::from(required("open", rest, "a path")?),
            delimiter: None,
        }),
        "save" => app(AppMsg::SaveFile(
            (!rest.is_empty()).then(|| PathBuf::from(rest)),
        )),
        "new" => app(AppMsg::NewFile),
        "run" => Ok(Input::Msg(Msg::run_transform(required(
            "run", rest, "a pipeline",
        )?))),
        "show" => app(AppMsg::Show),
        "resize" => {
            let dims: Vec<usize> = rest
                .split_whitespace()
                .map(|n| n.parse::<usize>())
                .collect::<Result<_, _>>()
                .map_err(|_| InputError::new("resize needs ROWS COLS"))?;
            match dims.as_slice() {
                [rows, cols] => app(AppMsg::Resize {
                    rows: *rows,
                    cols: *cols,
                }),
                _ => Err(InputError::new("resize needs ROWS COLS")),
            }
        }
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => app(AppMsg::Quit),
        other => Err(InputError::new(format!(
            "unknown command '{}' (try help)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(line: &str) -> Msg {
        match parse_line(line) {
            Ok(Input::Msg(msg)) => msg,
            other => panic!("expected a message for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line("   "), Ok(Input::Nothing));
        assert_eq!(parse_line("# setup"), Ok(Input::Nothing));
    }

    #[test]
    fn test_navigation() {
        assert_eq!(msg("UP"), Msg::move_selection(Direction::Up));
        assert_eq!(
            msg("goto c10"),
            Msg::Grid(GridMsg::SelectCell { row: 9, col: 2 })
        );
        assert!(parse_line("goto 10").is_err());
    }

    #[test]
    fn test_set_keeps_inner_spacing() {
        assert_eq!(msg("set B3 New  York"), Msg::set_cell(2, 1, "New  York"));
        assert_eq!(msg("set A1"), Msg::set_cell(0, 0, ""));
    }

    #[test]
    fn test_structure_arguments() {
        assert_eq!(msg("insert-row"), Msg::Grid(GridMsg::InsertRow(None)));
        assert_eq!(msg("delete-row 3"), Msg::Grid(GridMsg::DeleteRow(Some(2))));
        assert_eq!(
            msg("insert-col AA"),
            Msg::Grid(GridMsg::InsertColumn(Some(26)))
        );
        assert!(parse_line("delete-row 0").is_err());
        assert!(parse_line("delete-col 7").is_err());
    }

    #[test]
    fn test_files_and_console() {
        assert_eq!(msg("save"), Msg::App(AppMsg::SaveFile(None)));
        assert_eq!(
            msg("save out.tsv"),
            Msg::App(AppMsg::SaveFile(Some(PathBuf::from("out.tsv"))))
        );
        assert!(parse_line("open").is_err());
        assert_eq!(
            msg("run sort A | head 2"),
            Msg::run_transform("sort A | head 2")
        );
    }

    #[test]
    fn test_resize_and_unknown() {
        assert_eq!(
            msg("resize 5 3"),
            Msg::App(AppMsg::Resize { rows: 5, cols: 3 })
        );
        assert!(parse_line("resize 5").is_err());
        assert!(parse_line("explode").is_err());
        assert_eq!(parse_line("help"), Ok(Input::Help));
    }
}
