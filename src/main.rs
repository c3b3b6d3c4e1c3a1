//! whisk - a line-driven CSV editor
//!
//! Reads one action per line from stdin and prints the affected parts of the
//! grid after each one. Run `help` for the list of actions.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use whisk::cli::{CliArgs, StartupMode};
use whisk::config::EditorConfig;
use whisk::messages::{AppMsg, GridMsg, Msg};
use whisk::model::AppModel;
use whisk::runtime::App;

fn main() -> Result<()> {
    whisk::tracing::init();

    let startup = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;
    let config = EditorConfig::load();

    let mut app = App::new(AppModel::new(config));
    if let Some(delimiter) = startup.delimiter {
        app.model.document.delimiter = delimiter;
    }
    if let StartupMode::File(path) = &startup.mode {
        app.dispatch(Msg::App(AppMsg::LoadFile {
            path: path.clone(),
            delimiter: startup.delimiter,
        }));
        if app.model.document.file_path.is_none() {
            bail!("{}", app.model.ui.status_message);
        }
    }
    if let Some((row, col)) = startup.initial_cell {
        app.dispatch(Msg::Grid(GridMsg::SelectCell { row, col }));
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut input = stdin.lock();
    let mut stdout = io::stdout().lock();

    write!(stdout, "{}", app.render_all())?;
    let mut line = String::new();
    while !app.should_quit() {
        if interactive {
            write!(stdout, "whisk> ")?;
            stdout.flush()?;
        }
        line.clear();
        if input.read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }
        write!(stdout, "{}", app.handle_line(&line))?;
        stdout.flush()?;
    }

    if app.model.document.is_modified {
        tracing::info!("Exiting with unsaved changes");
    }
    Ok(())
}
