//! Command-line argument parsing for the editor
//!
//! Supports:
//! - Opening a CSV/TSV file
//! - Forcing the delimiter
//! - Starting on a given cell
//! - Blank table mode

use clap::Parser;
use std::path::PathBuf;

use crate::table::{parse_cell_name, Delimiter};

/// A line-driven CSV editor
#[derive(Parser, Debug)]
#[command(name = "whisk", version, about = "A line-driven CSV editor")]
pub struct CliArgs {
    /// CSV file to open
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Field delimiter: ',', ';', '|' or 'tab' (default: from extension or content)
    #[arg(short, long, value_name = "C")]
    pub delimiter: Option<String>,

    /// Start with a blank table even if PATH is given
    #[arg(short, long)]
    pub blank: bool,

    /// Select this cell on startup (e.g. B3)
    #[arg(long, value_name = "CELL")]
    pub cell: Option<String>,
}

/// The startup mode determines what to open
#[derive(Debug, Clone, PartialEq)]
pub enum StartupMode {
    /// Start with a blank table
    Blank,
    /// Import a file
    File(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// What to open
    pub mode: StartupMode,
    /// Delimiter forced on the command line
    pub delimiter: Option<Delimiter>,
    /// Initially selected cell (row, column), 0-indexed
    pub initial_cell: Option<(usize, usize)>,
}

fn parse_delimiter(value: &str) -> Result<Delimiter, String> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Ok(Delimiter::Tab);
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Delimiter::from_char(ch)
            .ok_or_else(|| format!("Unsupported delimiter '{}'", value)),
        _ => Err(format!("Unsupported delimiter '{}'", value)),
    }
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mode = match self.path {
            Some(path) if !self.blank => {
                if path.is_dir() {
                    return Err(format!("{} is a directory", path.display()));
                }
                StartupMode::File(path)
            }
            _ => StartupMode::Blank,
        };

        let delimiter = self.delimiter.as_deref().map(parse_delimiter).transpose()?;

        let initial_cell = match self.cell.as_deref() {
            Some(name) => Some(
                parse_cell_name(name).ok_or_else(|| format!("'{}' is not a cell name", name))?,
            ),
            None => None,
        };

        Ok(StartupConfig {
            mode,
            delimiter,
            initial_cell,
        })
    }
}
