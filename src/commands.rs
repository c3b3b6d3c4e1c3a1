//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::table::{Delimiter, TableModel};

// ============================================================================
// Damage Tracking
// ============================================================================

/// Areas of the printed screen that need to be redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageArea {
    /// Column headers, row labels and cells
    Grid,
    /// Selection, file name and the last status message
    StatusBar,
    /// Text produced by the transform console
    Console,
}

/// What a batch of commands needs redrawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Damage {
    /// Redraw everything
    Full,
    /// Redraw only these areas (empty = nothing)
    Areas(Vec<DamageArea>),
}

impl Damage {
    /// Combine with another damage, widening to Full when either is Full
    pub fn merge(&mut self, other: Damage) {
        match (&mut *self, other) {
            (Damage::Full, _) => {}
            (_, Damage::Full) => *self = Damage::Full,
            (Damage::Areas(areas), Damage::Areas(more)) => {
                for area in more {
                    if !areas.contains(&area) {
                        areas.push(area);
                    }
                }
            }
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Damage::Full)
    }

    /// Check if a specific area needs redrawing
    pub fn includes(&self, area: DamageArea) -> bool {
        match self {
            Damage::Full => true,
            Damage::Areas(areas) => areas.contains(&area),
        }
    }

    /// Check if any redraw is needed
    pub fn needs_redraw(&self) -> bool {
        match self {
            Damage::Full => true,
            Damage::Areas(areas) => !areas.is_empty(),
        }
    }
}

// ============================================================================
// Side-Effect Commands (returned from update)
// ============================================================================

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a full redraw
    Redraw,
    /// Request a partial redraw of specific areas
    RedrawAreas(Vec<DamageArea>),
    /// Export a snapshot of the table
    SaveFile {
        path: PathBuf,
        table: TableModel,
        delimiter: Delimiter,
    },
    /// Import a file; the delimiter is sniffed when not given
    LoadFile {
        path: PathBuf,
        delimiter: Option<Delimiter>,
    },
    /// Run a pipeline against a snapshot of the table
    RunTransform { source: String, table: TableModel },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Request application exit
    Quit,
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Get the damage for this command
    ///
    /// Side effects report their own damage through the message they send
    /// back when done, so they cause none here.
    pub fn damage(&self) -> Damage {
        match self {
            Cmd::Redraw => Damage::Full,
            Cmd::RedrawAreas(areas) => Damage::Areas(areas.clone()),
            Cmd::Batch(cmds) => {
                let mut damage = Damage::Areas(vec![]);
                for cmd in cmds {
                    damage.merge(cmd.damage());
                    if damage.is_full() {
                        break;
                    }
                }
                damage
            }
            Cmd::None
            | Cmd::SaveFile { .. }
            | Cmd::LoadFile { .. }
            | Cmd::RunTransform { .. }
            | Cmd::Quit => Damage::Areas(vec![]),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        self.damage().needs_redraw()
    }

    /// Check if this command (or any in a batch) asks to quit
    pub fn is_quit(&self) -> bool {
        match self {
            Cmd::Quit => true,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_quit),
            _ => false,
        }
    }

    /// Redraw the grid and the status bar
    pub fn redraw_grid() -> Self {
        Cmd::RedrawAreas(vec![DamageArea::Grid, DamageArea::StatusBar])
    }

    /// Redraw just the status bar
    pub fn redraw_status_bar() -> Self {
        Cmd::RedrawAreas(vec![DamageArea::StatusBar])
    }

    /// Redraw the console output and the status bar
    pub fn redraw_console() -> Self {
        Cmd::RedrawAreas(vec![DamageArea::Console, DamageArea::StatusBar])
    }
}
