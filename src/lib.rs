//! whisk - spreadsheet-style CSV editor core
//!
//! The editor follows the Elm Architecture: [`Msg`]s flow through
//! [`update::update`], which mutates the [`AppModel`] and returns a [`Cmd`]
//! describing side effects. The [`runtime`] executes those commands and
//! feeds their results back in as messages.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod history;
pub mod input;
pub mod messages;
pub mod model;
pub mod render;
pub mod runtime;
pub mod table;
pub mod tracing;
pub mod transform;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use table::TableModel;
