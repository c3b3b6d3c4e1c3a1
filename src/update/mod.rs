//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod grid;
mod transform;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::messages::{AppMsg, TransformMsg};
#[cfg(debug_assertions)]
use crate::tracing::GridSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use grid::update_grid;
pub use transform::update_transform;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Grid(m) => grid::update_grid(model, m),
        Msg::Transform(m) => transform::update_transform(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures grid state before and after, logs the diff and checks that the
/// grid still mirrors the table.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = GridSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = GridSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }

    debug_assert!(
        model.view.rows() == model.table.rows()
            && model.view.column_count() == model.table.column_count(),
        "grid out of sync with table after {}",
        msg_name
    );
    debug_assert!(
        !model.view.signals_blocked(),
        "render guard still alive after {}",
        msg_name
    );

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Grid::Move(Up)`
/// - `Transform::Run("sort A")`
/// - `App::Resize { rows: 20, cols: 8 }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Grid(m) => format!("Grid::{:?}", m),
        Msg::Transform(TransformMsg::Completed { source, .. }) => {
            format!("Transform::Completed({:?})", source)
        }
        Msg::Transform(m) => format!("Transform::{:?}", m),
        Msg::App(AppMsg::FileLoaded { path, result }) => format!(
            "App::FileLoaded({}, {})",
            path.display(),
            if result.is_ok() { "ok" } else { "error" }
        ),
        Msg::App(AppMsg::SaveCompleted { path, .. }) => {
            format!("App::SaveCompleted({})", path.display())
        }
        Msg::App(m) => format!("App::{:?}", m),
    }
}
