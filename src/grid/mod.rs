//! Grid view and its synchronization with the table
//!
//! ```text
//! GridView
//! ├── cells / column labels (display only)
//! ├── selected_cell + GridViewport
//! ├── editing: Option<CellEditState>
//! └── pending CellChanged notifications (blocked under RenderGuard)
//! ```

mod navigation;
pub mod sync;
mod view;
mod viewport;

pub use sync::{commit_user_edits, render_cell, render_full, SyncedGrid};
pub use view::{CellChanged, CellEditState, CellPosition, GridView, RenderGuard};
pub use viewport::GridViewport;
