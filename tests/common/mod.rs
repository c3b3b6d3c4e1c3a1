//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use whisk::config::EditorConfig;
use whisk::model::{AppModel, DocumentInfo};
use whisk::table::TableModel;

/// Config with a small blank table, so tests don't build 1000x26 grids
pub fn small_config(rows: usize, cols: usize) -> EditorConfig {
    EditorConfig {
        blank_rows: rows,
        blank_columns: cols,
        ..EditorConfig::default()
    }
}

/// Build a table from string literals
pub fn table(rows: &[&[&str]]) -> TableModel {
    TableModel::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

/// Create a model around the given cells
pub fn test_model(rows: &[&[&str]]) -> AppModel {
    let table = table(rows);
    AppModel::with_table(
        small_config(table.row_count(), table.column_count()),
        table,
        DocumentInfo::default(),
        "test",
    )
}

/// Create a model with a blank `rows` x `cols` table
pub fn blank_model(rows: usize, cols: usize) -> AppModel {
    AppModel::new(small_config(rows, cols))
}

/// Table contents as owned rows, for comparisons
pub fn cells(model: &AppModel) -> Vec<Vec<String>> {
    model.table.rows().to_vec()
}

/// The grid shows exactly what the table holds and is ready for user edits
pub fn assert_in_sync(model: &AppModel) {
    assert_eq!(
        model.view.rows(),
        model.table.rows(),
        "grid and table disagree"
    );
    assert_eq!(model.view.column_count(), model.table.column_count());
    assert_eq!(
        model.view.column_labels().len(),
        model.table.column_count()
    );
    assert!(!model.view.signals_blocked(), "render guard left active");
    assert!(!model.view.has_pending_changes());
}
