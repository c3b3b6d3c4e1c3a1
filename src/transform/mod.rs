//! Transform console: a small pipeline language over the whole table
//!
//! A pipeline never touches the live table. It runs against a snapshot and
//! either yields a replacement table, a text result, or an error. The caller
//! adopts a replacement wholesale or not at all.
//!
//! ```text
//! filter C contains ann | sort B desc | select A,B | head 10
//! ```

mod eval;
mod parser;

pub use eval::evaluate;
pub use parser::parse;

use crate::table::TableModel;

/// Text transform applied cell by cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    Upper,
    Lower,
    Trim,
    Title,
}

/// Comparison used by `filter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Contains,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Contains => "contains",
        }
    }
}

/// One step of a pipeline. Column indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Map { op: TextOp, column: Option<usize> },
    Sort { column: usize, descending: bool },
    Filter { column: usize, op: CompareOp, value: String },
    Select(Vec<usize>),
    Drop(Vec<usize>),
    Head(usize),
    Tail(usize),
    Transpose,
    Dedupe,
    Fill { column: usize, value: String },
    Count,
    Sum(usize),
    Mean(usize),
    Unique(usize),
}

impl Stage {
    /// Stages that end the pipeline with text instead of a table
    pub fn produces_text(&self) -> bool {
        matches!(
            self,
            Stage::Count | Stage::Sum(_) | Stage::Mean(_) | Stage::Unique(_)
        )
    }
}

/// A parse or evaluation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformError {
    pub message: String,
    /// 0-based index of the failing stage, when known
    pub stage: Option<usize>,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stage: None,
        }
    }

    pub fn at_stage(mut self, stage: usize) -> Self {
        self.stage.get_or_insert(stage);
        self
    }
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            Some(stage) => write!(f, "stage {}: {}", stage + 1, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for TransformError {}

/// Result of running a pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    /// Replace the current table with this one
    Table(TableModel),
    /// Show this text; the table is unchanged
    Text(String),
    /// Show this error; the table is unchanged
    Error(TransformError),
}

/// Parse and evaluate `source` against a snapshot of `table`
pub fn run(source: &str, table: &TableModel) -> TransformOutcome {
    let result = parse(source).and_then(|stages| evaluate(&stages, table));
    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::debug!("Transform failed: {}", e);
            TransformOutcome::Error(e)
        }
    }
}
