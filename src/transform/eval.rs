//! Pipeline evaluation over a table snapshot

use std::cmp::Ordering;
use std::collections::HashSet;

use super::{CompareOp, Stage, TextOp, TransformError, TransformOutcome};
use crate::table::{column_label, TableModel};

/// Working copy of the table. Width survives even when every row is filtered away.
#[derive(Debug, Clone)]
struct Frame {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Frame {
    fn from_table(table: &TableModel) -> Self {
        Self {
            rows: table.rows().to_vec(),
            width: table.column_count(),
        }
    }

    fn check_column(&self, column: usize) -> Result<(), TransformError> {
        if column < self.width {
            Ok(())
        } else {
            Err(TransformError::new(format!(
                "column {} is out of range (table has {} columns)",
                column_label(column + 1),
                self.width
            )))
        }
    }

    fn project(&mut self, columns: &[usize]) {
        self.rows = self
            .rows
            .iter()
            .map(|row| columns.iter().map(|&c| row[c].clone()).collect())
            .collect();
        self.width = columns.len();
    }

    fn into_table(self) -> TableModel {
        if !self.rows.is_empty() {
            return TableModel::from_rows(self.rows);
        }
        let mut table = TableModel::new();
        for at in 0..self.width {
            table.insert_column(at);
        }
        table
    }
}

fn apply_text_op(op: TextOp, value: &str) -> String {
    match op {
        TextOp::Upper => value.to_uppercase(),
        TextOp::Lower => value.to_lowercase(),
        TextOp::Trim => value.trim().to_string(),
        TextOp::Title => title_case(value),
    }
}

fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphanumeric() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Numbers sort before text; numbers compare by value, text by code point
fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn matches_filter(cell: &str, op: CompareOp, value: &str) -> bool {
    let ordering = || match (parse_number(cell), parse_number(value)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => cell.cmp(value),
    };
    match op {
        CompareOp::Contains => cell.contains(value),
        CompareOp::Eq => ordering() == Ordering::Equal,
        CompareOp::Ne => ordering() != Ordering::Equal,
        CompareOp::Lt => ordering() == Ordering::Less,
        CompareOp::Le => ordering() != Ordering::Greater,
        CompareOp::Gt => ordering() == Ordering::Greater,
        CompareOp::Ge => ordering() != Ordering::Less,
    }
}

fn format_number(value: f64) -> String {
    format!("{}", value)
}

fn numeric_column(frame: &Frame, column: usize) -> Result<Vec<f64>, TransformError> {
    frame.check_column(column)?;
    let mut values = Vec::new();
    for (r, row) in frame.rows.iter().enumerate() {
        let cell = row[column].trim();
        if cell.is_empty() {
            continue;
        }
        match parse_number(cell) {
            Some(n) => values.push(n),
            None => {
                return Err(TransformError::new(format!(
                    "'{}' in {}{} is not a number",
                    cell,
                    column_label(column + 1),
                    r + 1
                )))
            }
        }
    }
    Ok(values)
}

enum StepResult {
    Continue(Frame),
    Text(String),
}

fn apply_stage(stage: &Stage, mut frame: Frame) -> Result<StepResult, TransformError> {
    match stage {
        Stage::Map { op, column } => {
            if let Some(column) = *column {
                frame.check_column(column)?;
            }
            for row in &mut frame.rows {
                for (c, cell) in row.iter_mut().enumerate() {
                    if column.map_or(true, |target| target == c) {
                        *cell = apply_text_op(*op, cell);
                    }
                }
            }
        }
        Stage::Sort { column, descending } => {
            frame.check_column(*column)?;
            let column = *column;
            frame.rows.sort_by(|a, b| {
                let ordering = compare_cells(&a[column], &b[column]);
                if *descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        Stage::Filter { column, op, value } => {
            frame.check_column(*column)?;
            frame
                .rows
                .retain(|row| matches_filter(&row[*column], *op, value));
        }
        Stage::Select(columns) => {
            for &c in columns {
                frame.check_column(c)?;
            }
            frame.project(columns);
        }
        Stage::Drop(columns) => {
            for &c in columns {
                frame.check_column(c)?;
            }
            let keep: Vec<usize> = (0..frame.width).filter(|c| !columns.contains(c)).collect();
            frame.project(&keep);
        }
        Stage::Head(n) => frame.rows.truncate(*n),
        Stage::Tail(n) => {
            let skip = frame.rows.len().saturating_sub(*n);
            frame.rows.drain(..skip);
        }
        Stage::Transpose => {
            let height = frame.rows.len();
            let rows = (0..frame.width)
                .map(|c| frame.rows.iter().map(|row| row[c].clone()).collect())
                .collect();
            frame = Frame {
                rows,
                width: height,
            };
        }
        Stage::Dedupe => {
            let mut seen = HashSet::new();
            frame.rows.retain(|row| seen.insert(row.clone()));
        }
        Stage::Fill { column, value } => {
            frame.check_column(*column)?;
            for row in &mut frame.rows {
                if row[*column].trim().is_empty() {
                    row[*column] = value.clone();
                }
            }
        }
        Stage::Count => return Ok(StepResult::Text(frame.rows.len().to_string())),
        Stage::Sum(column) => {
            let total: f64 = numeric_column(&frame, *column)?.iter().sum();
            return Ok(StepResult::Text(format_number(total)));
        }
        Stage::Mean(column) => {
            let values = numeric_column(&frame, *column)?;
            if values.is_empty() {
                return Err(TransformError::new(format!(
                    "mean: column {} has no numbers",
                    column_label(column + 1)
                )));
            }
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            return Ok(StepResult::Text(format_number(mean)));
        }
        Stage::Unique(column) => {
            frame.check_column(*column)?;
            let mut seen = HashSet::new();
            let values: Vec<&str> = frame
                .rows
                .iter()
                .map(|row| row[*column].as_str())
                .filter(|v| seen.insert(*v))
                .collect();
            return Ok(StepResult::Text(values.join("\n")));
        }
    }
    Ok(StepResult::Continue(frame))
}

/// Run parsed stages against a copy of `table`. The input is never modified.
pub fn evaluate(stages: &[Stage], table: &TableModel) -> Result<TransformOutcome, TransformError> {
    let mut frame = Frame::from_table(table);
    for (index, stage) in stages.iter().enumerate() {
        match apply_stage(stage, frame).map_err(|e| e.at_stage(index))? {
            StepResult::Continue(next) => frame = next,
            StepResult::Text(text) => return Ok(TransformOutcome::Text(text)),
        }
    }
    Ok(TransformOutcome::Table(frame.into_table()))
}
