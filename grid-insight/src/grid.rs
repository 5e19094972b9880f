//! In-memory grid model for decoded spreadsheet sheets.
//!
//! A spreadsheet decoder hands over a sheet as rows of heterogeneous scalars.
//! [`CellValue`] reifies those scalars as a tagged union, and [`Grid`] splits
//! the first row off as headers. Every numeric coercion in the crate goes
//! through [`CellValue::as_number`] so downstream components never re-guess
//! cell types.
//!
//! # Example
//!
//! ```rust
//! use grid_insight::grid::{CellValue, Grid};
//!
//! let grid = Grid::from_json_str(r#"[["name", "age"], ["Ada", 36], ["Linus", null]]"#).unwrap();
//!
//! assert_eq!(grid.headers(), &["name".to_string(), "age".to_string()]);
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.cell(1, 1), &CellValue::Empty);
//! assert_eq!(grid.cell(0, 1).as_number(), Some(36.0));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{InsightError, Result};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    /// A missing or null cell.
    #[default]
    Empty,
    /// A boolean cell.
    Boolean(bool),
    /// A numeric cell.
    Number(f64),
    /// A string cell, possibly holding a number, date or time in text form.
    Text(String),
}

/// A data row. Rows may be shorter than the header row.
pub type Row = Vec<CellValue>;

impl CellValue {
    /// Returns true for null cells and empty strings.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Coerces the cell to a finite number.
    ///
    /// Numbers pass through, text is parsed after trimming, booleans and empty
    /// cells never coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Renders the cell the way it appears in a sheet.
    ///
    /// Integral numbers render without a fractional part, so `3.0` renders as
    /// `"3"`. Empty cells render as the empty string.
    pub fn render(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Number(n) => render_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Value-equality key used for cardinality counting.
    pub fn key(&self) -> ValueKey {
        match self {
            CellValue::Empty => ValueKey::Empty,
            CellValue::Boolean(b) => ValueKey::Boolean(*b),
            // -0.0 and 0.0 are the same value
            CellValue::Number(n) if *n == 0.0 => ValueKey::Number(0.0f64.to_bits()),
            CellValue::Number(n) => ValueKey::Number(n.to_bits()),
            CellValue::Text(s) => ValueKey::Text(s.clone()),
        }
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// Hashable identity of a cell value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Empty,
    Boolean(bool),
    Number(u64),
    Text(String),
}

/// A decoded sheet: one header row followed by data rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Grid {
    /// Builds a grid whose first row holds the headers.
    ///
    /// Blank header cells are labelled `Column N` (1-based) so every column
    /// stays addressable by name.
    pub fn from_rows(mut rows: Vec<Row>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let header_row = rows.remove(0);
        let headers = header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let label = cell.render();
                if label.trim().is_empty() {
                    format!("Column {}", idx + 1)
                } else {
                    label
                }
            })
            .collect();

        Self { headers, rows }
    }

    /// Builds a grid from explicit headers and data rows.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Parses a grid from a JSON array of arrays of scalars.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Converts a JSON value into a grid, rejecting anything that is not an
    /// array of arrays of scalars.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
        let raw_rows = value
            .as_array()
            .ok_or_else(|| InsightError::invalid_grid("expected an array of rows"))?;

        let mut rows = Vec::with_capacity(raw_rows.len());
        for (row_idx, raw_row) in raw_rows.iter().enumerate() {
            let raw_cells = raw_row.as_array().ok_or_else(|| {
                InsightError::invalid_grid(format!("row {row_idx} is not an array"))
            })?;
            let row = raw_cells
                .iter()
                .enumerate()
                .map(|(col_idx, raw)| json_cell(raw, row_idx, col_idx))
                .collect::<Result<Row>>()?;
            rows.push(row);
        }

        Ok(Self::from_rows(rows))
    }

    /// Header labels in column order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, excluding the header row.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when the grid has neither headers nor rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Returns the cell at a position, treating missing trailing cells as empty.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .map_or(&EMPTY_CELL, |r| cell_at(r, column))
    }

    /// Consumes the grid into its headers and rows.
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.headers, self.rows)
    }
}

/// Returns a cell of a row, treating missing trailing cells as empty.
pub fn cell_at(row: &[CellValue], column: usize) -> &CellValue {
    row.get(column).unwrap_or(&EMPTY_CELL)
}

fn json_cell(raw: &serde_json::Value, row_idx: usize, col_idx: usize) -> Result<CellValue> {
    use serde_json::Value;

    match raw {
        Value::Null => Ok(CellValue::Empty),
        Value::Bool(b) => Ok(CellValue::Boolean(*b)),
        Value::Number(n) => n.as_f64().map(CellValue::Number).ok_or_else(|| {
            InsightError::invalid_grid(format!(
                "cell ({row_idx}, {col_idx}) holds a number outside the f64 range"
            ))
        }),
        Value::String(s) => Ok(CellValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(InsightError::invalid_grid(format!(
            "cell ({row_idx}, {col_idx}) is not a scalar"
        ))),
    }
}
