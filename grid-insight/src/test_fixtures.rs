//! Common grids for analysis scenarios.
//!
//! Fixtures are built in memory so tests can state the exact shape they need.

use crate::grid::{CellValue, Grid, Row};

/// Parses a JSON array of arrays into a grid. Panics on malformed fixtures.
pub fn grid_from_json(json: &str) -> Grid {
    Grid::from_json_str(json).expect("fixture grid must be a JSON array of arrays")
}

/// Headers and rows for a single named column.
pub fn single_column(name: &str, values: Vec<CellValue>) -> (Vec<String>, Vec<Row>) {
    let rows = values.into_iter().map(|value| vec![value]).collect();
    (vec![name.to_string()], rows)
}

/// One numeric column: `n` copies of `base` followed by a single `outlier`.
pub fn numeric_column_with_outlier(name: &str, n: usize, base: f64, outlier: f64) -> Grid {
    let mut rows: Vec<Row> = (0..n).map(|_| vec![CellValue::Number(base)]).collect();
    rows.push(vec![CellValue::Number(outlier)]);
    Grid::new(vec![name.to_string()], rows)
}

/// `days` rows of `date, visits` with visits counting up from 1.
///
/// Dates stay in `YYYY-MM-DD` form for any length by rolling over every 28 days.
pub fn daily_visits(days: usize) -> Grid {
    let rows = (0..days)
        .map(|i| {
            vec![
                CellValue::from(format!("2024-{:02}-{:02}", i / 28 + 1, i % 28 + 1)),
                CellValue::from((i + 1) as f64),
            ]
        })
        .collect();
    Grid::new(vec!["date".to_string(), "visits".to_string()], rows)
}

/// `rows` rows of `region, sales` cycling through `groups` regions.
pub fn categorical_sales(groups: usize, rows: usize) -> Grid {
    let data = (0..rows)
        .map(|i| {
            vec![
                CellValue::from(format!("region-{}", i % groups)),
                CellValue::from((i % 97) as f64 + 1.0),
            ]
        })
        .collect();
    Grid::new(vec!["region".to_string(), "sales".to_string()], data)
}

/// A small clinic visit log.
///
/// Columns: `patient` (text), `department` (categorical), `wait_minutes`
/// (numeric, one blank), `arrival_time` (time), `visit_date` (date) and
/// `follow_up` (boolean).
pub fn patient_visits() -> Grid {
    grid_from_json(
        r#"[
            ["patient", "department", "wait_minutes", "arrival_time", "visit_date", "follow_up"],
            ["P-001", "Cardiology", 12, "08:15", "2024-03-01", "yes"],
            ["P-002", "Radiology", 25, "08:40", "2024-03-01", "no"],
            ["P-003", "Emergency", 5, "09:05", "2024-03-01", "no"],
            ["P-004", "Cardiology", 40, "09:20", "2024-03-02", "yes"],
            ["P-005", "Emergency", 8, "09:45", "2024-03-02", "no"],
            ["P-006", "Radiology", null, "10:10", "2024-03-02", "yes"],
            ["P-007", "Cardiology", 18, "10:30", "2024-03-03", "no"],
            ["P-008", "Emergency", 3, "13:00", "2024-03-03", "no"],
            ["P-009", "Radiology", 22, "13:25", "2024-03-03", "yes"],
            ["P-010", "Cardiology", 30, "14:50", "2024-03-04", "no"]
        ]"#,
    )
}
