//! Chart-ready series derived from a profiled sheet.
//!
//! Exactly one series is produced, chosen by a deterministic first-match scan
//! over the profiles:
//!
//! - no numeric column: empty series
//! - a date column and a numeric column: time series pairing the first of each,
//!   one point per row with a non-zero number, capped at 50 points
//! - a categorical column and a numeric column: per-category mean of the first
//!   numeric column, grouped by the first categorical column, capped at 20
//!   groups in first-seen order
//! - otherwise: empty series; no index-based series is synthesized

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::profiler::{ColumnProfile, ColumnType};
use crate::config::{AnalysisConfig, DEFAULT_MAX_CATEGORY_GROUPS, DEFAULT_MAX_TIME_SERIES_POINTS};
use crate::grid::{cell_at, CellValue, Row};

/// One plotted unit of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPoint {
    /// A time-keyed point carrying the raw date cell.
    TimeSeries { date: CellValue, value: f64 },
    /// A category aggregate: mean value and number of rows in the group.
    Category {
        category: String,
        value: f64,
        count: usize,
    },
}

impl ChartPoint {
    /// The plotted value.
    pub fn value(&self) -> f64 {
        match self {
            ChartPoint::TimeSeries { value, .. } | ChartPoint::Category { value, .. } => *value,
        }
    }
}

/// Builds chart series with bounded size.
#[derive(Debug, Clone)]
pub struct ChartBuilder {
    max_time_series_points: usize,
    max_category_groups: usize,
}

impl ChartBuilder {
    /// Create a builder with the default caps (50 points, 20 groups)
    pub fn new() -> Self {
        Self {
            max_time_series_points: DEFAULT_MAX_TIME_SERIES_POINTS,
            max_category_groups: DEFAULT_MAX_CATEGORY_GROUPS,
        }
    }

    /// Create a builder using the caps of an analysis configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new()
            .max_time_series_points(config.max_time_series_points)
            .max_category_groups(config.max_category_groups)
    }

    /// Set the cap on time-series points
    pub fn max_time_series_points(mut self, max: usize) -> Self {
        self.max_time_series_points = max;
        self
    }

    /// Set the cap on categorical groups
    pub fn max_category_groups(mut self, max: usize) -> Self {
        self.max_category_groups = max;
        self
    }

    /// Builds the series for a profiled sheet.
    #[instrument(skip_all, fields(columns = profiles.len(), rows = rows.len()))]
    pub fn build(&self, profiles: &[ColumnProfile], rows: &[Row]) -> Vec<ChartPoint> {
        let Some(numeric) = first_of(profiles, ColumnType::Numeric) else {
            debug!("No numeric column to chart");
            return Vec::new();
        };

        let points = if let Some(date) = first_of(profiles, ColumnType::Date) {
            self.time_series(rows, date, numeric)
        } else if let Some(category) = first_of(profiles, ColumnType::Categorical) {
            self.category_means(rows, category, numeric)
        } else {
            debug!("No date or categorical column to pair with numeric data");
            Vec::new()
        };

        debug!(points = points.len(), "Built chart series");
        points
    }

    fn time_series(&self, rows: &[Row], date: usize, numeric: usize) -> Vec<ChartPoint> {
        rows.iter()
            .filter_map(|row| {
                let value = cell_at(row, numeric).as_number().filter(|v| *v != 0.0)?;
                Some(ChartPoint::TimeSeries {
                    date: cell_at(row, date).clone(),
                    value,
                })
            })
            .take(self.max_time_series_points)
            .collect()
    }

    fn category_means(&self, rows: &[Row], category: usize, numeric: usize) -> Vec<ChartPoint> {
        struct Group {
            sum: f64,
            valid: usize,
            rows: usize,
        }

        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Group> = HashMap::new();
        for row in rows {
            let cell = cell_at(row, category);
            if cell.is_empty() {
                continue;
            }
            let key = cell.render();
            let group = groups.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Group {
                    sum: 0.0,
                    valid: 0,
                    rows: 0,
                }
            });
            group.rows += 1;
            if let Some(value) = cell_at(row, numeric).as_number() {
                group.sum += value;
                group.valid += 1;
            }
        }

        order
            .into_iter()
            .take(self.max_category_groups)
            .filter_map(|key| {
                let group = groups.remove(&key)?;
                let value = if group.valid == 0 {
                    0.0
                } else {
                    group.sum / group.valid as f64
                };
                Some(ChartPoint::Category {
                    category: key,
                    value,
                    count: group.rows,
                })
            })
            .collect()
    }
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn first_of(profiles: &[ColumnProfile], column_type: ColumnType) -> Option<usize> {
    profiles
        .iter()
        .position(|profile| profile.column_type == column_type)
}

/// Builds a chart series with the default caps.
pub fn prepare_chart_data(profiles: &[ColumnProfile], rows: &[Row]) -> Vec<ChartPoint> {
    ChartBuilder::new().build(profiles, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::profiler::ColumnProfiler;
    use crate::test_fixtures::{categorical_sales, daily_visits, grid_from_json};

    fn chart(grid: &crate::grid::Grid) -> Vec<ChartPoint> {
        let profiles = ColumnProfiler::new().profile(grid.headers(), grid.rows());
        prepare_chart_data(&profiles, grid.rows())
    }

    #[test]
    fn test_no_numeric_column() {
        let grid = grid_from_json(r#"[["d", "c"], ["2024-01-01", "a"], ["2024-01-02", "a"]]"#);
        assert!(chart(&grid).is_empty());
    }

    #[test]
    fn test_numeric_without_partner() {
        let grid = grid_from_json(r#"[["n", "note"], [1, "alpha"], [2, "beta"], [3, "gamma"]]"#);
        assert!(chart(&grid).is_empty());
    }

    #[test]
    fn test_time_series_pairs_first_columns() {
        let grid = grid_from_json(
            r#"[["day", "visits", "other_day"],
                ["2024-01-01", 5, "2023-01-01"], ["2024-01-02", 0, "2023-01-02"],
                ["2024-01-03", "n/a", "2023-01-03"], ["2024-01-04", "7", "2023-01-04"],
                ["2024-01-05", 9, "2023-01-05"]]"#,
        );
        let points = chart(&grid);

        assert_eq!(
            points,
            vec![
                ChartPoint::TimeSeries {
                    date: CellValue::from("2024-01-01"),
                    value: 5.0
                },
                ChartPoint::TimeSeries {
                    date: CellValue::from("2024-01-04"),
                    value: 7.0
                },
                ChartPoint::TimeSeries {
                    date: CellValue::from("2024-01-05"),
                    value: 9.0
                },
            ]
        );
    }

    #[test]
    fn test_time_series_cap() {
        let grid = daily_visits(120);
        let points = chart(&grid);
        assert_eq!(points.len(), 50);
        assert_eq!(points[0].value(), 1.0);
        assert_eq!(points[49].value(), 50.0);
    }

    #[test]
    fn test_category_means() {
        let grid = grid_from_json(
            r#"[["dept", "cost"],
                ["er", 10], ["icu", 40], ["er", 20], ["icu", "x"], ["er", 30],
                ["icu", 60], ["er", null], [null, 5]]"#,
        );
        let points = chart(&grid);

        assert_eq!(
            points,
            vec![
                ChartPoint::Category {
                    category: "er".to_string(),
                    value: 20.0,
                    count: 4
                },
                ChartPoint::Category {
                    category: "icu".to_string(),
                    value: 50.0,
                    count: 3
                },
            ]
        );
    }

    #[test]
    fn test_category_cap() {
        let grid = categorical_sales(19, 200);
        let builder = ChartBuilder::new().max_category_groups(5);
        let profiles = ColumnProfiler::new().profile(grid.headers(), grid.rows());
        let points = builder.build(&profiles, grid.rows());

        assert_eq!(points.len(), 5);
        match &points[0] {
            ChartPoint::Category { category, .. } => assert_eq!(category, "region-0"),
            other => panic!("expected a category point, got {other:?}"),
        }
    }

    #[test]
    fn test_date_takes_priority_over_category() {
        let grid = grid_from_json(
            r#"[["dept", "day", "n"],
                ["a", "2024-01-01", 1], ["a", "2024-01-02", 2], ["b", "2024-01-03", 3],
                ["a", "2024-01-04", 4], ["b", "2024-01-05", 5], ["a", "2024-01-06", 6]]"#,
        );
        let points = chart(&grid);
        assert_eq!(points.len(), 6);
        assert!(matches!(points[0], ChartPoint::TimeSeries { .. }));
    }

    #[test]
    fn test_chart_point_serialization() {
        let ts = ChartPoint::TimeSeries {
            date: CellValue::from("2024-01-01"),
            value: 2.0,
        };
        assert_eq!(
            serde_json::to_value(&ts).unwrap(),
            serde_json::json!({ "date": "2024-01-01", "value": 2.0 })
        );

        let cat = ChartPoint::Category {
            category: "er".to_string(),
            value: 1.5,
            count: 2,
        };
        assert_eq!(
            serde_json::to_value(&cat).unwrap(),
            serde_json::json!({ "category": "er", "value": 1.5, "count": 2 })
        );
    }
}
