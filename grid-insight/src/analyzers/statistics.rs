//! Descriptive statistics and outlier flagging for numeric columns.
//!
//! Only columns the profiler classified as numeric are summarized. Cells that
//! do not coerce to a number are dropped, and a column left with no numbers is
//! skipped entirely. Outliers are values more than three population standard
//! deviations away from the mean.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::profiler::ColumnProfile;
use crate::grid::{cell_at, Row};

/// Distance from the mean, in population standard deviations, beyond which a
/// value is an outlier.
pub const OUTLIER_STD_DEVS: f64 = 3.0;

/// Descriptive statistics over a set of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Values strictly further than `3 × std_dev` from the mean, in input order
    pub outliers: Vec<f64>,
}

impl NumericSummary {
    /// Number of flagged outliers.
    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }

    /// True when at least one value was flagged.
    pub fn has_outliers(&self) -> bool {
        !self.outliers.is_empty()
    }
}

/// Summary for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub column: String,
    pub summary: NumericSummary,
}

/// Computes [`NumericSummary`] values for numeric columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Summarizes a set of numbers. Returns `None` for an empty slice.
    pub fn summarize(&self, values: &[f64]) -> Option<NumericSummary> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        let std_dev = variance.sqrt();

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let threshold = OUTLIER_STD_DEVS * std_dev;
        let outliers = values
            .iter()
            .copied()
            .filter(|v| (v - mean).abs() > threshold)
            .collect();

        Some(NumericSummary {
            count,
            mean,
            median,
            min: sorted[0],
            max: sorted[count - 1],
            std_dev,
            outliers,
        })
    }

    /// Summarizes every numeric column with at least one valid number.
    ///
    /// Output follows profile order.
    #[instrument(skip_all, fields(columns = profiles.len(), rows = rows.len()))]
    pub fn analyze(&self, profiles: &[ColumnProfile], rows: &[Row]) -> Vec<ColumnStatistics> {
        profiles
            .iter()
            .enumerate()
            .filter(|(_, profile)| profile.is_numeric())
            .filter_map(|(idx, profile)| {
                let values = numeric_values(rows, idx);
                let summary = self.summarize(&values);
                if summary.is_none() {
                    debug!(column = %profile.name, "Skipping numeric column without valid numbers");
                }
                summary.map(|summary| ColumnStatistics {
                    column: profile.name.clone(),
                    summary,
                })
            })
            .collect()
    }
}

/// Coerced numbers of one column, in row order, dropping non-numeric cells.
pub fn numeric_values(rows: &[Row], column: usize) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| cell_at(row, column).as_number())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::profiler::ColumnProfiler;
    use crate::test_fixtures::grid_from_json;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_summarize_basic() {
        let summary = StatisticalAnalyzer::new()
            .summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
            .unwrap();

        assert_eq!(summary.count, 8);
        assert!(approx_eq(summary.mean, 5.0));
        assert!(approx_eq(summary.median, 4.5));
        assert!(approx_eq(summary.std_dev, 2.0));
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert!(!summary.has_outliers());
    }

    #[test]
    fn test_summarize_odd_median_unsorted_input() {
        let summary = StatisticalAnalyzer::new()
            .summarize(&[9.0, 1.0, 5.0])
            .unwrap();
        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 9.0);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(StatisticalAnalyzer::new().summarize(&[]).is_none());
    }

    #[test]
    fn test_constant_values_have_no_outliers() {
        let summary = StatisticalAnalyzer::new()
            .summarize(&[3.0, 3.0, 3.0])
            .unwrap();
        assert_eq!(summary.std_dev, 0.0);
        assert!(!summary.has_outliers());
    }

    #[test]
    fn test_outlier_detection() {
        let mut values = vec![10.0; 30];
        values.push(1000.0);
        let summary = StatisticalAnalyzer::new().summarize(&values).unwrap();

        assert_eq!(summary.outliers, vec![1000.0]);
        assert_eq!(summary.outlier_count(), 1);
    }

    #[test]
    fn test_small_samples_cannot_exceed_three_sigma() {
        // with five values the largest possible z-score is 4 / sqrt(5) ≈ 1.79
        let summary = StatisticalAnalyzer::new()
            .summarize(&[10.0, 10.0, 10.0, 10.0, 1000.0])
            .unwrap();
        assert!(approx_eq(summary.mean, 208.0));
        assert!(approx_eq(summary.std_dev, 396.0));
        assert!(!summary.has_outliers());
    }

    #[test]
    fn test_analyze_numeric_columns_only() {
        let grid = grid_from_json(
            r#"[["amount", "label", "blank"],
                [1, "a", null], ["2", "b", null], [3, "a", null], ["x", "b", null], [4, "a", null]]"#,
        );
        let profiles = ColumnProfiler::new().profile(grid.headers(), grid.rows());
        let stats = StatisticalAnalyzer::new().analyze(&profiles, grid.rows());

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].column, "amount");
        assert_eq!(stats[0].summary.count, 4);
        assert!(approx_eq(stats[0].summary.mean, 2.5));
    }

    #[test]
    fn test_numeric_values_drops_non_numbers() {
        let grid = grid_from_json(r#"[["v"], [1], ["2.5"], [true], [""], ["n/a"], []]"#);
        assert_eq!(numeric_values(grid.rows(), 0), vec![1.0, 2.5]);
    }
}
