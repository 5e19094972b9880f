//! One-call analysis of a sheet.
//!
//! [`Analyzer`] wires the profiler, insight engine and healthcare extractor
//! together and exposes search and chart building with the same configuration.
//! The free functions [`analyze`], [`search`] and [`prepare_chart_data`] use
//! the default configuration.
//!
//! # Example
//!
//! ```rust
//! use grid_insight::analysis::analyze;
//! use grid_insight::grid::Grid;
//!
//! let grid = Grid::from_json_str(
//!     r#"[["patient", "wait"], ["A", 12], ["B", 18], ["C", 30]]"#,
//! ).unwrap();
//! let analysis = analyze(&grid, "Triage");
//!
//! assert_eq!(analysis.total_rows, 3);
//! assert_eq!(analysis.total_columns, 2);
//! assert_eq!(analysis.healthcare_metrics.unwrap().average_wait_time, Some(20.0));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::analyzers::healthcare::{HealthcareMetricExtractor, HealthcareMetrics};
use crate::analyzers::insights::{Insight, InsightEngine};
use crate::analyzers::profiler::{ColumnProfile, ColumnProfiler};
use crate::chart::{ChartBuilder, ChartPoint};
use crate::config::AnalysisConfig;
use crate::grid::{Grid, Row};
use crate::search::SearchMatcher;

pub use crate::chart::prepare_chart_data;
pub use crate::search::search;

/// Result of analyzing one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetAnalysis {
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns: Vec<ColumnProfile>,
    pub insights: Vec<Insight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcare_metrics: Option<HealthcareMetrics>,
}

impl DatasetAnalysis {
    /// The result for a grid without a header row.
    pub fn empty() -> Self {
        Self {
            total_rows: 0,
            total_columns: 0,
            columns: Vec::new(),
            insights: Vec::new(),
            healthcare_metrics: None,
        }
    }

    /// Looks up a column profile by header label.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|profile| profile.name == name)
    }
}

/// Runs analyses with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a validated configuration
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Profiles the grid, generates insights and extracts healthcare metrics.
    ///
    /// A grid with no header row yields [`DatasetAnalysis::empty`]. A header
    /// row with no data still gets profiles and the summary insight.
    #[instrument(skip(self, grid), fields(rows = grid.row_count(), columns = grid.column_count()))]
    pub fn analyze(&self, grid: &Grid, sheet_label: &str) -> DatasetAnalysis {
        if grid.is_empty() {
            info!("Grid has no header row, returning empty analysis");
            return DatasetAnalysis::empty();
        }

        let profiles = ColumnProfiler::from_config(&self.config).profile(grid.headers(), grid.rows());
        let insights = InsightEngine::new()
            .log_config(self.config.log.clone())
            .generate(&profiles, grid.rows(), sheet_label);
        let healthcare_metrics = HealthcareMetricExtractor::new().extract(&profiles, grid.rows());

        info!(
            rows = grid.row_count(),
            columns = profiles.len(),
            insights = insights.len(),
            healthcare = healthcare_metrics.is_some(),
            "Analysis complete"
        );

        DatasetAnalysis {
            total_rows: grid.row_count(),
            total_columns: profiles.len(),
            columns: profiles,
            insights,
            healthcare_metrics,
        }
    }

    /// Filters rows by a whitespace-separated query.
    pub fn search(&self, rows: &[Row], query: &str) -> Vec<Row> {
        SearchMatcher::new(query).filter(rows)
    }

    /// Builds a chart series capped by the configured limits.
    pub fn prepare_chart_data(&self, profiles: &[ColumnProfile], rows: &[Row]) -> Vec<ChartPoint> {
        ChartBuilder::from_config(&self.config).build(profiles, rows)
    }
}

/// Analyzes a grid with the default configuration.
pub fn analyze(grid: &Grid, sheet_label: &str) -> DatasetAnalysis {
    Analyzer::new().analyze(grid, sheet_label)
}
