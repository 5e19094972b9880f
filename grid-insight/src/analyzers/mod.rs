//! Analyzers that turn a raw grid into typed knowledge.
//!
//! ## Available Analyzers
//!
//! - **Column Profiler** (`profiler`): ratio-based semantic type detection and
//!   cardinality counts per column
//! - **Statistical Analyzer** (`statistics`): mean, median, spread and 3σ
//!   outliers for numeric columns
//! - **Healthcare Metrics** (`healthcare`): patient volume, wait time and peak
//!   hour inferred from column names and types
//! - **Insight Engine** (`insights`): rule-based findings assembled from the
//!   outputs above
//!
//! Profiles feed every other analyzer; nothing here mutates its inputs.
//!
//! ## Example Usage
//!
//! ```rust
//! use grid_insight::analyzers::{ColumnProfiler, ColumnType, InsightEngine, StatisticalAnalyzer};
//! use grid_insight::grid::Grid;
//!
//! let grid = Grid::from_json_str(
//!     r#"[["ward", "beds"], ["north", 12], ["south", 9], ["north", 14], ["north", 11], ["south", 10]]"#,
//! ).unwrap();
//!
//! let profiles = ColumnProfiler::new().profile(grid.headers(), grid.rows());
//! assert_eq!(profiles[0].column_type, ColumnType::Categorical);
//!
//! let stats = StatisticalAnalyzer::new().analyze(&profiles, grid.rows());
//! assert_eq!(stats[0].summary.max, 14.0);
//!
//! let insights = InsightEngine::new().generate(&profiles, grid.rows(), "Wards");
//! assert!(!insights.is_empty());
//! ```

pub mod healthcare;
pub mod insights;
pub mod profiler;
pub mod statistics;

pub use healthcare::{HealthcareMetricExtractor, HealthcareMetrics};
pub use insights::{
    Insight, InsightContext, InsightEngine, InsightKind, InsightRule, InsightValue,
    MissingDataRule, OutlierRule, Severity, SummaryRule,
};
pub use profiler::{ColumnProfile, ColumnProfiler, ColumnProfilerBuilder, ColumnType, TypeStats};
pub use statistics::{ColumnStatistics, NumericSummary, StatisticalAnalyzer};
