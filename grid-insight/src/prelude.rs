//! Prelude for commonly used types and traits in grid-insight.

pub use crate::analysis::{analyze, prepare_chart_data, search, Analyzer, DatasetAnalysis};
pub use crate::analyzers::{
    ColumnProfile, ColumnType, HealthcareMetrics, Insight, InsightKind, InsightRule, Severity,
};
pub use crate::chart::ChartPoint;
pub use crate::config::AnalysisConfig;
pub use crate::error::{InsightError, Result};
pub use crate::formatters::{AnalysisFormatter, FormatterConfig};
pub use crate::grid::{CellValue, Grid, Row};
pub use crate::logging::LogConfig;
