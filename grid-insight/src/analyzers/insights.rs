//! Rule-based insight generation over column profiles.
//!
//! The [`InsightEngine`] runs a list of [`InsightRule`]s against an
//! [`InsightContext`] and always closes the list with a dataset summary. The
//! default rule set is:
//!
//! 1. [`MissingDataRule`]: one aggregated alert naming every column with more
//!    than 30% empty cells
//! 2. [`OutlierRule`]: one anomaly per numeric column with 3σ outliers
//!
//! followed by the unconditional [`SummaryRule`]. Generation is deterministic:
//! the same inputs always produce the same insights in the same order.
//!
//! # Example
//!
//! ```rust
//! use grid_insight::analyzers::insights::{InsightEngine, InsightKind};
//! use grid_insight::analyzers::profiler::ColumnProfiler;
//! use grid_insight::grid::Grid;
//!
//! let grid = Grid::from_json_str(r#"[["a", "b"], [1, null], [2, null], [3, "x"]]"#).unwrap();
//! let profiles = ColumnProfiler::new().profile(grid.headers(), grid.rows());
//! let insights = InsightEngine::new().generate(&profiles, grid.rows(), "Sheet1");
//!
//! assert_eq!(insights[0].kind, InsightKind::Alert);
//! assert_eq!(insights.last().unwrap().kind, InsightKind::Summary);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::profiler::ColumnProfile;
use crate::analyzers::statistics::{ColumnStatistics, StatisticalAnalyzer};
use crate::grid::Row;
use crate::log_rule;
use crate::logging::LogConfig;

/// Share of empty cells above which a column is reported as missing data.
pub const MISSING_DATA_RATIO: f64 = 0.3;

/// Kind of finding. `Trend` and `Recommendation` are reserved; no built-in rule
/// emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Trend,
    Anomaly,
    Summary,
    Recommendation,
    Alert,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Trend => "trend",
            InsightKind::Anomaly => "anomaly",
            InsightKind::Summary => "summary",
            InsightKind::Recommendation => "recommendation",
            InsightKind::Alert => "alert",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headline value attached to an insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsightValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for InsightValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightValue::Number(n) if n.fract() == 0.0 => write!(f, "{n:.0}"),
            InsightValue::Number(n) => write!(f, "{n:.2}"),
            InsightValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for InsightValue {
    fn from(value: f64) -> Self {
        InsightValue::Number(value)
    }
}

impl From<usize> for InsightValue {
    fn from(value: usize) -> Self {
        InsightValue::Number(value as f64)
    }
}

impl From<String> for InsightValue {
    fn from(value: String) -> Self {
        InsightValue::Text(value)
    }
}

/// A single generated finding about a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<InsightValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
}

impl Insight {
    /// Creates an insight without severity, value or metric.
    pub fn new(kind: InsightKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            severity: None,
            value: None,
            metric: None,
        }
    }

    /// Sets the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Sets the headline value.
    pub fn with_value(mut self, value: impl Into<InsightValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the metric the insight refers to.
    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }
}

/// Inputs shared by all rules of one generation run.
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    pub profiles: &'a [ColumnProfile],
    pub rows: &'a [Row],
    pub statistics: &'a [ColumnStatistics],
    pub sheet_name: &'a str,
}

impl InsightContext<'_> {
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn total_columns(&self) -> usize {
        self.profiles.len()
    }
}

/// Trait for implementing insight rules
pub trait InsightRule: Send + Sync {
    /// Apply this rule and return zero or more insights
    fn apply(&self, ctx: &InsightContext<'_>) -> Vec<Insight>;

    /// Get a human-readable name for this rule
    fn name(&self) -> &str;

    /// Get a description of what this rule looks for
    fn description(&self) -> &str;
}

/// Flags columns whose share of empty cells exceeds [`MISSING_DATA_RATIO`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingDataRule;

impl InsightRule for MissingDataRule {
    fn apply(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let total_rows = ctx.total_rows();
        if total_rows == 0 {
            return Vec::new();
        }

        let sparse: Vec<&str> = ctx
            .profiles
            .iter()
            .filter(|profile| profile.null_ratio(total_rows) > MISSING_DATA_RATIO)
            .map(|profile| profile.name.as_str())
            .collect();

        if sparse.is_empty() {
            return Vec::new();
        }

        vec![Insight::new(
            InsightKind::Alert,
            "Missing Data Detected",
            format!(
                "{} column(s) have more than {:.0}% missing values: {}",
                sparse.len(),
                MISSING_DATA_RATIO * 100.0,
                sparse.join(", ")
            ),
        )
        .with_severity(Severity::Medium)
        .with_value(sparse.len())]
    }

    fn name(&self) -> &str {
        "MissingDataRule"
    }

    fn description(&self) -> &str {
        "Reports columns where more than 30% of rows are empty"
    }
}

/// Reports numeric columns containing 3σ outliers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlierRule;

impl InsightRule for OutlierRule {
    fn apply(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        ctx.statistics
            .iter()
            .filter(|stats| stats.summary.has_outliers())
            .map(|stats| {
                let summary = &stats.summary;
                let count = summary.outlier_count();
                Insight::new(
                    InsightKind::Anomaly,
                    format!("Outliers in {}", stats.column),
                    format!(
                        "Found {count} outlier(s) in {}. Values range from {:.2} to {:.2} with a mean of {:.2}.",
                        stats.column, summary.min, summary.max, summary.mean
                    ),
                )
                .with_severity(Severity::Low)
                .with_value(count)
                .with_metric(stats.column.clone())
            })
            .collect()
    }

    fn name(&self) -> &str {
        "OutlierRule"
    }

    fn description(&self) -> &str {
        "Reports numeric columns with values beyond three standard deviations"
    }
}

/// Closing overview of row and column counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRule;

impl InsightRule for SummaryRule {
    fn apply(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let subject = if ctx.sheet_name.trim().is_empty() {
            "The sheet".to_string()
        } else {
            format!("Sheet \"{}\"", ctx.sheet_name)
        };

        vec![Insight::new(
            InsightKind::Summary,
            "Dataset Overview",
            format!(
                "{subject} contains {} rows and {} columns.",
                ctx.total_rows(),
                ctx.total_columns()
            ),
        )
        .with_value(ctx.total_rows())]
    }

    fn name(&self) -> &str {
        "SummaryRule"
    }

    fn description(&self) -> &str {
        "Summarizes row and column counts"
    }
}

/// Engine that orchestrates insight rules
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
    summary: SummaryRule,
    statistics: StatisticalAnalyzer,
    log: LogConfig,
}

impl InsightEngine {
    /// Create an engine with the default rule set
    pub fn new() -> Self {
        Self::empty()
            .add_rule(Box::new(MissingDataRule))
            .add_rule(Box::new(OutlierRule))
    }

    /// Create an engine that only emits the summary
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            summary: SummaryRule,
            statistics: StatisticalAnalyzer::new(),
            log: LogConfig::default(),
        }
    }

    /// Add a rule; rules run in insertion order, before the summary
    pub fn add_rule(mut self, rule: Box<dyn InsightRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the logging configuration
    pub fn log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Names of the installed rules, in execution order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Generate insights for a profiled sheet.
    ///
    /// Never returns an empty list: the summary is always the last insight.
    #[instrument(skip(self, profiles, rows), fields(columns = profiles.len(), rows = rows.len()))]
    pub fn generate(&self, profiles: &[ColumnProfile], rows: &[Row], sheet_name: &str) -> Vec<Insight> {
        let statistics = self.statistics.analyze(profiles, rows);
        let ctx = InsightContext {
            profiles,
            rows,
            statistics: &statistics,
            sheet_name,
        };

        let mut insights = Vec::new();
        for rule in &self.rules {
            let produced = rule.apply(&ctx);
            log_rule!(
                self.log,
                rule = rule.name(),
                insights = produced.len(),
                "Applied insight rule"
            );
            insights.extend(produced);
        }
        insights.extend(self.summary.apply(&ctx));

        debug!(insights = insights.len(), "Generated insights");
        insights
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}
